//! Centralized error types for the command palette.
//!
//! All error types use `thiserror`. Module-level errors (configuration,
//! storage) convert into [`PaletteError`] with `?`.

use thiserror::Error;

use crate::config::ConfigError;
use crate::storage::StorageError;

/// The main error type.
#[derive(Debug, Error)]
pub enum PaletteError {
    /// A command was rejected at registration time.
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// A command's action returned an error or panicked.
    #[error("Command '{id}' failed: {message}")]
    ActionExecution {
        /// Id of the failing command.
        id: String,
        /// Description of the failure.
        message: String,
    },

    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Recent-commands persistence errors.
    #[error("{0}")]
    Storage(#[from] StorageError),

    /// IO errors (file system, etc.).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal-related errors.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl PaletteError {
    /// Create an invalid command error.
    pub fn invalid_command(msg: impl Into<String>) -> Self {
        PaletteError::InvalidCommand(msg.into())
    }

    /// Create an action execution error.
    pub fn action(id: impl Into<String>, message: impl Into<String>) -> Self {
        PaletteError::ActionExecution {
            id: id.into(),
            message: message.into(),
        }
    }

    /// Create a terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        PaletteError::Terminal(msg.into())
    }

    /// Get a user-friendly message for display in the status bar.
    pub fn user_message(&self) -> String {
        match self {
            PaletteError::InvalidCommand(msg) => format!("Command rejected: {}", msg),
            PaletteError::ActionExecution { message, .. } => {
                format!("Command failed: {}", message)
            }
            PaletteError::Config(ConfigError::ParseError(_)) => {
                "Configuration file is invalid. Please check the file format.".to_string()
            }
            PaletteError::Config(ConfigError::ValidationError(msg)) => {
                format!("Configuration error: {}", msg)
            }
            PaletteError::Config(_) => {
                "Could not read configuration. Using defaults.".to_string()
            }
            PaletteError::Storage(_) => {
                "Recent commands could not be saved. They will not persist.".to_string()
            }
            PaletteError::Io(_) => "A file operation failed. Please check file permissions.".to_string(),
            PaletteError::Terminal(msg) => format!("Terminal error: {}", msg),
        }
    }

    /// Check if the user can keep working after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            PaletteError::ActionExecution { .. } | PaletteError::Storage(_)
        )
    }
}

/// Result type for palette operations.
pub type Result<T> = std::result::Result<T, PaletteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_command_display() {
        let err = PaletteError::invalid_command("command id cannot be empty");
        assert_eq!(err.to_string(), "Invalid command: command id cannot be empty");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_action_error_display() {
        let err = PaletteError::action("nav.training", "channel closed");
        assert_eq!(err.to_string(), "Command 'nav.training' failed: channel closed");
        assert_eq!(err.user_message(), "Command failed: channel closed");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_from_config_error() {
        let err: PaletteError = ConfigError::ValidationError("max_results must be > 0".into()).into();
        assert!(matches!(err, PaletteError::Config(_)));
        assert!(err.user_message().contains("max_results"));
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: PaletteError = io.into();
        assert!(matches!(err, PaletteError::Io(_)));
        assert!(err.user_message().contains("permissions"));
    }

    #[test]
    fn test_terminal_error() {
        let err = PaletteError::terminal("raw mode unavailable");
        assert_eq!(err.user_message(), "Terminal error: raw mode unavailable");
    }
}
