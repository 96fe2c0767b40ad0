//! Command registry for the command palette.
//!
//! Holds every registered command in registration order, keyed by id.

use tracing::{debug, trace};

use super::Command;
use crate::error::Result;

/// Registry of all available commands.
///
/// Registering a command whose id already exists replaces the earlier entry
/// in place: the newest definition wins and keeps the original position.
#[derive(Debug, Default, Clone)]
pub struct CommandRegistry {
    /// All registered commands, in registration order.
    commands: Vec<Command>,
}

impl CommandRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry from a startup command list.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvalidCommand`](crate::PaletteError::InvalidCommand)
    /// encountered.
    pub fn with_commands(commands: impl IntoIterator<Item = Command>) -> Result<Self> {
        let mut registry = Self::new();
        registry.register_all(commands)?;
        Ok(registry)
    }

    /// Register a command, replacing any existing command with the same id.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCommand`](crate::PaletteError::InvalidCommand) if the
    /// id or title is empty. The registry is left unchanged in that case.
    pub fn register(&mut self, command: Command) -> Result<()> {
        command.validate()?;

        if let Some(existing) = self.commands.iter_mut().find(|c| c.id == command.id) {
            debug!(id = %command.id, "Replacing registered command");
            *existing = command;
        } else {
            trace!(id = %command.id, "Registering command");
            self.commands.push(command);
        }
        Ok(())
    }

    /// Register several commands in order.
    ///
    /// Stops at the first invalid command; commands before it stay registered.
    pub fn register_all(&mut self, commands: impl IntoIterator<Item = Command>) -> Result<()> {
        for command in commands {
            self.register(command)?;
        }
        Ok(())
    }

    /// Remove a command by id.
    ///
    /// Unknown ids are ignored. Returns true if a command was removed.
    pub fn unregister(&mut self, id: &str) -> bool {
        let before = self.commands.len();
        self.commands.retain(|c| c.id != id);
        let removed = self.commands.len() != before;
        if removed {
            debug!(id, "Unregistered command");
        }
        removed
    }

    /// Get a command by id.
    pub fn get(&self, id: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.id == id)
    }

    /// Check whether a command id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// All registered commands in registration order.
    pub fn list_all(&self) -> &[Command] {
        &self.commands
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::CommandAction;
    use crate::error::PaletteError;

    fn cmd(id: &str, title: &str) -> Command {
        Command::new(id, title, CommandAction::noop())
    }

    fn ids(registry: &CommandRegistry) -> Vec<&str> {
        registry.list_all().iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_new_registry_is_empty() {
        let registry = CommandRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_register_preserves_order() {
        let mut registry = CommandRegistry::new();
        registry.register(cmd("b", "Bravo")).unwrap();
        registry.register(cmd("a", "Alpha")).unwrap();
        registry.register(cmd("c", "Charlie")).unwrap();

        assert_eq!(ids(&registry), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_register_duplicate_replaces_in_place() {
        let mut registry = CommandRegistry::new();
        registry.register(cmd("a", "Alpha")).unwrap();
        registry.register(cmd("b", "Bravo")).unwrap();
        registry.register(cmd("a", "Alpha Two")).unwrap();

        assert_eq!(ids(&registry), vec!["a", "b"]);
        assert_eq!(registry.get("a").unwrap().title, "Alpha Two");
    }

    #[test]
    fn test_register_invalid_rejected() {
        let mut registry = CommandRegistry::new();

        let err = registry.register(cmd("", "Nameless")).unwrap_err();
        assert!(matches!(err, PaletteError::InvalidCommand(_)));

        let err = registry.register(cmd("x", "   ")).unwrap_err();
        assert!(matches!(err, PaletteError::InvalidCommand(_)));

        assert!(registry.is_empty());
    }

    #[test]
    fn test_with_commands_stops_at_invalid() {
        let result = CommandRegistry::with_commands(vec![cmd("a", "Alpha"), cmd("", "Broken")]);
        assert!(result.is_err());

        let mut registry = CommandRegistry::new();
        let _ = registry.register_all(vec![cmd("a", "Alpha"), cmd("", "Broken"), cmd("c", "C")]);
        assert_eq!(ids(&registry), vec!["a"]);
    }

    #[test]
    fn test_unregister_is_idempotent() {
        let mut registry = CommandRegistry::new();
        registry.register(cmd("a", "Alpha")).unwrap();
        registry.register(cmd("b", "Bravo")).unwrap();

        assert!(registry.unregister("a"));
        assert_eq!(ids(&registry), vec!["b"]);

        assert!(!registry.unregister("a"));
        assert!(!registry.unregister("never-registered"));
        assert_eq!(ids(&registry), vec!["b"]);
    }

    #[test]
    fn test_get_and_contains() {
        let mut registry = CommandRegistry::new();
        registry.register(cmd("a", "Alpha")).unwrap();

        assert!(registry.contains("a"));
        assert!(!registry.contains("b"));
        assert_eq!(registry.get("a").unwrap().title, "Alpha");
        assert!(registry.get("b").is_none());
    }
}
