//! Command definitions for the command palette.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::error::{PaletteError, Result};

/// Category label used for commands registered without one.
pub const DEFAULT_CATEGORY: &str = "General";

type ActionFn = dyn Fn() -> anyhow::Result<()> + Send + Sync;

/// The side effect bound to a command.
///
/// Actions are cheap to clone; clones share the same underlying callable.
#[derive(Clone)]
pub struct CommandAction(Arc<ActionFn>);

impl CommandAction {
    /// Wrap a callable as a command action.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// An action that does nothing.
    pub fn noop() -> Self {
        Self::new(|| Ok(()))
    }

    /// Invoke the action once on behalf of the command `id`.
    ///
    /// Errors returned by the action and panics raised inside it are both
    /// converted into [`PaletteError::ActionExecution`].
    pub fn invoke(&self, id: &str) -> Result<()> {
        match panic::catch_unwind(AssertUnwindSafe(|| (self.0)())) {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(PaletteError::action(id, format!("{:#}", e))),
            Err(payload) => {
                let message = if let Some(s) = payload.downcast_ref::<&str>() {
                    (*s).to_string()
                } else if let Some(s) = payload.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "action panicked".to_string()
                };
                Err(PaletteError::action(id, format!("panic: {}", message)))
            }
        }
    }

    /// Check whether two actions share the same callable.
    pub fn ptr_eq(&self, other: &CommandAction) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for CommandAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CommandAction(..)")
    }
}

/// A command that can be executed from the command palette.
#[derive(Debug, Clone)]
pub struct Command {
    /// Unique identifier for the command.
    pub id: String,
    /// Display title shown in the palette.
    pub title: String,
    /// Optional description for additional context.
    pub description: Option<String>,
    /// Category for grouping. `None` groups under [`DEFAULT_CATEGORY`].
    pub category: Option<String>,
    /// Additional keywords for search (never displayed).
    pub keywords: Vec<String>,
    /// Key binding hint, display only.
    pub key_binding: Option<String>,
    /// The action to perform when executed.
    pub action: CommandAction,
}

impl Command {
    /// Create a command with the required fields.
    pub fn new(id: impl Into<String>, title: impl Into<String>, action: CommandAction) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            category: None,
            keywords: Vec::new(),
            key_binding: None,
            action,
        }
    }

    /// Start building a command.
    pub fn builder(id: impl Into<String>, title: impl Into<String>) -> CommandBuilder {
        CommandBuilder {
            id: id.into(),
            title: title.into(),
            description: None,
            category: None,
            keywords: Vec::new(),
            key_binding: None,
            action: None,
        }
    }

    /// The category label, falling back to [`DEFAULT_CATEGORY`].
    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or(DEFAULT_CATEGORY)
    }

    /// Check the registration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::InvalidCommand`] if the id or title is blank.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(PaletteError::invalid_command("command id cannot be empty"));
        }
        if self.title.trim().is_empty() {
            return Err(PaletteError::invalid_command(format!(
                "command '{}': title cannot be empty",
                self.id
            )));
        }
        Ok(())
    }
}

/// Builder for [`Command`] values.
///
/// Unlike [`Command::new`], the action is optional until [`build`](Self::build)
/// is called, which rejects commands without one.
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    id: String,
    title: String,
    description: Option<String>,
    category: Option<String>,
    keywords: Vec<String>,
    key_binding: Option<String>,
    action: Option<CommandAction>,
}

impl CommandBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords.extend(keywords.into_iter().map(Into::into));
        self
    }

    pub fn key_binding(mut self, key_binding: impl Into<String>) -> Self {
        self.key_binding = Some(key_binding.into());
        self
    }

    /// Bind a callable as the command's action.
    pub fn action<F>(mut self, f: F) -> Self
    where
        F: Fn() -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.action = Some(CommandAction::new(f));
        self
    }

    /// Bind an existing action.
    pub fn with_action(mut self, action: CommandAction) -> Self {
        self.action = Some(action);
        self
    }

    /// Finish the command.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::InvalidCommand`] if no action was bound or if
    /// the id or title is blank.
    pub fn build(self) -> Result<Command> {
        let action = self.action.ok_or_else(|| {
            PaletteError::invalid_command(format!("command '{}': no action bound", self.id))
        })?;
        let command = Command {
            id: self.id,
            title: self.title,
            description: self.description,
            category: self.category,
            keywords: self.keywords,
            key_binding: self.key_binding,
            action,
        };
        command.validate()?;
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_builder_sets_fields() {
        let cmd = Command::builder("nav.home", "Go Home")
            .description("Back to the overview")
            .category("Navigation")
            .keywords(["start", "overview"])
            .key_binding("g h")
            .action(|| Ok(()))
            .build()
            .unwrap();

        assert_eq!(cmd.id, "nav.home");
        assert_eq!(cmd.title, "Go Home");
        assert_eq!(cmd.description.as_deref(), Some("Back to the overview"));
        assert_eq!(cmd.category_label(), "Navigation");
        assert_eq!(cmd.keywords, vec!["start", "overview"]);
        assert_eq!(cmd.key_binding.as_deref(), Some("g h"));
    }

    #[test]
    fn test_builder_without_action_rejected() {
        let err = Command::builder("nav.home", "Go Home").build().unwrap_err();
        assert!(matches!(err, PaletteError::InvalidCommand(_)));
        assert!(err.to_string().contains("no action"));
    }

    #[test]
    fn test_blank_id_and_title_rejected() {
        let err = Command::new("  ", "Go Home", CommandAction::noop())
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("id cannot be empty"));

        let err = Command::new("nav.home", "", CommandAction::noop())
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("title cannot be empty"));
    }

    #[test]
    fn test_default_category_label() {
        let cmd = Command::new("a", "Alpha", CommandAction::noop());
        assert_eq!(cmd.category_label(), DEFAULT_CATEGORY);
    }

    #[test]
    fn test_invoke_runs_once() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let action = CommandAction::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        action.invoke("a").unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_invoke_wraps_error() {
        let action = CommandAction::new(|| anyhow::bail!("disk full"));
        match action.invoke("data.export") {
            Err(PaletteError::ActionExecution { id, message }) => {
                assert_eq!(id, "data.export");
                assert!(message.contains("disk full"));
            }
            other => panic!("Expected ActionExecution, got {:?}", other),
        }
    }

    #[test]
    fn test_invoke_catches_panic() {
        let action = CommandAction::new(|| panic!("boom"));
        let err = action.invoke("bad").unwrap_err();
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_clones_share_callable() {
        let action = CommandAction::noop();
        let clone = action.clone();
        assert!(action.ptr_eq(&clone));
        assert!(!action.ptr_eq(&CommandAction::noop()));
    }
}
