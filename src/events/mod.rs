//! Event handling for the application.
//!
//! Terminal input is polled into [`Event`]s; command actions talk back to the
//! host through [`HostEvent`]s sent over a channel.

mod handler;

use crossterm::event::KeyEvent;

pub use handler::EventHandler;

/// Terminal-level events driving the update loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// No input within the tick rate.
    Tick,
    /// Request to quit the application.
    Quit,
}

/// Dashboard sections the host can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Dashboard,
    Training,
    Models,
    Datasets,
    Shortcuts,
    Onboarding,
}

impl Section {
    /// Get the display name for this section.
    pub fn display(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Training => "Training Sessions",
            Self::Models => "Model Registry",
            Self::Datasets => "Datasets",
            Self::Shortcuts => "Keyboard Shortcuts",
            Self::Onboarding => "Onboarding",
        }
    }
}

/// Requests emitted by command actions for the host to carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// Switch to a dashboard section.
    Navigate(Section),
    /// Begin the onboarding tour.
    StartOnboarding,
    /// Flip between dark and light theme.
    ToggleTheme,
    /// Forget the recent commands list.
    ClearRecents,
    /// Exit the application.
    Quit,
    /// A command action failed.
    ActionFailed {
        /// Id of the failing command.
        id: String,
        /// User-facing failure message.
        message: String,
    },
}

impl HostEvent {
    /// Short human-readable description, used by the headless CLI.
    pub fn describe(&self) -> String {
        match self {
            HostEvent::Navigate(section) => format!("navigate to {}", section.display()),
            HostEvent::StartOnboarding => "start onboarding tour".to_string(),
            HostEvent::ToggleTheme => "toggle theme".to_string(),
            HostEvent::ClearRecents => "clear recent commands".to_string(),
            HostEvent::Quit => "quit".to_string(),
            HostEvent::ActionFailed { id, message } => format!("'{}' failed: {}", id, message),
        }
    }
}
