//! Synapse command palette.
//!
//! A keyboard-driven command palette for the Synapse training dashboard:
//! a command registry, weighted keyword search with recency tie-breaking,
//! and a navigation state machine that executes commands with isolated
//! failures. The terminal host in [`app`] drives it with ratatui.

pub mod app;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod palette;
pub mod report;
pub mod storage;
pub mod ui;

pub use commands::{Command, CommandAction, CommandRegistry, RecentCommands, SearchOptions};
pub use error::{PaletteError, Result};
pub use palette::{CommandPalette, PaletteState, ResultEntry};
pub use report::{ErrorReporter, TracingReporter};
pub use storage::{JsonFileStore, MemoryStore, RecentStore};
