//! Command system for the command palette.
//!
//! This module provides:
//! - Command definitions with categories and key binding hints
//! - The command registry
//! - Keyword search with weighted ranking and browse ordering
//! - Recent commands tracking
//! - The default dashboard command set

mod command;
mod defaults;
mod recent;
mod registry;
pub mod search;

pub use command::{Command, CommandAction, CommandBuilder, DEFAULT_CATEGORY};
pub use defaults::default_commands;
pub use recent::RecentCommands;
pub use registry::CommandRegistry;
pub use search::{browse, search, SearchOptions};
