//! Built-in commands for the dashboard host.
//!
//! Every action only emits a [`HostEvent`]; the host decides what to do with it.

use std::sync::mpsc::Sender;

use super::{Command, CommandAction};
use crate::events::{HostEvent, Section};

/// Build the default command set, wired to the host event channel.
pub fn default_commands(tx: &Sender<HostEvent>) -> Vec<Command> {
    vec![
        Command {
            id: "nav.dashboard".to_string(),
            title: "Go to Dashboard".to_string(),
            description: Some("Overview of active training runs".to_string()),
            category: Some("Navigation".to_string()),
            keywords: vec!["home".to_string(), "overview".to_string()],
            key_binding: Some("g d".to_string()),
            action: emit(tx, HostEvent::Navigate(Section::Dashboard)),
        },
        Command {
            id: "nav.training".to_string(),
            title: "Open Training Sessions".to_string(),
            description: Some("Browse running and finished sessions".to_string()),
            category: Some("Navigation".to_string()),
            keywords: vec!["runs".to_string(), "jobs".to_string(), "experiments".to_string()],
            key_binding: Some("g t".to_string()),
            action: emit(tx, HostEvent::Navigate(Section::Training)),
        },
        Command {
            id: "nav.models".to_string(),
            title: "Open Model Registry".to_string(),
            description: Some("Versioned checkpoints and exports".to_string()),
            category: Some("Navigation".to_string()),
            keywords: vec!["checkpoints".to_string(), "weights".to_string()],
            key_binding: Some("g m".to_string()),
            action: emit(tx, HostEvent::Navigate(Section::Models)),
        },
        Command {
            id: "nav.datasets".to_string(),
            title: "Open Datasets".to_string(),
            description: Some("Manage training and evaluation data".to_string()),
            category: Some("Navigation".to_string()),
            keywords: vec!["data".to_string(), "corpus".to_string()],
            key_binding: Some("g s".to_string()),
            action: emit(tx, HostEvent::Navigate(Section::Datasets)),
        },
        Command {
            id: "help.onboarding".to_string(),
            title: "Start Onboarding Tour".to_string(),
            description: Some("Walk through the dashboard step by step".to_string()),
            category: Some("Help".to_string()),
            keywords: vec!["tutorial".to_string(), "wizard".to_string(), "guide".to_string()],
            key_binding: None,
            action: emit(tx, HostEvent::StartOnboarding),
        },
        Command {
            id: "view.theme".to_string(),
            title: "Toggle Theme".to_string(),
            description: Some("Switch between dark and light".to_string()),
            category: Some("View".to_string()),
            keywords: vec!["dark".to_string(), "light".to_string(), "colors".to_string()],
            key_binding: Some("Ctrl+T".to_string()),
            action: emit(tx, HostEvent::ToggleTheme),
        },
        Command {
            id: "help.shortcuts".to_string(),
            title: "Show Keyboard Shortcuts".to_string(),
            description: Some("List every key binding".to_string()),
            category: Some("Help".to_string()),
            keywords: vec!["keys".to_string(), "help".to_string()],
            key_binding: Some("?".to_string()),
            action: emit(tx, HostEvent::Navigate(Section::Shortcuts)),
        },
        Command {
            id: "settings.clear-recent".to_string(),
            title: "Clear Recent Commands".to_string(),
            description: Some("Forget the recently used list".to_string()),
            category: Some("Settings".to_string()),
            keywords: vec!["history".to_string(), "reset".to_string()],
            key_binding: None,
            action: emit(tx, HostEvent::ClearRecents),
        },
        Command {
            id: "app.quit".to_string(),
            title: "Quit".to_string(),
            description: Some("Exit the dashboard".to_string()),
            category: None,
            keywords: vec!["exit".to_string(), "close".to_string()],
            key_binding: Some("q".to_string()),
            action: emit(tx, HostEvent::Quit),
        },
    ]
}

fn emit(tx: &Sender<HostEvent>, event: HostEvent) -> CommandAction {
    let tx = tx.clone();
    CommandAction::new(move || {
        tx.send(event.clone())
            .map_err(|_| anyhow::anyhow!("host event channel closed"))
    })
}
