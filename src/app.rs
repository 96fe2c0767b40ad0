//! Main application state and event loop.
//!
//! This module implements The Elm Architecture (TEA) pattern: terminal events
//! and host events flow through [`App::update`], and [`App::view`] draws the
//! current state.

use std::sync::mpsc::{self, Receiver, Sender};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use tracing::{debug, info, trace};

use crate::commands::{default_commands, CommandRegistry};
use crate::config::Config;
use crate::error::{PaletteError, Result};
use crate::events::{Event, EventHandler, HostEvent, Section};
use crate::palette::CommandPalette;
use crate::report::ErrorReporter;
use crate::storage::RecentStore;
use crate::ui::{PaletteAction, PaletteView, Theme};

/// Forwards action failures to the host so they show in the status bar.
#[derive(Debug, Clone)]
pub struct StatusReporter {
    tx: Sender<HostEvent>,
}

impl StatusReporter {
    pub fn new(tx: Sender<HostEvent>) -> Self {
        Self { tx }
    }
}

impl ErrorReporter for StatusReporter {
    fn report(&self, error: &PaletteError, context: &str) {
        tracing::error!(command = context, error = %error, "Command action failed");
        // Nobody is listening once the host has shut down
        let _ = self.tx.send(HostEvent::ActionFailed {
            id: context.to_string(),
            message: error.user_message(),
        });
    }
}

/// The main application struct that holds all state.
pub struct App {
    /// The dashboard section on screen.
    section: Section,
    /// Active color theme.
    theme: Theme,
    /// The command palette core.
    palette: CommandPalette,
    /// Palette overlay rendering and key handling.
    palette_view: PaletteView,
    /// Events emitted by command actions.
    host_rx: Receiver<HostEvent>,
    /// Last status message shown in the footer.
    status: Option<String>,
    /// Whether the application should quit.
    should_quit: bool,
}

impl App {
    /// Create the application with the default command set.
    pub fn new(config: &Config, store: Box<dyn RecentStore>) -> Result<Self> {
        let (tx, host_rx) = mpsc::channel();
        let registry = CommandRegistry::with_commands(default_commands(&tx))?;
        let palette = CommandPalette::new(
            registry,
            &config.palette,
            store,
            Box::new(StatusReporter::new(tx)),
        );

        debug!(commands = palette.registry().len(), "Creating application");

        Ok(Self {
            section: Section::default(),
            theme: Theme::by_name(&config.palette.theme),
            palette,
            palette_view: PaletteView::new(),
            host_rx,
            status: None,
            should_quit: false,
        })
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn palette(&self) -> &CommandPalette {
        &self.palette
    }

    pub fn palette_mut(&mut self) -> &mut CommandPalette {
        &mut self.palette
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Update the application state based on an event.
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Quit => {
                info!("Quit event received");
                self.should_quit = true;
            }
            Event::Key(key_event) => {
                trace!(key = ?key_event.code, modifiers = ?key_event.modifiers, "Key event");
                self.handle_key_event(key_event);
            }
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => {}
        }
        self.drain_host_events();
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        // The palette captures all input while open
        if self.palette.is_open() {
            match self.palette_view.handle_input(&mut self.palette, key) {
                Some(PaletteAction::Executed(id)) => debug!(command = %id, "Palette executed"),
                Some(PaletteAction::Cancelled) => debug!("Palette cancelled"),
                None => {}
            }
            return;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::NONE)
            | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            (KeyCode::Char('p'), KeyModifiers::CONTROL) | (KeyCode::Char(':'), _) => {
                self.palette_view.open(&mut self.palette);
            }
            (KeyCode::Char('?'), _) => {
                self.section = Section::Shortcuts;
            }
            (KeyCode::Esc, _) => {
                self.section = Section::Dashboard;
                self.status = None;
            }
            _ => {}
        }
    }

    /// Apply everything command actions have sent since the last update.
    fn drain_host_events(&mut self) {
        while let Ok(event) = self.host_rx.try_recv() {
            self.apply_host_event(event);
        }
    }

    fn apply_host_event(&mut self, event: HostEvent) {
        debug!(event = ?event, "Host event");
        match event {
            HostEvent::Navigate(section) => {
                self.section = section;
                self.status = Some(format!("Opened {}", section.display()));
            }
            HostEvent::StartOnboarding => {
                self.section = Section::Onboarding;
                self.status = Some("Onboarding tour started".to_string());
            }
            HostEvent::ToggleTheme => {
                self.theme = self.theme.toggled();
                let name = if self.theme.is_light() { "light" } else { "dark" };
                self.status = Some(format!("Switched to {} theme", name));
            }
            HostEvent::ClearRecents => {
                self.palette.clear_recents();
                self.status = Some("Recent commands cleared".to_string());
            }
            HostEvent::Quit => {
                self.should_quit = true;
            }
            HostEvent::ActionFailed { message, .. } => {
                self.status = Some(message);
            }
        }
    }

    /// Render the application UI.
    pub fn view(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(1),    // Content
                Constraint::Length(1), // Footer/Status bar
            ])
            .split(area);

        self.render_header(frame, chunks[0]);
        self.render_content(frame, chunks[1]);
        self.render_footer(frame, chunks[2]);

        self.palette_view.render(frame, area, &self.palette, &self.theme);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let title = Paragraph::new("Synapse")
            .style(Style::default().fg(self.theme.accent).bg(self.theme.bg))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::BOTTOM)
                    .border_style(Style::default().fg(self.theme.muted)),
            );
        frame.render_widget(title, area);
    }

    fn render_content(&self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![
            Line::from(Span::styled(
                self.section.display(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        if self.section == Section::Shortcuts {
            lines.extend(self.shortcut_lines());
        } else {
            lines.push(Line::from(Span::styled(
                "Press Ctrl+P or ':' to open the command palette",
                Style::default().fg(self.theme.muted),
            )));
        }

        let paragraph = Paragraph::new(lines)
            .style(Style::default().fg(self.theme.fg).bg(self.theme.bg))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }

    fn shortcut_lines(&self) -> Vec<Line<'_>> {
        self.palette
            .registry()
            .list_all()
            .iter()
            .filter_map(|cmd| {
                let key = cmd.key_binding.as_deref()?;
                Some(Line::from(vec![
                    Span::styled(format!("{:>8}  ", key), Style::default().fg(self.theme.accent)),
                    Span::raw(cmd.title.as_str()),
                ]))
            })
            .collect()
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let hint = self
            .status
            .as_deref()
            .unwrap_or("Ctrl+P commands, '?' shortcuts, 'q' quit");

        let footer = Line::from(vec![
            Span::styled(
                format!(" {} ", self.section.display()),
                Style::default().fg(self.theme.bg).bg(self.theme.accent),
            ),
            Span::raw(" "),
            Span::styled(hint, Style::default().fg(self.theme.muted)),
        ]);
        frame.render_widget(Paragraph::new(footer), area);
    }
}

/// Drive the application until it asks to quit.
pub fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, events: &EventHandler) -> Result<()> {
    while !app.should_quit() {
        terminal.draw(|frame| app.view(frame))?;
        let event = events.next()?;
        app.update(event);
    }
    info!("Application loop finished");
    Ok(())
}
