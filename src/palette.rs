//! Command palette navigation state machine.
//!
//! The palette is either closed or open with a query, a ranked result list
//! and an optional highlighted position. All operations run synchronously;
//! nothing here touches the terminal, so a render surface only needs to read
//! [`CommandPalette::entries`] and [`CommandPalette::highlight`].
//!
//! Highlight movement clamps at both ends of the result list.

use tracing::{debug, info, trace, warn};

use crate::commands::{search, Command, CommandRegistry, RecentCommands, SearchOptions};
use crate::config::Settings;
use crate::error::Result;
use crate::report::ErrorReporter;
use crate::storage::RecentStore;

/// State of an open palette.
#[derive(Debug, Clone, Default)]
pub struct OpenPalette {
    /// The raw query as typed.
    query: String,
    /// Ranked results for the query.
    results: Vec<Command>,
    /// Highlighted result, `None` when there are no results.
    highlight: Option<usize>,
}

impl OpenPalette {
    fn new(query: String, results: Vec<Command>) -> Self {
        let highlight = if results.is_empty() { None } else { Some(0) };
        Self {
            query,
            results,
            highlight,
        }
    }
}

/// Whether the palette is shown.
#[derive(Debug, Clone, Default)]
pub enum PaletteState {
    #[default]
    Closed,
    Open(OpenPalette),
}

/// One row for a render surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultEntry<'a> {
    pub id: &'a str,
    pub label: &'a str,
    pub description: Option<&'a str>,
    pub category: &'a str,
    pub key_binding: Option<&'a str>,
    /// Whether the command is in the recent list.
    pub recent: bool,
}

/// Command palette with registry, ranking, recency and navigation.
pub struct CommandPalette {
    registry: CommandRegistry,
    recent: RecentCommands,
    options: SearchOptions,
    store: Box<dyn RecentStore>,
    reporter: Box<dyn ErrorReporter>,
    state: PaletteState,
}

impl CommandPalette {
    /// Create a palette, loading recent commands from `store`.
    ///
    /// A store that fails to load leaves the recent list empty.
    pub fn new(
        registry: CommandRegistry,
        settings: &Settings,
        store: Box<dyn RecentStore>,
        reporter: Box<dyn ErrorReporter>,
    ) -> Self {
        let recent = match store.load_recents() {
            Ok(ids) => RecentCommands::from_ids(ids, settings.max_recent),
            Err(e) => {
                warn!(error = %e, "Failed to load recent commands, starting empty");
                RecentCommands::new(settings.max_recent)
            }
        };

        Self {
            registry,
            recent,
            options: settings.search_options(),
            store,
            reporter,
            state: PaletteState::Closed,
        }
    }

    /// Show the palette with an empty query and the browse listing.
    ///
    /// Opening an already open palette starts over.
    pub fn open(&mut self) {
        let results = self.run_search("");
        debug!(results = results.len(), "Palette opened");
        self.state = PaletteState::Open(OpenPalette::new(String::new(), results));
    }

    /// Close the palette, discarding the query and results.
    pub fn dismiss(&mut self) {
        if self.is_open() {
            debug!("Palette dismissed");
        }
        self.state = PaletteState::Closed;
    }

    /// Replace the query and re-rank. The highlight moves to the top result.
    ///
    /// Ignored while closed.
    pub fn type_query(&mut self, query: &str) {
        if !self.is_open() {
            return;
        }
        let results = self.run_search(query);
        trace!(query, results = results.len(), "Query updated");
        self.state = PaletteState::Open(OpenPalette::new(query.to_string(), results));
    }

    /// Move the highlight by `delta` rows, clamping to the result list.
    pub fn move_highlight(&mut self, delta: isize) {
        if let PaletteState::Open(open) = &mut self.state {
            let Some(current) = open.highlight else {
                return;
            };
            let last = open.results.len().saturating_sub(1);
            let next = current.saturating_add_signed(delta).min(last);
            open.highlight = Some(next);
            trace!(highlight = next, "Highlight moved");
        }
    }

    /// Highlight a specific row, as a pointer would. Out-of-range indexes clamp.
    pub fn select(&mut self, index: usize) {
        if let PaletteState::Open(open) = &mut self.state {
            if !open.results.is_empty() {
                open.highlight = Some(index.min(open.results.len() - 1));
            }
        }
    }

    /// Execute the highlighted command and close.
    ///
    /// Returns the executed command id, or `None` if nothing was highlighted,
    /// in which case the palette stays open.
    pub fn confirm(&mut self) -> Option<String> {
        let command = match &self.state {
            PaletteState::Open(open) => open.highlight.and_then(|i| open.results.get(i)).cloned(),
            PaletteState::Closed => None,
        }?;

        self.state = PaletteState::Closed;
        self.execute(&command);
        Some(command.id)
    }

    /// Record `command` as recent, persist the list, and run its action once.
    ///
    /// Action failures go to the error reporter and never reach the caller.
    /// The command is recorded even when its action fails.
    pub fn execute(&mut self, command: &Command) {
        self.recent.record(&command.id);
        self.persist_recents();

        info!(command = %command.id, "Executing command");
        if let Err(e) = command.action.invoke(&command.id) {
            self.reporter.report(&e, &command.id);
        }
    }

    /// Execute a registered command by id. Returns false for unknown ids.
    pub fn execute_id(&mut self, id: &str) -> bool {
        match self.registry.get(id).cloned() {
            Some(command) => {
                self.execute(&command);
                true
            }
            None => {
                debug!(id, "Execute requested for unknown command");
                false
            }
        }
    }

    /// Register a command and refresh the open result list.
    pub fn register(&mut self, command: Command) -> Result<()> {
        self.registry.register(command)?;
        self.refresh();
        Ok(())
    }

    /// Unregister a command and refresh the open result list.
    pub fn unregister(&mut self, id: &str) -> bool {
        let removed = self.registry.unregister(id);
        if removed {
            self.refresh();
        }
        removed
    }

    /// Forget all recent commands.
    pub fn clear_recents(&mut self) {
        self.recent.clear();
        self.persist_recents();
        self.refresh();
    }

    /// Search the registry without touching the palette state.
    pub fn search(&self, query: &str) -> Vec<&Command> {
        search(query, self.registry.list_all(), &self.recent, &self.options)
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, PaletteState::Open(_))
    }

    pub fn state(&self) -> &PaletteState {
        &self.state
    }

    /// The current query, empty while closed.
    pub fn query(&self) -> &str {
        match &self.state {
            PaletteState::Open(open) => &open.query,
            PaletteState::Closed => "",
        }
    }

    /// The current results, empty while closed.
    pub fn results(&self) -> &[Command] {
        match &self.state {
            PaletteState::Open(open) => &open.results,
            PaletteState::Closed => &[],
        }
    }

    /// The highlighted position, `None` while closed or without results.
    pub fn highlight(&self) -> Option<usize> {
        match &self.state {
            PaletteState::Open(open) => open.highlight,
            PaletteState::Closed => None,
        }
    }

    /// The highlighted command.
    pub fn highlighted(&self) -> Option<&Command> {
        self.highlight().and_then(|i| self.results().get(i))
    }

    /// Display rows for the current results.
    pub fn entries(&self) -> Vec<ResultEntry<'_>> {
        self.results()
            .iter()
            .map(|cmd| ResultEntry {
                id: &cmd.id,
                label: &cmd.title,
                description: cmd.description.as_deref(),
                category: cmd.category_label(),
                key_binding: cmd.key_binding.as_deref(),
                recent: self.recent.contains(&cmd.id),
            })
            .collect()
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn recent(&self) -> &RecentCommands {
        &self.recent
    }

    fn run_search(&self, query: &str) -> Vec<Command> {
        self.search(query).into_iter().cloned().collect()
    }

    /// Re-run the current query after the registry or recents changed.
    fn refresh(&mut self) {
        let PaletteState::Open(open) = &self.state else {
            return;
        };
        let (query, previous) = (open.query.clone(), open.highlight);
        let results = self.run_search(&query);
        let highlight = match (previous, results.len()) {
            (_, 0) => None,
            (Some(i), len) => Some(i.min(len - 1)),
            (None, _) => Some(0),
        };
        self.state = PaletteState::Open(OpenPalette {
            query,
            results,
            highlight,
        });
    }

    fn persist_recents(&self) {
        if let Err(e) = self.store.save_recents(&self.recent.ids()) {
            warn!(error = %e, "Failed to save recent commands");
        }
    }
}
