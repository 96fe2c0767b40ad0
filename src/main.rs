//! Synapse palette - command palette for the Synapse training dashboard.
//!
//! Runs the terminal dashboard host by default; the other subcommands drive
//! the palette headlessly.

use std::io;
use std::path::PathBuf;
use std::sync::mpsc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::warn;

use synapse_palette::app::{self, App, StatusReporter};
use synapse_palette::commands::{default_commands, CommandRegistry};
use synapse_palette::config::Config;
use synapse_palette::events::{EventHandler, HostEvent};
use synapse_palette::{logging, CommandPalette, JsonFileStore, MemoryStore, RecentStore};

#[derive(Debug, Parser)]
#[command(name = "synapse-palette", version, about)]
struct Cli {
    /// Path to the configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Keep recent commands in memory only.
    #[arg(long, global = true)]
    ephemeral: bool,

    /// Write debug output to the log file.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Cmd>,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Open the terminal dashboard (default).
    Tui,
    /// List every command in browse order.
    List,
    /// Search commands and print the ranked results.
    Search {
        /// Query words.
        #[arg(required = true)]
        query: Vec<String>,
        /// Maximum number of results.
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Execute a command by id.
    Run {
        /// Command id, e.g. `nav.training`.
        id: String,
    },
    /// Show or clear recently executed commands.
    Recent {
        /// Forget all recent commands.
        #[arg(long)]
        clear: bool,
    },
    /// Inspect or create the configuration file.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Print the configuration file path.
    Path,
    /// Write a configuration file with default values.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("warning: logging disabled: {:#}", e);
    }

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::config_path()?,
    };

    let ephemeral = cli.ephemeral;
    let setup = || {
        let config = load_config(&config_path);
        let store = recent_store(&config, ephemeral);
        logging::startup(&config_path, store.location());
        (config, store)
    };

    let result = match cli.command.unwrap_or(Cmd::Tui) {
        Cmd::Config { action } => config_command(action, &config_path),
        Cmd::Tui => {
            let (config, store) = setup();
            run_tui(&config, store)
        }
        Cmd::List => {
            let (config, store) = setup();
            let (palette, _rx) = headless_palette(&config, store)?;
            print_commands(&palette, "");
            Ok(())
        }
        Cmd::Search { query, limit } => {
            let (mut config, store) = setup();
            if let Some(limit) = limit {
                config.palette.max_results = limit.max(1);
            }
            let (palette, _rx) = headless_palette(&config, store)?;
            print_commands(&palette, &query.join(" "));
            Ok(())
        }
        Cmd::Run { id } => {
            let (config, store) = setup();
            run_command(&config, store, &id)
        }
        Cmd::Recent { clear } => {
            let (config, store) = setup();
            recent_command(&config, store, clear)
        }
    };

    logging::shutdown();
    result
}

fn load_config(path: &std::path::Path) -> Config {
    Config::load_from(path).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        eprintln!("warning: {} ({})", e, path.display());
        Config::default()
    })
}

fn recent_store(config: &Config, ephemeral: bool) -> Box<dyn RecentStore> {
    if ephemeral {
        return Box::new(MemoryStore::new());
    }
    if let Some(path) = &config.palette.recents_file {
        return Box::new(JsonFileStore::new(path));
    }
    match JsonFileStore::in_data_dir() {
        Ok(store) => Box::new(store),
        Err(e) => {
            warn!(error = %e, "No data directory, recent commands will not persist");
            Box::new(MemoryStore::new())
        }
    }
}

fn headless_palette(
    config: &Config,
    store: Box<dyn RecentStore>,
) -> anyhow::Result<(CommandPalette, mpsc::Receiver<HostEvent>)> {
    let (tx, rx) = mpsc::channel();
    let registry = CommandRegistry::with_commands(default_commands(&tx))?;
    let palette = CommandPalette::new(
        registry,
        &config.palette,
        store,
        Box::new(StatusReporter::new(tx)),
    );
    Ok((palette, rx))
}

fn print_commands(palette: &CommandPalette, query: &str) {
    let results = palette.search(query);
    if results.is_empty() {
        println!("No matching commands");
        return;
    }
    for cmd in results {
        let marker = if palette.recent().contains(&cmd.id) { "*" } else { " " };
        let binding = cmd.key_binding.as_deref().unwrap_or("");
        println!(
            "{} {:<24} {:<28} [{}] {}",
            marker,
            cmd.id,
            cmd.title,
            cmd.category_label(),
            binding
        );
    }
}

fn run_command(config: &Config, store: Box<dyn RecentStore>, id: &str) -> anyhow::Result<()> {
    let (mut palette, rx) = headless_palette(config, store)?;
    if !palette.execute_id(id) {
        anyhow::bail!("unknown command '{}' (see `synapse-palette list`)", id);
    }
    for event in rx.try_iter() {
        println!("{}", event.describe());
    }
    Ok(())
}

fn recent_command(config: &Config, store: Box<dyn RecentStore>, clear: bool) -> anyhow::Result<()> {
    let (mut palette, _rx) = headless_palette(config, store)?;
    if clear {
        palette.clear_recents();
        println!("Recent commands cleared");
        return Ok(());
    }
    for id in palette.recent().iter() {
        match palette.registry().get(id) {
            Some(cmd) => println!("{:<24} {}", id, cmd.title),
            None => println!("{:<24} (no longer registered)", id),
        }
    }
    Ok(())
}

fn config_command(action: ConfigAction, path: &std::path::Path) -> anyhow::Result<()> {
    match action {
        ConfigAction::Path => println!("{}", path.display()),
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
            }
            Config::default().save_to(path)?;
            println!("Wrote {}", path.display());
        }
    }
    Ok(())
}

fn run_tui(config: &Config, store: Box<dyn RecentStore>) -> anyhow::Result<()> {
    let mut app = App::new(config, store)?;

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e).context("failed to enter alternate screen");
    }

    let result = Terminal::new(CrosstermBackend::new(stdout))
        .map_err(anyhow::Error::from)
        .and_then(|mut terminal| {
            let outcome = logging::with_panics_logged(|| {
                app::run(&mut terminal, &mut app, &EventHandler::new())
            });
            let _ = terminal.show_cursor();
            match outcome {
                Ok(outcome) => outcome.map_err(anyhow::Error::from),
                Err(_) => Err(crashed()),
            }
        });

    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
    result
}

fn crashed() -> anyhow::Error {
    match logging::log_directory() {
        Some(dir) => anyhow::anyhow!("dashboard crashed, see the log in {}", dir.display()),
        None => anyhow::anyhow!("dashboard crashed"),
    }
}
