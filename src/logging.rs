//! Logging for the palette host.
//!
//! Everything goes to a daily rotating file under the local data directory
//! so log lines never land on the dashboard's alternate screen. Panics are
//! routed into the same file while the dashboard owns the terminal.

use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use tracing::{debug, error, info};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "synapse_palette=info,warn";
/// Filter used for `--verbose` when `RUST_LOG` is not set.
const VERBOSE_LOG_FILTER: &str = "synapse_palette=debug,warn";
/// Prefix of the rotated log files.
const LOG_FILE_PREFIX: &str = "synapse-palette.log";

/// Install the global file subscriber and return the log directory.
///
/// `RUST_LOG` takes precedence over `verbose`.
///
/// # Errors
///
/// Fails if the data directory is unknown or cannot be created, or if a
/// global subscriber is already installed.
pub fn init(verbose: bool) -> anyhow::Result<PathBuf> {
    let log_dir = get_log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_PREFIX);

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter(verbose));

    tracing::subscriber::set_global_default(subscriber)?;
    debug!(log_dir = %log_dir.display(), "Logging initialized");

    Ok(log_dir)
}

fn filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            VERBOSE_LOG_FILTER
        } else {
            DEFAULT_LOG_FILTER
        })
    })
}

/// Record where this run reads its configuration and keeps recent commands.
pub fn startup(config_path: &Path, recents: Option<&Path>) {
    info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %config_path.display(),
        recents = %recents.map_or_else(|| "memory".to_string(), |p| p.display().to_string()),
        "Synapse palette starting up"
    );
}

/// Run `f`, logging any panic instead of printing it to stderr.
///
/// The previous panic hook is restored afterwards. Panics caught further
/// down, such as those raised by command actions, are logged too.
pub fn with_panics_logged<T>(f: impl FnOnce() -> T) -> std::thread::Result<T> {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(|info| {
        error!(panic = %info, "Panic");
    }));

    let result = panic::catch_unwind(AssertUnwindSafe(f));

    panic::set_hook(previous);
    result
}

fn get_log_directory() -> anyhow::Result<PathBuf> {
    let base_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(base_dir.join("synapse-palette").join("logs"))
}

/// Directory holding the log files, if it can be determined.
pub fn log_directory() -> Option<PathBuf> {
    get_log_directory().ok()
}

pub fn shutdown() {
    info!("Synapse palette shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::CommandAction;
    use crate::error::PaletteError;
    use serial_test::serial;

    #[test]
    fn test_log_directory_has_expected_structure() {
        if let Some(dir) = log_directory() {
            assert!(dir.ends_with("synapse-palette/logs"));
        }
    }

    #[test]
    #[serial]
    fn test_with_panics_logged_returns_value() {
        assert_eq!(with_panics_logged(|| 7).unwrap(), 7);
    }

    #[test]
    #[serial]
    fn test_with_panics_logged_catches_panic() {
        let result = with_panics_logged(|| -> u32 { panic!("dashboard crashed") });
        let payload = result.unwrap_err();
        assert_eq!(payload.downcast_ref::<&str>(), Some(&"dashboard crashed"));
    }

    #[test]
    #[serial]
    fn test_action_panic_inside_dashboard_is_reported() {
        let action = CommandAction::new(|| panic!("bad action"));
        let outcome = with_panics_logged(|| action.invoke("train.start")).unwrap();

        match outcome {
            Err(PaletteError::ActionExecution { id, message }) => {
                assert_eq!(id, "train.start");
                assert!(message.contains("bad action"));
            }
            other => panic!("Expected ActionExecution error, got {:?}", other),
        }
    }

    #[test]
    fn test_startup_without_subscriber() {
        startup(Path::new("/tmp/config.toml"), None);
        startup(Path::new("/tmp/config.toml"), Some(Path::new("/tmp/recent.json")));
    }
}
