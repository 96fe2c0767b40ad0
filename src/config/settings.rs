//! Palette settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};
use crate::commands::search::{SearchOptions, DEFAULT_CATEGORY_ORDER};
use crate::commands::RecentCommands;

/// Themes the terminal host knows how to draw.
pub const THEMES: &[&str] = &["dark", "light"];

/// Settings for the command palette, read from the `[palette]` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Maximum number of results shown for a query.
    pub max_results: usize,
    /// Number of recently executed commands to remember.
    pub max_recent: usize,
    /// Category priority for the empty-query listing.
    pub category_order: Vec<String>,
    /// Where recent commands are stored. Defaults to the data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recents_file: Option<PathBuf>,
    /// The UI theme to use.
    pub theme: String,
}

impl Settings {
    /// Validate these settings.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` for zero limits or an unknown theme.
    pub fn validate(&self) -> Result<()> {
        if self.max_results == 0 {
            return Err(ConfigError::ValidationError(
                "max_results must be greater than 0".to_string(),
            ));
        }
        if self.max_recent == 0 {
            return Err(ConfigError::ValidationError(
                "max_recent must be greater than 0".to_string(),
            ));
        }
        if !THEMES.contains(&self.theme.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "unknown theme '{}' (expected one of: {})",
                self.theme,
                THEMES.join(", ")
            )));
        }
        Ok(())
    }

    /// Search options derived from these settings.
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            max_results: self.max_results,
            category_order: self.category_order.clone(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_results: 50,
            max_recent: RecentCommands::DEFAULT_MAX,
            category_order: DEFAULT_CATEGORY_ORDER.iter().map(|s| s.to_string()).collect(),
            recents_file: None,
            theme: "dark".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.max_recent, 5);
        assert_eq!(settings.category_order[0], "Navigation");
    }

    #[test]
    fn test_zero_limits_rejected() {
        let settings = Settings {
            max_results: 0,
            ..Settings::default()
        };
        assert!(settings.validate().unwrap_err().to_string().contains("max_results"));

        let settings = Settings {
            max_recent: 0,
            ..Settings::default()
        };
        assert!(settings.validate().unwrap_err().to_string().contains("max_recent"));
    }

    #[test]
    fn test_unknown_theme_rejected() {
        let settings = Settings {
            theme: "neon".to_string(),
            ..Settings::default()
        };
        assert!(settings.validate().unwrap_err().to_string().contains("neon"));
    }

    #[test]
    fn test_search_options() {
        let settings = Settings {
            max_results: 7,
            ..Settings::default()
        };
        let options = settings.search_options();
        assert_eq!(options.max_results, 7);
        assert_eq!(options.category_order, settings.category_order);
    }
}
