//! Recently executed command tracking.

use std::collections::VecDeque;

/// Most-recent-first list of executed command ids.
///
/// Ids are unique and the list never grows past its capacity. Ids of commands
/// that are no longer registered are kept; callers filter them when rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentCommands {
    ids: VecDeque<String>,
    max: usize,
}

impl RecentCommands {
    /// Default number of recent commands to keep.
    pub const DEFAULT_MAX: usize = 5;

    /// Create an empty list holding at most `max` ids.
    pub fn new(max: usize) -> Self {
        Self {
            ids: VecDeque::with_capacity(max),
            max,
        }
    }

    /// Rebuild a list from persisted ids (most recent first).
    ///
    /// Duplicates are dropped (the first occurrence wins) and the result is
    /// truncated to `max`.
    pub fn from_ids<I, S>(ids: I, max: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut recent = Self::new(max);
        for id in ids {
            let id = id.into();
            if recent.ids.len() >= max {
                break;
            }
            if !recent.contains(&id) {
                recent.ids.push_back(id);
            }
        }
        recent
    }

    /// Record a command as most recently used.
    pub fn record(&mut self, id: &str) {
        self.ids.retain(|i| i != id);
        self.ids.push_front(id.to_string());
        self.ids.truncate(self.max);
    }

    /// Position of `id` in the list (0 is most recent).
    pub fn position(&self, id: &str) -> Option<usize> {
        self.ids.iter().position(|i| i == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Recent ids, most recent first.
    pub fn ids(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

impl Default for RecentCommands {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record() {
        let mut recent = RecentCommands::default();

        recent.record("help.show");
        assert_eq!(recent.ids(), vec!["help.show"]);

        recent.record("nav.training");
        assert_eq!(recent.ids(), vec!["nav.training", "help.show"]);
    }

    #[test]
    fn test_record_deduplication() {
        let mut recent = RecentCommands::default();

        recent.record("help.show");
        recent.record("nav.training");
        recent.record("help.show");

        assert_eq!(recent.ids(), vec!["help.show", "nav.training"]);
    }

    #[test]
    fn test_record_max_size() {
        let mut recent = RecentCommands::default();

        for i in 0..15 {
            recent.record(&format!("cmd.{}", i));
        }

        assert_eq!(recent.len(), RecentCommands::DEFAULT_MAX);
        assert_eq!(recent.position("cmd.14"), Some(0));
        assert!(!recent.contains("cmd.9"));
    }

    #[test]
    fn test_from_ids_dedups_and_truncates() {
        let recent = RecentCommands::from_ids(["a", "b", "a", "c", "d"], 3);
        assert_eq!(recent.ids(), vec!["a", "b", "c"]);
        assert_eq!(recent.max(), 3);
    }

    #[test]
    fn test_zero_capacity_stays_empty() {
        let mut recent = RecentCommands::new(0);
        recent.record("a");
        assert!(recent.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut recent = RecentCommands::from_ids(["a", "b"], 5);
        recent.clear();
        assert!(recent.is_empty());
    }
}
