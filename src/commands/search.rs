//! Keyword search and ranking over registered commands.
//!
//! Matching is case-insensitive substring containment against the title,
//! description, category and keywords of each command. Every word of the query
//! must match some field; each word contributes the weight of its best field.

use std::cmp::Ordering;

use tracing::trace;

use super::{Command, RecentCommands};

/// Weight for a word (or phrase) equal to the whole title.
pub const EXACT_TITLE_WEIGHT: u32 = 100;
/// Weight for a title starting with the word.
pub const TITLE_PREFIX_WEIGHT: u32 = 50;
/// Weight for a title containing the word.
pub const TITLE_CONTAINS_WEIGHT: u32 = 10;
/// Weight for a description containing the word.
pub const DESCRIPTION_WEIGHT: u32 = 5;
/// Weight for a category or keyword containing the word.
pub const TAG_WEIGHT: u32 = 3;

/// Default category priority for browse ordering.
pub const DEFAULT_CATEGORY_ORDER: &[&str] = &[
    "Navigation",
    "Training",
    "Data",
    "View",
    "General",
    "Settings",
    "Help",
];

/// Options controlling result ordering and size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Maximum number of results returned.
    pub max_results: usize,
    /// Category priority for browse ordering. Unlisted categories follow,
    /// alphabetically.
    pub category_order: Vec<String>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_results: 50,
            category_order: DEFAULT_CATEGORY_ORDER.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Normalize a query: trim surrounding whitespace and lower-case.
pub fn normalize(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Search commands for `query`.
///
/// An empty (or all-whitespace) query returns the browse ordering.
/// Otherwise results are ordered by descending score, then recency, then
/// title. The ordering is total, so repeated calls give identical results.
pub fn search<'a>(
    query: &str,
    commands: &'a [Command],
    recent: &RecentCommands,
    options: &SearchOptions,
) -> Vec<&'a Command> {
    let query = normalize(query);
    if query.is_empty() {
        return browse(commands, recent, options);
    }

    let mut scored: Vec<(&Command, u32)> = commands
        .iter()
        .filter_map(|cmd| {
            let score = match_score(cmd, &query);
            (score > 0).then_some((cmd, score))
        })
        .collect();

    scored.sort_by(|(a, a_score), (b, b_score)| {
        b_score
            .cmp(a_score)
            .then_with(|| recency_rank(recent, a).cmp(&recency_rank(recent, b)))
            .then_with(|| by_title(a, b))
    });

    trace!(query = %query, matches = scored.len(), "Search complete");

    scored
        .into_iter()
        .take(options.max_results)
        .map(|(cmd, _)| cmd)
        .collect()
}

/// Ordering shown for an empty query.
///
/// Recent commands come first in recency order; the rest are grouped by
/// category priority and sorted by title within each group. Recent ids that
/// are no longer registered are skipped.
pub fn browse<'a>(
    commands: &'a [Command],
    recent: &RecentCommands,
    options: &SearchOptions,
) -> Vec<&'a Command> {
    let mut results: Vec<&Command> = recent
        .iter()
        .filter_map(|id| commands.iter().find(|c| c.id == id))
        .collect();

    let mut rest: Vec<&Command> = commands.iter().filter(|c| !recent.contains(&c.id)).collect();
    rest.sort_by(|a, b| {
        category_rank(options, a)
            .cmp(&category_rank(options, b))
            .then_with(|| {
                a.category_label()
                    .to_lowercase()
                    .cmp(&b.category_label().to_lowercase())
            })
            .then_with(|| by_title(a, b))
    });

    results.extend(rest);
    results.truncate(options.max_results);
    results
}

/// Score a command against a normalized, non-empty query.
///
/// Returns 0 when any word of the query fails to match.
pub fn match_score(cmd: &Command, query: &str) -> u32 {
    let fields = Fields::new(cmd);
    let words: Vec<&str> = query.split_whitespace().collect();

    let mut total = 0;
    for word in &words {
        let score = fields.word_score(word);
        if score == 0 {
            return 0;
        }
        total += score;
    }

    // Whole-phrase bonus so "open dashboard" prefers the exact title.
    if words.len() > 1 {
        let phrase = words.join(" ");
        total += fields.title_score(&phrase);
    }

    total
}

/// Lower-cased searchable fields of a command.
struct Fields {
    title: String,
    description: Option<String>,
    category: Option<String>,
    keywords: Vec<String>,
}

impl Fields {
    fn new(cmd: &Command) -> Self {
        Self {
            title: cmd.title.to_lowercase(),
            description: cmd.description.as_ref().map(|d| d.to_lowercase()),
            category: cmd.category.as_deref().map(str::to_lowercase),
            keywords: cmd.keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    fn title_score(&self, text: &str) -> u32 {
        if self.title == text {
            EXACT_TITLE_WEIGHT
        } else if self.title.starts_with(text) {
            TITLE_PREFIX_WEIGHT
        } else if self.title.contains(text) {
            TITLE_CONTAINS_WEIGHT
        } else {
            0
        }
    }

    fn word_score(&self, word: &str) -> u32 {
        let title = self.title_score(word);
        if title > 0 {
            return title;
        }
        if self.description.as_deref().is_some_and(|d| d.contains(word)) {
            return DESCRIPTION_WEIGHT;
        }
        if self.category.as_deref().is_some_and(|c| c.contains(word))
            || self.keywords.iter().any(|k| k.contains(word))
        {
            return TAG_WEIGHT;
        }
        0
    }
}

fn recency_rank(recent: &RecentCommands, cmd: &Command) -> usize {
    recent.position(&cmd.id).unwrap_or(usize::MAX)
}

fn category_rank(options: &SearchOptions, cmd: &Command) -> usize {
    let label = cmd.category_label();
    options
        .category_order
        .iter()
        .position(|c| c.eq_ignore_ascii_case(label))
        .unwrap_or(options.category_order.len())
}

fn by_title(a: &Command, b: &Command) -> Ordering {
    a.title
        .to_lowercase()
        .cmp(&b.title.to_lowercase())
        .then_with(|| a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::CommandAction;

    fn cmd(id: &str, title: &str) -> Command {
        Command::new(id, title, CommandAction::noop())
    }

    fn ids(results: &[&Command]) -> Vec<String> {
        results.iter().map(|c| c.id.clone()).collect()
    }

    fn sample() -> Vec<Command> {
        vec![
            cmd("home", "Go Home"),
            cmd("dash", "Open Dashboard"),
            Command::builder("term", "Open Terminal")
                .description("Shell access on the training node")
                .category("Tools")
                .keywords(["console", "dashboard"])
                .action(|| Ok(()))
                .build()
                .unwrap(),
            Command::builder("sessions", "Training Sessions")
                .description("Browse past and running sessions")
                .category("Training")
                .action(|| Ok(()))
                .build()
                .unwrap(),
        ]
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Open DASH \t"), "open dash");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_search_scenario() {
        let commands = vec![cmd("home", "Go Home"), cmd("dash", "Open Dashboard")];
        let recent = RecentCommands::default();
        let options = SearchOptions::default();

        assert_eq!(ids(&search("dash", &commands, &recent, &options)), vec!["dash"]);
        assert!(search("xyz", &commands, &recent, &options).is_empty());
    }

    #[test]
    fn test_search_is_deterministic() {
        let commands = sample();
        let recent = RecentCommands::from_ids(["sessions"], 5);
        let options = SearchOptions::default();

        let first = ids(&search("o", &commands, &recent, &options));
        for _ in 0..10 {
            assert_eq!(ids(&search("o", &commands, &recent, &options)), first);
        }
    }

    #[test]
    fn test_search_case_insensitive() {
        let commands = sample();
        let recent = RecentCommands::default();
        let options = SearchOptions::default();

        assert_eq!(
            ids(&search("TERMINAL", &commands, &recent, &options)),
            ids(&search("terminal", &commands, &recent, &options))
        );
    }

    #[test]
    fn test_multi_word_requires_every_word() {
        let commands = vec![
            cmd("open", "Open Project"),
            cmd("term", "Open Terminal"),
            cmd("close", "Close Terminal"),
        ];
        let recent = RecentCommands::default();
        let options = SearchOptions::default();

        let results = search("open terminal", &commands, &recent, &options);
        assert_eq!(ids(&results), vec!["term"]);
    }

    #[test]
    fn test_words_may_match_different_fields() {
        let commands = sample();
        let recent = RecentCommands::default();
        let options = SearchOptions::default();

        // "shell" only appears in the description, "console" only as a keyword.
        let results = search("shell console", &commands, &recent, &options);
        assert_eq!(ids(&results), vec!["term"]);
    }

    #[test]
    fn test_exact_title_ranks_first() {
        let commands = sample();
        let recent = RecentCommands::default();
        let options = SearchOptions::default();

        let results = search("open dashboard", &commands, &recent, &options);
        assert_eq!(ids(&results), vec!["dash", "term"]);
        assert!(match_score(&commands[1], "open dashboard") > match_score(&commands[2], "open dashboard"));
    }

    #[test]
    fn test_field_weights() {
        let c = Command::builder("x", "Model Registry")
            .description("Versioned checkpoints")
            .category("Data")
            .keywords(["weights"])
            .action(|| Ok(()))
            .build()
            .unwrap();

        assert_eq!(match_score(&c, "model registry"), 50 + 10 + 100);
        assert_eq!(match_score(&c, "model"), TITLE_PREFIX_WEIGHT);
        assert_eq!(match_score(&c, "registry"), TITLE_CONTAINS_WEIGHT);
        assert_eq!(match_score(&c, "checkpoint"), DESCRIPTION_WEIGHT);
        assert_eq!(match_score(&c, "data"), TAG_WEIGHT);
        assert_eq!(match_score(&c, "weights"), TAG_WEIGHT);
        assert_eq!(match_score(&c, "nothing"), 0);
    }

    #[test]
    fn test_single_word_exact_title() {
        let c = cmd("q", "Quit");
        assert_eq!(match_score(&c, "quit"), EXACT_TITLE_WEIGHT);
    }

    #[test]
    fn test_uncategorized_does_not_match_default_label() {
        let c = cmd("q", "Quit");
        assert_eq!(match_score(&c, "general"), 0);
        assert_eq!(match_score(&c, "ner"), 0);

        let general = Command::builder("g", "Preferences")
            .category("General")
            .action(|| Ok(()))
            .build()
            .unwrap();
        assert_eq!(match_score(&general, "general"), TAG_WEIGHT);

        let commands = vec![c, general];
        let recent = RecentCommands::default();
        let results = search("general", &commands, &recent, &SearchOptions::default());
        assert_eq!(ids(&results), vec!["g"]);
    }

    #[test]
    fn test_recency_breaks_ties() {
        let commands = vec![cmd("a", "Export Alpha"), cmd("b", "Export Beta")];
        let options = SearchOptions::default();

        let none = RecentCommands::default();
        assert_eq!(ids(&search("export", &commands, &none, &options)), vec!["a", "b"]);

        let recent = RecentCommands::from_ids(["b"], 5);
        assert_eq!(ids(&search("export", &commands, &recent, &options)), vec!["b", "a"]);
    }

    #[test]
    fn test_recency_does_not_override_score() {
        let commands = vec![cmd("a", "Export"), cmd("b", "Quick Export")];
        let recent = RecentCommands::from_ids(["b"], 5);
        let options = SearchOptions::default();

        assert_eq!(ids(&search("export", &commands, &recent, &options)), vec!["a", "b"]);
    }

    #[test]
    fn test_title_breaks_remaining_ties() {
        let commands = vec![cmd("z", "Zoom Out"), cmd("y", "Zoom In")];
        let recent = RecentCommands::default();
        let options = SearchOptions::default();

        assert_eq!(ids(&search("zoom", &commands, &recent, &options)), vec!["y", "z"]);
    }

    #[test]
    fn test_browse_recent_first() {
        let commands = vec![cmd("a", "Alpha"), cmd("b", "Bravo"), cmd("c", "Charlie")];
        let recent = RecentCommands::from_ids(["b", "a"], 5);
        let options = SearchOptions::default();

        assert_eq!(ids(&search("", &commands, &recent, &options)), vec!["b", "a", "c"]);
        assert_eq!(ids(&search("   ", &commands, &recent, &options)), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_browse_groups_by_category() {
        let mk = |id: &str, title: &str, category: &str| {
            Command::builder(id, title)
                .category(category)
                .action(|| Ok(()))
                .build()
                .unwrap()
        };
        let commands = vec![
            mk("help", "Show Help", "Help"),
            mk("zeta", "Zeta Tool", "Tools"),
            mk("nav2", "Open Datasets", "Navigation"),
            mk("alpha", "Alpha Tool", "Tools"),
            mk("nav1", "Go to Dashboard", "Navigation"),
            cmd("misc", "Misc"),
            mk("ext", "Extension", "Extras"),
        ];
        let recent = RecentCommands::from_ids(["help", "gone"], 5);
        let options = SearchOptions::default();

        let results = browse(&commands, &recent, &options);
        assert_eq!(
            ids(&results),
            vec!["help", "nav1", "nav2", "misc", "ext", "alpha", "zeta"]
        );
    }

    #[test]
    fn test_truncates_to_max_results() {
        let commands: Vec<Command> = (0..10)
            .map(|i| cmd(&format!("c{}", i), &format!("Command {}", i)))
            .collect();
        let recent = RecentCommands::default();
        let options = SearchOptions {
            max_results: 3,
            ..SearchOptions::default()
        };

        assert_eq!(search("command", &commands, &recent, &options).len(), 3);
        assert_eq!(search("", &commands, &recent, &options).len(), 3);
    }
}
