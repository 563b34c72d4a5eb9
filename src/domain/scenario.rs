//! Scenario normalization.
//!
//! A scenario block is the raw text of one `Scenario:` together with the tag
//! lines above it and the steps below it. Normalizing a block collects its
//! tags and strips a trailing parenthesized label from the title line,
//! turning the label into a tag when the [`Config`] maps it.

use std::sync::LazyLock;

use regex::Regex;

use super::{Config, Tag, TagSet};

/// The prefix that identifies a scenario title line.
pub const SCENARIO_PREFIX: &str = "Scenario:";

/// Captures a trailing `(Label)` at the end of a title line.
static TITLE_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^)]+)\)\s*$").unwrap_or_else(|_| unreachable!()));

/// Matches a trailing `(Label)` together with the whitespace around it,
/// capturing a carriage return so it can be kept.
static TITLE_LABEL_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[ \t]*\([^)]+\)[ \t]*(?<cr>\r?)$").unwrap_or_else(|_| unreachable!())
});

/// Returns `true` if the line, ignoring surrounding whitespace, is a scenario
/// title.
#[must_use]
pub fn is_scenario_line(line: &str) -> bool {
    line.trim().starts_with(SCENARIO_PREFIX)
}

/// A normalized scenario block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    /// The block text with the title label removed.
    pub text: String,

    /// Every tag declared in the block, plus the tag derived from the title
    /// label, if any.
    pub tags: TagSet,

    /// The title label, if one was stripped without mapping to a tag.
    pub unmapped_label: Option<String>,
}

/// Normalizes scenario blocks against an injected [`Config`].
#[derive(Debug, Clone, Copy)]
pub struct Normalizer<'a> {
    config: &'a Config,
}

impl<'a> Normalizer<'a> {
    /// Creates a normalizer which derives tags using the given configuration.
    #[must_use]
    pub const fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Normalizes the text of one scenario block.
    ///
    /// Only the first `Scenario:` line is treated as the title. A block
    /// without a title line keeps its text and yields only its declared tags.
    #[must_use]
    pub fn normalize(&self, text: &str) -> Scenario {
        let stripped;
        let mut tags: TagSet = Tag::scan(text).collect();
        let mut lines: Vec<&str> = text.split('\n').collect();
        let mut unmapped_label = None;

        let title = lines
            .iter()
            .position(|line| is_scenario_line(line))
            .and_then(|index| {
                let label = TITLE_LABEL.captures(lines[index])?.get(1)?.as_str();
                Some((index, label.trim().to_lowercase()))
            });

        if let Some((index, label)) = title {
            if let Some(tag) = self.config.label_tag(&label) {
                tags.insert(tag.clone());
            } else {
                tracing::debug!("Title label '{label}' does not map to a tag");
                unmapped_label = Some(label);
            }

            stripped = TITLE_LABEL_SUFFIX.replace(lines[index], "${cr}");
            lines[index] = &*stripped;
        }

        Scenario {
            text: lines.join("\n"),
            tags,
            unmapped_label,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use test_case::test_case;

    use super::*;

    fn tags(tags: &[&str]) -> TagSet {
        tags.iter().map(|t| Tag::new(*t).unwrap()).collect()
    }

    fn normalize(text: &str) -> Scenario {
        Normalizer::new(&Config::default()).normalize(text)
    }

    #[test]
    fn declared_tags_are_lowercased() {
        let scenario = normalize("@Smoke @UI\nScenario: Log in\n  Given a user");

        assert_eq!(scenario.tags, tags(&["@smoke", "@ui"]));
        assert_eq!(scenario.text, "@Smoke @UI\nScenario: Log in\n  Given a user");
    }

    #[test]
    fn mapped_label_adds_tag_and_is_stripped() {
        let scenario = normalize("@smoke\nScenario: User logs in (Security)\n  Given a user");

        assert_eq!(scenario.tags, tags(&["@smoke", "@security"]));
        assert_eq!(scenario.text, "@smoke\nScenario: User logs in\n  Given a user");
        assert_eq!(scenario.unmapped_label, None);
    }

    #[test]
    fn unmapped_label_is_stripped_without_tag() {
        let scenario = normalize("Scenario: User logs in (Exploratory)\n  Given a user");

        assert!(scenario.tags.is_empty());
        assert_eq!(scenario.text, "Scenario: User logs in\n  Given a user");
        assert_eq!(scenario.unmapped_label.as_deref(), Some("exploratory"));
    }

    #[test_case("  Scenario: Load page (Perf)  ", "  Scenario: Load page"; "trailing whitespace")]
    #[test_case("Scenario: Load page(perf)", "Scenario: Load page"; "no space before label")]
    #[test_case("Scenario: Load page\t(PERFORMANCE)", "Scenario: Load page"; "tab before label")]
    #[test_case("Scenario: Load page ( Perf )", "Scenario: Load page"; "padded label")]
    fn label_forms(title: &str, expected: &str) {
        let scenario = normalize(title);

        assert_eq!(scenario.text, expected);
        assert_eq!(scenario.tags, tags(&["@performance"]));
    }

    #[test]
    fn crlf_line_endings_are_preserved() {
        let scenario = normalize("@ui\r\nScenario: Search (Edge)\r\n  When I search\r\n");

        assert_eq!(scenario.text, "@ui\r\nScenario: Search\r\n  When I search\r\n");
        assert_eq!(scenario.tags, tags(&["@ui", "@edge"]));
    }

    #[test]
    fn multi_word_label_maps() {
        let scenario = normalize("Scenario: Checkout (Happy Path)");
        assert_eq!(scenario.tags, tags(&["@smoke"]));
    }

    #[test]
    fn label_not_at_end_of_line_is_kept() {
        let text = "Scenario: Upload (large) files\n  Given a file";
        let scenario = normalize(text);

        assert_eq!(scenario.text, text);
        assert!(scenario.tags.is_empty());
    }

    #[test]
    fn only_first_scenario_line_is_the_title() {
        let text = "Scenario: First (Edge)\n  Given x\nScenario: Second (Security)\n  Given y";
        let scenario = normalize(text);

        assert_eq!(
            scenario.text,
            "Scenario: First\n  Given x\nScenario: Second (Security)\n  Given y"
        );
        assert_eq!(scenario.tags, tags(&["@edge"]));
    }

    #[test]
    fn block_without_title_is_unchanged() {
        let text = "@smoke\n  Given something (Security)";
        let scenario = normalize(text);

        assert_eq!(scenario.text, text);
        assert_eq!(scenario.tags, tags(&["@smoke"]));
    }

    #[test]
    fn step_lines_are_preserved_verbatim() {
        let text = "  @perf\n  Scenario: Fast\n    Given   spaced   words (kept)\n\n    Then done\n";
        let scenario = normalize(text);

        assert_eq!(scenario.text, text);
    }

    #[test]
    fn normalizing_twice_is_idempotent() {
        let first = normalize("@ui\nScenario: Search (Edge)\n  When I search");
        let second = normalize(&first.text);

        assert_eq!(second.text, first.text);
        assert_eq!(second.tags, tags(&["@ui"]));
    }

    #[test]
    fn uses_injected_label_map() {
        let config = Config::new(
            BTreeMap::from([("Load".to_string(), Tag::new("@load").unwrap())]),
            BTreeSet::new(),
        );
        let scenario = Normalizer::new(&config).normalize("Scenario: Spike (load)");

        assert_eq!(scenario.tags, tags(&["@load"]));
        assert_eq!(scenario.text, "Scenario: Spike");
    }
}
