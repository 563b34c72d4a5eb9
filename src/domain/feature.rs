//! Line-based segmentation of Gherkin documents.
//!
//! Documents are cut into feature blocks at `Feature:` lines, and each
//! feature block is cut into scenario chunks at tag and `Scenario:` lines.
//! There is no grammar; segmentation is driven entirely by the line
//! predicates below.

use super::scenario::is_scenario_line;

/// The prefix that identifies a feature header line.
pub const FEATURE_PREFIX: &str = "Feature:";

/// The extension given to every generated feature file.
pub const FEATURE_EXTENSION: &str = "feature";

/// Returns `true` if the line starts a new feature block.
#[must_use]
pub fn is_feature_line(line: &str) -> bool {
    line.trim_start().starts_with(FEATURE_PREFIX)
}

/// Returns `true` if the line carries scenario tags.
#[must_use]
pub fn is_tag_line(line: &str) -> bool {
    line.trim_start().starts_with('@')
}

/// Returns `true` if the line is a Gherkin `#` comment.
#[must_use]
pub fn is_comment_line(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

/// One `Feature:` section of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureBlock {
    name: String,
    scenarios: Vec<String>,
}

impl FeatureBlock {
    /// Parses a feature block from its raw text.
    ///
    /// The first line supplies the name. Chunks which contain no `Scenario:`
    /// line (the feature description, a `Background:` section, stray tags)
    /// are dropped.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let header = text.lines().next().unwrap_or_default();
        let name = header
            .trim_start()
            .strip_prefix(FEATURE_PREFIX)
            .unwrap_or(header)
            .trim()
            .to_string();

        let scenarios = scenario_chunks(text)
            .into_iter()
            .filter(|chunk| chunk.lines().any(is_scenario_line))
            .collect();

        Self { name, scenarios }
    }

    /// The feature name, with the `Feature:` prefix removed.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw scenario chunks of this feature, in document order.
    #[must_use]
    pub fn scenarios(&self) -> &[String] {
        &self.scenarios
    }

    /// The name of the file this feature is written to.
    ///
    /// The feature name is lowercased and each run of whitespace is replaced
    /// by an underscore, e.g. `User Login` becomes `user_login.feature`.
    #[must_use]
    pub fn file_name(&self) -> String {
        let stem = self
            .name
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_");
        format!("{stem}.{FEATURE_EXTENSION}")
    }
}

/// Splits a document into feature blocks.
///
/// Text before the first `Feature:` line is discarded.
#[must_use]
pub fn parse_features(document: &str) -> Vec<FeatureBlock> {
    segments(document, is_feature_line)
        .into_iter()
        .filter(|segment| is_feature_line(segment))
        .map(FeatureBlock::parse)
        .collect()
}

/// Splits a feature block into scenario chunks.
///
/// A chunk starts at a tag line or a `Scenario:` line, except that a run of
/// tag lines and the scenario below it stay together, even across blank and
/// comment lines. Trailing blank lines are trimmed from each chunk.
fn scenario_chunks(feature: &str) -> Vec<String> {
    let mut after_tags = false;

    segments(feature, |line| {
        if line.trim().is_empty() || is_comment_line(line) {
            return false;
        }
        let starts_chunk = (is_tag_line(line) || is_scenario_line(line)) && !after_tags;
        after_tags = is_tag_line(line);
        starts_chunk
    })
    .into_iter()
    .map(|chunk| chunk.trim_end().to_string())
    .collect()
}

/// Cuts `text` immediately before every line for which `starts_segment`
/// returns `true`.
///
/// Segments keep their line endings, so concatenating them yields `text`.
/// The predicate receives each line without its ending.
fn segments(text: &str, mut starts_segment: impl FnMut(&str) -> bool) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let content = line.trim_end_matches(['\n', '\r']);
        if starts_segment(content) && offset > start {
            segments.push(&text[start..offset]);
            start = offset;
        }
        offset += line.len();
    }

    if offset > start {
        segments.push(&text[start..]);
    }

    segments
}
