use std::{collections::BTreeSet, fmt, ops::Deref, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Matches tag tokens anywhere in a block of text.
static TAG_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@\w+").unwrap_or_else(|_| unreachable!()));

/// Matches a string consisting of exactly one tag token.
static TAG_EXACT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@\w+$").unwrap_or_else(|_| unreachable!()));

/// A validated, lowercase scenario tag such as `@security`.
///
/// A tag is an `@` followed by one or more word characters. Tags are
/// normalised to lowercase on construction, so `@Smoke` and `@smoke` are the
/// same tag.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tag(String);

/// An unordered collection of tags attached to a scenario.
pub type TagSet = BTreeSet<Tag>;

impl Tag {
    /// Creates a new tag, lowercasing the input.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTagError`] if the string is not an `@` followed by one
    /// or more word characters.
    pub fn new(s: impl Into<String>) -> Result<Self, InvalidTagError> {
        let s = s.into();
        if TAG_EXACT.is_match(&s) {
            Ok(Self(s.to_lowercase()))
        } else {
            Err(InvalidTagError(s))
        }
    }

    /// Returns the tag as a string slice, including the leading `@`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extracts every tag token declared in `text`, wherever it appears.
    ///
    /// Tokens are lowercased. This is a plain scan, so an `@` inside a step
    /// (for example in an email address) also yields a tag.
    pub fn scan(text: &str) -> impl Iterator<Item = Self> + '_ {
        TAG_TOKEN
            .find_iter(text)
            .map(|m| Self(m.as_str().to_lowercase()))
    }
}

impl TryFrom<String> for Tag {
    type Error = InvalidTagError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Tag {
    type Error = InvalidTagError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Tag> for String {
    fn from(tag: Tag) -> Self {
        tag.0
    }
}

impl FromStr for Tag {
    type Err = InvalidTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for Tag {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error returned when a string is not a valid `@word` tag.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid tag '{0}': must be '@' followed by one or more word characters")]
pub struct InvalidTagError(String);
