use std::{
    collections::{BTreeMap, BTreeSet},
    io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use super::{Classification, Tag};

/// Configuration for scenario classification.
///
/// This holds the label map used to derive tags from scenario titles, the set
/// of tags that mark a scenario as non-functional, and output options. It is
/// read once and stays immutable for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Maps a lowercase title label (e.g. "security") to a canonical tag.
    ///
    /// A scenario titled `Scenario: Reject bad tokens (Security)` gains the
    /// tag mapped from "security".
    labels: BTreeMap<String, Tag>,

    /// Tags which route a scenario into the non-functional bucket.
    non_functional: BTreeSet<Tag>,

    /// Whether to also write one normalized document per feature, containing
    /// every scenario, directly into the `bdd_tests` directory.
    pub write_combined: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            labels: default_labels(),
            non_functional: default_non_functional(),
            write_combined: false,
        }
    }
}

impl Config {
    /// Creates a configuration from an explicit label map and tag set.
    ///
    /// Label keys are lowercased.
    #[must_use]
    pub fn new(labels: BTreeMap<String, Tag>, non_functional: BTreeSet<Tag>) -> Self {
        Self {
            labels: normalise_labels(labels),
            non_functional,
            write_combined: false,
        }
    }

    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid, including tags that are not of the form `@word`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Renders the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Looks up the tag mapped from a title label.
    ///
    /// The lookup is case-insensitive.
    #[must_use]
    pub fn label_tag(&self, label: &str) -> Option<&Tag> {
        self.labels.get(&label.to_lowercase())
    }

    /// Returns the label map.
    #[must_use]
    pub const fn labels(&self) -> &BTreeMap<String, Tag> {
        &self.labels
    }

    /// Returns the set of non-functional tags.
    #[must_use]
    pub const fn non_functional(&self) -> &BTreeSet<Tag> {
        &self.non_functional
    }

    /// Classifies a scenario by its tags.
    ///
    /// A scenario carrying any non-functional tag is non-functional; every
    /// other scenario, including one without tags, is functional.
    #[must_use]
    pub fn classify<'a>(&self, tags: impl IntoIterator<Item = &'a Tag>) -> Classification {
        if tags.into_iter().any(|tag| self.non_functional.contains(tag)) {
            Classification::NonFunctional
        } else {
            Classification::Functional
        }
    }
}

fn normalise_labels(labels: BTreeMap<String, Tag>) -> BTreeMap<String, Tag> {
    labels
        .into_iter()
        .map(|(label, tag)| (label.trim().to_lowercase(), tag))
        .collect()
}

fn default_labels() -> BTreeMap<String, Tag> {
    [
        ("happy path", "@smoke"),
        ("happy", "@smoke"),
        ("smoke", "@smoke"),
        ("edge", "@edge"),
        ("negative", "@negative"),
        ("error", "@negative"),
        ("security", "@security"),
        ("performance", "@performance"),
        ("perf", "@performance"),
    ]
    .into_iter()
    .map(|(label, tag)| (label.to_string(), builtin_tag(tag)))
    .collect()
}

fn default_non_functional() -> BTreeSet<Tag> {
    ["@security", "@performance"]
        .into_iter()
        .map(builtin_tag)
        .collect()
}

fn builtin_tag(tag: &str) -> Tag {
    Tag::new(tag).unwrap_or_else(|_| unreachable!("built-in tags are well formed"))
}

/// Errors that can occur when loading or saving the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        /// The configuration file path.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// The configuration file is not valid.
    #[error("Failed to parse config file {}: {source}", path.display())]
    Parse {
        /// The configuration file path.
        path: PathBuf,
        /// The underlying TOML error.
        source: toml::de::Error,
    },

    /// The configuration could not be serialized.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The configuration file could not be written.
    #[error("Failed to write config file {}: {source}", path.display())]
    Write {
        /// The configuration file path.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default)]
        write_combined: bool,

        #[serde(default = "default_non_functional")]
        non_functional: BTreeSet<Tag>,

        /// Title label to tag mapping.
        ///
        /// Kept last so it serializes as a trailing TOML table.
        #[serde(default = "default_labels")]
        labels: BTreeMap<String, Tag>,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                write_combined,
                labels,
                non_functional,
            } => Self {
                labels: normalise_labels(labels),
                non_functional,
                write_combined,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            write_combined: config.write_combined,
            labels: config.labels,
            non_functional: config.non_functional,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn tag(s: &str) -> Tag {
        Tag::new(s).unwrap()
    }

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"_version = \"1\"\nwrite_combined = true\nnon_functional = [\"@load\"]\n\n[labels]\n\"Load Test\" = \"@Load\"\n",
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert!(config.write_combined);
        assert_eq!(config.label_tag("load test"), Some(&tag("@load")));
        assert_eq!(config.label_tag("security"), None);
        assert_eq!(config.non_functional(), &BTreeSet::from([tag("@load")]));
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(matches!(error, ConfigError::Read { .. }));
        assert!(error.to_string().starts_with("Failed to read config file"));
    }

    #[test]
    fn load_invalid_tag_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nnon_functional = [\"security\"]\n")
            .unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(matches!(error, ConfigError::Parse { .. }));
    }

    #[test]
    fn empty_file_returns_default() {
        // Tests that deserialising an empty file returns the default configuration.
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn save_then_load_preserves_config() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");

        let mut config = Config::new(
            BTreeMap::from([("Slow".to_string(), tag("@performance"))]),
            BTreeSet::from([tag("@performance")]),
        );
        config.write_combined = true;
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn default_maps_known_labels() {
        let config = Config::default();

        assert_eq!(config.label_tag("Happy Path"), Some(&tag("@smoke")));
        assert_eq!(config.label_tag("perf"), Some(&tag("@performance")));
        assert_eq!(config.label_tag("error"), Some(&tag("@negative")));
        assert_eq!(config.label_tag("unknown"), None);
    }

    #[test]
    fn classify_is_existential() {
        let config = Config::default();

        let none: [Tag; 0] = [];
        assert_eq!(config.classify(&none), Classification::Functional);
        assert_eq!(
            config.classify(&[tag("@smoke"), tag("@edge")]),
            Classification::Functional
        );
        assert_eq!(
            config.classify(&[tag("@smoke"), tag("@security")]),
            Classification::NonFunctional
        );
        assert_eq!(
            config.classify(&[tag("@security"), tag("@performance")]),
            Classification::NonFunctional
        );
    }
}
