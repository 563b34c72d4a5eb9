//! Gherkin scenario splitting
//!
//! Generated Gherkin documents are split into one file per feature, with
//! functional and non-functional scenarios written to separate directories.

pub mod domain;
pub use domain::{Classification, Config, ConfigError, FeatureBlock, Normalizer, Scenario, Tag};

pub mod payload;
pub use payload::extract_feature_text;

pub mod splitter;
pub use splitter::{ClassifiedFeature, SplitReport, Splitter};

/// Output directory layout and feature file writing.
pub mod storage;
pub use storage::{OutputError, OutputLayout};
