//! Domain models for scenario classification.
//!
//! This module contains the core domain types including tags, the
//! classification configuration, and the line-based segmentation of Gherkin
//! documents into features and scenarios.

mod classification;
pub use classification::Classification;

mod config;
pub use config::{Config, ConfigError};

pub mod feature;
pub use feature::{FeatureBlock, parse_features};

pub mod scenario;
pub use scenario::{Normalizer, Scenario};

/// Validated scenario tags.
pub mod tag;
pub use tag::{InvalidTagError, Tag, TagSet};
