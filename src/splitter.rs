//! Splitting Gherkin documents into classified feature files.
//!
//! The [`Splitter`] cuts a document into features, normalizes and classifies
//! every scenario, and writes one file per feature and bucket into the
//! [`OutputLayout`]. Classification alone is available through
//! [`Splitter::classify`], which touches no files.

use std::{collections::BTreeSet, path::PathBuf};

use serde::Serialize;

use crate::{
    domain::{Classification, Config, FeatureBlock, Normalizer, Scenario, parse_features},
    storage::{FeatureDocument, OutputError, OutputLayout, write_document},
};

/// A scenario together with the bucket it was routed into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedScenario {
    /// The normalized scenario.
    pub scenario: Scenario,
    /// The bucket the scenario belongs to.
    pub classification: Classification,
}

/// A feature whose scenarios have been normalized and classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedFeature {
    /// The feature name, without the `Feature:` prefix.
    pub name: String,
    /// The output file name, e.g. `user_login.feature`.
    pub file_name: String,
    /// The scenarios, in document order.
    pub scenarios: Vec<ClassifiedScenario>,
}

impl ClassifiedFeature {
    /// The normalized text of every scenario in one bucket, in document order.
    #[must_use]
    pub fn bucket(&self, classification: Classification) -> Vec<String> {
        self.scenarios
            .iter()
            .filter(|s| s.classification == classification)
            .map(|s| s.scenario.text.clone())
            .collect()
    }

    /// The document for one bucket, or `None` if the bucket is empty.
    #[must_use]
    pub fn document(&self, classification: Classification) -> Option<FeatureDocument> {
        FeatureDocument::bucket(&self.name, classification, self.bucket(classification))
    }

    /// The document holding every normalized scenario, or `None` if the
    /// feature has no scenarios.
    #[must_use]
    pub fn combined_document(&self) -> Option<FeatureDocument> {
        let all = self
            .scenarios
            .iter()
            .map(|s| s.scenario.text.clone())
            .collect();
        FeatureDocument::combined(&self.name, all)
    }
}

/// A summary of one splitter run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SplitReport {
    /// Number of features found in the document.
    pub features: usize,
    /// Number of scenarios routed into the functional bucket.
    pub functional: usize,
    /// Number of scenarios routed into the non-functional bucket.
    pub non_functional: usize,
    /// Number of stale feature files deleted before writing.
    pub removed: usize,
    /// Files written, in the order they were written.
    pub written: Vec<PathBuf>,
    /// Title labels that were stripped without mapping to a tag.
    pub unmapped_labels: BTreeSet<String>,
}

/// Splits Gherkin documents into functional and non-functional feature
/// files.
#[derive(Debug, Clone)]
pub struct Splitter<'a> {
    config: &'a Config,
    layout: OutputLayout,
}

impl<'a> Splitter<'a> {
    /// Creates a splitter using the given configuration and output layout.
    #[must_use]
    pub const fn new(config: &'a Config, layout: OutputLayout) -> Self {
        Self { config, layout }
    }

    /// The output layout this splitter writes into.
    #[must_use]
    pub const fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    /// Normalizes and classifies every scenario of a document.
    ///
    /// Features are returned in document order. A document without a
    /// `Feature:` line yields nothing.
    #[must_use]
    pub fn classify(&self, document: &str) -> Vec<ClassifiedFeature> {
        let normalizer = Normalizer::new(self.config);

        parse_features(document)
            .iter()
            .map(|feature| self.classify_feature(&normalizer, feature))
            .collect()
    }

    fn classify_feature(
        &self,
        normalizer: &Normalizer,
        feature: &FeatureBlock,
    ) -> ClassifiedFeature {
        let scenarios = feature
            .scenarios()
            .iter()
            .map(|chunk| {
                let scenario = normalizer.normalize(chunk);
                let classification = self.config.classify(&scenario.tags);
                ClassifiedScenario {
                    scenario,
                    classification,
                }
            })
            .collect();

        ClassifiedFeature {
            name: feature.name().to_string(),
            file_name: feature.file_name(),
            scenarios,
        }
    }

    /// Splits a document and writes the resulting feature files.
    ///
    /// The output directories are created if missing and cleared of `.feature`
    /// files before anything is written. For each feature, a file is written
    /// to each bucket that received at least one scenario. When combined
    /// output is enabled, a file holding every scenario is also written to
    /// the base directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the output directories cannot be prepared or a
    /// file cannot be written. There is no rollback; files written before the
    /// failure remain.
    pub fn split(&self, document: &str) -> Result<SplitReport, OutputError> {
        let mut report = SplitReport {
            removed: self.layout.prepare(self.config.write_combined)?,
            ..SplitReport::default()
        };

        for feature in self.classify(document) {
            report.features += 1;

            if feature.scenarios.is_empty() {
                tracing::debug!("Feature '{}' has no scenarios, skipping", feature.name);
                continue;
            }

            for scenario in &feature.scenarios {
                match scenario.classification {
                    Classification::Functional => report.functional += 1,
                    Classification::NonFunctional => report.non_functional += 1,
                }
                if let Some(label) = &scenario.scenario.unmapped_label {
                    report.unmapped_labels.insert(label.clone());
                }
            }

            for classification in Classification::ALL {
                if let Some(document) = feature.document(classification) {
                    let path = self.layout.bucket_file(classification, &feature.file_name);
                    write(&mut report, path, &document)?;
                }
            }

            if self.config.write_combined {
                if let Some(document) = feature.combined_document() {
                    let path = self.layout.combined_file(&feature.file_name);
                    write(&mut report, path, &document)?;
                }
            }
        }

        Ok(report)
    }
}

fn write(
    report: &mut SplitReport,
    path: PathBuf,
    document: &FeatureDocument,
) -> Result<(), OutputError> {
    write_document(&path, document)?;

    if report.written.contains(&path) {
        tracing::warn!(
            "Overwrote {} written earlier in this run; feature names collide",
            path.display()
        );
    } else {
        tracing::info!(
            "Wrote {} ({} scenarios)",
            path.display(),
            document.scenario_count()
        );
        report.written.push(path);
    }

    Ok(())
}
