use nonempty::NonEmpty;

use crate::domain::{Classification, feature::FEATURE_PREFIX};

/// A generated feature document, ready to be written to disk.
///
/// A document always holds at least one scenario; an empty bucket produces
/// no document at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureDocument {
    name: String,
    heading: Option<&'static str>,
    scenarios: NonEmpty<String>,
}

impl FeatureDocument {
    /// A document holding one classification bucket of a feature.
    ///
    /// Returns `None` if there are no scenarios.
    #[must_use]
    pub fn bucket(
        name: impl Into<String>,
        classification: Classification,
        scenarios: Vec<String>,
    ) -> Option<Self> {
        Some(Self {
            name: name.into(),
            heading: Some(classification.heading()),
            scenarios: NonEmpty::from_vec(scenarios)?,
        })
    }

    /// A document holding every normalized scenario of a feature.
    ///
    /// Returns `None` if there are no scenarios.
    #[must_use]
    pub fn combined(name: impl Into<String>, scenarios: Vec<String>) -> Option<Self> {
        Some(Self {
            name: name.into(),
            heading: None,
            scenarios: NonEmpty::from_vec(scenarios)?,
        })
    }

    /// The number of scenarios in the document.
    #[must_use]
    pub fn scenario_count(&self) -> usize {
        self.scenarios.len()
    }

    /// Renders the document text.
    ///
    /// ```text
    /// Feature: <name>
    ///
    ///   # Functional scenarios
    ///
    /// <scenario 1>
    ///
    /// <scenario 2>
    /// ```
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = format!("{FEATURE_PREFIX} {}\n\n", self.name);
        if let Some(heading) = self.heading {
            out.push_str("  ");
            out.push_str(heading);
            out.push_str("\n\n");
        }

        let body: Vec<&str> = self.scenarios.iter().map(String::as_str).collect();
        out.push_str(&body.join("\n\n"));
        out.push('\n');
        out
    }
}
