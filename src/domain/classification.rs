use std::fmt;

use serde::Serialize;

/// The bucket a scenario is routed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Behavioural scenarios. This is the default.
    Functional,
    /// Scenarios carrying a non-functional tag, such as security or
    /// performance checks.
    NonFunctional,
}

impl Classification {
    /// Both classifications, in output order.
    pub const ALL: [Self; 2] = [Self::Functional, Self::NonFunctional];

    /// The name of the output directory for this bucket.
    #[must_use]
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::Functional => "functional",
            Self::NonFunctional => "non_functional",
        }
    }

    /// The comment line placed under the feature header of a bucket document.
    #[must_use]
    pub const fn heading(self) -> &'static str {
        match self {
            Self::Functional => "# Functional scenarios",
            Self::NonFunctional => "# Non-functional scenarios",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Functional => f.write_str("functional"),
            Self::NonFunctional => f.write_str("non-functional"),
        }
    }
}
