//! Defect results and candidate replacements.

use serde::{Deserialize, Serialize};
use wikilint_elements::Span;

/// Severity level for defects.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Error - should be fixed.
    #[default]
    Error,
    /// Warning - should be reviewed.
    Warning,
}

/// One candidate rewrite for a defect's span.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Replacement {
    /// Literal replacement text for the defect's span. May be empty
    /// (deletion).
    pub text: String,

    /// Human-readable description of the candidate.
    pub description: String,

    /// True when the rewrite is provably safe to apply without review.
    pub automatic: bool,
}

impl Replacement {
    /// Creates a replacement candidate.
    pub fn new(text: impl Into<String>, description: impl Into<String>, automatic: bool) -> Self {
        Self {
            text: text.into(),
            description: description.into(),
            automatic,
        }
    }
}

/// A detected markup defect: a span plus an ordered list of candidate
/// replacements.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DefectResult {
    /// Stable identifier of the detector that produced this result.
    pub detector_id: String,

    /// Byte span of the defect in the analyzed snapshot.
    pub span: Span,

    /// Severity level.
    #[serde(default)]
    pub severity: Severity,

    /// Candidate replacements, in preference order. May be empty
    /// (report-only defects).
    #[serde(default)]
    pub replacements: Vec<Replacement>,
}

impl DefectResult {
    /// Creates a result with no replacement candidates.
    pub fn new(detector_id: impl Into<String>, span: Span) -> Self {
        Self {
            detector_id: detector_id.into(),
            span,
            severity: Severity::Error,
            replacements: Vec::new(),
        }
    }

    /// Sets the severity level.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Appends a replacement candidate.
    pub fn with_replacement(
        mut self,
        text: impl Into<String>,
        description: impl Into<String>,
        automatic: bool,
    ) -> Self {
        self.replacements.push(Replacement::new(text, description, automatic));
        self
    }

    /// Returns the first automatic candidate, if any.
    pub fn automatic_replacement(&self) -> Option<&Replacement> {
        self.replacements.iter().find(|r| r.automatic)
    }

    /// True if at least one candidate is automatic.
    pub fn has_automatic(&self) -> bool {
        self.automatic_replacement().is_some()
    }
}
