//! Fragment module - classified units of document text

use crate::confidence::ReviewGate;

/// A classified fragment - one unit of document text with a raw level label
///
/// Fragments arrive as an ordered sequence from the upstream classifier.
/// That order is the only signal used to infer parent/child relationships;
/// codes are never parsed as paths.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedFragment {
    /// Opaque level label assigned by the classifier
    pub raw_level: String,

    /// Short human-assigned identifier (e.g. `1.2.a`)
    pub code: String,

    /// Heading or short name
    pub title: String,

    /// Free-text body
    pub description: String,

    /// Classifier confidence in [0.0, 1.0]
    pub confidence: f64,

    /// 1-based page the fragment was read from
    pub source_page: u32,

    /// Verbatim excerpt from the document
    pub source_text: String,

    /// True iff confidence is below the review threshold
    pub needs_review: bool,
}

impl ClassifiedFragment {
    /// Create a new fragment
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        raw_level: impl Into<String>,
        code: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        confidence: f64,
        source_page: u32,
        source_text: impl Into<String>,
        needs_review: bool,
    ) -> Self {
        Self {
            raw_level: raw_level.into(),
            code: code.into(),
            title: title.into(),
            description: description.into(),
            confidence,
            source_page,
            source_text: source_text.into(),
            needs_review,
        }
    }

    /// Recompute the review flag against a gate
    pub fn with_review_gate(mut self, gate: &ReviewGate) -> Self {
        self.needs_review = gate.needs_review(self.confidence);
        self
    }

    /// Check the structural invariants of the fragment
    pub fn validate(&self) -> Result<(), String> {
        if !self.confidence.is_finite() || !(0.0..=1.0).contains(&self.confidence) {
            return Err(format!(
                "fragment '{}' confidence {} out of range [0.0, 1.0]",
                self.code, self.confidence
            ));
        }
        if self.source_page == 0 {
            return Err(format!("fragment '{}' has source_page 0", self.code));
        }
        Ok(())
    }
}
