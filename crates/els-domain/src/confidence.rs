//! Review gate module - confidence threshold for classified fragments

/// Default confidence below which a fragment needs manual review
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.7;

/// Confidence gate separating usable fragments from ones flagged for review
///
/// A fragment needs review iff its confidence is strictly below the
/// threshold. Fragments that need review never take part in hierarchy
/// normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReviewGate {
    threshold: f64,
}

impl ReviewGate {
    /// Create a new review gate
    ///
    /// # Errors
    /// Returns error if the threshold is not a finite value in [0, 1]
    pub fn new(threshold: f64) -> Result<Self, String> {
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            return Err(format!(
                "Confidence threshold {} out of range [0.0, 1.0]",
                threshold
            ));
        }
        Ok(Self { threshold })
    }

    /// Get the threshold value
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Whether a fragment with this confidence must be reviewed by a person
    pub fn needs_review(&self, confidence: f64) -> bool {
        confidence < self.threshold
    }

    /// Clamp a raw classifier confidence into [0, 1]
    ///
    /// NaN is treated as no confidence at all.
    pub fn clamp(confidence: f64) -> f64 {
        if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        }
    }
}

impl Default for ReviewGate {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }
}
