//! Configuration for the hierarchy parser

use els_domain::confidence::DEFAULT_CONFIDENCE_THRESHOLD;
use els_domain::ReviewGate;
use serde::{Deserialize, Serialize};

/// Strategy used to map raw level labels onto canonical tiers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingStrategy {
    /// Rank labels by first appearance in the document
    #[default]
    FirstOccurrence,
    /// Trust labels that name a canonical tier, rank the rest by first appearance
    LabelAware,
}

/// Configuration for the hierarchy parser
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Confidence below which a fragment is flagged for review
    pub confidence_threshold: f64,

    /// Recompute `needs_review` from confidence when loading wire records
    pub recompute_review_flags: bool,

    /// Label-to-tier mapping strategy
    pub mapping_strategy: MappingStrategy,
}

impl ParserConfig {
    /// Build the review gate for this configuration
    pub fn review_gate(&self) -> Result<ReviewGate, String> {
        ReviewGate::new(self.confidence_threshold)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        self.review_gate().map(|_| ())
    }
}

impl Default for ParserConfig {
    /// Default configuration matching the classifier's review threshold
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            recompute_review_flags: true,
            mapping_strategy: MappingStrategy::FirstOccurrence,
        }
    }
}

impl ParserConfig {
    /// Strict preset: only high-confidence fragments take part
    pub fn strict() -> Self {
        Self {
            confidence_threshold: 0.85,
            recompute_review_flags: true,
            mapping_strategy: MappingStrategy::LabelAware,
        }
    }

    /// Lenient preset: admit more uncertain fragments
    pub fn lenient() -> Self {
        Self {
            confidence_threshold: 0.5,
            recompute_review_flags: true,
            mapping_strategy: MappingStrategy::FirstOccurrence,
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
