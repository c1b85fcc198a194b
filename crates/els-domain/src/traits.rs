//! Trait definitions for swappable seams
//!
//! These traits define the boundaries between the normalization engine and
//! the strategies or collaborators it is composed with. Implementations live
//! in other crates.

use crate::{CanonicalTier, ClassifiedFragment};

/// Resolved assignment of raw level labels to canonical tiers
///
/// Entries are kept in first-occurrence order. A label that resolves to no
/// tier is still listed, with `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TierMapping {
    entries: Vec<(String, Option<CanonicalTier>)>,
}

impl TierMapping {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a label; an already present label keeps its first assignment
    pub fn push(&mut self, label: impl Into<String>, tier: Option<CanonicalTier>) {
        let label = label.into();
        if !self.entries.iter().any(|(existing, _)| *existing == label) {
            self.entries.push((label, tier));
        }
    }

    /// Tier assigned to a label, if any
    pub fn tier_of(&self, label: &str) -> Option<CanonicalTier> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == label)
            .and_then(|(_, tier)| *tier)
    }

    /// All entries in first-occurrence order
    pub fn entries(&self) -> &[(String, Option<CanonicalTier>)] {
        &self.entries
    }

    /// Labels that resolved to no tier
    pub fn unmapped(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, tier)| tier.is_none())
            .map(|(label, _)| label.as_str())
    }

    /// Number of distinct labels
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping has no labels
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Strategy mapping raw classifier labels onto canonical tiers
///
/// Implemented by the normalization engine (els-parser). The assembler only
/// consumes the resulting [`TierMapping`], so strategies can be swapped
/// without touching it.
pub trait LevelMapper {
    /// Resolve labels for the review-filtered fragments of one document
    ///
    /// `depth` is the number of distinct labels among `fragments`.
    fn resolve(&self, fragments: &[ClassifiedFragment], depth: usize) -> TierMapping;

    /// Short name for logs and diagnostics
    fn name(&self) -> &'static str;
}

/// Source of classified fragments for one document
///
/// Implemented by the surrounding pipeline (classifier output loaders).
pub trait FragmentSource {
    /// Error type for loading operations
    type Error;

    /// Load the ordered fragments of a document
    fn load_fragments(&self) -> Result<Vec<ClassifiedFragment>, Self::Error>;

    /// Human-readable description of where fragments come from
    fn describe(&self) -> String;
}
