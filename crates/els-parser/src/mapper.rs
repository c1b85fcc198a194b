//! Canonical level mapping strategies

use crate::config::MappingStrategy;
use els_domain::{CanonicalTier, ClassifiedFragment, LevelMapper, TierMapping};
use std::collections::HashSet;

/// A fragment tagged with the canonical tier its label resolved to
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedFragment {
    /// The fragment as classified
    pub fragment: ClassifiedFragment,
    /// Resolved canonical tier
    pub tier: CanonicalTier,
}

/// Distinct labels ordered by their first appearance
pub fn first_occurrence_order(fragments: &[ClassifiedFragment]) -> Vec<&str> {
    let mut seen = HashSet::new();
    fragments
        .iter()
        .map(|fragment| fragment.raw_level.as_str())
        .filter(|label| seen.insert(*label))
        .collect()
}

/// Canonical tier for the label at `position` in first-occurrence order
///
/// | depth | L0     | L1        | L2        | L3        |
/// |-------|--------|-----------|-----------|-----------|
/// | 2     | Domain | Indicator |           |           |
/// | 3     | Domain | Strand    | Indicator |           |
/// | other | Domain | Strand    | SubStrand | Indicator |
///
/// Positions past the table are unmapped.
pub fn positional_tier(position: usize, depth: usize) -> Option<CanonicalTier> {
    let row: &[CanonicalTier] = match depth {
        2 => &[CanonicalTier::Domain, CanonicalTier::Indicator],
        3 => &[CanonicalTier::Domain, CanonicalTier::Strand, CanonicalTier::Indicator],
        _ => &CanonicalTier::ALL,
    };
    row.get(position).copied()
}

/// Maps labels purely by the order in which they first appear
///
/// Documents introduce their coarsest tier before finer ones, so
/// first-occurrence rank stands in for structural rank. Labels beyond the
/// fourth are left unmapped.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstOccurrenceMapper;

impl LevelMapper for FirstOccurrenceMapper {
    fn resolve(&self, fragments: &[ClassifiedFragment], depth: usize) -> TierMapping {
        let mut mapping = TierMapping::new();
        for (position, label) in first_occurrence_order(fragments).into_iter().enumerate() {
            mapping.push(label, positional_tier(position, depth));
        }
        mapping
    }

    fn name(&self) -> &'static str {
        "first_occurrence"
    }
}

/// Trusts labels that literally name a canonical tier
///
/// Any other label falls back to its first-occurrence position.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelAwareMapper;

impl LevelMapper for LabelAwareMapper {
    fn resolve(&self, fragments: &[ClassifiedFragment], depth: usize) -> TierMapping {
        let mut mapping = TierMapping::new();
        for (position, label) in first_occurrence_order(fragments).into_iter().enumerate() {
            let tier = CanonicalTier::parse(label).or_else(|| positional_tier(position, depth));
            mapping.push(label, tier);
        }
        mapping
    }

    fn name(&self) -> &'static str {
        "label_aware"
    }
}

/// Build the mapper for a configured strategy
pub fn mapper_for(strategy: MappingStrategy) -> Box<dyn LevelMapper + Send + Sync> {
    match strategy {
        MappingStrategy::FirstOccurrence => Box::new(FirstOccurrenceMapper),
        MappingStrategy::LabelAware => Box::new(LabelAwareMapper),
    }
}

/// Tag fragments with their resolved tier, preserving document order
///
/// Returns the tagged fragments and the number dropped because their label
/// resolved to no tier.
pub fn tag_fragments(
    fragments: &[ClassifiedFragment],
    mapping: &TierMapping,
) -> (Vec<TaggedFragment>, usize) {
    let mut tagged = Vec::with_capacity(fragments.len());
    let mut dropped = 0;

    for fragment in fragments {
        match mapping.tier_of(&fragment.raw_level) {
            Some(tier) => tagged.push(TaggedFragment {
                fragment: fragment.clone(),
                tier,
            }),
            None => dropped += 1,
        }
    }

    (tagged, dropped)
}
