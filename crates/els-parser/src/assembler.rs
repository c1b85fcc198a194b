//! Hierarchy assembly: replay tagged fragments in document order
//!
//! Assembly is a fold over [`AssemblyState`]. Each step consumes the state
//! and one tagged fragment and yields the next state, so the machine can be
//! driven and inspected one fragment at a time.

use crate::error::ParseError;
use crate::mapper::TaggedFragment;
use els_domain::{
    CanonicalTier, ClassifiedFragment, HierarchyLevel, Jurisdiction, NormalizedStandard,
};
use tracing::debug;

/// Pass-through context stamped onto every accepted standard
#[derive(Debug, Clone, Copy)]
pub struct AssemblyContext<'a> {
    /// Jurisdiction of the document
    pub jurisdiction: &'a Jurisdiction,
    /// Version year of the document
    pub version_year: i32,
}

/// Accumulator of the assembly fold
#[derive(Debug, Clone, Default)]
pub struct AssemblyState {
    /// Most recent domain
    pub current_domain: Option<HierarchyLevel>,

    /// Most recent strand under the current domain
    pub current_strand: Option<HierarchyLevel>,

    /// Most recent sub-strand under the current strand
    pub current_sub_strand: Option<HierarchyLevel>,

    /// Standards accepted so far, in acceptance order
    pub accepted: Vec<NormalizedStandard>,

    /// Indicators seen with no active domain
    pub orphaned: Vec<ClassifiedFragment>,

    /// Sub-strands seen while no strand was active
    pub detached_sub_strands: usize,
}

impl AssemblyState {
    /// Advance the machine by one fragment
    ///
    /// # Errors
    /// Returns the constructor's message if a standard violates its invariants
    pub fn step(
        mut self,
        tagged: TaggedFragment,
        context: &AssemblyContext<'_>,
    ) -> Result<Self, String> {
        let TaggedFragment { fragment, tier } = tagged;

        match tier {
            CanonicalTier::Domain => {
                self.current_domain = Some(HierarchyLevel::ancestor(&fragment));
                self.current_strand = None;
                self.current_sub_strand = None;
            }
            CanonicalTier::Strand => {
                self.current_strand = Some(HierarchyLevel::ancestor(&fragment));
                self.current_sub_strand = None;
            }
            CanonicalTier::SubStrand => {
                if self.current_strand.is_some() {
                    self.current_sub_strand = Some(HierarchyLevel::ancestor(&fragment));
                } else {
                    debug!("Sub-strand '{}' has no active strand, not used as context", fragment.code);
                    self.detached_sub_strands += 1;
                }
            }
            CanonicalTier::Indicator => {
                let Some(domain) = self.current_domain.clone() else {
                    debug!("Indicator '{}' has no active domain, orphaned", fragment.code);
                    self.orphaned.push(fragment);
                    return Ok(self);
                };

                let standard = NormalizedStandard::new(
                    context.jurisdiction.clone(),
                    context.version_year,
                    domain,
                    self.current_strand.clone(),
                    self.current_sub_strand.clone(),
                    HierarchyLevel::indicator(&fragment),
                    fragment.source_page,
                    fragment.source_text,
                )?;
                self.accepted.push(standard);
            }
        }

        Ok(self)
    }
}

/// Outcome of a completed assembly
#[derive(Debug, Clone)]
pub struct Assembly {
    /// Accepted standards, in acceptance order
    pub accepted: Vec<NormalizedStandard>,
    /// Unanchored indicators, in document order
    pub orphaned: Vec<ClassifiedFragment>,
    /// Sub-strands that could not be used as context
    pub detached_sub_strands: usize,
}

/// Assemble standards from tagged, document-ordered fragments
///
/// # Errors
/// - [`ParseError::NoDomainFound`] if no fragment is tagged Domain
/// - [`ParseError::NoIndicatorFound`] if no fragment is tagged Indicator
/// - [`ParseError::ParsingFailed`] if a standard violates its invariants
pub fn assemble(
    tagged: Vec<TaggedFragment>,
    context: &AssemblyContext<'_>,
) -> Result<Assembly, ParseError> {
    if !tagged.iter().any(|t| t.tier == CanonicalTier::Domain) {
        return Err(ParseError::NoDomainFound);
    }
    if !tagged.iter().any(|t| t.tier == CanonicalTier::Indicator) {
        return Err(ParseError::NoIndicatorFound);
    }

    let state = tagged
        .into_iter()
        .try_fold(AssemblyState::default(), |state, fragment| {
            state.step(fragment, context)
        })
        .map_err(ParseError::ParsingFailed)?;

    Ok(Assembly {
        accepted: state.accepted,
        orphaned: state.orphaned,
        detached_sub_strands: state.detached_sub_strands,
    })
}
