//! ELS Domain Layer
//!
//! This crate contains the data contract shared by every stage of the early
//! learning standards pipeline. It has ZERO third-party runtime dependencies
//! and defines the value objects and trait interfaces the normalization engine
//! and its surrounding collaborators agree on.
//!
//! ## Key Concepts
//!
//! - **Fragment**: One classified unit of document text with an (unreliable) raw level label
//! - **Canonical Tier**: The fixed four-level taxonomy `Domain > Strand > SubStrand > Indicator`
//! - **Review Gate**: Confidence threshold below which a fragment is set aside for manual review
//! - **Normalized Standard**: An accepted indicator together with its enclosing ancestors
//! - **Standard ID**: Deterministic composite key derived from jurisdiction, year and codes
//!
//! ## Architecture
//!
//! - No third-party crate dependencies
//! - Pure value types and validation only
//! - Classification, persistence and validation live outside this crate
//! - Trait definitions for every swappable seam

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod confidence;
pub mod fragment;
pub mod identifier;
pub mod standard;
pub mod tier;
pub mod traits;

// Re-exports for convenience
pub use confidence::ReviewGate;
pub use fragment::ClassifiedFragment;
pub use identifier::StandardId;
pub use standard::{HierarchyLevel, Jurisdiction, NormalizedStandard};
pub use tier::CanonicalTier;
pub use traits::{FragmentSource, LevelMapper, TierMapping};
