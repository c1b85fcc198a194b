//! ELS Hierarchy Parser
//!
//! Reconstructs a canonical standards hierarchy from classified fragments.
//!
//! # Overview
//!
//! An upstream classifier labels each fragment of a standards document with
//! a raw level of unknown reliability. The parser infers how many tiers the
//! classifier actually used, maps them onto the fixed
//! `Domain > Strand > SubStrand > Indicator` taxonomy, replays the fragments
//! in document order to attach every indicator to its enclosing ancestors,
//! and derives a deterministic identifier for each accepted standard.
//!
//! # Architecture
//!
//! ```text
//! Fragments → Depth Detector → Level Mapper → Assembler → Standards + Orphans
//! ```
//!
//! # Key Features
//!
//! - **Review Gate**: Low-confidence fragments never shape the hierarchy
//! - **Swappable Mapping**: First-occurrence ranking by default, label-aware on demand
//! - **Lenient Assembly**: Missing strands or sub-strands never reject an indicator
//! - **Explicit Failures**: Terminal conditions are values, never panics
//! - **Diagnostics**: Dropped fragments are counted rather than silently lost
//!
//! # Example Usage
//!
//! ```
//! use els_domain::{ClassifiedFragment, Jurisdiction};
//! use els_parser::{HierarchyParser, ParseRequest, ParseStatus};
//!
//! let fragments = vec![
//!     ClassifiedFragment::new("domain", "LLD", "Language and Literacy", "", 0.95, 1, "LLD", false),
//!     ClassifiedFragment::new("indicator", "LLD.1", "Listening", "Listens", 0.9, 2, "LLD.1", false),
//! ];
//!
//! let parser = HierarchyParser::default_config();
//! let result = parser.parse(ParseRequest::new(fragments, Jurisdiction::new("US", "CA"), 2021));
//!
//! assert_eq!(result.status, ParseStatus::Success);
//! assert_eq!(result.standards[0].standard_id().as_str(), "US-CA-2021-LLD-LLD.1");
//! ```

#![warn(missing_docs)]

mod assembler;
mod config;
mod depth;
mod error;
mod mapper;
mod parser;
mod records;
mod types;


pub use assembler::{assemble, Assembly, AssemblyContext, AssemblyState};
pub use config::{MappingStrategy, ParserConfig};
pub use depth::{detect_depth, DepthDetection};
pub use error::ParseError;
pub use mapper::{
    first_occurrence_order, mapper_for, positional_tier, tag_fragments, FirstOccurrenceMapper,
    LabelAwareMapper, TaggedFragment,
};
pub use parser::HierarchyParser;
pub use records::{
    fragments_from_json, DetectionOutput, DiagnosticsRecord, FragmentRecord, LevelRecord,
    MappingEntry, ParseReport, StandardRecord,
};
pub use types::{ParseDiagnostics, ParseRequest, ParseResult, ParseStatus};
