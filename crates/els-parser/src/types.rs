//! Request and result types for hierarchy parsing

use crate::error::ParseError;
use crate::records::{ParseReport, StandardRecord};
use els_domain::{ClassifiedFragment, Jurisdiction, NormalizedStandard, TierMapping};

/// Request to normalize one document's classified fragments
#[derive(Debug, Clone)]
pub struct ParseRequest {
    /// Fragments in document order
    pub fragments: Vec<ClassifiedFragment>,

    /// Jurisdiction stamped onto every standard
    pub jurisdiction: Jurisdiction,

    /// Version year stamped onto every standard
    pub version_year: i32,
}

impl ParseRequest {
    /// Create a new request
    pub fn new(
        fragments: Vec<ClassifiedFragment>,
        jurisdiction: Jurisdiction,
        version_year: i32,
    ) -> Self {
        Self {
            fragments,
            jurisdiction,
            version_year,
        }
    }
}

/// Overall outcome of a parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStatus {
    /// Standards were assembled (possibly with orphans)
    Success,
    /// A terminal condition ended the parse
    Error,
}

impl ParseStatus {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseStatus::Success => "success",
            ParseStatus::Error => "error",
        }
    }
}

/// Accounting of how the input was consumed
///
/// Fragments dropped because their label resolved to no tier appear in
/// neither the standards nor the orphans; `dropped_count` surfaces them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseDiagnostics {
    /// Fragments supplied
    pub total_fragments: usize,

    /// Fragments set aside by the review gate
    pub review_flagged: usize,

    /// Distinct labels among usable fragments
    pub depth: usize,

    /// Name of the mapping strategy used
    pub mapper: String,

    /// Resolved label-to-tier mapping
    pub mapping: TierMapping,

    /// Usable fragments whose label resolved to no tier
    pub dropped_count: usize,

    /// Sub-strands seen while no strand was active
    pub detached_sub_strands: usize,
}

/// Result of a parse
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Overall outcome
    pub status: ParseStatus,

    /// Accepted standards, in acceptance order
    pub standards: Vec<NormalizedStandard>,

    /// Fragments that could not be resolved
    pub orphaned_elements: Vec<ClassifiedFragment>,

    /// Description of the terminal condition, present only on error
    pub error: Option<String>,

    /// Typed terminal condition, present only on error
    pub failure: Option<ParseError>,

    /// Input accounting
    pub diagnostics: ParseDiagnostics,
}

impl ParseResult {
    /// Successful parse
    pub fn success(
        standards: Vec<NormalizedStandard>,
        orphaned_elements: Vec<ClassifiedFragment>,
        diagnostics: ParseDiagnostics,
    ) -> Self {
        Self {
            status: ParseStatus::Success,
            standards,
            orphaned_elements,
            error: None,
            failure: None,
            diagnostics,
        }
    }

    /// Parse ended by a terminal condition; nothing is accepted
    pub fn failed(
        failure: ParseError,
        orphaned_elements: Vec<ClassifiedFragment>,
        diagnostics: ParseDiagnostics,
    ) -> Self {
        Self {
            status: ParseStatus::Error,
            standards: Vec::new(),
            orphaned_elements,
            error: Some(failure.to_string()),
            failure: Some(failure),
            diagnostics,
        }
    }

    /// Whether the parse succeeded
    pub fn is_success(&self) -> bool {
        self.status == ParseStatus::Success
    }

    /// Serializable mirrors of the accepted standards
    pub fn records(&self) -> Vec<StandardRecord> {
        self.standards.iter().map(StandardRecord::from).collect()
    }

    /// Serializable projection of the whole result
    pub fn to_report(&self) -> ParseReport {
        ParseReport::from(self)
    }
}
