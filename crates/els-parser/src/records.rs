//! Serializable mirrors for the validation and persistence stages
//!
//! Downstream stages consume these plain structures instead of the domain
//! types, so they never depend on the engine's internals.

use crate::config::ParserConfig;
use crate::error::ParseError;
use crate::types::{ParseDiagnostics, ParseResult};
use els_domain::{ClassifiedFragment, HierarchyLevel, Jurisdiction, NormalizedStandard, ReviewGate};
use serde::{Deserialize, Serialize};

/// Wire shape of one hierarchy level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelRecord {
    /// Code as printed in the document
    pub code: String,

    /// Display name
    pub name: String,

    /// Body text (indicator only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&HierarchyLevel> for LevelRecord {
    fn from(level: &HierarchyLevel) -> Self {
        Self {
            code: level.code.clone(),
            name: level.name.clone(),
            description: level.description.clone(),
        }
    }
}

impl From<LevelRecord> for HierarchyLevel {
    fn from(record: LevelRecord) -> Self {
        Self {
            code: record.code,
            name: record.name,
            description: record.description,
        }
    }
}

/// Field-for-field mirror of a [`NormalizedStandard`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardRecord {
    /// Deterministic identifier
    pub standard_id: String,
    /// Country code
    pub country: String,
    /// Region or state code
    #[serde(alias = "state")]
    pub region: String,
    /// Version year
    pub version_year: i32,
    /// Enclosing domain
    pub domain: LevelRecord,
    /// Enclosing strand
    pub strand: Option<LevelRecord>,
    /// Enclosing sub-strand
    pub sub_strand: Option<LevelRecord>,
    /// The indicator
    pub indicator: LevelRecord,
    /// Page the indicator was read from
    pub source_page: u32,
    /// Verbatim excerpt
    pub source_text: String,
}

impl From<&NormalizedStandard> for StandardRecord {
    fn from(standard: &NormalizedStandard) -> Self {
        Self {
            standard_id: standard.standard_id().to_string(),
            country: standard.jurisdiction().country.clone(),
            region: standard.jurisdiction().region.clone(),
            version_year: standard.version_year(),
            domain: standard.domain().into(),
            strand: standard.strand().map(LevelRecord::from),
            sub_strand: standard.sub_strand().map(LevelRecord::from),
            indicator: standard.indicator().into(),
            source_page: standard.source_page(),
            source_text: standard.source_text().to_string(),
        }
    }
}

impl TryFrom<StandardRecord> for NormalizedStandard {
    type Error = String;

    /// Rebuild a standard, re-checking its invariants and identifier
    fn try_from(record: StandardRecord) -> Result<Self, Self::Error> {
        let standard = NormalizedStandard::new(
            Jurisdiction::new(record.country, record.region),
            record.version_year,
            record.domain.into(),
            record.strand.map(Into::into),
            record.sub_strand.map(Into::into),
            record.indicator.into(),
            record.source_page,
            record.source_text,
        )?;

        if standard.standard_id().as_str() != record.standard_id {
            return Err(format!(
                "standard_id '{}' does not match derived '{}'",
                record.standard_id,
                standard.standard_id()
            ));
        }
        Ok(standard)
    }
}

/// Wire shape of a classified fragment as emitted by the classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FragmentRecord {
    /// Raw level label
    #[serde(rename = "level")]
    pub raw_level: String,
    /// Code
    pub code: String,
    /// Title
    pub title: String,
    /// Description
    pub description: String,
    /// Classifier confidence
    pub confidence: f64,
    /// 1-based page
    pub source_page: u32,
    /// Verbatim excerpt
    pub source_text: String,
    /// Review flag as emitted by the classifier
    #[serde(default)]
    pub needs_review: bool,
}

impl FragmentRecord {
    /// Convert into a domain fragment
    ///
    /// Confidence is clamped into [0, 1]. With a gate, the review flag is
    /// recomputed from the clamped confidence.
    pub fn into_fragment(self, gate: Option<&ReviewGate>) -> ClassifiedFragment {
        let fragment = ClassifiedFragment::new(
            self.raw_level,
            self.code,
            self.title,
            self.description,
            ReviewGate::clamp(self.confidence),
            self.source_page,
            self.source_text,
            self.needs_review,
        );
        match gate {
            Some(gate) => fragment.with_review_gate(gate),
            None => fragment,
        }
    }
}

impl From<&ClassifiedFragment> for FragmentRecord {
    fn from(fragment: &ClassifiedFragment) -> Self {
        Self {
            raw_level: fragment.raw_level.clone(),
            code: fragment.code.clone(),
            title: fragment.title.clone(),
            description: fragment.description.clone(),
            confidence: fragment.confidence,
            source_page: fragment.source_page,
            source_text: fragment.source_text.clone(),
            needs_review: fragment.needs_review,
        }
    }
}

/// Classifier output file, either wrapped or a bare array
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DetectionOutput {
    /// `{ "elements": [...] }`
    Wrapped {
        /// Fragments in document order
        elements: Vec<FragmentRecord>,
    },
    /// `[...]`
    Bare(Vec<FragmentRecord>),
}

impl DetectionOutput {
    /// Fragment records in document order
    pub fn into_records(self) -> Vec<FragmentRecord> {
        match self {
            DetectionOutput::Wrapped { elements } => elements,
            DetectionOutput::Bare(elements) => elements,
        }
    }
}

/// Parse classifier output JSON into domain fragments
pub fn fragments_from_json(
    json: &str,
    config: &ParserConfig,
) -> Result<Vec<ClassifiedFragment>, ParseError> {
    let output: DetectionOutput = serde_json::from_str(json)?;
    let gate = if config.recompute_review_flags {
        Some(config.review_gate().map_err(ParseError::Config)?)
    } else {
        None
    };

    Ok(output
        .into_records()
        .into_iter()
        .map(|record| record.into_fragment(gate.as_ref()))
        .collect())
}

/// One label of the resolved mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    /// Raw level label
    pub label: String,
    /// Canonical tier name, or null when unmapped
    pub tier: Option<String>,
}

/// Serializable mirror of [`ParseDiagnostics`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticsRecord {
    /// Fragments supplied
    pub total_fragments: usize,
    /// Fragments set aside by the review gate
    pub review_flagged: usize,
    /// Distinct labels among usable fragments
    pub depth: usize,
    /// Mapping strategy name
    pub mapper: String,
    /// Resolved mapping in first-occurrence order
    pub mapping: Vec<MappingEntry>,
    /// Fragments dropped because their label resolved to no tier
    pub dropped_count: usize,
    /// Sub-strands seen while no strand was active
    pub detached_sub_strands: usize,
}

impl From<&ParseDiagnostics> for DiagnosticsRecord {
    fn from(diagnostics: &ParseDiagnostics) -> Self {
        Self {
            total_fragments: diagnostics.total_fragments,
            review_flagged: diagnostics.review_flagged,
            depth: diagnostics.depth,
            mapper: diagnostics.mapper.clone(),
            mapping: diagnostics
                .mapping
                .entries()
                .iter()
                .map(|(label, tier)| MappingEntry {
                    label: label.clone(),
                    tier: tier.map(|t| t.as_str().to_string()),
                })
                .collect(),
            dropped_count: diagnostics.dropped_count,
            detached_sub_strands: diagnostics.detached_sub_strands,
        }
    }
}

/// Serializable projection of a [`ParseResult`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseReport {
    /// `success` or `error`
    pub status: String,
    /// Number of accepted standards
    pub total_indicators: usize,
    /// Accepted standards
    pub standards: Vec<StandardRecord>,
    /// Unresolved fragments
    pub orphaned_elements: Vec<FragmentRecord>,
    /// Terminal condition, present only on error
    pub error: Option<String>,
    /// Input accounting
    pub diagnostics: DiagnosticsRecord,
}

impl From<&ParseResult> for ParseReport {
    fn from(result: &ParseResult) -> Self {
        Self {
            status: result.status.as_str().to_string(),
            total_indicators: result.standards.len(),
            standards: result.records(),
            orphaned_elements: result.orphaned_elements.iter().map(FragmentRecord::from).collect(),
            error: result.error.clone(),
            diagnostics: (&result.diagnostics).into(),
        }
    }
}
