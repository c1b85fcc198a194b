//! Normalized standard module - the output record of hierarchy normalization

use crate::fragment::ClassifiedFragment;
use crate::identifier::StandardId;

/// A single level of a standard's hierarchy path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyLevel {
    /// Code as printed in the document
    pub code: String,

    /// Display name (the fragment title)
    pub name: String,

    /// Body text, carried only for the indicator level
    pub description: Option<String>,
}

impl HierarchyLevel {
    /// Build an ancestor level (domain, strand, sub-strand) from a fragment
    pub fn ancestor(fragment: &ClassifiedFragment) -> Self {
        Self {
            code: fragment.code.clone(),
            name: fragment.title.clone(),
            description: None,
        }
    }

    /// Build the indicator level from a fragment
    pub fn indicator(fragment: &ClassifiedFragment) -> Self {
        Self {
            code: fragment.code.clone(),
            name: fragment.title.clone(),
            description: Some(fragment.description.clone()),
        }
    }
}

/// Jurisdiction a standards document belongs to
///
/// Codes are passed through as supplied; their format is checked downstream.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Jurisdiction {
    /// Country code (ISO 3166-1 alpha-2 by convention)
    pub country: String,

    /// Region or state code
    pub region: String,
}

impl Jurisdiction {
    /// Create a new jurisdiction
    pub fn new(country: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            region: region.into(),
        }
    }
}

/// A fully normalized standard
///
/// Construction enforces the canonical closure invariants: a domain is
/// always present, and a sub-strand is never present without a strand.
/// The identifier is derived from the record's own fields.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedStandard {
    standard_id: StandardId,
    jurisdiction: Jurisdiction,
    version_year: i32,
    domain: HierarchyLevel,
    strand: Option<HierarchyLevel>,
    sub_strand: Option<HierarchyLevel>,
    indicator: HierarchyLevel,
    source_page: u32,
    source_text: String,
}

impl NormalizedStandard {
    /// Create a new standard
    ///
    /// # Errors
    /// Returns error if a sub-strand is given without a strand, or if the
    /// source page is 0
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        jurisdiction: Jurisdiction,
        version_year: i32,
        domain: HierarchyLevel,
        strand: Option<HierarchyLevel>,
        sub_strand: Option<HierarchyLevel>,
        indicator: HierarchyLevel,
        source_page: u32,
        source_text: String,
    ) -> Result<Self, String> {
        if sub_strand.is_some() && strand.is_none() {
            return Err(format!(
                "indicator '{}' has a sub-strand but no strand",
                indicator.code
            ));
        }
        if source_page == 0 {
            return Err(format!("indicator '{}' has source_page 0", indicator.code));
        }

        let standard_id = StandardId::generate(
            &jurisdiction.country,
            &jurisdiction.region,
            version_year,
            &domain.code,
            &indicator.code,
        );

        Ok(Self {
            standard_id,
            jurisdiction,
            version_year,
            domain,
            strand,
            sub_strand,
            indicator,
            source_page,
            source_text,
        })
    }

    /// Deterministic identifier
    pub fn standard_id(&self) -> &StandardId {
        &self.standard_id
    }

    /// Jurisdiction the standard belongs to
    pub fn jurisdiction(&self) -> &Jurisdiction {
        &self.jurisdiction
    }

    /// Version year of the source document
    pub fn version_year(&self) -> i32 {
        self.version_year
    }

    /// Enclosing domain
    pub fn domain(&self) -> &HierarchyLevel {
        &self.domain
    }

    /// Enclosing strand, if the source hierarchy had one
    pub fn strand(&self) -> Option<&HierarchyLevel> {
        self.strand.as_ref()
    }

    /// Enclosing sub-strand, if the source hierarchy had one
    pub fn sub_strand(&self) -> Option<&HierarchyLevel> {
        self.sub_strand.as_ref()
    }

    /// The indicator itself
    pub fn indicator(&self) -> &HierarchyLevel {
        &self.indicator
    }

    /// Page the indicator was read from
    pub fn source_page(&self) -> u32 {
        self.source_page
    }

    /// Verbatim excerpt of the indicator
    pub fn source_text(&self) -> &str {
        &self.source_text
    }
}
