//! Tier module - the canonical four-level taxonomy

/// Canonical tier of the standards hierarchy
///
/// Every normalized record conforms to this taxonomy regardless of how many
/// levels the source document actually used. Tiers are totally ordered from
/// coarsest to finest:
/// - Domain: Top-level area of development
/// - Strand: Grouping within a domain
/// - SubStrand: Grouping within a strand
/// - Indicator: The leaf statement a standard is built around
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CanonicalTier {
    /// Coarsest tier, required on every standard
    Domain,

    /// Optional grouping under a domain
    Strand,

    /// Optional grouping under a strand
    SubStrand,

    /// Leaf tier
    Indicator,
}

impl CanonicalTier {
    /// All tiers, coarsest first
    pub const ALL: [CanonicalTier; 4] = [
        CanonicalTier::Domain,
        CanonicalTier::Strand,
        CanonicalTier::SubStrand,
        CanonicalTier::Indicator,
    ];

    /// Get the tier name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalTier::Domain => "domain",
            CanonicalTier::Strand => "strand",
            CanonicalTier::SubStrand => "sub_strand",
            CanonicalTier::Indicator => "indicator",
        }
    }

    /// Parse a tier from a label, ignoring case and separator style
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "domain" => Some(CanonicalTier::Domain),
            "strand" => Some(CanonicalTier::Strand),
            "sub_strand" | "substrand" | "sub-strand" | "sub strand" => {
                Some(CanonicalTier::SubStrand)
            }
            "indicator" => Some(CanonicalTier::Indicator),
            _ => None,
        }
    }

    /// Get the enclosing tier
    pub fn parent(&self) -> Option<Self> {
        match self {
            CanonicalTier::Domain => None,
            CanonicalTier::Strand => Some(CanonicalTier::Domain),
            CanonicalTier::SubStrand => Some(CanonicalTier::Strand),
            CanonicalTier::Indicator => Some(CanonicalTier::SubStrand),
        }
    }

    /// Get the next finer tier
    pub fn child(&self) -> Option<Self> {
        match self {
            CanonicalTier::Domain => Some(CanonicalTier::Strand),
            CanonicalTier::Strand => Some(CanonicalTier::SubStrand),
            CanonicalTier::SubStrand => Some(CanonicalTier::Indicator),
            CanonicalTier::Indicator => None,
        }
    }

    /// Whether standards are built around fragments of this tier
    pub fn is_leaf(&self) -> bool {
        matches!(self, CanonicalTier::Indicator)
    }
}

impl std::fmt::Display for CanonicalTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CanonicalTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid canonical tier: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ordering() {
        assert!(CanonicalTier::Domain < CanonicalTier::Strand);
        assert!(CanonicalTier::Strand < CanonicalTier::SubStrand);
        assert!(CanonicalTier::SubStrand < CanonicalTier::Indicator);
    }

    #[test]
    fn test_tier_navigation() {
        assert_eq!(CanonicalTier::Domain.child(), Some(CanonicalTier::Strand));
        assert_eq!(CanonicalTier::Indicator.child(), None);
        assert_eq!(CanonicalTier::Domain.parent(), None);
        assert_eq!(CanonicalTier::SubStrand.parent(), Some(CanonicalTier::Strand));
    }

    #[test]
    fn test_parse_variants() {
        assert_eq!(CanonicalTier::parse("Domain"), Some(CanonicalTier::Domain));
        assert_eq!(CanonicalTier::parse("sub-strand"), Some(CanonicalTier::SubStrand));
        assert_eq!(CanonicalTier::parse(" SUBSTRAND "), Some(CanonicalTier::SubStrand));
        assert_eq!(CanonicalTier::parse("chapter"), None);
        assert!("objective".parse::<CanonicalTier>().is_err());
    }

    #[test]
    fn test_as_str_round_trip() {
        for tier in CanonicalTier::ALL {
            assert_eq!(CanonicalTier::parse(tier.as_str()), Some(tier));
        }
    }
}
