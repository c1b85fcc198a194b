//! Standard identifier module

use std::fmt;

/// Deterministic identifier of a normalized standard
///
/// Format: `{country}-{region}-{version_year}-{domain_code}-{indicator_code}`.
/// The same inputs always produce the same identifier. Uniqueness across a
/// result set is not guaranteed: two indicators sharing a domain code and an
/// indicator code under one jurisdiction and year collide.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StandardId(String);

impl StandardId {
    /// Generate the identifier for a standard
    ///
    /// # Examples
    ///
    /// ```
    /// use els_domain::StandardId;
    ///
    /// let id = StandardId::generate("US", "CA", 2021, "LLD", "LLD.1");
    /// assert_eq!(id.as_str(), "US-CA-2021-LLD-LLD.1");
    /// ```
    pub fn generate(
        country: &str,
        region: &str,
        version_year: i32,
        domain_code: &str,
        indicator_code: &str,
    ) -> Self {
        Self(format!(
            "{}-{}-{}-{}-{}",
            country, region, version_year, domain_code, indicator_code
        ))
    }

    /// Get the identifier as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the identifier, returning the inner string
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for StandardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StandardId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: generation is deterministic
        #[test]
        fn test_generate_is_deterministic(
            country in "[A-Z]{2}",
            region in "[A-Z]{2}",
            year in 2000i32..2031,
            domain in "[A-Za-z0-9.]{1,8}",
            indicator in "[A-Za-z0-9.]{1,12}",
        ) {
            let first = StandardId::generate(&country, &region, year, &domain, &indicator);
            let second = StandardId::generate(&country, &region, year, &domain, &indicator);
            prop_assert_eq!(&first, &second);
        }

        /// Property: output is the literal concatenation of the inputs
        #[test]
        fn test_generate_matches_literal_format(
            country in "[A-Z]{2}",
            region in "[A-Z]{2}",
            year in 2000i32..2031,
            domain in "[A-Za-z0-9.]{1,8}",
            indicator in "[A-Za-z0-9.]{1,12}",
        ) {
            let id = StandardId::generate(&country, &region, year, &domain, &indicator);
            let expected = format!("{}-{}-{}-{}-{}", country, region, year, domain, indicator);
            prop_assert_eq!(id.as_str(), expected.as_str());
        }
    }
}
