//! Error types for the hierarchy parser

use thiserror::Error;

/// Conditions that end a parse without producing standards
///
/// The first four variants are the engine's terminal conditions. They are
/// reported inside a [`ParseResult`](crate::ParseResult), never returned as
/// `Err` from [`HierarchyParser::parse`](crate::HierarchyParser::parse).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Every fragment was flagged for review (or none were supplied)
    #[error("No valid elements to parse (all flagged for review)")]
    NoUsableInput,

    /// No fragment resolved to the domain tier
    #[error("No domain elements found")]
    NoDomainFound,

    /// No fragment resolved to the indicator tier
    #[error("No indicator elements found")]
    NoIndicatorFound,

    /// Unexpected internal fault
    #[error("Parsing failed: {0}")]
    ParsingFailed(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),
}

impl ParseError {
    /// Whether this is one of the engine's terminal conditions
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ParseError::NoUsableInput
                | ParseError::NoDomainFound
                | ParseError::NoIndicatorFound
                | ParseError::ParsingFailed(_)
        )
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(e: serde_json::Error) -> Self {
        ParseError::JsonParse(e.to_string())
    }
}
