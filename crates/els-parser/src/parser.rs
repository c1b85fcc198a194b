//! Core HierarchyParser implementation

use crate::assembler::{assemble, AssemblyContext};
use crate::config::ParserConfig;
use crate::depth::{detect_depth, DepthDetection};
use crate::error::ParseError;
use crate::mapper::{mapper_for, tag_fragments, TaggedFragment};
use crate::records::fragments_from_json;
use crate::types::{ParseDiagnostics, ParseRequest, ParseResult};
use els_domain::{ClassifiedFragment, Jurisdiction, LevelMapper};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, info, warn};

/// The HierarchyParser turns classified fragments into normalized standards
///
/// One call processes one document to completion. The parser holds no
/// per-document state, so a single instance can serve independent documents
/// from several threads.
pub struct HierarchyParser {
    config: ParserConfig,
    mapper: Box<dyn LevelMapper + Send + Sync>,
}

impl HierarchyParser {
    /// Create a new parser
    ///
    /// # Errors
    /// Returns [`ParseError::Config`] if the configuration is invalid
    pub fn new(config: ParserConfig) -> Result<Self, ParseError> {
        config.validate().map_err(ParseError::Config)?;
        let mapper = mapper_for(config.mapping_strategy);
        Ok(Self { config, mapper })
    }

    /// Create a parser with default configuration
    pub fn default_config() -> Self {
        let config = ParserConfig::default();
        let mapper = mapper_for(config.mapping_strategy);
        Self { config, mapper }
    }

    /// Replace the mapping strategy
    pub fn with_mapper(mut self, mapper: impl LevelMapper + Send + Sync + 'static) -> Self {
        self.mapper = Box::new(mapper);
        self
    }

    /// Active configuration
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Name of the active mapping strategy
    pub fn mapper_name(&self) -> &'static str {
        self.mapper.name()
    }

    /// Normalize one document
    ///
    /// Terminal conditions are reported in the returned result. An
    /// unexpected fault, including a panic inside the mapping strategy,
    /// yields `ParsingFailed` with every input fragment returned as orphaned.
    ///
    /// The process panic hook still runs before the panic is captured, so
    /// the default hook prints the panic message to stderr. Install a quiet
    /// hook in the binary if that output is unwanted.
    pub fn parse(&self, request: ParseRequest) -> ParseResult {
        info!(
            "Starting hierarchy parse: {} fragments, jurisdiction {}-{}, year {}",
            request.fragments.len(),
            request.jurisdiction.country,
            request.jurisdiction.region,
            request.version_year
        );

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.parse_inner(&request)));

        let result = match outcome {
            Ok(result) => result,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!("Hierarchy parse aborted by internal fault: {}", message);
                let diagnostics = self.diagnostics_for(&request.fragments);
                ParseResult::failed(
                    ParseError::ParsingFailed(message),
                    request.fragments,
                    diagnostics,
                )
            }
        };

        match &result.error {
            None => info!(
                "Hierarchy parse complete: {} standards, {} orphaned, {} dropped",
                result.standards.len(),
                result.orphaned_elements.len(),
                result.diagnostics.dropped_count
            ),
            Some(error) => warn!(
                "Hierarchy parse failed: {} ({} fragments returned as orphaned)",
                error,
                result.orphaned_elements.len()
            ),
        }

        result
    }

    /// Load classifier output JSON and normalize it
    ///
    /// # Errors
    /// Returns [`ParseError::JsonParse`] if the JSON is not a classifier
    /// output document
    pub fn parse_json(
        &self,
        json: &str,
        jurisdiction: Jurisdiction,
        version_year: i32,
    ) -> Result<ParseResult, ParseError> {
        let fragments = fragments_from_json(json, &self.config)?;
        Ok(self.parse(ParseRequest::new(fragments, jurisdiction, version_year)))
    }

    /// Detect depth and resolve the mapping without assembling
    ///
    /// # Errors
    /// Returns [`ParseError::NoUsableInput`] when no fragment passes the gate
    pub fn inspect(&self, fragments: &[ClassifiedFragment]) -> Result<ParseDiagnostics, ParseError> {
        let detection = detect_depth(fragments)?;
        let mut diagnostics = self.diagnostics_for(fragments);
        self.resolve_into(&detection, &mut diagnostics);
        Ok(diagnostics)
    }

    fn parse_inner(&self, request: &ParseRequest) -> ParseResult {
        let mut diagnostics = self.diagnostics_for(&request.fragments);

        if let Err(e) = request.fragments.iter().try_for_each(ClassifiedFragment::validate) {
            return ParseResult::failed(
                ParseError::ParsingFailed(e),
                request.fragments.clone(),
                diagnostics,
            );
        }

        let detection = match detect_depth(&request.fragments) {
            Ok(detection) => detection,
            Err(e) => {
                diagnostics.review_flagged = request.fragments.len();
                return ParseResult::failed(e, request.fragments.clone(), diagnostics);
            }
        };

        let tagged = self.resolve_into(&detection, &mut diagnostics);

        let context = AssemblyContext {
            jurisdiction: &request.jurisdiction,
            version_year: request.version_year,
        };

        match assemble(tagged, &context) {
            Ok(assembly) => {
                diagnostics.detached_sub_strands = assembly.detached_sub_strands;
                ParseResult::success(assembly.accepted, assembly.orphaned, diagnostics)
            }
            Err(e @ ParseError::ParsingFailed(_)) => {
                ParseResult::failed(e, request.fragments.clone(), diagnostics)
            }
            Err(e) => ParseResult::failed(e, detection.usable, diagnostics),
        }
    }

    /// Resolve the mapping for detected fragments, recording it in diagnostics
    fn resolve_into(
        &self,
        detection: &DepthDetection,
        diagnostics: &mut ParseDiagnostics,
    ) -> Vec<TaggedFragment> {
        diagnostics.review_flagged = detection.review_flagged;
        diagnostics.depth = detection.depth;

        let mapping = self.mapper.resolve(&detection.usable, detection.depth);
        let (tagged, dropped) = tag_fragments(&detection.usable, &mapping);

        debug!(
            "Detected depth {} with {} mapping: {:?}",
            detection.depth,
            self.mapper.name(),
            mapping.entries()
        );
        if dropped > 0 {
            warn!(
                "{} fragments dropped: labels {:?} resolve to no canonical tier",
                dropped,
                mapping.unmapped().collect::<Vec<_>>()
            );
        }

        diagnostics.mapping = mapping;
        diagnostics.dropped_count = dropped;
        tagged
    }

    fn diagnostics_for(&self, fragments: &[ClassifiedFragment]) -> ParseDiagnostics {
        ParseDiagnostics {
            total_fragments: fragments.len(),
            mapper: self.mapper.name().to_string(),
            ..ParseDiagnostics::default()
        }
    }
}

impl Default for HierarchyParser {
    fn default() -> Self {
        Self::default_config()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown internal error".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MappingStrategy;
    use crate::types::ParseStatus;
    use els_domain::TierMapping;

    struct PanickingMapper;

    impl LevelMapper for PanickingMapper {
        fn resolve(&self, _fragments: &[ClassifiedFragment], _depth: usize) -> TierMapping {
            panic!("mapper exploded")
        }

        fn name(&self) -> &'static str {
            "panicking"
        }
    }

    fn fragment(level: &str, code: &str) -> ClassifiedFragment {
        ClassifiedFragment::new(level, code, code, "", 0.9, 1, code, false)
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = ParserConfig::default();
        config.confidence_threshold = -1.0;
        assert!(matches!(HierarchyParser::new(config), Err(ParseError::Config(_))));
    }

    #[test]
    fn test_default_config_matches_default_parser_config() {
        let parser = HierarchyParser::default_config();
        assert_eq!(parser.config().confidence_threshold, 0.7);
        assert_eq!(parser.config().mapping_strategy, MappingStrategy::FirstOccurrence);
        assert_eq!(parser.mapper_name(), "first_occurrence");
    }

    #[test]
    fn test_strategy_follows_config() {
        let mut config = ParserConfig::default();
        config.mapping_strategy = MappingStrategy::LabelAware;
        let parser = HierarchyParser::new(config).unwrap();
        assert_eq!(parser.mapper_name(), "label_aware");
    }

    #[test]
    fn test_panic_becomes_parsing_failed() {
        let parser = HierarchyParser::default_config().with_mapper(PanickingMapper);
        let fragments = vec![fragment("domain", "A"), fragment("indicator", "A.1")];

        let result = parser.parse(ParseRequest::new(
            fragments.clone(),
            Jurisdiction::new("US", "CA"),
            2021,
        ));

        assert_eq!(result.status, ParseStatus::Error);
        assert_eq!(
            result.failure,
            Some(ParseError::ParsingFailed("mapper exploded".to_string()))
        );
        assert_eq!(result.error.as_deref(), Some("Parsing failed: mapper exploded"));
        assert_eq!(result.orphaned_elements, fragments);
        assert!(result.standards.is_empty());
    }

    #[test]
    fn test_malformed_fragment_becomes_parsing_failed() {
        let parser = HierarchyParser::default_config();
        let mut bad = fragment("indicator", "A.1");
        bad.source_page = 0;
        let fragments = vec![fragment("domain", "A"), bad];

        let result = parser.parse(ParseRequest::new(
            fragments.clone(),
            Jurisdiction::new("US", "CA"),
            2021,
        ));

        assert!(matches!(result.failure, Some(ParseError::ParsingFailed(_))));
        assert_eq!(result.orphaned_elements, fragments);
    }

    #[test]
    fn test_inspect_reports_mapping() {
        let parser = HierarchyParser::default_config();
        let fragments = vec![
            fragment("domain", "A"),
            fragment("strand", "A.1"),
            fragment("indicator", "A.1.1"),
        ];

        let diagnostics = parser.inspect(&fragments).unwrap();
        assert_eq!(diagnostics.depth, 3);
        assert_eq!(diagnostics.mapping.len(), 3);
        assert_eq!(diagnostics.mapper, "first_occurrence");
    }

    #[test]
    fn test_panic_message_extraction() {
        let boxed: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(boxed.as_ref()), "owned");

        let boxed: Box<dyn Any + Send> = Box::new(42u8);
        assert_eq!(panic_message(boxed.as_ref()), "unknown internal error");
    }
}
