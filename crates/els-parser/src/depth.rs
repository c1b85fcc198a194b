//! Depth detection over review-filtered fragments

use crate::error::ParseError;
use els_domain::ClassifiedFragment;
use std::collections::HashSet;

/// Fragments that passed the review gate, with the depth they exhibit
#[derive(Debug, Clone)]
pub struct DepthDetection {
    /// Fragments with `needs_review == false`, in document order
    pub usable: Vec<ClassifiedFragment>,

    /// Number of fragments discarded by the review gate
    pub review_flagged: usize,

    /// Number of distinct raw level labels among `usable`
    pub depth: usize,
}

/// Filter out review-flagged fragments and count the distinct labels left
///
/// Only labels are considered; codes and their structure are ignored.
///
/// # Errors
/// Returns [`ParseError::NoUsableInput`] when no fragment passes the gate.
pub fn detect_depth(fragments: &[ClassifiedFragment]) -> Result<DepthDetection, ParseError> {
    let usable: Vec<ClassifiedFragment> = fragments
        .iter()
        .filter(|fragment| !fragment.needs_review)
        .cloned()
        .collect();

    if usable.is_empty() {
        return Err(ParseError::NoUsableInput);
    }

    let depth = distinct_levels(&usable);

    Ok(DepthDetection {
        review_flagged: fragments.len() - usable.len(),
        usable,
        depth,
    })
}

/// Count distinct raw level labels
pub fn distinct_levels(fragments: &[ClassifiedFragment]) -> usize {
    fragments
        .iter()
        .map(|fragment| fragment.raw_level.as_str())
        .collect::<HashSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(level: &str, code: &str, needs_review: bool) -> ClassifiedFragment {
        let confidence = if needs_review { 0.4 } else { 0.9 };
        ClassifiedFragment::new(level, code, code, "", confidence, 1, code, needs_review)
    }

    #[test]
    fn test_depth_counts_distinct_labels() {
        let fragments = vec![
            fragment("domain", "A", false),
            fragment("strand", "A.1", false),
            fragment("indicator", "A.1.1", false),
            fragment("indicator", "A.1.2", false),
            fragment("domain", "B", false),
        ];

        let detection = detect_depth(&fragments).unwrap();
        assert_eq!(detection.depth, 3);
        assert_eq!(detection.usable.len(), 5);
        assert_eq!(detection.review_flagged, 0);
    }

    #[test]
    fn test_review_flagged_labels_do_not_count() {
        let fragments = vec![
            fragment("domain", "A", false),
            fragment("strand", "A.1", true),
            fragment("indicator", "A.1.1", false),
        ];

        let detection = detect_depth(&fragments).unwrap();
        assert_eq!(detection.depth, 2);
        assert_eq!(detection.review_flagged, 1);
        assert!(detection.usable.iter().all(|f| f.code != "A.1"));
    }

    #[test]
    fn test_all_flagged_is_no_usable_input() {
        let fragments = vec![fragment("domain", "A", true), fragment("indicator", "A.1", true)];
        assert_eq!(detect_depth(&fragments).unwrap_err(), ParseError::NoUsableInput);
    }

    #[test]
    fn test_empty_input_is_no_usable_input() {
        assert_eq!(detect_depth(&[]).unwrap_err(), ParseError::NoUsableInput);
    }

    #[test]
    fn test_codes_are_ignored() {
        let fragments = vec![
            fragment("x", "1", false),
            fragment("x", "1.2.3.4.5", false),
        ];
        assert_eq!(detect_depth(&fragments).unwrap().depth, 1);
    }
}
