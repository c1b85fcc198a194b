//! Classifier output files as a fragment source.

use anyhow::Context;
use els_domain::{ClassifiedFragment, FragmentSource};
use els_parser::{fragments_from_json, ParserConfig};
use std::fs;
use std::path::{Path, PathBuf};

/// A classifier output JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    config: ParserConfig,
}

impl JsonFileSource {
    /// Create a source for `path`, loading with `config`'s review gate.
    pub fn new(path: impl Into<PathBuf>, config: ParserConfig) -> Self {
        Self {
            path: path.into(),
            config,
        }
    }

    /// Path of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FragmentSource for JsonFileSource {
    type Error = anyhow::Error;

    fn load_fragments(&self) -> Result<Vec<ClassifiedFragment>, Self::Error> {
        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        fragments_from_json(&json, &self.config)
            .with_context(|| format!("Failed to load fragments from {}", self.path.display()))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_error_names_path() {
        let source = JsonFileSource::new("/nonexistent/doc.json", ParserConfig::default());
        let err = source.load_fragments().unwrap_err();
        assert!(err.to_string().contains("/nonexistent/doc.json"));
    }

    #[test]
    fn test_loads_bare_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"level": "domain", "code": "A", "title": "A", "description": "",
                 "confidence": 0.9, "source_page": 1, "source_text": "A"}}]"#
        )
        .unwrap();

        let source = JsonFileSource::new(file.path(), ParserConfig::default());
        let fragments = source.load_fragments().unwrap();
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].code, "A");
    }
}
