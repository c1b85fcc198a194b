//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use els_domain::HierarchyLevel;
use els_parser::{DiagnosticsRecord, ParseDiagnostics, ParseReport, ParseResult};
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// One normalized document, labelled with where it came from.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    /// Source description (file path)
    pub source: String,

    /// Parse report
    #[serde(flatten)]
    pub report: ParseReport,
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format parse results, one entry per document.
    pub fn format_documents(&self, documents: &[(String, ParseResult)]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_documents_json(documents),
            OutputFormat::Table => Ok(self.format_documents_table(documents)),
            OutputFormat::Quiet => Ok(self.format_documents_quiet(documents)),
        }
    }

    fn format_documents_json(&self, documents: &[(String, ParseResult)]) -> Result<String> {
        let reports: Vec<DocumentReport> = documents
            .iter()
            .map(|(source, result)| DocumentReport {
                source: source.clone(),
                report: result.to_report(),
            })
            .collect();

        Ok(serde_json::to_string_pretty(&reports)?)
    }

    fn format_documents_table(&self, documents: &[(String, ParseResult)]) -> String {
        documents
            .iter()
            .map(|(source, result)| self.format_document_table(source, result))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn format_document_table(&self, source: &str, result: &ParseResult) -> String {
        let mut out = self.colorize(source, "cyan");
        out.push('\n');

        if let Some(error) = &result.error {
            out.push_str(&self.error(error));
            out.push('\n');
            out.push_str(&format!(
                "{} fragment(s) returned as orphaned",
                result.orphaned_elements.len()
            ));
            return out;
        }

        if result.standards.is_empty() {
            out.push_str(&self.colorize("No standards found.", "yellow"));
        } else {
            let mut builder = Builder::default();
            builder.push_record(["Standard ID", "Domain", "Strand", "Sub-strand", "Indicator", "Page"]);

            for standard in &result.standards {
                builder.push_record([
                    standard.standard_id().to_string(),
                    standard.domain().code.clone(),
                    level_code(standard.strand()),
                    level_code(standard.sub_strand()),
                    standard.indicator().name.clone(),
                    standard.source_page().to_string(),
                ]);
            }

            let mut table = builder.build();
            table
                .with(Style::rounded())
                .with(Modify::new(Rows::first()).with(Alignment::center()));
            out.push_str(&table.to_string());
        }

        out.push('\n');
        out.push_str(&self.success(&format!(
            "{} standard(s), {} orphaned, {} flagged for review",
            result.standards.len(),
            result.orphaned_elements.len(),
            result.diagnostics.review_flagged
        )));

        if result.diagnostics.dropped_count > 0 {
            out.push('\n');
            out.push_str(&self.warning(&format!(
                "{} fragment(s) dropped: label resolves to no canonical tier",
                result.diagnostics.dropped_count
            )));
        }
        if result.diagnostics.detached_sub_strands > 0 {
            out.push('\n');
            out.push_str(&self.warning(&format!(
                "{} sub-strand(s) appeared without an enclosing strand",
                result.diagnostics.detached_sub_strands
            )));
        }

        out
    }

    fn format_documents_quiet(&self, documents: &[(String, ParseResult)]) -> String {
        documents
            .iter()
            .flat_map(|(_, result)| result.standards.iter())
            .map(|standard| standard.standard_id().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format the depth and mapping of one document.
    pub fn format_diagnostics(&self, source: &str, diagnostics: &ParseDiagnostics) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let record = DiagnosticsRecord::from(diagnostics);
                Ok(serde_json::to_string_pretty(&record)?)
            }
            OutputFormat::Quiet => Ok(diagnostics.depth.to_string()),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Label", "Tier"]);
                for (label, tier) in diagnostics.mapping.entries() {
                    let tier = tier
                        .map(|t| t.to_string())
                        .unwrap_or_else(|| self.colorize("(dropped)", "yellow"));
                    builder.push_record([label.clone(), tier]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));

                Ok(format!(
                    "{}\n{}\nFragments: {} ({} flagged for review)\nDepth: {}\nStrategy: {}",
                    self.colorize(source, "cyan"),
                    table,
                    diagnostics.total_fragments,
                    diagnostics.review_flagged,
                    diagnostics.depth,
                    diagnostics.mapper
                ))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn level_code(level: Option<&HierarchyLevel>) -> String {
    level.map(|l| l.code.clone()).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use els_domain::{ClassifiedFragment, Jurisdiction};
    use els_parser::{HierarchyParser, ParseRequest};

    fn fragment(level: &str, code: &str) -> ClassifiedFragment {
        ClassifiedFragment::new(level, code, format!("{} title", code), "", 0.9, 1, code, false)
    }

    fn documents(fragments: Vec<ClassifiedFragment>) -> Vec<(String, ParseResult)> {
        let result = HierarchyParser::default_config().parse(ParseRequest::new(
            fragments,
            Jurisdiction::new("US", "CA"),
            2021,
        ));
        vec![("ca.json".to_string(), result)]
    }

    fn sample() -> Vec<(String, ParseResult)> {
        documents(vec![fragment("domain", "LLD"), fragment("indicator", "LLD.1")])
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_documents(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[0]["source"], "ca.json");
        assert_eq!(value[0]["status"], "success");
        assert_eq!(value[0]["standards"][0]["standard_id"], "US-CA-2021-LLD-LLD.1");
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_documents(&sample()).unwrap();
        assert_eq!(output, "US-CA-2021-LLD-LLD.1");
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_documents(&sample()).unwrap();
        assert!(output.contains("Standard ID"));
        assert!(output.contains("LLD.1 title"));
        assert!(output.contains("1 standard(s), 0 orphaned"));
    }

    #[test]
    fn test_table_reports_error() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter
            .format_documents(&documents(vec![fragment("domain", "LLD")]))
            .unwrap();
        assert!(output.contains("✗ No indicator elements found"));
        assert!(output.contains("1 fragment(s) returned as orphaned"));
    }

    #[test]
    fn test_diagnostics_table_marks_dropped_labels() {
        let parser = HierarchyParser::default_config();
        let diagnostics = parser
            .inspect(&[
                fragment("domain", "A"),
                fragment("strand", "A.1"),
                fragment("sub_strand", "A.1.a"),
                fragment("indicator", "A.1.a.i"),
                fragment("example", "E"),
            ])
            .unwrap();

        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_diagnostics("doc.json", &diagnostics).unwrap();
        assert!(output.contains("(dropped)"));
        assert!(output.contains("Depth: 5"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
    }
}
