//! End-to-end tests for the els command layer

use els_cli::cli::{ConfigAction, ConfigArgs, InspectArgs, ParseArgs, StrategyArg};
use els_cli::commands::{self, parse::parse_files};
use els_cli::config::OutputFormat;
use els_cli::{CliError, Config, Formatter};
use els_parser::{ParseReport, ParseStatus};
use std::fs;
use std::path::{Path, PathBuf};

const CALIFORNIA: &str = r#"{
    "elements": [
        {"level": "domain", "code": "LLD", "title": "Language and Literacy",
         "description": "Language domain", "confidence": 0.95,
         "source_page": 1, "source_text": "LLD"},
        {"level": "strand", "code": "LLD.A", "title": "Listening and Speaking",
         "description": "", "confidence": 0.9,
         "source_page": 1, "source_text": "LLD.A"},
        {"level": "indicator", "code": "LLD.A.1", "title": "Comprehension",
         "description": "Child understands spoken language", "confidence": 0.9,
         "source_page": 2, "source_text": "LLD.A.1 Comprehension"},
        {"level": "indicator", "code": "LLD.A.2", "title": "Unclear",
         "description": "Low confidence", "confidence": 0.4,
         "source_page": 2, "source_text": "LLD.A.2"}
    ]
}"#;

const ORPHAN_ONLY: &str = r#"[
    {"level": "indicator", "code": "ORPHAN.1", "title": "x", "description": "",
     "confidence": 0.9, "source_page": 1, "source_text": "x"}
]"#;

fn write_doc(dir: &Path, name: &str, json: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, json).unwrap();
    path
}

fn parse_args(files: Vec<PathBuf>) -> ParseArgs {
    ParseArgs {
        files,
        country: "US".to_string(),
        region: "CA".to_string(),
        year: 2021,
        threshold: None,
        strategy: None,
        output: None,
    }
}

fn quiet() -> Formatter {
    Formatter::new(OutputFormat::Quiet, false)
}

#[tokio::test]
async fn test_parse_files_preserves_input_order() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_doc(dir.path(), "ca.json", CALIFORNIA);
    let second = write_doc(dir.path(), "orphan.json", ORPHAN_ONLY);

    let documents = parse_files(&parse_args(vec![first.clone(), second.clone()]), &Config::default())
        .await
        .unwrap();

    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0].0, first);
    assert_eq!(documents[1].0, second);

    let california = &documents[0].1;
    assert_eq!(california.status, ParseStatus::Success);
    assert_eq!(california.standards.len(), 1);
    assert_eq!(
        california.standards[0].standard_id().as_str(),
        "US-CA-2021-LLD-LLD.A.1"
    );
    assert_eq!(california.standards[0].strand().unwrap().code, "LLD.A");
    assert_eq!(california.diagnostics.review_flagged, 1);

    assert_eq!(documents[1].1.status, ParseStatus::Error);
}

#[tokio::test]
async fn test_lower_threshold_admits_uncertain_fragments() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_doc(dir.path(), "ca.json", CALIFORNIA);

    let mut args = parse_args(vec![path]);
    args.threshold = Some(0.3);
    let documents = parse_files(&args, &Config::default()).await.unwrap();

    assert_eq!(documents[0].1.standards.len(), 2);
}

#[tokio::test]
async fn test_execute_parse_writes_reports() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_doc(dir.path(), "ca_2021.json", CALIFORNIA);
    let out = dir.path().join("reports");

    let mut args = parse_args(vec![input]);
    args.output = Some(out.clone());
    args.strategy = Some(StrategyArg::LabelAware);

    commands::execute_parse(args, &Config::default(), &quiet())
        .await
        .unwrap();

    let written = fs::read_to_string(out.join("ca_2021.standards.json")).unwrap();
    let report: ParseReport = serde_json::from_str(&written).unwrap();
    assert_eq!(report.status, "success");
    assert_eq!(report.total_indicators, 1);
    assert_eq!(report.diagnostics.mapper, "label_aware");
    assert_eq!(report.standards[0].indicator.description.as_deref(), Some("Child understands spoken language"));
}

#[tokio::test]
async fn test_shared_stem_outputs_are_rejected_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("ca")).unwrap();
    fs::create_dir_all(dir.path().join("tx")).unwrap();
    let california = write_doc(&dir.path().join("ca"), "standards.json", CALIFORNIA);
    let texas = write_doc(
        &dir.path().join("tx"),
        "standards.json",
        &CALIFORNIA.replace("LLD", "TXD"),
    );
    let out = dir.path().join("reports");

    let mut args = parse_args(vec![california, texas]);
    args.output = Some(out.clone());

    let result = commands::execute_parse(args, &Config::default(), &quiet()).await;
    match result {
        Err(CliError::InvalidInput(message)) => assert!(message.contains("standards.standards.json")),
        other => panic!("Expected invalid input, got {:?}", other),
    }
    assert!(!out.join("standards.standards.json").exists());
}

#[tokio::test]
async fn test_failed_document_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_doc(dir.path(), "ca.json", CALIFORNIA);
    let bad = write_doc(dir.path(), "orphan.json", ORPHAN_ONLY);

    let result = commands::execute_parse(parse_args(vec![good, bad]), &Config::default(), &quiet()).await;
    assert!(matches!(result, Err(CliError::DocumentsFailed(1))));
}

#[tokio::test]
async fn test_unreadable_file_is_source_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");

    let result = parse_files(&parse_args(vec![missing]), &Config::default()).await;
    match result {
        Err(CliError::Source(e)) => assert!(e.to_string().contains("missing.json")),
        other => panic!("Expected source error, got {:?}", other.map(|d| d.len())),
    }
}

#[tokio::test]
async fn test_invalid_threshold_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_doc(dir.path(), "ca.json", CALIFORNIA);

    let mut args = parse_args(vec![path]);
    args.threshold = Some(2.0);
    let result = parse_files(&args, &Config::default()).await;
    assert!(matches!(result, Err(CliError::InvalidInput(_))));
}

#[tokio::test]
async fn test_inspect_all_flagged_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_doc(dir.path(), "ca.json", CALIFORNIA);

    let args = InspectArgs {
        file: path,
        threshold: Some(1.0),
        strategy: None,
    };
    let result = commands::execute_inspect(args, &Config::default(), &quiet()).await;
    assert!(matches!(
        result,
        Err(CliError::Parse(els_parser::ParseError::NoUsableInput))
    ));
}

#[tokio::test]
async fn test_config_init_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("els").join("config.toml");
    let config = Config::default();

    let args = ConfigArgs {
        action: ConfigAction::Init { force: false },
    };
    commands::execute_config(args, &config, &path, &quiet())
        .await
        .unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.parser.confidence_threshold, 0.7);
    assert_eq!(loaded.settings.format, OutputFormat::Table);
}

#[test]
fn test_config_file_with_bad_threshold_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[parser]\nconfidence_threshold = 3.0\n").unwrap();

    assert!(matches!(Config::load_from(&path), Err(CliError::Config(_))));
}
