//! Parse command implementation.

use crate::cli::ParseArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::source::JsonFileSource;
use els_domain::{FragmentSource, Jurisdiction};
use els_parser::{HierarchyParser, ParseRequest, ParseResult};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Execute the parse command.
///
/// Every file is normalized independently on a blocking task. Results are
/// reported in the order the files were given.
pub async fn execute_parse(args: ParseArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let targets = match &args.output {
        Some(dir) => report_targets(dir, &args.files)?,
        None => Vec::new(),
    };

    let documents = parse_files(&args, config).await?;

    if let Some(dir) = &args.output {
        fs::create_dir_all(dir)?;
        for (target, (_, result)) in targets.iter().zip(&documents) {
            let json = serde_json::to_string_pretty(&result.to_report())?;
            fs::write(target, json)?;
            debug!("Wrote {}", target.display());
        }
    }

    let labelled: Vec<(String, ParseResult)> = documents
        .into_iter()
        .map(|(path, result)| (path.display().to_string(), result))
        .collect();
    println!("{}", formatter.format_documents(&labelled)?);

    let failed = labelled.iter().filter(|(_, r)| !r.is_success()).count();
    if failed > 0 {
        return Err(CliError::DocumentsFailed(failed));
    }
    Ok(())
}

/// Load and normalize every input file.
pub async fn parse_files(args: &ParseArgs, config: &Config) -> Result<Vec<(PathBuf, ParseResult)>> {
    let parser_config = config.effective_parser(args.threshold, args.strategy.map(Into::into))?;
    let parser = Arc::new(HierarchyParser::new(parser_config.clone())?);
    let jurisdiction = Jurisdiction::new(args.country.clone(), args.region.clone());

    info!(
        "Normalizing {} document(s) with {} mapping",
        args.files.len(),
        parser.mapper_name()
    );

    let handles: Vec<_> = args
        .files
        .iter()
        .map(|path| {
            let parser = Arc::clone(&parser);
            let source = JsonFileSource::new(path.clone(), parser_config.clone());
            let request_jurisdiction = jurisdiction.clone();
            let year = args.year;

            tokio::task::spawn_blocking(move || -> anyhow::Result<(PathBuf, ParseResult)> {
                let fragments = source.load_fragments()?;
                debug!("Loaded {} fragments from {}", fragments.len(), source.describe());
                let result = parser.parse(ParseRequest::new(fragments, request_jurisdiction, year));
                Ok((source.path().to_path_buf(), result))
            })
        })
        .collect();

    let mut documents = Vec::with_capacity(handles.len());
    for handle in handles {
        let document = handle.await.map_err(|e| CliError::Task(e.to_string()))??;
        documents.push(document);
    }
    Ok(documents)
}

/// `<dir>/<stem>.standards.json`
pub fn report_path(dir: &Path, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    dir.join(format!("{}.standards.json", stem))
}

/// Report paths for every input, one distinct file each
///
/// # Errors
/// Returns [`CliError::InvalidInput`] when two inputs share a file stem
pub fn report_targets(dir: &Path, inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut seen: HashMap<PathBuf, &Path> = HashMap::new();
    let mut targets = Vec::with_capacity(inputs.len());

    for input in inputs {
        let target = report_path(dir, input);
        if let Some(previous) = seen.insert(target.clone(), input.as_path()) {
            return Err(CliError::InvalidInput(format!(
                "{} and {} would both write {}",
                previous.display(),
                input.display(),
                target.display()
            )));
        }
        targets.push(target);
    }
    Ok(targets)
}
