//! Inspect command implementation.

use crate::cli::InspectArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::source::JsonFileSource;
use els_domain::FragmentSource;
use els_parser::HierarchyParser;

/// Execute the inspect command.
pub async fn execute_inspect(args: InspectArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let parser_config = config.effective_parser(args.threshold, args.strategy.map(Into::into))?;
    let parser = HierarchyParser::new(parser_config.clone())?;
    let source = JsonFileSource::new(args.file, parser_config);

    let fragments = source.load_fragments()?;
    let diagnostics = parser.inspect(&fragments)?;

    println!("{}", formatter.format_diagnostics(&source.describe(), &diagnostics)?);
    Ok(())
}
