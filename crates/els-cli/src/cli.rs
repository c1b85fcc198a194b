//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use els_parser::MappingStrategy;
use std::path::PathBuf;

/// ELS CLI - Normalize classified early-learning standards documents.
#[derive(Debug, Parser)]
#[command(name = "els")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "ELS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (standard IDs only)
    Quiet,
}

/// Mapping strategy options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum StrategyArg {
    /// Rank labels by first appearance
    FirstOccurrence,
    /// Trust labels that name a canonical tier
    LabelAware,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Normalize classifier output files into standards
    Parse(ParseArgs),

    /// Show detected depth and label mapping without assembling
    Inspect(InspectArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the parse command.
#[derive(Debug, Parser)]
pub struct ParseArgs {
    /// Classifier output JSON files
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Country code (e.g. US)
    #[arg(long)]
    pub country: String,

    /// Region or state code (e.g. CA)
    #[arg(long, alias = "state")]
    pub region: String,

    /// Version year of the standards document
    #[arg(long)]
    pub year: i32,

    /// Review confidence threshold (0.0-1.0)
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Label mapping strategy
    #[arg(short, long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Directory for <stem>.standards.json reports
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the inspect command.
#[derive(Debug, Parser)]
pub struct InspectArgs {
    /// Classifier output JSON file
    pub file: PathBuf,

    /// Review confidence threshold (0.0-1.0)
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Label mapping strategy
    #[arg(short, long, value_enum)]
    pub strategy: Option<StrategyArg>,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<StrategyArg> for MappingStrategy {
    fn from(strategy: StrategyArg) -> Self {
        match strategy {
            StrategyArg::FirstOccurrence => MappingStrategy::FirstOccurrence,
            StrategyArg::LabelAware => MappingStrategy::LabelAware,
        }
    }
}
