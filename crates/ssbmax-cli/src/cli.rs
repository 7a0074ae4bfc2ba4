//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use ssbmax_domain::EntryType;
use std::path::PathBuf;

/// SSBMax CLI - Score and aggregate Officer-Like-Qualities assessments.
#[derive(Debug, Parser)]
#[command(name = "ssbmax")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path (defaults to ~/.ssbmax/config.toml)
    #[arg(short, long, global = true, env = "SSBMAX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (headline value only)
    Quiet,
}

/// Entry scheme options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum EntryArg {
    /// National Defence Academy
    Nda,
    /// Officers Training Academy
    Ota,
    /// Graduate entries (CDS, TGC)
    Graduate,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show a candidate's aggregated OLQ dashboard
    Dashboard(DashboardArgs),

    /// Validate a score sheet against the SSB selection rules
    Validate(ValidateArgs),

    /// Print the OLQ catalogue and limitation rules
    Rules(RulesArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the dashboard command.
#[derive(Debug, Parser)]
pub struct DashboardArgs {
    /// Candidate user ID
    pub user: String,

    /// JSON snapshot of test results
    #[arg(short, long)]
    pub snapshot: PathBuf,

    /// Number of qualities in the top and improvement lists
    #[arg(short, long)]
    pub top: Option<usize>,
}

/// Arguments for the validate command.
#[derive(Debug, Parser)]
pub struct ValidateArgs {
    /// JSON score sheet
    #[arg(long)]
    pub file: PathBuf,

    /// Entry scheme (defaults to the configured entry type)
    #[arg(short, long, value_enum)]
    pub entry: Option<EntryArg>,

    /// Treat a Factor II average at the caution level as doubtful
    #[arg(long, conflicts_with = "permissive")]
    pub strict: bool,

    /// Skip per-factor consistency checks
    #[arg(long)]
    pub permissive: bool,
}

/// Arguments for the rules command.
#[derive(Debug, Parser)]
pub struct RulesArgs {
    /// Only list critical qualities
    #[arg(long)]
    pub critical: bool,
}

/// Arguments for the config command.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    /// Config action
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Write a default configuration file
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

impl From<EntryArg> for EntryType {
    fn from(entry: EntryArg) -> Self {
        match entry {
            EntryArg::Nda => EntryType::Nda,
            EntryArg::Ota => EntryType::Ota,
            EntryArg::Graduate => EntryType::Graduate,
        }
    }
}
