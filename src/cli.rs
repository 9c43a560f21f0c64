use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::output::OutputFormat;

/// Color output control
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal capability
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Parser, Debug)]
#[command(name = "dry-guard")]
#[command(author, version, about = "Publish duplicate code analysis reports (CPD, Simian)")]
#[command(long_about = "Collects duplicate code reports of a build, prioritizes the \
    duplicated blocks and evaluates health and stability thresholds.\n\n\
    Exit codes:\n  \
    0 - Build is stable\n  \
    1 - Build is unstable or failed\n  \
    2 - Configuration or runtime error")]
pub struct Cli {
    /// Increase output verbosity (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorChoice,

    /// Skip loading configuration file
    #[arg(long, global = true)]
    pub no_config: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Collect and evaluate duplicate code reports of a workspace
    Check(CheckArgs),

    /// Combine JSON reports of the runs of a matrix build
    Aggregate(AggregateArgs),

    /// Generate a default configuration file
    Init(InitArgs),

    /// Configuration file utilities
    Config(ConfigArgs),
}

#[derive(Parser, Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct CheckArgs {
    /// Workspace root containing the report files
    #[arg(default_value = ".")]
    pub workspace: PathBuf,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Report file pattern, comma-separated (overrides config)
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// Minimum duplicated lines for high priority (overrides config)
    #[arg(long, allow_negative_numbers = true)]
    pub high: Option<i32>,

    /// Minimum duplicated lines for normal priority (overrides config)
    #[arg(long, allow_negative_numbers = true)]
    pub normal: Option<i32>,

    /// Treat the build as already failed
    #[arg(long)]
    pub build_failed: bool,

    /// Do not read or write the build history
    #[arg(long)]
    pub no_history: bool,

    /// Output format [possible values: text, json]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Only warn, don't fail on threshold violations
    #[arg(long)]
    pub warn_only: bool,
}

#[derive(Parser, Debug)]
pub struct AggregateArgs {
    /// JSON reports of the matrix runs (from `check --format json`)
    #[arg(required = true)]
    pub reports: Vec<PathBuf>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format [possible values: text, json]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long, default_value = ".dry-guard.toml")]
    pub output: PathBuf,

    /// Overwrite existing configuration
    #[arg(long)]
    pub force: bool,
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Rewrite a version 1 configuration file as version 2
    Migrate {
        /// Path to configuration file
        #[arg(short, long, default_value = ".dry-guard.toml")]
        config: PathBuf,

        /// Write the migrated file here instead of replacing the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Display the effective configuration
    Show {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
