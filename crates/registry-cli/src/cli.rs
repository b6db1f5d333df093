//! CLI argument definitions for the standards registry browser.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use registry_cli::render::{CELL_MAX_CHARS, SEARCH_RESULT_LIMIT};

#[derive(Parser)]
#[command(
    name = "standards-registry",
    version,
    about = "Browse, summarize and search a standards registry",
    long_about = "Browse a registry of standards described by registry.yaml.\n\n\
                  Data files may be YAML or JSON, in nested, flat or columnar layout.\n\
                  The registry is never modified."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Registry root directory (default: $STANDARDS_REGISTRY_DIR, then the current directory).
    #[arg(long = "registry", value_name = "DIR", global = true)]
    pub registry: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -vvv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Prefix log lines with timestamps.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Summarize every standard with its record count.
    Overview,

    /// List the standards in manifest order.
    List,

    /// Show metadata, statistics and a data preview for one standard.
    Show(ShowArgs),

    /// Print every record of a standard as a table.
    Table(TableArgs),

    /// Search the records of a standard (case-insensitive substring).
    Search(SearchArgs),
}

#[derive(Parser)]
pub struct ShowArgs {
    /// Standard id.
    #[arg(value_name = "ID")]
    pub id: String,
}

#[derive(Parser)]
pub struct TableArgs {
    /// Standard id.
    #[arg(value_name = "ID")]
    pub id: String,

    /// Do not truncate long cell values.
    #[arg(long = "full")]
    pub full: bool,

    /// Maximum characters per cell before truncation.
    #[arg(long = "max-width", value_name = "CHARS", default_value_t = CELL_MAX_CHARS)]
    pub max_width: usize,
}

#[derive(Parser)]
pub struct SearchArgs {
    /// Standard id.
    #[arg(value_name = "ID")]
    pub id: String,

    /// Text to look for in record values.
    #[arg(value_name = "QUERY", default_value = "")]
    pub query: String,

    /// Maximum number of results to display.
    #[arg(long = "limit", value_name = "N", default_value_t = SEARCH_RESULT_LIMIT)]
    pub limit: usize,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
