//! CLI argument definitions for the data-quality pipeline.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "dq",
    version,
    about = "Data quality pipeline for e-commerce tables",
    long_about = "Clean raw e-commerce CSV extracts, resolve referential \
                  integrity across tables, and audit every dropped row.\n\n\
                  Cleaned tables, violation files, and a run report are \
                  written under the data root."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
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

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the full pipeline over a data root: clean, resolve, report.
    Run(RunArgs),

    /// Check one CSV's numeric columns against integer storage bounds.
    Validate(ValidateArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Data root containing a raw/ directory with one CSV per table.
    #[arg(value_name = "DATA_ROOT")]
    pub data_root: PathBuf,

    /// Also persist resolved tables as load-ready CSVs into this
    /// directory, parents before children.
    #[arg(long = "sink-dir", value_name = "DIR")]
    pub sink_dir: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// CSV file to validate.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Columns to check (repeatable). Defaults to auto-detecting
    /// numeric-looking columns.
    #[arg(long = "column", value_name = "NAME")]
    pub columns: Vec<String>,

    /// Lower storage bound (default: i64 minimum).
    #[arg(long = "min", value_name = "N")]
    pub min: Option<i64>,

    /// Upper storage bound (default: i64 maximum).
    #[arg(long = "max", value_name = "N")]
    pub max: Option<i64>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
