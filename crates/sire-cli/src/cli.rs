//! CLI argument definitions for the SIRE converter.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use sire_model::DEFAULT_REPORT_CITY;

#[derive(Parser)]
#[command(
    name = "sire",
    version,
    about = "SIRE Studio - Convert hotel police reports to SIRE submission files",
    long_about = "Convert hotel police-report exports to the SIRE submission format.\n\n\
                  Reads CSV, TSV and delimited TXT exports, detects which column holds\n\
                  which guest field, and writes the thirteen-field tab-delimited file\n\
                  that Migración Colombia accepts."
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

    /// Allow guest names and document numbers in log output.
    ///
    /// Off by default: row-level values are replaced with a redaction
    /// token so log files can be shared without exposing guests.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert a police-report export into a SIRE submission file.
    Convert(ConvertArgs),

    /// Resolve a raw token against the reference tables.
    Lookup(LookupArgs),

    /// List the semantic fields and the header spellings that map to them.
    Fields,
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Path to the police-report export (.csv, .tsv, .tab or .txt).
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: PathBuf,

    /// SCH establishment code assigned by Migración Colombia.
    #[arg(short = 'e', long = "establishment", value_name = "CODE")]
    pub establishment: String,

    /// City code of the reporting establishment.
    #[arg(long = "city", value_name = "CODE", default_value = DEFAULT_REPORT_CITY)]
    pub city: String,

    /// Direction the batch reports (entry = check-ins, exit = check-outs).
    #[arg(long = "movement", value_enum, default_value = "entry")]
    pub movement: MovementArg,

    /// Output directory (default: alongside the input file).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Also write a conversion report in the given format.
    #[arg(long = "report", value_enum, value_name = "FORMAT")]
    pub report: Option<ReportArg>,

    /// Drop rows whose nationality resolves to Colombia.
    ///
    /// SIRE takes no reports on Colombian nationals; with this flag the
    /// converter leaves those rows out instead of emitting them.
    #[arg(long = "exclude-colombian-nationals")]
    pub exclude_colombian_nationals: bool,

    /// Classify and convert without writing any files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct LookupArgs {
    /// Raw value to resolve, spelled as it appears in the report.
    #[arg(value_name = "TOKEN")]
    pub token: String,

    /// Restrict the lookup to one table (default: all three).
    #[arg(long = "table", value_enum)]
    pub table: Option<TableArg>,
}

/// CLI movement direction choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum MovementArg {
    Entry,
    Exit,
}

/// CLI report format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum ReportArg {
    Text,
    Json,
}

/// CLI reference table choices.
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TableArg {
    Countries,
    Cities,
    DocumentTypes,
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
