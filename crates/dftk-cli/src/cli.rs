//! CLI argument definitions for `dftk`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "dftk",
    version,
    about = "DataFax toolkit - inspect study setup, maps and centers",
    long_about = "Inspect a DataFax study directory.\n\n\
                  Reads the study setup and lookup tables from <STUDY_DIR>/lib and\n\
                  prints plates, fields, visit schedules and center assignments."
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
    /// Summarize what was loaded from a study directory.
    Summary(StudyArgs),

    /// List the study's plates.
    Plates(StudyArgs),

    /// List the fields on one plate.
    Fields(FieldsArgs),

    /// Show a visit's label and plates.
    Visit(VisitArgs),

    /// Show the center responsible for a patient.
    Center(CenterArgs),

    /// Print the SQL predicate for a range list.
    Sql(SqlArgs),

    /// List the QC and reason status codes.
    Codes,
}

#[derive(Args)]
pub struct StudyArgs {
    /// Study directory containing `lib/DFsetup` and the lookup tables.
    #[arg(value_name = "STUDY_DIR")]
    pub study_dir: PathBuf,
}

#[derive(Args)]
pub struct FieldsArgs {
    #[command(flatten)]
    pub study: StudyArgs,

    /// Plate number.
    #[arg(long = "plate", value_name = "N")]
    pub plate: i64,

    /// Print fields as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct VisitArgs {
    #[command(flatten)]
    pub study: StudyArgs,

    /// Visit number.
    #[arg(value_name = "VISIT")]
    pub visit: i64,
}

#[derive(Args)]
pub struct CenterArgs {
    #[command(flatten)]
    pub study: StudyArgs,

    /// Patient id.
    #[arg(value_name = "PID")]
    pub pid: i64,
}

#[derive(Args)]
pub struct SqlArgs {
    /// Column name used in the predicate.
    #[arg(value_name = "COLUMN")]
    pub column: String,

    /// Range list, for example `1-3,5` or `*`.
    #[arg(value_name = "RANGES")]
    pub ranges: String,

    /// Lower bound that `*` expands to.
    #[arg(long = "min", default_value_t = 0, allow_negative_numbers = true)]
    pub min: i64,

    /// Upper bound that `*` expands to.
    #[arg(long = "max", default_value_t = 65535, allow_negative_numbers = true)]
    pub max: i64,
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
