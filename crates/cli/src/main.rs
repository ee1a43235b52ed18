// sheetrecon CLI - reconcile spreadsheet rows across XLSX workbooks

mod compare;
mod exit_codes;
mod inputs;
mod missing;
mod recon;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use sheetrecon_io::{ReadError, WriteError};
use sheetrecon_recon::ReconError;

use exit_codes::{
    read_exit_code, recon_exit_code, write_exit_code, EXIT_ERROR, EXIT_INPUT_NOT_FOUND,
    EXIT_SUCCESS, EXIT_USAGE,
};

#[derive(Parser)]
#[command(name = "sheetrecon")]
#[command(about = "Reconcile spreadsheet rows across XLSX workbooks")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// Log debug diagnostics (load timings, row counts) to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Account for every source row against a primary, then a reference workbook
    #[command(after_help = "\
Rows are matched on their whole content: every cell, trimmed, in column order.
A source row found in the primary counts as matched; otherwise the reference is
checked; rows in neither are reported as missing.

Examples:
  sheetrecon compare ST.xlsx PT.xlsx RT.xlsx
  sheetrecon compare ST.xlsx PT.xlsx RT.xlsx --json | jq .summary
  sheetrecon compare ST.xlsx PT.xlsx RT.xlsx --strict-columns")]
    Compare {
        /// Source workbook (ST): the rows to account for
        source: PathBuf,

        /// Primary workbook (PT): checked first
        primary: PathBuf,

        /// Reference workbook (RT): checked when a row is not in the primary
        reference: PathBuf,

        /// Print the report as JSON instead of the console listing
        #[arg(long)]
        json: bool,

        /// Fail when the inputs' header rows differ
        #[arg(long)]
        strict_columns: bool,
    },

    /// Write the rows present in only one of two workbooks to a new workbook
    #[command(after_help = "\
The result has the source's columns plus a trailing 'missingIn' column naming
the side each row is absent from. Without -o it is written as missingRows.xlsx
next to the source workbook, replacing any existing file.

Examples:
  sheetrecon missing ST.xlsx PT.xlsx
  sheetrecon missing ST.xlsx PT.xlsx -o diff.xlsx --sheet Diff")]
    Missing {
        /// Source workbook (ST)
        source: PathBuf,

        /// Primary workbook (PT)
        primary: PathBuf,

        /// Output workbook path
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Worksheet name in the output workbook
        #[arg(long, default_value = sheetrecon_io::DEFAULT_SHEET_NAME)]
        sheet: String,

        /// Print a JSON summary instead of the console listing
        #[arg(long)]
        json: bool,

        /// Fail when the inputs' header rows differ
        #[arg(long)]
        strict_columns: bool,
    },

    /// Run a reconciliation described by a TOML config file
    #[command(after_help = "\
Relative input paths in the config resolve against the config file's directory.

Examples:
  sheetrecon run nightly.recon.toml
  sheetrecon run nightly.recon.toml --json")]
    Run {
        /// Path to the .recon.toml config file
        config: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("SHEETRECON_GIT_HASH"), ")",
        "\ntarget:  ", env!("SHEETRECON_TARGET"),
    )
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Compare { source, primary, reference, json, strict_columns } => {
            compare::cmd_compare(source, primary, reference, json, strict_columns)
        }
        Commands::Missing { source, primary, output, sheet, json, strict_columns } => {
            missing::cmd_missing(source, primary, output, sheet, json, strict_columns)
        }
        Commands::Run { config, json } => recon::cmd_run(config, json),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn general(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self { code: EXIT_INPUT_NOT_FOUND, message: msg.into(), hint: None }
    }

    /// Failure loading one side's workbook, named by its label.
    pub fn read(label: &str, err: ReadError) -> Self {
        let code = read_exit_code(&err);
        let hint = match &err {
            ReadError::NotFound(_) => Some(format!("check the {label} path")),
            ReadError::Unparseable { .. } => {
                Some("inputs must be .xlsx workbooks (Office Open XML)".to_string())
            }
        };
        Self { code, message: format!("loading {label}: {err}"), hint }
    }

    pub fn write(err: WriteError) -> Self {
        Self { code: write_exit_code(&err), message: format!("writing result: {err}"), hint: None }
    }

    pub fn recon(err: ReconError) -> Self {
        let code = recon_exit_code(&err);
        let hint = match &err {
            ReconError::ColumnMismatch { .. } => {
                Some("rows are compared by position; drop the strict column policy to continue".to_string())
            }
            _ => None,
        };
        Self { code, message: err.to_string(), hint }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
