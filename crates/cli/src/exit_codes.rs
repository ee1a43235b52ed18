//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract: scripts rely on them.
//!
//! # Exit Codes
//!
//! | Code | Meaning                                              |
//! |------|------------------------------------------------------|
//! | 0    | Success (differences found are still a success)      |
//! | 1    | General error (unspecified)                          |
//! | 2    | CLI usage error (bad args)                           |
//! | 3    | Input file not found                                 |
//! | 4    | Input file could not be parsed as a workbook         |
//! | 5    | Invalid run config                                   |
//! | 6    | Output workbook could not be written                 |
//! | 7    | Input headers disagree under `--strict-columns`      |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant error mapping below

use sheetrecon_io::{ReadError, WriteError};
use sheetrecon_recon::ReconError;

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Inputs (3-4)
// =============================================================================

/// An input workbook (or run config) does not exist.
pub const EXIT_INPUT_NOT_FOUND: u8 = 3;

/// An input workbook is not a readable XLSX package.
pub const EXIT_INPUT_UNPARSEABLE: u8 = 4;

// =============================================================================
// Config + Output (5-7)
// =============================================================================

/// Run config failed to parse or validate.
pub const EXIT_INVALID_CONFIG: u8 = 5;

/// The result workbook could not be saved.
pub const EXIT_WRITE_FAILED: u8 = 6;

/// Headers differ between inputs and the strict column policy is active.
pub const EXIT_COLUMN_MISMATCH: u8 = 7;

// =============================================================================
// Error mapping
// =============================================================================

pub fn read_exit_code(err: &ReadError) -> u8 {
    match err {
        ReadError::NotFound(_) => EXIT_INPUT_NOT_FOUND,
        ReadError::Unparseable { .. } => EXIT_INPUT_UNPARSEABLE,
    }
}

pub fn write_exit_code(_err: &WriteError) -> u8 {
    EXIT_WRITE_FAILED
}

pub fn recon_exit_code(err: &ReconError) -> u8 {
    match err {
        ReconError::ConfigParse(_) | ReconError::ConfigValidation(_) => EXIT_INVALID_CONFIG,
        ReconError::ColumnMismatch { .. } => EXIT_COLUMN_MISMATCH,
        ReconError::Io(_) => EXIT_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn codes_are_distinct() {
        let codes = [
            EXIT_SUCCESS,
            EXIT_ERROR,
            EXIT_USAGE,
            EXIT_INPUT_NOT_FOUND,
            EXIT_INPUT_UNPARSEABLE,
            EXIT_INVALID_CONFIG,
            EXIT_WRITE_FAILED,
            EXIT_COLUMN_MISMATCH,
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn read_errors_map_by_kind() {
        let path = PathBuf::from("ST.xlsx");
        assert_eq!(read_exit_code(&ReadError::NotFound(path.clone())), EXIT_INPUT_NOT_FOUND);
        let unparseable = ReadError::Unparseable { path, reason: "bad zip".into() };
        assert_eq!(read_exit_code(&unparseable), EXIT_INPUT_UNPARSEABLE);
    }

    #[test]
    fn recon_errors_map_by_kind() {
        assert_eq!(recon_exit_code(&ReconError::ConfigParse("x".into())), EXIT_INVALID_CONFIG);
        assert_eq!(recon_exit_code(&ReconError::ConfigValidation("x".into())), EXIT_INVALID_CONFIG);
        let mismatch = ReconError::ColumnMismatch {
            expected_side: "ST".into(),
            side: "PT".into(),
            expected: vec![],
            found: vec![],
        };
        assert_eq!(recon_exit_code(&mismatch), EXIT_COLUMN_MISMATCH);
    }
}
