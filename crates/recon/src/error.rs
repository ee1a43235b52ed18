use std::fmt;

#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (bad way, missing input, etc.).
    ConfigValidation(String),
    /// Config file could not be read.
    Io(String),
    /// Input tables disagree on column names or order under the strict policy.
    ColumnMismatch {
        expected_side: String,
        side: String,
        expected: Vec<String>,
        found: Vec<String>,
    },
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::Io(msg) => write!(f, "I/O error: {msg}"),
            Self::ColumnMismatch { expected_side, side, expected, found } => write!(
                f,
                "columns of {side} [{}] do not match {expected_side} [{}]",
                found.join(", "),
                expected.join(", ")
            ),
        }
    }
}

impl std::error::Error for ReconError {}
