use std::fmt;
use std::path::PathBuf;

/// Failure to load an input workbook.
#[derive(Debug)]
pub enum ReadError {
    /// The input path does not reference an existing file.
    NotFound(PathBuf),
    /// The file is not a readable spreadsheet package, has no worksheet,
    /// or its cell data cannot be resolved.
    Unparseable { path: PathBuf, reason: String },
}

impl ReadError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::NotFound(path) | Self::Unparseable { path, .. } => path,
        }
    }
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "file not found: {}", path.display()),
            Self::Unparseable { path, reason } => {
                write!(f, "cannot read {}: {reason}", path.display())
            }
        }
    }
}

impl std::error::Error for ReadError {}

/// Failure to write the output workbook.
#[derive(Debug)]
pub struct WriteError {
    pub path: PathBuf,
    pub reason: String,
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot write {}: {}", self.path.display(), self.reason)
    }
}

impl std::error::Error for WriteError {}
