use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::columns::ColumnPolicy;
use crate::error::ReconError;
use crate::model::SideLabels;

/// File name used when `[output] file` is not set.
pub const DEFAULT_OUTPUT_FILE: &str = "missingRows.xlsx";

/// Sheet name used when `[output] sheet` is not set.
pub const DEFAULT_OUTPUT_SHEET: &str = "Sheet1";

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReconConfig {
    pub name: String,
    pub way: u8,
    pub inputs: InputsConfig,
    #[serde(default)]
    pub labels: SideLabels,
    #[serde(default)]
    pub columns: ColumnsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputsConfig {
    pub source: PathBuf,
    pub primary: PathBuf,
    #[serde(default)]
    pub reference: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Columns + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnsConfig {
    #[serde(default)]
    pub policy: ColumnPolicy,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default = "default_output_file")]
    pub file: PathBuf,
    #[serde(default = "default_output_sheet")]
    pub sheet: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file: default_output_file(),
            sheet: default_output_sheet(),
        }
    }
}

fn default_output_file() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_FILE)
}

fn default_output_sheet() -> String {
    DEFAULT_OUTPUT_SHEET.to_string()
}

/// Input paths after resolution against the config file's directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInputs {
    pub source: PathBuf,
    pub primary: PathBuf,
    pub reference: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReconConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ReconConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ReconError> {
        let input = std::fs::read_to_string(path)
            .map_err(|e| ReconError::Io(format!("{}: {e}", path.display())))?;
        Self::from_toml(&input)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        // Way must be 2 or 3
        if self.way != 2 && self.way != 3 {
            return Err(ReconError::ConfigValidation(format!(
                "way must be 2 or 3, got {}",
                self.way
            )));
        }

        // Reference is required for 3-way and meaningless for 2-way
        match (self.way, &self.inputs.reference) {
            (3, None) => {
                return Err(ReconError::ConfigValidation(
                    "way = 3 requires inputs.reference".into(),
                ))
            }
            (2, Some(_)) => {
                return Err(ReconError::ConfigValidation(
                    "inputs.reference is only valid with way = 3".into(),
                ))
            }
            _ => {}
        }

        for (key, path) in [("source", &self.inputs.source), ("primary", &self.inputs.primary)] {
            if path.as_os_str().is_empty() {
                return Err(ReconError::ConfigValidation(format!("inputs.{key} is empty")));
            }
        }
        if let Some(reference) = &self.inputs.reference {
            if reference.as_os_str().is_empty() {
                return Err(ReconError::ConfigValidation("inputs.reference is empty".into()));
            }
        }

        let labels = [&self.labels.source, &self.labels.primary, &self.labels.reference];
        if labels.iter().any(|l| l.trim().is_empty()) {
            return Err(ReconError::ConfigValidation("labels must not be blank".into()));
        }

        if self.output.file.as_os_str().is_empty() {
            return Err(ReconError::ConfigValidation("output.file is empty".into()));
        }
        if self.output.sheet.trim().is_empty() {
            return Err(ReconError::ConfigValidation("output.sheet is empty".into()));
        }

        Ok(())
    }

    /// Input paths, with relative ones joined onto `base_dir`.
    pub fn resolve_inputs(&self, base_dir: &Path) -> ResolvedInputs {
        ResolvedInputs {
            source: resolve(base_dir, &self.inputs.source),
            primary: resolve(base_dir, &self.inputs.primary),
            reference: self.inputs.reference.as_deref().map(|p| resolve(base_dir, p)),
        }
    }

    /// Where the two-way result goes: relative output paths sit next to the
    /// (resolved) source file.
    pub fn output_path(&self, source: &Path) -> PathBuf {
        if self.output.file.is_absolute() {
            return self.output.file.clone();
        }
        match source.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.join(&self.output.file),
            _ => self.output.file.clone(),
        }
    }
}

fn resolve(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
