//! `sheetrecon run`: config-driven reconciliation.

use std::path::{Path, PathBuf};

use sheetrecon_recon::ReconConfig;

use crate::compare::run_three_way;
use crate::missing::{run_two_way, TwoWayRun};
use crate::CliError;

pub fn cmd_run(config_path: PathBuf, json: bool) -> Result<(), CliError> {
    if !config_path.exists() {
        return Err(CliError::not_found(format!("config not found: {}", config_path.display()))
            .with_hint("pass the path to a .recon.toml file"));
    }

    let config = ReconConfig::from_file(&config_path).map_err(CliError::recon)?;

    // Resolve file paths relative to config file's directory
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    let inputs = config.resolve_inputs(base_dir);
    log::debug!("running '{}' ({}-way) from {}", config.name, config.way, config_path.display());

    match inputs.reference {
        Some(ref reference) => run_three_way(
            [inputs.source.as_path(), inputs.primary.as_path(), reference.as_path()],
            &config.labels,
            config.columns.policy,
            json,
        ),
        None => {
            let output = config.output_path(&inputs.source);
            run_two_way(
                TwoWayRun {
                    source: &inputs.source,
                    primary: &inputs.primary,
                    output: &output,
                    sheet: &config.output.sheet,
                    labels: &config.labels,
                    policy: config.columns.policy,
                },
                json,
            )
        }
    }
}
