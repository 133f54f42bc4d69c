//! `notes check` command implementation.

use std::path::PathBuf;

use clap::Args;
use notes_config::CliSettings;

use super::{load_config, open_site};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover notes.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Notes directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Registry file (overrides config).
    #[arg(short, long)]
    registry: Option<PathBuf>,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry is invalid, the notes directory cannot
    /// be scanned, or a registered note has no file.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            registry: self.registry,
            ..CliSettings::default()
        };
        let config = load_config(self.config.as_deref(), &cli_settings)?;
        let site = open_site(&config)?;
        let report = site.check()?;

        output.highlight(&format!(
            "{} notes in {} groups",
            site.registry().len(),
            site.registry().groups().len()
        ));
        output.separator();

        for slug in &report.unregistered {
            output.warning(&format!("Not in registry: {slug}.md"));
        }
        for slug in &report.missing {
            output.error(&format!("Missing file: {slug}.md"));
        }

        if report.is_ok() {
            output.success("Registry and notes directory are consistent");
            Ok(())
        } else {
            Err(CliError::Validation(format!(
                "{} registered notes have no file",
                report.missing.len()
            )))
        }
    }
}
