//! `notes build` command implementation.

use std::path::PathBuf;

use clap::Args;
use notes_config::CliSettings;
use notes_export::{BuildConfig, StaticSiteBuilder};

use super::{load_config, open_site};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover notes.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory (overrides config, default: dist).
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Notes directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Registry file (overrides config).
    #[arg(short, long)]
    registry: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            registry: self.registry,
            out_dir: self.out_dir,
            ..CliSettings::default()
        };
        let config = load_config(self.config.as_deref(), &cli_settings)?;
        let site = open_site(&config)?;

        output.field("Notes", config.docs_resolved.source_dir.display());
        output.field("Output", config.out_dir.display());

        let builder = StaticSiteBuilder::new(
            site,
            BuildConfig {
                out_dir: config.out_dir.clone(),
            },
        );
        let report = builder.build()?;

        for failed in &report.failed {
            output.warning(&format!("Skipped {}: {}", failed.slug, failed.error));
        }
        output.success(&format!(
            "Built {} pages to {}",
            report.pages,
            config.out_dir.display()
        ));
        if !report.failed.is_empty() {
            output.warning(&format!("{} pages failed", report.failed.len()));
        }
        Ok(())
    }
}
