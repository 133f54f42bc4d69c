//! `notes serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use notes_config::CliSettings;
use notes_server::{run_server, server_config_from_config};

use super::load_config;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover notes.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Notes directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Registry file (overrides config).
    #[arg(short, long)]
    registry: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long, env = "NOTES_HOST")]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long, env = "NOTES_PORT")]
    port: Option<u16>,

    /// Enable verbose output (request and render logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            source_dir: self.source_dir,
            registry: self.registry,
            out_dir: None,
        };
        let config = load_config(self.config.as_deref(), &cli_settings)?;

        output.highlight(&format!(
            "Serving notes at http://{}:{}",
            config.server.host, config.server.port
        ));
        output.field("Notes", config.docs_resolved.source_dir.display());
        output.field("Registry", config.docs_resolved.registry.display());

        let server_config = server_config_from_config(&config, version.to_owned());
        run_server(server_config).await?;

        Ok(())
    }
}
