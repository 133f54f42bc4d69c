//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod check;
pub(crate) mod serve;

use std::path::Path;
use std::sync::Arc;

use notes_config::{CliSettings, Config};
use notes_registry::Registry;
use notes_site::Site;
use notes_storage::FsStorage;

use crate::error::CliError;

pub(crate) use build::BuildArgs;
pub(crate) use check::CheckArgs;
pub(crate) use serve::ServeArgs;

/// Load and validate configuration with CLI overrides applied.
fn load_config(path: Option<&Path>, settings: &CliSettings) -> Result<Config, CliError> {
    let config = Config::load(path, Some(settings))?;
    config.validate()?;
    Ok(config)
}

/// Open the site described by `config`.
fn open_site(config: &Config) -> Result<Arc<Site>, CliError> {
    let registry = Registry::load(&config.docs_resolved.registry)?;
    let storage = Arc::new(FsStorage::new(config.docs_resolved.source_dir.clone()));
    let site_config = notes_server::site_config_from_config(config);
    Ok(Arc::new(Site::new(registry, storage, site_config)))
}
