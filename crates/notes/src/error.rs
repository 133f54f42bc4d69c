//! CLI error types.

use notes_config::ConfigError;
use notes_export::BuildError;
use notes_registry::RegistryError;
use notes_server::ServerError;
use notes_storage::StorageError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Registry(#[from] RegistryError),

    #[error("{0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Build(#[from] BuildError),

    #[error("{0}")]
    Server(#[from] ServerError),

    #[error("{0}")]
    Validation(String),
}
