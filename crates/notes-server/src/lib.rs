//! HTTP server for the notes browser.
//!
//! Serves server-rendered HTML:
//! - `/`: landing page (`?q=` filters the cards)
//! - `/docs/{slug}`: a note with the sidebar (`?q=` filters it, `?menu=open`
//!   expands it on narrow screens)
//! - `/assets/{file}`: bundled stylesheet and search script
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use notes_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         source_dir: PathBuf::from("notes"),
//!         registry: PathBuf::from("notes/registry.toml"),
//!         ..ServerConfig::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::path::PathBuf;
use std::sync::Arc;

use notes_registry::Registry;
use notes_site::{Site, SiteConfig};
use notes_storage::FsStorage;
use state::AppState;

pub use error::ServerError;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Directory holding `{slug}.md` notes.
    pub source_dir: PathBuf,
    /// Registry file.
    pub registry: PathBuf,
    /// Page presentation settings.
    pub site: SiteConfig,
    /// Application version, mixed into `ETag` values.
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
            source_dir: PathBuf::from("notes"),
            registry: PathBuf::from("notes/registry.toml"),
            site: SiteConfig::default(),
            version: String::new(),
        }
    }
}

/// Run the server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the registry cannot be loaded or the listener
/// cannot be bound.
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let registry = Registry::load(&config.registry)?;
    tracing::info!(
        path = %config.registry.display(),
        notes = registry.len(),
        "Loaded registry"
    );

    let storage = Arc::new(FsStorage::new(config.source_dir.clone()));
    let site = Arc::new(Site::new(registry, storage, config.site));

    let state = Arc::new(AppState {
        site,
        version: config.version,
    });
    let app = app::create_router(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!(address = %listener.local_addr()?, "Starting server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Site presentation settings from the loaded configuration.
#[must_use]
pub fn site_config_from_config(config: &notes_config::Config) -> SiteConfig {
    let site = &config.site;
    SiteConfig {
        title: site.title.clone(),
        tagline: site.tagline.clone(),
        heading: site.heading.clone().unwrap_or_else(|| site.title.clone()),
        description: site.description.clone(),
        footer: site.footer.clone(),
        popular_count: site.popular_count,
    }
}

/// Create server configuration from the loaded configuration.
#[must_use]
pub fn server_config_from_config(config: &notes_config::Config, version: String) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        source_dir: config.docs_resolved.source_dir.clone(),
        registry: config.docs_resolved.registry.clone(),
        site: site_config_from_config(config),
        version,
    }
}
