//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use notes_site::Site;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Notes site (registry, storage, renderer).
    pub(crate) site: Arc<Site>,
    /// Application version, mixed into `ETag` values.
    pub(crate) version: String,
}
