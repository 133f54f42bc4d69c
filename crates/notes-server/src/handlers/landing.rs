//! Landing page.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use serde::Deserialize;

use crate::handlers::html_page;
use crate::state::AppState;

/// Query parameters for `GET /`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct LandingQuery {
    /// Search query.
    #[serde(default)]
    q: String,
}

/// Handle `GET /`.
pub(crate) async fn get_landing(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LandingQuery>,
    headers: HeaderMap,
) -> Response {
    let html = state.site.landing_html(&query.q);
    html_page(StatusCode::OK, html, &state.version, &headers, Vec::new())
}
