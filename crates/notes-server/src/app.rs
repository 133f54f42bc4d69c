//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::landing::get_landing))
        .route("/docs/{slug}", get(handlers::docs::get_doc))
        .route("/assets/{*file}", get(handlers::assets::get_asset))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(security::csp_layer())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer())
                .layer(security::referrer_policy_layer()),
        )
        .with_state(state)
}

/// Any route that matches nothing.
async fn not_found(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Html(state.site.not_found_html()))
}
