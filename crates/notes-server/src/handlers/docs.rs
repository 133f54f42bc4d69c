//! Note pages.

use std::sync::Arc;
use std::time::{Duration, UNIX_EPOCH};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::Response;
use chrono::{DateTime, Utc};
use notes_site::NavState;
use serde::Deserialize;

use crate::error::ServerError;
use crate::handlers::html_page;
use crate::state::AppState;

/// Query parameters for `GET /docs/{slug}`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct DocQuery {
    /// Sidebar filter.
    #[serde(default)]
    q: String,
    /// `open` expands the sidebar on narrow screens.
    menu: Option<String>,
}

impl DocQuery {
    fn nav_state(&self) -> NavState {
        let mut state = NavState::with_query(self.q.clone());
        if self.menu.as_deref() == Some("open") {
            state.open_sidebar();
        }
        state
    }
}

/// Handle `GET /docs/{slug}`.
///
/// A slug without a note renders the not-found message with status 404.
pub(crate) async fn get_doc(
    Path(slug): Path<String>,
    State(state): State<Arc<AppState>>,
    Query(query): Query<DocQuery>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let page = state.site.document_html(&slug, &query.nav_state())?;
    if !page.found {
        return Ok(html_page(
            StatusCode::NOT_FOUND,
            page.html,
            &state.version,
            &headers,
            Vec::new(),
        ));
    }

    let extra = page
        .source_mtime
        .map(|mtime| (header::LAST_MODIFIED, last_modified(mtime)))
        .into_iter()
        .collect();

    Ok(html_page(
        StatusCode::OK,
        page.html,
        &state.version,
        &headers,
        extra,
    ))
}

/// Format a Unix timestamp as an HTTP date.
fn last_modified(mtime: f64) -> String {
    let time = UNIX_EPOCH + Duration::from_secs_f64(mtime.max(0.0));
    let time: DateTime<Utc> = time.into();
    time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}
