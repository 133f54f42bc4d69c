//! Bundled stylesheet and script.

use axum::extract::Path;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

/// Handle `GET /assets/{*file}`.
pub(crate) async fn get_asset(Path(file): Path<String>) -> Response {
    let Some(content) = notes_assets::get(&file) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    (
        [
            (header::CONTENT_TYPE, notes_assets::mime_for(&file)),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        content.into_owned(),
    )
        .into_response()
}
