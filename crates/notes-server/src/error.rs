//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use notes_registry::RegistryError;
use notes_site::RenderError;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Registry could not be loaded at startup.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Note exists but could not be rendered.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// I/O error (binding the listener, serving).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");

        let status = match &self {
            Self::Render(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = format!(
            "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\">\
             <title>{code}</title></head><body><h1>{code}</h1></body></html>\n",
            code = status
        );

        (status, Html(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use notes_storage::{StorageError, StorageErrorKind};

    use super::*;

    #[test]
    fn test_render_io_error_is_500() {
        let err = ServerError::Render(RenderError::Io {
            slug: "Link".to_owned(),
            source: StorageError::new(StorageErrorKind::PermissionDenied),
        });

        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_render_not_found_is_404() {
        let err = ServerError::Render(RenderError::NotFound {
            slug: "Link".to_owned(),
        });

        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
