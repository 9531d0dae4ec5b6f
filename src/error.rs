//! Unified error handling for CMS access and rendering.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed before a response arrived
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The CMS answered with a non-success status
    #[error("CMS responded with {status} for {path}")]
    Status { path: String, status: u16 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// No document matches the requested uid
    #[error("Document not found: {0}")]
    NotFound(String),

    /// A pagination cursor that does not point at the configured CMS
    #[error("Invalid cursor: {0}")]
    InvalidCursor(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Mount point '{0}' already has a widget attached")]
    MountOccupied(String),
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn invalid_cursor(message: impl Into<String>) -> Self {
        Self::InvalidCursor(message.into())
    }

    /// Whether a retry of the same read-only request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Error::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Error::Status { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound(uid) => {
                tracing::debug!(%uid, "document not found");
                (StatusCode::NOT_FOUND, Html("<h1>404</h1><p>Post não encontrado.</p>"))
                    .into_response()
            }
            Error::InvalidCursor(e) => (StatusCode::BAD_REQUEST, e).into_response(),
            Error::Http(_) | Error::Status { .. } | Error::Json(_) => {
                tracing::error!(error = %self, "CMS request failed");
                (
                    StatusCode::BAD_GATEWAY,
                    Html(r#"<p class="load-error">Não foi possível carregar o conteúdo.</p>"#),
                )
                    .into_response()
            }
            e => {
                tracing::error!(error = %e, "render failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_status() {
        let server = Error::Status {
            path: "/api/v2".to_string(),
            status: 503,
        };
        let client = Error::Status {
            path: "/api/v2".to_string(),
            status: 404,
        };
        assert!(server.is_transient());
        assert!(!client.is_transient());
        assert!(!Error::NotFound("a".to_string()).is_transient());
    }

    #[test]
    fn test_not_found_response() {
        let response = Error::NotFound("missing".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_upstream_failure_is_bad_gateway() {
        let response = Error::Status {
            path: "/documents/search".to_string(),
            status: 500,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
