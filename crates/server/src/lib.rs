//! Lead Agent Server
//!
//! HTTP endpoints, session store, and background session reaping.

pub mod http;
pub mod session;
pub mod state;

pub use http::create_router;
pub use session::SessionManager;
pub use state::AppState;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Server errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match self {
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Session(_) => StatusCode::NOT_FOUND,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Callers never see a raw internal error; the cause goes to the log.
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            (
                status,
                Json(serde_json::json!({ "error": "Internal server error" })),
            )
                .into_response()
        } else {
            (
                status,
                Json(serde_json::json!({ "error": self.to_string() })),
            )
                .into_response()
        }
    }
}
