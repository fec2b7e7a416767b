//! Request-path errors and their JSON rendering.
//!
//! Every variant ends the request. The body is always
//! `{"error": true, "msg": <message>}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// Endpoint missing, unparseable, or not on the allow-list.
    #[error("Invalid endpoint")]
    InvalidEndpoint,

    /// Endpoint is trusted but the effective method is not relayed.
    #[error("you are not allowed to request {target_path}")]
    MethodNotAllowed { target_path: String },

    #[error("Failed to create request")]
    RequestConstruction(#[source] reqwest::Error),

    #[error("Failed to send request")]
    Transport(#[source] reqwest::Error),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::InvalidEndpoint => StatusCode::BAD_REQUEST,
            ProxyError::MethodNotAllowed { .. } => StatusCode::FORBIDDEN,
            ProxyError::RequestConstruction(_) | ProxyError::Transport(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": true, "msg": self.to_string() });
        (self.status(), axum::Json(body)).into_response()
    }
}
