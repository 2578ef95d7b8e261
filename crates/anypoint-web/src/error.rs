use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, WebError>;

#[derive(Error, Debug)]
pub enum WebError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Handler panicked: {0}")]
    Panic(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        tracing::error!("Request failed: {}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Internal Server Error",
                "message": self.to_string(),
            })),
        )
            .into_response()
    }
}
