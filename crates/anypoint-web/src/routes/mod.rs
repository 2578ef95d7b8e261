mod docs;
mod health;
mod info;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

pub use docs::docs_routes;
pub use health::health_routes;
pub use info::info_routes;

/// Every path the server answers
pub const ENDPOINTS: &[&str] = &["/", "/health", "/info", "/scenarios", "/docs"];

/// Fallback for unmatched paths
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not Found",
            "message": "The requested endpoint does not exist",
            "available_endpoints": ENDPOINTS,
        })),
    )
}
