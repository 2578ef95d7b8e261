use std::any::Any;

use axum::response::{IntoResponse, Response};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;

use crate::routes::{docs_routes, health_routes, info_routes, not_found, ENDPOINTS};
use crate::{AppState, Result, WebError};

/// The full router with state applied
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(info_routes())
        .merge(docs_routes())
        .fallback(not_found)
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
}

pub(crate) fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    WebError::Panic(message).into_response()
}

pub async fn start_server(state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(&state.listen).await?;
    let addr = listener.local_addr()?;

    tracing::info!("Starting web server on http://{}", addr);
    for path in ENDPOINTS {
        tracing::info!("  http://localhost:{}{}", addr.port(), path);
    }

    axum::serve(listener, app(state)).await?;

    Ok(())
}
