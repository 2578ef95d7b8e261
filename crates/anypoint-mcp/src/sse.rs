//! MCP over Server-Sent Events
//!
//! A client opens `GET /sse` and is told, in an `endpoint` event, where to
//! POST its JSON-RPC messages. Responses come back on the same event stream
//! as `message` events. Each stream is one session.

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::Context;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use futures::stream::Stream;
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_stream::StreamExt;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::server::McpServer;

type Sessions = Arc<Mutex<HashMap<Uuid, mpsc::UnboundedSender<String>>>>;

#[derive(Clone)]
pub struct SseState {
    server: Arc<McpServer>,
    sessions: Sessions,
}

impl SseState {
    pub fn new(server: Arc<McpServer>) -> Self {
        Self {
            server,
            sessions: Arc::default(),
        }
    }

    pub fn session_count(&self) -> usize {
        lock(&self.sessions).len()
    }

    fn open_session(&self) -> (Uuid, mpsc::UnboundedReceiver<String>) {
        let id = Uuid::new_v4();
        let (tx, rx) = mpsc::unbounded_channel();
        lock(&self.sessions).insert(id, tx);
        (id, rx)
    }

    fn sender(&self, id: &Uuid) -> Option<mpsc::UnboundedSender<String>> {
        lock(&self.sessions).get(id).cloned()
    }
}

fn lock(sessions: &Sessions) -> MutexGuard<'_, HashMap<Uuid, mpsc::UnboundedSender<String>>> {
    sessions.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Removes its session when the event stream is dropped
struct SessionGuard {
    id: Uuid,
    sessions: Sessions,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        lock(&self.sessions).remove(&self.id);
        info!("SSE session closed: {}", self.id);
    }
}

pub fn sse_routes(state: SseState) -> Router {
    Router::new()
        .route("/sse", get(open_stream))
        .route("/messages", post(post_message))
        .with_state(state)
}

/// Bind `addr` and serve the SSE transport until the listener fails
pub async fn serve(server: Arc<McpServer>, addr: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("MCP SSE endpoint: http://{}/sse", addr);

    axum::serve(listener, sse_routes(SseState::new(server)))
        .await
        .context("SSE server failed")?;

    Ok(())
}

async fn open_stream(
    State(state): State<SseState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (id, rx) = state.open_session();
    info!("SSE session opened: {}", id);

    let guard = SessionGuard {
        id,
        sessions: state.sessions.clone(),
    };

    let endpoint = Event::default()
        .event("endpoint")
        .data(format!("/messages?session_id={}", id));

    let messages = UnboundedReceiverStream::new(rx).map(move |payload| {
        let _session = &guard;
        Ok(Event::default().event("message").data(payload))
    });

    Sse::new(tokio_stream::once(Ok(endpoint)).chain(messages)).keep_alive(KeepAlive::default())
}

#[derive(Debug, Deserialize)]
struct SessionQuery {
    session_id: Option<String>,
}

async fn post_message(
    State(state): State<SseState>,
    Query(query): Query<SessionQuery>,
    body: String,
) -> Response {
    let Some(raw) = query.session_id else {
        return (StatusCode::BAD_REQUEST, "session_id is required").into_response();
    };
    let Ok(id) = Uuid::parse_str(&raw) else {
        return (StatusCode::BAD_REQUEST, "Invalid session ID").into_response();
    };
    let Some(sender) = state.sender(&id) else {
        warn!("Message for unknown session: {}", id);
        return (StatusCode::NOT_FOUND, "Could not find session").into_response();
    };

    let server = state.server.clone();
    tokio::spawn(async move {
        let Some(resp) = server.handle_message(&body).await else {
            return;
        };
        match serde_json::to_string(&resp) {
            Ok(payload) => {
                if sender.send(payload).is_err() {
                    debug!("Session {} closed before response was delivered", id);
                }
            }
            Err(e) => error!("Failed to serialize response: {}", e),
        }
    });

    (StatusCode::ACCEPTED, "Accepted").into_response()
}
