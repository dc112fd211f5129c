//! HTTP transport
//!
//! `POST {mcp_path}` answers each JSON-RPC message with a `text/event-stream`
//! body holding a single `message` event. Notifications get `202 Accepted`.
//! `GET /health` reports liveness.

use super::server::{McpServer, SERVER_NAME};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{
        IntoResponse, Response,
        sse::{Event, Sse},
    },
    routing::{get, post},
};
use datagroom_application::DatasetGateway;
use futures::stream;
use serde_json::json;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Router exposing the MCP endpoint and `/health`
pub fn router<G: DatasetGateway + 'static>(server: Arc<McpServer<G>>, mcp_path: &str) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(mcp_path, post(handle_mcp::<G>))
        .with_state(server)
}

async fn health_check() -> impl IntoResponse {
    Json(json!({"status": "ok", "service": SERVER_NAME}))
}

async fn handle_mcp<G: DatasetGateway + 'static>(
    State(server): State<Arc<McpServer<G>>>,
    body: String,
) -> Response {
    match server.handle_message(&body).await {
        Some(response) => {
            let event = Event::default().event("message").data(response.to_json());
            Sse::new(stream::once(async move { Ok::<_, Infallible>(event) })).into_response()
        }
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// Serve on an already-bound listener until `shutdown` is cancelled
pub async fn serve<G: DatasetGateway + 'static>(
    listener: TcpListener,
    server: Arc<McpServer<G>>,
    mcp_path: &str,
    shutdown: CancellationToken,
) -> std::io::Result<()> {
    let app = router(server, mcp_path);

    if let Ok(addr) = listener.local_addr() {
        info!("MCP server listening on http://{}{}", addr, mcp_path);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
}
