//! # Feature: Health Endpoint
//!
//! Minimal HTTP liveness probe for hosts that expect a bound port.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.1.0
//! - **Toggleable**: true (`HEALTH_PORT`)
//!
//! ## Changelog
//! - 1.1.0: Serve through an axum router
//! - 1.0.0: `GET /` and `GET /health` with pending preview count and uptime

use anyhow::Result;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use log::{error, info};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;

use crate::features::announcements::PreviewManager;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub pending_previews: usize,
    pub uptime_secs: u64,
}

struct HealthState {
    previews: PreviewManager,
    start_time: Instant,
}

/// Bind `0.0.0.0:port` and answer health probes in a background task
pub async fn spawn_health_server(port: u16, previews: PreviewManager) -> Result<SocketAddr> {
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    let addr = listener.local_addr()?;
    info!("Health server listening on {addr}");

    tokio::spawn(async move {
        if let Err(e) = serve(listener, previews).await {
            error!("Health server stopped: {e}");
        }
    });
    Ok(addr)
}

/// Serve the health routes on an already bound listener
pub async fn serve(listener: TcpListener, previews: PreviewManager) -> std::io::Result<()> {
    axum::serve(listener, router(previews)).await
}

pub fn router(previews: PreviewManager) -> Router {
    let state = Arc::new(HealthState {
        previews,
        start_time: Instant::now(),
    });

    Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
        .fallback(not_found)
        .with_state(state)
}

async fn health_check(State(state): State<Arc<HealthState>>) -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok",
        pending_previews: state.previews.pending_count(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "status": "not_found" })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::announcements::{InMemoryPreviewStore, NewAnnouncement};
    use serenity::model::id::{ChannelId, UserId};
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    fn previews() -> PreviewManager {
        PreviewManager::new(
            Arc::new(InMemoryPreviewStore::new()),
            Duration::from_secs(15 * 60),
        )
    }

    async fn start(previews: PreviewManager) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(serve(listener, previews));
        addr
    }

    /// Send a request head in pieces, pausing between writes, and read the whole response
    async fn request(addr: SocketAddr, parts: &[&str]) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        for part in parts {
            stream.write_all(part.as_bytes()).await.unwrap();
            stream.flush().await.unwrap();
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    async fn get(addr: SocketAddr, path: &str) -> String {
        let head = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
        request(addr, &[&head]).await
    }

    fn body(response: &str) -> serde_json::Value {
        let body = response.split("\r\n\r\n").nth(1).unwrap();
        serde_json::from_str(body).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_pending_previews() {
        let previews = previews();
        previews.create(NewAnnouncement {
            owner_id: UserId(1),
            guild_id: None,
            destination: ChannelId(2),
            body: "Hello".to_string(),
            ping_everyone: false,
            mention_role: None,
        });
        let addr = start(previews).await;

        let response = get(addr, "/health").await;
        assert!(response.starts_with("HTTP/1.1 200 OK"), "{response}");

        let json = body(&response);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["pending_previews"], 1);
        assert!(json["uptime_secs"].is_u64());
    }

    #[tokio::test]
    async fn test_root_is_also_healthy() {
        let addr = start(previews()).await;
        let response = get(addr, "/").await;
        assert!(response.starts_with("HTTP/1.1 200 OK"), "{response}");
        assert_eq!(body(&response)["pending_previews"], 0);
    }

    #[tokio::test]
    async fn test_request_split_across_writes() {
        let addr = start(previews()).await;
        let response = request(
            addr,
            &[
                "GET /hea",
                "lth HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
            ],
        )
        .await;
        assert!(response.starts_with("HTTP/1.1 200 OK"), "{response}");
        assert_eq!(body(&response)["status"], "ok");
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let addr = start(previews()).await;
        let response = get(addr, "/metrics").await;
        assert!(response.starts_with("HTTP/1.1 404 Not Found"), "{response}");
    }
}
