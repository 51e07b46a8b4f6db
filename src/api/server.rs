//! API server lifecycle: bind → spawn background task → return handle with
//! a shutdown channel.

use std::io;
use std::net::SocketAddr;

use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::api::router::api_router;
use crate::api::types::ApiContext;

// ═══════════════════════════════════════════════════════════
// Public types
// ═══════════════════════════════════════════════════════════

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind { addr: SocketAddr, source: io::Error },

    #[error("Failed to get server address: {0}")]
    LocalAddr(io::Error),
}

/// Metadata for a running server.
#[derive(Debug, Clone)]
pub struct ServerSession {
    pub session_id: String,
    pub server_addr: String,
    pub port: u16,
    pub started_at: String,
}

/// Handle to a running API server.
pub struct ApiServer {
    pub session: ServerSession,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl ApiServer {
    /// Signal graceful shutdown. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("API server shutdown signal sent");
        }
    }

    /// Wait for the server task to finish serving in-flight requests.
    pub async fn stopped(self) {
        if let Err(e) = self.task.await {
            tracing::error!("API server task failed: {e}");
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Server lifecycle
// ═══════════════════════════════════════════════════════════

/// Bind `addr` (port 0 picks an ephemeral port) and serve the router in a
/// background tokio task.
pub async fn start_api_server(ctx: ApiContext, addr: SocketAddr) -> Result<ApiServer, ServerError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    let local = listener.local_addr().map_err(ServerError::LocalAddr)?;

    let app = api_router(ctx);

    let session = ServerSession {
        session_id: Uuid::new_v4().to_string(),
        server_addr: local.to_string(),
        port: local.port(),
        started_at: chrono::Utc::now().to_rfc3339(),
    };

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("API server received shutdown signal");
        };

        tracing::info!(addr = %local, "API server started");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("API server error: {e}");
        }

        tracing::info!("API server stopped");
    });

    Ok(ApiServer {
        session,
        shutdown_tx: Some(shutdown_tx),
        task,
    })
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    use crate::config::{AppConfig, ENV_DATABASE_PATH};

    fn test_ctx() -> (ApiContext, tempfile::TempDir) {
        let tmp = tempfile::tempdir().unwrap();
        let db_path = tmp.path().join("server.db").display().to_string();
        let config = AppConfig::from_lookup(|key| {
            (key == ENV_DATABASE_PATH).then(|| db_path.clone())
        })
        .unwrap();
        (ApiContext::new(config), tmp)
    }

    fn localhost() -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0)
    }

    #[tokio::test]
    async fn start_and_stop_server() {
        let (ctx, _tmp) = test_ctx();
        let mut server = start_api_server(ctx, localhost())
            .await
            .expect("server should start");

        assert!(!server.session.session_id.is_empty());
        assert!(server.session.port > 0);
        assert!(server.session.server_addr.contains(':'));
        assert!(chrono::DateTime::parse_from_rfc3339(&server.session.started_at).is_ok());

        let url = format!("http://127.0.0.1:{}/api/health", server.session.port);
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        let json: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(json["status"], "healthy");

        server.shutdown();
        server.stopped().await;
    }

    #[tokio::test]
    async fn serves_patient_crud() {
        let (ctx, _tmp) = test_ctx();
        let mut server = start_api_server(ctx, localhost())
            .await
            .expect("server should start");
        let base = format!("http://127.0.0.1:{}", server.session.port);
        let client = reqwest::Client::new();

        let resp = client
            .post(format!("{base}/api/patients"))
            .json(&serde_json::json!({"gender": "female", "age": 50, "creatinine": 0.6}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::CREATED);
        let created: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(created["egfr"], 106.6);

        let resp = client
            .delete(format!("{base}/api/patients/{}", created["seqn"]))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::NO_CONTENT);

        let resp = reqwest::get(format!("{base}/nonexistent")).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

        server.shutdown();
    }

    #[tokio::test]
    async fn bind_conflict_is_error() {
        let (ctx, _tmp) = test_ctx();
        let mut first = start_api_server(ctx.clone(), localhost()).await.unwrap();
        let taken: SocketAddr = first.session.server_addr.parse().unwrap();

        let err = start_api_server(ctx, taken).await.err().unwrap();
        assert!(matches!(err, ServerError::Bind { .. }));

        first.shutdown();
    }

    #[tokio::test]
    async fn shutdown_is_idempotent() {
        let (ctx, _tmp) = test_ctx();
        let mut server = start_api_server(ctx, localhost()).await.unwrap();

        server.shutdown();
        server.shutdown(); // Second call should be safe
    }
}
