//! Service identity and liveness.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::ApiContext;
use crate::config::APP_VERSION;

#[derive(Serialize)]
pub struct RootResponse {
    pub name: String,
    pub version: &'static str,
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// `GET /`: service name and version.
pub async fn root(State(ctx): State<ApiContext>) -> Json<RootResponse> {
    Json(RootResponse {
        name: ctx.config.app_name.clone(),
        version: APP_VERSION,
        status: "healthy",
    })
}

/// `GET /api/health`: liveness probe.
pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: APP_VERSION,
    })
}
