// handlers/public/health.rs - GET /healthcheck and GET /healthcheck/ready

use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;
use serde_json::{json, Value};

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub application: String,
    pub version: String,
    pub status: &'static str,
}

/// GET /healthcheck - Static liveness payload; never touches the store
pub async fn healthcheck(State(state): State<AppState>) -> Json<HealthResponse> {
    let service = state.service();

    Json(HealthResponse {
        application: service.name.clone(),
        version: service.version.to_string(),
        status: "healthy",
    })
}

/// GET /healthcheck/ready - Pings the store; 503 while it is unreachable
pub async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.repository().gateway().ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "ready", "database": "ok" })),
        ),
        Err(e) => {
            tracing::error!("Readiness check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable", "database": "unavailable" })),
            )
        }
    }
}
