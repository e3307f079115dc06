// handlers/public/root.rs - GET / handler

use axum::{extract::State, response::Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: String,
    pub environment: String,
    pub docs: String,
}

/// GET / - Service name, deployment environment and where the docs live
pub async fn get(State(state): State<AppState>) -> Json<RootResponse> {
    let service = state.service();

    Json(RootResponse {
        message: format!("Welcome to the {}", service.name),
        environment: service.environment.to_string(),
        docs: service.docs_url.clone(),
    })
}
