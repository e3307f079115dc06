// handlers/public/docs.rs - GET /docs handler

use axum::{extract::State, response::Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Endpoint {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

/// Every route the server mounts
pub const ENDPOINTS: &[Endpoint] = &[
    Endpoint {
        method: "GET",
        path: "/",
        description: "Service name, environment and docs link",
    },
    Endpoint {
        method: "GET",
        path: "/healthcheck",
        description: "Liveness probe",
    },
    Endpoint {
        method: "GET",
        path: "/healthcheck/ready",
        description: "Readiness probe; pings the database",
    },
    Endpoint {
        method: "GET",
        path: "/docs",
        description: "This endpoint catalog",
    },
    Endpoint {
        method: "GET",
        path: "/clues",
        description: "List all clues ordered by id",
    },
    Endpoint {
        method: "GET",
        path: "/clues/{id}",
        description: "Fetch one clue by id",
    },
    Endpoint {
        method: "POST",
        path: "/clues",
        description: "Create a clue from {clue, answer, definition?}",
    },
];

#[derive(Debug, Serialize)]
pub struct DocsResponse {
    pub application: String,
    pub version: String,
    pub endpoints: &'static [Endpoint],
}

/// GET /docs - Machine-readable endpoint catalog
pub async fn get(State(state): State<AppState>) -> Json<DocsResponse> {
    let service = state.service();

    Json(DocsResponse {
        application: service.name.clone(),
        version: service.version.to_string(),
        endpoints: ENDPOINTS,
    })
}
