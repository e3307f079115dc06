//! Router assembly and server lifecycle

use anyhow::Context;
use axum::{extract::DefaultBodyLimit, http::HeaderValue, routing::get, Router};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::database::{ensure_schema, ClueRepository, Gateway};
use crate::handlers;
use crate::state::{AppState, ServiceInfo};

/// Connect to the store, make sure the table exists, and wire up the state
pub async fn build_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let gateway = Gateway::connect(&config.database)
        .await
        .context("failed to connect to database")?;
    ensure_schema(&gateway)
        .await
        .context("failed to create clue table")?;

    let repository = ClueRepository::new(gateway);
    let stored = repository
        .count_clues()
        .await
        .context("failed to read clue table")?;
    info!("Clue table ready with {} clues", stored);

    Ok(AppState::new(repository, ServiceInfo::from_config(config)))
}

/// Serve until Ctrl+C or SIGTERM, then close the pool
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    info!("Starting crossword API in {:?} mode", config.environment);

    let state = build_state(&config).await?;
    let app = app(state.clone(), &config);

    let bind_addr = config.api.bind_addr();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Crossword API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.repository().gateway().close().await;
    info!("Server shutdown complete");
    Ok(())
}

pub fn app(state: AppState, config: &AppConfig) -> Router {
    Router::new()
        // Public
        .route("/", get(handlers::public::root_get))
        .route("/healthcheck", get(handlers::public::healthcheck))
        .route("/healthcheck/ready", get(handlers::public::readiness))
        .route("/docs", get(handlers::public::docs_get))
        .merge(clue_routes())
        .with_state(state)
        // Global middleware
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
}

fn clue_routes() -> Router<AppState> {
    use handlers::clues;

    Router::new()
        .route("/clues", get(clues::clues_get).post(clues::clues_post))
        .route("/clues/:id", get(clues::clue_get))
}

/// Permissive in local/development. Elsewhere only the configured origins
/// are allowed, and none at all when the list is empty.
fn cors_layer(config: &AppConfig) -> CorsLayer {
    if config.is_local_or_dev() {
        return CorsLayer::permissive();
    }

    let origins = &config.api.cors_origins;
    if origins.is_empty() {
        info!("No CORS origins configured; cross-origin requests are refused");
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
