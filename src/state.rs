//! Application state shared across handlers

use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::ClueRepository;

/// Static facts about the running service, reported by the public endpoints
#[derive(Debug, Clone)]
pub struct ServiceInfo {
    pub name: String,
    pub version: &'static str,
    pub environment: &'static str,
    pub docs_url: String,
}

impl ServiceInfo {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            name: config.api.name.clone(),
            version: env!("CARGO_PKG_VERSION"),
            environment: config.environment.as_str(),
            docs_url: config.api.docs_url.clone(),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    repository: ClueRepository,
    service: ServiceInfo,
}

impl AppState {
    pub fn new(repository: ClueRepository, service: ServiceInfo) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                repository,
                service,
            }),
        }
    }

    pub fn repository(&self) -> &ClueRepository {
        &self.inner.repository
    }

    pub fn service(&self) -> &ServiceInfo {
        &self.inner.service
    }
}
