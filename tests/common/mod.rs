use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossword_api::config::AppConfig;
use crossword_api::server;
use reqwest::StatusCode;

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
}

impl TestServer {
    /// Start the router in-process against a fresh in-memory database.
    /// Each call gets its own port and its own empty store.
    pub async fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut config = AppConfig::in_memory();
        config.api.port = port;

        let state = server::build_state(&config).await?;
        let app = server::app(state, &config);
        let listener = tokio::net::TcpListener::bind(config.api.bind_addr())
            .await
            .context("failed to bind test listener")?;

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let server = Self { port, base_url };
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = client.get(self.url("/healthcheck")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}
