use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::api::validation::CreateClueRequest;
use crate::database::models::Clue;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned {status}: {detail}")]
    Api { status: StatusCode, detail: String },
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Http(e) => e.status(),
            ClientError::Api { status, .. } => Some(*status),
        }
    }
}

/// Thin HTTP client for a running clue server
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn list_clues(&self) -> Result<Vec<Clue>, ClientError> {
        let res = self.http.get(self.url("/clues")).send().await?;
        decode(res).await
    }

    pub async fn get_clue(&self, id: i64) -> Result<Clue, ClientError> {
        let res = self.http.get(self.url(&format!("/clues/{}", id))).send().await?;
        decode(res).await
    }

    pub async fn create_clue(&self, request: &CreateClueRequest) -> Result<Clue, ClientError> {
        let res = self.http.post(self.url("/clues")).json(request).send().await?;
        decode(res).await
    }

    /// GET / - service metadata
    pub async fn info(&self) -> Result<Value, ClientError> {
        let res = self.http.get(self.url("/")).send().await?;
        decode(res).await
    }

    /// GET /healthcheck - liveness payload
    pub async fn health(&self) -> Result<Value, ClientError> {
        let res = self.http.get(self.url("/healthcheck")).send().await?;
        decode(res).await
    }

    /// GET /healthcheck/ready - a 503 is an answer here, not a failure
    pub async fn ready(&self) -> Result<(StatusCode, Value), ClientError> {
        let res = self.http.get(self.url("/healthcheck/ready")).send().await?;
        let status = res.status();
        let body = res.json::<Value>().await?;
        Ok((status, body))
    }
}

/// Decode a success body, or turn an error body's `detail` into `ClientError::Api`
async fn decode<T: DeserializeOwned>(res: reqwest::Response) -> Result<T, ClientError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res.json::<T>().await?);
    }

    let detail = match res.json::<Value>().await {
        Ok(body) => body
            .get("detail")
            .and_then(|d| d.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| body.to_string()),
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    };

    Err(ClientError::Api { status, detail })
}
