use std::time::Duration;

use futures::future::BoxFuture;
use sqlx::any::AnyPoolOptions;
use sqlx::error::ErrorKind;
use sqlx::{AnyConnection, AnyPool};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::DatabaseConfig;

/// Store-level failures, classified so the layers above never see raw driver errors
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Data format error: {0}")]
    DataFormat(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Unsupported database URL: {0}")]
    UnsupportedBackend(String),

    #[error("Store error: {0}")]
    Store(String),
}

impl GatewayError {
    /// True for failures where retrying later might succeed
    pub fn is_unavailable(&self) -> bool {
        matches!(self, GatewayError::Unavailable(_) | GatewayError::Timeout(_))
    }
}

impl From<sqlx::Error> for GatewayError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) => {
                let message = db_err.message().to_string();
                match db_err.kind() {
                    ErrorKind::UniqueViolation | ErrorKind::ForeignKeyViolation => {
                        GatewayError::ConstraintViolation(message)
                    }
                    ErrorKind::NotNullViolation | ErrorKind::CheckViolation => {
                        GatewayError::DataFormat(message)
                    }
                    _ if db_err.code().map_or(false, |code| is_sqlite_busy(&code)) => {
                        GatewayError::Unavailable(message)
                    }
                    // SQLSTATE class 22: data exception (value too long, bad encoding...)
                    _ if db_err
                        .code()
                        .map_or(false, |code| code.len() == 5 && code.starts_with("22")) =>
                    {
                        GatewayError::DataFormat(message)
                    }
                    _ => GatewayError::Store(message),
                }
            }
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                GatewayError::DataFormat(err.to_string())
            }
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => GatewayError::Unavailable(err.to_string()),
            _ => GatewayError::Store(err.to_string()),
        }
    }
}

/// SQLITE_BUSY (5) and SQLITE_LOCKED (6), including their extended codes
fn is_sqlite_busy(code: &str) -> bool {
    code.parse::<i32>()
        .map_or(false, |code| matches!(code & 0xff, 5 | 6))
}

/// Relational engines the gateway knows how to bootstrap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Postgres,
    Sqlite,
}

impl Backend {
    pub fn from_url(database_url: &str) -> Result<Self, GatewayError> {
        let scheme = database_url.split(':').next().unwrap_or_default();
        match scheme {
            "postgres" | "postgresql" => Ok(Backend::Postgres),
            "sqlite" => Ok(Backend::Sqlite),
            _ => Err(GatewayError::UnsupportedBackend(redact(database_url))),
        }
    }
}

/// Strip credentials before a URL reaches a log line or error message
fn redact(database_url: &str) -> String {
    match url::Url::parse(database_url) {
        Ok(mut url) => {
            if url.password().is_some() {
                let _ = url.set_password(Some("***"));
            }
            url.into()
        }
        Err(_) => "<unparseable>".to_string(),
    }
}

/// Owns the connection pool and hands out scoped connections and transactions
#[derive(Clone)]
pub struct Gateway {
    pool: AnyPool,
    backend: Backend,
    operation_timeout: Duration,
}

impl Gateway {
    /// Build the pool for a `postgres://` or `sqlite:` URL
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, GatewayError> {
        sqlx::any::install_default_drivers();

        let backend = Backend::from_url(&config.url)?;
        let max_connections = match backend {
            Backend::Postgres => config.max_connections,
            // SQLite allows a single writer; one connection keeps the
            // duplicate check and the insert from interleaving.
            Backend::Sqlite => {
                if config.max_connections > 1 {
                    warn!(
                        "SQLite pool capped at 1 connection (configured {})",
                        config.max_connections
                    );
                }
                1
            }
        };

        let mut options = AnyPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(config.acquire_timeout());
        if backend == Backend::Sqlite {
            // An in-memory database lives only as long as its connection
            options = options.idle_timeout(None).max_lifetime(None);
        }
        let pool = options.connect(&config.url).await?;

        info!(
            "Created {:?} pool for {} (max_connections={})",
            backend,
            redact(&config.url),
            max_connections
        );

        Ok(Self {
            pool,
            backend,
            operation_timeout: config.operation_timeout(),
        })
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Run `f` inside a transaction: commit on `Ok`, roll back on `Err`.
    ///
    /// The operation timeout bounds `f` only. Once `f` has finished, the
    /// commit runs to completion so a reported timeout never hides a row
    /// that was actually written. The connection goes back to the pool on
    /// every exit path.
    pub async fn with_transaction<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: for<'c> FnOnce(&'c mut AnyConnection) -> BoxFuture<'c, Result<T, E>> + Send,
        T: Send,
        E: From<GatewayError> + Send,
    {
        let mut tx = self.pool.begin().await.map_err(GatewayError::from)?;

        let outcome = tokio::time::timeout(self.operation_timeout, f(&mut *tx)).await;
        match outcome {
            Ok(Ok(value)) => {
                tx.commit().await.map_err(GatewayError::from)?;
                Ok(value)
            }
            Ok(Err(err)) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!("Rollback failed: {}", rollback_err);
                }
                Err(err)
            }
            Err(_) => {
                warn!("Transaction timed out after {:?}", self.operation_timeout);
                if let Err(rollback_err) = tx.rollback().await {
                    warn!("Rollback failed: {}", rollback_err);
                }
                Err(GatewayError::Timeout(self.operation_timeout).into())
            }
        }
    }

    /// Run `f` on a pooled connection without opening a transaction
    pub async fn with_connection<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: for<'c> FnOnce(&'c mut AnyConnection) -> BoxFuture<'c, Result<T, E>> + Send,
        T: Send,
        E: From<GatewayError> + Send,
    {
        let work = async {
            let mut conn = self.pool.acquire().await.map_err(GatewayError::from)?;
            f(&mut *conn).await
        };

        match tokio::time::timeout(self.operation_timeout, work).await {
            Ok(result) => result,
            Err(_) => {
                warn!("Operation timed out after {:?}", self.operation_timeout);
                Err(GatewayError::Timeout(self.operation_timeout).into())
            }
        }
    }

    /// Pings the store to confirm connectivity
    pub async fn ping(&self) -> Result<(), GatewayError> {
        self.with_connection(|conn| {
            Box::pin(async move {
                sqlx::query("SELECT 1").execute(conn).await?;
                Ok(())
            })
        })
        .await
    }

    /// Close the pool (e.g., on shutdown)
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }
}
