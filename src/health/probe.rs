//! Reachability probes for external dependencies.
//!
//! A probe answers one question: can this process reach the dependency right
//! now? Timeouts and logging are the caller's business, see
//! [`DependencyCheck`](super::DependencyCheck).

use async_trait::async_trait;
use sqlx::PgPool;

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

#[async_trait]
pub trait Probe: Send + Sync {
    async fn can_connect(&self) -> Result<bool, ProbeError>;
}

/// Runs `SELECT 1` against the pool.
pub struct PgProbe {
    pool: PgPool,
}

impl PgProbe {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Probe for PgProbe {
    #[tracing::instrument(name = "Probe database", skip(self))]
    async fn can_connect(&self) -> Result<bool, ProbeError> {
        sqlx::query("SELECT 1 as health_check")
            .execute(&self.pool)
            .await?;
        Ok(true)
    }
}

/// Issues a `GET` and treats any 2xx as reachable.
pub struct HttpProbe {
    client: reqwest::Client,
    url: String,
}

impl HttpProbe {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl Probe for HttpProbe {
    #[tracing::instrument(name = "Probe http dependency", skip(self), fields(url = %self.url))]
    async fn can_connect(&self) -> Result<bool, ProbeError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Dependency answered with non-success status");
        }
        Ok(status.is_success())
    }
}
