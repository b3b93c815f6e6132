use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

use crate::error::{CycleError, SchemaError};

/// Anything that can answer "what changed since `from_date`".
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch(&self, from_date: i64) -> Result<Value, CycleError>;
}

/// Client for the homework status endpoint.
pub struct PracticumClient {
    client: reqwest::Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    pub fn new(
        client: reqwest::Client,
        endpoint: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            token: token.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// One GET against the endpoint. Only a 200 response is accepted.
    pub async fn get_api_answer(&self, from_date: i64) -> Result<Value, CycleError> {
        debug!(endpoint = %self.endpoint, from_date, "Polling homework statuses");

        let response = self
            .client
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(CycleError::Protocol(status.as_u16()));
        }

        let body = response.text().await?;
        let value = serde_json::from_str(&body).map_err(SchemaError::InvalidJson)?;
        Ok(value)
    }
}

#[async_trait]
impl StatusSource for PracticumClient {
    async fn fetch(&self, from_date: i64) -> Result<Value, CycleError> {
        self.get_api_answer(from_date).await
    }
}
