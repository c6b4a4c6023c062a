//! Homework review API client

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::PracticumConfig;
use crate::io::HttpClient;
use crate::HomeworkBotError;

/// Source of homework status snapshots
#[async_trait]
pub trait HomeworkApi: Send + Sync + std::fmt::Debug {
    /// Fetch statuses changed since `timestamp` (Unix seconds). The body is
    /// returned as parsed JSON without any schema validation.
    async fn get_api_answer(&self, timestamp: i64) -> crate::Result<Value>;
}

/// Client for the Practicum `homework_statuses` endpoint
pub struct PracticumClient {
    endpoint: String,
    authorization: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl PracticumClient {
    pub fn new(config: &PracticumConfig, http: Arc<dyn HttpClient>) -> Self {
        tracing::debug!("Created PracticumClient for {}", config.endpoint);

        Self {
            endpoint: config.endpoint.clone(),
            authorization: format!("OAuth {}", config.token),
            http,
        }
    }
}

#[async_trait]
impl HomeworkApi for PracticumClient {
    #[tracing::instrument(skip(self))]
    async fn get_api_answer(&self, timestamp: i64) -> crate::Result<Value> {
        let from_date = timestamp.to_string();
        let response = self
            .http
            .get(
                &self.endpoint,
                &[("Authorization", self.authorization.as_str())],
                &[("from_date", from_date.as_str())],
            )
            .await
            .map_err(|e| HomeworkBotError::ApiRequest(e.to_string()))?;

        if response.status != 200 {
            tracing::debug!(
                "Non-200 response from {}: status={}",
                self.endpoint,
                response.status
            );
            return Err(HomeworkBotError::ApiResponseStatus(response.status));
        }

        let body: Value = serde_json::from_str(&response.body)?;
        Ok(body)
    }
}
