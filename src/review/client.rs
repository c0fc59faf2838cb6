use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::config::ReviewApiConfig;
use crate::error::BotError;
use crate::review::ReviewApi;

/// HTTP client for the homework statuses endpoint.
pub struct ApiClient {
    client: reqwest::Client,
    endpoint: String,
    token: String,
}

impl ApiClient {
    pub fn new(config: &ReviewApiConfig, token: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .context("Failed to build review API HTTP client")?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            token: token.into(),
        })
    }

    fn connection_failure(&self, source: reqwest::Error) -> BotError {
        error!("Request to {} failed: {}", self.endpoint, source);
        BotError::ConnectionFailure {
            endpoint: self.endpoint.clone(),
            source,
        }
    }
}

#[async_trait]
impl ReviewApi for ApiClient {
    async fn fetch(&self, cursor: i64) -> Result<Value, BotError> {
        info!(
            "Requesting homework statuses from {} (from_date={})",
            self.endpoint, cursor
        );

        let response = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", cursor)])
            .send()
            .await
            .map_err(|e| self.connection_failure(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.connection_failure(e))?;

        if !status.is_success() {
            error!("Review API returned {}: {}", status, body);
            return Err(BotError::UnexpectedResponseStatus {
                status: status.as_u16(),
                body,
            });
        }

        debug!("Review API answered with {} bytes", body.len());

        serde_json::from_str(&body).map_err(|e| {
            error!("Review API body is not JSON ({}): {}", e, body);
            BotError::MalformedPayload(e)
        })
    }
}
