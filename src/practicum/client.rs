use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

use super::error::ApiError;

pub const API_URL: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Anything that can answer "which homeworks changed since `from_date`".
pub trait HomeworkSource {
    async fn homework_statuses(&self, from_date: i64) -> Result<Value, ApiError>;
}

pub struct PracticumClient {
    token: String,
    client: Client,
    base_url: String,
}

impl PracticumClient {
    /// Create a client for `base_url` with explicit connect and total timeouts.
    pub fn new(
        token: String,
        base_url: String,
        connect_timeout: Duration,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            token,
            client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl HomeworkSource for PracticumClient {
    async fn homework_statuses(&self, from_date: i64) -> Result<Value, ApiError> {
        debug!(url = %self.base_url, from_date, "requesting homework statuses");

        let response = self
            .client
            .get(&self.base_url)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            return Err(ApiError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(ApiError::Decode)
    }
}
