//! HTTP client construction.

use reqwest::Client;
use std::time::Duration;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::{BinderError, Result};

/// Build the single client shared by every stage of a run.
pub fn create_client<C: ConfigProvider>(config: &C) -> Result<Client> {
    Client::builder()
        .user_agent(config.user_agent())
        .timeout(Duration::from_secs(config.timeout_secs()))
        .build()
        .map_err(|e| BinderError::ConfigValidationError {
            field: "http_client".to_string(),
            message: e.to_string(),
        })
}

/// GET a page and return its body, treating non-2xx statuses as unavailable.
pub async fn fetch_text(client: &Client, url: &str, query: &[(&str, &str)]) -> Result<String> {
    let response = client
        .get(url)
        .query(query)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| BinderError::upstream(url, e))?;

    tracing::debug!("GET {} -> {}", response.url(), response.status());

    response
        .text()
        .await
        .map_err(|e| BinderError::upstream(url, e))
}
