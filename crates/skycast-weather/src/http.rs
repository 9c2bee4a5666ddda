//! Shared HTTP plumbing for the provider clients.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::ProviderError;

/// Default per-request deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("SkyCast/", env!("CARGO_PKG_VERSION"));

/// Base URL, credential and a timeout-bound reqwest client.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        api_key: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.unwrap_or_default().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn encoded_key(&self) -> String {
        urlencoding::encode(&self.api_key).into_owned()
    }

    /// GET `path_and_query` relative to the base URL and decode the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path_and_query: &str,
    ) -> Result<T, ProviderError> {
        let url = format!("{}{}", self.base_url, path_and_query);
        let response = self.client.get(&url).send().await?;
        handle_response(response).await
    }
}

/// Classify the status, then decode the body strictly.
async fn handle_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ProviderError> {
    let status = response.status();

    if status.is_success() {
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    } else {
        let text = response.text().await.unwrap_or_default();
        tracing::debug!("Provider returned status {}: {}", status, text);
        Err(ProviderError::from_status(status.as_u16(), text))
    }
}
