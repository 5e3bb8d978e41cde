//! Shared HTTP plumbing for provider adapters.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::{Duration, Instant};

use crate::config::EndpointConfig;
use crate::observability::metrics;
use crate::providers::types::{ProviderError, ProviderResult};
use crate::resilience::with_timeout;

/// A JSON-over-HTTP endpoint with a fixed deadline per call.
#[derive(Debug, Clone)]
pub struct HttpEndpoint {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
    label: &'static str,
}

impl HttpEndpoint {
    pub fn new(label: &'static str, endpoint: &EndpointConfig, user_agent: &str) -> ProviderResult<Self> {
        let timeout = Duration::from_secs(endpoint.timeout_secs);
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: endpoint.base_url.trim_end_matches('/').to_string(),
            timeout,
            label,
        })
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET {base}{path}?{query}` decoded as JSON.
    pub async fn get_json<Q, T>(&self, path: &str, query: &Q) -> ProviderResult<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.get(self.url(path)).query(query);
        self.execute(request).await
    }

    /// `POST {base}{path}` with a form body, decoded as JSON.
    pub async fn post_form_json<F, T>(&self, path: &str, form: &F) -> ProviderResult<T>
    where
        F: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.post(self.url(path)).form(form);
        self.execute(request).await
    }

    async fn execute<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> ProviderResult<T> {
        let start = Instant::now();
        let result = with_timeout(self.timeout, async {
            let response = request.send().await?.error_for_status()?;
            Ok::<T, ProviderError>(response.json::<T>().await?)
        })
        .await;

        match &result {
            Ok(_) => metrics::record_provider_call(self.label, "ok", start),
            Err(ProviderError::Timeout(_)) => {
                tracing::warn!(provider = self.label, timeout = ?self.timeout, "Provider call timed out");
                metrics::record_provider_call(self.label, "timeout", start);
            }
            Err(e) => {
                tracing::warn!(provider = self.label, error = %e, "Provider call failed");
                metrics::record_provider_call(self.label, "error", start);
            }
        }
        result
    }
}
