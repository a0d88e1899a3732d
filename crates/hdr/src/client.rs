//! REST client for the HDR worker HTTP endpoints.

use std::time::Duration;

use crate::types::{FusionRequest, FusionStatus, FusionSubmitted};

/// Default per-request timeout against the worker.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the HDR worker, loaded from the environment.
#[derive(Debug, Clone)]
pub struct HdrWorkerConfig {
    /// Base HTTP URL, e.g. `http://gpu-worker:9090`.
    pub base_url: String,
    /// Optional bearer token attached to every request.
    pub auth_token: Option<String>,
}

impl HdrWorkerConfig {
    /// Load from `HDR_WORKER_URL` and `HDR_WORKER_TOKEN`.
    ///
    /// Returns `None` if `HDR_WORKER_URL` is not set, signalling that HDR
    /// dispatch is disabled (retries will still reset job state).
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var("HDR_WORKER_URL").ok()?;
        Some(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token: std::env::var("HDR_WORKER_TOKEN").ok(),
        })
    }
}

/// Errors from the HDR worker API layer.
#[derive(Debug, thiserror::Error)]
pub enum HdrClientError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The worker returned a non-2xx status code.
    #[error("HDR worker error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// HTTP client for the external HDR fusion worker.
pub struct HdrClient {
    client: reqwest::Client,
    config: HdrWorkerConfig,
}

impl HdrClient {
    /// Create a client for the configured worker.
    pub fn new(config: HdrWorkerConfig) -> Result<Self, HdrClientError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client, config })
    }

    /// Submit a bracket-fusion job.
    ///
    /// Sends `POST /fusions` and returns the worker-assigned reference and
    /// queue position.
    pub async fn submit_fusion(
        &self,
        request: &FusionRequest,
    ) -> Result<FusionSubmitted, HdrClientError> {
        let response = self
            .authorized(self.client.post(format!("{}/fusions", self.config.base_url)))
            .json(request)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Poll the status of a previously submitted fusion.
    ///
    /// Sends `GET /fusions/{worker_ref}`.
    pub async fn fetch_status(&self, worker_ref: &str) -> Result<FusionStatus, HdrClientError> {
        let response = self
            .authorized(self.client.get(format!(
                "{}/fusions/{}",
                self.config.base_url, worker_ref
            )))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Attach the bearer token when one is configured.
    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Ensure the response has a success status code. Returns the response
    /// unchanged on success, or an [`HdrClientError::ApiError`] containing
    /// the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, HdrClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(HdrClientError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, HdrClientError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
