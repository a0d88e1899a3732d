//! HTTP client for the third-party places provider.
//!
//! All lookups are keyed by street address and pass through the shared
//! [`ResponseCache`]; every method reports whether the response came from
//! cache so handlers can surface it in response metadata.

use std::sync::Arc;
use std::time::Duration;

use focal_core::scoring::{self, LifeHereScore, SubScores};

use crate::cache::ResponseCache;
use crate::types::{PlaceCategory, ProviderSubScores};

/// Per-request timeout against the provider.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Connection settings for the places provider.
#[derive(Debug, Clone)]
pub struct PlacesProviderConfig {
    /// Base HTTP URL, e.g. `https://places.example.com/v2`.
    pub base_url: String,
    /// Provider API key, sent as a query parameter.
    pub api_key: String,
}

impl PlacesProviderConfig {
    /// Load from `PLACES_PROVIDER_URL` and `PLACES_PROVIDER_KEY`.
    ///
    /// Returns `None` when either variable is missing, signalling that the
    /// location endpoints should report the provider as unavailable.
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var("PLACES_PROVIDER_URL").ok()?;
        let api_key = std::env::var("PLACES_PROVIDER_KEY").ok()?;
        Some(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

/// Errors from the places provider layer.
#[derive(Debug, thiserror::Error)]
pub enum PlacesError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("Places provider error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// A provider response together with its cache provenance.
#[derive(Debug, Clone)]
pub struct CachedResponse {
    pub data: serde_json::Value,
    /// True when the response was served from the shared cache.
    pub cached: bool,
}

/// Cached HTTP client for the places provider.
pub struct PlacesClient {
    client: reqwest::Client,
    config: PlacesProviderConfig,
    cache: Arc<ResponseCache>,
}

impl PlacesClient {
    /// Create a client sharing the given response cache.
    pub fn new(
        config: PlacesProviderConfig,
        cache: Arc<ResponseCache>,
    ) -> Result<Self, PlacesError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            config,
            cache,
        })
    }

    /// Fetch place listings (dining, events, or attractions) near an address.
    pub async fn listings(
        &self,
        category: PlaceCategory,
        address: &str,
    ) -> Result<CachedResponse, PlacesError> {
        let key = format!("{}:{}", category.as_str(), address);
        if let Some(data) = self.cache.get(&key).await {
            return Ok(CachedResponse { data, cached: true });
        }

        let data = self.fetch(category.as_str(), address).await?;
        self.cache.insert(key, data.clone()).await;
        Ok(CachedResponse {
            data,
            cached: false,
        })
    }

    /// Compute the Life Here Score for an address.
    ///
    /// Fetches raw sub-scores from the provider (cached like listings) and
    /// folds them through the static weighting formula.
    pub async fn life_here_score(
        &self,
        address: &str,
    ) -> Result<(LifeHereScore, bool), PlacesError> {
        let key = format!("scores:{address}");
        let (raw, cached) = match self.cache.get(&key).await {
            Some(data) => (data, true),
            None => {
                let data = self.fetch("scores", address).await?;
                self.cache.insert(key, data.clone()).await;
                (data, false)
            }
        };

        let provider: ProviderSubScores =
            serde_json::from_value(raw).map_err(|e| PlacesError::ApiError {
                status: 502,
                body: format!("Malformed sub-score payload: {e}"),
            })?;

        let score = scoring::life_here_score(SubScores {
            dining: provider.dining,
            commute: provider.commute,
            convenience: provider.convenience,
            lifestyle: provider.lifestyle,
        });
        Ok((score, cached))
    }

    /// Execute one provider GET, returning the parsed JSON body.
    async fn fetch(&self, path: &str, address: &str) -> Result<serde_json::Value, PlacesError> {
        let response = self
            .client
            .get(format!("{}/{}", self.config.base_url, path))
            .query(&[("address", address), ("key", &self.config.api_key)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(PlacesError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }
}
