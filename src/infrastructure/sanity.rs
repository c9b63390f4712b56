//! Sanity client for content queries

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::outbound::{
    CacheMode, ContentQueryPort, FetchError, FetchOptions, QueryParams,
};
use crate::infrastructure::config::{ConfigurationError, ContentConfig};

const LIVE_HOST: &str = "api.sanity.io";
const CDN_HOST: &str = "apicdn.sanity.io";

/// Client for the Sanity query API
///
/// Created once at startup and shared read-only across requests.
pub struct SanityClient {
    client: Client,
    project_id: String,
    dataset: String,
    api_version: String,
    api_host: Option<String>,
    default_cache: CacheMode,
}

impl SanityClient {
    pub fn new(config: &ContentConfig) -> Result<Self, ConfigurationError> {
        let project_id = required(&config.project_id, "SANITY_PROJECT_ID")?;
        let dataset = required(&config.dataset, "SANITY_DATASET")?;
        let api_version = required(&config.api_version, "SANITY_API_VERSION")?;

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ConfigurationError::Invalid {
                key: "CONTENT_REQUEST_TIMEOUT_SECS",
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            project_id,
            dataset,
            api_version: api_version.trim_start_matches('v').to_string(),
            api_host: config.api_host.clone(),
            default_cache: config.cache_mode,
        })
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn dataset(&self) -> &str {
        &self.dataset
    }

    /// Endpoint for a query under the given cache mode
    ///
    /// A configured API host serves both modes.
    pub fn query_url(&self, cache: CacheMode) -> String {
        let base = match &self.api_host {
            Some(host) => host.clone(),
            None => {
                let host = match cache {
                    CacheMode::Cdn => CDN_HOST,
                    CacheMode::NoStore => LIVE_HOST,
                };
                format!("https://{}.{}", self.project_id, host)
            }
        };
        format!("{}/v{}/data/query/{}", base, self.api_version, self.dataset)
    }

    /// URL query pairs: the GROQ text plus `$name` bindings as JSON
    fn query_pairs(query: &str, params: &QueryParams) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(1 + params.len());
        pairs.push(("query".to_string(), query.to_string()));
        for (name, value) in params.iter() {
            pairs.push((format!("${}", name), value.to_string()));
        }
        pairs
    }

    /// Execute a query against the API
    pub async fn fetch(
        &self,
        query: &str,
        params: &QueryParams,
        options: FetchOptions,
    ) -> Result<serde_json::Value, FetchError> {
        let cache = options.cache.unwrap_or(self.default_cache);
        let started = std::time::Instant::now();

        let response = self
            .client
            .get(self.query_url(cache))
            .query(&Self::query_pairs(query, params))
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Content query rejected");
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: QueryResponse = response.json().await.map_err(map_request_error)?;
        tracing::debug!(
            cache = ?cache,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Content query completed"
        );
        Ok(envelope.result)
    }
}

fn required(value: &Option<String>, key: &'static str) -> Result<String, ConfigurationError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(ConfigurationError::Missing(key))
}

fn map_request_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_decode() {
        FetchError::Decode(error.to_string())
    } else {
        FetchError::Transport(error.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: serde_json::Value,
}

// =============================================================================
// ContentQueryPort Implementation
// =============================================================================

#[async_trait]
impl ContentQueryPort for SanityClient {
    async fn query(
        &self,
        query: &str,
        params: &QueryParams,
        options: FetchOptions,
    ) -> Result<serde_json::Value, FetchError> {
        self.fetch(query, params, options).await
    }
}
