//! Vaccine status HTTP client.

use std::time::Duration;

use tracing::debug;

use crate::domain::{AvailabilitySnapshot, PollTimestamp, StateCode};

use super::AvailabilitySource;
use super::convert::convert_response;
use super::error::FetchError;
use super::types::VaccineStatusResponse;

/// Default base URL for the provider's vaccine status feed.
pub const DEFAULT_BASE_URL: &str =
    "https://www.cvs.com/immunizations/covid-19-vaccine/immunizations";

/// Default request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the provider client.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ProviderConfig {
    /// Create a config pointing at the public provider.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the per-state vaccine status endpoint.
#[derive(Debug, Clone)]
pub struct ProviderClient {
    http: reqwest::Client,
    base_url: String,
}

impl ProviderClient {
    /// Create a new provider client.
    pub fn new(config: ProviderConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("vaccine-poller/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL of the status document for `state`.
    pub fn status_url(&self, state: StateCode) -> String {
        format!(
            "{}/covid-19-vaccine.vaccine-status.{}.json?vaccineinfo",
            self.base_url,
            state.to_lowercase()
        )
    }

    /// Fetch and parse the raw status document for `state`.
    pub async fn fetch_raw(&self, state: StateCode) -> Result<VaccineStatusResponse, FetchError> {
        let url = self.status_url(state);
        debug!(%state, %url, "fetching vaccine status");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| FetchError::json(e, &body))
    }
}

impl AvailabilitySource for ProviderClient {
    async fn fetch(&self, state: StateCode) -> Result<AvailabilitySnapshot, FetchError> {
        let response = self.fetch_raw(state).await?;
        convert_response(&response, state, PollTimestamp::now())
    }
}
