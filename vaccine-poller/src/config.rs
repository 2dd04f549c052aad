//! Runtime configuration read from the environment.

use std::path::PathBuf;
use std::time::Duration;

use crate::provider::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, ProviderConfig};
use crate::scheduler::{DEFAULT_CYCLE_DELAY, DEFAULT_STATE_DELAY, SchedulerConfig};

/// Directory for history tables.
pub const DATA_DIR_VAR: &str = "VACCINE_DATA_DIR";
/// Seconds to pause before each state's request.
pub const STATE_DELAY_VAR: &str = "VACCINE_STATE_DELAY_SECS";
/// Seconds to pause between full cycles.
pub const CYCLE_DELAY_VAR: &str = "VACCINE_CYCLE_DELAY_SECS";
/// HTTP request timeout in seconds.
pub const HTTP_TIMEOUT_VAR: &str = "VACCINE_HTTP_TIMEOUT_SECS";
/// Provider base URL.
pub const BASE_URL_VAR: &str = "VACCINE_BASE_URL";
/// Directory of saved status documents; enables offline mode.
pub const MOCK_DIR_VAR: &str = "VACCINE_MOCK_DIR";

/// Error from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {var}={value:?}: {reason}")]
pub struct ConfigError {
    var: &'static str,
    value: String,
    reason: String,
}

/// Poller configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollerConfig {
    /// Where history tables live.
    pub data_dir: PathBuf,
    /// Pause before each state's request.
    pub state_delay: Duration,
    /// Pause between full cycles.
    pub cycle_delay: Duration,
    /// HTTP request timeout in seconds.
    pub http_timeout_secs: u64,
    /// Provider base URL.
    pub base_url: String,
    /// Serve saved documents from here instead of the live provider.
    pub mock_dir: Option<PathBuf>,
}

impl PollerConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for
    /// unset or empty variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(dir) = get(DATA_DIR_VAR) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(value) = get(STATE_DELAY_VAR) {
            config.state_delay = Duration::from_secs(parse_secs(STATE_DELAY_VAR, &value)?);
        }
        if let Some(value) = get(CYCLE_DELAY_VAR) {
            config.cycle_delay = Duration::from_secs(parse_secs(CYCLE_DELAY_VAR, &value)?);
        }
        if let Some(value) = get(HTTP_TIMEOUT_VAR) {
            let secs = parse_secs(HTTP_TIMEOUT_VAR, &value)?;
            if secs == 0 {
                return Err(ConfigError {
                    var: HTTP_TIMEOUT_VAR,
                    value,
                    reason: "timeout must be positive".to_string(),
                });
            }
            config.http_timeout_secs = secs;
        }
        if let Some(url) = get(BASE_URL_VAR) {
            config.base_url = url;
        }
        config.mock_dir = get(MOCK_DIR_VAR).map(PathBuf::from);

        Ok(config)
    }

    /// Set the data directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set both loop delays.
    pub fn with_delays(mut self, state_delay: Duration, cycle_delay: Duration) -> Self {
        self.state_delay = state_delay;
        self.cycle_delay = cycle_delay;
        self
    }

    /// Configuration for the HTTP client.
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig::new()
            .with_base_url(&self.base_url)
            .with_timeout(self.http_timeout_secs)
    }

    /// Configuration for the poll loop.
    pub fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            state_delay: self.state_delay,
            cycle_delay: self.cycle_delay,
        }
    }
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            state_delay: DEFAULT_STATE_DELAY,
            cycle_delay: DEFAULT_CYCLE_DELAY,
            http_timeout_secs: DEFAULT_TIMEOUT_SECS,
            base_url: DEFAULT_BASE_URL.to_string(),
            mock_dir: None,
        }
    }
}

/// `data/` next to the executable, or relative to the working directory
/// if the executable's location is unknown.
pub fn default_data_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("data")))
        .unwrap_or_else(|| PathBuf::from("data"))
}

fn parse_secs(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|e: std::num::ParseIntError| ConfigError {
        var,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
