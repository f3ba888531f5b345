//! Configuration types.

use std::time::Duration;

use crate::error::ConfigError;

/// Default API prefix of the growth service.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api/v1";

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base path every endpoint is appended to (no trailing slash).
    pub api_base_url: String,
    /// Per-request timeout applied by the HTTP transport.
    pub request_timeout: Duration,
    /// Pause between a successful onboarding and the switch to the roadmap page.
    pub redirect_delay: Duration,
    /// Timeline used when the user regenerates the roadmap by hand.
    pub regenerate_months: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            redirect_delay: Duration::from_millis(2000),
            regenerate_months: 12,
        }
    }
}

impl ClientConfig {
    /// Load from `DELTA_*` environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_base_url = lookup("DELTA_API_BASE_URL")
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.api_base_url);

        reqwest::Url::parse(&api_base_url).map_err(|e| ConfigError::InvalidValue {
            key: "DELTA_API_BASE_URL".to_string(),
            message: format!("{api_base_url}: {e}"),
        })?;

        let request_timeout = lookup("DELTA_REQUEST_TIMEOUT_SECS")
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        let redirect_delay = lookup("DELTA_REDIRECT_DELAY_MS")
            .and_then(|s| s.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.redirect_delay);

        let regenerate_months: u32 = lookup("DELTA_REGENERATE_MONTHS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.regenerate_months);
        if regenerate_months == 0 {
            return Err(ConfigError::InvalidValue {
                key: "DELTA_REGENERATE_MONTHS".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            api_base_url,
            request_timeout,
            redirect_delay,
            regenerate_months,
        })
    }
}
