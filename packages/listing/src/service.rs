//! Compile-time listing provider configuration.
//!
//! The provider is defined in a TOML file under `services/`, embedded at
//! compile time and parsed on first use.

use std::time::Duration;

use serde::Deserialize;

/// A listing provider configuration loaded from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingService {
    /// Unique identifier (e.g., `"zillow"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Search-by-address endpoint.
    pub base_url: String,
    /// Value of the `x-rapidapi-host` header.
    pub rapidapi_host: String,
    /// Environment variable holding the `RapidAPI` key.
    pub api_key_env: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

const fn default_timeout_secs() -> u64 {
    5
}

impl ListingService {
    /// Per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Reads the API key from the configured environment variable.
    #[must_use]
    pub fn api_key_from_env(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

const ZILLOW_TOML: &str = include_str!("../services/zillow.toml");

/// Returns the Zillow provider configuration.
///
/// # Panics
///
/// Panics if the embedded TOML is malformed (the file is fixed at compile
/// time, so this is covered by the unit tests).
#[must_use]
pub fn zillow() -> ListingService {
    toml::de::from_str(ZILLOW_TOML)
        .unwrap_or_else(|e| panic!("Failed to parse listing service 'zillow': {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_zillow_service() {
        let svc = zillow();
        assert_eq!(svc.id, "zillow");
        assert!(!svc.name.is_empty());
        assert!(svc.base_url.starts_with("https://"));
        assert!(!svc.rapidapi_host.is_empty());
        assert_eq!(svc.api_key_env, "RAPIDAPI_KEY");
    }

    #[test]
    fn timeout_is_bounded() {
        let timeout = zillow().timeout();
        assert!(timeout > Duration::ZERO);
        assert!(timeout <= Duration::from_secs(30));
    }

    #[test]
    fn timeout_defaults_when_omitted() {
        let svc: ListingService = toml::de::from_str(
            r#"
            id = "test"
            name = "Test"
            base_url = "http://localhost"
            rapidapi_host = "localhost"
            api_key_env = "TEST_KEY"
            "#,
        )
        .unwrap();
        assert_eq!(svc.timeout_secs, 5);
    }
}
