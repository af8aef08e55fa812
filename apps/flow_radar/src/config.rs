use std::env;
use std::time::Duration;

pub struct ProviderConfig {
    pub yahoo_base_url: String,
    pub coingecko_base_url: String,
    pub coingecko_api_key: Option<String>,
    pub timeout: Duration,
}

impl ProviderConfig {
    /// Reads optional overrides from the environment (after `.env` has been loaded).
    pub fn from_env(timeout: Duration) -> Self {
        Self::from_lookup(|key| env::var(key).ok(), timeout)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>, timeout: Duration) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            yahoo_base_url: non_empty("YAHOO_BASE_URL")
                .unwrap_or_else(|| radar_yahoo::BASE_URL.to_string()),
            coingecko_base_url: non_empty("COINGECKO_BASE_URL")
                .unwrap_or_else(|| radar_coingecko::BASE_URL.to_string()),
            coingecko_api_key: non_empty("COINGECKO_API_KEY"),
            timeout,
        }
    }
}
