//! Search configuration.

use std::time::Duration;

use anyhow::Context;

pub const API_URL_ENV: &str = "BUNDLEPICK_API_URL";
pub const API_KEY_ENV: &str = "BUNDLEPICK_API_KEY";
pub const PAGE_SIZE_ENV: &str = "BUNDLEPICK_PAGE_SIZE";
pub const DEBOUNCE_MS_ENV: &str = "BUNDLEPICK_DEBOUNCE_MS";

pub const DEFAULT_API_URL: &str = "https://stageapi.monkcommerce.app/task";
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Base URL; `/products/search` is appended.
    pub base_url: String,
    /// Sent as the `x-api-key` header.
    pub api_key: String,
    pub page_size: u32,
    /// Quiet period before typed search text triggers a fetch.
    pub debounce: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            api_key: String::new(),
            page_size: DEFAULT_PAGE_SIZE,
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

impl SearchConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Read configuration from the environment, falling back to defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let base_url = lookup(API_URL_ENV).unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let api_key = lookup(API_KEY_ENV).unwrap_or_else(|| {
            tracing::warn!("{API_KEY_ENV} not set; catalog requests will be sent without an API key");
            String::new()
        });

        let page_size = match lookup(PAGE_SIZE_ENV) {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .with_context(|| format!("{PAGE_SIZE_ENV} must be a positive integer, got {raw:?}"))?,
            None => DEFAULT_PAGE_SIZE,
        };
        anyhow::ensure!(page_size > 0, "{PAGE_SIZE_ENV} must be greater than zero");

        let debounce = match lookup(DEBOUNCE_MS_ENV) {
            Some(raw) => Duration::from_millis(
                raw.trim()
                    .parse::<u64>()
                    .with_context(|| format!("{DEBOUNCE_MS_ENV} must be milliseconds, got {raw:?}"))?,
            ),
            None => DEFAULT_DEBOUNCE,
        };

        Ok(Self {
            base_url,
            api_key,
            page_size,
            debounce,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = SearchConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.debounce, Duration::from_millis(1000));
        assert!(config.api_key.is_empty());
    }

    #[test]
    fn reads_overrides() {
        let config = SearchConfig::from_lookup(lookup(&[
            (API_URL_ENV, "http://localhost:9000"),
            (API_KEY_ENV, "secret"),
            (PAGE_SIZE_ENV, " 25 "),
            (DEBOUNCE_MS_ENV, "250"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.debounce, Duration::from_millis(250));
    }

    #[test]
    fn rejects_bad_numbers() {
        let err = SearchConfig::from_lookup(lookup(&[(PAGE_SIZE_ENV, "ten")])).unwrap_err();
        assert!(err.to_string().contains(PAGE_SIZE_ENV));
        assert!(SearchConfig::from_lookup(lookup(&[(PAGE_SIZE_ENV, "0")])).is_err());
        assert!(SearchConfig::from_lookup(lookup(&[(DEBOUNCE_MS_ENV, "-1")])).is_err());
    }
}
