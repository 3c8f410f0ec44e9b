//! Client configuration.

use std::time::Duration;

/// API origin used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Request timeout applied on native targets when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API origin without a trailing slash, e.g. `http://localhost:5000`.
    pub api_base_url: String,

    /// Per-request timeout. Ignored in the browser, where fetch has none.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl ClientConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        let api_base_url = api_base_url.into().trim().trim_end_matches('/').to_string();
        Self {
            api_base_url,
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
        }
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Read `EMS_API_URL` / `EMS_REQUEST_TIMEOUT_SECS` from the process environment.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Browsers have no environment; `EMS_API_URL` is baked in at build time.
    #[cfg(target_arch = "wasm32")]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| match key {
            "EMS_API_URL" => option_env!("EMS_API_URL").map(str::to_string),
            _ => None,
        })
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = lookup("EMS_API_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| {
                tracing::info!("EMS_API_URL not set; using {DEFAULT_API_URL}");
                DEFAULT_API_URL.to_string()
            });

        let timeout = match lookup("EMS_REQUEST_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(0) => None,
                Ok(secs) => Some(Duration::from_secs(secs)),
                Err(_) => {
                    tracing::warn!(value = %raw, "invalid EMS_REQUEST_TIMEOUT_SECS; using default");
                    Some(DEFAULT_REQUEST_TIMEOUT)
                }
            },
            None => Some(DEFAULT_REQUEST_TIMEOUT),
        };

        Self::new(base).with_request_timeout(timeout)
    }

    /// Link target for a stored receipt.
    ///
    /// Absolute URLs pass through; bare file names resolve against the API's
    /// `/uploads` directory.
    pub fn receipt_url(&self, receipt: &str) -> String {
        let receipt = receipt.trim();
        if receipt.starts_with("http://") || receipt.starts_with("https://") {
            receipt.to_string()
        } else {
            format!(
                "{}/uploads/{}",
                self.api_base_url,
                receipt.trim_start_matches('/')
            )
        }
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
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_to_local_api() {
        let config = ClientConfig::from_lookup(lookup(&[]));
        assert_eq!(config.api_base_url, "http://localhost:5000");
        assert_eq!(config.request_timeout, Some(DEFAULT_REQUEST_TIMEOUT));
    }

    #[test]
    fn reads_overrides_and_trims_slash() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("EMS_API_URL", "https://api.example.com/"),
            ("EMS_REQUEST_TIMEOUT_SECS", "5"),
        ]));
        assert_eq!(config.api_base_url, "https://api.example.com");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn zero_timeout_disables_it() {
        let config = ClientConfig::from_lookup(lookup(&[("EMS_REQUEST_TIMEOUT_SECS", "0")]));
        assert_eq!(config.request_timeout, None);
    }

    #[test]
    fn receipt_links() {
        let config = ClientConfig::default();
        assert_eq!(
            config.receipt_url("abc.png"),
            "http://localhost:5000/uploads/abc.png"
        );
        assert_eq!(
            config.receipt_url("https://cdn.example.com/r.pdf"),
            "https://cdn.example.com/r.pdf"
        );
    }
}
