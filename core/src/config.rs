//! Client configuration.

use std::fmt;

use crate::error::{ApiError, Result};

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.goshippo.com/v1";

/// Items requested per list page.
pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Environment variable holding the private API token.
pub const TOKEN_ENV: &str = "SHIPPO_PRIVATE_TOKEN";

/// Environment variable overriding the API root.
pub const BASE_URL_ENV: &str = "SHIPPO_API_BASE_URL";

/// Configuration for a `ShippoClient`.
///
/// # Example
///
/// ```
/// use shippo_core::ClientConfig;
///
/// let config = ClientConfig::new("shippo_test_token")
///     .with_base_url("http://localhost:3000/v1/")
///     .with_max_pages(100);
/// assert_eq!(config.base_url, "http://localhost:3000/v1");
/// ```
#[derive(Clone)]
pub struct ClientConfig {
    /// Private API token sent as `Authorization: ShippoToken <token>`.
    pub token: String,
    /// API root every request path is appended to, without a trailing `/`.
    pub base_url: String,
    /// Value of the `results` query parameter on list requests.
    pub page_size: usize,
    /// Upper bound on pages fetched by one list call. `None` follows `next`
    /// links for as long as the server returns them.
    pub max_pages: Option<usize>,
}

impl ClientConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: None,
        }
    }

    /// Build a configuration from `SHIPPO_PRIVATE_TOKEN` and, if set,
    /// `SHIPPO_API_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var(TOKEN_ENV)
            .ok()
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ApiError::Config(format!("{TOKEN_ENV} is not set")))?;

        let config = Self::new(token);
        Ok(match std::env::var(BASE_URL_ENV) {
            Ok(base_url) if !base_url.is_empty() => config.with_base_url(base_url),
            _ => config,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = Some(max_pages);
        self
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("page_size", &self.page_size)
            .field("max_pages", &self.max_pages)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::new("token");
        assert_eq!(config.base_url, "https://api.goshippo.com/v1");
        assert_eq!(config.page_size, 25);
        assert!(config.max_pages.is_none());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let config = ClientConfig::new("token").with_base_url("https://api.test/v1/");
        assert_eq!(config.base_url, "https://api.test/v1");
    }

    // No other test reads these variables.
    #[test]
    fn from_env_requires_token() {
        std::env::remove_var(TOKEN_ENV);
        std::env::remove_var(BASE_URL_ENV);
        assert!(matches!(ClientConfig::from_env(), Err(ApiError::Config(_))));

        std::env::set_var(TOKEN_ENV, "shippo_test_env");
        std::env::set_var(BASE_URL_ENV, "http://localhost:3000/v1/");
        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.token, "shippo_test_env");
        assert_eq!(config.base_url, "http://localhost:3000/v1");

        std::env::remove_var(TOKEN_ENV);
        std::env::remove_var(BASE_URL_ENV);
    }

    #[test]
    fn debug_redacts_token() {
        let config = ClientConfig::new("shippo_live_secret");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("shippo_live_secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
