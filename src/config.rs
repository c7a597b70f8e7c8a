//! Backend location and host settings.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every page talks to one backend origin. The SSR host resolves it from the
//! environment and renders it into the HTML shell; the hydrated client reads it
//! back from that `<meta>` tag, so both sides build requests against the same
//! base URL.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Backend origin used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

/// Environment variable read by the SSR host.
pub const API_BASE_URL_ENV: &str = "FOLIO_API_BASE_URL";

/// Name of the `<meta>` tag carrying the base URL into the browser.
pub const API_BASE_URL_META: &str = "folio-api-base-url";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("api base url is empty")]
    EmptyBaseUrl,

    #[error("api base url must start with http:// or https://: {0}")]
    UnsupportedScheme(String),
}

/// Client-side settings shared by every page through context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { api_base_url: DEFAULT_API_BASE_URL.to_owned() }
    }
}

impl ClientConfig {
    /// Build a config from a raw base URL.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the URL is blank or not http(s).
    pub fn new(raw_base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self { api_base_url: normalize_base_url(raw_base_url)? })
    }

    /// Read `FOLIO_API_BASE_URL`, falling back to [`DEFAULT_API_BASE_URL`].
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the variable is set to an invalid URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(API_BASE_URL_ENV) {
            Ok(raw) => Self::new(&raw),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Resolve the config for the current environment.
    ///
    /// In the browser this reads the `<meta>` tag written by the SSR shell;
    /// on the server it reads the environment. Invalid values fall back to the
    /// default with a warning.
    pub fn load() -> Self {
        #[cfg(feature = "hydrate")]
        {
            let raw = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|doc| doc.query_selector(&format!("meta[name=\"{API_BASE_URL_META}\"]")).ok().flatten())
                .and_then(|el| el.get_attribute("content"));
            match raw.as_deref().map(Self::new) {
                Some(Ok(config)) => config,
                Some(Err(e)) => {
                    log::warn!("ignoring api base url from shell: {e}");
                    Self::default()
                }
                None => Self::default(),
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Self::from_env().unwrap_or_else(|e| {
                log::warn!("ignoring {API_BASE_URL_ENV}: {e}");
                Self::default()
            })
        }
    }
}

/// Trim whitespace and trailing slashes and require an http(s) scheme.
///
/// # Errors
///
/// Returns a [`ConfigError`] for blank input or other schemes.
pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyBaseUrl);
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::UnsupportedScheme(trimmed.to_owned()));
    }
    Ok(trimmed.to_owned())
}
