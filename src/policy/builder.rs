//! Builder pattern implementation for creating [`Policy`] instances.
//!
//! # Examples
//!
//! ```rust
//! use spelunk::policy::PolicyBuilder;
//! use std::time::Duration;
//!
//! # fn example() -> spelunk::Result<()> {
//! let policy = PolicyBuilder::new()
//!     .proxy("127.0.0.1:9050")
//!     .timeout(Duration::from_secs(30))
//!     .max_megabytes(20)
//!     .allowed_extensions_csv("pdf,zip")
//!     .max_files(100)
//!     .max_depth(3)
//!     .build()?;
//! assert_eq!(policy.proxy(), Some("socks5h://127.0.0.1:9050"));
//! # Ok(())
//! # }
//! ```

use super::config::{normalize_extension, parse_extension_list, Policy};
use crate::error::{Error, Result};
use crate::http::normalize_proxy_endpoint;

use reqwest::header::HeaderValue;
use std::time::Duration;

/// A builder used to create a [`Policy`].
///
/// Every option starts at its documented default; see the constants in
/// [`crate::policy`].
#[derive(Debug, Default, Clone)]
pub struct PolicyBuilder {
    config: Policy,
}

impl PolicyBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        PolicyBuilder::default()
    }

    /// Sets the forward proxy endpoint.
    ///
    /// Accepts `socks5h://`, `socks5://`, `socks4://`, `socks4a://`, `http://`
    /// and `https://` URLs. A bare `host:port` is treated as `socks5h://`.
    /// A blank string clears the proxy.
    pub fn proxy(mut self, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        self.config.proxy = (!endpoint.trim().is_empty()).then_some(endpoint);
        self
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Sets the maximum size of one file in bytes.
    pub fn max_bytes(mut self, max_bytes: u64) -> Self {
        self.config.max_bytes = max_bytes;
        self
    }

    /// Sets the maximum size of one file in mebibytes.
    pub fn max_megabytes(self, max_mb: u64) -> Self {
        self.max_bytes(max_mb.saturating_mul(1024 * 1024))
    }

    /// Replaces the extension allow-list.
    ///
    /// Items are lowercased and stripped of leading dots. An empty list
    /// allows nothing.
    pub fn allowed_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.config.allowed_extensions = extensions
            .into_iter()
            .map(|ext| normalize_extension(ext.as_ref()))
            .filter(|ext| !ext.is_empty())
            .collect();
        self
    }

    /// Replaces the extension allow-list from a comma-separated string.
    pub fn allowed_extensions_csv(mut self, csv: &str) -> Self {
        self.config.allowed_extensions = parse_extension_list(csv);
        self
    }

    /// Adds one extension to the allow-list.
    pub fn allow_extension(mut self, ext: &str) -> Self {
        let ext = normalize_extension(ext);
        if !ext.is_empty() {
            self.config.allowed_extensions.insert(ext);
        }
        self
    }

    /// Sets the maximum number of leaves a crawl collects.
    pub fn max_files(mut self, max_files: usize) -> Self {
        self.config.max_files = max_files;
        self
    }

    /// Sets the maximum traversal depth below the root.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    /// Sets the identifying header string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Set the number of retries for transient request failures.
    pub fn retries(mut self, retries: u32) -> Self {
        self.config.retries = retries;
        self
    }

    /// Require the root to be an onion service address.
    ///
    /// Enabled by default. Disable it for ordinary HTTP listings.
    pub fn onion_only(mut self, onion_only: bool) -> Self {
        self.config.onion_only = onion_only;
        self
    }

    /// Validate the options and create the [`Policy`].
    pub fn build(self) -> Result<Policy> {
        let mut config = self.config;

        if config.timeout.is_zero() {
            return Err(Error::InvalidPolicy("timeout must be positive".into()));
        }
        if config.max_bytes == 0 {
            return Err(Error::InvalidPolicy("max_bytes must be positive".into()));
        }
        if config.max_files == 0 {
            return Err(Error::InvalidPolicy("max_files must be positive".into()));
        }
        if config.max_depth == 0 {
            return Err(Error::InvalidPolicy("max_depth must be positive".into()));
        }
        if HeaderValue::from_str(&config.user_agent).is_err() {
            return Err(Error::InvalidPolicy(format!(
                "user agent {:?} is not a valid header value",
                config.user_agent
            )));
        }

        config.proxy = config
            .proxy
            .as_deref()
            .map(normalize_proxy_endpoint)
            .transpose()?;

        Ok(config)
    }
}
