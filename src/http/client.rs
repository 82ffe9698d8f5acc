//! HTTP client setup and middleware configuration.
//!
//! Every request of a crawl goes through one client built here: a reqwest
//! client routed through the configured forward proxy, wrapped with tracing
//! and retry middleware.
//!
//! # Features
//!
//! - **Retry Logic**: Exponential backoff retry policy for transient failures
//! - **Tracing**: Request/response spans through `reqwest-tracing`
//! - **Proxy Support**: SOCKS4/SOCKS5/HTTP forward proxies
//! - **Timeout**: One deadline per request, body included
//!
//! # Examples
//!
//! ```rust
//! use spelunk::http::{client_for_policy, create_http_client, HttpClientConfig};
//! use spelunk::policy::PolicyBuilder;
//!
//! # fn example() -> spelunk::Result<()> {
//! let client = create_http_client(HttpClientConfig::default())?;
//!
//! let policy = PolicyBuilder::new().proxy("socks5h://127.0.0.1:9050").build()?;
//! let proxied = client_for_policy(&policy)?;
//! # Ok(())
//! # }
//! ```

use crate::error::{Error, Result};
use crate::policy::Policy;

use reqwest::{
    header::{HeaderMap, HeaderValue, USER_AGENT},
    Proxy, Url,
};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use reqwest_tracing::TracingMiddleware;
use std::time::Duration;
use tracing::debug;

/// Proxy schemes the transport knows how to dial.
pub const SUPPORTED_PROXY_SCHEMES: &[&str] =
    &["socks5h", "socks5", "socks4a", "socks4", "http", "https"];

/// Configuration for HTTP client setup.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Number of retries for failed requests.
    pub retries: u32,
    /// Optional proxy configuration.
    pub proxy: Option<Proxy>,
    /// Default headers to include with all requests.
    pub headers: Option<HeaderMap>,
    /// Deadline for each request, body included.
    pub timeout: Option<Duration>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            retries: 3,
            proxy: None,
            headers: None,
            timeout: None,
        }
    }
}

impl HttpClientConfig {
    /// Derive the client configuration from a [`Policy`].
    pub fn from_policy(policy: &Policy) -> Result<Self> {
        let proxy = policy
            .proxy()
            .map(|endpoint| {
                Proxy::all(endpoint).map_err(|e| {
                    Error::Proxy(format!("cannot use proxy endpoint {:?}: {}", endpoint, e))
                })
            })
            .transpose()?;

        let agent = HeaderValue::from_str(policy.user_agent()).map_err(|_| {
            Error::InvalidPolicy(format!(
                "user agent {:?} is not a valid header value",
                policy.user_agent()
            ))
        })?;
        let headers = HeaderMap::from_iter([(USER_AGENT, agent)]);

        Ok(Self {
            retries: policy.retries(),
            proxy,
            headers: Some(headers),
            timeout: Some(policy.timeout()),
        })
    }
}

/// Creates an HTTP client with middleware configuration.
///
/// This function sets up a reqwest client with:
/// - Tracing middleware for request/response logging
/// - Retry middleware with exponential backoff
/// - Optional proxy support
/// - Optional default headers and timeout
pub fn create_http_client(config: HttpClientConfig) -> Result<ClientWithMiddleware> {
    // Set up retry policy with exponential backoff
    let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.retries);

    let mut inner_client_builder = reqwest::Client::builder();

    if let Some(proxy) = config.proxy {
        inner_client_builder = inner_client_builder.proxy(proxy);
    }

    if let Some(headers) = config.headers {
        inner_client_builder = inner_client_builder.default_headers(headers);
    }

    if let Some(timeout) = config.timeout {
        inner_client_builder = inner_client_builder.timeout(timeout);
    }

    let inner_client = inner_client_builder.build()?;

    let client = ClientBuilder::new(inner_client)
        // Trace HTTP requests. See the tracing crate to make use of these traces.
        .with(TracingMiddleware::default())
        // Retry failed requests.
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build();

    Ok(client)
}

/// Build the proxied client described by a [`Policy`].
pub fn client_for_policy(policy: &Policy) -> Result<ClientWithMiddleware> {
    debug!(
        proxy = policy.proxy().unwrap_or("none"),
        timeout_secs = policy.timeout().as_secs(),
        retries = policy.retries(),
        "creating http client"
    );
    create_http_client(HttpClientConfig::from_policy(policy)?)
}

/// Normalize a proxy endpoint string.
///
/// A bare `host:port` becomes `socks5h://host:port` so host names are
/// resolved by the proxy, which is required for onion services.
pub fn normalize_proxy_endpoint(endpoint: &str) -> Result<String> {
    let endpoint = endpoint.trim();
    let candidate = if endpoint.contains("://") {
        endpoint.to_string()
    } else {
        format!("socks5h://{}", endpoint)
    };

    let url = Url::parse(&candidate)
        .map_err(|e| Error::Proxy(format!("cannot parse proxy endpoint {:?}: {}", endpoint, e)))?;
    if !SUPPORTED_PROXY_SCHEMES.contains(&url.scheme()) {
        return Err(Error::Proxy(format!(
            "unsupported proxy scheme {:?} in {:?}",
            url.scheme(),
            endpoint
        )));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(Error::Proxy(format!("proxy endpoint {:?} has no host", endpoint)));
    }

    Ok(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::PolicyBuilder;

    #[test]
    fn test_default_config() {
        let config = HttpClientConfig::default();
        assert_eq!(config.retries, 3);
        assert!(config.proxy.is_none());
        assert!(config.headers.is_none());
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_create_http_client_default() {
        let config = HttpClientConfig::default();
        let client = create_http_client(config);
        assert!(client.is_ok());
    }

    #[test]
    fn test_config_from_policy() {
        let policy = PolicyBuilder::new()
            .user_agent("spelunk-test")
            .retries(1)
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        let config = HttpClientConfig::from_policy(&policy).unwrap();

        assert_eq!(config.retries, 1);
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
        assert_eq!(
            config.headers.unwrap().get(USER_AGENT),
            Some(&HeaderValue::from_static("spelunk-test"))
        );
    }

    #[test]
    fn test_client_for_policy_with_socks_proxy() {
        let policy = PolicyBuilder::new()
            .proxy("socks5h://127.0.0.1:9050")
            .build()
            .unwrap();
        assert!(client_for_policy(&policy).is_ok());
    }

    #[test]
    fn test_normalize_proxy_endpoint() {
        assert_eq!(
            normalize_proxy_endpoint("127.0.0.1:9050").unwrap(),
            "socks5h://127.0.0.1:9050"
        );
        assert_eq!(
            normalize_proxy_endpoint("socks5://tor:9050").unwrap(),
            "socks5://tor:9050"
        );
        assert!(matches!(
            normalize_proxy_endpoint("gopher://tor:70"),
            Err(Error::Proxy(_))
        ));
        assert!(matches!(
            normalize_proxy_endpoint("socks5h://"),
            Err(Error::Proxy(_))
        ));
    }
}
