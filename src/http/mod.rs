//! HTTP module: the proxied transport shared by every component.
//!
//! - [`client`] - client creation, proxy normalization and middleware
//! - [`page`] - the page-body collaborator used by the crawler
//!
//! # Examples
//!
//! ```rust
//! use spelunk::http::{create_http_client, HttpClientConfig};
//! use reqwest::header::{HeaderMap, USER_AGENT};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut headers = HeaderMap::new();
//! headers.insert(USER_AGENT, "MyApp/1.0".parse()?);
//!
//! let config = HttpClientConfig {
//!     retries: 5,
//!     proxy: None,
//!     headers: Some(headers),
//!     timeout: None,
//! };
//!
//! let client = create_http_client(config)?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod page;

pub use client::{
    client_for_policy, create_http_client, normalize_proxy_endpoint, HttpClientConfig,
    SUPPORTED_PROXY_SCHEMES,
};
pub use page::get_text;
