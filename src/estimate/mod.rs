//! Size estimator: a best-effort byte count for a URL.
//!
//! A HEAD request is tried first. When it fails or declares no usable
//! `Content-Length`, a GET for the first byte is issued instead and the total
//! is read from `Content-Range` (partial response) or `Content-Length` (full
//! response). The estimate is never authoritative: the fetcher enforces the
//! byte ceiling on what it actually receives.
//!
//! # Examples
//!
//! ```rust,no_run
//! use spelunk::estimate::estimate_size;
//! use spelunk::http::{create_http_client, HttpClientConfig};
//! use spelunk::utils::human_bytes;
//! use reqwest::Url;
//!
//! # async fn example() -> spelunk::Result<()> {
//! let client = create_http_client(HttpClientConfig::default())?;
//! let url = Url::parse("http://example.com/a.pdf").unwrap();
//! match estimate_size(&client, &url).await {
//!     Some(size) => println!("{}", human_bytes(size)),
//!     None => println!("size unknown"),
//! }
//! # Ok(())
//! # }
//! ```

use crate::utils::{content_range_total, declared_content_length};

use reqwest::{header::RANGE, StatusCode, Url};
use reqwest_middleware::ClientWithMiddleware;
use tracing::debug;

/// Estimate the size of the resource at `url`.
///
/// Never fails: any transport error or unusable answer yields `None`.
pub async fn estimate_size(client: &ClientWithMiddleware, url: &Url) -> Option<u64> {
    if let Some(size) = head_length(client, url).await {
        debug!(url = %url, size, "size from HEAD");
        return Some(size);
    }

    let size = ranged_length(client, url).await;
    debug!(url = %url, size = ?size, "size from ranged GET");
    size
}

async fn head_length(client: &ClientWithMiddleware, url: &Url) -> Option<u64> {
    let res = match client.head(url.clone()).send().await {
        Ok(res) => res,
        Err(e) => {
            debug!(url = %url, error = %e, "HEAD failed");
            return None;
        }
    };
    if !res.status().is_success() {
        return None;
    }
    declared_content_length(res.headers())
}

async fn ranged_length(client: &ClientWithMiddleware, url: &Url) -> Option<u64> {
    let res = match client.get(url.clone()).header(RANGE, "bytes=0-0").send().await {
        Ok(res) => res,
        Err(e) => {
            debug!(url = %url, error = %e, "ranged GET failed");
            return None;
        }
    };

    // The body is never read; dropping the response closes the transfer.
    match res.status() {
        StatusCode::PARTIAL_CONTENT => content_range_total(res.headers()),
        status if status.is_success() => declared_content_length(res.headers()),
        _ => None,
    }
}
