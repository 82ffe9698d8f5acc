//! Content length extraction utilities.
//!
//! Size estimates come from two headers: `Content-Length` on a full response
//! and the total carried by `Content-Range` on a partial one. Both parsers are
//! strict: a value that is not a plain decimal number yields `None` instead of
//! a guess.

use reqwest::header::{HeaderMap, CONTENT_LENGTH, CONTENT_RANGE};

/// Parse Content-Range header to extract the complete length.
///
/// Content-Range header format: `bytes start-end/total`. An unknown total
/// (`bytes 0-0/*`) or any other unit yields `None`.
///
/// # Example
///
/// ```rust
/// use spelunk::utils::parse_content_range_total;
///
/// assert_eq!(parse_content_range_total("bytes 0-0/2048"), Some(2048));
/// assert_eq!(parse_content_range_total("bytes 0-0/*"), None);
/// ```
pub fn parse_content_range_total(content_range: &str) -> Option<u64> {
    let rest = content_range.trim().strip_prefix("bytes")?;
    let (_, total) = rest.rsplit_once('/')?;
    parse_decimal(total.trim())
}

/// Extract the complete length from a `Content-Range` response header.
pub fn content_range_total(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(CONTENT_RANGE)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_content_range_total)
}

/// Extract a well-formed `Content-Length` response header.
///
/// `reqwest::Response::content_length` reports the size of the decoded body,
/// which is not what a HEAD response advertises, so the header is read
/// directly.
pub fn declared_content_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| parse_decimal(v.trim()))
}

fn parse_decimal(value: &str) -> Option<u64> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse::<u64>().ok()
}
