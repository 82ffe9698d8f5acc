//! Cheap HEAD probe used to tell a listing page from a direct file.

use crate::utils::{declared_content_length, disposition_filename};

use reqwest::{header::CONTENT_TYPE, Url};
use reqwest_middleware::ClientWithMiddleware;
use tracing::debug;

/// What a probed URL most likely refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// An HTML page, so possibly a directory listing.
    LikelyPage,
    /// Any non-HTML media type.
    LikelyFile,
    /// The probe failed or the server declared no media type.
    Unknown,
}

/// Result of probing a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Probe {
    /// Classification of the declared media type.
    pub kind: ContentKind,
    /// Declared media type, lowercased, parameters removed.
    pub content_type: Option<String>,
    /// File name announced through `Content-Disposition`.
    pub filename: Option<String>,
    /// Declared `Content-Length`.
    pub content_length: Option<u64>,
}

impl Probe {
    fn unknown() -> Self {
        Self {
            kind: ContentKind::Unknown,
            content_type: None,
            filename: None,
            content_length: None,
        }
    }
}

/// Classify a media type such as `text/html; charset=utf-8`.
///
/// Parameters are ignored and the comparison is case-insensitive.
pub fn content_kind(content_type: Option<&str>) -> ContentKind {
    match content_type.map(media_type).as_deref() {
        None | Some("") => ContentKind::Unknown,
        Some("text/html") | Some("application/xhtml+xml") => ContentKind::LikelyPage,
        Some(_) => ContentKind::LikelyFile,
    }
}

fn media_type(raw: &str) -> String {
    raw.split(';').next().unwrap_or_default().trim().to_lowercase()
}

/// Issue a HEAD request and inspect the declared media type.
///
/// Never fails: transport errors and non-success statuses yield
/// [`ContentKind::Unknown`].
pub async fn probe_content_kind(client: &ClientWithMiddleware, url: &Url) -> Probe {
    let res = match client.head(url.clone()).send().await {
        Ok(res) => res,
        Err(e) => {
            debug!(url = %url, error = %e, "probe failed");
            return Probe::unknown();
        }
    };

    if !res.status().is_success() {
        debug!(url = %url, status = %res.status(), "probe rejected");
        return Probe::unknown();
    }

    let headers = res.headers();
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(media_type)
        .filter(|ct| !ct.is_empty());
    let probe = Probe {
        kind: content_kind(content_type.as_deref()),
        filename: disposition_filename(headers),
        content_length: declared_content_length(headers),
        content_type,
    };
    debug!(url = %url, kind = ?probe.kind, content_type = ?probe.content_type, "probed");
    probe
}
