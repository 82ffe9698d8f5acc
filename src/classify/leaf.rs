//! Leaf resources: the downloadable files a crawl discovers.

use crate::policy::{normalize_extension, Policy};

use reqwest::Url;
use sha2::{Digest, Sha256};
use std::path::PathBuf;

/// Name used when a URL carries no file name.
pub const PLACEHOLDER_NAME: &str = "index";

/// A discovered file.
///
/// The display name and the path segments are percent-decoded and made safe
/// to use as path components, so [`LeafResource::relative_path`] never
/// escapes the directory it is joined to.
///
/// URLs that differ only by query string share a display name but get
/// distinct file names on disk.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LeafResource {
    url: Url,
    name: String,
    file_name: String,
    extension: String,
    segments: Vec<String>,
}

impl LeafResource {
    /// Derive a leaf from its URL.
    ///
    /// ```rust
    /// use spelunk::classify::LeafResource;
    /// use reqwest::Url;
    ///
    /// let url = Url::parse("http://example.com/docs/sub/My%20Report.PDF").unwrap();
    /// let leaf = LeafResource::from_url(&url);
    /// assert_eq!(leaf.name(), "My Report.PDF");
    /// assert_eq!(leaf.extension(), "pdf");
    /// assert_eq!(leaf.segments(), ["docs", "sub"]);
    /// ```
    pub fn from_url(url: &Url) -> Self {
        let mut leaf = Self::with_name(url, &name_from_url(url));
        if let Some(tag) = query_tag(url) {
            leaf.file_name = tagged_name(&leaf.name, &tag);
        }
        leaf
    }

    /// Derive a leaf from its URL, using `name` as the display name.
    ///
    /// Used when the server announces a file name through
    /// `Content-Disposition`.
    pub fn with_name(url: &Url, name: &str) -> Self {
        let name = sanitize_component(name).unwrap_or_else(|| PLACEHOLDER_NAME.to_string());
        Self {
            url: url.clone(),
            extension: extension_from_name(&name),
            segments: directory_segments(url),
            file_name: name.clone(),
            name,
        }
    }

    /// Gets the URL of the file.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Gets the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the file name on disk: the display name, tagged with a short
    /// digest of the query string when the URL has one.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Gets the lowercase extension, empty when the name has none.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Gets the directory segments of the URL path, file name excluded.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Path of the file relative to a destination root.
    pub fn relative_path(&self) -> PathBuf {
        let mut path: PathBuf = self.segments.iter().collect();
        path.push(&self.file_name);
        path
    }

    /// Whether the allow-list of `policy` admits this leaf.
    ///
    /// A leaf without an extension is always rejected.
    pub fn is_allowed(&self, policy: &Policy) -> bool {
        policy.is_allowed_extension(&self.extension)
    }
}

/// Final path segment of `url`, percent-decoded.
///
/// Returns [`PLACEHOLDER_NAME`] when the path is empty or ends with a
/// separator.
pub fn name_from_url(url: &Url) -> String {
    let path = url.path();
    if path.is_empty() || path.ends_with('/') {
        return PLACEHOLDER_NAME.to_string();
    }
    path.rsplit('/')
        .next()
        .map(decode_segment)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| PLACEHOLDER_NAME.to_string())
}

/// Lowercase text after the last `.` of `name`, or an empty string.
pub fn extension_from_name(name: &str) -> String {
    match name.trim().rsplit_once('.') {
        Some((_, ext)) => normalize_extension(ext),
        None => String::new(),
    }
}

/// First 8 hex digits of the SHA-256 of a non-empty query string.
fn query_tag(url: &Url) -> Option<String> {
    let query = url.query().filter(|q| !q.is_empty())?;
    let digest = Sha256::digest(query.as_bytes());
    Some(hex::encode(&digest[..4]))
}

/// `report.pdf` + `1a2b3c4d` gives `report-1a2b3c4d.pdf`.
fn tagged_name(name: &str, tag: &str) -> String {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{}-{}.{}", stem, tag, ext),
        _ => format!("{}-{}", name, tag),
    }
}

fn directory_segments(url: &Url) -> Vec<String> {
    let mut segments: Vec<&str> = url.path().split('/').collect();
    // The last item is the file name, or empty for a directory-shaped path.
    segments.pop();
    segments
        .into_iter()
        .filter_map(|segment| sanitize_component(&decode_segment(segment)))
        .collect()
}

fn decode_segment(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}

/// Make a decoded segment usable as a single path component.
///
/// Separators and control characters become `_`; empty, `.` and `..`
/// segments are dropped.
fn sanitize_component(segment: &str) -> Option<String> {
    let cleaned: String = segment
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    match cleaned.as_str() {
        "" | "." | ".." => None,
        _ => Some(cleaned),
    }
}
