//! The immutable limits and transport options of one invocation.
//!
//! A [`Policy`] is built once through [`PolicyBuilder`](super::PolicyBuilder),
//! then shared read-only by every component of a crawl. It is cheap to clone
//! and safe to share across concurrent invocations.

use std::collections::BTreeSet;
use std::time::Duration;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
/// Default ceiling on the size of one downloaded file.
pub const DEFAULT_MAX_BYTES: u64 = 150 * 1024 * 1024;
/// Default quota of collected leaf files.
pub const DEFAULT_MAX_FILES: usize = 300;
/// Default traversal depth below the root directory.
pub const DEFAULT_MAX_DEPTH: usize = 2;
/// Default retries for transient request failures.
pub const DEFAULT_RETRIES: u32 = 3;
/// Default identifying header sent as `User-Agent`.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; spelunk/0.1)";
/// Default extension allow-list.
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &[
    "pdf", "txt", "jpg", "jpeg", "png", "zip", "mp4", "mkv", "avi", "webm", "mov",
];

/// Limits and transport options for one crawl invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    pub(crate) proxy: Option<String>,
    pub(crate) timeout: Duration,
    pub(crate) max_bytes: u64,
    pub(crate) allowed_extensions: BTreeSet<String>,
    pub(crate) max_files: usize,
    pub(crate) max_depth: usize,
    pub(crate) user_agent: String,
    pub(crate) retries: u32,
    pub(crate) onion_only: bool,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            proxy: None,
            timeout: DEFAULT_TIMEOUT,
            max_bytes: DEFAULT_MAX_BYTES,
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            max_files: DEFAULT_MAX_FILES,
            max_depth: DEFAULT_MAX_DEPTH,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            retries: DEFAULT_RETRIES,
            onion_only: true,
        }
    }
}

impl Policy {
    /// Gets the proxy endpoint, already normalized.
    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    /// Gets the per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Gets the maximum number of bytes accepted for one file.
    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Gets the lowercase extension allow-list.
    pub fn allowed_extensions(&self) -> &BTreeSet<String> {
        &self.allowed_extensions
    }

    /// Gets the maximum number of leaves a crawl collects.
    pub fn max_files(&self) -> usize {
        self.max_files
    }

    /// Gets the maximum traversal depth.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Gets the identifying header string.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Gets the number of retries for transient failures.
    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// Gets whether the root must be an onion service address.
    pub fn onion_only(&self) -> bool {
        self.onion_only
    }

    /// Whether `ext` is on the allow-list.
    ///
    /// An empty extension is never allowed, and an empty allow-list allows
    /// nothing.
    pub fn is_allowed_extension(&self, ext: &str) -> bool {
        let ext = normalize_extension(ext);
        !ext.is_empty() && self.allowed_extensions.contains(&ext)
    }
}

/// Lowercase an extension and strip any leading dots.
pub fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}

/// Parse a comma-separated extension list such as `"pdf, .ZIP,png"`.
///
/// Blank items are ignored, so `""` produces an empty (deny-all) set.
pub fn parse_extension_list(csv: &str) -> BTreeSet<String> {
    csv.split(',')
        .map(normalize_extension)
        .filter(|ext| !ext.is_empty())
        .collect()
}
