//! Resource classifier: same-origin and path-safety checks, directory versus
//! leaf decisions, and leaf naming.
//!
//! - [`leaf`] - [`LeafResource`] and name/extension derivation
//! - [`probe`] - the HEAD probe used for the "root is a file" shortcut
//!
//! Link classification is purely syntactic: a path ending in `/` is a
//! directory, anything else is a leaf. Only the root URL is ever probed over
//! the network.
//!
//! # Examples
//!
//! ```rust
//! use spelunk::classify::{Classification, Scope};
//! use reqwest::Url;
//!
//! let root = Url::parse("http://example.com/docs/").unwrap();
//! let scope = Scope::new(&root);
//!
//! let sub = root.join("sub/").unwrap();
//! assert!(matches!(scope.classify(&sub), Classification::Directory(_)));
//!
//! let escape = root.join("../escape").unwrap();
//! assert_eq!(scope.classify(&escape), Classification::Unsafe);
//! ```

pub mod leaf;
pub mod probe;

pub use leaf::{extension_from_name, name_from_url, LeafResource, PLACEHOLDER_NAME};
pub use probe::{content_kind, probe_content_kind, ContentKind, Probe};

use crate::error::{Error, Result};
use crate::policy::Policy;

use reqwest::Url;

/// A path ending in a separator is directory-shaped.
pub fn is_directory_shaped(path: &str) -> bool {
    path.ends_with('/')
}

/// Whether two URLs share scheme, host and port.
pub fn same_origin(a: &Url, b: &Url) -> bool {
    a.origin() == b.origin()
}

/// Whether the path of `url`, trailing separators stripped, ends in a
/// parent-traversal token.
///
/// URL resolution already collapses `..` segments, so this only catches what
/// survives normalization; [`Scope::is_safe_path`] also enforces the path
/// prefix.
pub fn is_parent_traversal(url: &Url) -> bool {
    url.path().trim_end_matches('/').ends_with("..")
}

/// Normalize a directory URL: no fragment, no query, trailing separator.
///
/// Two URLs that differ only by a trailing separator normalize to the same
/// value.
pub fn normalize_directory(url: &Url) -> Url {
    let mut dir = url.clone();
    dir.set_fragment(None);
    dir.set_query(None);
    if !is_directory_shaped(dir.path()) {
        let path = format!("{}/", dir.path());
        dir.set_path(&path);
    }
    dir
}

/// Whether `host` is an onion service name (`<16..56 base32 chars>.onion`).
pub fn is_onion_host(host: &str) -> bool {
    let host = host.to_ascii_lowercase();
    match host.strip_suffix(".onion") {
        Some(label) => {
            (16..=56).contains(&label.len())
                && label.bytes().all(|b| matches!(b, b'a'..=b'z' | b'2'..=b'7'))
        }
        None => false,
    }
}

/// Parse and validate the root URL of a crawl.
///
/// The root must be an absolute `http` or `https` URL. When the policy is
/// onion-only, its host must also be an onion service name.
pub fn parse_root(root: &str, policy: &Policy) -> Result<Url> {
    let root = root.trim();
    let mut url = Url::parse(root)
        .map_err(|e| Error::InvalidUrl(format!("The url \"{}\" cannot be parsed: {}", root, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::InvalidUrl(format!(
            "The url \"{}\" must use http or https",
            root
        )));
    }

    let host = url.host_str().unwrap_or_default();
    if policy.onion_only() && !is_onion_host(host) {
        return Err(Error::InvalidUrl(format!(
            "The url \"{}\" is not an onion service address",
            root
        )));
    }

    url.set_fragment(None);
    Ok(url)
}

/// How a link found on a listing page is handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The link points to another origin.
    Foreign,
    /// The link climbs out of the crawl scope.
    Unsafe,
    /// A sub-directory to enqueue, already normalized.
    Directory(Url),
    /// A file.
    Leaf(LeafResource),
}

/// The origin and path prefix a crawl is confined to.
#[derive(Debug, Clone)]
pub struct Scope {
    root: Url,
}

impl Scope {
    /// Create the scope rooted at directory `root`.
    pub fn new(root: &Url) -> Self {
        Self {
            root: normalize_directory(root),
        }
    }

    /// Gets the normalized root directory.
    pub fn root(&self) -> &Url {
        &self.root
    }

    /// Whether `link` is on the root's origin.
    pub fn contains_origin(&self, link: &Url) -> bool {
        same_origin(&self.root, link)
    }

    /// Whether `link` stays at or below the root directory and carries no
    /// parent-traversal token.
    pub fn is_safe_path(&self, link: &Url) -> bool {
        !is_parent_traversal(link) && link.path().starts_with(self.root.path())
    }

    /// Classify a resolved link.
    pub fn classify(&self, link: &Url) -> Classification {
        if !self.contains_origin(link) {
            return Classification::Foreign;
        }
        if !self.is_safe_path(link) {
            return Classification::Unsafe;
        }
        if is_directory_shaped(link.path()) {
            Classification::Directory(normalize_directory(link))
        } else {
            Classification::Leaf(LeafResource::from_url(link))
        }
    }
}
