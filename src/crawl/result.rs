//! The outcome of one crawl.

use crate::classify::LeafResource;
use crate::policy::Policy;

use reqwest::Url;

/// Leaves discovered by a crawl, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlResult {
    root: Url,
    leaves: Vec<LeafResource>,
    direct: bool,
    directories_visited: usize,
    directories_unreachable: usize,
}

impl CrawlResult {
    /// Result of a breadth-first traversal.
    pub(crate) fn traversal(
        root: Url,
        leaves: Vec<LeafResource>,
        directories_visited: usize,
        directories_unreachable: usize,
    ) -> Self {
        Self {
            root,
            leaves,
            direct: false,
            directories_visited,
            directories_unreachable,
        }
    }

    /// Single-element result for a root that is itself a file.
    pub(crate) fn direct(root: Url, leaf: LeafResource) -> Self {
        Self {
            root,
            leaves: vec![leaf],
            direct: true,
            directories_visited: 0,
            directories_unreachable: 0,
        }
    }

    /// Gets the root URL as given to the crawler.
    pub fn root(&self) -> &Url {
        &self.root
    }

    /// Gets the discovered leaves, allowed or not.
    pub fn leaves(&self) -> &[LeafResource] {
        &self.leaves
    }

    /// Consumes the result, returning the leaves.
    pub fn into_leaves(self) -> Vec<LeafResource> {
        self.leaves
    }

    /// Whether the root turned out to be a single file.
    pub fn is_direct(&self) -> bool {
        self.direct
    }

    /// Gets the number of directory pages fetched or attempted.
    pub fn directories_visited(&self) -> usize {
        self.directories_visited
    }

    /// Gets the number of directory pages that could not be fetched.
    pub fn directories_unreachable(&self) -> usize {
        self.directories_unreachable
    }

    /// Number of discovered leaves.
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Leaves admitted by the allow-list of `policy`, in discovery order.
    pub fn allowed<'a>(&'a self, policy: &'a Policy) -> impl Iterator<Item = &'a LeafResource> {
        self.leaves.iter().filter(move |leaf| leaf.is_allowed(policy))
    }
}
