//! Breadth-first traversal of a listing tree.
//!
//! # Examples
//!
//! ```rust,no_run
//! use spelunk::crawl::Crawler;
//! use spelunk::policy::PolicyBuilder;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> spelunk::Result<()> {
//! let policy = PolicyBuilder::new()
//!     .proxy("127.0.0.1:9050")
//!     .max_depth(1)
//!     .build()?;
//! let crawler = Crawler::new(policy)?;
//!
//! let root = "http://abcdefghijklmnopqrstuvwxyz234567abcdefghijklmnopqrstuv.onion/files/";
//! let result = crawler.crawl(root, &CancellationToken::new()).await?;
//! for leaf in result.allowed(crawler.policy()) {
//!     println!("{} -> {}", leaf.name(), leaf.url());
//! }
//! # Ok(())
//! # }
//! ```

use super::links::{HtmlLinkExtractor, LinkExtractor};
use super::result::CrawlResult;
use crate::classify::{
    is_directory_shaped, normalize_directory, parse_root, probe_content_kind, Classification,
    ContentKind, LeafResource, Scope,
};
use crate::error::Result;
use crate::http::{client_for_policy, get_text};
use crate::policy::Policy;
use crate::utils::until_cancelled;

use reqwest::Url;
use reqwest_middleware::ClientWithMiddleware;
use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Walks a listing tree and collects the files it links to.
///
/// One crawler can serve any number of crawls, concurrently or not; the
/// frontier and visited set belong to a single [`Crawler::crawl`] call.
#[derive(Clone)]
pub struct Crawler {
    client: ClientWithMiddleware,
    policy: Policy,
    extractor: Arc<dyn LinkExtractor>,
}

impl fmt::Debug for Crawler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Crawler")
            .field("policy", &self.policy)
            .finish()
    }
}

impl Crawler {
    /// Creates a crawler with a client routed according to `policy`.
    pub fn new(policy: Policy) -> Result<Self> {
        let client = client_for_policy(&policy)?;
        Ok(Self::with_client(client, policy))
    }

    /// Creates a crawler sharing an existing client.
    pub fn with_client(client: ClientWithMiddleware, policy: Policy) -> Self {
        Self {
            client,
            policy,
            extractor: Arc::new(HtmlLinkExtractor::new()),
        }
    }

    /// Replaces the link extractor.
    pub fn with_extractor(mut self, extractor: impl LinkExtractor + 'static) -> Self {
        self.extractor = Arc::new(extractor);
        self
    }

    /// Gets the crawl policy.
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Gets the HTTP client.
    pub fn client(&self) -> &ClientWithMiddleware {
        &self.client
    }

    /// Crawls the tree below `root`.
    ///
    /// An invalid root is the only error besides cancellation. Directory
    /// pages that cannot be fetched are skipped and counted in
    /// [`CrawlResult::directories_unreachable`].
    pub async fn crawl(&self, root: &str, cancel: &CancellationToken) -> Result<CrawlResult> {
        let root = parse_root(root, &self.policy)?;
        info!(root = %root, max_depth = self.policy.max_depth(), max_files = self.policy.max_files(), "crawl started");

        if let Some(leaf) = self.direct_file(&root, cancel).await? {
            info!(root = %root, name = leaf.name(), "root is a single file");
            return Ok(CrawlResult::direct(root, leaf));
        }

        let result = self.traverse(root, cancel).await?;
        info!(
            root = %result.root(),
            leaves = result.len(),
            visited = result.directories_visited(),
            unreachable = result.directories_unreachable(),
            "crawl finished"
        );
        Ok(result)
    }

    /// Probes a root without a trailing separator.
    ///
    /// Returns the direct-file leaf when the server declares a non-HTML
    /// media type. A failed or inconclusive probe means the root is treated
    /// as a directory.
    async fn direct_file(
        &self,
        root: &Url,
        cancel: &CancellationToken,
    ) -> Result<Option<LeafResource>> {
        if is_directory_shaped(root.path()) {
            return Ok(None);
        }

        let probe = until_cancelled(cancel, probe_content_kind(&self.client, root)).await?;
        if probe.kind != ContentKind::LikelyFile {
            return Ok(None);
        }

        let leaf = match probe.filename.as_deref() {
            Some(name) => LeafResource::with_name(root, name),
            None => LeafResource::from_url(root),
        };
        Ok(Some(leaf))
    }

    async fn traverse(&self, root: Url, cancel: &CancellationToken) -> Result<CrawlResult> {
        let max_files = self.policy.max_files();
        let max_depth = self.policy.max_depth();
        let scope = Scope::new(&root);

        let mut frontier: VecDeque<(Url, usize)> = VecDeque::new();
        frontier.push_back((scope.root().clone(), 0));
        let mut visited: HashSet<Url> = HashSet::new();
        let mut seen_leaves: HashSet<Url> = HashSet::new();
        let mut leaves: Vec<LeafResource> = Vec::new();
        let mut unreachable = 0;

        while leaves.len() < max_files {
            let Some((dir, depth)) = frontier.pop_front() else {
                break;
            };
            if depth > max_depth {
                debug!(url = %dir, depth, "beyond depth limit");
                continue;
            }
            let dir = normalize_directory(&dir);
            if !visited.insert(dir.clone()) {
                continue;
            }

            debug!(url = %dir, depth, "visiting directory");
            let body = match until_cancelled(cancel, get_text(&self.client, &dir)).await? {
                Ok(body) => body,
                Err(e) => {
                    warn!(url = %dir, error = %e, "directory unreachable, skipping");
                    unreachable += 1;
                    continue;
                }
            };

            for link in self.extractor.extract_links(&body, &dir) {
                if leaves.len() >= max_files {
                    break;
                }
                match scope.classify(&link) {
                    Classification::Foreign => debug!(url = %link, "foreign origin"),
                    Classification::Unsafe => debug!(url = %link, "outside crawl scope"),
                    Classification::Directory(sub) => {
                        if depth < max_depth && !visited.contains(&sub) {
                            frontier.push_back((sub, depth + 1));
                        }
                    }
                    Classification::Leaf(leaf) => {
                        if seen_leaves.insert(leaf.url().clone()) {
                            leaves.push(leaf);
                        }
                    }
                }
            }
        }

        Ok(CrawlResult::traversal(root, leaves, visited.len(), unreachable))
    }
}
