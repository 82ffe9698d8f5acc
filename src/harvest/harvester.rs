//! The list, count, size and download modes.
//!
//! # Examples
//!
//! ```rust,no_run
//! use spelunk::harvest::Harvester;
//! use spelunk::policy::PolicyBuilder;
//! use spelunk::progress::StyleOptions;
//! use std::path::Path;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> spelunk::Result<()> {
//! let policy = PolicyBuilder::new()
//!     .proxy("127.0.0.1:9050")
//!     .allowed_extensions_csv("pdf,zip")
//!     .build()?;
//! let harvester = Harvester::new(policy)?
//!     .max_concurrent_jobs(2)
//!     .style_options(StyleOptions::default())
//!     .on_complete(|summary| println!("{}", summary.message()));
//!
//! let root = "http://abcdefghijklmnopqrstuvwxyz234567abcdefghijklmnopqrstuv.onion/files/";
//! let report = harvester
//!     .download(root, Path::new("./downloads"), &CancellationToken::new())
//!     .await?;
//! println!("{}", report);
//! # Ok(())
//! # }
//! ```

use super::report::{CountReport, DownloadReport, ListReport, SizeReport};
use crate::classify::LeafResource;
use crate::crawl::{CrawlResult, Crawler, LinkExtractor};
use crate::error::{Error, Result};
use crate::estimate::estimate_size;
use crate::fetch::{Fetcher, Summary};
use crate::http::client_for_policy;
use crate::policy::{normalize_extension, Policy};
use crate::progress::{ProgressDisplay, StyleOptions};
use crate::utils::until_cancelled;

use reqwest_middleware::ClientWithMiddleware;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tokio::{
    fs,
    sync::{OwnedSemaphorePermit, Semaphore},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Default number of leaves returned by [`Harvester::list`].
pub const DEFAULT_LIST_LIMIT: usize = 50;

/// Callback invoked after each leaf of the download mode.
pub type CompletionCallback = Arc<dyn Fn(&Summary) + Send + Sync>;

/// Runs crawls and the modes built on them.
///
/// Clones share the client and the invocation pool.
#[derive(Clone)]
pub struct Harvester {
    crawler: Crawler,
    fetcher: Fetcher,
    pool: Option<Arc<Semaphore>>,
    style_options: StyleOptions,
    on_complete: Option<CompletionCallback>,
}

impl fmt::Debug for Harvester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Harvester")
            .field("policy", self.policy())
            .field("pool", &self.pool)
            .field("style_options", &self.style_options)
            .finish()
    }
}

impl Harvester {
    /// Creates a harvester with a client routed according to `policy`.
    ///
    /// Fails when the proxy endpoint or the user agent is unusable.
    pub fn new(policy: Policy) -> Result<Self> {
        let client = client_for_policy(&policy)?;
        Ok(Self::with_client(client, policy))
    }

    /// Creates a harvester sharing an existing client.
    pub fn with_client(client: ClientWithMiddleware, policy: Policy) -> Self {
        Self {
            crawler: Crawler::with_client(client.clone(), policy.clone()),
            fetcher: Fetcher::with_client(client, policy),
            pool: None,
            style_options: StyleOptions::hidden(),
            on_complete: None,
        }
    }

    /// Replaces the link extractor of the crawler.
    pub fn with_extractor(mut self, extractor: impl LinkExtractor + 'static) -> Self {
        self.crawler = self.crawler.with_extractor(extractor);
        self
    }

    /// Lets at most `jobs` invocations of this harvester (and its clones)
    /// run at once. Further invocations wait for a free slot.
    pub fn max_concurrent_jobs(mut self, jobs: usize) -> Self {
        self.pool = Some(Arc::new(Semaphore::new(jobs.max(1))));
        self
    }

    /// Uses a pool shared with other harvesters.
    pub fn pool(mut self, pool: Arc<Semaphore>) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Set the progress bar style of the download mode.
    pub fn style_options(mut self, style_options: StyleOptions) -> Self {
        self.style_options = style_options;
        self
    }

    /// Set a callback to be called after each leaf of the download mode.
    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Summary) + Send + Sync + 'static,
    {
        self.on_complete = Some(Arc::new(callback));
        self
    }

    pub fn policy(&self) -> &Policy {
        self.crawler.policy()
    }

    pub fn crawler(&self) -> &Crawler {
        &self.crawler
    }

    pub fn fetcher(&self) -> &Fetcher {
        &self.fetcher
    }

    async fn acquire(&self, cancel: &CancellationToken) -> Result<Option<OwnedSemaphorePermit>> {
        let Some(pool) = &self.pool else {
            return Ok(None);
        };
        let permit = until_cancelled(cancel, pool.clone().acquire_owned())
            .await?
            .map_err(|_| Error::Internal("invocation pool closed".into()))?;
        Ok(Some(permit))
    }

    /// Crawls `root` inside the invocation pool.
    pub async fn crawl(&self, root: &str, cancel: &CancellationToken) -> Result<CrawlResult> {
        let _permit = self.acquire(cancel).await?;
        self.crawler.crawl(root, cancel).await
    }

    /// Allowed leaves below `root`, at most `limit` of them.
    pub async fn list(
        &self,
        root: &str,
        limit: usize,
        cancel: &CancellationToken,
    ) -> Result<ListReport> {
        let result = self.crawl(root, cancel).await?;
        let policy = self.policy();
        let allowed: Vec<&LeafResource> = result.allowed(policy).collect();

        Ok(ListReport {
            root: result.root().clone(),
            total: result.len(),
            allowed: allowed.len(),
            leaves: allowed.into_iter().take(limit).cloned().collect(),
        })
    }

    /// Count allowed leaves below `root`, optionally for one extension.
    pub async fn count(
        &self,
        root: &str,
        extension: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<CountReport> {
        let result = self.crawl(root, cancel).await?;
        let extension = extension
            .map(normalize_extension)
            .filter(|ext| !ext.is_empty());

        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut allowed = 0;
        for leaf in result.allowed(self.policy()) {
            allowed += 1;
            *counts.entry(leaf.extension()).or_default() += 1;
        }

        let matching = match extension.as_deref() {
            Some(ext) => counts.get(ext).copied().unwrap_or(0),
            None => allowed,
        };
        let mut by_extension: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(ext, n)| (ext.to_string(), n))
            .collect();
        by_extension.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Ok(CountReport {
            total: result.len(),
            allowed,
            extension,
            matching,
            by_extension,
        })
    }

    /// Sum the estimated sizes of the allowed leaves below `root`.
    ///
    /// Estimates run one leaf at a time.
    pub async fn size(&self, root: &str, cancel: &CancellationToken) -> Result<SizeReport> {
        let _permit = self.acquire(cancel).await?;
        let result = self.crawler.crawl(root, cancel).await?;
        let client = self.crawler.client();

        let mut report = SizeReport {
            total: result.len(),
            allowed: 0,
            known_bytes: 0,
            unknown: 0,
        };
        for leaf in result.allowed(self.policy()) {
            report.allowed += 1;
            match until_cancelled(cancel, estimate_size(client, leaf.url())).await? {
                Some(size) => report.known_bytes = report.known_bytes.saturating_add(size),
                None => report.unknown += 1,
            }
        }

        info!(root = %result.root(), known_bytes = report.known_bytes, unknown = report.unknown, "size estimated");
        Ok(report)
    }

    /// Download the allowed leaves below `root` into `destination`.
    ///
    /// Leaves are fetched one after another in discovery order. Per-leaf
    /// problems are counted in the report; only an invalid root, an unusable
    /// destination or cancellation make the call fail.
    pub async fn download(
        &self,
        root: &str,
        destination: &Path,
        cancel: &CancellationToken,
    ) -> Result<DownloadReport> {
        let _permit = self.acquire(cancel).await?;
        let result = self.crawler.crawl(root, cancel).await?;
        let allowed: Vec<&LeafResource> = result.allowed(self.policy()).collect();

        fs::create_dir_all(destination).await?;
        let mut report = DownloadReport::new(result.len(), allowed.len(), destination.to_path_buf());
        info!(
            root = %result.root(),
            allowed = allowed.len(),
            total = result.len(),
            destination = %destination.display(),
            "download started"
        );

        let display = ProgressDisplay::new(self.style_options.clone(), allowed.len());
        let client = self.crawler.client();
        for leaf in allowed {
            let estimate = until_cancelled(cancel, estimate_size(client, leaf.url())).await?;
            let pb = display.start_leaf(leaf.name(), estimate);
            let summary = self
                .fetcher
                .fetch_observed(leaf, destination, estimate, cancel, &pb)
                .await?;
            display.finish_leaf(pb);

            debug!(message = %summary.message(), "leaf done");
            if let Some(ref callback) = self.on_complete {
                callback(&summary);
            }
            report.record(summary);
        }
        display.finish();

        info!(
            downloaded = report.downloaded(),
            skipped = report.skipped(),
            failed = report.failed(),
            "download finished"
        );
        Ok(report)
    }
}
