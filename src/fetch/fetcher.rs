//! Streaming download of a single leaf under a hard byte ceiling.
//!
//! The body is streamed into `<name>.part` next to its destination and only
//! renamed once complete. Crossing the ceiling, a transport error or a
//! cancellation removes the partial file before returning, so after a fetch
//! the destination either holds the whole file or nothing.
//!
//! # Examples
//!
//! ```rust,no_run
//! use spelunk::classify::LeafResource;
//! use spelunk::fetch::{FetchOutcome, Fetcher};
//! use spelunk::policy::PolicyBuilder;
//! use reqwest::Url;
//! use std::path::Path;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> spelunk::Result<()> {
//! let policy = PolicyBuilder::new().max_megabytes(10).build()?;
//! let fetcher = Fetcher::new(policy)?;
//!
//! let leaf = LeafResource::from_url(&Url::parse("http://example.com/docs/a.pdf").unwrap());
//! let summary = fetcher
//!     .fetch(&leaf, Path::new("./downloads"), &CancellationToken::new())
//!     .await?;
//! if let FetchOutcome::Downloaded(bytes) = summary.outcome() {
//!     println!("{} bytes in {}", bytes, summary.destination().display());
//! }
//! # Ok(())
//! # }
//! ```

use super::outcome::FetchOutcome;
use super::partial::{partial_path, PartialFile};
use super::summary::Summary;
use crate::classify::LeafResource;
use crate::error::{Error, Result};
use crate::estimate::estimate_size;
use crate::http::client_for_policy;
use crate::policy::Policy;
use crate::utils::until_cancelled;

use futures::StreamExt;
use indicatif::ProgressBar;
use reqwest_middleware::ClientWithMiddleware;
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::{
    fs,
    io::{AsyncWriteExt, BufWriter},
};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Size of the buffered writes to disk.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Downloads leaves to a destination root.
#[derive(Clone)]
pub struct Fetcher {
    client: ClientWithMiddleware,
    policy: Policy,
}

impl fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fetcher")
            .field("policy", &self.policy)
            .finish()
    }
}

impl Fetcher {
    /// Creates a fetcher with a client routed according to `policy`.
    pub fn new(policy: Policy) -> Result<Self> {
        let client = client_for_policy(&policy)?;
        Ok(Self::with_client(client, policy))
    }

    /// Creates a fetcher sharing an existing client.
    pub fn with_client(client: ClientWithMiddleware, policy: Policy) -> Self {
        Self { client, policy }
    }

    /// Gets the fetch policy.
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Final path of `leaf` below `root`.
    pub fn destination(&self, leaf: &LeafResource, root: &Path) -> PathBuf {
        root.join(leaf.relative_path())
    }

    /// Estimates the size of `leaf`, then fetches it.
    ///
    /// Only cancellation is an error; every other problem is reported in the
    /// summary's [`FetchOutcome`].
    pub async fn fetch(
        &self,
        leaf: &LeafResource,
        root: &Path,
        cancel: &CancellationToken,
    ) -> Result<Summary> {
        let estimate = until_cancelled(cancel, estimate_size(&self.client, leaf.url())).await?;
        self.fetch_with_estimate(leaf, root, estimate, cancel).await
    }

    /// Fetches `leaf` using an estimate obtained earlier.
    ///
    /// An estimate above the byte ceiling skips the leaf without any request.
    pub async fn fetch_with_estimate(
        &self,
        leaf: &LeafResource,
        root: &Path,
        estimate: Option<u64>,
        cancel: &CancellationToken,
    ) -> Result<Summary> {
        self.fetch_observed(leaf, root, estimate, cancel, &ProgressBar::hidden())
            .await
    }

    /// Same as [`Fetcher::fetch_with_estimate`], reporting received bytes on
    /// `pb`.
    pub(crate) async fn fetch_observed(
        &self,
        leaf: &LeafResource,
        root: &Path,
        estimate: Option<u64>,
        cancel: &CancellationToken,
        pb: &ProgressBar,
    ) -> Result<Summary> {
        let destination = self.destination(leaf, root);
        let outcome = self
            .transfer(leaf, &destination, estimate, cancel, pb)
            .await?;
        Ok(Summary::new(leaf.clone(), destination, estimate, outcome))
    }

    async fn transfer(
        &self,
        leaf: &LeafResource,
        destination: &Path,
        estimate: Option<u64>,
        cancel: &CancellationToken,
        pb: &ProgressBar,
    ) -> Result<FetchOutcome> {
        let max_bytes = self.policy.max_bytes();

        if let Some(size) = estimate.filter(|size| *size > max_bytes) {
            debug!(url = %leaf.url(), size, max_bytes, "estimate above limit");
            return Ok(FetchOutcome::SkippedTooLarge(size));
        }

        if let Some(dir) = destination.parent() {
            debug!("Creating destination directory {:?}", dir);
            if let Err(e) = fs::create_dir_all(dir).await {
                return Ok(FetchOutcome::failed(e));
            }
        }

        debug!(url = %leaf.url(), "fetching");
        let res = match until_cancelled(cancel, self.client.get(leaf.url().clone()).send()).await? {
            Ok(res) => res,
            Err(e) => return Ok(FetchOutcome::failed(e)),
        };
        let status = res.status();
        if !status.is_success() {
            return Ok(FetchOutcome::failed(Error::Status(status)));
        }

        if let Some(len) = estimate.or_else(|| res.content_length()) {
            pb.set_length(len);
        }

        let partial = PartialFile::new(partial_path(destination));
        let file = match fs::File::create(partial.path()).await {
            Ok(file) => file,
            Err(e) => {
                partial.discard().await;
                return Ok(FetchOutcome::failed(e));
            }
        };
        let mut writer = BufWriter::with_capacity(CHUNK_SIZE, file);
        let mut received: u64 = 0;
        let mut stream = res.bytes_stream();

        debug!("Retrieving chunks...");
        loop {
            let item = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    drop(writer);
                    partial.discard().await;
                    debug!(url = %leaf.url(), received, "cancelled mid-transfer");
                    return Err(Error::Cancelled);
                }
                item = stream.next() => item,
            };
            let Some(item) = item else {
                break;
            };

            let chunk = match item {
                Ok(chunk) => chunk,
                Err(e) => {
                    drop(writer);
                    partial.discard().await;
                    return Ok(FetchOutcome::failed(e));
                }
            };

            received += chunk.len() as u64;
            if received > max_bytes {
                drop(writer);
                partial.discard().await;
                debug!(url = %leaf.url(), received, max_bytes, "limit exceeded mid-transfer");
                return Ok(FetchOutcome::SkippedLimitExceededMidTransfer);
            }

            if let Err(e) = writer.write_all(&chunk).await {
                drop(writer);
                partial.discard().await;
                return Ok(FetchOutcome::failed(e));
            }
            pb.inc(chunk.len() as u64);
        }

        if let Err(e) = writer.flush().await {
            drop(writer);
            partial.discard().await;
            return Ok(FetchOutcome::failed(e));
        }
        drop(writer);

        if let Err(e) = partial.commit(destination).await {
            return Ok(FetchOutcome::failed(e));
        }

        debug!(url = %leaf.url(), bytes = received, path = %destination.display(), "downloaded");
        Ok(FetchOutcome::Downloaded(received))
    }
}
