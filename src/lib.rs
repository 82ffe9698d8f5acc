//! Spelunk enumerates the files reachable from an HTTP directory listing and
//! downloads them under strict limits, through a forward proxy.
//!
//! A crawl walks the listing tree breadth first, staying on the root's
//! origin and below the root's path. Downloads are streamed under a hard
//! byte ceiling and never leave a truncated file behind.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use spelunk::{Error, Harvester, PolicyBuilder};
//! use std::path::Path;
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let policy = PolicyBuilder::new()
//!     .proxy("socks5h://127.0.0.1:9050")
//!     .allowed_extensions_csv("pdf,zip")
//!     .max_megabytes(50)
//!     .build()?;
//! let harvester = Harvester::new(policy)?;
//!
//! let root = "http://abcdefghijklmnopqrstuvwxyz234567abcdefghijklmnopqrstuv.onion/files/";
//! let cancel = CancellationToken::new();
//! let listing = harvester.list(root, 20, &cancel).await?;
//! for leaf in listing.leaves() {
//!     println!("{}", leaf.url());
//! }
//!
//! let report = harvester.download(root, Path::new("output"), &cancel).await?;
//! println!("{}", report);
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`policy`] - limits and transport options, built with `PolicyBuilder`
//! - [`http`] - the proxied HTTP client and the page-body fetch
//! - [`classify`] - origin and path checks, directory versus leaf decisions
//! - [`crawl`] - the breadth-first traversal engine
//! - [`estimate`] - best-effort size estimation
//! - [`fetch`] - the streaming fetcher and its per-item outcomes
//! - [`harvest`] - list, count, size and download modes
//! - [`progress`] - progress bar styling and display
//! - [`session`] - caller-owned paging sessions
//! - [`error`] - the `Error` enum
//! - [`utils`] - header parsing and byte formatting

pub mod classify;
pub mod crawl;
pub mod error;
pub mod estimate;
pub mod fetch;
pub mod harvest;
pub mod http;
pub mod policy;
pub mod progress;
pub mod session;
pub mod utils;

pub use classify::LeafResource;
pub use crawl::{CrawlResult, Crawler};
pub use error::{Error, Result};
pub use estimate::estimate_size;
pub use fetch::{FetchOutcome, Fetcher, Summary};
pub use harvest::Harvester;
pub use http::{create_http_client, HttpClientConfig};
pub use policy::{Policy, PolicyBuilder};
pub use progress::{ProgressBarOpts, StyleOptions};
pub use session::{BrowseSession, SessionStore};
