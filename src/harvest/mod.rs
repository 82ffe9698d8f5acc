//! Modes built on a crawl: list, count, size and download.
//!
//! Each mode crawls the root once, keeps the leaves the allow-list admits
//! and returns a structured report. Partial success is normal: a download
//! report counts downloaded, skipped and failed leaves and keeps the last
//! per-item messages.
//!
//! - [`harvester`] - [`Harvester`], its invocation pool and the modes
//! - [`report`] - the reports

pub mod harvester;
pub mod report;

pub use harvester::{CompletionCallback, Harvester, DEFAULT_LIST_LIMIT};
pub use report::{CountReport, DownloadReport, ListReport, SizeReport, MESSAGE_TAIL};
