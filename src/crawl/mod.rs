//! Traversal engine: breadth-first walk of a listing tree.
//!
//! - [`crawler`] - the [`Crawler`] and its bounded BFS
//! - [`links`] - the link-extraction collaborator
//! - [`result`] - [`CrawlResult`], the ordered leaf set
//!
//! Leaves come back in discovery order: page order within a directory,
//! directories in FIFO order. The same pages always yield the same result.

pub mod crawler;
pub mod links;
pub mod result;

pub use crawler::Crawler;
pub use links::{resolve_links, HtmlLinkExtractor, LinkExtractor};
pub use result::CrawlResult;
