//! Streaming fetcher: downloads one leaf under the byte ceiling.
//!
//! - [`fetcher`] - the [`Fetcher`]
//! - [`outcome`] - [`FetchOutcome`], the per-item result
//! - [`partial`] - the `.part` file guard
//! - [`summary`] - [`Summary`], an outcome with its leaf and destination

pub mod fetcher;
pub mod outcome;
pub mod partial;
pub mod summary;

pub use fetcher::{Fetcher, CHUNK_SIZE};
pub use outcome::FetchOutcome;
pub use partial::{partial_path, PARTIAL_SUFFIX};
pub use summary::Summary;
