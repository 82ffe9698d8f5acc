//! Fetch summary: a leaf, where it was meant to land, and what happened.
//!
//! # Examples
//!
//! ```rust
//! use spelunk::classify::LeafResource;
//! use spelunk::fetch::{FetchOutcome, Summary};
//! use reqwest::Url;
//! use std::path::PathBuf;
//!
//! let leaf = LeafResource::from_url(&Url::parse("http://example.com/a.pdf").unwrap());
//! let summary = Summary::new(
//!     leaf,
//!     PathBuf::from("out/a.pdf"),
//!     None,
//!     FetchOutcome::Downloaded(2048),
//! );
//! assert_eq!(summary.message(), "OK a.pdf (2.00 KB)");
//! ```

use super::outcome::FetchOutcome;
use crate::classify::LeafResource;
use crate::utils::human_bytes;

use std::path::{Path, PathBuf};

/// Represents a [`LeafResource`] fetch summary.
#[derive(Debug, Clone)]
pub struct Summary {
    /// The fetched leaf.
    leaf: LeafResource,
    /// Final path of the file on disk.
    destination: PathBuf,
    /// Size estimate known before the transfer.
    estimate: Option<u64>,
    /// Outcome.
    outcome: FetchOutcome,
}

impl Summary {
    /// Create a new [`Summary`] of a finished fetch.
    pub fn new(
        leaf: LeafResource,
        destination: PathBuf,
        estimate: Option<u64>,
        outcome: FetchOutcome,
    ) -> Self {
        Self {
            leaf,
            destination,
            estimate,
            outcome,
        }
    }

    /// Get a reference to the summary's leaf.
    pub fn leaf(&self) -> &LeafResource {
        &self.leaf
    }

    /// Get the final path of the file.
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Get the size estimate known before the transfer.
    pub fn estimate(&self) -> Option<u64> {
        self.estimate
    }

    /// Get a reference to the summary's outcome.
    pub fn outcome(&self) -> &FetchOutcome {
        &self.outcome
    }

    /// One line describing the outcome for a user.
    pub fn message(&self) -> String {
        let name = self.leaf.name();
        match &self.outcome {
            FetchOutcome::Downloaded(bytes) => format!("OK {} ({})", name, human_bytes(*bytes)),
            FetchOutcome::SkippedTooLarge(size) => {
                format!("SKIP too large: {} ({})", name, human_bytes(*size))
            }
            FetchOutcome::SkippedLimitExceededMidTransfer => {
                format!("SKIP exceeded limit: {}", name)
            }
            FetchOutcome::Failed(cause) => format!("FAIL {}: {}", name, cause),
        }
    }
}
