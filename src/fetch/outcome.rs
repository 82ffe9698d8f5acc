//! Per-item result of a fetch.

use std::fmt;

/// What happened to one leaf.
///
/// Skips and failures are ordinary values; none of them aborts the
/// processing of the remaining leaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The file was written completely; carries its size in bytes.
    Downloaded(u64),
    /// The estimated size exceeded the byte ceiling; carries the estimate.
    /// No GET was issued.
    SkippedTooLarge(u64),
    /// The bytes received crossed the ceiling; the partial file was removed.
    SkippedLimitExceededMidTransfer,
    /// Transport or file system error; carries the cause.
    Failed(String),
}

impl FetchOutcome {
    /// A failure carrying the display text of `cause`.
    pub fn failed(cause: impl fmt::Display) -> Self {
        FetchOutcome::Failed(cause.to_string())
    }

    pub fn is_downloaded(&self) -> bool {
        matches!(self, FetchOutcome::Downloaded(_))
    }

    /// Whether the leaf was skipped by a size check.
    pub fn is_skipped(&self) -> bool {
        matches!(
            self,
            FetchOutcome::SkippedTooLarge(_) | FetchOutcome::SkippedLimitExceededMidTransfer
        )
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FetchOutcome::Failed(_))
    }

    /// Bytes written for a downloaded leaf.
    pub fn bytes(&self) -> Option<u64> {
        match self {
            FetchOutcome::Downloaded(bytes) => Some(*bytes),
            _ => None,
        }
    }
}

impl fmt::Display for FetchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchOutcome::Downloaded(bytes) => write!(f, "downloaded {} bytes", bytes),
            FetchOutcome::SkippedTooLarge(size) => write!(f, "too large ({} bytes)", size),
            FetchOutcome::SkippedLimitExceededMidTransfer => write!(f, "exceeded limit"),
            FetchOutcome::Failed(cause) => write!(f, "failed: {}", cause),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        assert!(FetchOutcome::Downloaded(3).is_downloaded());
        assert!(FetchOutcome::SkippedTooLarge(3).is_skipped());
        assert!(FetchOutcome::SkippedLimitExceededMidTransfer.is_skipped());
        assert!(FetchOutcome::Failed("boom".into()).is_failed());
        assert_eq!(FetchOutcome::Downloaded(3).bytes(), Some(3));
        assert_eq!(FetchOutcome::SkippedTooLarge(3).bytes(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            FetchOutcome::Failed("connection reset".into()).to_string(),
            "failed: connection reset"
        );
        assert_eq!(
            FetchOutcome::SkippedLimitExceededMidTransfer.to_string(),
            "exceeded limit"
        );
    }
}
