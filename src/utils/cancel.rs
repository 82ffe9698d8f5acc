//! Cancellation support for network operations.

use crate::error::{Error, Result};

use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Await `fut` unless `cancel` fires first.
///
/// Cancellation wins ties, so an already cancelled token never starts the
/// operation.
pub async fn until_cancelled<F>(cancel: &CancellationToken, fut: F) -> Result<F::Output>
where
    F: Future,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(Error::Cancelled),
        out = fut => Ok(out),
    }
}
