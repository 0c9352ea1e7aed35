//! Deadline wrapper for outbound calls.
//!
//! Races a future against a timer. When the timer fires first the future
//! is dropped and whatever it would have produced is discarded, so a slow
//! provider can never hold a request open past its deadline.

use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// The wrapped call did not finish before the deadline.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("deadline of {}ms exceeded", .0.as_millis())]
pub struct DeadlineExceeded(pub Duration);

/// Run `fut` with an upper time limit.
pub async fn with_deadline<F>(limit: Duration, fut: F) -> Result<F::Output, DeadlineExceeded>
where
    F: Future,
{
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| DeadlineExceeded(limit))
}
