use std::{future::Future, time::Duration};

use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::error::{Error, Result};

/// Fixed-interval polling schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    /// Pause between two status requests.
    pub interval: Duration,
    /// Give up once this much time has passed since the first request.
    pub timeout: Duration,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            timeout: Duration::from_secs(180),
        }
    }
}

impl PollOptions {
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }
}

pub(crate) enum Step<T> {
    Done(T),
    Pending,
}

/// Run `step` until it reports [Step::Done].
///
/// `step` always runs at least once. After a pending step the deadline is
/// checked before sleeping, so the last request may happen up to one
/// `interval` before the deadline.
pub(crate) async fn poll<T, F, Fut>(options: PollOptions, mut step: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Step<T>>>,
{
    let deadline = Instant::now() + options.timeout;
    let mut attempt = 1usize;
    loop {
        if let Step::Done(value) = step().await? {
            return Ok(value);
        }
        if Instant::now() >= deadline {
            return Err(Error::PollTimeout(options.timeout));
        }
        debug!("attempt {attempt} still pending, retrying in {:?}", options.interval);
        attempt += 1;
        sleep(options.interval).await;
    }
}
