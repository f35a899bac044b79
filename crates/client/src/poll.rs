//! Bounded-time polling, the only waiting primitive in the crate.
//!
//! Page loads and file downloads finish whenever they finish; every flow
//! that depends on one re-checks a condition at a fixed interval until it
//! holds or an explicit budget runs out. There is no default budget and
//! nothing waits forever.

use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use crate::driver::Driver;
use crate::{Error, Result};

/// How often conditions are re-evaluated.
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Budget for an ordinary page navigation.
pub const PAGE_LOAD_TIMEOUT: Duration = Duration::from_secs(10);

/// Budget for a triggered download to land on disk. Download duration is
/// unbounded and network-dependent, hence the size.
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(1800);

/// One evaluation of a polled condition.
pub enum Poll<T> {
    /// The condition holds; stop waiting.
    Ready(T),
    /// Not yet; carries the observed state for the eventual timeout report.
    Pending(String),
}

/// Re-evaluates `check` every [`POLL_INTERVAL`] until it is ready or
/// `timeout` elapses. The condition is always evaluated at least once. On
/// expiry fails with [`Error::Timeout`], carrying the elapsed time and the
/// last observed state.
pub fn poll_until<T>(
    timeout: Duration,
    what: &str,
    mut check: impl FnMut() -> Result<Poll<T>>,
) -> Result<T> {
    let started = Instant::now();
    let mut last_seen = String::new();

    loop {
        match check()? {
            Poll::Ready(v) => return Ok(v),
            Poll::Pending(seen) => last_seen = seen,
        }

        if started.elapsed() >= timeout {
            return Err(Error::Timeout {
                what: what.to_string(),
                waited: started.elapsed(),
                last_seen,
            });
        }

        thread::sleep(POLL_INTERVAL.min(timeout.saturating_sub(started.elapsed())));
    }
}

/// Waits until the address bar contains `fragment`.
pub fn wait_for_url<D: Driver>(driver: &D, fragment: &str, timeout: Duration) -> Result<()> {
    let what = format!("address to contain {:?}", fragment);
    poll_until(timeout, &what, || {
        let url = driver.current_url()?;
        Ok(if url.contains(fragment) {
            Poll::Ready(())
        } else {
            Poll::Pending(url)
        })
    })
}

/// Waits until a file exists at `path`.
pub fn wait_for_file(path: &Path, timeout: Duration) -> Result<()> {
    let what = format!("download at {}", path.display());
    poll_until(timeout, &what, || {
        Ok(if path.exists() {
            Poll::Ready(())
        } else {
            Poll::Pending(format!("no file at {}", path.display()))
        })
    })
}
