//! Debounced search with a stale-response guard.
//!
//! Typing surfaces call [`SearchSession::run`] once per input change. A
//! monotonically increasing generation counter stands in for cancellation:
//! a request commits its result only if it is still the latest generation
//! both after the quiet period and after the response arrives. Responses can
//! therefore arrive in any order without an older query's results ever being
//! shown for newer input.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Quiet period on the main search surface.
pub const MAIN_DEBOUNCE: Duration = Duration::from_millis(500);

/// Quiet period on the inline atom picker.
pub const PICKER_DEBOUNCE: Duration = Duration::from_millis(300);

/// Minimum input length before the main surface issues a query.
pub const MAIN_MIN_CHARS: usize = 3;

/// Minimum input length on the picker.
pub const PICKER_MIN_CHARS: usize = 2;

/// One typing surface's debounce state.
pub struct SearchSession {
    latest: AtomicU64,
    debounce: Duration,
    min_chars: usize,
}

impl SearchSession {
    pub fn new(debounce: Duration, min_chars: usize) -> Self {
        Self {
            latest: AtomicU64::new(0),
            debounce,
            min_chars,
        }
    }

    pub fn main_surface() -> Self {
        Self::new(MAIN_DEBOUNCE, MAIN_MIN_CHARS)
    }

    pub fn picker() -> Self {
        Self::new(PICKER_DEBOUNCE, PICKER_MIN_CHARS)
    }

    /// Debounce `input`, then run `issue` for it if no newer input has
    /// arrived. Returns `None` when the query was never issued (input too
    /// short or superseded during the quiet period) or when its response is
    /// stale (newer input arrived while it was in flight).
    ///
    /// Every call bumps the generation, including too-short inputs: deleting
    /// back to one character must still invalidate an in-flight query for
    /// the longer text.
    pub async fn run<T, Fut>(&self, input: &str, issue: impl FnOnce(String) -> Fut) -> Option<T>
    where
        Fut: Future<Output = T>,
    {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let input = input.trim().to_string();
        if input.chars().count() < self.min_chars {
            return None;
        }

        tokio::time::sleep(self.debounce).await;
        if self.latest.load(Ordering::SeqCst) != generation {
            tracing::trace!(%input, "search superseded during quiet period");
            return None;
        }

        let result = issue(input.clone()).await;
        if self.latest.load(Ordering::SeqCst) != generation {
            tracing::trace!(%input, "discarding stale search response");
            return None;
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn short_input_is_never_issued() {
        let session = SearchSession::main_surface();
        let hit = session.run("ab", |_| async { 1 }).await;
        assert_eq!(hit, None);
    }

    #[tokio::test(start_paused = true)]
    async fn lone_query_commits_after_the_quiet_period() {
        let session = SearchSession::main_surface();
        let hit = session.run("bitcoin", |text| async move { text }).await;
        assert_eq!(hit.as_deref(), Some("bitcoin"));
    }
}
