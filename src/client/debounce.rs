use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Quiet period before a typed search query is submitted
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Debounces search-box input.
///
/// Every `submit` supersedes the previous one; a value is emitted only if nothing
/// newer arrived during the quiet period. Blank input is never emitted, but it still
/// cancels whatever was pending.
pub struct Debouncer {
    delay: Duration,
    generation: AtomicU64,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: AtomicU64::new(0),
        }
    }

    /// Resolves to the value once it has been stable for the delay, or `None` if superseded
    pub async fn submit(&self, value: &str) -> Option<String> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if value.trim().is_empty() {
            return None;
        }

        tokio::time::sleep(self.delay).await;

        (self.generation.load(Ordering::SeqCst) == generation).then(|| value.to_string())
    }

    /// Drops any pending value, as when the search box is reset
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}
