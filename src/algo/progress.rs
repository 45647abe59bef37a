//! Progress reporting for the outline pipeline.
//!
//! ```
//! use facetline::algo::Progress;
//!
//! let progress = Progress::new(|current, total, message| {
//!     eprintln!("[{}/{}] {}", current, total, message);
//! });
//! progress.report(1, 4, "Building triangles");
//! ```

type Callback = Box<dyn Fn(usize, usize, &str) + Send + Sync>;

/// A progress callback receiving `(current, total, message)` stage updates.
pub struct Progress {
    callback: Option<Callback>,
}

impl Progress {
    /// Create a new progress reporter with the given callback.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(usize, usize, &str) + Send + Sync + 'static,
    {
        Self {
            callback: Some(Box::new(callback)),
        }
    }

    /// A reporter that discards all updates.
    pub fn none() -> Self {
        Self { callback: None }
    }

    /// Whether updates go anywhere.
    pub fn is_silent(&self) -> bool {
        self.callback.is_none()
    }

    /// Report that `current` of `total` stages are complete.
    #[inline]
    pub fn report(&self, current: usize, total: usize, message: &str) {
        if let Some(callback) = &self.callback {
            callback(current, total, message);
        }
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::none()
    }
}

impl std::fmt::Debug for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Progress")
            .field("silent", &self.is_silent())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_callback_receives_updates() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let progress = Progress::new(move |current, total, _| {
            assert!(current <= total);
            counter.fetch_add(1, Ordering::Relaxed);
        });
        progress.report(0, 2, "a");
        progress.report(2, 2, "b");
        assert_eq!(calls.load(Ordering::Relaxed), 2);
        assert!(!progress.is_silent());
    }

    #[test]
    fn test_none_is_silent() {
        let progress = Progress::default();
        assert!(progress.is_silent());
        progress.report(1, 1, "ignored");
    }
}
