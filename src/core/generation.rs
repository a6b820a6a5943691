//! Stale-result detection for work started against a previous account.
//!
//! Every change of active account advances a shared counter. Work launched
//! for the old account carries a [`LaunchTag`] holding the counter value at
//! launch time; when the work finishes, the tag is compared against the
//! counter and the result is dropped if the session has moved on. Nothing is
//! interrupted, results are just discarded.

use log::debug;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Monotonic generation counter shared between a session and its tags.
#[derive(Debug, Clone, Default)]
pub struct GenerationCounter(Arc<AtomicU64>);

impl GenerationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }

    /// Bump the counter and return the new generation.
    pub fn advance(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn tag(&self, alias: impl Into<String>) -> LaunchTag {
        LaunchTag {
            generation: self.current(),
            alias: alias.into(),
            counter: self.clone(),
        }
    }
}

/// Identity of the account a piece of async work was launched for.
#[derive(Debug, Clone)]
pub struct LaunchTag {
    generation: u64,
    alias: String,
    counter: GenerationCounter,
}

impl LaunchTag {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn is_current(&self) -> bool {
        self.counter.current() == self.generation
    }

    /// `Some(value)` if the session is still on this tag's generation.
    pub fn accept<T>(&self, value: T) -> Option<T> {
        if self.is_current() {
            Some(value)
        } else {
            debug!(
                "Discarding stale result for '{}' (generation {} != {})",
                self.alias,
                self.generation,
                self.counter.current()
            );
            None
        }
    }

    /// Await `work`, then apply [`LaunchTag::accept`] to its output.
    pub async fn run<Fut>(self, work: Fut) -> Option<Fut::Output>
    where
        Fut: Future,
    {
        let output = work.await;
        self.accept(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_goes_stale_after_advance() {
        let counter = GenerationCounter::new();
        let tag = counter.tag("a");
        assert!(tag.is_current());
        assert_eq!(tag.accept(1), Some(1));

        assert_eq!(counter.advance(), 1);
        assert!(!tag.is_current());
        assert_eq!(tag.accept(2), None);

        let fresh = counter.tag("b");
        assert_eq!(fresh.generation(), 1);
        assert_eq!(fresh.alias(), "b");
        assert_eq!(fresh.accept(3), Some(3));
    }
}
