//! ---
//! sb_section: "02-harness"
//! sb_subsection: "module"
//! sb_type: "source"
//! sb_scope: "code"
//! sb_description: "Bound on simultaneously running children."
//! sb_version: "v0.0.0-prealpha"
//! sb_owner: "tbd"
//! ---
use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::error::Result;

/// Caps how many children may be running at once.
///
/// A launch acquires a slot before spawning and the slot is released once the
/// child has been reaped, so launches past the bound queue in order.
#[derive(Debug, Clone)]
pub struct LaunchLimiter {
    slots: Option<Arc<Semaphore>>,
}

/// Held for as long as a child runs. `None` when unbounded.
#[derive(Debug)]
pub struct LaunchSlot {
    _permit: Option<OwnedSemaphorePermit>,
}

impl LaunchLimiter {
    /// `None` disables the bound.
    pub fn new(max_in_flight: Option<usize>) -> Self {
        Self {
            slots: max_in_flight.map(|max| Arc::new(Semaphore::new(max))),
        }
    }

    pub fn unbounded() -> Self {
        Self::new(None)
    }

    pub fn is_bounded(&self) -> bool {
        self.slots.is_some()
    }

    /// Free slots, or `None` when unbounded.
    pub fn available(&self) -> Option<usize> {
        self.slots.as_ref().map(|slots| slots.available_permits())
    }

    pub async fn acquire(&self) -> Result<LaunchSlot> {
        let permit = match &self.slots {
            Some(slots) => Some(Arc::clone(slots).acquire_owned().await?),
            None => None,
        };
        Ok(LaunchSlot { _permit: permit })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn unbounded_never_blocks() {
        let limiter = LaunchLimiter::unbounded();
        let mut slots = Vec::new();
        for _ in 0..64 {
            slots.push(limiter.acquire().await.unwrap());
        }
        assert!(!limiter.is_bounded());
        assert_eq!(limiter.available(), None);
    }

    #[tokio::test]
    async fn bounded_queues_until_slot_released() {
        let limiter = LaunchLimiter::new(Some(2));
        let first = limiter.acquire().await.unwrap();
        let _second = limiter.acquire().await.unwrap();
        assert_eq!(limiter.available(), Some(0));

        let blocked = tokio::time::timeout(Duration::from_millis(20), limiter.acquire()).await;
        assert!(blocked.is_err(), "third launch must queue");

        drop(first);
        let third = tokio::time::timeout(Duration::from_millis(200), limiter.acquire()).await;
        assert!(third.is_ok());
    }
}
