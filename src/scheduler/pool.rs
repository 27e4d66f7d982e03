use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::scheduler::backoff::PollBackoff;

static NEXT_POOL_ID: AtomicU64 = AtomicU64::new(1);

/// One unit of a [`ResourcePool`]'s concurrency budget.
///
/// Not `Clone`: a slot can only be handed back once.
#[derive(Debug)]
#[must_use = "a runner slot must be released back to its pool"]
pub struct RunnerSlot {
    pool_id: u64,
}

/// Counting semaphore bounding how many widget handlers execute at once.
#[derive(Debug)]
pub struct ResourcePool {
    id: u64,
    limit: usize,
    available: Mutex<usize>,
}

impl ResourcePool {
    /// Pool with `limit` slots (at least one).
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            id: NEXT_POOL_ID.fetch_add(1, Ordering::Relaxed),
            limit,
            available: Mutex::new(limit),
        }
    }

    /// Configured number of slots.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Slots currently free.
    pub fn available(&self) -> usize {
        *self.available.lock()
    }

    /// Slots currently held.
    pub fn held(&self) -> usize {
        self.limit - self.available()
    }

    /// Take a slot if one is free; never blocks.
    pub fn try_acquire(&self) -> Option<RunnerSlot> {
        let mut available = self.available.lock();
        if *available == 0 {
            return None;
        }
        *available -= 1;
        Some(RunnerSlot { pool_id: self.id })
    }

    /// Poll [`ResourcePool::try_acquire`] until a slot frees up.
    pub fn acquire(&self, backoff: &mut PollBackoff) -> RunnerSlot {
        backoff.reset();
        loop {
            if let Some(slot) = self.try_acquire() {
                return slot;
            }
            backoff.wait();
        }
    }

    /// Return `slot` to the pool.
    ///
    /// # Panics
    ///
    /// If the slot belongs to another pool or the pool is already full; both mean slot
    /// accounting is broken.
    pub fn release(&self, slot: RunnerSlot) {
        assert_eq!(
            slot.pool_id, self.id,
            "runner slot released into a pool it was not acquired from"
        );
        let mut available = self.available.lock();
        assert!(
            *available < self.limit,
            "runner slot released into a full pool ({} slots)",
            self.limit
        );
        *available += 1;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scheduler/pool.rs"]
mod tests;
