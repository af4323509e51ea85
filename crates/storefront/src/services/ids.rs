//! Creation-time ID allocation.
//!
//! Identities and orders are numbered by the millisecond they were created
//! in. Two creations within the same millisecond would collide, so the
//! allocator never hands out a value less than or equal to the last one.

use chrono::{DateTime, Utc};

/// Strictly increasing, time-derived ID source.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    last: i64,
}

impl IdAllocator {
    /// Create an allocator with no history.
    #[must_use]
    pub const fn new() -> Self {
        Self { last: 0 }
    }

    /// Record an ID that is already in use so it is never handed out again.
    pub fn observe(&mut self, id: i64) {
        self.last = self.last.max(id);
    }

    /// Allocate an ID for an entity created at `now`.
    pub fn allocate_at(&mut self, now: DateTime<Utc>) -> i64 {
        let id = now.timestamp_millis().max(self.last.saturating_add(1));
        self.last = id;
        id
    }

    /// Allocate an ID for an entity created now.
    pub fn allocate(&mut self) -> i64 {
        self.allocate_at(Utc::now())
    }
}
