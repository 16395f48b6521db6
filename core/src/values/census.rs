//! Test-only bookkeeping of `Value` constructions and drops.
//!
//! Counters are thread-local so tests running in parallel do not observe each
//! other's allocations.

use std::cell::Cell;

thread_local! {
    static CREATED: Cell<usize> = const { Cell::new(0) };
    static DROPPED: Cell<usize> = const { Cell::new(0) };
}

pub(crate) fn record_created() {
    CREATED.with(|count| count.set(count.get() + 1));
}

pub(crate) fn record_dropped() {
    DROPPED.with(|count| count.set(count.get() + 1));
}

/// Counter readings at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Census {
    pub created: usize,
    pub dropped: usize,
}

impl Census {
    pub(crate) fn take() -> Self {
        Census {
            created: CREATED.with(Cell::get),
            dropped: DROPPED.with(Cell::get),
        }
    }

    /// Constructions and drops that happened after `self` was taken.
    pub(crate) fn delta(self) -> Census {
        let now = Census::take();
        Census {
            created: now.created - self.created,
            dropped: now.dropped - self.dropped,
        }
    }
}
