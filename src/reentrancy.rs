//! Catches comparators and `Eq`/`Hash` impls that reach back into the
//! container calling them.
//!
//! Tree searches and bucket probes hold a guard while user code runs. A
//! debug build panics on a nested entry into the same container; a release
//! build compiles the guard away.

use core::cell::Cell;
use core::marker::PhantomData;

/// Depth counter owned by each engine (`RbTree`, `ChainedTable`).
#[derive(Debug)]
pub struct DebugReentrancy {
    #[cfg(debug_assertions)]
    depth: Cell<u32>,
    // !Sync in every build profile, matching the debug layout.
    _nosync: PhantomData<Cell<()>>,
}

impl DebugReentrancy {
    pub const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            depth: Cell::new(0),
            _nosync: PhantomData,
        }
    }

    /// Mark the start of a search that calls user code. Dropping the
    /// returned guard marks the end.
    ///
    /// # Panics
    ///
    /// Debug builds panic when a search of this container is already running.
    #[inline]
    pub fn enter(&self) -> ReentrancyGuard<'_> {
        #[cfg(debug_assertions)]
        {
            let d = self.depth.get();
            assert!(
                d == 0,
                "reentrancy detected: container re-entered from a comparator, Eq or Hash impl"
            );
            self.depth.set(d + 1);
            ReentrancyGuard { owner: self }
        }

        #[cfg(not(debug_assertions))]
        {
            ReentrancyGuard { _z: PhantomData }
        }
    }
}

impl Default for DebugReentrancy {
    fn default() -> Self {
        Self::new()
    }
}

// A cloned container starts outside any guarded section.
impl Clone for DebugReentrancy {
    fn clone(&self) -> Self {
        Self::new()
    }
}

/// Live while a search runs; see [`DebugReentrancy::enter`].
pub struct ReentrancyGuard<'a> {
    #[cfg(debug_assertions)]
    owner: &'a DebugReentrancy,
    #[cfg(not(debug_assertions))]
    _z: PhantomData<&'a ()>,
}

impl Drop for ReentrancyGuard<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        {
            let d = self.owner.depth.get();
            debug_assert!(d > 0);
            self.owner.depth.set(d - 1);
        }
    }
}
