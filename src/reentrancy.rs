//! Debug-only reentrancy guard for the map's hashing critical sections.
//!
//! `DoublyLinkedMap` calls user `Hash`/`Eq` impls while its index and
//! sequence may be out of step. If one of those impls reaches back into the
//! same map, debug builds panic instead of observing a half-updated
//! structure. Release builds compile the guard away.

use core::cell::Cell;
use core::marker::PhantomData;

/// Per-map busy flag. Public methods open a section with
/// `let _g = self.reentrancy.enter();`.
///
/// Holds a `Cell`, so the owning map is `Send` but not `Sync`.
#[derive(Debug, Default)]
pub(crate) struct DebugReentrancy {
    #[cfg(debug_assertions)]
    busy: Cell<bool>,
    // Keep the owner !Sync in release builds too.
    _unsync: PhantomData<Cell<()>>,
}

impl DebugReentrancy {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            busy: Cell::new(false),
            _unsync: PhantomData,
        }
    }

    /// Open a guarded section. Panics in debug builds if one is already open.
    #[inline]
    pub(crate) fn enter(&self) -> ReentrancyGuard<'_> {
        #[cfg(debug_assertions)]
        {
            assert!(
                !self.busy.replace(true),
                "reentrancy detected: map accessed from within its own Hash/Eq call"
            );
            return ReentrancyGuard { owner: self };
        }

        #[cfg(not(debug_assertions))]
        {
            return ReentrancyGuard { _owner: PhantomData };
        }
    }
}

/// Closes the section opened by [`DebugReentrancy::enter`] on drop.
pub(crate) struct ReentrancyGuard<'a> {
    #[cfg(debug_assertions)]
    owner: &'a DebugReentrancy,
    #[cfg(not(debug_assertions))]
    _owner: PhantomData<&'a DebugReentrancy>,
}

impl Drop for ReentrancyGuard<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        self.owner.busy.set(false);
    }
}
