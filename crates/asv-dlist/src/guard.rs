//! Lock strategies for [`DList`](crate::DList).
//!
//! The strategy is picked when the list is built. [`Locked`] serializes
//! every entry point behind a mutex and makes the list shareable across
//! threads; [`Unlocked`] does no locking and keeps the list on one thread.
//! Either way a callback that re-enters its own list is refused: the locked
//! list would deadlock, the unlocked list panics instead.

use std::cell::RefCell;
use std::sync::{Mutex, PoisonError};

/// Exclusive access to the list state for the duration of one operation.
pub trait ListGuard<S> {
    /// Whether this strategy takes a lock.
    const LOCKED: bool;

    fn new(state: S) -> Self;

    /// Run `f` with exclusive access to the state.
    fn with<R>(&self, f: impl FnOnce(&mut S) -> R) -> R;
}

/// No locking; the list stays on a single thread.
pub struct Unlocked<S>(RefCell<S>);

/// Mutex held across the whole operation, callbacks included.
pub struct Locked<S>(Mutex<S>);

impl<S> ListGuard<S> for Unlocked<S> {
    const LOCKED: bool = false;

    fn new(state: S) -> Self {
        Self(RefCell::new(state))
    }

    fn with<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        f(&mut self.0.borrow_mut())
    }
}

impl<S> ListGuard<S> for Locked<S> {
    const LOCKED: bool = true;

    fn new(state: S) -> Self {
        Self(Mutex::new(state))
    }

    fn with<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        // Links are consistent between callbacks, so a panic that poisoned
        // the mutex left nothing half-relinked.
        let mut state = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }
}
