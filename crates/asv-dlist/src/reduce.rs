//! Callback-driven traversal.
//!
//! [`DList::reduce`] walks the list and lets the callback delete the element
//! it is looking at or stop early. [`DList::insert_reduce`] walks the list
//! looking for the place to put a new element. Both hold the list's guard for
//! the whole walk, so a callback must not call back into the same list.

use tracing::{debug, trace};

use crate::element::ElementId;
use crate::guard::ListGuard;
use crate::list::DList;
use crate::state::ListState;

/// Traversal order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Head to tail.
    Forward,
    /// Tail to head.
    Backward,
}

/// What [`DList::reduce`] should do with the element just visited.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReduceStep<B> {
    Continue,
    /// Delete the element through the destructor and keep going.
    Delete,
    /// Stop and return the value.
    Break(B),
}

/// What [`DList::insert_reduce`] should do at the current position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InsertStep<B> {
    Continue,
    /// Insert the payload here and stop.
    InsertHere,
    /// Stop without inserting.
    Break(B),
}

/// Result of [`DList::insert_reduce`].
#[derive(Debug, PartialEq, Eq)]
pub enum InsertOutcome<T, B> {
    /// The payload was linked in under this handle.
    Inserted(ElementId),
    /// The callback broke off; the payload comes back untouched.
    Stopped { value: B, payload: T },
    /// The callback declined every position including the end.
    NotInserted(T),
}

impl<T, B> InsertOutcome<T, B> {
    /// Handle of the new element, if one was inserted.
    pub fn inserted(&self) -> Option<ElementId> {
        match self {
            InsertOutcome::Inserted(id) => Some(*id),
            _ => None,
        }
    }
}

impl<T, G: ListGuard<ListState<T>>> DList<T, G> {
    /// Visit every element in `direction`.
    ///
    /// The callback sees each element's handle and payload. Deleting the
    /// current element is safe; the walk continues with the neighbor that
    /// followed it. Returns the value of the first [`ReduceStep::Break`], or
    /// `None` once the walk reaches the end.
    pub fn reduce<B>(
        &self,
        direction: Direction,
        mut f: impl FnMut(ElementId, &mut T) -> ReduceStep<B>,
    ) -> Option<B> {
        self.locked(|state| {
            let mut visited = 0usize;
            let mut deleted = 0usize;
            let mut cur = state.first(direction);
            while let Some(idx) = cur {
                let following = state.following(idx, direction);
                let id = state.id_of(idx);
                let Some(payload) = state.payload_mut(idx) else {
                    break;
                };
                visited += 1;
                match f(id, payload) {
                    ReduceStep::Continue => {}
                    ReduceStep::Delete => {
                        state.delete(idx);
                        deleted += 1;
                    }
                    ReduceStep::Break(value) => {
                        trace!(visited, deleted, "reduce stopped early");
                        return Some(value);
                    }
                }
                cur = following;
            }
            trace!(visited, deleted, "reduce finished");
            None
        })
    }

    /// Walk in `direction` until the callback picks a spot for `payload`.
    ///
    /// The callback is shown each payload in turn and finally `None` for the
    /// end position. On [`InsertStep::InsertHere`] the payload goes in
    /// front of the current element in walk order: before it when walking
    /// forward, after it when walking backward. At the end position that
    /// means the tail when walking forward and the head when walking
    /// backward.
    pub fn insert_reduce<B>(
        &self,
        payload: T,
        direction: Direction,
        mut f: impl FnMut(Option<&T>) -> InsertStep<B>,
    ) -> InsertOutcome<T, B> {
        self.locked(|state| {
            let mut cur = state.first(direction);
            while let Some(idx) = cur {
                match f(state.payload(idx)) {
                    InsertStep::Continue => {}
                    InsertStep::InsertHere => {
                        let id = match direction {
                            Direction::Forward => state.insert_before(idx, payload),
                            Direction::Backward => state.insert_after(idx, payload),
                        };
                        debug!(%id, ?direction, "inserted in walk");
                        return InsertOutcome::Inserted(id);
                    }
                    InsertStep::Break(value) => {
                        return InsertOutcome::Stopped { value, payload };
                    }
                }
                cur = state.following(idx, direction);
            }

            match f(None) {
                InsertStep::Continue => InsertOutcome::NotInserted(payload),
                InsertStep::InsertHere => {
                    let id = match direction {
                        Direction::Forward => state.append(payload),
                        Direction::Backward => state.prepend(payload),
                    };
                    debug!(%id, ?direction, "inserted at end of walk");
                    InsertOutcome::Inserted(id)
                }
                InsertStep::Break(value) => InsertOutcome::Stopped { value, payload },
            }
        })
    }
}
