use std::fmt;
use std::marker::PhantomData;

use tracing::trace;

use crate::element::ElementId;
use crate::error::{DListError, Result};
use crate::guard::{ListGuard, Locked, Unlocked};
use crate::reduce::Direction;
use crate::state::{Destructor, ListState};

/// Doubly linked list with O(1) insertion and deletion by handle.
///
/// The list owns the link structure but not the lifetime policy of its
/// payloads: whenever it deletes an element on its own it hands the payload
/// to the destructor callback, if one is installed. The lock strategy `G` is
/// fixed at construction; see [`DList::new`] and [`DList::new_locked`].
pub struct DList<T, G = Unlocked<ListState<T>>> {
    guard: G,
    _payload: PhantomData<fn() -> T>,
}

/// A [`DList`] whose every entry point holds a mutex.
pub type LockedDList<T> = DList<T, Locked<ListState<T>>>;

impl<T> DList<T> {
    /// An unlocked list without a destructor.
    pub fn new() -> Self {
        Self::build(None)
    }

    /// An unlocked list whose deletions go through `destructor`.
    pub fn with_destructor(destructor: impl FnMut(T) + Send + 'static) -> Self {
        Self::build(Some(Box::new(destructor)))
    }
}

impl<T> Default for DList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DList<T, Locked<ListState<T>>> {
    /// A locked list without a destructor.
    pub fn new_locked() -> Self {
        Self::build(None)
    }

    /// A locked list whose deletions go through `destructor`.
    pub fn locked_with_destructor(destructor: impl FnMut(T) + Send + 'static) -> Self {
        Self::build(Some(Box::new(destructor)))
    }
}

impl<T, G: ListGuard<ListState<T>>> DList<T, G> {
    fn build(destructor: Option<Destructor<T>>) -> Self {
        Self {
            guard: G::new(ListState::new(destructor)),
            _payload: PhantomData,
        }
    }

    /// Run `f` with exclusive access to the link state.
    pub(crate) fn locked<R>(&self, f: impl FnOnce(&mut ListState<T>) -> R) -> R {
        self.guard.with(f)
    }

    /// Whether entry points serialize on a mutex.
    pub fn uses_lock(&self) -> bool {
        G::LOCKED
    }

    /// Install or clear the destructor.
    pub fn set_destructor(&self, destructor: Option<Destructor<T>>) {
        self.locked(|state| state.set_destructor(destructor));
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.locked(|state| state.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn head(&self) -> Option<ElementId> {
        self.locked(|state| state.head().map(|idx| state.id_of(idx)))
    }

    pub fn tail(&self) -> Option<ElementId> {
        self.locked(|state| state.tail().map(|idx| state.id_of(idx)))
    }

    /// The element after `id`, or `None` at the tail or for a stale handle.
    pub fn next(&self, id: ElementId) -> Option<ElementId> {
        self.neighbor(id, Direction::Forward)
    }

    /// The element before `id`, or `None` at the head or for a stale handle.
    pub fn prev(&self, id: ElementId) -> Option<ElementId> {
        self.neighbor(id, Direction::Backward)
    }

    fn neighbor(&self, id: ElementId, direction: Direction) -> Option<ElementId> {
        self.locked(|state| {
            let idx = state.resolve(id)?;
            state.following(idx, direction).map(|n| state.id_of(n))
        })
    }

    /// Returns `true` if `id` names a live element of this list.
    pub fn contains(&self, id: ElementId) -> bool {
        self.locked(|state| state.resolve(id).is_some())
    }

    /// Run `f` on the payload of `id`, if it is live.
    pub fn with<R>(&self, id: ElementId, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        self.locked(|state| {
            let idx = state.resolve(id)?;
            state.payload_mut(idx).map(f)
        })
    }

    // ---------------------------------------------------------------
    // Insertion
    // ---------------------------------------------------------------

    /// Add `payload` at the head.
    pub fn prepend(&self, payload: T) -> ElementId {
        self.locked(|state| state.prepend(payload))
    }

    /// Add `payload` at the tail.
    pub fn append(&self, payload: T) -> ElementId {
        self.locked(|state| state.append(payload))
    }

    /// Add `payload` right before `cur`.
    pub fn insert_before(&self, cur: ElementId, payload: T) -> Result<ElementId> {
        self.locked(|state| {
            let idx = state.resolve(cur).ok_or(DListError::StaleElement(cur))?;
            Ok(state.insert_before(idx, payload))
        })
    }

    /// Add `payload` right after `cur`.
    pub fn insert_after(&self, cur: ElementId, payload: T) -> Result<ElementId> {
        self.locked(|state| {
            let idx = state.resolve(cur).ok_or(DListError::StaleElement(cur))?;
            Ok(state.insert_after(idx, payload))
        })
    }

    // ---------------------------------------------------------------
    // Deletion
    // ---------------------------------------------------------------

    /// Unlink `id` and pass its payload to the destructor.
    ///
    /// Returns `false` (and does nothing) for an empty list or a handle that
    /// no longer names a live element.
    pub fn delete(&self, id: ElementId) -> bool {
        self.locked(|state| match state.resolve(id) {
            Some(idx) => state.delete(idx),
            None => false,
        })
    }

    /// Unlink `id` and give its payload back without calling the destructor.
    pub fn remove(&self, id: ElementId) -> Option<T> {
        self.locked(|state| {
            let idx = state.resolve(id)?;
            state.unlink(idx)
        })
    }

    /// Delete every element, head first, through the destructor.
    pub fn clear(&self) {
        self.locked(|state| {
            let mut deleted = 0usize;
            while let Some(idx) = state.head() {
                state.delete(idx);
                deleted += 1;
            }
            trace!(deleted, "cleared list");
        });
    }
}

impl<T: Clone, G: ListGuard<ListState<T>>> DList<T, G> {
    /// Payloads from head to tail.
    pub fn to_vec(&self) -> Vec<T> {
        self.collect(Direction::Forward)
    }

    /// Payloads from tail to head.
    pub fn to_vec_rev(&self) -> Vec<T> {
        self.collect(Direction::Backward)
    }

    fn collect(&self, direction: Direction) -> Vec<T> {
        self.locked(|state| {
            let mut out = Vec::with_capacity(state.len());
            let mut cur = state.first(direction);
            while let Some(idx) = cur {
                if let Some(payload) = state.payload(idx) {
                    out.push(payload.clone());
                }
                cur = state.following(idx, direction);
            }
            out
        })
    }
}

impl<T, G: ListGuard<ListState<T>>> fmt::Debug for DList<T, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DList")
            .field("len", &self.len())
            .field("locked", &self.uses_lock())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asv_value::Val;
    use proptest::prelude::*;
    use std::sync::{Arc, Mutex};

    fn abc() -> (DList<char>, ElementId, ElementId, ElementId) {
        let list = DList::new();
        let a = list.append('A');
        let b = list.append('B');
        let c = list.append('C');
        (list, a, b, c)
    }

    fn consistent<T, G: ListGuard<ListState<T>>>(list: &DList<T, G>) -> bool {
        list.locked(|state| state.links_consistent())
    }

    // -----------------------------------------------------------------------
    // Insertion
    // -----------------------------------------------------------------------

    #[test]
    fn empty_list_has_no_ends() {
        let list: DList<u8> = DList::new();
        assert!(list.is_empty());
        assert!(list.head().is_none());
        assert!(list.tail().is_none());
        assert!(!list.uses_lock());
    }

    #[test]
    fn append_and_prepend_update_ends() {
        let list = DList::new();
        let b = list.append(2);
        let a = list.prepend(1);
        let c = list.append(3);
        assert_eq!(list.head(), Some(a));
        assert_eq!(list.tail(), Some(c));
        assert_eq!(list.next(a), Some(b));
        assert_eq!(list.prev(c), Some(b));
        assert_eq!(list.to_vec(), vec![1, 2, 3]);
        assert!(consistent(&list));
    }

    #[test]
    fn insert_around_ends_moves_head_and_tail() {
        let (list, a, _, c) = abc();
        let front = list.insert_before(a, '<').unwrap();
        let back = list.insert_after(c, '>').unwrap();
        assert_eq!(list.head(), Some(front));
        assert_eq!(list.tail(), Some(back));
        assert_eq!(list.to_vec(), vec!['<', 'A', 'B', 'C', '>']);
        assert_eq!(list.len(), 5);
        assert!(consistent(&list));
    }

    #[test]
    fn insert_in_middle() {
        let (list, a, b, _) = abc();
        list.insert_after(a, 'x').unwrap();
        list.insert_before(b, 'y').unwrap();
        assert_eq!(list.to_vec(), vec!['A', 'x', 'y', 'B', 'C']);
        assert_eq!(list.to_vec_rev(), vec!['C', 'B', 'y', 'x', 'A']);
    }

    #[test]
    fn insert_next_to_stale_handle_fails() {
        let (list, _, b, _) = abc();
        list.delete(b);
        let err = list.insert_after(b, 'z').unwrap_err();
        assert_eq!(err, DListError::StaleElement(b));
        assert_eq!(list.len(), 2);
    }

    // -----------------------------------------------------------------------
    // Deletion
    // -----------------------------------------------------------------------

    #[test]
    fn delete_middle_element() {
        let (list, a, b, c) = abc();
        assert!(list.delete(b));
        assert_eq!(list.to_vec(), vec!['A', 'C']);
        assert_eq!(list.len(), 2);
        assert_eq!(list.head(), Some(a));
        assert_eq!(list.tail(), Some(c));
        assert!(consistent(&list));
    }

    #[test]
    fn delete_ends_and_last_element() {
        let (list, a, b, c) = abc();
        list.delete(a);
        assert_eq!(list.head(), Some(b));
        list.delete(c);
        assert_eq!(list.tail(), Some(b));
        list.delete(b);
        assert!(list.is_empty());
        assert!(list.head().is_none() && list.tail().is_none());
        assert!(consistent(&list));
    }

    #[test]
    fn delete_on_empty_or_stale_is_noop() {
        let list = DList::new();
        let id = list.append(1);
        assert!(list.delete(id));
        assert!(!list.delete(id));
        assert!(list.is_empty());
    }

    #[test]
    fn reused_slot_does_not_resurrect_old_handle() {
        let list = DList::new();
        let old = list.append("old");
        list.delete(old);
        let new = list.append("new");
        assert!(!list.contains(old));
        assert!(list.contains(new));
        assert_eq!(list.with(old, |s| *s), None);
        assert_eq!(list.with(new, |s| *s), Some("new"));
    }

    #[test]
    fn destructor_receives_deleted_payloads() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let list = DList::with_destructor(move |v: u32| sink.lock().unwrap().push(v));
        let one = list.append(1);
        list.append(2);
        list.delete(one);
        list.clear();
        assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn remove_bypasses_destructor() {
        let calls = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&calls);
        let list = DList::with_destructor(move |_: String| *counter.lock().unwrap() += 1);
        let id = list.append("kept".to_string());
        assert_eq!(list.remove(id).as_deref(), Some("kept"));
        assert_eq!(*calls.lock().unwrap(), 0);
        assert!(list.remove(id).is_none());
    }

    #[test]
    fn destructor_releases_values() {
        let shared = Val::new("payload");
        let list = DList::with_destructor(|v: Val| {
            v.release();
        });
        let id = list.append(shared.reserve());
        assert_eq!(shared.holders(), 2);
        list.delete(id);
        assert_eq!(shared.holders(), 1);
    }

    #[test]
    fn destructor_can_be_replaced() {
        let calls = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&calls);
        let list = DList::<i32>::new();
        let first = list.append(1);
        list.delete(first);
        list.set_destructor(Some(Box::new(move |_: i32| *counter.lock().unwrap() += 1)));
        let second = list.append(2);
        list.delete(second);
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[test]
    fn with_mutates_payload() {
        let (list, _, b, _) = abc();
        list.with(b, |c| *c = 'b');
        assert_eq!(list.to_vec(), vec!['A', 'b', 'C']);
    }

    // -----------------------------------------------------------------------
    // Locking
    // -----------------------------------------------------------------------

    #[test]
    fn locked_list_serializes_writers() {
        let list: LockedDList<usize> = DList::new_locked();
        assert!(list.uses_lock());
        std::thread::scope(|scope| {
            for t in 0..4 {
                let list = &list;
                scope.spawn(move || {
                    for i in 0..250 {
                        list.append(t * 1000 + i);
                    }
                });
            }
        });
        assert_eq!(list.len(), 1000);
        assert!(consistent(&list));
        assert_eq!(list.to_vec().len(), 1000);
    }

    #[test]
    fn locked_list_with_destructor() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let list = DList::locked_with_destructor(move |v: i32| sink.lock().unwrap().push(v));
        let id = list.append(5);
        list.delete(id);
        assert_eq!(*seen.lock().unwrap(), vec![5]);
    }

    #[test]
    #[should_panic]
    fn unlocked_reentry_panics() {
        let list = DList::new();
        let id = list.append(1);
        list.with(id, |_| list.append(2));
    }

    // -----------------------------------------------------------------------
    // Properties
    // -----------------------------------------------------------------------

    #[derive(Clone, Debug)]
    enum Op {
        Append(u8),
        Prepend(u8),
        InsertBefore(usize, u8),
        InsertAfter(usize, u8),
        Delete(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            any::<u8>().prop_map(Op::Append),
            any::<u8>().prop_map(Op::Prepend),
            (any::<usize>(), any::<u8>()).prop_map(|(i, v)| Op::InsertBefore(i, v)),
            (any::<usize>(), any::<u8>()).prop_map(|(i, v)| Op::InsertAfter(i, v)),
            any::<usize>().prop_map(Op::Delete),
        ]
    }

    proptest! {
        #[test]
        fn traversals_agree_after_any_mutations(ops in proptest::collection::vec(op(), 0..60)) {
            let list = DList::new();
            let mut ids: Vec<ElementId> = Vec::new();
            for op in ops {
                match op {
                    Op::Append(v) => ids.push(list.append(v)),
                    Op::Prepend(v) => ids.push(list.prepend(v)),
                    Op::InsertBefore(i, v) if !ids.is_empty() => {
                        let cur = ids[i % ids.len()];
                        ids.push(list.insert_before(cur, v).unwrap());
                    }
                    Op::InsertAfter(i, v) if !ids.is_empty() => {
                        let cur = ids[i % ids.len()];
                        ids.push(list.insert_after(cur, v).unwrap());
                    }
                    Op::Delete(i) if !ids.is_empty() => {
                        let cur = ids.swap_remove(i % ids.len());
                        prop_assert!(list.delete(cur));
                    }
                    _ => {}
                }
                prop_assert!(consistent(&list));
            }
            let forward = list.to_vec();
            let mut backward = list.to_vec_rev();
            backward.reverse();
            prop_assert_eq!(forward.len(), list.len());
            prop_assert_eq!(forward, backward);
        }
    }
}
