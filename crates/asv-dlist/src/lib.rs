//! Doubly linked list for the ASV core.
//!
//! [`DList`] supports O(1) insertion and deletion at any position named by an
//! [`ElementId`], traversal in both directions, and single-pass reduce walks
//! that may delete elements or pick an insertion point as they go.
//!
//! # Lock strategy
//!
//! The list is built either unlocked ([`DList::new`]) or locked
//! ([`DList::new_locked`], [`LockedDList`]). A locked list holds its mutex for
//! the whole of each public operation, callbacks included, and may be shared
//! between threads.
//!
//! # Payload lifetime
//!
//! Payloads are owned by the list. Elements deleted by the list itself
//! ([`DList::delete`], [`DList::clear`], [`ReduceStep::Delete`]) are handed
//! to the destructor callback if one is installed. [`DList::remove`] gives
//! the payload back to the caller instead.
//!
//! ```
//! use asv_dlist::{DList, Direction, ReduceStep};
//!
//! let list = DList::new();
//! for n in 1..=5 {
//!     list.append(n);
//! }
//! let _: Option<()> = list.reduce(Direction::Forward, |_, n| {
//!     if *n % 2 == 0 { ReduceStep::Delete } else { ReduceStep::Continue }
//! });
//! assert_eq!(list.to_vec(), vec![1, 3, 5]);
//! ```

pub mod element;
pub mod error;
pub mod guard;
pub mod list;
pub mod reduce;
pub mod state;

pub use element::ElementId;
pub use error::{DListError, Result};
pub use guard::{ListGuard, Locked, Unlocked};
pub use list::{DList, LockedDList};
pub use reduce::{Direction, InsertOutcome, InsertStep, ReduceStep};
pub use state::{Destructor, ListState};
