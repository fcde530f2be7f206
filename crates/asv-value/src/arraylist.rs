//! Growable, indexed sequence of values.
//!
//! [`ArrayList`] keeps a slot array of `capacity` entries, the first `size`
//! of which are considered populated. A populated slot may still be empty (a
//! hole): `set` past the end leaves every skipped slot empty.
//!
//! # Growth
//!
//! Capacity grows linearly in whole multiples of `block_size`, never
//! geometrically. A `block_size` of 0 marks a fixed-capacity list that
//! rejects every growth attempt with
//! [`MaxCapacityExceeded`](ArrayListError::MaxCapacityExceeded).
//!
//! # Invariants
//!
//! - `size <= capacity`
//! - slots in `[size, capacity)` are always empty
//! - a failed operation leaves slots, `size`, and `capacity` untouched

use std::fmt;
use std::ops::ControlFlow;

use tracing::{debug, trace};

use crate::error::{ArrayListError, Result};
use crate::value::Val;

/// Array-backed list of optional [`Val`] slots.
#[derive(Clone, Default)]
pub struct ArrayList {
    /// Allocated slots; `elements.len()` is the capacity.
    elements: Vec<Option<Val>>,
    /// Number of slots in use, holes included.
    size: usize,
    /// Growth increment; 0 means the capacity is fixed.
    block_size: usize,
}

impl ArrayList {
    /// Create a list with `capacity` empty slots.
    ///
    /// No allocation happens for a zero capacity.
    pub fn new(capacity: usize, block_size: usize) -> Result<Self> {
        let mut elements = Vec::new();
        if capacity > 0 {
            elements
                .try_reserve_exact(capacity)
                .map_err(|_| ArrayListError::AllocationFailed { requested: capacity })?;
            elements.resize_with(capacity, || None);
        }
        Ok(Self {
            elements,
            size: 0,
            block_size,
        })
    }

    /// Number of slots in use, holes included.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of allocated slots.
    pub fn capacity(&self) -> usize {
        self.elements.len()
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    // ---------------------------------------------------------------
    // Capacity
    // ---------------------------------------------------------------

    /// Make sure at least `size + delta` slots exist.
    ///
    /// Grows by the smallest number of whole blocks covering the shortfall.
    /// On failure the existing slots stay exactly as they were.
    pub fn ensure(&mut self, delta: usize) -> Result<()> {
        let capacity = self.capacity();
        let needed = self
            .size
            .checked_add(delta)
            .ok_or(ArrayListError::AllocationFailed { requested: usize::MAX })?;
        if needed <= capacity {
            return Ok(());
        }

        if self.block_size == 0 {
            debug!(capacity, needed, "fixed-capacity list refused to grow");
            return Err(ArrayListError::MaxCapacityExceeded { capacity, needed });
        }

        let blocks = (needed - capacity).div_ceil(self.block_size);
        let new_capacity = blocks
            .checked_mul(self.block_size)
            .and_then(|extra| capacity.checked_add(extra))
            .ok_or(ArrayListError::AllocationFailed { requested: needed })?;

        // Reserve before touching anything so a failure leaves the old
        // allocation in place.
        self.elements
            .try_reserve_exact(new_capacity - capacity)
            .map_err(|_| ArrayListError::AllocationFailed {
                requested: new_capacity,
            })?;
        self.elements.resize_with(new_capacity, || None);

        debug!(from = capacity, to = new_capacity, blocks, "grew array list");
        Ok(())
    }

    // ---------------------------------------------------------------
    // Access
    // ---------------------------------------------------------------

    /// The value at `index`, or `None` for a hole or an index past `size`.
    pub fn get(&self, index: usize) -> Option<&Val> {
        self.elements[..self.size].get(index)?.as_ref()
    }

    /// Mutable access to the slot handle at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Val> {
        self.elements[..self.size].get_mut(index)?.as_mut()
    }

    pub fn get_int64(&self, index: usize) -> Option<i64> {
        self.get(index)?.as_integer()
    }

    pub fn get_str(&self, index: usize) -> Option<&str> {
        self.get(index)?.as_str()
    }

    /// The first slot's value; `None` when the list is empty.
    pub fn head(&self) -> Option<&Val> {
        self.get(0)
    }

    /// Slots `[0, size)` in order; holes come through as `None`.
    pub fn iter(&self) -> impl Iterator<Item = Option<&Val>> + '_ {
        self.elements[..self.size].iter().map(Option::as_ref)
    }

    /// Visit slots `[0, size)` in order until the callback breaks.
    ///
    /// Returns `true` if every slot was visited.
    pub fn for_each<F>(&self, mut callback: F) -> bool
    where
        F: FnMut(Option<&Val>) -> ControlFlow<()>,
    {
        self.iter().all(|slot| callback(slot).is_continue())
    }

    // ---------------------------------------------------------------
    // Mutation
    // ---------------------------------------------------------------

    /// Store `value` at `index`, growing if `index` is beyond the capacity.
    ///
    /// The previous occupant, if any, is released. Setting past `size`
    /// extends the list and leaves the skipped slots empty. If growth fails
    /// the list is unchanged and `value` is released.
    pub fn set(&mut self, index: usize, value: Val) -> Result<()> {
        if index >= self.capacity() {
            let needed = index
                .checked_add(1)
                .ok_or(ArrayListError::AllocationFailed { requested: usize::MAX })?;
            self.ensure(needed - self.size)?;
        }
        if let Some(old) = self.elements[index].replace(value) {
            old.release();
        }
        if index >= self.size {
            self.size = index + 1;
        }
        Ok(())
    }

    /// Store `value` in the slot right after the last one in use.
    pub fn append(&mut self, value: Val) -> Result<()> {
        self.ensure(1)?;
        self.elements[self.size] = Some(value);
        self.size += 1;
        Ok(())
    }

    /// Shift every slot one position right and store `value` at index 0.
    pub fn prepend(&mut self, value: Val) -> Result<()> {
        self.ensure(1)?;
        // Slot `size` is empty, so rotating it to the front frees index 0.
        self.elements[..=self.size].rotate_right(1);
        self.elements[0] = Some(value);
        self.size += 1;
        Ok(())
    }

    pub fn set_int64(&mut self, index: usize, value: i64) -> Result<()> {
        self.set(index, Val::new(value))
    }

    pub fn set_str(&mut self, index: usize, value: &str) -> Result<()> {
        self.set(index, Val::new(value))
    }

    pub fn append_int64(&mut self, value: i64) -> Result<()> {
        self.append(Val::new(value))
    }

    pub fn append_str(&mut self, value: &str) -> Result<()> {
        self.append(Val::new(value))
    }

    pub fn prepend_int64(&mut self, value: i64) -> Result<()> {
        self.prepend(Val::new(value))
    }

    pub fn prepend_str(&mut self, value: &str) -> Result<()> {
        self.prepend(Val::new(value))
    }

    // ---------------------------------------------------------------
    // Slicing
    // ---------------------------------------------------------------

    /// Every slot but the first, as a new list. Same as `drop(1)`.
    pub fn tail(&self) -> Result<ArrayList> {
        self.drop(1)
    }

    /// Every slot but the first `n`, as a new list.
    pub fn drop(&self, n: usize) -> Result<ArrayList> {
        self.reserve_range(n.min(self.size), self.size)
    }

    /// The first `n` slots, as a new list.
    pub fn take(&self, n: usize) -> Result<ArrayList> {
        self.reserve_range(0, n.min(self.size))
    }

    /// Build a new list holding reservations of slots `[start, end)`.
    ///
    /// The result is independent: releasing it only drops its own
    /// reservations.
    fn reserve_range(&self, start: usize, end: usize) -> Result<ArrayList> {
        let mut list = ArrayList::new(end - start, self.block_size)?;
        for (slot, source) in list.elements.iter_mut().zip(&self.elements[start..end]) {
            *slot = source.as_ref().map(Val::reserve);
        }
        list.size = end - start;
        Ok(list)
    }

    // ---------------------------------------------------------------
    // Teardown
    // ---------------------------------------------------------------

    /// Release every populated slot in index order, free the slot array,
    /// and reset `size` and `capacity` to 0.
    pub fn release(&mut self) {
        trace!(size = self.size, capacity = self.capacity(), "releasing array list");
        for slot in &mut self.elements[..self.size] {
            if let Some(value) = slot.take() {
                value.release();
            }
        }
        self.elements = Vec::new();
        self.size = 0;
    }
}

// Lists compare by their populated slots; capacity and block size are
// allocation details.
impl PartialEq for ArrayList {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.iter().eq(other.iter())
    }
}

impl fmt::Debug for ArrayList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayList")
            .field("size", &self.size)
            .field("capacity", &self.capacity())
            .field("block_size", &self.block_size)
            .field("elements", &&self.elements[..self.size])
            .finish()
    }
}
