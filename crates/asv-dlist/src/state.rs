//! Arena-backed link state shared by every lock strategy.
//!
//! Nodes live in a slot vector and link to each other by index. Deleted
//! slots go on a vacant stack for reuse and bump their generation so old
//! [`ElementId`]s stop resolving.

use std::fmt;

use crate::element::ElementId;
use crate::reduce::Direction;

/// Callback that receives the payload of every element the list deletes.
pub type Destructor<T> = Box<dyn FnMut(T) + Send>;

struct Node<T> {
    /// `None` while the slot is vacant.
    payload: Option<T>,
    prev: Option<usize>,
    next: Option<usize>,
    generation: u32,
}

/// Link structure of a list: head, tail, count, nodes, and destructor.
///
/// Invariants:
///
/// - `head.is_none() == tail.is_none() == (count == 0)`
/// - following `next` from `head` visits `count` nodes and ends at `tail`;
///   following `prev` from `tail` visits the same nodes in reverse
pub struct ListState<T> {
    nodes: Vec<Node<T>>,
    vacant: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    count: usize,
    destructor: Option<Destructor<T>>,
}

impl<T> ListState<T> {
    pub(crate) fn new(destructor: Option<Destructor<T>>) -> Self {
        Self {
            nodes: Vec::new(),
            vacant: Vec::new(),
            head: None,
            tail: None,
            count: 0,
            destructor,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.count
    }

    pub(crate) fn set_destructor(&mut self, destructor: Option<Destructor<T>>) {
        self.destructor = destructor;
    }

    // ---------------------------------------------------------------
    // Handles
    // ---------------------------------------------------------------

    /// Slot index of a live element, if `id` still names one.
    pub(crate) fn resolve(&self, id: ElementId) -> Option<usize> {
        let node = self.nodes.get(id.index())?;
        (node.generation == id.generation() && node.payload.is_some()).then_some(id.index())
    }

    pub(crate) fn id_of(&self, idx: usize) -> ElementId {
        ElementId::new(idx, self.nodes[idx].generation)
    }

    pub(crate) fn head(&self) -> Option<usize> {
        self.head
    }

    pub(crate) fn tail(&self) -> Option<usize> {
        self.tail
    }

    /// Where a traversal in `direction` starts.
    pub(crate) fn first(&self, direction: Direction) -> Option<usize> {
        match direction {
            Direction::Forward => self.head,
            Direction::Backward => self.tail,
        }
    }

    /// The neighbor of `idx` a traversal in `direction` visits next.
    pub(crate) fn following(&self, idx: usize, direction: Direction) -> Option<usize> {
        match direction {
            Direction::Forward => self.nodes[idx].next,
            Direction::Backward => self.nodes[idx].prev,
        }
    }

    pub(crate) fn payload(&self, idx: usize) -> Option<&T> {
        self.nodes.get(idx)?.payload.as_ref()
    }

    pub(crate) fn payload_mut(&mut self, idx: usize) -> Option<&mut T> {
        self.nodes.get_mut(idx)?.payload.as_mut()
    }

    // ---------------------------------------------------------------
    // Linking
    // ---------------------------------------------------------------

    fn allocate(&mut self, payload: T) -> usize {
        match self.vacant.pop() {
            Some(idx) => {
                let node = &mut self.nodes[idx];
                node.payload = Some(payload);
                node.prev = None;
                node.next = None;
                idx
            }
            None => {
                self.nodes.push(Node {
                    payload: Some(payload),
                    prev: None,
                    next: None,
                    generation: 0,
                });
                self.nodes.len() - 1
            }
        }
    }

    pub(crate) fn prepend(&mut self, payload: T) -> ElementId {
        let idx = self.allocate(payload);
        match self.head {
            None => self.tail = Some(idx),
            Some(old) => {
                self.nodes[idx].next = Some(old);
                self.nodes[old].prev = Some(idx);
            }
        }
        self.head = Some(idx);
        self.count += 1;
        self.id_of(idx)
    }

    pub(crate) fn append(&mut self, payload: T) -> ElementId {
        let idx = self.allocate(payload);
        match self.tail {
            None => self.head = Some(idx),
            Some(old) => {
                self.nodes[idx].prev = Some(old);
                self.nodes[old].next = Some(idx);
            }
        }
        self.tail = Some(idx);
        self.count += 1;
        self.id_of(idx)
    }

    /// Link a new element right after the live element `cur`.
    pub(crate) fn insert_after(&mut self, cur: usize, payload: T) -> ElementId {
        let idx = self.allocate(payload);
        let next = self.nodes[cur].next;
        self.nodes[idx].prev = Some(cur);
        self.nodes[idx].next = next;
        match next {
            None => self.tail = Some(idx),
            Some(n) => self.nodes[n].prev = Some(idx),
        }
        self.nodes[cur].next = Some(idx);
        self.count += 1;
        self.id_of(idx)
    }

    /// Link a new element right before the live element `cur`.
    pub(crate) fn insert_before(&mut self, cur: usize, payload: T) -> ElementId {
        let idx = self.allocate(payload);
        let prev = self.nodes[cur].prev;
        self.nodes[idx].next = Some(cur);
        self.nodes[idx].prev = prev;
        match prev {
            None => self.head = Some(idx),
            Some(p) => self.nodes[p].next = Some(idx),
        }
        self.nodes[cur].prev = Some(idx);
        self.count += 1;
        self.id_of(idx)
    }

    // ---------------------------------------------------------------
    // Unlinking
    // ---------------------------------------------------------------

    /// Detach the element at `idx` and hand back its payload.
    pub(crate) fn unlink(&mut self, idx: usize) -> Option<T> {
        let node = self.nodes.get_mut(idx)?;
        let payload = node.payload.take()?;
        let prev = node.prev.take();
        let next = node.next.take();
        node.generation = node.generation.wrapping_add(1);

        match prev {
            Some(p) => self.nodes[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.nodes[n].prev = prev,
            None => self.tail = prev,
        }

        self.vacant.push(idx);
        self.count -= 1;
        Some(payload)
    }

    /// Detach the element at `idx` and pass its payload to the destructor.
    ///
    /// Without a destructor the payload is simply dropped.
    pub(crate) fn delete(&mut self, idx: usize) -> bool {
        let Some(payload) = self.unlink(idx) else {
            return false;
        };
        if let Some(destructor) = self.destructor.as_mut() {
            destructor(payload);
        }
        true
    }

    /// Walk both directions and confirm the link invariants hold.
    #[cfg(test)]
    pub(crate) fn links_consistent(&self) -> bool {
        if self.head.is_none() != self.tail.is_none() || self.head.is_none() != (self.count == 0) {
            return false;
        }
        let mut forward = Vec::new();
        let mut cur = self.head;
        while let Some(idx) = cur {
            if forward.len() > self.count {
                return false;
            }
            forward.push(idx);
            cur = self.nodes[idx].next;
        }
        let mut backward = Vec::new();
        let mut cur = self.tail;
        while let Some(idx) = cur {
            if backward.len() > self.count {
                return false;
            }
            backward.push(idx);
            cur = self.nodes[idx].prev;
        }
        backward.reverse();
        forward.len() == self.count && forward == backward
    }
}

impl<T> fmt::Debug for ListState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListState")
            .field("count", &self.count)
            .field("slots", &self.nodes.len())
            .field("has_destructor", &self.destructor.is_some())
            .finish()
    }
}
