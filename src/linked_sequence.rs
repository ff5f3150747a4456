//! LinkedSequence: doubly linked list stored in a generational arena.
//!
//! Nodes live in a `SlotMap`; `prev`/`next` are arena keys rather than
//! pointers, so linking and unlinking are O(1) without aliasing hazards.
//! A removed node's handle never resolves again, even if its slot is reused.

#![cfg_attr(not(feature = "bench_internal"), allow(dead_code))]

use core::iter::FusedIterator;
use slotmap::{DefaultKey, SlotMap};

/// Stable handle to a node in a [`LinkedSequence`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeHandle(DefaultKey);

impl NodeHandle {
    fn new(k: DefaultKey) -> Self {
        NodeHandle(k)
    }
    fn raw_handle(&self) -> DefaultKey {
        self.0
    }
}

/// Which end of the sequence an operation applies to.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum End {
    Front,
    Back,
}

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<DefaultKey>,
    next: Option<DefaultKey>,
}

#[cold]
#[inline(never)]
fn detached_handle() -> ! {
    panic!("node handle does not refer to a live node of this sequence");
}

#[derive(Debug)]
pub struct LinkedSequence<T> {
    nodes: SlotMap<DefaultKey, Node<T>>,
    head: Option<DefaultKey>,
    tail: Option<DefaultKey>,
}

impl<T> Default for LinkedSequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LinkedSequence<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Handle of the first node, if any.
    pub fn front(&self) -> Option<NodeHandle> {
        self.head.map(NodeHandle::new)
    }

    /// Handle of the last node, if any.
    pub fn back(&self) -> Option<NodeHandle> {
        self.tail.map(NodeHandle::new)
    }

    pub fn end(&self, end: End) -> Option<NodeHandle> {
        match end {
            End::Front => self.front(),
            End::Back => self.back(),
        }
    }

    pub fn push(&mut self, end: End, value: T) -> NodeHandle {
        match end {
            End::Front => self.push_front(value),
            End::Back => self.push_back(value),
        }
    }

    pub fn push_back(&mut self, value: T) -> NodeHandle {
        let prev = self.tail;
        let k = self.nodes.insert(Node {
            value,
            prev,
            next: None,
        });
        match prev {
            Some(t) => self.link_mut(t).next = Some(k),
            None => self.head = Some(k),
        }
        self.tail = Some(k);
        NodeHandle::new(k)
    }

    pub fn push_front(&mut self, value: T) -> NodeHandle {
        let next = self.head;
        let k = self.nodes.insert(Node {
            value,
            prev: None,
            next,
        });
        match next {
            Some(h) => self.link_mut(h).prev = Some(k),
            None => self.tail = Some(k),
        }
        self.head = Some(k);
        NodeHandle::new(k)
    }

    /// Unlink and destroy the node, returning its value.
    ///
    /// Panics if `handle` does not name a live node of this sequence.
    pub fn remove(&mut self, handle: NodeHandle) -> T {
        let node = match self.nodes.remove(handle.raw_handle()) {
            Some(node) => node,
            None => detached_handle(),
        };
        match node.prev {
            Some(p) => self.link_mut(p).next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(n) => self.link_mut(n).prev = node.prev,
            None => self.tail = node.prev,
        }
        node.value
    }

    /// Panics if `handle` does not name a live node of this sequence.
    pub fn get(&self, handle: NodeHandle) -> &T {
        match self.nodes.get(handle.raw_handle()) {
            Some(node) => &node.value,
            None => detached_handle(),
        }
    }

    /// Panics if `handle` does not name a live node of this sequence.
    pub fn get_mut(&mut self, handle: NodeHandle) -> &mut T {
        &mut self.link_mut(handle.raw_handle()).value
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    /// Front-to-back iterator; call `.rev()` for back-to-front.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            front: self.head,
            back: self.tail,
            remaining: self.nodes.len(),
        }
    }

    fn link_mut(&mut self, k: DefaultKey) -> &mut Node<T> {
        match self.nodes.get_mut(k) {
            Some(node) => node,
            None => detached_handle(),
        }
    }

    /// Walk the chain both ways and check it against the arena.
    #[cfg(test)]
    pub(crate) fn assert_linked(&self) {
        assert_eq!(self.head.is_none(), self.tail.is_none());
        assert_eq!(self.head.is_none(), self.nodes.is_empty());

        let mut steps = 0;
        let mut prev = None;
        let mut cur = self.head;
        while let Some(k) = cur {
            let node = &self.nodes[k];
            assert_eq!(node.prev, prev, "prev link does not point back");
            steps += 1;
            assert!(steps <= self.nodes.len(), "forward walk does not terminate");
            prev = Some(k);
            cur = node.next;
        }
        assert_eq!(prev, self.tail, "forward walk does not end at tail");
        assert_eq!(steps, self.nodes.len());

        let mut back_steps = 0;
        let mut cur = self.tail;
        while let Some(k) = cur {
            back_steps += 1;
            assert!(back_steps <= self.nodes.len(), "reverse walk does not terminate");
            cur = self.nodes[k].prev;
        }
        assert_eq!(back_steps, self.nodes.len());
    }
}

/// Double-ended iterator over the values of a [`LinkedSequence`].
///
/// The front and back cursors meet in the middle; `remaining` stops them
/// from crossing.
pub struct Iter<'a, T> {
    nodes: &'a SlotMap<DefaultKey, Node<T>>,
    front: Option<DefaultKey>,
    back: Option<DefaultKey>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    /// Like `next`, but also yields the node's handle.
    pub(crate) fn next_with_handle(&mut self) -> Option<(NodeHandle, &'a T)> {
        if self.remaining == 0 {
            return None;
        }
        let k = self.front?;
        let nodes = self.nodes;
        let node = &nodes[k];
        self.remaining -= 1;
        self.front = node.next;
        Some((NodeHandle::new(k), &node.value))
    }

    /// Like `next_back`, but also yields the node's handle.
    pub(crate) fn next_back_with_handle(&mut self) -> Option<(NodeHandle, &'a T)> {
        if self.remaining == 0 {
            return None;
        }
        let k = self.back?;
        let nodes = self.nodes;
        let node = &nodes[k];
        self.remaining -= 1;
        self.back = node.prev;
        Some((NodeHandle::new(k), &node.value))
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.next_with_handle().map(|(_, v)| v)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.next_back_with_handle().map(|(_, v)| v)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}
