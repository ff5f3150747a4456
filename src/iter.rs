//! Borrowing iterators over a `DoublyLinkedMap`.
//!
//! Both iterators hold a shared borrow of the map. The map therefore cannot
//! be mutated while one is alive; that is the whole of the invalidation
//! story.

use crate::doubly_linked_map::{DoublyLinkedMap, Tracked};
use crate::error::IteratorExhausted;
use crate::linked_sequence;
use core::iter::FusedIterator;

/// Traversal direction of a [`Values`] iterator.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    /// Front to back.
    Forward,
    /// Back to front.
    Reverse,
}

/// Values of a map in placement order (or its reverse).
///
/// Created by [`DoublyLinkedMap::values`] and
/// [`DoublyLinkedMap::reverse_values`]. Besides the `Iterator` impl, it
/// offers a checked cursor interface: [`has_next`](Self::has_next) and
/// [`next_value`](Self::next_value), which reports running off the end as
/// [`IteratorExhausted`].
///
/// ```
/// use doubly_linked_map::{DoublyLinkedMap, IteratorExhausted};
///
/// let mut m = DoublyLinkedMap::new();
/// m.put_back("k", 1);
/// let mut it = m.reverse_values();
/// assert!(it.has_next());
/// assert_eq!(it.next_value(), Ok(&1));
/// assert_eq!(it.next_value(), Err(IteratorExhausted));
/// ```
pub struct Values<'a, V> {
    inner: linked_sequence::Iter<'a, Tracked<V>>,
    direction: Direction,
}

impl<'a, V> Values<'a, V> {
    pub(crate) fn new(inner: linked_sequence::Iter<'a, Tracked<V>>, direction: Direction) -> Self {
        Self { inner, direction }
    }

    /// Whether another value remains.
    pub fn has_next(&self) -> bool {
        self.inner.len() > 0
    }

    /// Advance, failing with [`IteratorExhausted`] once every value has been
    /// produced.
    pub fn next_value(&mut self) -> Result<&'a V, IteratorExhausted> {
        self.next().ok_or(IteratorExhausted)
    }
}

impl<V> Clone for Values<'_, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            direction: self.direction,
        }
    }
}

impl<'a, V> Iterator for Values<'a, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let tracked = match self.direction {
            Direction::Forward => self.inner.next(),
            Direction::Reverse => self.inner.next_back(),
        };
        tracked.map(|t| &t.value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> DoubleEndedIterator for Values<'_, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let tracked = match self.direction {
            Direction::Forward => self.inner.next_back(),
            Direction::Reverse => self.inner.next(),
        };
        tracked.map(|t| &t.value)
    }
}

impl<V> ExactSizeIterator for Values<'_, V> {}
impl<V> FusedIterator for Values<'_, V> {}

/// `(key, value)` pairs of a map, front to back. Created by
/// [`DoublyLinkedMap::iter`].
pub struct Iter<'a, K, V, S> {
    map: &'a DoublyLinkedMap<K, V, S>,
    inner: linked_sequence::Iter<'a, Tracked<V>>,
}

impl<'a, K, V, S> Iter<'a, K, V, S> {
    pub(crate) fn new(
        map: &'a DoublyLinkedMap<K, V, S>,
        inner: linked_sequence::Iter<'a, Tracked<V>>,
    ) -> Self {
        Self { map, inner }
    }
}

impl<'a, K, V, S> Iterator for Iter<'a, K, V, S> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, t) = self.inner.next_with_handle()?;
        let map = self.map;
        Some((map.key_of(t.hash, node), &t.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, S> DoubleEndedIterator for Iter<'_, K, V, S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let (node, t) = self.inner.next_back_with_handle()?;
        let map = self.map;
        Some((map.key_of(t.hash, node), &t.value))
    }
}

impl<K, V, S> ExactSizeIterator for Iter<'_, K, V, S> {}
impl<K, V, S> FusedIterator for Iter<'_, K, V, S> {}
