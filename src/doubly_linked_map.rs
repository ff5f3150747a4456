//! DoublyLinkedMap: hash index over a LinkedSequence.
//!
//! The index maps each key to the handle of its node; the sequence owns the
//! values and their order. Every mutation resolves the key first, edits the
//! sequence, then updates the index, all under the reentrancy guard.

use crate::iter::{Direction, Iter, Values};
use crate::linked_sequence::{End, LinkedSequence, NodeHandle};
use crate::reentrancy::DebugReentrancy;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use hashbrown::hash_table::Entry;
use hashbrown::HashTable;
use std::collections::hash_map::RandomState;

/// Index record: the key plus the handle of the node holding its value.
struct Slot<K> {
    key: K,
    hash: u64,
    node: NodeHandle,
}

/// What the sequence stores per node. The hash lets a node find its way
/// back to its `Slot` without calling `K: Hash` again.
pub(crate) struct Tracked<V> {
    pub(crate) hash: u64,
    pub(crate) value: V,
}

#[cold]
#[inline(never)]
fn unindexed_node() -> ! {
    panic!("sequence node has no matching index slot");
}

/// A hash map that remembers placement order and can be extended at either
/// end.
///
/// Lookups, inserts and removals are O(1) on average. Re-inserting an
/// existing key with [`put_back`](Self::put_back) or
/// [`put_front`](Self::put_front) replaces its value *and* moves it to the
/// requested end.
///
/// The map is `Send` but not `Sync`; share it across threads only behind a
/// lock.
///
/// ```
/// use doubly_linked_map::DoublyLinkedMap;
///
/// let mut m = DoublyLinkedMap::new();
/// m.put_back("b", 2);
/// m.put_front("a", 1);
/// m.put_back("c", 3);
/// assert_eq!(m.values().copied().collect::<Vec<_>>(), [1, 2, 3]);
///
/// // Re-inserting relocates the entry.
/// assert_eq!(m.put_back("a", 10), Some(1));
/// assert_eq!(m.values().copied().collect::<Vec<_>>(), [2, 3, 10]);
/// ```
pub struct DoublyLinkedMap<K, V, S = RandomState> {
    hasher: S,
    index: HashTable<Slot<K>>,
    list: LinkedSequence<Tracked<V>>,
    reentrancy: DebugReentrancy,
}

impl<K, V> DoublyLinkedMap<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, Default::default())
    }
}

impl<K, V> Default for DoublyLinkedMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> DoublyLinkedMap<K, V, S> {
    /// Number of entries. O(1).
    pub fn len(&self) -> usize {
        self.index.len()
    }
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Value at the front of the order.
    pub fn front(&self) -> Option<&V> {
        self.list.front().map(|h| &self.list.get(h).value)
    }

    /// Value at the back of the order.
    pub fn back(&self) -> Option<&V> {
        self.list.back().map(|h| &self.list.get(h).value)
    }

    /// Values from front to back.
    ///
    /// The iterator borrows the map, so the map cannot be modified until the
    /// iterator is dropped.
    pub fn values(&self) -> Values<'_, V> {
        Values::new(self.list.iter(), Direction::Forward)
    }

    /// Values from back to front.
    ///
    /// The iterator borrows the map, so the map cannot be modified until the
    /// iterator is dropped.
    pub fn reverse_values(&self) -> Values<'_, V> {
        Values::new(self.list.iter(), Direction::Reverse)
    }

    /// `(key, value)` pairs from front to back. Double-ended.
    ///
    /// Each step resolves its key with one index probe by node handle, so a
    /// full pass costs one probe per entry and degrades to quadratic under a
    /// hasher that collides every key. [`values`](Self::values) does not
    /// touch the index.
    pub fn iter(&self) -> Iter<'_, K, V, S> {
        Iter::new(self, self.list.iter())
    }

    /// Key stored for the node at `node`. Never calls `K: Hash`.
    pub(crate) fn key_of(&self, hash: u64, node: NodeHandle) -> &K {
        match self.index.find(hash, |s| s.node == node) {
            Some(slot) => &slot.key,
            None => unindexed_node(),
        }
    }
}

impl<K, V, S> DoublyLinkedMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher(0, hasher)
    }

    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self {
            hasher,
            index: HashTable::with_capacity(capacity),
            list: LinkedSequence::with_capacity(capacity),
            reentrancy: DebugReentrancy::new(),
        }
    }

    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        let hash = self.make_hash(q);
        let slot = self.index.find(hash, |s| s.key.borrow() == q)?;
        Some(&self.list.get(slot.node).value)
    }

    /// Mutable access to a value. Does not change its position.
    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        let hash = self.make_hash(q);
        let node = self.index.find(hash, |s| s.key.borrow() == q)?.node;
        Some(&mut self.list.get_mut(node).value)
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        let hash = self.make_hash(q);
        self.index.find(hash, |s| s.key.borrow() == q).is_some()
    }

    /// Place `value` at the back under `key`, returning the value it
    /// replaced.
    ///
    /// An existing entry for `key` is destroyed first, so the key always ends
    /// up last regardless of where it was before.
    pub fn put_back(&mut self, key: K, value: V) -> Option<V> {
        self.put(End::Back, key, value)
    }

    /// Place `value` at the front under `key`, returning the value it
    /// replaced.
    ///
    /// An existing entry for `key` is destroyed first, so the key always ends
    /// up first regardless of where it was before.
    pub fn put_front(&mut self, key: K, value: V) -> Option<V> {
        self.put(End::Front, key, value)
    }

    fn put(&mut self, end: End, key: K, value: V) -> Option<V> {
        let _g = self.reentrancy.enter();
        let hash = self.make_hash(&key);
        let tracked = Tracked { hash, value };
        match self.index.entry(hash, |s| s.key == key, |s| s.hash) {
            Entry::Occupied(mut occupied) => {
                // Never an in-place update: the old entry goes, and a new
                // node is linked at `end` and indexed under the new `key`.
                let slot = occupied.get_mut();
                let previous = self.list.remove(slot.node);
                slot.node = self.list.push(end, tracked);
                slot.key = key;
                Some(previous.value)
            }
            Entry::Vacant(vacant) => {
                let node = self.list.push(end, tracked);
                vacant.insert(Slot { key, hash, node });
                None
            }
        }
    }

    pub fn remove<Q>(&mut self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.remove_entry(q).map(|(_, v)| v)
    }

    /// Remove an entry, returning the stored key along with its value.
    pub fn remove_entry<Q>(&mut self, q: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        let hash = self.make_hash(q);
        let (slot, _) = self
            .index
            .find_entry(hash, |s| s.key.borrow() == q)
            .ok()?
            .remove();
        let tracked = self.list.remove(slot.node);
        Some((slot.key, tracked.value))
    }

    /// Remove and return the entry at the front of the order.
    pub fn pop_front(&mut self) -> Option<(K, V)> {
        self.pop(End::Front)
    }

    /// Remove and return the entry at the back of the order.
    pub fn pop_back(&mut self) -> Option<(K, V)> {
        self.pop(End::Back)
    }

    fn pop(&mut self, end: End) -> Option<(K, V)> {
        let _g = self.reentrancy.enter();
        let node = self.list.end(end)?;
        let tracked = self.list.remove(node);
        let (slot, _) = match self.index.find_entry(tracked.hash, |s| s.node == node) {
            Ok(entry) => entry.remove(),
            Err(_) => unindexed_node(),
        };
        Some((slot.key, tracked.value))
    }

    pub fn clear(&mut self) {
        let _g = self.reentrancy.enter();
        self.index.clear();
        self.list.clear();
    }

    /// Check the index and the sequence describe the same entries.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        self.list.assert_linked();
        assert_eq!(self.index.len(), self.list.len());
        for slot in self.index.iter() {
            let tracked = self.list.get(slot.node);
            assert_eq!(tracked.hash, slot.hash, "node hash disagrees with slot");
            assert_eq!(self.make_hash(&slot.key), slot.hash, "stale stored hash");
        }
    }
}

impl<K, V, S> fmt::Debug for DoublyLinkedMap<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, S> IntoIterator for &'a DoublyLinkedMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S> Extend<(K, V)> for DoublyLinkedMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Appends with [`put_back`](DoublyLinkedMap::put_back) semantics.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.put_back(k, v);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for DoublyLinkedMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut m = Self::with_hasher(S::default());
        m.extend(iter);
        m
    }
}
