//! doubly-linked-map: a hash map that keeps placement order, can be
//! traversed from either end, and can be extended at either end.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: O(1) keyed lookup plus a deterministic order in which any entry
//!   can be moved to the front or back in O(1). This is the ordering
//!   backbone of LRU-style caches and ordered sessions.
//! - Layers:
//!   - LinkedSequence<T>: doubly linked list whose nodes live in a
//!     generational arena (`slotmap`). Owns every value and the order.
//!   - DoublyLinkedMap<K, V, S>: public API. A `hashbrown::HashTable` maps
//!     each key to the handle of its node; all order work is delegated to
//!     the sequence.
//!
//! Constraints
//! - Single-threaded: `Send` but `!Sync`; no internal locking.
//! - Unique keys. Re-inserting a key destroys its node and creates a new
//!   one at the requested end; it is never an in-place update.
//! - Node handles never leave the crate. A stale handle inside the crate is
//!   an invariant breach and panics.
//!
//! Hasher invariants
//! - Each index slot and each node store the key's `u64` hash. Growing the
//!   index and mapping a node back to its key use the stored hash, so
//!   `K: Hash` runs once per insert or lookup and never during rehashing.
//!
//! Reentrancy
//! - Public methods that call `K: Hash`/`K: Eq` open a debug-only guard
//!   section. A key whose `Eq` calls back into the same map panics in debug
//!   builds instead of seeing the index and sequence out of step.
//!
//! Iteration
//! - `values`, `reverse_values` and `iter` borrow the map, so mutation
//!   while iterating is rejected at compile time. `Values::next_value`
//!   reports running past the end as `IteratorExhausted`.

mod doubly_linked_map;
mod error;
mod iter;
#[cfg(feature = "bench_internal")]
pub mod linked_sequence;
#[cfg(not(feature = "bench_internal"))]
mod linked_sequence;
#[cfg(test)]
mod doubly_linked_map_proptest;
mod reentrancy;

// Public surface
pub use doubly_linked_map::DoublyLinkedMap;
pub use error::IteratorExhausted;
pub use iter::{Iter, Values};
