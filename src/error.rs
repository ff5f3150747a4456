//! Error types surfaced by the map's iterators.

use core::fmt;

/// Returned by [`Values::next_value`](crate::Values::next_value) when the
/// iterator has already produced its last value.
///
/// This signals a caller bug: check [`Values::has_next`](crate::Values::has_next)
/// (or use the `Iterator` impl) before advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IteratorExhausted;

impl fmt::Display for IteratorExhausted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("iterator has no more values")
    }
}

impl std::error::Error for IteratorExhausted {}
