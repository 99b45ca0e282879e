//! # ring-deque
//!
//! A double-ended queue on a ring buffer, plus two fork-join parallel sorts.
//!
//! - [`RingDeque`]: growable or fixed-capacity deque over an [`OwnedBuffer`] of
//!   `capacity + 1` slots. The extra slot is never occupied and tells "full"
//!   apart from "empty".
//! - [`Cursor`]: bidirectional position handle into a deque.
//! - [`merge_sort`] and [`quick_sort`]: recursive sorts over slices that fork the
//!   two halves onto scoped threads for the top `floor(ln n)` levels.
//!
//! ```rust
//! use ring_deque::RingDeque;
//!
//! let mut deque = RingDeque::new();
//! deque.push_back(3)?;
//! deque.push_front(2)?;
//! deque.push_back(4)?;
//! assert_eq!(deque.to_string(), "[2, 3, 4]");
//! assert_eq!(deque.pop_front()?, 2);
//! # Ok::<(), ring_deque::DequeError>(())
//! ```
//!
//! The deque is single-threaded; share it across threads only behind your own lock.

pub mod cursor;
pub mod error;
pub mod fork_join;
pub mod merge_sort;
pub mod quick_sort;
pub mod raw_buf;
pub mod ring_deque;

#[cfg(test)]
mod proptests;

pub use crate::cursor::{Cursor, DequeId};
pub use crate::error::DequeError;
pub use crate::fork_join::ParallelDepth;
pub use crate::merge_sort::{merge_sort, merge_sort_by, merge_sort_with};
pub use crate::quick_sort::{quick_sort, quick_sort_by, quick_sort_with};
pub use crate::raw_buf::OwnedBuffer;
pub use crate::ring_deque::{GrowthPolicy, IntoIter, Iter, IterMut, RingDeque};

/// Result type for deque operations
pub type Result<T> = core::result::Result<T, DequeError>;
