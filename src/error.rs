use thiserror::Error;

/// Errors reported by the deque, its buffer and its cursors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DequeError {
    #[error("{op}() called on an empty deque")]
    Empty { op: &'static str },
    #[error("index {index} out of range for deque of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("deque capacity {capacity} is not enough for another element")]
    CapacityExceeded { capacity: usize },
    #[error("capacity overflow")]
    CapacityOverflow,
    #[error("failed to allocate {bytes} bytes")]
    AllocFailed { bytes: usize },
    #[error("cursor belongs to a different deque")]
    ForeignCursor,
    #[error("cursor was issued before the deque reallocated")]
    StaleCursor,
}

impl DequeError {
    /// True for the errors that mean "no element at that position":
    /// popping an empty deque and indexing past the end.
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            DequeError::Empty { .. } | DequeError::IndexOutOfRange { .. }
        )
    }
}
