// Purpose: Depth-bounded fork-join shared by the parallel sorts.

use std::{panic, thread};

/// How deep the recursion keeps forking before it runs both halves inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParallelDepth {
    /// `floor(ln len)` levels, measured on the whole input.
    #[default]
    Auto,
    /// Fork at recursion depths `0..=d`.
    Fixed(usize),
    /// Never fork.
    Sequential,
}

impl ParallelDepth {
    /// Deepest recursion level that still forks for an input of `len`
    /// elements, or `None` when nothing forks.
    pub fn ceiling(self, len: usize) -> Option<usize> {
        match self {
            ParallelDepth::Auto => Some(auto_ceiling(len)),
            ParallelDepth::Fixed(depth) => Some(depth),
            ParallelDepth::Sequential => None,
        }
    }
}

/// `floor(ln len)`; 0 for empty and single-element inputs.
pub fn auto_ceiling(len: usize) -> usize {
    if len < 2 {
        0
    } else {
        (len as f64).ln().floor() as usize
    }
}

/// Runs `left` and `right`, on two threads when `fork` is set, and returns
/// once both are done. A panic in either closure reaches the caller.
pub(crate) fn join<A, B>(fork: bool, left: A, right: B)
where
    A: FnOnce() + Send,
    B: FnOnce() + Send,
{
    if !fork {
        left();
        right();
        return;
    }

    thread::scope(|scope| {
        let handle = scope.spawn(left);
        right();
        if let Err(payload) = handle.join() {
            panic::resume_unwind(payload);
        }
    });
}
