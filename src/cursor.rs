// Purpose: Bidirectional position handles into a RingDeque.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_DEQUE_ID: AtomicU64 = AtomicU64::new(0);

/// Identity of one deque instance. Moves keep it, clones get a fresh one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DequeId(u64);

impl DequeId {
    pub(crate) fn next() -> Self {
        DequeId(NEXT_DEQUE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A position in a deque's buffer: the owning deque's identity plus a
/// physical slot index.
///
/// Cursors hold no borrow of the deque. They are read through
/// [`RingDeque::at`](crate::RingDeque::at) and stop being meaningful after the
/// next push, pop, reserve or clear.
#[derive(Debug, Clone, Copy)]
pub struct Cursor {
    owner: DequeId,
    index: usize,
    // Physical slot count when the cursor was issued.
    modulus: usize,
}

impl Cursor {
    pub(crate) fn new(owner: DequeId, index: usize, modulus: usize) -> Self {
        Self {
            owner,
            index,
            modulus,
        }
    }

    pub fn owner(&self) -> DequeId {
        self.owner
    }

    /// Physical slot index in the buffer.
    pub fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn modulus(&self) -> usize {
        self.modulus
    }

    /// Steps forward one slot, wrapping past the physical end.
    pub fn move_next(&mut self) {
        self.index = (self.index + 1) % self.modulus;
    }

    /// Steps back one slot, wrapping before the physical start.
    pub fn move_prev(&mut self) {
        self.index = (self.index + self.modulus - 1) % self.modulus;
    }

    /// Copy of this cursor one slot forward.
    pub fn forward(mut self) -> Self {
        self.move_next();
        self
    }

    pub fn backward(mut self) -> Self {
        self.move_prev();
        self
    }
}

// Same deque, same slot.
impl PartialEq for Cursor {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner && self.index == other.index
    }
}

impl Eq for Cursor {}
