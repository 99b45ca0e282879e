// Purpose: Double-ended queue on a ring buffer with one reserved sentinel slot.

use std::{
    fmt::{self, Debug, Display},
    iter::FusedIterator,
    marker::PhantomData,
    ops::{Index, IndexMut},
};

use crate::{
    cursor::{Cursor, DequeId},
    error::DequeError,
    raw_buf::OwnedBuffer,
};

// =====================
// Struct Definitions
// =====================

/// What a push does when the deque is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GrowthPolicy {
    /// Report [`DequeError::CapacityExceeded`].
    Disabled,
    /// Double the capacity, or go to 1 from 0.
    #[default]
    DoubleOnFull,
}

/// A double-ended queue stored in a ring buffer of `capacity + 1` slots.
///
/// `head` is the physical slot of the first element and `tail` the slot one
/// past the last. The slot at `tail` is never live, so `head == tail` always
/// means empty. Every index is reduced modulo the physical slot count, never
/// modulo `capacity`.
pub struct RingDeque<T> {
    buf: OwnedBuffer<T>,
    head: usize,
    tail: usize,
    len: usize,
    capacity: usize,
    growth: GrowthPolicy,
    id: DequeId,
}

/// Immutable reference iterator for RingDeque<T>.
/// Yields &T in logical order from either end.
pub struct Iter<'a, T> {
    deque: &'a RingDeque<T>,
    front: usize,
    back: usize,
}

/// Mutable reference iterator for RingDeque<T>.
/// Yields &mut T in logical order from either end.
pub struct IterMut<'a, T> {
    ptr: *mut T,
    head: usize,
    modulus: usize,
    front: usize,
    back: usize,
    _marker: PhantomData<&'a mut T>,
}

/// Consuming iterator for RingDeque<T>.
pub struct IntoIter<T> {
    deque: RingDeque<T>,
}

// =====================
// Inherent impl blocks
// =====================

impl<T> RingDeque<T> {
    /// Empty deque with capacity 0. Does not allocate.
    pub fn new() -> Self {
        Self {
            buf: OwnedBuffer::new(),
            head: 0,
            tail: 0,
            len: 0,
            capacity: 0,
            growth: GrowthPolicy::default(),
            id: DequeId::next(),
        }
    }

    /// Growable deque with room for `capacity` elements.
    ///
    /// # Panics
    /// If the buffer cannot be allocated.
    pub fn with_capacity(capacity: usize) -> Self {
        or_panic(Self::try_with_growth(capacity, GrowthPolicy::DoubleOnFull))
    }

    /// Deque that holds at most `capacity` elements and never reallocates on push.
    ///
    /// # Panics
    /// If the buffer cannot be allocated.
    pub fn fixed(capacity: usize) -> Self {
        or_panic(Self::try_with_growth(capacity, GrowthPolicy::Disabled))
    }

    pub fn try_with_growth(capacity: usize, growth: GrowthPolicy) -> Result<Self, DequeError> {
        Ok(Self {
            buf: alloc_slots(capacity)?,
            head: 0,
            tail: 0,
            len: 0,
            capacity,
            growth,
            id: DequeId::next(),
        })
    }

    /// `len` default values; `len == capacity`, so the next push grows.
    pub fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        let mut deque = Self::with_capacity(len);
        for _ in 0..len {
            deque.write_back(T::default());
        }
        deque
    }

    /// `len` copies of `value`; `len == capacity`.
    pub fn from_elem(len: usize, value: T) -> Self
    where
        T: Clone,
    {
        let mut deque = Self::with_capacity(len);
        for _ in 0..len {
            deque.write_back(value.clone());
        }
        deque
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity
    }

    /// Whether one more push fits without reallocating.
    pub fn has_spare_capacity(&self) -> bool {
        self.len < self.capacity
    }

    pub fn growth_policy(&self) -> GrowthPolicy {
        self.growth
    }

    pub fn id(&self) -> DequeId {
        self.id
    }

    /// Grows to exactly `new_capacity` if that is larger than the current
    /// capacity; otherwise does nothing. Elements are laid out again from slot
    /// 0 in logical order.
    ///
    /// The new buffer is allocated before anything else changes, so on error
    /// the deque is untouched.
    pub fn reserve(&mut self, new_capacity: usize) -> Result<(), DequeError> {
        if new_capacity <= self.capacity {
            return Ok(());
        }

        let mut fresh = alloc_slots::<T>(new_capacity)?;

        // Move elements in logical order, without dropping.
        for i in 0..self.len {
            let src = self.physical_index(i);
            unsafe {
                fresh.write(i, self.buf.read(src));
            }
        }

        // The old allocation ends up in `fresh` and only gets deallocated.
        self.buf.swap(&mut fresh);
        self.capacity = new_capacity;
        self.head = 0;
        self.tail = self.len;
        Ok(())
    }

    /// Drops every element. Capacity is kept.
    pub fn clear(&mut self) {
        let (head, len) = (self.head, self.len);
        let modulus = self.modulus();

        // Reset first so a panicking destructor leaks instead of double-dropping.
        self.len = 0;
        self.head = 0;
        self.tail = 0;

        for i in 0..len {
            let index = wrap_add(head, i, modulus);
            unsafe {
                self.buf.drop_slot(index);
            }
        }
    }

    pub fn push_back(&mut self, value: T) -> Result<(), DequeError> {
        self.grow_if_full()?;
        self.write_back(value);
        Ok(())
    }

    pub fn push_front(&mut self, value: T) -> Result<(), DequeError> {
        self.grow_if_full()?;

        self.head = self.step_back(self.head); // move head back
        unsafe {
            self.buf.write(self.head, value);
        }
        self.len += 1;
        Ok(())
    }

    pub fn pop_back(&mut self) -> Result<T, DequeError> {
        if self.len == 0 {
            return Err(DequeError::Empty { op: "pop_back" });
        }

        self.tail = self.step_back(self.tail);
        self.len -= 1;
        Ok(unsafe { self.buf.read(self.tail) })
    }

    pub fn pop_front(&mut self) -> Result<T, DequeError> {
        if self.len == 0 {
            return Err(DequeError::Empty { op: "pop_front" });
        }

        let value = unsafe { self.buf.read(self.head) };
        self.head = self.step(self.head);
        self.len -= 1;
        Ok(value)
    }

    /// Element at logical position `index`, 0 being the front.
    pub fn get(&self, index: usize) -> Result<&T, DequeError> {
        if index >= self.len {
            return Err(DequeError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        Ok(unsafe { self.buf.get(self.physical_index(index)) })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, DequeError> {
        if index >= self.len {
            return Err(DequeError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        let slot = self.physical_index(index);
        Ok(unsafe { self.buf.get_mut(slot) })
    }

    pub fn front(&self) -> Option<&T> {
        self.get(0).ok()
    }

    pub fn back(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|last| self.get(last).ok())
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|x| x == value)
    }

    /// Overwrites every element with a copy of `value`.
    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        for slot in self.iter_mut() {
            *slot = value.clone();
        }
    }

    /// Pushes every item at the back, stopping at the first failed push.
    pub fn extend_back<I>(&mut self, iter: I) -> Result<(), DequeError>
    where
        I: IntoIterator<Item = T>,
    {
        for value in iter {
            self.push_back(value)?;
        }
        Ok(())
    }

    /// Exchanges contents with `other` in O(1). Each deque keeps its own
    /// identity, so cursors issued by either one go stale.
    pub fn swap(&mut self, other: &mut Self) {
        self.buf.swap(&mut other.buf);
        std::mem::swap(&mut self.head, &mut other.head);
        std::mem::swap(&mut self.tail, &mut other.tail);
        std::mem::swap(&mut self.len, &mut other.len);
        std::mem::swap(&mut self.capacity, &mut other.capacity);
        std::mem::swap(&mut self.growth, &mut other.growth);
    }

    /// Cursor on the front element (equal to [`end`](Self::end) when empty).
    pub fn begin(&self) -> Cursor {
        Cursor::new(self.id, self.head, self.modulus())
    }

    /// Cursor on the sentinel slot one past the back element.
    pub fn end(&self) -> Cursor {
        Cursor::new(self.id, self.tail, self.modulus())
    }

    /// Element under `cursor`.
    pub fn at(&self, cursor: Cursor) -> Result<&T, DequeError> {
        let slot = self.check_cursor(cursor)?;
        Ok(unsafe { self.buf.get(slot) })
    }

    pub fn at_mut(&mut self, cursor: Cursor) -> Result<&mut T, DequeError> {
        let slot = self.check_cursor(cursor)?;
        Ok(unsafe { self.buf.get_mut(slot) })
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            deque: self,
            front: 0,
            back: self.len,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            ptr: self.buf.as_mut_ptr(),
            head: self.head,
            modulus: self.modulus(),
            front: 0,
            back: self.len,
            _marker: PhantomData,
        }
    }

    // Physical slot count. A deque that never allocated still reports 1.
    fn modulus(&self) -> usize {
        self.capacity + 1
    }

    fn physical_index(&self, logical: usize) -> usize {
        wrap_add(self.head, logical, self.modulus())
    }

    fn step(&self, index: usize) -> usize {
        (index + 1) % self.modulus()
    }

    fn step_back(&self, index: usize) -> usize {
        if index == 0 {
            self.modulus() - 1
        } else {
            index - 1
        }
    }

    fn grow_if_full(&mut self) -> Result<(), DequeError> {
        if self.len < self.capacity {
            return Ok(());
        }

        match self.growth {
            GrowthPolicy::Disabled => Err(DequeError::CapacityExceeded {
                capacity: self.capacity,
            }),
            GrowthPolicy::DoubleOnFull => {
                let new_capacity = if self.capacity == 0 {
                    1
                } else {
                    self.capacity
                        .checked_mul(2)
                        .ok_or(DequeError::CapacityOverflow)?
                };
                self.reserve(new_capacity)
            }
        }
    }

    // Caller guarantees len < capacity.
    fn write_back(&mut self, value: T) {
        debug_assert!(self.len < self.capacity);
        unsafe {
            self.buf.write(self.tail, value);
        }
        self.tail = self.step(self.tail);
        self.len += 1;
    }

    fn check_cursor(&self, cursor: Cursor) -> Result<usize, DequeError> {
        if cursor.owner() != self.id {
            return Err(DequeError::ForeignCursor);
        }
        if cursor.modulus() != self.modulus() {
            return Err(DequeError::StaleCursor);
        }

        let slot = cursor.index();
        let offset = if slot >= self.head {
            slot - self.head
        } else {
            slot + (self.modulus() - self.head)
        };
        if offset >= self.len {
            return Err(DequeError::IndexOutOfRange {
                index: offset,
                len: self.len,
            });
        }
        Ok(slot)
    }
}

// (base + offset) % modulus without overflowing, for base, offset < modulus.
fn wrap_add(base: usize, offset: usize, modulus: usize) -> usize {
    let room = modulus - base;
    if offset < room {
        base + offset
    } else {
        offset - room
    }
}

// capacity + 1 slots; capacity 0 allocates nothing.
fn alloc_slots<T>(capacity: usize) -> Result<OwnedBuffer<T>, DequeError> {
    if capacity == 0 {
        return Ok(OwnedBuffer::new());
    }
    let slots = capacity
        .checked_add(1)
        .ok_or(DequeError::CapacityOverflow)?;
    OwnedBuffer::try_with_slots(slots)
}

fn or_panic<T>(result: Result<T, DequeError>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{err}"),
    }
}

// =====================
// Trait Implementations
// =====================

// Iterator for Iter<'a, T>
impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            None
        } else {
            let slot = self.deque.physical_index(self.front);
            self.front += 1;
            Some(unsafe { self.deque.buf.get(slot) })
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            None
        } else {
            self.back -= 1;
            let slot = self.deque.physical_index(self.back);
            Some(unsafe { self.deque.buf.get(slot) })
        }
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            deque: self.deque,
            front: self.front,
            back: self.back,
        }
    }
}

// Iterator for IterMut<'a, T>
impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            None
        } else {
            let slot = wrap_add(self.head, self.front, self.modulus);
            self.front += 1;
            // Each logical position is handed out at most once.
            Some(unsafe { &mut *self.ptr.add(slot) })
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            None
        } else {
            self.back -= 1;
            let slot = wrap_add(self.head, self.back, self.modulus);
            Some(unsafe { &mut *self.ptr.add(slot) })
        }
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

// Iterator for IntoIter<T>
impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.deque.pop_front().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.deque.len, Some(self.deque.len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.deque.pop_back().ok()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

// IntoIterator for &RingDeque<T>
impl<'a, T> IntoIterator for &'a RingDeque<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// IntoIterator for &mut RingDeque<T>
impl<'a, T> IntoIterator for &'a mut RingDeque<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

// IntoIterator for RingDeque<T>
impl<T> IntoIterator for RingDeque<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { deque: self }
    }
}

impl<T> Index<usize> for RingDeque<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        or_panic(self.get(index))
    }
}

impl<T> IndexMut<usize> for RingDeque<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        or_panic(self.get_mut(index))
    }
}

impl<T> Default for RingDeque<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Drop for RingDeque<T>
impl<T> Drop for RingDeque<T> {
    fn drop(&mut self) {
        // OwnedBuffer deallocates afterwards.
        self.clear();
    }
}

// Clone for RingDeque<T>
impl<T: Clone> Clone for RingDeque<T> {
    fn clone(&self) -> Self {
        // A fixed deque keeps its bound, a growable one is trimmed to its length.
        let capacity = match self.growth {
            GrowthPolicy::Disabled => self.capacity,
            GrowthPolicy::DoubleOnFull => self.len,
        };
        let mut new = or_panic(Self::try_with_growth(capacity, self.growth));
        for value in self.iter() {
            new.write_back(value.clone());
        }
        new
    }
}

// PartialEq for RingDeque<T>
impl<T: PartialEq> PartialEq for RingDeque<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for RingDeque<T> {}

impl<T: PartialOrd> PartialOrd for RingDeque<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord> Ord for RingDeque<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.iter().cmp(other.iter())
    }
}

// FromIterator for RingDeque<T>
impl<T> FromIterator<T> for RingDeque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<T>>())
    }
}

// From<Vec<T>> for RingDeque<T>
impl<T> From<Vec<T>> for RingDeque<T> {
    fn from(vec: Vec<T>) -> Self {
        let mut new_deque = Self::with_capacity(vec.len());
        for value in vec {
            new_deque.write_back(value);
        }
        new_deque
    }
}

// From<&[T]> for RingDeque<T>
impl<T: Clone> From<&[T]> for RingDeque<T> {
    fn from(slice: &[T]) -> Self {
        let mut new_deque = Self::with_capacity(slice.len());
        for value in slice {
            new_deque.write_back(value.clone());
        }
        new_deque
    }
}

impl<T, const N: usize> From<[T; N]> for RingDeque<T> {
    fn from(array: [T; N]) -> Self {
        Self::from(Vec::from(array))
    }
}

// Debug for RingDeque<T>
impl<T: Debug> Debug for RingDeque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// "[a, b, c]", "[]" when empty.
impl<T: Display> Display for RingDeque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            Display::fmt(value, f)?;
        }
        f.write_str("]")
    }
}

// =====================
// Tests
// =====================
