// Purpose: Owning slot storage backing the ring deque.

use std::{
    alloc::{self, Layout},
    fmt::Debug,
    mem::{self, MaybeUninit},
    ptr::{self, NonNull},
};

use crate::error::DequeError;

/*
OwnedBuffer<T>:

- Owns one contiguous allocation of `slots` uninitialized slots.
- Knows nothing about which slots are live; the deque on top tracks that
  and drops live elements itself.
- Only allocation and deallocation happen here, plus raw slot access.
*/

/// Contiguous, exclusively owned block of slots.
pub struct OwnedBuffer<T> {
    ptr: NonNull<MaybeUninit<T>>,
    slots: usize,
}

unsafe impl<T: Send> Send for OwnedBuffer<T> {}
unsafe impl<T: Sync> Sync for OwnedBuffer<T> {}

impl<T> OwnedBuffer<T> {
    /// Empty buffer, no allocation.
    pub const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            slots: 0,
        }
    }

    /// Allocates `slots` slots. Never aborts on allocation failure; the error
    /// is handed back so callers can keep their previous state.
    pub fn try_with_slots(slots: usize) -> Result<Self, DequeError> {
        if slots == 0 {
            return Ok(Self::new());
        }

        let layout =
            Layout::array::<MaybeUninit<T>>(slots).map_err(|_| DequeError::CapacityOverflow)?;

        // Zero-sized types never touch the allocator.
        if layout.size() == 0 {
            return Ok(Self {
                ptr: NonNull::dangling(),
                slots,
            });
        }

        let raw_ptr = unsafe { alloc::alloc(layout) as *mut MaybeUninit<T> };
        let ptr = NonNull::new(raw_ptr).ok_or(DequeError::AllocFailed {
            bytes: layout.size(),
        })?;

        Ok(Self { ptr, slots })
    }

    pub fn slots(&self) -> usize {
        self.slots
    }

    /// Moves `value` into slot `index` without dropping what was there.
    ///
    /// # Safety
    /// `index < self.slots()`. A live value in that slot is leaked.
    pub unsafe fn write(&mut self, index: usize, value: T) {
        debug_assert!(index < self.slots);
        unsafe {
            (*self.ptr.as_ptr().add(index)).write(value);
        }
    }

    /// Moves the value out of slot `index`, leaving the slot logically empty.
    ///
    /// # Safety
    /// `index < self.slots()` and the slot holds a live value, which the caller
    /// must stop treating as live.
    pub unsafe fn read(&self, index: usize) -> T {
        debug_assert!(index < self.slots);
        unsafe { ptr::read((*self.ptr.as_ptr().add(index)).as_ptr()) }
    }

    /// # Safety
    /// `index < self.slots()` and the slot holds a live value.
    pub unsafe fn get(&self, index: usize) -> &T {
        debug_assert!(index < self.slots);
        unsafe { &*self.ptr.as_ptr().add(index).cast::<T>() }
    }

    /// # Safety
    /// `index < self.slots()` and the slot holds a live value.
    pub unsafe fn get_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.slots);
        unsafe { &mut *self.ptr.as_ptr().add(index).cast::<T>() }
    }

    /// Drops the value in slot `index` in place.
    ///
    /// # Safety
    /// `index < self.slots()` and the slot holds a live value, which is dead afterwards.
    pub unsafe fn drop_slot(&mut self, index: usize) {
        debug_assert!(index < self.slots);
        unsafe {
            ptr::drop_in_place(self.ptr.as_ptr().add(index).cast::<T>());
        }
    }

    /// Base pointer of the slot block, for iterators that hand out `&mut T`.
    pub(crate) fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr().cast::<T>()
    }

    /// Exchanges the two allocations without touching any element.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.ptr, &mut other.ptr);
        mem::swap(&mut self.slots, &mut other.slots);
    }
}

impl<T> Default for OwnedBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Drop for OwnedBuffer<T>
impl<T> Drop for OwnedBuffer<T> {
    fn drop(&mut self) {
        if self.slots == 0 {
            return;
        }

        let Ok(layout) = Layout::array::<MaybeUninit<T>>(self.slots) else {
            return;
        };
        if layout.size() == 0 {
            return;
        }

        unsafe {
            alloc::dealloc(self.ptr.as_ptr() as *mut u8, layout);
        }
    }
}

// Debug for OwnedBuffer<T>
impl<T> Debug for OwnedBuffer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OwnedBuffer")
            .field("ptr", &self.ptr)
            .field("slots", &self.slots)
            .finish()
    }
}
