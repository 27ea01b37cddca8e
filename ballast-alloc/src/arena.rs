//! Fixed-region bump allocator.

use core::cell::{Cell, UnsafeCell};
use core::ptr::NonNull;
use std::alloc::Layout;

use bytesize::ByteSize;
use log::error;

use crate::{AllocError, Allocator};

/// A non-global allocator that hands out blocks from one contiguous,
/// pre-sized memory region.
///
/// Allocation bumps an offset; `deallocate` is a no-op. The whole region is
/// reclaimed at once when the arena is dropped (or rewound with [`reset`]),
/// which makes the arena a good fit for containers whose lifetime matches a
/// phase of the program: build them on the arena, drop them, reset.
///
/// Containers borrow the arena, so one arena can back several containers at
/// a time:
///
/// ```
/// use ballast_alloc::{Allocator, Arena};
/// use std::alloc::Layout;
///
/// let arena = Arena::with_capacity(4096);
/// let a = arena.allocate(Layout::new::<u64>()).unwrap();
/// let b = arena.allocate(Layout::new::<u64>()).unwrap();
/// assert_ne!(a, b);
/// assert!(arena.used() >= 16);
/// ```
///
/// [`reset`]: Arena::reset
pub struct Arena {
    buf: UnsafeCell<Box<[u8]>>,
    offset: Cell<usize>,
}

impl Arena {
    /// Constructs an arena owning `capacity` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "arena capacity must be non-zero");
        Self {
            buf: UnsafeCell::new(vec![0u8; capacity].into_boxed_slice()),
            offset: Cell::new(0),
        }
    }

    /// Returns the size of the region in bytes.
    #[inline]
    pub fn capacity(&self) -> usize {
        unsafe { (&(*self.buf.get())).len() }
    }

    /// Returns the number of bytes handed out so far, padding included.
    #[inline]
    pub fn used(&self) -> usize {
        self.offset.get()
    }

    /// Returns the number of bytes still available.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity() - self.offset.get()
    }

    /// Rewinds the arena to empty, making the whole region available again.
    ///
    /// # Safety
    ///
    /// Every block previously handed out becomes dangling. No container or
    /// other holder of a block from this arena may still be alive.
    pub unsafe fn reset(&self) {
        self.offset.set(0);
    }

    #[inline]
    fn base(&self) -> *mut u8 {
        unsafe { (&mut *self.buf.get()).as_mut_ptr() }
    }
}

unsafe impl Allocator for Arena {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        let size = layout.size();
        assert!(size != 0, "allocation size must be non-zero");

        // Align the absolute address, not the offset: the region itself is
        // only byte-aligned.
        let base = self.base() as usize;
        let addr = base + self.offset.get();
        let aligned = addr
            .checked_add(layout.align() - 1)
            .ok_or(AllocError::OutOfMemory)?
            & !(layout.align() - 1);
        let start = aligned - base;

        let end = match start.checked_add(size) {
            Some(end) if end <= self.capacity() => end,
            _ => {
                error!(
                    "arena exhausted: requested {}, {} remaining of {}",
                    ByteSize::b(size as u64).to_string_as(true),
                    ByteSize::b(self.remaining() as u64).to_string_as(true),
                    ByteSize::b(self.capacity() as u64).to_string_as(true),
                );
                return Err(AllocError::Exhausted {
                    requested: size,
                    remaining: self.remaining(),
                });
            }
        };

        self.offset.set(end);

        // SAFETY: start is in bounds of the owned region.
        Ok(unsafe { NonNull::new_unchecked(self.base().add(start)) })
    }

    #[inline]
    unsafe fn deallocate(&self, _ptr: NonNull<u8>, _layout: Layout) {
        // Individual blocks are not reclaimed; the region is reused wholesale
        // via `reset` or freed when the arena drops.
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bump_is_sequential() {
        let arena = Arena::with_capacity(64);
        let layout = Layout::new::<u8>();

        let a = arena.allocate(layout).unwrap();
        let b = arena.allocate(layout).unwrap();
        assert_eq!(a.as_ptr() as usize + 1, b.as_ptr() as usize);
        assert_eq!(arena.used(), 2);
    }

    #[test]
    fn respects_alignment() {
        let arena = Arena::with_capacity(256);

        arena.allocate(Layout::new::<u8>()).unwrap();
        let block = arena.allocate(Layout::new::<u64>()).unwrap();
        assert_eq!(block.as_ptr() as usize % 8, 0);
    }

    #[test]
    fn exhaustion_reports_remaining() {
        let arena = Arena::with_capacity(16);
        arena.allocate(Layout::array::<u8>(12).unwrap()).unwrap();

        let err = arena.allocate(Layout::array::<u8>(8).unwrap()).unwrap_err();
        assert_eq!(
            err,
            AllocError::Exhausted {
                requested: 8,
                remaining: 4
            }
        );

        // A smaller request still fits.
        arena.allocate(Layout::array::<u8>(4).unwrap()).unwrap();
        assert_eq!(arena.remaining(), 0);
    }

    #[test]
    fn reset_rewinds() {
        let arena = Arena::with_capacity(8);
        arena.allocate(Layout::array::<u8>(8).unwrap()).unwrap();
        assert_eq!(arena.remaining(), 0);

        // SAFETY: the block above is no longer used.
        unsafe { arena.reset() };
        assert_eq!(arena.used(), 0);
        arena.allocate(Layout::array::<u8>(8).unwrap()).unwrap();
    }

    #[test]
    fn deallocate_is_noop() {
        let arena = Arena::with_capacity(16);
        let layout = Layout::new::<u32>();
        let block = arena.allocate(layout).unwrap();

        let used = arena.used();
        unsafe { arena.deallocate(block, layout) };
        assert_eq!(arena.used(), used);
    }
}
