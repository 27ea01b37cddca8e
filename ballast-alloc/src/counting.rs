//! Allocation-counting wrapper.

use core::cell::Cell;
use core::ptr::NonNull;
use std::alloc::Layout;

use crate::{AllocError, Allocator, Global};

/// Wraps another allocator and tallies its traffic.
///
/// Meant for tests and diagnostics: hand a container `&counting` and read
/// the counters afterwards to observe how many times it really hit the
/// allocator.
///
/// ```
/// use ballast_alloc::{Allocator, Counting};
/// use std::alloc::Layout;
///
/// let counting: Counting = Counting::default();
/// let layout = Layout::new::<u64>();
///
/// let block = counting.allocate(layout).unwrap();
/// assert_eq!(counting.allocations(), 1);
/// assert_eq!(counting.live_bytes(), 8);
///
/// unsafe { counting.deallocate(block, layout) };
/// assert_eq!(counting.deallocations(), 1);
/// assert_eq!(counting.live_bytes(), 0);
/// ```
#[derive(Debug, Default)]
pub struct Counting<A = Global> {
    inner: A,
    allocations: Cell<usize>,
    deallocations: Cell<usize>,
    live_bytes: Cell<usize>,
}

impl<A> Counting<A> {
    /// Wraps `inner`, with all counters at zero.
    pub fn new(inner: A) -> Self {
        Self {
            inner,
            allocations: Cell::new(0),
            deallocations: Cell::new(0),
            live_bytes: Cell::new(0),
        }
    }

    /// Number of successful `allocate` calls.
    #[inline]
    pub fn allocations(&self) -> usize {
        self.allocations.get()
    }

    /// Number of `deallocate` calls.
    #[inline]
    pub fn deallocations(&self) -> usize {
        self.deallocations.get()
    }

    /// Bytes currently allocated and not yet returned.
    #[inline]
    pub fn live_bytes(&self) -> usize {
        self.live_bytes.get()
    }

    /// Unwraps the inner allocator.
    pub fn into_inner(self) -> A {
        self.inner
    }
}

unsafe impl<A: Allocator> Allocator for Counting<A> {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        let block = self.inner.allocate(layout)?;
        self.allocations.set(self.allocations.get() + 1);
        self.live_bytes.set(self.live_bytes.get() + layout.size());
        Ok(block)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        self.deallocations.set(self.deallocations.get() + 1);
        self.live_bytes.set(self.live_bytes.get() - layout.size());
        // SAFETY: forwarded under the caller's guarantees.
        unsafe { self.inner.deallocate(ptr, layout) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tallies_balance_out() {
        let counting = Counting::new(Global);
        let layout = Layout::array::<u64>(4).unwrap();

        let a = counting.allocate(layout).unwrap();
        let b = counting.allocate(layout).unwrap();
        assert_eq!(counting.allocations(), 2);
        assert_eq!(counting.live_bytes(), 64);

        unsafe {
            counting.deallocate(a, layout);
            counting.deallocate(b, layout);
        }
        assert_eq!(counting.deallocations(), 2);
        assert_eq!(counting.live_bytes(), 0);
    }

    #[test]
    fn failed_allocations_are_not_counted() {
        use crate::Arena;

        let counting = Counting::new(Arena::with_capacity(8));
        assert!(counting.allocate(Layout::array::<u8>(16).unwrap()).is_err());
        assert_eq!(counting.allocations(), 0);
        assert_eq!(counting.live_bytes(), 0);
    }
}
