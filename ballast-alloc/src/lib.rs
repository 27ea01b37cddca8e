//! Pluggable memory allocation for the ballast containers.
//!
//! Containers in this workspace never call `std::alloc` directly. They go
//! through the [`Allocator`] trait, injected at construction time, so the
//! same container type can run on the system heap, a pre-sized arena, or an
//! instrumented allocator in tests.
//!
//! # Design
//!
//! The trait carries only the two memory operations. Placement of values
//! into allocated blocks (and dropping them out again) is the container's
//! job, done with `ptr::write`/`ptr::drop_in_place` at the call site, so an
//! allocator implementation never needs to know element types.
//!
//! ```text
//! Allocator        - allocate(Layout) -> block, deallocate(block, Layout)
//!     │
//!     ├── Global   - system heap, zero-sized handle, the default
//!     ├── Arena    - fixed region, bump allocation, wholesale reclaim
//!     └── Counting - wraps another allocator, tallies traffic
//! ```
//!
//! # Contract
//!
//! A block returned by `allocate` is uninitialized; callers must construct
//! every slot they later read. A block must be returned to the allocator it
//! came from, with the layout it was requested under. Allocators are used
//! through `&self` and may be shared by several containers at once
//! (single-threaded; none of these types synchronize).
//!
//! # Example
//!
//! ```
//! use ballast_alloc::{Allocator, Global};
//! use std::alloc::Layout;
//!
//! let layout = Layout::new::<u64>();
//! let block = Global.allocate(layout).unwrap();
//! unsafe {
//!     block.cast::<u64>().as_ptr().write(42);
//!     assert_eq!(block.cast::<u64>().as_ptr().read(), 42);
//!     Global.deallocate(block, layout);
//! }
//! ```

use core::fmt;
use core::ptr::NonNull;
use std::alloc::Layout;

pub mod arena;
pub mod counting;

pub use arena::Arena;
pub use counting::Counting;

/// A source of raw memory blocks.
///
/// # Safety
///
/// Implementations must return blocks that are valid for reads and writes of
/// `layout.size()` bytes, aligned to `layout.align()`, and disjoint from
/// every other live block, until the block is passed back to `deallocate`.
pub unsafe trait Allocator {
    /// Allocates a block of memory fitting `layout`.
    ///
    /// The block is uninitialized. `layout.size()` must be non-zero.
    ///
    /// # Errors
    ///
    /// Returns an [`AllocError`] if the request cannot be satisfied.
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError>;

    /// Returns a block of memory to the allocator.
    ///
    /// # Safety
    ///
    /// `ptr` must denote a block previously returned by `allocate` on this
    /// same allocator, and `layout` must be the layout it was requested
    /// under. The block must not be used after this call.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
}

// An allocator borrowed by a container behaves like the allocator itself.
// This is what lets tests keep a handle on an `Arena` or `Counting` while a
// container is using it.
unsafe impl<A: Allocator + ?Sized> Allocator for &A {
    #[inline]
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        (**self).allocate(layout)
    }

    #[inline]
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        unsafe { (**self).deallocate(ptr, layout) }
    }
}

/// An error with allocating or deallocating memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AllocError {
    /// The underlying memory source is out of memory.
    OutOfMemory,
    /// A fixed-capacity allocator cannot fit the request.
    Exhausted {
        /// Size of the failed request, in bytes.
        requested: usize,
        /// Bytes still unused in the allocator's region.
        remaining: usize,
    },
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocError::OutOfMemory => write!(f, "out of memory"),
            AllocError::Exhausted {
                requested,
                remaining,
            } => {
                write!(
                    f,
                    "allocator exhausted: requested {requested} bytes, {remaining} remaining"
                )
            }
        }
    }
}

impl std::error::Error for AllocError {}

/// The system heap.
///
/// Zero-sized, `Copy`, and the default allocator for every container in the
/// workspace. Forwards to `std::alloc`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Global;

unsafe impl Allocator for Global {
    #[inline]
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        assert!(layout.size() != 0, "allocation size must be non-zero");

        // SAFETY: layout has non-zero size.
        let ptr = unsafe { std::alloc::alloc(layout) };
        NonNull::new(ptr).ok_or(AllocError::OutOfMemory)
    }

    #[inline]
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: caller guarantees ptr/layout came from `allocate`.
        unsafe { std::alloc::dealloc(ptr.as_ptr(), layout) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_round_trip() {
        let layout = Layout::array::<u32>(8).unwrap();
        let block = Global.allocate(layout).unwrap();

        unsafe {
            let ptr = block.cast::<u32>().as_ptr();
            for i in 0..8 {
                ptr.add(i).write(i as u32);
            }
            for i in 0..8 {
                assert_eq!(ptr.add(i).read(), i as u32);
            }
            Global.deallocate(block, layout);
        }
    }

    #[test]
    fn global_respects_alignment() {
        #[repr(align(64))]
        struct Aligned([u8; 64]);

        let layout = Layout::new::<Aligned>();
        let block = Global.allocate(layout).unwrap();
        assert_eq!(block.as_ptr() as usize % 64, 0);

        unsafe { Global.deallocate(block, layout) };
    }

    #[test]
    fn allocate_through_reference() {
        let alloc = &Global;
        let layout = Layout::new::<u64>();
        let block = alloc.allocate(layout).unwrap();
        unsafe { alloc.deallocate(block, layout) };
    }

    #[test]
    fn error_display() {
        assert_eq!(AllocError::OutOfMemory.to_string(), "out of memory");
        assert_eq!(
            AllocError::Exhausted {
                requested: 64,
                remaining: 16
            }
            .to_string(),
            "allocator exhausted: requested 64 bytes, 16 remaining"
        );
    }
}
