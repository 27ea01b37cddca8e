//! Value-semantics containers with explicit, pluggable allocation.
//!
//! Every container in this crate takes its memory from an
//! [`Allocator`](ballast_alloc::Allocator) chosen per instance: the system
//! heap by default, or an arena, or an instrumented allocator in tests. The
//! container owns every element and allocation outright; copies are deep,
//! moves transfer the whole structure, and nothing is shared between two
//! live containers.
//!
//! # Containers
//!
//! | Container | Storage | Strengths |
//! |-----------|---------|-----------|
//! | [`Vec`]   | one contiguous block | O(1) indexing, amortized O(1) append |
//! | [`List`]  | ring of nodes + sentinel | O(1) insert/erase/splice at a position, stable addresses |
//! | [`Array`] | inline `[T; N]` | fixed size, no allocation |
//! | [`Boxed`] | one heap slot | single-owner handle |
//!
//! `Vec` pays O(len) for arbitrary-position insert/erase (the tail shifts)
//! and invalidates positions whenever it reallocates. `List` never moves an
//! element once placed, at the cost of one extra node of overhead and no
//! random access.
//!
//! # Quick start
//!
//! ```
//! use ballast_alloc::Arena;
//! use ballast_collections::{List, Vec};
//!
//! // Default: global allocator.
//! let mut v: Vec<u64> = Vec::new();
//! v.push(1);
//!
//! // Same container type, arena-backed.
//! let arena = Arena::with_capacity(4096);
//! let mut list = List::new_in(&arena);
//! list.push_back("node");
//! ```
//!
//! # Concurrency
//!
//! Single-writer, unsynchronized. A container assumes exclusive access by
//! one logical owner; callers serialize if they must share one across
//! threads.

pub mod array;
pub mod boxed;
pub mod list;
pub mod vec;

pub use array::Array;
pub use boxed::Boxed;
pub use list::{CursorMut, List};
pub use vec::Vec;
