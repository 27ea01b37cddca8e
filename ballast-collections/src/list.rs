//! Sentinel-based doubly linked list with explicit allocation.
//!
//! [`List`] is a circular ring of heap nodes anchored by one sentinel node
//! that is allocated when the list is created, freed when the list is
//! dropped, and never holds an element. The sentinel's `next` is the first
//! element (or the sentinel itself when empty) and its `prev` is the last,
//! so a list of `n` elements owns `n + 1` nodes and every link operation is
//! a constant number of pointer rewrites, never a traversal.
//!
//! Node addresses are stable across every mutation: pushing, popping,
//! inserting and splicing never move a value. A position (cursor) is
//! invalidated only when the node it rests on is erased.
//!
//! # Positions
//!
//! [`CursorMut`] is the positional handle: it can walk in both directions,
//! read and write the current element, insert on either side of it, and
//! erase it. The position past the last element ("end") is the sentinel;
//! the cursor reports it via [`at_end`] and walks through it when it wraps.
//!
//! # Splice and allocator identity
//!
//! [`CursorMut::splice_from`] relinks an already-allocated node from one
//! list's ring into another's without touching the element. The receiving
//! list frees that node later through its own allocator, so the two lists
//! must use interchangeable allocators: the same borrowed allocator, or a
//! stateless one like [`Global`]. Splicing between lists whose allocators
//! cannot free each other's blocks is undefined behavior. (Two cursors can
//! never point into the same list; each holds an exclusive borrow.)
//!
//! # Example
//!
//! ```
//! use ballast_collections::List;
//!
//! let mut list: List<u64> = List::new();
//! list.push_back(1);
//! list.push_back(2);
//! list.push_front(0);
//!
//! assert_eq!(list.len(), 3);
//! let values: Vec<u64> = list.iter().copied().collect();
//! assert_eq!(values, [0, 1, 2]);
//!
//! assert_eq!(list.pop_front(), Some(0));
//! assert_eq!(list.pop_back(), Some(2));
//! ```
//!
//! [`at_end`]: CursorMut::at_end

use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::mem::MaybeUninit;
use core::ptr::{self, NonNull};
use std::alloc::{handle_alloc_error, Layout};

use ballast_alloc::{Allocator, Global};

struct Node<T> {
    prev: NonNull<Node<T>>,
    next: NonNull<Node<T>>,
    value: MaybeUninit<T>,
}

#[inline]
fn node_layout<T>() -> Layout {
    Layout::new::<Node<T>>()
}

/// Allocates one node with uninitialized fields.
fn allocate_node<T, A: Allocator>(alloc: &A) -> NonNull<Node<T>> {
    let layout = node_layout::<T>();
    match alloc.allocate(layout) {
        Ok(block) => block.cast(),
        Err(_) => handle_alloc_error(layout),
    }
}

/// A doubly linked list over an explicit allocator.
///
/// O(1) insertion, removal and splice at any held position; no random
/// access. See the [module docs](self) for the ring model.
///
/// # Example
///
/// ```
/// use ballast_alloc::Arena;
/// use ballast_collections::List;
///
/// let arena = Arena::with_capacity(4096);
/// let mut list = List::new_in(&arena);
/// list.push_back("a");
/// list.push_back("b");
/// assert_eq!(list.front(), Some(&"a"));
/// ```
pub struct List<T, A: Allocator = Global> {
    sentinel: NonNull<Node<T>>,
    len: usize,
    alloc: A,
    _marker: PhantomData<T>,
}

// Safety: List owns its nodes and elements outright.
unsafe impl<T: Send, A: Allocator + Send> Send for List<T, A> {}
unsafe impl<T: Sync, A: Allocator + Sync> Sync for List<T, A> {}

impl<T> List<T, Global> {
    /// Creates an empty list on the global allocator.
    ///
    /// Allocates the sentinel node.
    #[inline]
    pub fn new() -> Self {
        Self::new_in(Global)
    }
}

impl<T, A: Allocator> List<T, A> {
    /// Creates an empty list using `alloc`.
    ///
    /// Allocates the sentinel node, which lives until the list is dropped.
    pub fn new_in(alloc: A) -> Self {
        let sentinel = allocate_node::<T, A>(&alloc);
        // Safety: the node is freshly allocated; only the links are
        // initialized. The sentinel never holds an element.
        unsafe {
            ptr::addr_of_mut!((*sentinel.as_ptr()).prev).write(sentinel);
            ptr::addr_of_mut!((*sentinel.as_ptr()).next).write(sentinel);
        }
        Self {
            sentinel,
            len: 0,
            alloc,
            _marker: PhantomData,
        }
    }

    /// Returns the number of elements.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list holds no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a reference to the list's allocator.
    #[inline]
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    // ========================================================================
    // Link surgery
    // ========================================================================

    /// Links `node` into the ring immediately before `pos`.
    ///
    /// Exactly four link fields are rewritten.
    ///
    /// # Safety
    ///
    /// `pos` must be a node of this ring (the sentinel included); `node`
    /// must be allocated, initialized, and not linked anywhere.
    unsafe fn insert_node_before(&mut self, node: NonNull<Node<T>>, pos: NonNull<Node<T>>) {
        unsafe {
            let prev = (*pos.as_ptr()).prev;
            (*node.as_ptr()).prev = prev;
            (*node.as_ptr()).next = pos;
            (*prev.as_ptr()).next = node;
            (*pos.as_ptr()).prev = node;
        }
        self.len += 1;
    }

    /// Unlinks `node` from the ring, leaving its own links dangling.
    ///
    /// # Safety
    ///
    /// `node` must be a live (non-sentinel) node of this ring.
    unsafe fn unlink_node(&mut self, node: NonNull<Node<T>>) {
        unsafe {
            let prev = (*node.as_ptr()).prev;
            let next = (*node.as_ptr()).next;
            (*prev.as_ptr()).next = next;
            (*next.as_ptr()).prev = prev;
        }
        self.len -= 1;
    }

    /// Unlinks `node`, moves its value out, and frees it.
    ///
    /// # Safety
    ///
    /// `node` must be a live (non-sentinel) node of this ring.
    unsafe fn remove_node(&mut self, node: NonNull<Node<T>>) -> T {
        unsafe {
            self.unlink_node(node);
            let value = ptr::addr_of!((*node.as_ptr()).value).read().assume_init();
            self.alloc.deallocate(node.cast(), node_layout::<T>());
            value
        }
    }

    /// Allocates a node holding `value`, not yet linked.
    fn allocate_value_node(&self, value: T) -> NonNull<Node<T>> {
        let node = allocate_node::<T, A>(&self.alloc);
        // Safety: freshly allocated; links are written by the caller's
        // insert.
        unsafe {
            ptr::addr_of_mut!((*node.as_ptr()).value).write(MaybeUninit::new(value));
        }
        node
    }

    // ========================================================================
    // Ends
    // ========================================================================

    /// Appends an element. O(1).
    pub fn push_back(&mut self, value: T) {
        let node = self.allocate_value_node(value);
        // Safety: inserting before the sentinel appends; node is fresh.
        unsafe { self.insert_node_before(node, self.sentinel) };
    }

    /// Prepends an element. O(1).
    pub fn push_front(&mut self, value: T) {
        let node = self.allocate_value_node(value);
        // Safety: inserting before the first node prepends; node is fresh.
        unsafe {
            let first = (*self.sentinel.as_ptr()).next;
            self.insert_node_before(node, first);
        }
    }

    /// Removes and returns the first element, or `None` if empty.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        // Safety: non-empty, so sentinel.next is a live node.
        unsafe {
            let first = (*self.sentinel.as_ptr()).next;
            Some(self.remove_node(first))
        }
    }

    /// Removes and returns the last element, or `None` if empty.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        // Safety: non-empty, so sentinel.prev is a live node.
        unsafe {
            let last = (*self.sentinel.as_ptr()).prev;
            Some(self.remove_node(last))
        }
    }

    /// Returns a reference to the first element.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        if self.len == 0 {
            return None;
        }
        // Safety: non-empty, so sentinel.next holds an initialized value.
        unsafe { Some((*(*self.sentinel.as_ptr()).next.as_ptr()).value.assume_init_ref()) }
    }

    /// Returns a mutable reference to the first element.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        if self.len == 0 {
            return None;
        }
        // Safety: as `front`.
        unsafe { Some((*(*self.sentinel.as_ptr()).next.as_ptr()).value.assume_init_mut()) }
    }

    /// Returns a reference to the last element.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        if self.len == 0 {
            return None;
        }
        // Safety: non-empty, so sentinel.prev holds an initialized value.
        unsafe { Some((*(*self.sentinel.as_ptr()).prev.as_ptr()).value.assume_init_ref()) }
    }

    /// Returns a mutable reference to the last element.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        if self.len == 0 {
            return None;
        }
        // Safety: as `back`.
        unsafe { Some((*(*self.sentinel.as_ptr()).prev.as_ptr()).value.assume_init_mut()) }
    }

    // ========================================================================
    // Cursors
    // ========================================================================

    /// Returns a cursor resting on the first element (the end position when
    /// the list is empty).
    #[inline]
    pub fn cursor_front(&mut self) -> CursorMut<'_, T, A> {
        let current = unsafe { (*self.sentinel.as_ptr()).next };
        CursorMut {
            list: self,
            current,
        }
    }

    /// Returns a cursor resting on the last element (the end position when
    /// the list is empty).
    #[inline]
    pub fn cursor_back(&mut self) -> CursorMut<'_, T, A> {
        let current = unsafe { (*self.sentinel.as_ptr()).prev };
        CursorMut {
            list: self,
            current,
        }
    }

    // ========================================================================
    // Whole-list operations
    // ========================================================================

    /// Removes all elements, leaving only the sentinel.
    pub fn clear(&mut self) {
        // Relink the sentinel first: if a value's Drop panics, the rest of
        // the detached ring leaks but the list itself stays valid.
        let mut cur = unsafe { (*self.sentinel.as_ptr()).next };
        unsafe {
            (*self.sentinel.as_ptr()).next = self.sentinel;
            (*self.sentinel.as_ptr()).prev = self.sentinel;
        }
        self.len = 0;

        while cur != self.sentinel {
            // Safety: cur came from ring traversal and is live; next is
            // captured before the node is freed.
            unsafe {
                let next = (*cur.as_ptr()).next;
                ptr::drop_in_place((*cur.as_ptr()).value.as_mut_ptr());
                self.alloc.deallocate(cur.cast(), node_layout::<T>());
                cur = next;
            }
        }
    }

    /// Moves all elements of `other` to the end of this list. O(1).
    ///
    /// `other` is left empty (its sentinel survives). The nodes keep their
    /// addresses; see the module docs for the allocator-identity contract.
    pub fn append(&mut self, other: &mut Self) {
        if other.len == 0 {
            return;
        }
        // Safety: both rings are well formed; other is non-empty.
        unsafe {
            let first = (*other.sentinel.as_ptr()).next;
            let last = (*other.sentinel.as_ptr()).prev;
            let tail = (*self.sentinel.as_ptr()).prev;

            (*tail.as_ptr()).next = first;
            (*first.as_ptr()).prev = tail;
            (*last.as_ptr()).next = self.sentinel;
            (*self.sentinel.as_ptr()).prev = last;

            (*other.sentinel.as_ptr()).next = other.sentinel;
            (*other.sentinel.as_ptr()).prev = other.sentinel;
        }
        self.len += other.len;
        other.len = 0;
    }

    /// Removes every element equal to `value`. Returns the number removed.
    ///
    /// Tolerates consecutive matches and a match on the final element.
    pub fn remove(&mut self, value: &T) -> usize
    where
        T: PartialEq,
    {
        self.remove_if(|v| v == value)
    }

    /// Removes every element satisfying `pred`. Returns the number removed.
    pub fn remove_if<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let mut removed = 0;
        let mut cur = unsafe { (*self.sentinel.as_ptr()).next };
        while cur != self.sentinel {
            // next is captured before cur can be freed.
            // Safety: cur is a live node of this ring.
            unsafe {
                let next = (*cur.as_ptr()).next;
                if pred((*cur.as_ptr()).value.assume_init_ref()) {
                    let _ = self.remove_node(cur);
                    removed += 1;
                }
                cur = next;
            }
        }
        removed
    }

    /// Collapses runs of adjacent equal elements to their first element.
    /// Returns the number removed.
    ///
    /// `{1, 1, 2, 2, 2, 3, 1, 1}` becomes `{1, 2, 3, 1}`. No-op on empty
    /// and single-element lists.
    pub fn unique(&mut self) -> usize
    where
        T: PartialEq,
    {
        self.unique_by(|prev, cur| prev == cur)
    }

    /// Like [`unique`](List::unique) with an explicit equivalence
    /// `same(prev, cur)`.
    pub fn unique_by<F>(&mut self, mut same: F) -> usize
    where
        F: FnMut(&T, &T) -> bool,
    {
        if self.len < 2 {
            return 0;
        }
        let mut removed = 0;
        // Start at the second element; every adjacent pair, the last
        // included, gets checked exactly once.
        let mut cur = unsafe { (*(*self.sentinel.as_ptr()).next.as_ptr()).next };
        while cur != self.sentinel {
            // Safety: cur is live; prev is read before any unlink, next is
            // captured before cur can be freed.
            unsafe {
                let next = (*cur.as_ptr()).next;
                let prev = (*cur.as_ptr()).prev;
                let dup = same(
                    (*prev.as_ptr()).value.assume_init_ref(),
                    (*cur.as_ptr()).value.assume_init_ref(),
                );
                if dup {
                    let _ = self.remove_node(cur);
                    removed += 1;
                }
                cur = next;
            }
        }
        removed
    }

    /// Resizes to `new_len`, filling new tail slots with clones of `value`.
    pub fn resize(&mut self, new_len: usize, value: T)
    where
        T: Clone,
    {
        self.resize_with(new_len, || value.clone());
    }

    /// Resizes to `new_len`, filling new tail slots with values from `fill`.
    pub fn resize_with<F>(&mut self, new_len: usize, mut fill: F)
    where
        F: FnMut() -> T,
    {
        while self.len > new_len {
            self.pop_back();
        }
        while self.len < new_len {
            self.push_back(fill());
        }
    }

    /// Empties the list, returning an iterator over the removed elements.
    ///
    /// Unconsumed elements are removed (and dropped) when the iterator is
    /// dropped.
    #[inline]
    pub fn drain(&mut self) -> Drain<'_, T, A> {
        Drain { list: self }
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    /// Returns an iterator over references, front to back.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        // Safety: the ring is well formed; the bounds are never
        // dereferenced once `remaining` hits zero.
        unsafe {
            Iter {
                front: (*self.sentinel.as_ptr()).next,
                back: (*self.sentinel.as_ptr()).prev,
                remaining: self.len,
                _marker: PhantomData,
            }
        }
    }

    /// Returns an iterator over mutable references, front to back.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        // Safety: as `iter`; the exclusive borrow covers the whole walk.
        unsafe {
            IterMut {
                front: (*self.sentinel.as_ptr()).next,
                back: (*self.sentinel.as_ptr()).prev,
                remaining: self.len,
                _marker: PhantomData,
            }
        }
    }
}

impl<T, A: Allocator> Drop for List<T, A> {
    fn drop(&mut self) {
        self.clear();
        // Safety: the sentinel was allocated in `new_in` and holds no value.
        unsafe {
            self.alloc
                .deallocate(self.sentinel.cast(), node_layout::<T>());
        }
    }
}

impl<T, A: Allocator + Default> Default for List<T, A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T: Clone, A: Allocator + Clone> Clone for List<T, A> {
    /// Deep copy: a fresh ring with every element cloned in order.
    fn clone(&self) -> Self {
        let mut clone = Self::new_in(self.alloc.clone());
        for value in self.iter() {
            clone.push_back(value.clone());
        }
        clone
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for List<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, A: Allocator> PartialEq for List<T, A> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq, A: Allocator> Eq for List<T, A> {}

impl<T> FromIterator<T> for List<T, Global> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        list.extend(iter);
        list
    }
}

impl<T, A: Allocator> Extend<T> for List<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a List<T, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a mut List<T, A> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

impl<T, A: Allocator> IntoIterator for List<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    #[inline]
    fn into_iter(self) -> IntoIter<T, A> {
        IntoIter { list: self }
    }
}

// =============================================================================
// Cursor
// =============================================================================

/// A mutable position in a [`List`].
///
/// The cursor rests either on an element or on the end position (the
/// sentinel, where [`current`](CursorMut::current) is `None`). Walking is
/// circular: moving past the last element reaches the end position, and one
/// more step wraps to the first.
///
/// # Example
///
/// ```
/// use ballast_collections::List;
///
/// let mut list: List<u64> = (1..=5).collect();
///
/// // Erase the even elements in one walk.
/// let mut cursor = list.cursor_front();
/// while let Some(&value) = cursor.current() {
///     if value % 2 == 0 {
///         cursor.remove_current();
///     } else {
///         cursor.move_next();
///     }
/// }
/// let values: Vec<u64> = list.iter().copied().collect();
/// assert_eq!(values, [1, 3, 5]);
/// ```
pub struct CursorMut<'a, T, A: Allocator> {
    list: &'a mut List<T, A>,
    current: NonNull<Node<T>>,
}

impl<'a, T, A: Allocator> CursorMut<'a, T, A> {
    /// Returns `true` if the cursor rests on the end position.
    #[inline]
    pub fn at_end(&self) -> bool {
        self.current == self.list.sentinel
    }

    /// Returns a reference to the current element, or `None` at the end
    /// position.
    #[inline]
    pub fn current(&self) -> Option<&T> {
        if self.at_end() {
            return None;
        }
        // Safety: current is a live node when not the sentinel.
        unsafe { Some((*self.current.as_ptr()).value.assume_init_ref()) }
    }

    /// Returns a mutable reference to the current element, or `None` at the
    /// end position.
    #[inline]
    pub fn current_mut(&mut self) -> Option<&mut T> {
        if self.at_end() {
            return None;
        }
        // Safety: as `current`.
        unsafe { Some((*self.current.as_ptr()).value.assume_init_mut()) }
    }

    /// Moves to the next position (wrapping through the end position).
    #[inline]
    pub fn move_next(&mut self) {
        // Safety: every node of a well-formed ring has a valid next.
        self.current = unsafe { (*self.current.as_ptr()).next };
    }

    /// Moves to the previous position (wrapping through the end position).
    #[inline]
    pub fn move_prev(&mut self) {
        // Safety: every node of a well-formed ring has a valid prev.
        self.current = unsafe { (*self.current.as_ptr()).prev };
    }

    /// Peeks at the element after the current position without moving.
    ///
    /// Returns `None` when the next position is the end.
    #[inline]
    pub fn peek_next(&self) -> Option<&T> {
        // Safety: next is valid; it holds a value unless it is the sentinel.
        unsafe {
            let next = (*self.current.as_ptr()).next;
            if next == self.list.sentinel {
                None
            } else {
                Some((*next.as_ptr()).value.assume_init_ref())
            }
        }
    }

    /// Inserts `value` immediately before the current position.
    ///
    /// At the end position this appends. The cursor does not move.
    pub fn insert_before(&mut self, value: T) {
        let node = self.list.allocate_value_node(value);
        // Safety: current is a node of this ring; node is fresh.
        unsafe { self.list.insert_node_before(node, self.current) };
    }

    /// Inserts `value` immediately after the current position.
    ///
    /// At the end position this prepends (the ring wraps). The cursor does
    /// not move.
    pub fn insert_after(&mut self, value: T) {
        let node = self.list.allocate_value_node(value);
        // Safety: current.next is a node of this ring; node is fresh.
        unsafe {
            let next = (*self.current.as_ptr()).next;
            self.list.insert_node_before(node, next);
        }
    }

    /// Removes and returns the current element, advancing to the position
    /// that followed it.
    ///
    /// Returns `None` at the end position.
    pub fn remove_current(&mut self) -> Option<T> {
        if self.at_end() {
            return None;
        }
        // Safety: current is live; next is captured before the node is
        // freed.
        unsafe {
            let node = self.current;
            self.current = (*node.as_ptr()).next;
            Some(self.list.remove_node(node))
        }
    }

    /// Removes up to `count` elements starting at the current position,
    /// advancing past them. Returns the number removed (stops early at the
    /// end position).
    pub fn remove_n(&mut self, count: usize) -> usize {
        let mut removed = 0;
        while removed < count {
            if self.remove_current().is_none() {
                break;
            }
            removed += 1;
        }
        removed
    }

    /// Moves the donor cursor's current element into this list, immediately
    /// before this cursor's position. The donor cursor advances to the
    /// position that followed.
    ///
    /// No allocation and no move of the element itself: the node is
    /// relinked, identity intact. Returns `false` if the donor was at its
    /// end position.
    ///
    /// Both lists must use interchangeable allocators; see the module docs.
    pub fn splice_from(&mut self, donor: &mut CursorMut<'_, T, A>) -> bool {
        if donor.at_end() {
            return false;
        }
        // Safety: the node is live in the donor ring; it is unlinked there
        // before being linked here, so it is owned by exactly one ring at
        // every step.
        unsafe {
            let node = donor.current;
            donor.current = (*node.as_ptr()).next;
            donor.list.unlink_node(node);
            self.list.insert_node_before(node, self.current);
        }
        true
    }

    /// Moves every element of `donor` into this list, immediately before
    /// this cursor's position, preserving their order.
    ///
    /// Equivalent to repeating the single-node splice; each step adjusts
    /// both lengths before the next.
    pub fn splice_before(&mut self, donor: &mut List<T, A>) {
        while donor.len > 0 {
            // Safety: donor is non-empty, so its first node is live; same
            // single-owner argument as `splice_from`.
            unsafe {
                let node = (*donor.sentinel.as_ptr()).next;
                donor.unlink_node(node);
                self.list.insert_node_before(node, self.current);
            }
        }
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Iterator over list references, front to back.
pub struct Iter<'a, T> {
    front: NonNull<Node<T>>,
    back: NonNull<Node<T>>,
    remaining: usize,
    _marker: PhantomData<&'a T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        // Safety: remaining > 0 guaranteed front was a live node.
        unsafe {
            let node = self.front;
            self.front = (*node.as_ptr()).next;
            Some((*node.as_ptr()).value.assume_init_ref())
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        // Safety: remaining > 0 guaranteed back was a live node.
        unsafe {
            let node = self.back;
            self.back = (*node.as_ptr()).prev;
            Some((*node.as_ptr()).value.assume_init_ref())
        }
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            front: self.front,
            back: self.back,
            remaining: self.remaining,
            _marker: PhantomData,
        }
    }
}

/// Iterator over mutable list references, front to back.
pub struct IterMut<'a, T> {
    front: NonNull<Node<T>>,
    back: NonNull<Node<T>>,
    remaining: usize,
    _marker: PhantomData<&'a mut T>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        // Safety: each node is visited exactly once, so handing out a
        // reference with the iterator's lifetime cannot alias.
        unsafe {
            let node = self.front;
            self.front = (*node.as_ptr()).next;
            Some((*node.as_ptr()).value.assume_init_mut())
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        // Safety: as `next`.
        unsafe {
            let node = self.back;
            self.back = (*node.as_ptr()).prev;
            Some((*node.as_ptr()).value.assume_init_mut())
        }
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

/// Owned iterator over a list's elements.
pub struct IntoIter<T, A: Allocator> {
    list: List<T, A>,
}

impl<T, A: Allocator> Iterator for IntoIter<T, A> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl<T, A: Allocator> DoubleEndedIterator for IntoIter<T, A> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T, A: Allocator> ExactSizeIterator for IntoIter<T, A> {}
impl<T, A: Allocator> FusedIterator for IntoIter<T, A> {}

/// Iterator that removes and returns elements from a list.
pub struct Drain<'a, T, A: Allocator> {
    list: &'a mut List<T, A>,
}

impl<T, A: Allocator> Iterator for Drain<'_, T, A> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl<T, A: Allocator> ExactSizeIterator for Drain<'_, T, A> {}
impl<T, A: Allocator> FusedIterator for Drain<'_, T, A> {}

impl<T, A: Allocator> Drop for Drain<'_, T, A> {
    fn drop(&mut self) {
        // Exhaust remaining elements to ensure cleanup.
        for _ in self.by_ref() {}
    }
}
