//! Common trait for mergeable heaps with decrease-key support
//!
//! This module provides a trait compatible with Rust's standard heap API
//! (`push` / `peek` / `pop`) while adding the operations that make advanced
//! heaps worth using: `decrease_key`, arbitrary-node `delete`, and O(1)
//! `merge`.

use std::fmt;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// The replacement element compares strictly greater than the current one
    KeyNotDecreased,
    /// The handle names a node owned by a different heap
    ForeignHandle,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::KeyNotDecreased => {
                write!(f, "replacement element is greater than the current element")
            }
            HeapError::ForeignHandle => {
                write!(f, "handle does not belong to this heap")
            }
        }
    }
}

impl std::error::Error for HeapError {}

/// A handle to an element in the heap, used for `decrease_key` and `delete`
///
/// This is an opaque type that identifies a specific element in the heap.
/// The exact implementation varies by heap type.
pub trait Handle: Clone + PartialEq + Eq {}

/// Common operations for mergeable heap/priority queue data structures
///
/// Elements carry their own priority: the heap orders whole elements under
/// a total order fixed at construction time. All methods follow standard
/// Rust naming conventions (`push`, `pop`, `peek`), with `insert`,
/// `find_min`, and `delete_min` provided as aliases.
pub trait Heap<E> {
    /// The handle type for this heap, used to reference elements for
    /// `decrease_key` and `delete`
    type Handle: Handle;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts an element, returning a handle
    ///
    /// The handle stays valid until the node is removed by `pop` or
    /// `delete`, or the heap is cleared or dropped.
    fn push(&mut self, element: E) -> Self::Handle;

    /// Inserts an element, returning a handle
    ///
    /// Alias for `push`.
    #[inline]
    fn insert(&mut self, element: E) -> Self::Handle {
        self.push(element)
    }

    /// Returns the minimum element without removing it
    fn peek(&self) -> Option<&E>;

    /// Returns the minimum element without removing it
    ///
    /// Alias for `peek`.
    #[inline]
    fn find_min(&self) -> Option<&E> {
        self.peek()
    }

    /// Removes and returns the minimum element
    fn pop(&mut self) -> Option<E>;

    /// Removes and returns the minimum element
    ///
    /// Alias for `pop`.
    #[inline]
    fn delete_min(&mut self) -> Option<E> {
        self.pop()
    }

    /// Replaces the element identified by the handle with one that compares
    /// less than or equal to it
    ///
    /// # Errors
    ///
    /// Returns [`HeapError::KeyNotDecreased`] if the replacement compares
    /// strictly greater than the current element, and
    /// [`HeapError::ForeignHandle`] if the handle was produced by a
    /// different heap.
    fn decrease_key(&mut self, handle: &Self::Handle, element: E) -> Result<(), HeapError>;

    /// Removes the element identified by the handle, returning it
    ///
    /// # Errors
    ///
    /// Returns [`HeapError::ForeignHandle`] if the handle was produced by a
    /// different heap.
    fn delete(&mut self, handle: &Self::Handle) -> Result<E, HeapError>;

    /// Merges another heap into this one in O(1), leaving it empty
    ///
    /// The donor stays usable afterwards; handles into the moved nodes keep
    /// working against the receiver.
    fn merge(&mut self, other: &mut Self);

    /// Drops every element, leaving the heap empty
    fn clear(&mut self);
}
