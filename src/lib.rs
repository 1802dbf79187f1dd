//! Mergeable priority queue backed by a Fibonacci heap
//!
//! This crate provides a min-heap with the operation set that makes
//! Fibonacci heaps worth their bookkeeping:
//!
//! - **Insert**: O(1) amortized - add a single-node tree to the root list
//! - **Pop / delete**: O(log n) amortized - consolidate trees by degree
//! - **Decrease-key**: O(1) amortized - cascading cuts keep trees bushy
//! - **Merge**: O(1) - concatenate two root lists
//!
//! Elements carry their own priority and are ordered by a comparator fixed
//! at construction time (the natural order by default, any
//! [`compare::Compare`] otherwise). Insertion returns an opaque handle that
//! later names the element for `decrease_key` and `delete`.
//!
//! # Example
//!
//! ```rust
//! use fibonacci_heap::{FibonacciHeap, Heap};
//!
//! let mut heap = FibonacciHeap::new();
//! let handle = heap.push(42);
//! heap.push(7);
//!
//! heap.decrease_key(&handle, 3).unwrap();
//! assert_eq!(heap.pop(), Some(3));
//! assert_eq!(heap.pop(), Some(7));
//! assert!(heap.is_empty());
//! ```

pub mod fibonacci;
pub mod traits;

pub use fibonacci::{FibonacciHeap, NodeHandle};
pub use traits::{Handle, Heap, HeapError};
