//! Fibonacci heap implementation
//!
//! A Fibonacci heap is a mergeable priority queue with:
//! - O(1) amortized insert, decrease_key, and merge
//! - O(log n) amortized pop and delete
//!
//! The structure is a forest of heap-ordered trees. Roots are linked in a
//! circular doubly linked list, as are the children of every node, and the
//! heap keeps a pointer to the minimum root. Insert and merge only splice
//! rings, which is what makes them O(1); the real work is deferred to the
//! consolidation pass that runs after a minimum extraction and merges root
//! trees of equal degree until at most one tree of each degree remains.
//!
//! # Marking and cascading cuts
//!
//! `decrease_key` may violate heap order, in which case the node is cut from
//! its parent and becomes a root. The `marked` flag records that a node has
//! already lost a child since it last became a child; cutting a child of a
//! marked node cuts the marked node too, cascading upward. This discipline
//! keeps every subtree of a degree-`d` node at least F(d+2) nodes large,
//! which bounds the maximum degree by log_phi(n) and pays for consolidation.
//!
//! A node that becomes a root is always unmarked, including the children of
//! an extracted minimum when they are promoted to the root list. Roots are
//! never marked.

use std::cell::RefCell;
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;
use std::rc::Rc;

use compare::{natural, Compare, Natural};

use crate::traits::{Handle, Heap, HeapError};

/// Heap identity used to validate handles, as a union-find node.
///
/// Every node keeps an `Rc` to the identity of the heap that created it.
/// Merging points the donor's identity at the receiver's, one pointer write
/// regardless of how many heaps were absorbed before, so a node belongs to
/// whichever heap its identity chain currently roots at.
struct OwnerCell {
    parent: RefCell<Option<Rc<OwnerCell>>>,
}

impl OwnerCell {
    fn root() -> Rc<OwnerCell> {
        Rc::new(OwnerCell {
            parent: RefCell::new(None),
        })
    }
}

/// Resolves the representative identity, compressing the chain so repeated
/// lookups stay near constant time.
fn find_root(cell: &Rc<OwnerCell>) -> Rc<OwnerCell> {
    let mut root = Rc::clone(cell);
    loop {
        let parent = root.parent.borrow().clone();
        match parent {
            None => break,
            Some(parent) => root = parent,
        }
    }

    let mut current = Rc::clone(cell);
    while !Rc::ptr_eq(&current, &root) {
        let parent = current
            .parent
            .replace(Some(Rc::clone(&root)))
            .expect("non-root identity has a parent");
        current = parent;
    }

    root
}

/// Handle to an element in a Fibonacci heap
///
/// Handles have pointer identity: two handles compare equal when they name
/// the same node. A handle stays valid until its node is removed by
/// [`pop`](Heap::pop) or [`delete`](Heap::delete), or the owning heap is
/// cleared or dropped; using it past that point is undefined behavior.
/// Passing a live handle to the wrong heap is detected and rejected.
pub struct NodeHandle<E> {
    node: NonNull<Node<E>>,
}

impl<E> Clone for NodeHandle<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for NodeHandle<E> {}

impl<E> PartialEq for NodeHandle<E> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl<E> Eq for NodeHandle<E> {}

impl<E> fmt::Debug for NodeHandle<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NodeHandle").field(&self.node.as_ptr()).finish()
    }
}

impl<E> Handle for NodeHandle<E> {}

/// Internal node record
///
/// `left` and `right` are the circular sibling ring; a solitary node loops
/// to itself. `child` points at one arbitrary member of the child ring.
/// `degree` counts direct children. `owner` is the identity of the heap the
/// node currently answers to, used to reject foreign handles.
struct Node<E> {
    element: E,
    parent: Option<NonNull<Node<E>>>,
    child: Option<NonNull<Node<E>>>,
    left: NonNull<Node<E>>,
    right: NonNull<Node<E>>,
    degree: usize,
    marked: bool,
    owner: Rc<OwnerCell>,
}

/// Fibonacci heap ordered by a pluggable comparator
///
/// The default comparator is the natural order of `E`. Heaps that may be
/// merged must use the same comparator type; the order must be total and
/// must not change while elements are in a heap.
///
/// # Example
///
/// ```rust
/// use fibonacci_heap::{FibonacciHeap, Heap};
///
/// let mut heap = FibonacciHeap::new();
/// let handle = heap.push(31);
/// heap.push(17);
/// assert_eq!(heap.peek(), Some(&17));
/// heap.decrease_key(&handle, 5).unwrap();
/// assert_eq!(heap.pop(), Some(5));
/// ```
pub struct FibonacciHeap<E, C: Compare<E> = Natural<E>> {
    min: Option<NonNull<Node<E>>>,
    size: usize,
    roots: usize,
    cmp: C,
    identity: Rc<OwnerCell>,
    _owns: PhantomData<Box<Node<E>>>,
}

impl<E: Ord> FibonacciHeap<E> {
    /// Creates an empty heap ordered by the natural order of `E`
    pub fn new() -> FibonacciHeap<E> {
        Self::with_comparator(natural())
    }
}

impl<E, C: Compare<E> + Default> Default for FibonacciHeap<E, C> {
    fn default() -> FibonacciHeap<E, C> {
        Self::with_comparator(C::default())
    }
}

impl<E, C: Compare<E>> FibonacciHeap<E, C> {
    /// Creates an empty heap ordered by the given comparator
    pub fn with_comparator(cmp: C) -> FibonacciHeap<E, C> {
        FibonacciHeap {
            min: None,
            size: 0,
            roots: 0,
            cmp,
            identity: OwnerCell::root(),
            _owns: PhantomData,
        }
    }

    /// Returns the number of trees in the root list
    pub fn root_count(&self) -> usize {
        self.roots
    }

    /// Returns a handle to the minimum element, or `None` if empty
    pub fn minimum(&self) -> Option<NodeHandle<E>> {
        self.min.map(|node| NodeHandle { node })
    }

    /// Reads the element behind a handle
    ///
    /// # Errors
    ///
    /// Returns [`HeapError::ForeignHandle`] if the handle was produced by a
    /// different heap.
    pub fn element(&self, handle: &NodeHandle<E>) -> Result<&E, HeapError> {
        unsafe {
            if !self.owns(handle.node) {
                return Err(HeapError::ForeignHandle);
            }
            Ok(&(*handle.node.as_ptr()).element)
        }
    }

    /// A node answers to the heap that created it or to any heap that has
    /// since absorbed that heap through a merge.
    unsafe fn owns(&self, node: NonNull<Node<E>>) -> bool {
        Rc::ptr_eq(&find_root(&(*node.as_ptr()).owner), &self.identity)
    }

    /// Moves a node that violates heap order (or is about to be deleted)
    /// into the root list and repairs the minimum pointer.
    ///
    /// With `force` the comparator is bypassed entirely: the node is treated
    /// as smaller than everything, so the following `pop` removes it.
    unsafe fn rearrange(&mut self, node: NonNull<Node<E>>, force: bool) {
        if let Some(parent) = (*node.as_ptr()).parent {
            if force
                || self
                    .cmp
                    .compares_lt(&(*node.as_ptr()).element, &(*parent.as_ptr()).element)
            {
                self.cut(node, parent);
                self.cascading_cut(parent);
            }
        }

        if force {
            self.min = Some(node);
        } else if let Some(min) = self.min {
            if self
                .cmp
                .compares_lt(&(*node.as_ptr()).element, &(*min.as_ptr()).element)
            {
                self.min = Some(node);
            }
        }
    }

    /// Detaches `node` from `parent`'s child ring and splices it into the
    /// root list, unmarked. Inverse of `link`.
    unsafe fn cut(&mut self, node: NonNull<Node<E>>, parent: NonNull<Node<E>>) {
        unlink_siblings(node);

        (*parent.as_ptr()).degree -= 1;
        if (*parent.as_ptr()).child == Some(node) {
            let right = (*node.as_ptr()).right;
            (*parent.as_ptr()).child = if right != node { Some(right) } else { None };
        }

        let min = self.min.expect("cut targets a member of a non-empty heap");
        splice_after(min, node);

        (*node.as_ptr()).parent = None;
        (*node.as_ptr()).marked = false;
        self.roots += 1;
    }

    /// Walks up from a node that just lost a child: an unmarked node is
    /// marked and the walk stops, a marked node is cut and the walk
    /// continues at its parent. Roots stop the walk and are never marked.
    unsafe fn cascading_cut(&mut self, mut node: NonNull<Node<E>>) {
        while let Some(parent) = (*node.as_ptr()).parent {
            if !(*node.as_ptr()).marked {
                (*node.as_ptr()).marked = true;
                return;
            }
            self.cut(node, parent);
            node = parent;
        }
    }

    /// Makes `child` a child of `parent` during consolidation. Inverse of
    /// `cut`. The child ends up unmarked.
    unsafe fn link(&mut self, child: NonNull<Node<E>>, parent: NonNull<Node<E>>) {
        unlink_siblings(child);

        (*child.as_ptr()).parent = Some(parent);
        match (*parent.as_ptr()).child {
            None => {
                (*parent.as_ptr()).child = Some(child);
                (*child.as_ptr()).left = child;
                (*child.as_ptr()).right = child;
            }
            Some(first) => splice_after(first, child),
        }

        (*parent.as_ptr()).degree += 1;
        (*child.as_ptr()).marked = false;
    }

    /// Merges root trees of equal degree until at most one tree of each
    /// degree remains, then rebuilds the root list and the minimum pointer.
    ///
    /// Runs once per `pop`, starting from the root that followed the
    /// extracted minimum. Every root is visited exactly once: `next` is
    /// captured before any linking disturbs the ring, and only
    /// already-visited roots can be linked away under a tree, so the walk
    /// never revisits or skips a live root.
    unsafe fn consolidate(&mut self, start: NonNull<Node<E>>) {
        let mut table: Vec<Option<NonNull<Node<E>>>> = vec![None; degree_slots(self.size)];

        let mut current = start;
        let mut remaining = self.roots;
        while remaining > 0 {
            let next = (*current.as_ptr()).right;
            let mut root = current;
            let mut degree = (*root.as_ptr()).degree;

            while let Some(mut other) = table[degree] {
                if self
                    .cmp
                    .compares_lt(&(*other.as_ptr()).element, &(*root.as_ptr()).element)
                {
                    mem::swap(&mut root, &mut other);
                }
                self.link(other, root);
                table[degree] = None;
                degree += 1;
            }

            table[degree] = Some(root);
            current = next;
            remaining -= 1;
        }

        self.min = None;
        self.roots = 0;
        for root in table.into_iter().flatten() {
            (*root.as_ptr()).left = root;
            (*root.as_ptr()).right = root;
            match self.min {
                None => self.min = Some(root),
                Some(min) => {
                    splice_after(min, root);
                    if self
                        .cmp
                        .compares_lt(&(*root.as_ptr()).element, &(*min.as_ptr()).element)
                    {
                        self.min = Some(root);
                    }
                }
            }
            self.roots += 1;
        }
    }
}

impl<E, C: Compare<E>> Heap<E> for FibonacciHeap<E, C> {
    type Handle = NodeHandle<E>;

    fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    fn len(&self) -> usize {
        self.size
    }

    fn push(&mut self, element: E) -> NodeHandle<E> {
        let node = Box::into_raw(Box::new(Node {
            element,
            parent: None,
            child: None,
            left: NonNull::dangling(),
            right: NonNull::dangling(),
            degree: 0,
            marked: false,
            owner: Rc::clone(&self.identity),
        }));
        let node = unsafe { NonNull::new_unchecked(node) };

        unsafe {
            (*node.as_ptr()).left = node;
            (*node.as_ptr()).right = node;

            match self.min {
                None => self.min = Some(node),
                Some(min) => {
                    splice_after(min, node);
                    if self
                        .cmp
                        .compares_lt(&(*node.as_ptr()).element, &(*min.as_ptr()).element)
                    {
                        self.min = Some(node);
                    }
                }
            }
        }

        self.size += 1;
        self.roots += 1;
        NodeHandle { node }
    }

    fn peek(&self) -> Option<&E> {
        self.min
            .map(|min| unsafe { &(*min.as_ptr()).element })
    }

    fn pop(&mut self) -> Option<E> {
        let z = self.min?;

        unsafe {
            // Promote every child of the minimum to the root list. The cut
            // unmarks each one as it becomes a root.
            while let Some(child) = (*z.as_ptr()).child {
                self.cut(child, z);
            }

            unlink_siblings(z);

            if (*z.as_ptr()).right == z {
                self.min = None;
                self.size = 0;
                self.roots = 0;
            } else {
                let start = (*z.as_ptr()).right;
                self.min = Some(start);
                self.size -= 1;
                self.roots -= 1;
                self.consolidate(start);
            }

            let node = Box::from_raw(z.as_ptr());
            Some(node.element)
        }
    }

    fn decrease_key(&mut self, handle: &NodeHandle<E>, element: E) -> Result<(), HeapError> {
        let node = handle.node;
        unsafe {
            if !self.owns(node) {
                return Err(HeapError::ForeignHandle);
            }
            if self.cmp.compares_lt(&(*node.as_ptr()).element, &element) {
                return Err(HeapError::KeyNotDecreased);
            }
            (*node.as_ptr()).element = element;
            self.rearrange(node, false);
        }
        Ok(())
    }

    fn delete(&mut self, handle: &NodeHandle<E>) -> Result<E, HeapError> {
        unsafe {
            if !self.owns(handle.node) {
                return Err(HeapError::ForeignHandle);
            }
            self.rearrange(handle.node, true);
        }
        debug_assert_eq!(self.min, Some(handle.node));
        let element = self.pop().expect("deleted node was rearranged to the minimum");
        Ok(element)
    }

    fn merge(&mut self, other: &mut Self) {
        if other.is_empty() {
            return;
        }

        // The moved nodes keep pointing at the donor's identity, so that
        // identity is rooted under the receiver's and the donor starts over
        // with a fresh one.
        *other.identity.parent.borrow_mut() = Some(Rc::clone(&self.identity));
        other.identity = OwnerCell::root();

        let other_min = other.min.take().expect("non-empty donor has a minimum");
        match self.min {
            None => self.min = Some(other_min),
            Some(min) => unsafe {
                let right = (*min.as_ptr()).right;
                let other_right = (*other_min.as_ptr()).right;

                (*min.as_ptr()).right = other_right;
                (*other_right.as_ptr()).left = min;
                (*right.as_ptr()).left = other_min;
                (*other_min.as_ptr()).right = right;

                if self
                    .cmp
                    .compares_lt(&(*other_min.as_ptr()).element, &(*min.as_ptr()).element)
                {
                    self.min = Some(other_min);
                }
            },
        }

        self.size += other.size;
        self.roots += other.roots;
        other.size = 0;
        other.roots = 0;
    }

    fn clear(&mut self) {
        let Some(min) = self.min.take() else {
            self.size = 0;
            self.roots = 0;
            return;
        };

        // Free every node with an explicit stack; trees may be arbitrarily
        // deep after long runs of cascading cuts.
        let mut stack: Vec<NonNull<Node<E>>> = Vec::new();
        unsafe {
            let mut current = min;
            loop {
                let next = (*current.as_ptr()).right;
                stack.push(current);
                if next == min {
                    break;
                }
                current = next;
            }

            while let Some(node) = stack.pop() {
                if let Some(first) = (*node.as_ptr()).child {
                    let mut child = first;
                    loop {
                        let next = (*child.as_ptr()).right;
                        stack.push(child);
                        if next == first {
                            break;
                        }
                        child = next;
                    }
                }
                drop(Box::from_raw(node.as_ptr()));
            }
        }

        self.size = 0;
        self.roots = 0;
    }
}

impl<E, C: Compare<E>> Drop for FibonacciHeap<E, C> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<E: fmt::Display, C: Compare<E>> FibonacciHeap<E, C> {
    /// Renders the advisory one-line representation of a node,
    /// `<element> | ↓<degree>` with a `*` inserted when marked
    ///
    /// # Errors
    ///
    /// Returns [`HeapError::ForeignHandle`] if the handle was produced by a
    /// different heap.
    pub fn describe(&self, handle: &NodeHandle<E>) -> Result<String, HeapError> {
        unsafe {
            if !self.owns(handle.node) {
                return Err(HeapError::ForeignHandle);
            }
            Ok(Label(&*handle.node.as_ptr()).to_string())
        }
    }
}

struct Label<'a, E>(&'a Node<E>);

impl<E: fmt::Display> fmt::Display for Label<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.marked {
            write!(f, "{} | * ↓{}", self.0.element, self.0.degree)
        } else {
            write!(f, "{} | ↓{}", self.0.element, self.0.degree)
        }
    }
}

/// Renders the whole forest, one node per line, indented by tree depth.
/// Reading the structure never mutates it.
impl<E: fmt::Display, C: Compare<E>> fmt::Display for FibonacciHeap<E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "heap: {} entries, {} roots", self.size, self.roots)?;
        match self.min {
            None => writeln!(f, " (empty)"),
            Some(min) => unsafe {
                writeln!(f, ", min {}", (*min.as_ptr()).element)?;
                fmt_ring(f, min, 1)
            },
        }
    }
}

unsafe fn fmt_ring<E: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    start: NonNull<Node<E>>,
    depth: usize,
) -> fmt::Result {
    let mut current = start;
    loop {
        let node = &*current.as_ptr();
        writeln!(f, "{:width$}-> {}", "", Label(node), width = depth * 2)?;
        if let Some(child) = node.child {
            fmt_ring(f, child, depth + 1)?;
        }
        current = node.right;
        if current == start {
            break;
        }
    }
    Ok(())
}

/// Splices `node` into the ring immediately to the right of `at`.
unsafe fn splice_after<E>(at: NonNull<Node<E>>, node: NonNull<Node<E>>) {
    let right = (*at.as_ptr()).right;
    (*node.as_ptr()).left = at;
    (*node.as_ptr()).right = right;
    (*at.as_ptr()).right = node;
    (*right.as_ptr()).left = node;
}

/// Removes `node` from its ring. The node's own pointers are left stale
/// until it is respliced or isolated.
unsafe fn unlink_siblings<E>(node: NonNull<Node<E>>) {
    let left = (*node.as_ptr()).left;
    let right = (*node.as_ptr()).right;
    (*left.as_ptr()).right = right;
    (*right.as_ptr()).left = left;
}

/// Degree-table size for consolidation: ceil(log_phi(size)) + 1 slots,
/// enough for every degree the Fibonacci bound allows. Callers guarantee
/// `size >= 1`.
fn degree_slots(size: usize) -> usize {
    let phi = (1.0 + 5.0_f64.sqrt()) / 2.0;
    let slots = ((size as f64).ln() / phi.ln()).ceil() as usize + 1;
    slots.max(1)
}
