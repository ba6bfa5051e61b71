//! K-ary heap index
//!
//! The ordering half of [`KaryPriorityQueue`](crate::KaryPriorityQueue): a flat
//! array of `(priority, handle)` slots kept in k-ary min-heap order. Payloads
//! live in the element store (`storage` module); each slot
//! only carries the handle of the element it stands for, so sifting moves two
//! machine words per swap no matter how large the elements are.
//!
//! # Layout
//!
//! With branching factor `k`, the children of position `i` sit at
//! `k*i + 1 ..= k*i + k` and the parent of `i` is `(i - 1) / k`.
//!
//! # Time Complexity
//!
//! | Operation      | Complexity       |
//! |----------------|------------------|
//! | `push`         | O(log_k n)       |
//! | `pop_root`     | O(k log_k n)     |
//! | `replace_root` | O(k log_k n)     |
//! | `heapify`      | O(n)             |
//!
//! Larger `k` makes the heap shallower (cheaper sift-up, so better for
//! enqueue-heavy loads) at the price of `k` comparisons per level on the way
//! down.

/// Default branching factor
pub const DEFAULT_ARITY: usize = 4;

/// One entry of the heap index
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct HeapSlot<P> {
    pub(crate) priority: P,
    pub(crate) handle: usize,
}

/// Array-backed k-ary min-heap over [`HeapSlot`]s
#[derive(Debug, Clone)]
pub(crate) struct HeapIndex<P> {
    slots: Vec<HeapSlot<P>>,
    arity: usize,
}

impl<P> HeapIndex<P> {
    /// Callers guarantee `arity >= 1`.
    pub(crate) fn new(arity: usize) -> Self {
        debug_assert!(arity >= 1);
        Self {
            slots: Vec::new(),
            arity,
        }
    }

    pub(crate) fn with_capacity(arity: usize, capacity: usize) -> Self {
        debug_assert!(arity >= 1);
        Self {
            slots: Vec::with_capacity(capacity),
            arity,
        }
    }

    #[inline]
    pub(crate) fn arity(&self) -> usize {
        self.arity
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub(crate) fn root(&self) -> Option<&HeapSlot<P>> {
        self.slots.first()
    }

    #[inline]
    pub(crate) fn slots(&self) -> &[HeapSlot<P>] {
        &self.slots
    }

    /// Mutable access to every slot's handle, in heap order
    pub(crate) fn handles_mut(&mut self) -> impl Iterator<Item = &mut usize> {
        self.slots.iter_mut().map(|slot| &mut slot.handle)
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.slots.reserve(additional);
    }

    pub(crate) fn shrink_to_fit(&mut self) {
        self.slots.shrink_to_fit();
    }

    /// Drops every slot and releases the backing allocation
    pub(crate) fn clear(&mut self) {
        self.slots = Vec::new();
    }

    #[inline(always)]
    fn parent(&self, index: usize) -> usize {
        (index - 1) / self.arity
    }

    /// `None` when the position is past any index a `Vec` can hold
    #[inline(always)]
    fn first_child(&self, index: usize) -> Option<usize> {
        index.checked_mul(self.arity)?.checked_add(1)
    }
}

impl<P: PartialOrd + Copy> HeapIndex<P> {
    /// Appends a slot and sifts it up
    pub(crate) fn push(&mut self, slot: HeapSlot<P>) {
        self.slots.push(slot);
        self.restore_up(self.slots.len() - 1);
    }

    /// Appends a slot without restoring order; follow with [`heapify`](Self::heapify)
    pub(crate) fn push_unordered(&mut self, slot: HeapSlot<P>) {
        self.slots.push(slot);
    }

    /// Removes the root, moves the last slot into its place and sifts it down
    pub(crate) fn pop_root(&mut self) -> Option<HeapSlot<P>> {
        let last = self.slots.pop()?;
        if self.slots.is_empty() {
            return Some(last);
        }
        let root = std::mem::replace(&mut self.slots[0], last);
        self.restore_down(0);
        Some(root)
    }

    /// Overwrites the root's priority and sifts it down
    ///
    /// The handle stays put: the caller swaps the payload behind it.
    pub(crate) fn replace_root_priority(&mut self, priority: P) {
        debug_assert!(!self.slots.is_empty());
        self.slots[0].priority = priority;
        self.restore_down(0);
    }

    /// Moves the slot at `index` towards the root while it is strictly
    /// smaller than its parent
    fn restore_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = self.parent(index);
            if self.slots[index].priority < self.slots[parent].priority {
                self.slots.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    /// Moves the slot at `index` towards the leaves while some child is
    /// strictly smaller
    ///
    /// Among the children, the leftmost one holding the minimum wins.
    fn restore_down(&mut self, mut index: usize) {
        let len = self.slots.len();
        loop {
            let first = match self.first_child(index) {
                Some(first) if first < len => first,
                _ => break,
            };
            let end = first.saturating_add(self.arity).min(len);

            let mut smallest = first;
            for child in first + 1..end {
                if self.slots[child].priority < self.slots[smallest].priority {
                    smallest = child;
                }
            }

            if self.slots[smallest].priority < self.slots[index].priority {
                self.slots.swap(index, smallest);
                index = smallest;
            } else {
                break;
            }
        }
    }

    /// Restores heap order over the whole array in O(n)
    ///
    /// Sifts down every internal node, from the last one back to the root.
    pub(crate) fn heapify(&mut self) {
        let len = self.slots.len();
        if len < 2 {
            return;
        }
        let last_internal = (len - 2) / self.arity;
        for index in (0..=last_internal).rev() {
            self.restore_down(index);
        }
    }

    /// Checks the min-heap property over every parent/child pair
    pub(crate) fn is_heap_ordered(&self) -> bool {
        (1..self.slots.len())
            .all(|index| !(self.slots[index].priority < self.slots[self.parent(index)].priority))
    }
}
