//! K-ary min-priority queue
//!
//! [`KaryPriorityQueue`] pairs a heap index (ordering) with an element
//! store (payloads). Heap slots carry `(priority, handle)` and
//! the handle locates the element, so sifting never moves the elements
//! themselves.
//!
//! # Time Complexity
//!
//! | Operation          | Complexity                           |
//! |--------------------|--------------------------------------|
//! | `enqueue`          | O(log_k n)                           |
//! | `dequeue`          | O(k log_k n)                         |
//! | `peek`             | O(1)                                 |
//! | `enqueue_dequeue`  | O(k log_k n)                         |
//! | `dequeue_enqueue`  | O(k log_k n)                         |
//! | `enqueue_range`    | O(min(m log_k n, n + m)) for m items |
//! | `from_pairs`       | O(n)                                 |
//! | `shrink`           | O(n)                                 |
//!
//! # Memory
//!
//! Dequeuing does not shrink the element store: the vacated handle is
//! recycled by the next insertion instead. After a phase of many more
//! removals than insertions, call [`shrink`](KaryPriorityQueue::shrink) to
//! give the slack back.
//!
//! # Example
//!
//! ```rust
//! use kary_priority_queue::KaryPriorityQueue;
//!
//! let mut queue = KaryPriorityQueue::new();
//! queue.enqueue("a", 3.0);
//! queue.enqueue("b", -1.0);
//! queue.enqueue("c", 7.0);
//!
//! assert_eq!(queue.peek(), Ok(&"b"));
//! assert_eq!(queue.dequeue(), Ok("b"));
//!
//! // "d" at 5.0 ranks behind the minimum "a" at 3.0, so "a" comes
//! // out and "d" goes in
//! assert_eq!(queue.enqueue_dequeue("d", 5.0), "a");
//! assert_eq!(queue.len(), 2);
//! ```

use std::fmt;
use std::iter::FusedIterator;
use std::slice;

use crate::kary::{HeapIndex, HeapSlot, DEFAULT_ARITY};
use crate::storage::ElementStore;
use crate::traits::{PriorityQueue, QueueError};

/// A min-priority queue backed by an array-based k-ary heap
///
/// Items come out in ascending priority order. Equal priorities come out in
/// an unspecified order. For max-queue behavior, negate the priorities.
///
/// `P` only needs `PartialOrd`; the default is `f64`. Priorities that do not
/// compare (such as NaN) are accepted but leave their position in the order
/// unspecified.
#[derive(Clone)]
pub struct KaryPriorityQueue<T, P = f64> {
    heap: HeapIndex<P>,
    store: ElementStore<T>,
}

impl<T, P: PartialOrd + Copy> KaryPriorityQueue<T, P> {
    /// Creates an empty queue with the default branching factor of 4
    pub fn new() -> Self {
        Self {
            heap: HeapIndex::new(DEFAULT_ARITY),
            store: ElementStore::new(),
        }
    }

    /// Creates an empty queue where every node has up to `arity` children
    ///
    /// # Errors
    /// Returns [`QueueError::InvalidArity`] if `arity` is zero.
    ///
    /// # Example
    ///
    /// ```rust
    /// use kary_priority_queue::{KaryPriorityQueue, QueueError};
    ///
    /// let queue = KaryPriorityQueue::<u32, f64>::with_arity(8).unwrap();
    /// assert_eq!(queue.arity(), 8);
    ///
    /// let err = KaryPriorityQueue::<u32, f64>::with_arity(0).unwrap_err();
    /// assert_eq!(err, QueueError::InvalidArity(0));
    /// ```
    pub fn with_arity(arity: usize) -> Result<Self, QueueError> {
        check_arity(arity)?;
        Ok(Self {
            heap: HeapIndex::new(arity),
            store: ElementStore::new(),
        })
    }

    /// Creates an empty queue with room for `capacity` items
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: HeapIndex::with_capacity(DEFAULT_ARITY, capacity),
            store: ElementStore::with_capacity(capacity),
        }
    }

    /// Builds a queue from `(item, priority)` pairs in O(n)
    ///
    /// Same as collecting into a `KaryPriorityQueue`.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (T, P)>,
    {
        let mut queue = Self::new();
        queue.extend_and_heapify(pairs.into_iter());
        queue
    }

    /// Builds a queue with the given branching factor from `(item, priority)`
    /// pairs in O(n)
    ///
    /// # Errors
    /// Returns [`QueueError::InvalidArity`] if `arity` is zero.
    pub fn from_pairs_with_arity<I>(pairs: I, arity: usize) -> Result<Self, QueueError>
    where
        I: IntoIterator<Item = (T, P)>,
    {
        let mut queue = Self::with_arity(arity)?;
        queue.extend_and_heapify(pairs.into_iter());
        Ok(queue)
    }

    /// Returns the branching factor
    #[inline]
    pub fn arity(&self) -> usize {
        self.heap.arity()
    }

    /// Returns the number of items in the queue
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns true if the queue holds no items
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns the number of element slots, including stale ones kept for reuse
    #[inline]
    pub fn store_len(&self) -> usize {
        self.store.len()
    }

    /// Returns the number of stale element slots waiting to be reused
    ///
    /// This is the slack that [`shrink`](Self::shrink) gives back.
    #[inline]
    pub fn stale_len(&self) -> usize {
        self.store.recycled_len()
    }

    /// Reserves room for at least `additional` more items
    pub fn reserve(&mut self, additional: usize) {
        self.heap.reserve(additional);
        self.store.reserve(additional);
    }

    /// Returns an iterator over the items in unspecified order
    ///
    /// # Example
    ///
    /// ```rust
    /// use kary_priority_queue::KaryPriorityQueue;
    ///
    /// let queue = KaryPriorityQueue::from_pairs([("x", 2.0), ("y", 1.0)]);
    /// let mut items: Vec<_> = queue.unordered_items().copied().collect();
    /// items.sort();
    /// assert_eq!(items, vec!["x", "y"]);
    /// ```
    pub fn unordered_items(&self) -> UnorderedItems<'_, T, P> {
        UnorderedItems {
            slots: self.heap.slots().iter(),
            store: &self.store,
        }
    }

    /// Inserts an item with the given priority
    pub fn enqueue(&mut self, item: T, priority: P) {
        let handle = self.store.add(item);
        self.heap.push(HeapSlot { priority, handle });
    }

    /// Returns the minimum-priority item without removing it
    ///
    /// # Errors
    /// Returns [`QueueError::EmptyQueue`] if the queue is empty.
    pub fn peek(&self) -> Result<&T, QueueError> {
        let root = self.heap.root().ok_or(QueueError::EmptyQueue)?;
        Ok(self.store.get(root.handle))
    }

    /// Returns the minimum priority without removing anything
    ///
    /// # Errors
    /// Returns [`QueueError::EmptyQueue`] if the queue is empty.
    pub fn peek_priority(&self) -> Result<P, QueueError> {
        self.heap
            .root()
            .map(|root| root.priority)
            .ok_or(QueueError::EmptyQueue)
    }

    /// Returns the minimum-priority item and its priority without removing it
    ///
    /// # Errors
    /// Returns [`QueueError::EmptyQueue`] if the queue is empty.
    pub fn peek_with_priority(&self) -> Result<(&T, P), QueueError> {
        let root = self.heap.root().ok_or(QueueError::EmptyQueue)?;
        Ok((self.store.get(root.handle), root.priority))
    }

    /// Removes and returns the minimum-priority item
    ///
    /// # Errors
    /// Returns [`QueueError::EmptyQueue`] if the queue is empty.
    pub fn dequeue(&mut self) -> Result<T, QueueError> {
        self.dequeue_entry().map(|(item, _)| item)
    }

    /// Removes and returns the minimum-priority item along with its priority
    ///
    /// # Errors
    /// Returns [`QueueError::EmptyQueue`] if the queue is empty.
    pub fn dequeue_entry(&mut self) -> Result<(T, P), QueueError> {
        let root = self.heap.pop_root().ok_or(QueueError::EmptyQueue)?;
        Ok((self.store.take(root.handle), root.priority))
    }

    /// Inserts `item` and then removes the minimum, in one sift
    ///
    /// If `priority` is no greater than the current minimum (or the queue is
    /// empty), `item` itself would come straight back out, so it is returned
    /// and the queue is left untouched. Otherwise `item` takes the root's
    /// place and the previous minimum is returned.
    ///
    /// # Example
    ///
    /// ```rust
    /// use kary_priority_queue::KaryPriorityQueue;
    ///
    /// let mut queue = KaryPriorityQueue::from_pairs([("a", 1.0), ("b", 4.0)]);
    ///
    /// // Ties go to the offered item
    /// assert_eq!(queue.enqueue_dequeue("tie", 1.0), "tie");
    /// assert_eq!(queue.enqueue_dequeue("c", 2.0), "a");
    /// assert_eq!(queue.peek(), Ok(&"c"));
    /// ```
    pub fn enqueue_dequeue(&mut self, item: T, priority: P) -> T {
        match self.heap.root().copied() {
            Some(root) if root.priority < priority => {
                let previous = self.store.replace(root.handle, item);
                self.heap.replace_root_priority(priority);
                previous
            }
            _ => item,
        }
    }

    /// Removes the minimum and then inserts `item`, in one sift
    ///
    /// Unlike [`enqueue_dequeue`](Self::enqueue_dequeue), the previous
    /// minimum is always returned, even if `item` has a smaller priority.
    ///
    /// # Errors
    /// Returns [`QueueError::EmptyQueue`] if the queue is empty; `item` is
    /// dropped in that case.
    pub fn dequeue_enqueue(&mut self, item: T, priority: P) -> Result<T, QueueError> {
        let handle = self.heap.root().ok_or(QueueError::EmptyQueue)?.handle;
        let previous = self.store.replace(handle, item);
        self.heap.replace_root_priority(priority);
        Ok(previous)
    }

    /// Inserts every `(item, priority)` pair
    ///
    /// Small batches relative to the queue are sifted in one at a time.
    /// Larger batches are appended unordered and the whole heap is rebuilt
    /// in O(n + m). The batch size used for that choice is the iterator's
    /// lower size bound.
    pub fn enqueue_range<I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (T, P)>,
    {
        let pairs = pairs.into_iter();
        let (incoming, _) = pairs.size_hint();

        if prefers_incremental(self.len(), incoming) {
            self.reserve(incoming);
            for (item, priority) in pairs {
                self.enqueue(item, priority);
            }
        } else {
            self.extend_and_heapify(pairs);
        }
    }

    /// Removes every item and releases all storage
    pub fn clear(&mut self) {
        self.heap.clear();
        self.store.clear();
    }

    /// Releases the element slots left behind by earlier removals
    ///
    /// Rebuilds the element store densely in current heap order. Dequeue
    /// order is unchanged. Runs in O(n); nothing calls it automatically.
    ///
    /// # Example
    ///
    /// ```rust
    /// use kary_priority_queue::KaryPriorityQueue;
    ///
    /// let mut queue = KaryPriorityQueue::from_pairs((0..100).map(|i| (i, i as f64)));
    /// for _ in 0..90 {
    ///     queue.dequeue().unwrap();
    /// }
    /// assert_eq!(queue.store_len(), 100);
    ///
    /// queue.shrink();
    /// assert_eq!(queue.store_len(), 10);
    /// assert_eq!(queue.stale_len(), 0);
    /// assert_eq!(queue.dequeue(), Ok(90));
    /// ```
    pub fn shrink(&mut self) {
        self.store.compact(self.heap.handles_mut());
        self.heap.shrink_to_fit();
        debug_assert!(self.verify_invariants(), "invariants violated after shrink");
    }

    /// Consumes the queue, returning its items in ascending priority order
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        self.drain_sorted().collect()
    }

    /// Returns an iterator that dequeues items in ascending priority order
    ///
    /// Items not yet yielded when the iterator is dropped stay in the queue.
    pub fn drain_sorted(&mut self) -> DrainSorted<'_, T, P> {
        DrainSorted { queue: self }
    }

    /// Checks every structural invariant of the queue
    ///
    /// - heap order holds between every parent and child
    /// - heap handles are distinct and refer to live element slots
    /// - recycled handles are stale and distinct
    ///
    /// Runs in O(n); meant for tests and debug assertions.
    pub fn verify_invariants(&self) -> bool {
        if !self.heap.is_heap_ordered() || self.heap.len() > self.store.len() {
            return false;
        }

        let mut seen = vec![false; self.store.len()];
        for slot in self.heap.slots() {
            if !self.store.is_live(slot.handle) || seen[slot.handle] {
                return false;
            }
            seen[slot.handle] = true;
        }
        for &handle in self.store.recycled() {
            if handle >= seen.len() || self.store.is_live(handle) || seen[handle] {
                return false;
            }
            seen[handle] = true;
        }
        true
    }

    /// Appends pairs unordered, then rebuilds heap order over everything
    fn extend_and_heapify<I>(&mut self, pairs: I)
    where
        I: Iterator<Item = (T, P)>,
    {
        let (incoming, _) = pairs.size_hint();
        self.reserve(incoming);
        for (item, priority) in pairs {
            let handle = self.store.add(item);
            self.heap.push_unordered(HeapSlot { priority, handle });
        }
        self.heap.heapify();
        debug_assert!(self.heap.is_heap_ordered(), "heap order violated after heapify");
    }
}

/// Sift items in one by one when the batch is small next to n / log2(n)
fn prefers_incremental(current: usize, incoming: usize) -> bool {
    let n = current as f64;
    (incoming as f64) < n / n.log2()
}

fn check_arity(arity: usize) -> Result<(), QueueError> {
    if arity == 0 {
        Err(QueueError::InvalidArity(arity))
    } else {
        Ok(())
    }
}

impl<T, P: PartialOrd + Copy> PriorityQueue<T, P> for KaryPriorityQueue<T, P> {
    fn new() -> Self {
        KaryPriorityQueue::new()
    }

    fn len(&self) -> usize {
        KaryPriorityQueue::len(self)
    }

    fn is_empty(&self) -> bool {
        KaryPriorityQueue::is_empty(self)
    }

    fn enqueue(&mut self, item: T, priority: P) {
        KaryPriorityQueue::enqueue(self, item, priority)
    }

    fn peek(&self) -> Result<&T, QueueError> {
        KaryPriorityQueue::peek(self)
    }

    fn peek_priority(&self) -> Result<P, QueueError> {
        KaryPriorityQueue::peek_priority(self)
    }

    fn dequeue(&mut self) -> Result<T, QueueError> {
        KaryPriorityQueue::dequeue(self)
    }

    fn dequeue_entry(&mut self) -> Result<(T, P), QueueError> {
        KaryPriorityQueue::dequeue_entry(self)
    }

    fn clear(&mut self) {
        KaryPriorityQueue::clear(self)
    }
}

impl<T, P: PartialOrd + Copy> Default for KaryPriorityQueue<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, P: fmt::Debug> fmt::Debug for KaryPriorityQueue<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KaryPriorityQueue")
            .field("arity", &self.heap.arity())
            .field("len", &self.heap.len())
            .field("stale", &self.store.recycled_len())
            .field(
                "items",
                &DebugItems {
                    heap: &self.heap,
                    store: &self.store,
                },
            )
            .finish()
    }
}

impl<T, P: PartialOrd + Copy> FromIterator<(T, P)> for KaryPriorityQueue<T, P> {
    fn from_iter<I: IntoIterator<Item = (T, P)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

impl<T, P: PartialOrd + Copy> Extend<(T, P)> for KaryPriorityQueue<T, P> {
    fn extend<I: IntoIterator<Item = (T, P)>>(&mut self, iter: I) {
        self.enqueue_range(iter);
    }
}

/// Iterator over a queue's items in unspecified order
///
/// Created by [`KaryPriorityQueue::unordered_items`].
pub struct UnorderedItems<'a, T, P> {
    slots: slice::Iter<'a, HeapSlot<P>>,
    store: &'a ElementStore<T>,
}

impl<'a, T, P> Iterator for UnorderedItems<'a, T, P> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        let slot = self.slots.next()?;
        Some(self.store.get(slot.handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.slots.size_hint()
    }
}

impl<T, P> ExactSizeIterator for UnorderedItems<'_, T, P> {}

impl<T, P> FusedIterator for UnorderedItems<'_, T, P> {}

/// Iterator that dequeues items in ascending priority order
///
/// Created by [`KaryPriorityQueue::drain_sorted`].
pub struct DrainSorted<'a, T, P: PartialOrd + Copy> {
    queue: &'a mut KaryPriorityQueue<T, P>,
}

impl<T, P: PartialOrd + Copy> Iterator for DrainSorted<'_, T, P> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.queue.dequeue().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.queue.len();
        (len, Some(len))
    }
}

impl<T, P: PartialOrd + Copy> ExactSizeIterator for DrainSorted<'_, T, P> {}

impl<T, P: PartialOrd + Copy> FusedIterator for DrainSorted<'_, T, P> {}

struct DebugItems<'a, T, P> {
    heap: &'a HeapIndex<P>,
    store: &'a ElementStore<T>,
}

impl<T: fmt::Debug, P: fmt::Debug> fmt::Debug for DebugItems<'_, T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.heap
                    .slots()
                    .iter()
                    .map(|slot| (self.store.get(slot.handle), &slot.priority)),
            )
            .finish()
    }
}
