//! Element storage with handle recycling
//!
//! The payload half of [`KaryPriorityQueue`](crate::KaryPriorityQueue): an
//! arena of element slots addressed by integer handle, plus a LIFO free list
//! of handles vacated by earlier removals.
//!
//! # Design
//!
//! - Inserting pops a recycled handle when one is available and only grows the
//!   arena otherwise, so a long run of alternating enqueues and dequeues keeps
//!   the arena at its high-water mark instead of growing without bound.
//! - Removing moves the element out and recycles its handle; the arena itself
//!   never shrinks on removal.
//! - `ElementStore::compact` rebuilds the arena densely on request, which is
//!   how the queue reclaims the capacity left behind by removal-heavy phases.
//!
//! A handle is *live* while its slot holds an element and *stale* once the
//! element has been taken out.

/// Arena of elements addressed by handle, with a free list of stale handles
#[derive(Debug, Clone)]
pub(crate) struct ElementStore<T> {
    /// Element slots; `None` marks a stale handle
    elems: Vec<Option<T>>,
    /// Stale handles awaiting reuse, most recently freed last
    recycled: Vec<usize>,
}

impl<T> ElementStore<T> {
    pub(crate) fn new() -> Self {
        Self {
            elems: Vec::new(),
            recycled: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            elems: Vec::with_capacity(capacity),
            recycled: Vec::new(),
        }
    }

    /// Number of slots, live or stale
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.elems.len()
    }

    /// Number of stale handles waiting in the free list
    #[inline]
    pub(crate) fn recycled_len(&self) -> usize {
        self.recycled.len()
    }

    pub(crate) fn recycled(&self) -> &[usize] {
        &self.recycled
    }

    /// Reserves room for `additional` new elements beyond what recycling covers
    pub(crate) fn reserve(&mut self, additional: usize) {
        self.elems
            .reserve(additional.saturating_sub(self.recycled.len()));
    }

    /// Stores an element and returns its handle
    ///
    /// Reuses the most recently recycled handle if there is one.
    pub(crate) fn add(&mut self, elem: T) -> usize {
        match self.recycled.pop() {
            Some(handle) => {
                debug_assert!(self.elems[handle].is_none());
                self.elems[handle] = Some(elem);
                handle
            }
            None => {
                self.elems.push(Some(elem));
                self.elems.len() - 1
            }
        }
    }

    /// Returns the element behind a live handle
    #[inline]
    pub(crate) fn get(&self, handle: usize) -> &T {
        match &self.elems[handle] {
            Some(elem) => elem,
            None => stale_handle(handle),
        }
    }

    /// Returns true if `handle` currently holds an element
    pub(crate) fn is_live(&self, handle: usize) -> bool {
        matches!(self.elems.get(handle), Some(Some(_)))
    }

    /// Moves the element out of a live handle and recycles the handle
    pub(crate) fn take(&mut self, handle: usize) -> T {
        let elem = self.evict(handle);
        self.recycled.push(handle);
        elem
    }

    /// Swaps the element behind a live handle, returning the previous one
    pub(crate) fn replace(&mut self, handle: usize, elem: T) -> T {
        match self.elems[handle].replace(elem) {
            Some(previous) => previous,
            None => stale_handle(handle),
        }
    }

    /// Rebuilds the arena densely from the given live handles
    ///
    /// Each handle is rewritten in place to its new dense position, in
    /// iteration order. Every live handle must be yielded exactly once;
    /// whatever is not yielded is discarded along with the free list.
    pub(crate) fn compact<'a>(&mut self, handles: impl Iterator<Item = &'a mut usize>) {
        let live = self.elems.len() - self.recycled.len();
        let mut dense = Vec::with_capacity(live);
        for handle in handles {
            dense.push(Some(self.evict(*handle)));
            *handle = dense.len() - 1;
        }
        self.elems = dense;
        self.recycled = Vec::new();
    }

    /// Drops every element and releases both allocations
    pub(crate) fn clear(&mut self) {
        self.elems = Vec::new();
        self.recycled = Vec::new();
    }

    fn evict(&mut self, handle: usize) -> T {
        match self.elems[handle].take() {
            Some(elem) => elem,
            None => stale_handle(handle),
        }
    }
}

#[cold]
#[inline(never)]
fn stale_handle(handle: usize) -> ! {
    panic!("element store handle {} is stale", handle)
}
