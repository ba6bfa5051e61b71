//! Common traits and the error type for priority queues
//!
//! - [`PriorityQueue`]: the queue surface host algorithms are written against
//! - [`QueueError`]: the single failure kind raised by queue operations
//!
//! Unlike `std::collections::BinaryHeap`, queues here store `(item, priority)`
//! pairs so the ordering key is kept apart from the payload, and they are
//! min-queues: the smallest priority comes out first.

use std::fmt;

/// Error type for priority queue operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    /// The operation needs a minimum element but the queue holds none
    EmptyQueue,
    /// A branching factor of zero was requested at construction
    InvalidArity(usize),
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueError::EmptyQueue => {
                write!(f, "priority queue is empty")
            }
            QueueError::InvalidArity(arity) => {
                write!(f, "branching factor must be at least 1, got {}", arity)
            }
        }
    }
}

impl std::error::Error for QueueError {}

/// Base trait for min-priority queues
///
/// Operations that need a minimum (`peek`, `dequeue`, ...) return
/// [`QueueError::EmptyQueue`] when the queue is empty instead of panicking,
/// leaving the caller to decide whether that is a normal termination
/// condition or a bug.
///
/// # Example
///
/// ```rust
/// use kary_priority_queue::{KaryPriorityQueue, PriorityQueue, QueueError};
///
/// fn drain<Q: PriorityQueue<&'static str, f64>>(queue: &mut Q) -> Vec<&'static str> {
///     let mut out = Vec::new();
///     while let Ok(item) = queue.dequeue() {
///         out.push(item);
///     }
///     out
/// }
///
/// let mut queue: KaryPriorityQueue<&str> = KaryPriorityQueue::new();
/// queue.enqueue("later", 2.0);
/// queue.enqueue("first", 1.0);
/// assert_eq!(drain(&mut queue), vec!["first", "later"]);
/// assert_eq!(queue.peek(), Err(QueueError::EmptyQueue));
/// ```
pub trait PriorityQueue<T, P: PartialOrd + Copy> {
    /// Creates a new empty queue
    fn new() -> Self;

    /// Returns the number of items in the queue
    fn len(&self) -> usize;

    /// Returns true if the queue holds no items
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts an item with the given priority
    fn enqueue(&mut self, item: T, priority: P);

    /// Returns the minimum-priority item without removing it
    fn peek(&self) -> Result<&T, QueueError>;

    /// Returns the minimum priority currently held
    fn peek_priority(&self) -> Result<P, QueueError>;

    /// Removes and returns the minimum-priority item
    fn dequeue(&mut self) -> Result<T, QueueError>;

    /// Removes and returns the minimum-priority item together with its priority
    fn dequeue_entry(&mut self) -> Result<(T, P), QueueError>;

    /// Removes every item
    fn clear(&mut self);
}
