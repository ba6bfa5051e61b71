//! K-ary Heap Priority Queue for Rust
//!
//! This crate provides [`KaryPriorityQueue`], a min-priority queue over
//! `(item, priority)` pairs backed by a flat array k-ary heap, tuned for
//! workloads where enqueue/dequeue throughput dominates, such as shortest-path
//! search and event scheduling.
//!
//! # Features
//!
//! - **Configurable branching factor**: every node has up to `k` children
//!   (default 4). Larger `k` means a shallower heap and cheaper inserts.
//! - **Decoupled payloads**: the heap orders `(priority, handle)` slots while
//!   the items sit in a separate arena, so sifting never moves large items.
//! - **Handle recycling**: slots freed by `dequeue` are reused by later
//!   inserts; [`shrink`](KaryPriorityQueue::shrink) gives the slack back on
//!   request.
//! - **Combined operations**: `enqueue_dequeue` and `dequeue_enqueue` do an
//!   insert and an extract with a single sift.
//! - **Bulk construction**: `from_pairs` and large `enqueue_range` batches
//!   heapify in O(n).
//! - **Pathfinding**: Dijkstra and A* search in [`pathfinding`].
//!
//! # Example
//!
//! ```rust
//! use kary_priority_queue::{KaryPriorityQueue, QueueError};
//!
//! let mut queue = KaryPriorityQueue::from_pairs([
//!     ("a", 3.0),
//!     ("b", -1.0),
//!     ("c", 7.0),
//!     ("d", 2.0),
//!     ("e", 4.0),
//!     ("f", 6.0),
//! ]);
//!
//! assert_eq!(queue.peek(), Ok(&"b"));
//! assert_eq!(queue.dequeue_enqueue("g", 5.0), Ok("b"));
//!
//! let order: Vec<_> = queue.drain_sorted().collect();
//! assert_eq!(order, vec!["d", "a", "e", "g", "f", "c"]);
//! assert_eq!(queue.dequeue(), Err(QueueError::EmptyQueue));
//! ```

mod kary;
pub mod pathfinding;
pub mod queue;
mod storage;
pub mod traits;

pub use kary::DEFAULT_ARITY;
pub use queue::{DrainSorted, KaryPriorityQueue, UnorderedItems};
pub use traits::{PriorityQueue, QueueError};
