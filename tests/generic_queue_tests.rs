//! Generic tests for the PriorityQueue trait surface
//!
//! The helpers only use the trait, then run against queues of several
//! branching factors through a thin newtype per arity.

use kary_priority_queue::{KaryPriorityQueue, PriorityQueue, QueueError};

/// Fixed-arity wrapper so `PriorityQueue::new` can pick the branching factor
struct Arity<const K: usize, T>(KaryPriorityQueue<T, f64>);

impl<const K: usize, T> PriorityQueue<T, f64> for Arity<K, T> {
    fn new() -> Self {
        Arity(KaryPriorityQueue::with_arity(K).unwrap())
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn enqueue(&mut self, item: T, priority: f64) {
        self.0.enqueue(item, priority)
    }

    fn peek(&self) -> Result<&T, QueueError> {
        self.0.peek()
    }

    fn peek_priority(&self) -> Result<f64, QueueError> {
        self.0.peek_priority()
    }

    fn dequeue(&mut self) -> Result<T, QueueError> {
        self.0.dequeue()
    }

    fn dequeue_entry(&mut self) -> Result<(T, f64), QueueError> {
        self.0.dequeue_entry()
    }

    fn clear(&mut self) {
        self.0.clear()
    }
}

// Test helpers that work with any PriorityQueue implementation

/// Test that an empty queue reports errors rather than panicking
fn test_empty_queue<Q: PriorityQueue<String, f64>>() {
    let mut queue = Q::new();
    assert!(queue.is_empty());
    assert_eq!(queue.len(), 0);
    assert_eq!(queue.peek(), Err(QueueError::EmptyQueue));
    assert_eq!(queue.peek_priority(), Err(QueueError::EmptyQueue));
    assert_eq!(queue.dequeue(), Err(QueueError::EmptyQueue));
    assert_eq!(queue.dequeue_entry(), Err(QueueError::EmptyQueue));
}

/// The worked example: six items drain in priority order
fn test_reference_drain<Q: PriorityQueue<&'static str, f64>>() {
    let mut queue = Q::new();
    for (item, priority) in [
        ("a", 3.0),
        ("b", -1.0),
        ("c", 7.0),
        ("d", 2.0),
        ("e", 4.0),
        ("f", 6.0),
    ] {
        queue.enqueue(item, priority);
    }
    assert_eq!(queue.len(), 6);

    let mut order = Vec::new();
    let mut priorities = Vec::new();
    while let Ok((item, priority)) = queue.dequeue_entry() {
        order.push(item);
        priorities.push(priority);
    }
    assert_eq!(order, vec!["b", "d", "a", "e", "f", "c"]);
    assert_eq!(priorities, vec![-1.0, 2.0, 3.0, 4.0, 6.0, 7.0]);
}

/// len() tracks inserts minus successful removals
fn test_count_law<Q: PriorityQueue<u32, f64>>() {
    let mut queue = Q::new();
    let mut expected = 0usize;
    for round in 0..50u32 {
        for i in 0..(round % 4) {
            queue.enqueue(round * 10 + i, f64::from((round * 7 + i) % 13));
            expected += 1;
        }
        if round % 3 == 0 && queue.dequeue().is_ok() {
            expected -= 1;
        }
        assert_eq!(queue.len(), expected);
    }
}

/// Negative, zero and infinite priorities order correctly
fn test_extreme_priorities<Q: PriorityQueue<&'static str, f64>>() {
    let mut queue = Q::new();
    queue.enqueue("zero", 0.0);
    queue.enqueue("inf", f64::INFINITY);
    queue.enqueue("neg_inf", f64::NEG_INFINITY);
    queue.enqueue("tiny", -f64::MIN_POSITIVE);
    queue.enqueue("max", f64::MAX);

    let order: Vec<_> = std::iter::from_fn(|| queue.dequeue().ok()).collect();
    assert_eq!(order, vec!["neg_inf", "tiny", "zero", "max", "inf"]);
}

/// clear() returns the queue to its empty state and it stays usable
fn test_clear_then_reuse<Q: PriorityQueue<u32, f64>>() {
    let mut queue = Q::new();
    for i in 0..20 {
        queue.enqueue(i, f64::from(20 - i));
    }
    queue.dequeue().unwrap();
    queue.clear();
    assert!(queue.is_empty());
    assert_eq!(queue.peek(), Err(QueueError::EmptyQueue));
    assert_eq!(queue.dequeue(), Err(QueueError::EmptyQueue));

    queue.enqueue(7, 1.0);
    assert_eq!(queue.peek(), Ok(&7));
}

/// Duplicate priorities all come out, none lost
fn test_duplicate_priorities<Q: PriorityQueue<u32, f64>>() {
    let mut queue = Q::new();
    for i in 0..30 {
        queue.enqueue(i, 1.0);
    }
    let mut seen: Vec<u32> = std::iter::from_fn(|| queue.dequeue().ok()).collect();
    seen.sort();
    assert_eq!(seen, (0..30).collect::<Vec<_>>());
}

macro_rules! queue_tests {
    ($($name:ident => $queue:ty),+ $(,)?) => {
        $(
            mod $name {
                use super::*;

                #[test]
                fn empty_queue() {
                    test_empty_queue::<$queue>();
                }

                #[test]
                fn reference_drain() {
                    test_reference_drain::<$queue>();
                }

                #[test]
                fn count_law() {
                    test_count_law::<$queue>();
                }

                #[test]
                fn extreme_priorities() {
                    test_extreme_priorities::<$queue>();
                }

                #[test]
                fn clear_then_reuse() {
                    test_clear_then_reuse::<$queue>();
                }

                #[test]
                fn duplicate_priorities() {
                    test_duplicate_priorities::<$queue>();
                }
            }
        )+
    };
}

queue_tests! {
    default_arity => KaryPriorityQueue<_, f64>,
    unary => Arity<1, _>,
    binary => Arity<2, _>,
    ternary => Arity<3, _>,
    octonary => Arity<8, _>,
    wide => Arity<64, _>,
}
