//! Stress tests that push the queue through long operation sequences
//!
//! These tests run large numbers of operations in various patterns to catch
//! edge cases in sifting, handle recycling and compaction.

use kary_priority_queue::KaryPriorityQueue;

/// Linear congruential generator for reproducible pseudo-random input
struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Lcg { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        self.state >> 33
    }
}

/// Insert many elements and pop them all back
#[test]
fn test_massive_operations() {
    for arity in [2, 4, 7] {
        let mut queue = KaryPriorityQueue::with_arity(arity).unwrap();

        for i in (0..10_000).rev() {
            queue.enqueue(i, i as f64);
        }
        assert_eq!(queue.len(), 10_000);

        for i in 0..10_000 {
            assert_eq!(queue.dequeue(), Ok(i));
        }
        assert!(queue.is_empty());
        assert_eq!(queue.stale_len(), 10_000);
    }
}

/// Alternating insert/pop keeps the store at its high-water mark
#[test]
fn test_alternating_ops_do_not_grow_store() {
    let mut queue = KaryPriorityQueue::new();
    for i in 0..64u64 {
        queue.enqueue(i, i as f64);
    }

    let mut rng = Lcg::new(7);
    for _ in 0..50_000 {
        let p = (rng.next() % 1000) as f64;
        queue.dequeue().unwrap();
        queue.enqueue(0, p);
    }

    assert_eq!(queue.len(), 64);
    assert_eq!(queue.store_len(), 64);
    assert!(queue.verify_invariants());
}

/// Combined operations on a steady-state queue, checked against sorting
#[test]
fn test_combined_ops_steady_state() {
    let mut rng = Lcg::new(42);
    let mut queue: KaryPriorityQueue<u64, u64> = (0..500)
        .map(|_| {
            let p = rng.next() % 10_000;
            (p, p)
        })
        .collect();

    for step in 0..20_000 {
        let p = rng.next() % 10_000;
        let min = queue.peek_priority().unwrap();
        if step % 2 == 0 {
            let out = queue.enqueue_dequeue(p, p);
            if p <= min {
                assert_eq!(out, p);
            } else {
                assert_eq!(out, min);
            }
        } else {
            assert_eq!(queue.dequeue_enqueue(p, p), Ok(min));
        }
    }

    assert_eq!(queue.len(), 500);
    assert_eq!(queue.store_len(), 500);
    assert!(queue.verify_invariants());

    let drained = queue.into_sorted_vec();
    let mut sorted = drained.clone();
    sorted.sort();
    assert_eq!(drained, sorted);
}

/// Removal-heavy phases followed by shrink and refill
#[test]
fn test_shrink_cycles() {
    let mut rng = Lcg::new(1234);
    let mut queue = KaryPriorityQueue::with_arity(3).unwrap();
    let mut expected_len = 0usize;

    for cycle in 0..20 {
        let batch: Vec<(u64, f64)> = (0..2000)
            .map(|_| {
                let p = rng.next();
                (p, p as f64)
            })
            .collect();
        queue.enqueue_range(batch);
        expected_len += 2000;

        let removals = 1500 + cycle * 10;
        let mut last = f64::NEG_INFINITY;
        for _ in 0..removals {
            let (_, p) = queue.dequeue_entry().unwrap();
            assert!(p >= last);
            last = p;
        }
        expected_len -= removals;

        queue.shrink();
        assert_eq!(queue.len(), expected_len);
        assert_eq!(queue.store_len(), expected_len);
        assert_eq!(queue.stale_len(), 0);
        assert!(queue.verify_invariants());
    }
}

/// Mix of single and bulk inserts against a sorted reference
#[test]
fn test_mixed_range_sizes_against_reference() {
    let mut rng = Lcg::new(99);
    let mut queue = KaryPriorityQueue::new();
    let mut reference: Vec<i64> = Vec::new();

    for round in 0..200 {
        let size = match round % 5 {
            0 => 0,
            1 => 1,
            2 => 5,
            3 => 50,
            _ => 400,
        };
        let batch: Vec<(i64, i64)> = (0..size)
            .map(|_| {
                let p = (rng.next() % 2001) as i64 - 1000;
                (p, p)
            })
            .collect();
        reference.extend(batch.iter().map(|&(p, _)| p));
        queue.enqueue_range(batch);

        for _ in 0..(size / 2) {
            reference.sort_unstable_by(|a, b| b.cmp(a));
            let expected = reference.pop().unwrap();
            assert_eq!(queue.dequeue(), Ok(expected));
        }
        assert_eq!(queue.len(), reference.len());
    }

    reference.sort();
    assert_eq!(queue.into_sorted_vec(), reference);
}
