//! Ordered ready queue.
//!
//! A sequence container kept sorted under an injected ordering
//! relation. The queue knows nothing about scheduling; it only keeps
//! its entries ordered, stable for ties, and reachable by index.
//!
//! # Ordering Contract
//! `insert` places a new entry after every existing entry that compares
//! less than or equal to it, so entries with equal keys stay in
//! insertion order. All operations are O(n); queue lengths in a
//! simulation are small enough that a flat container beats pointer
//! structures.

use std::cmp::Ordering;
use std::collections::VecDeque;

/// A total preorder injected into an [`OrderedQueue`].
///
/// Implementors carry whatever state the comparison needs; the queue
/// itself stays generic over both the entry type and the order.
pub trait QueueOrder<T> {
    /// Compares two entries. `Less` means `a` is served before `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// A sequence kept sorted under a [`QueueOrder`], stable for ties.
#[derive(Debug, Clone)]
pub struct OrderedQueue<T, O> {
    entries: VecDeque<T>,
    order: O,
}

impl<T, O: QueueOrder<T>> OrderedQueue<T, O> {
    /// Creates an empty queue under the given order.
    pub fn new(order: O) -> Self {
        Self {
            entries: VecDeque::new(),
            order,
        }
    }

    /// Inserts `item` at its sorted position and returns the zero-based
    /// index where it landed.
    ///
    /// The item is placed before the first entry it strictly precedes;
    /// entries comparing equal keep their earlier insertion order.
    pub fn insert(&mut self, item: T) -> usize {
        let position = self
            .entries
            .iter()
            .position(|e| self.order.compare(&item, e) == Ordering::Less)
            .unwrap_or(self.entries.len());
        self.entries.insert(position, item);
        position
    }

    /// Returns the head without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.entries.front()
    }

    /// Returns the head mutably without removing it.
    pub fn peek_mut(&mut self) -> Option<&mut T> {
        self.entries.front_mut()
    }

    /// Removes and returns the head.
    pub fn poll(&mut self) -> Option<T> {
        self.entries.pop_front()
    }

    /// Returns the entry at `index`, or `None` outside `[0, len)`.
    pub fn at(&self, index: usize) -> Option<&T> {
        self.entries.get(index)
    }

    /// Removes and returns the entry at `index`, shifting later entries
    /// forward; `None` outside `[0, len)`.
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        self.entries.remove(index)
    }

    /// Number of queued entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the queue holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Releases all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates entries in queue order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    /// Iterates entries in queue order, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.iter_mut()
    }
}

impl<T: PartialEq, O: QueueOrder<T>> OrderedQueue<T, O> {
    /// Removes every entry equal to `value` and returns how many were
    /// removed. Equality is plain `==`, not the ordering relation.
    pub fn remove_eq(&mut self, value: &T) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e != value);
        before - self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Job, Policy};
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    /// Ascending order on the first tuple element; the second records
    /// insertion sequence for stability checks.
    #[derive(Debug, Clone, Copy)]
    struct ByKey;

    impl QueueOrder<(i32, usize)> for ByKey {
        fn compare(&self, a: &(i32, usize), b: &(i32, usize)) -> Ordering {
            a.0.cmp(&b.0)
        }
    }

    #[test]
    fn test_insert_returns_sorted_position() {
        let mut queue = OrderedQueue::new(ByKey);
        assert_eq!(queue.insert((5, 0)), 0);
        assert_eq!(queue.insert((2, 1)), 0);
        assert_eq!(queue.insert((9, 2)), 2);
        assert_eq!(queue.insert((4, 3)), 1);

        let keys: Vec<i32> = queue.iter().map(|e| e.0).collect();
        assert_eq!(keys, vec![2, 4, 5, 9]);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut queue = OrderedQueue::new(ByKey);
        queue.insert((3, 0));
        queue.insert((3, 1));
        assert_eq!(queue.insert((3, 2)), 2);

        let seq: Vec<usize> = queue.iter().map(|e| e.1).collect();
        assert_eq!(seq, vec![0, 1, 2]);
    }

    #[test]
    fn test_single_element_round_trip() {
        let mut queue = OrderedQueue::new(ByKey);
        queue.insert((1, 0));
        assert_eq!(queue.poll(), Some((1, 0)));
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.poll(), None);
        assert_eq!(queue.peek(), None);
    }

    #[test]
    fn test_remove_at_single_element() {
        let mut queue = OrderedQueue::new(ByKey);
        queue.insert((1, 0));
        assert_eq!(queue.remove_at(0), Some((1, 0)));
        assert!(queue.is_empty());
        assert_eq!(queue.remove_at(0), None);
    }

    #[test]
    fn test_at_out_of_range_is_none() {
        let mut queue = OrderedQueue::new(ByKey);
        assert_eq!(queue.at(0), None);
        queue.insert((1, 0));
        assert_eq!(queue.at(0), Some(&(1, 0)));
        assert_eq!(queue.at(1), None);
    }

    #[test]
    fn test_remove_at_shifts_later_entries() {
        let mut queue = OrderedQueue::new(ByKey);
        queue.insert((1, 0));
        queue.insert((2, 1));
        queue.insert((3, 2));
        assert_eq!(queue.remove_at(1), Some((2, 1)));
        assert_eq!(queue.at(1), Some(&(3, 2)));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_remove_eq_counts_matches() {
        let mut queue = OrderedQueue::new(ByKey);
        queue.insert((1, 7));
        queue.insert((2, 7));
        queue.insert((1, 7));
        assert_eq!(queue.remove_eq(&(1, 7)), 2);
        assert_eq!(queue.remove_eq(&(9, 9)), 0);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_size_tracks_inserts_and_removals() {
        let mut queue = OrderedQueue::new(ByKey);
        for i in 0..5 {
            queue.insert((i, i as usize));
            assert_eq!(queue.len(), i as usize + 1);
        }
        queue.poll();
        queue.remove_at(1);
        assert_eq!(queue.len(), 3);
        queue.clear();
        assert!(queue.is_empty());
    }

    #[test]
    fn test_random_inserts_hold_ordering_invariant() {
        let policies = [
            Policy::Fcfs,
            Policy::Sjf,
            Policy::Psjf,
            Policy::Pri,
            Policy::Ppri,
            Policy::Rr,
        ];
        let mut rng = SmallRng::seed_from_u64(42);

        for policy in policies {
            let mut queue = OrderedQueue::new(policy);
            for id in 0..50u32 {
                // Arrival times stay unique; other keys collide freely
                // to exercise tie handling.
                let mut job = Job::new(id, id as i64, rng.random_range(1..6), rng.random_range(0..4));
                job.remaining_time = rng.random_range(1..6);
                queue.insert(job);

                for i in 0..queue.len() - 1 {
                    let a = queue.at(i).unwrap();
                    let b = queue.at(i + 1).unwrap();
                    assert_ne!(
                        policy.compare(a, b),
                        Ordering::Greater,
                        "{policy} inversion at {i}: {:?} > {:?}",
                        a.id,
                        b.id
                    );
                }
            }
            assert_eq!(queue.len(), 50);
        }
    }
}
