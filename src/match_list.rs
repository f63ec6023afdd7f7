//! Bounded top-K match list.
//!
//! Fixed-capacity container keeping the K lowest-distance candidates seen so
//! far. Entries are stored in a pre-sized slot vector sorted by ascending
//! distance, so the current worst retained candidate sits at the tail where
//! it can be inspected in O(1) and evicted cheaply; insertion is O(K).
//! Equal distances keep their insertion order (first found wins).
//!
//! `insert` returns the pruning bound the caller should use for subsequent
//! distance computations: the configured maximum while the list is filling,
//! and the current worst retained distance once it is full. Feeding the
//! tightened bound back into the partial-distance early exit lets the caller
//! abandon hopeless candidates mid-computation.

use crate::float_trait::GnlmFloat;

/// A matched block: anchor position, ranking distance, and the
/// lambda-combined score carried along for the collaborative weights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockMatch<F> {
    pub row: usize,
    pub col: usize,
    pub distance: F,
    pub score: F,
}

/// Bounded list of the K best (lowest-distance) match candidates.
#[derive(Debug, Clone)]
pub struct MatchList<F> {
    capacity: usize,
    max_distance: F,
    entries: Vec<BlockMatch<F>>,
}

impl<F: GnlmFloat> MatchList<F> {
    pub fn new(capacity: usize, max_distance: F) -> Self {
        Self {
            capacity,
            max_distance,
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Offer a candidate. Returns the pruning bound for the next candidate.
    pub fn insert(&mut self, distance: F, score: F, position: (usize, usize)) -> F {
        if self.capacity == 0 {
            return self.max_distance;
        }

        if self.entries.len() < self.capacity {
            if distance > self.max_distance {
                return self.max_distance;
            }
            self.insert_sorted(distance, score, position);
            if self.entries.len() < self.capacity {
                self.max_distance
            } else {
                self.worst()
            }
        } else {
            if distance >= self.worst() {
                return self.worst();
            }
            self.entries.pop();
            self.insert_sorted(distance, score, position);
            self.worst()
        }
    }

    /// Extract the retained candidates in ascending-distance order,
    /// clearing and refilling `dest`.
    pub fn extract_into(&self, dest: &mut Vec<BlockMatch<F>>) {
        dest.clear();
        dest.extend_from_slice(&self.entries);
    }

    /// Retained candidates, best first.
    pub fn as_sorted(&self) -> &[BlockMatch<F>] {
        &self.entries
    }

    fn worst(&self) -> F {
        self.entries
            .last()
            .expect("worst queried on an empty list")
            .distance
    }

    fn insert_sorted(&mut self, distance: F, score: F, position: (usize, usize)) {
        // After all equal distances, so earlier insertions rank first.
        let at = self.entries.partition_point(|e| e.distance <= distance);
        self.entries.insert(
            at,
            BlockMatch {
                row: position.0,
                col: position.1,
                distance,
                score,
            },
        );
    }
}
