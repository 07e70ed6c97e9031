//! Fixed-capacity ring buffer shared by the recognizer's histories.
//!
//! One abstraction backs the motion history, the letter vote window,
//! and the gesture frame window: pushing at capacity evicts the oldest
//! element, iteration runs oldest to newest.

use std::collections::VecDeque;

/// Bounded FIFO; pushing at capacity drops the oldest entry.
///
/// Capacity must be at least 1 and is fixed for the lifetime of the ring.
#[derive(Debug, Clone)]
pub struct Ring<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> Ring<T> {
    /// Create an empty ring holding at most `capacity` elements.
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append `value`, evicting the oldest element when full.
    pub fn push(&mut self, value: T) {
        if self.items.len() >= self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(value);
    }

    /// Number of elements currently held.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the ring holds exactly `capacity` elements.
    pub fn is_full(&self) -> bool {
        self.items.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop all elements; capacity is unchanged.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterate oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

// ── Tests ──────────────────────────────────────────────────
