//! # Dirty Set
//!
//! Tracks which entity labels must be recomputed on the next flush.
//!
//! ## Layout
//!
//! ```text
//! bits:   [u64; capacity / 64]   presence, 1 bit per entity index
//! marked: [u32; dirty count]     indices in insertion order
//! ```
//!
//! `insert` is idempotent in O(1). `iter` and `clear` cost O(dirty count),
//! not O(capacity).

/// Sparse set of entity indices pending label recomputation.
#[derive(Debug, Clone, Default)]
pub struct DirtySet {
    /// Bitset: 1 = dirty, 0 = clean. 64 entities per u64.
    bits: Vec<u64>,
    /// Capacity in entities.
    capacity: usize,
    /// Dirty indices, each present exactly once.
    marked: Vec<u32>,
}

impl DirtySet {
    /// Creates a new dirty set.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Number of entity indices to track
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            bits: vec![0u64; capacity.div_ceil(64)],
            capacity,
            marked: Vec::new(),
        }
    }

    /// Returns the number of trackable indices.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of dirty indices.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.marked.len()
    }

    /// Returns `true` if nothing is pending.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.marked.is_empty()
    }

    /// Marks an index as dirty. Returns `true` if it was clean before.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`DirtySet::capacity`]; the set must be
    /// grown before the world hands out a larger index.
    #[inline]
    pub fn insert(&mut self, index: usize) -> bool {
        assert!(
            index < self.capacity,
            "dirty index {index} out of range (capacity {})",
            self.capacity
        );
        if self.contains(index) {
            return false;
        }
        self.bits[index / 64] |= 1u64 << (index % 64);
        self.marked.push(index as u32);
        true
    }

    /// Checks if an index is dirty.
    #[inline]
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        if index >= self.capacity {
            return false;
        }
        (self.bits[index / 64] >> (index % 64)) & 1 == 1
    }

    /// Iterates over dirty indices in the order they were first marked.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.marked.iter().map(|&index| index as usize)
    }

    /// Clears all dirty flags.
    ///
    /// O(dirty count).
    pub fn clear(&mut self) {
        for &index in &self.marked {
            let index = index as usize;
            self.bits[index / 64] &= !(1u64 << (index % 64));
        }
        self.marked.clear();
    }

    /// Grows the trackable range to `capacity`. Never shrinks.
    pub fn grow(&mut self, capacity: usize) {
        if capacity <= self.capacity {
            return;
        }
        self.bits.resize(capacity.div_ceil(64), 0);
        self.capacity = capacity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_idempotent() {
        let mut set = DirtySet::new(128);
        assert!(set.insert(5));
        assert!(!set.insert(5));
        assert!(set.insert(64));
        assert_eq!(set.len(), 2);
        assert!(set.contains(5));
        assert!(set.contains(64));
        assert!(!set.contains(6));
        assert!(!set.contains(10_000));
    }

    #[test]
    fn test_iter_then_clear_empties_set() {
        let mut set = DirtySet::new(256);
        for index in [200, 3, 77] {
            set.insert(index);
        }
        let marked: Vec<usize> = set.iter().collect();
        assert_eq!(marked, vec![200, 3, 77]);
        set.clear();
        assert!(set.is_empty());
        assert!(!set.contains(3));

        // Re-marking after a clear works again
        assert!(set.insert(3));
    }

    #[test]
    fn test_clear() {
        let mut set = DirtySet::new(64);
        set.insert(0);
        set.insert(63);
        set.clear();
        assert!(set.is_empty());
        assert!(!set.contains(63));
        assert_eq!(set.iter().count(), 0);
    }

    #[test]
    fn test_grow_keeps_marks() {
        let mut set = DirtySet::new(10);
        set.insert(9);
        set.grow(1000);
        assert_eq!(set.capacity(), 1000);
        assert!(set.contains(9));
        assert!(set.insert(999));
        set.grow(5);
        assert_eq!(set.capacity(), 1000);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_insert_beyond_capacity_panics() {
        let mut set = DirtySet::new(8);
        set.insert(8);
    }
}
