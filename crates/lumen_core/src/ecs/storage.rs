//! # Component Storage
//!
//! Sparse, index-addressed component storage.
//!
//! The storage uses a slot array strategy:
//! - One slot per entity index, `None` when the component is absent
//! - Access is O(1) via entity index
//! - Slots grow together with the world and never shrink

use super::component::{Component, ComponentInfo};
use std::any::Any;

/// Storage for a single component type.
///
/// # Example
///
/// ```rust
/// use lumen_core::{Component, ComponentStorage};
///
/// struct Tag;
/// impl Component for Tag {}
///
/// let mut storage: ComponentStorage<Tag> = ComponentStorage::new(16);
/// storage.insert(3, Tag);
/// assert!(storage.contains(3));
/// ```
pub struct ComponentStorage<C: Component> {
    /// One slot per entity index.
    slots: Vec<Option<C>>,
    /// Number of occupied slots.
    len: usize,
}

impl<C: Component> ComponentStorage<C> {
    /// Creates new component storage with the specified capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self { slots, len: 0 }
    }

    /// Returns the number of slots (entity capacity) of this storage.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of entities holding this component.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no entity holds this component.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Checks whether the slot at `index` holds a component.
    #[inline]
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        matches!(self.slots.get(index), Some(Some(_)))
    }

    /// Gets a component by entity index.
    ///
    /// Returns `None` if the slot is empty or out of bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&C> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Gets a mutable component by entity index.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut C> {
        self.slots.get_mut(index).and_then(Option::as_mut)
    }

    /// Stores `component` at `index`, returning the previous value.
    ///
    /// # Panics
    ///
    /// Panics if `index` is beyond the storage capacity. The world grows
    /// every storage before handing out a new index.
    pub fn insert(&mut self, index: usize, component: C) -> Option<C> {
        assert!(
            index < self.slots.len(),
            "component slot {index} out of range (capacity {})",
            self.slots.len()
        );
        let previous = self.slots[index].replace(component);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    /// Removes and returns the component at `index`.
    pub fn remove(&mut self, index: usize) -> Option<C> {
        let removed = self.slots.get_mut(index).and_then(Option::take);
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Grows the storage to `capacity` slots. Never shrinks.
    pub fn grow(&mut self, capacity: usize) {
        if capacity > self.slots.len() {
            self.slots.resize_with(capacity, || None);
        }
    }

    /// Iterates over occupied slots with their indices.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &C)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|c| (index, c)))
    }
}

/// Type-erased view of a [`ComponentStorage`], used by the world to manage
/// every pool uniformly.
pub(crate) trait ErasedStorage: Send + Sync {
    fn info(&self) -> ComponentInfo;
    fn contains_index(&self, index: usize) -> bool;
    fn remove_index(&mut self, index: usize) -> bool;
    fn grow_to(&mut self, capacity: usize);
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<C: Component> ErasedStorage for ComponentStorage<C> {
    fn info(&self) -> ComponentInfo {
        ComponentInfo::of::<C>()
    }

    fn contains_index(&self, index: usize) -> bool {
        self.contains(index)
    }

    fn remove_index(&mut self, index: usize) -> bool {
        self.remove(index).is_some()
    }

    fn grow_to(&mut self, capacity: usize) {
        self.grow(capacity);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Position(i32);
    impl Component for Position {}

    #[test]
    fn test_storage_creation() {
        let storage: ComponentStorage<Position> = ComponentStorage::new(1000);
        assert_eq!(storage.capacity(), 1000);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_storage_insert_get_remove() {
        let mut storage: ComponentStorage<Position> = ComponentStorage::new(100);

        assert!(storage.insert(50, Position(1)).is_none());
        assert_eq!(storage.insert(50, Position(2)), Some(Position(1)));
        assert_eq!(storage.len(), 1);
        assert_eq!(storage.get(50), Some(&Position(2)));

        assert_eq!(storage.remove(50), Some(Position(2)));
        assert!(storage.remove(50).is_none());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_storage_bounds() {
        let storage: ComponentStorage<Position> = ComponentStorage::new(100);
        assert!(storage.get(100).is_none());
        assert!(storage.get(99).is_none());
        assert!(!storage.contains(1000));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_insert_out_of_range_panics() {
        let mut storage: ComponentStorage<Position> = ComponentStorage::new(4);
        storage.insert(4, Position(0));
    }

    #[test]
    fn test_grow_preserves_and_never_shrinks() {
        let mut storage: ComponentStorage<Position> = ComponentStorage::new(2);
        storage.insert(1, Position(7));
        storage.grow(8);
        assert_eq!(storage.capacity(), 8);
        assert_eq!(storage.get(1), Some(&Position(7)));
        storage.grow(4);
        assert_eq!(storage.capacity(), 8);
    }

    #[test]
    fn test_iter_skips_empty_slots() {
        let mut storage: ComponentStorage<Position> = ComponentStorage::new(10);
        storage.insert(2, Position(2));
        storage.insert(7, Position(7));
        let indices: Vec<usize> = storage.iter().map(|(i, _)| i).collect();
        assert_eq!(indices, vec![2, 7]);

        storage.remove(2);
        storage.remove(7);
        assert!(storage.is_empty());
        assert_eq!(storage.iter().count(), 0);
    }
}
