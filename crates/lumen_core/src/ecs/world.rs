//! # ECS World
//!
//! The central container for all entities and components.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │ World                                                │
//! │  slots:     [EntitySlot; capacity]  (gen + alive)    │
//! │  free list: indices ready for reuse                  │
//! │  pools:     one ComponentStorage per component type, │
//! │             in registration order                    │
//! │  listeners: lifecycle subscribers                    │
//! └──────────────────────────────────────────────────────┘
//! ```

use std::any::TypeId;
use std::collections::HashMap;

use tracing::{debug, warn};

use super::component::Component;
use super::entity::{EntityId, EntitySlot};
use super::events::{ListenerId, SharedListener, WorldEvent};
use super::storage::{ComponentStorage, ErasedStorage};
use crate::error::{CoreError, CoreResult};

/// The ECS World - container for entities, components and lifecycle
/// listeners.
///
/// # Capacity
///
/// The world starts with the capacity given at creation. When every slot is
/// taken, [`World::spawn`] doubles the capacity, grows every component pool
/// and notifies listeners with `WorldResized` before `EntityCreated`.
///
/// # Example
///
/// ```rust
/// use lumen_core::{Component, World};
///
/// struct Position(f32, f32);
/// impl Component for Position {}
///
/// let mut world = World::new(64);
/// let entity = world.spawn();
/// world.add(entity, Position(1.0, 2.0)).unwrap();
/// assert!(world.has::<Position>(entity));
/// ```
pub struct World {
    /// Optional registry name.
    name: Option<String>,
    /// All entity slots.
    slots: Vec<EntitySlot>,
    /// Free list of entity indices for reuse.
    free_indices: Vec<u32>,
    /// Number of currently alive entities.
    alive_count: usize,
    /// Component pools in registration order.
    pools: Vec<Box<dyn ErasedStorage>>,
    /// Component type → position in `pools`.
    pool_lookup: HashMap<TypeId, usize>,
    /// Lifecycle subscribers in registration order.
    listeners: Vec<(ListenerId, SharedListener)>,
    /// Next listener handle.
    next_listener: u32,
    /// Set once `destroy` ran.
    destroyed: bool,
}

impl World {
    /// Creates a new unnamed world with the specified entity capacity.
    ///
    /// # Panics
    ///
    /// Panics if capacity is zero or exceeds `u32::MAX`.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than zero");
        assert!(
            capacity <= u32::MAX as usize,
            "Capacity cannot exceed u32::MAX"
        );

        Self {
            name: None,
            slots: vec![EntitySlot::default(); capacity],
            // Reversed so the lowest index is handed out first
            free_indices: (0..capacity as u32).rev().collect(),
            alive_count: 0,
            pools: Vec::new(),
            pool_lookup: HashMap::new(),
            listeners: Vec::new(),
            next_listener: 0,
            destroyed: false,
        }
    }

    /// Creates a new world carrying a registry name.
    #[must_use]
    pub fn named(name: impl Into<String>, capacity: usize) -> Self {
        let mut world = Self::new(capacity);
        world.name = Some(name.into());
        world
    }

    /// Returns the world's name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the current entity capacity.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of currently alive entities.
    #[inline]
    #[must_use]
    pub const fn alive_count(&self) -> usize {
        self.alive_count
    }

    /// Returns `true` once [`World::destroy`] ran.
    #[inline]
    #[must_use]
    pub const fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    // =========================================================================
    // Entities
    // =========================================================================

    /// Spawns a new entity, returning its ID.
    ///
    /// Grows the world when no free slot remains.
    ///
    /// # Returns
    ///
    /// The new entity's ID, or `EntityId::NULL` if the world was destroyed
    /// or the index space is exhausted.
    pub fn spawn(&mut self) -> EntityId {
        if self.destroyed {
            warn!("spawn on a destroyed world ignored");
            return EntityId::NULL;
        }

        if self.free_indices.is_empty() && !self.grow() {
            return EntityId::NULL;
        }
        let Some(index) = self.free_indices.pop() else {
            return EntityId::NULL;
        };

        let slot = &mut self.slots[index as usize];
        // Increment generation to invalidate old references; 0 means "never used"
        slot.generation = slot.generation.wrapping_add(1).max(1);
        slot.alive = true;
        let id = slot.id(index);
        self.alive_count += 1;

        self.emit(WorldEvent::EntityCreated(id));
        id
    }

    /// Despawns an entity, dropping its components and freeing its slot for
    /// reuse.
    ///
    /// Components are removed without `EntityChanged` notifications; only
    /// `EntityDestroyed` is emitted.
    ///
    /// # Returns
    ///
    /// `true` if the entity was despawned, `false` if it was already dead
    /// or the ID was invalid/stale.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        if !self.is_alive(id) {
            return false;
        }

        let idx = id.slot();
        for pool in &mut self.pools {
            pool.remove_index(idx);
        }

        self.slots[idx].alive = false;
        self.alive_count -= 1;
        self.free_indices.push(id.index());

        self.emit(WorldEvent::EntityDestroyed(id));
        true
    }

    /// Checks if an entity is alive.
    #[inline]
    #[must_use]
    pub fn is_alive(&self, id: EntityId) -> bool {
        if id.is_null() {
            return false;
        }
        self.slots
            .get(id.slot())
            .is_some_and(|slot| slot.alive && slot.generation == id.generation())
    }

    /// Checks if any entity currently lives at `index`.
    #[inline]
    #[must_use]
    pub fn is_alive_index(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(|slot| slot.alive)
    }

    /// Returns the current generation of the slot at `index`.
    ///
    /// `0` for slots that were never spawned or are out of range.
    #[inline]
    #[must_use]
    pub fn generation(&self, index: usize) -> u32 {
        self.slots.get(index).map_or(0, |slot| slot.generation)
    }

    /// Iterates over all alive entities.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.alive)
            .map(|(index, slot)| slot.id(index as u32))
    }

    /// Doubles the capacity. Returns `false` when the index space is full.
    fn grow(&mut self) -> bool {
        let old = self.slots.len();
        let new = old.saturating_mul(2).min(u32::MAX as usize);
        if new == old {
            warn!(capacity = old, "entity index space exhausted");
            return false;
        }

        self.slots.resize(new, EntitySlot::default());
        self.free_indices.extend((old as u32..new as u32).rev());
        for pool in &mut self.pools {
            pool.grow_to(new);
        }
        debug!(old, new, "world grown");

        self.emit(WorldEvent::WorldResized(new));
        true
    }

    // =========================================================================
    // Components
    // =========================================================================

    /// Registers component type `C`, returning its pool position.
    ///
    /// Pools are created lazily on first use; registering up front fixes the
    /// order in which [`World::component_type_names`] reports types.
    pub fn register<C: Component>(&mut self) -> usize {
        if let Some(&pool) = self.pool_lookup.get(&TypeId::of::<C>()) {
            return pool;
        }
        let pool = self.pools.len();
        self.pools
            .push(Box::new(ComponentStorage::<C>::new(self.slots.len())));
        self.pool_lookup.insert(TypeId::of::<C>(), pool);
        pool
    }

    /// Returns the storage of component type `C`, if registered.
    #[must_use]
    pub fn pool<C: Component>(&self) -> Option<&ComponentStorage<C>> {
        let &pool = self.pool_lookup.get(&TypeId::of::<C>())?;
        self.pools[pool].as_any().downcast_ref()
    }

    fn storage_mut<C: Component>(&mut self) -> &mut ComponentStorage<C> {
        let pool = self.register::<C>();
        self.pools[pool]
            .as_any_mut()
            .downcast_mut()
            .expect("pool registered under a foreign TypeId")
    }

    /// Attaches a component, emitting `EntityChanged`.
    ///
    /// # Errors
    ///
    /// [`CoreError::StaleEntity`] if the entity is dead,
    /// [`CoreError::DuplicateComponent`] if it already holds a `C`.
    pub fn add<C: Component>(&mut self, id: EntityId, component: C) -> CoreResult<()> {
        if !self.is_alive(id) {
            return Err(CoreError::StaleEntity(id));
        }
        let storage = self.storage_mut::<C>();
        if storage.contains(id.slot()) {
            return Err(CoreError::DuplicateComponent {
                entity: id,
                component: C::type_name(),
            });
        }
        storage.insert(id.slot(), component);
        self.emit(WorldEvent::EntityChanged(id));
        Ok(())
    }

    /// Attaches or replaces a component.
    ///
    /// Emits `EntityChanged` only when the entity did not hold a `C` before,
    /// since replacing a value leaves the component set untouched.
    ///
    /// # Errors
    ///
    /// [`CoreError::StaleEntity`] if the entity is dead.
    pub fn insert<C: Component>(&mut self, id: EntityId, component: C) -> CoreResult<Option<C>> {
        if !self.is_alive(id) {
            return Err(CoreError::StaleEntity(id));
        }
        let previous = self.storage_mut::<C>().insert(id.slot(), component);
        if previous.is_none() {
            self.emit(WorldEvent::EntityChanged(id));
        }
        Ok(previous)
    }

    /// Returns the entity's `C`, inserting `make()` first if absent.
    ///
    /// # Errors
    ///
    /// [`CoreError::StaleEntity`] if the entity is dead.
    pub fn get_or_insert_with<C, F>(&mut self, id: EntityId, make: F) -> CoreResult<&mut C>
    where
        C: Component,
        F: FnOnce() -> C,
    {
        if !self.is_alive(id) {
            return Err(CoreError::StaleEntity(id));
        }
        if !self.has::<C>(id) {
            self.storage_mut::<C>().insert(id.slot(), make());
            self.emit(WorldEvent::EntityChanged(id));
        }
        self.storage_mut::<C>()
            .get_mut(id.slot())
            .ok_or(CoreError::StaleEntity(id))
    }

    /// Gets an entity's component.
    #[must_use]
    pub fn get<C: Component>(&self, id: EntityId) -> Option<&C> {
        if !self.is_alive(id) {
            return None;
        }
        self.pool::<C>()?.get(id.slot())
    }

    /// Gets an entity's component mutably.
    ///
    /// Writing through the reference emits nothing.
    pub fn get_mut<C: Component>(&mut self, id: EntityId) -> Option<&mut C> {
        if !self.is_alive(id) {
            return None;
        }
        let &pool = self.pool_lookup.get(&TypeId::of::<C>())?;
        self.pools[pool]
            .as_any_mut()
            .downcast_mut::<ComponentStorage<C>>()?
            .get_mut(id.slot())
    }

    /// Checks whether an entity holds a `C`.
    #[must_use]
    pub fn has<C: Component>(&self, id: EntityId) -> bool {
        self.get::<C>(id).is_some()
    }

    /// Detaches a component, emitting `EntityChanged` if one was present.
    pub fn remove<C: Component>(&mut self, id: EntityId) -> Option<C> {
        if !self.is_alive(id) {
            return None;
        }
        let &pool = self.pool_lookup.get(&TypeId::of::<C>())?;
        let removed = self.pools[pool]
            .as_any_mut()
            .downcast_mut::<ComponentStorage<C>>()?
            .remove(id.slot());
        if removed.is_some() {
            self.emit(WorldEvent::EntityChanged(id));
        }
        removed
    }

    /// Writes the type names of every component attached at `index` into
    /// `out`, in pool registration order, and returns how many were written.
    ///
    /// `out` is cleared first so callers can reuse one buffer across calls.
    pub fn component_type_names(&self, index: usize, out: &mut Vec<&'static str>) -> usize {
        out.clear();
        if self.is_alive_index(index) {
            out.extend(
                self.pools
                    .iter()
                    .filter(|pool| pool.contains_index(index))
                    .map(|pool| pool.info().name),
            );
        }
        out.len()
    }

    /// Iterates over every entity holding a `C`.
    pub fn iter_with<C: Component>(&self) -> impl Iterator<Item = (EntityId, &C)> {
        let slots = &self.slots;
        self.pool::<C>()
            .into_iter()
            .flat_map(ComponentStorage::iter)
            .map(move |(index, component)| (slots[index].id(index as u32), component))
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    /// Subscribes a listener to lifecycle events.
    pub fn add_listener(&mut self, listener: SharedListener) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Unsubscribes a listener. Returns `false` if it was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener, _)| *listener != id);
        self.listeners.len() != before
    }

    /// Returns the number of subscribed listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Tears the world down: notifies listeners with `WorldDestroyed`, then
    /// drops every listener and component pool. Idempotent.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.emit(WorldEvent::WorldDestroyed);
        self.destroyed = true;
        self.listeners.clear();
        self.pools.clear();
        self.pool_lookup.clear();
        for slot in &mut self.slots {
            slot.alive = false;
        }
        self.free_indices.clear();
        self.alive_count = 0;
        debug!(world = ?self.name, "world destroyed");
    }

    fn emit(&self, event: WorldEvent) {
        for (_, listener) in &self.listeners {
            event.dispatch(&mut *listener.lock());
        }
    }
}
