//! # Explicit Debug Names
//!
//! In explicit mode labels come from a [`DebugName`] component rather than
//! from the component set. Writing a name raises its `changed` flag; the
//! synchronizer copies flagged names on its next tick and lowers the flag.
//!
//! ```rust
//! use lumen_core::World;
//! use lumen_inspect::{DebugName, DebugNaming};
//!
//! let mut world = World::new(8);
//! let player = world.spawn_named("Player");
//! assert_eq!(world.get::<DebugName>(player).unwrap().display_name, "Player");
//!
//! world.set_debug_name(player, "Player (dead)").unwrap();
//! assert!(world.get::<DebugName>(player).unwrap().changed);
//! ```

use lumen_core::{Component, CoreResult, EntityId, World};

/// User-supplied display name of an entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebugName {
    /// Text shown for the entity.
    pub display_name: String,
    /// Set whenever `display_name` is written; cleared once the name has
    /// been copied into the entity's label.
    pub changed: bool,
}

impl DebugName {
    /// Creates a name flagged as changed.
    #[must_use]
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            changed: true,
        }
    }

    /// Replaces the name and raises the `changed` flag.
    pub fn set(&mut self, display_name: &str) {
        self.display_name.clear();
        self.display_name.push_str(display_name);
        self.changed = true;
    }
}

impl Component for DebugName {
    fn type_name() -> &'static str {
        "DebugName"
    }
}

/// Naming helpers on [`World`].
pub trait DebugNaming {
    /// Spawns an entity carrying a [`DebugName`].
    fn spawn_named(&mut self, name: &str) -> EntityId;

    /// Writes the debug name of `entity`, attaching a [`DebugName`] first if
    /// it has none.
    ///
    /// # Errors
    ///
    /// [`lumen_core::CoreError::StaleEntity`] if the entity is dead.
    fn set_debug_name(&mut self, entity: EntityId, name: &str) -> CoreResult<()>;
}

impl DebugNaming for World {
    fn spawn_named(&mut self, name: &str) -> EntityId {
        let entity = self.spawn();
        if !entity.is_null() {
            // A freshly spawned entity is alive and holds no DebugName yet
            let _ = self.insert(entity, DebugName::new(name));
        }
        entity
    }

    fn set_debug_name(&mut self, entity: EntityId, name: &str) -> CoreResult<()> {
        self.get_or_insert_with(entity, DebugName::default)?.set(name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::{CoreError, EventLog, WorldEvent};

    #[test]
    fn test_spawn_named_flags_change() {
        let mut world = World::new(4);
        let id = world.spawn_named("Camera");
        let name = world.get::<DebugName>(id).unwrap();
        assert_eq!(name.display_name, "Camera");
        assert!(name.changed);
    }

    #[test]
    fn test_set_debug_name_inserts_then_updates() {
        let mut world = World::new(4);
        let log = EventLog::shared();
        world.add_listener(log.clone());
        let id = world.spawn();

        world.set_debug_name(id, "Crate").unwrap();
        world.get_mut::<DebugName>(id).unwrap().changed = false;
        world.set_debug_name(id, "Crate (open)").unwrap();

        let name = world.get::<DebugName>(id).unwrap();
        assert_eq!(name.display_name, "Crate (open)");
        assert!(name.changed);
        // Only the first write changes the component set
        assert_eq!(
            log.lock().drain(),
            vec![WorldEvent::EntityCreated(id), WorldEvent::EntityChanged(id)]
        );
    }

    #[test]
    fn test_set_debug_name_on_dead_entity() {
        let mut world = World::new(4);
        let id = world.spawn();
        world.despawn(id);
        assert_eq!(
            world.set_debug_name(id, "ghost"),
            Err(CoreError::StaleEntity(id))
        );
    }

    #[test]
    fn test_type_name_is_short() {
        assert_eq!(<DebugName as Component>::type_name(), "DebugName");
    }
}
