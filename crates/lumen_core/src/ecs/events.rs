//! # World Lifecycle Events
//!
//! Listeners registered on a [`World`](super::World) are notified
//! synchronously, in registration order, as the world mutates.
//!
//! ```text
//! spawn()          ──► [on_world_resized(new)] ──► on_entity_created(id)
//! add / remove     ──► on_entity_changed(id)
//! despawn()        ──► on_entity_destroyed(id)
//! destroy()        ──► on_world_destroyed()  ──► listeners dropped
//! ```

use super::entity::EntityId;
use parking_lot::Mutex;
use std::sync::Arc;

/// Receiver of world lifecycle notifications.
///
/// Handlers must not call back into the world that notifies them; events
/// are delivered while the world is mid-mutation.
pub trait WorldEventListener: Send {
    /// A new entity was spawned.
    fn on_entity_created(&mut self, entity: EntityId);

    /// An entity was despawned. Its index may be reused later with a
    /// higher generation.
    fn on_entity_destroyed(&mut self, entity: EntityId);

    /// A component was added to or removed from the entity.
    fn on_entity_changed(&mut self, entity: EntityId);

    /// The world grew its entity capacity to `new_size` slots.
    fn on_world_resized(&mut self, new_size: usize);

    /// The world is being torn down. No further events follow.
    fn on_world_destroyed(&mut self);
}

/// Shared handle to a registered listener.
pub type SharedListener = Arc<Mutex<dyn WorldEventListener>>;

/// Handle returned by [`World::add_listener`](super::World::add_listener),
/// used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u32);

/// A lifecycle event as a value.
///
/// Useful for listeners that buffer events instead of reacting in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorldEvent {
    /// See [`WorldEventListener::on_entity_created`].
    EntityCreated(EntityId),
    /// See [`WorldEventListener::on_entity_destroyed`].
    EntityDestroyed(EntityId),
    /// See [`WorldEventListener::on_entity_changed`].
    EntityChanged(EntityId),
    /// See [`WorldEventListener::on_world_resized`].
    WorldResized(usize),
    /// See [`WorldEventListener::on_world_destroyed`].
    WorldDestroyed,
}

impl WorldEvent {
    /// Delivers this event to `listener`.
    pub fn dispatch(self, listener: &mut dyn WorldEventListener) {
        match self {
            Self::EntityCreated(id) => listener.on_entity_created(id),
            Self::EntityDestroyed(id) => listener.on_entity_destroyed(id),
            Self::EntityChanged(id) => listener.on_entity_changed(id),
            Self::WorldResized(size) => listener.on_world_resized(size),
            Self::WorldDestroyed => listener.on_world_destroyed(),
        }
    }
}

/// Listener that records every event it receives.
#[derive(Debug, Default)]
pub struct EventLog {
    /// Events in delivery order.
    pub events: Vec<WorldEvent>,
}

impl EventLog {
    /// Creates an empty log wrapped as a shareable listener.
    #[must_use]
    pub fn shared() -> Arc<Mutex<Self>> {
        Arc::new(Mutex::new(Self::default()))
    }

    /// Takes all recorded events, leaving the log empty.
    pub fn drain(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.events)
    }
}

impl WorldEventListener for EventLog {
    fn on_entity_created(&mut self, entity: EntityId) {
        self.events.push(WorldEvent::EntityCreated(entity));
    }

    fn on_entity_destroyed(&mut self, entity: EntityId) {
        self.events.push(WorldEvent::EntityDestroyed(entity));
    }

    fn on_entity_changed(&mut self, entity: EntityId) {
        self.events.push(WorldEvent::EntityChanged(entity));
    }

    fn on_world_resized(&mut self, new_size: usize) {
        self.events.push(WorldEvent::WorldResized(new_size));
    }

    fn on_world_destroyed(&mut self) {
        self.events.push(WorldEvent::WorldDestroyed);
    }
}
