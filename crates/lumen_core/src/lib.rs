//! # LUMEN Core
//!
//! A minimal, observable Entity Component System (ECS):
//! - Generational entity IDs with slot reuse
//! - Per-type component pools reporting attached types in a stable order
//! - Synchronous lifecycle events for inspection tooling
//!
//! ## Example
//!
//! ```rust
//! use lumen_core::{Component, EventLog, World, WorldEvent};
//!
//! struct Position(f32, f32);
//! impl Component for Position {}
//!
//! let mut world = World::new(16);
//! let log = EventLog::shared();
//! world.add_listener(log.clone());
//!
//! let entity = world.spawn();
//! world.add(entity, Position(0.0, 0.0)).unwrap();
//!
//! assert_eq!(
//!     log.lock().drain(),
//!     vec![WorldEvent::EntityCreated(entity), WorldEvent::EntityChanged(entity)]
//! );
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod ecs;
pub mod error;
pub mod systems;

pub use ecs::{
    Component, ComponentInfo, ComponentStorage, EntityId, EntitySlot, EventLog, ListenerId,
    SharedListener, World, WorldEvent, WorldEventListener,
};
pub use error::{CoreError, CoreResult};
pub use systems::{System, Systems, Worlds};
