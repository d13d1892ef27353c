//! # Entity Component System
//!
//! A small generational ECS whose only job is to be observable.
//!
//! ## Design Philosophy
//!
//! - Entity IDs are indices with generation counters
//! - Components live in per-type slot arrays, addressed by entity index
//! - Every structural change is announced to lifecycle listeners
//! - Capacity grows by doubling; listeners hear about it before the new
//!   index is handed out

mod component;
mod entity;
mod events;
mod storage;
mod world;

pub use component::{Component, ComponentInfo};
pub use entity::{EntityId, EntitySlot};
pub use events::{EventLog, ListenerId, SharedListener, WorldEvent, WorldEventListener};
pub use storage::ComponentStorage;
pub use world::World;
