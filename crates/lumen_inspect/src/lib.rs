//! # LUMEN Inspect
//!
//! Human-readable labels for the entities of a [`lumen_core::World`], for
//! editors and debug overlays.
//!
//! Two label sources:
//! - **Baked**: `0000002A:Position:Velocity`, the entity index in hex plus
//!   the types attached to it, recomputed lazily after structural changes.
//! - **Explicit**: whatever the entity's [`DebugName`] says.
//!
//! ## Example
//!
//! ```rust
//! use lumen_core::{Component, World};
//! use lumen_inspect::{LabelLog, LabelSynchronizer, SyncConfig};
//!
//! struct Position;
//! impl Component for Position {
//!     fn type_name() -> &'static str { "Position" }
//! }
//!
//! let mut world = World::new(16);
//! let log = LabelLog::shared();
//! let sync = LabelSynchronizer::attach(&mut world, SyncConfig::baked(), log.clone()).unwrap();
//!
//! let entity = world.spawn();
//! world.add(entity, Position).unwrap();
//! sync.lock().tick(&world);
//!
//! assert_eq!(sync.lock().label(entity), Some("00000000:Position"));
//! assert_eq!(log.lock().drain_changes(), vec![(entity, "00000000:Position".to_owned())]);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod dirty;
pub mod error;
pub mod label;
pub mod name;
pub mod naming;
pub mod observer;
pub mod synchronizer;
pub mod system;

pub use config::{LabelMode, SyncConfig};
pub use dirty::DirtySet;
pub use error::{InspectError, InspectResult};
pub use label::{LabelEntry, LabelTable};
pub use name::{DebugName, DebugNaming};
pub use observer::{LabelLog, LabelNotice, LabelObserver, NullObserver, TracingObserver};
pub use synchronizer::{LabelSynchronizer, SharedSynchronizer, TickStats};
pub use system::WorldDebugSystem;
