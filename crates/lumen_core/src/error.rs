//! # Core Error Types
//!
//! All errors that can occur while operating on worlds.

use crate::ecs::EntityId;
use thiserror::Error;

/// Errors that can occur in the ECS core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A system asked for a world that was never registered.
    #[error("cant find required world: {0}")]
    WorldNotFound(String),

    /// The entity is dead or the ID belongs to an older generation.
    #[error("entity {0} is not alive")]
    StaleEntity(EntityId),

    /// The entity already holds a component of this type.
    #[error("entity {entity} already has component {component}")]
    DuplicateComponent {
        /// The entity the component was added to.
        entity: EntityId,
        /// Type name of the component.
        component: &'static str,
    },

    /// The world has been destroyed and accepts no further mutation.
    #[error("world has been destroyed")]
    WorldDestroyed,
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
