//! # Component System
//!
//! Components are plain data records with no behavior. Any `Send + Sync`
//! type can become a component by implementing [`Component`].

use std::any::TypeId;

/// Marker trait for ECS components.
///
/// # Example
///
/// ```rust
/// use lumen_core::Component;
///
/// #[derive(Clone, Copy, Default)]
/// struct Position {
///     x: f32,
///     y: f32,
/// }
///
/// impl Component for Position {}
/// ```
pub trait Component: Send + Sync + 'static {
    /// Full type name used for introspection.
    ///
    /// Defaults to [`std::any::type_name`]; override to present a different
    /// name to inspection tooling.
    #[must_use]
    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Runtime description of a registered component type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ComponentInfo {
    /// Rust type identity.
    pub type_id: TypeId,
    /// Name reported by [`Component::type_name`].
    pub name: &'static str,
}

impl ComponentInfo {
    /// Describes component type `C`.
    #[must_use]
    pub fn of<C: Component>() -> Self {
        Self {
            type_id: TypeId::of::<C>(),
            name: C::type_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Health;
    impl Component for Health {}

    struct Renamed;
    impl Component for Renamed {
        fn type_name() -> &'static str {
            "Alias"
        }
    }

    #[test]
    fn test_default_type_name_is_full_path() {
        let info = ComponentInfo::of::<Health>();
        assert!(info.name.ends_with("Health"));
        assert!(info.name.contains("::"));
        assert_eq!(info.type_id, TypeId::of::<Health>());
    }

    #[test]
    fn test_type_name_override() {
        assert_eq!(ComponentInfo::of::<Renamed>().name, "Alias");
    }
}
