//! # Systems & World Registry
//!
//! A [`Systems`] group owns a [`Worlds`] registry and a list of boxed
//! [`System`]s. The host drives it:
//!
//! ```text
//! Systems::init()     once, in registration order (may fail)
//! Systems::run()      once per frame/tick, in registration order
//! Systems::destroy()  once; systems first, then every world
//! ```

use std::collections::HashMap;

use tracing::debug;

use crate::ecs::World;
use crate::error::{CoreError, CoreResult};

/// Registry of one default world plus any number of named worlds.
pub struct Worlds {
    default: World,
    named: HashMap<String, World>,
}

impl Worlds {
    /// Creates a registry around the default world.
    #[must_use]
    pub fn new(default: World) -> Self {
        Self {
            default,
            named: HashMap::new(),
        }
    }

    /// Registers a world under `name`, returning any world it replaces.
    pub fn insert(&mut self, name: impl Into<String>, world: World) -> Option<World> {
        self.named.insert(name.into(), world)
    }

    /// Looks a world up. `None` selects the default world.
    #[must_use]
    pub fn get(&self, name: Option<&str>) -> Option<&World> {
        match name {
            None => Some(&self.default),
            Some(name) => self.named.get(name),
        }
    }

    /// Looks a world up mutably. `None` selects the default world.
    pub fn get_mut(&mut self, name: Option<&str>) -> Option<&mut World> {
        match name {
            None => Some(&mut self.default),
            Some(name) => self.named.get_mut(name),
        }
    }

    /// Like [`Worlds::get_mut`], but a missing world is an error.
    ///
    /// # Errors
    ///
    /// [`CoreError::WorldNotFound`] if no world is registered under `name`.
    pub fn require_mut(&mut self, name: Option<&str>) -> CoreResult<&mut World> {
        self.get_mut(name)
            .ok_or_else(|| CoreError::WorldNotFound(name.unwrap_or_default().to_owned()))
    }

    /// The default world.
    #[must_use]
    pub fn default_world(&self) -> &World {
        &self.default
    }

    /// The default world, mutably.
    pub fn default_world_mut(&mut self) -> &mut World {
        &mut self.default
    }

    /// Destroys every world, named ones first.
    pub fn destroy_all(&mut self) {
        for world in self.named.values_mut() {
            world.destroy();
        }
        self.default.destroy();
    }
}

/// A unit of per-tick logic driven by [`Systems`].
pub trait System {
    /// Called once before the first [`System::run`].
    ///
    /// # Errors
    ///
    /// Returning an error aborts [`Systems::init`]; it is not retried.
    fn init(&mut self, worlds: &mut Worlds) -> CoreResult<()> {
        let _ = worlds;
        Ok(())
    }

    /// Called once per tick.
    fn run(&mut self, worlds: &mut Worlds);

    /// Called once when the group is torn down, before worlds are destroyed.
    fn destroy(&mut self, worlds: &mut Worlds) {
        let _ = worlds;
    }
}

/// An ordered group of systems sharing one world registry.
pub struct Systems {
    worlds: Worlds,
    systems: Vec<Box<dyn System>>,
    initialized: bool,
}

impl Systems {
    /// Creates an empty group around `worlds`.
    #[must_use]
    pub fn new(worlds: Worlds) -> Self {
        Self {
            worlds,
            systems: Vec::new(),
            initialized: false,
        }
    }

    /// Appends a system. Systems run in the order they were added.
    pub fn add(&mut self, system: impl System + 'static) -> &mut Self {
        self.systems.push(Box::new(system));
        self
    }

    /// Initializes every system in order.
    ///
    /// # Errors
    ///
    /// Returns the first system error; later systems are not initialized.
    pub fn init(&mut self) -> CoreResult<()> {
        for system in &mut self.systems {
            system.init(&mut self.worlds)?;
        }
        self.initialized = true;
        debug!(systems = self.systems.len(), "systems initialized");
        Ok(())
    }

    /// Runs one tick of every system.
    ///
    /// # Panics
    ///
    /// Panics if called before a successful [`Systems::init`].
    pub fn run(&mut self) {
        assert!(self.initialized, "Systems::run called before init");
        for system in &mut self.systems {
            system.run(&mut self.worlds);
        }
    }

    /// Tears down every system, then every world.
    pub fn destroy(&mut self) {
        for system in &mut self.systems {
            system.destroy(&mut self.worlds);
        }
        self.systems.clear();
        self.worlds.destroy_all();
        self.initialized = false;
    }

    /// The world registry.
    #[must_use]
    pub fn worlds(&self) -> &Worlds {
        &self.worlds
    }

    /// The world registry, mutably.
    pub fn worlds_mut(&mut self) -> &mut Worlds {
        &mut self.worlds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Spawner {
        world: Option<&'static str>,
    }

    impl System for Spawner {
        fn init(&mut self, worlds: &mut Worlds) -> CoreResult<()> {
            worlds.require_mut(self.world).map(|_| ())
        }

        fn run(&mut self, worlds: &mut Worlds) {
            if let Some(world) = worlds.get_mut(self.world) {
                world.spawn();
            }
        }
    }

    #[test]
    fn test_lookup_default_and_named() {
        let mut worlds = Worlds::new(World::new(4));
        worlds.insert("events", World::named("events", 4));
        assert!(worlds.get(None).is_some());
        assert_eq!(worlds.get(Some("events")).and_then(World::name), Some("events"));
        assert!(worlds.get(Some("missing")).is_none());
        assert_eq!(
            worlds.require_mut(Some("missing")).err(),
            Some(CoreError::WorldNotFound("missing".into()))
        );
    }

    #[test]
    fn test_run_ticks_every_system() {
        let mut worlds = Worlds::new(World::new(4));
        worlds.insert("events", World::new(4));
        let mut systems = Systems::new(worlds);
        systems
            .add(Spawner { world: None })
            .add(Spawner { world: Some("events") });
        systems.init().unwrap();

        systems.run();
        systems.run();

        assert_eq!(systems.worlds().default_world().alive_count(), 2);
        assert_eq!(systems.worlds().get(Some("events")).unwrap().alive_count(), 2);
    }

    #[test]
    fn test_init_fails_for_missing_world() {
        let mut systems = Systems::new(Worlds::new(World::new(4)));
        systems.add(Spawner { world: Some("nowhere") });
        assert_eq!(
            systems.init(),
            Err(CoreError::WorldNotFound("nowhere".into()))
        );
    }

    #[test]
    fn test_destroy_tears_down_worlds() {
        let mut systems = Systems::new(Worlds::new(World::new(4)));
        systems.add(Spawner { world: None });
        systems.init().unwrap();
        systems.run();
        systems.destroy();
        assert!(systems.worlds().default_world().is_destroyed());
    }
}
