//! # Label Synchronizer
//!
//! Keeps one display label per entity consistent with the world.
//!
//! ```text
//! world mutation ──► lifecycle event ──► synchronizer
//!                                          │ baked:    mark index dirty
//!                                          │ explicit: nothing (reads DebugName.changed)
//!                                          ▼
//! host tick ───────────────────────────► tick(world)
//!                                          │ rewrite labels
//!                                          ▼
//!                                     LabelObserver::on_label_changed
//! ```
//!
//! Baked labels read the component list at flush time, not when the entity
//! was marked, so several changes within one tick cost one recomputation.
//!
//! Explicit mode only reads `DebugName.changed`. The flag belongs to the
//! code that writes names and may have other readers, so any number of
//! synchronizers can follow the same world.
//!
//! ## Locking
//!
//! The world notifies the synchronizer through its shared handle. Never hold
//! the handle's lock while mutating the world it observes.

use std::path::Path;
use std::sync::Arc;

use lumen_core::{CoreError, CoreResult, EntityId, ListenerId, World, WorldEventListener, Worlds};
use parking_lot::Mutex;
use tracing::{debug, info, trace};

use crate::config::{LabelMode, SyncConfig};
use crate::dirty::DirtySet;
use crate::error::InspectResult;
use crate::label::{LabelEntry, LabelTable};
use crate::name::DebugName;
use crate::naming::{write_baked_label, CleanNames};
use crate::observer::LabelObserver;

/// Synchronizer shared between the world (as a listener) and the scheduler.
pub type SharedSynchronizer = Arc<Mutex<LabelSynchronizer>>;

/// Work done by one [`LabelSynchronizer::tick`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Dirty entries (baked) or flagged names (explicit) processed.
    pub entries_flushed: usize,
    /// Labels whose text actually changed.
    pub labels_updated: usize,
}

/// Maintains per-entity labels for one world.
pub struct LabelSynchronizer {
    world_name: Option<String>,
    mode: LabelMode,
    labels: LabelTable,
    dirty: DirtySet,
    observer: Box<dyn LabelObserver>,
    listener: Option<ListenerId>,
    released: bool,
    /// Reused component-name buffer.
    type_names: Vec<&'static str>,
    /// Reused label buffer.
    scratch: String,
    clean_names: CleanNames,
}

impl LabelSynchronizer {
    /// Creates a synchronizer that is not subscribed to any world.
    ///
    /// Lifecycle events must then be delivered by hand through
    /// [`WorldEventListener`]. Most callers want [`LabelSynchronizer::initialize`].
    #[must_use]
    pub fn new(config: &SyncConfig, capacity: usize, observer: Box<dyn LabelObserver>) -> Self {
        let capacity = capacity.max(config.initial_capacity_hint);
        Self {
            world_name: config.world.clone(),
            mode: config.mode,
            labels: LabelTable::new(capacity),
            dirty: DirtySet::new(capacity),
            observer,
            listener: None,
            released: false,
            type_names: Vec::new(),
            scratch: String::new(),
            clean_names: CleanNames::default(),
        }
    }

    /// Binds to the world named by `config`, sizes the label table to its
    /// capacity and subscribes to its lifecycle events.
    ///
    /// # Errors
    ///
    /// [`CoreError::WorldNotFound`] if the registry has no such world. This
    /// is a configuration error and is not retried.
    pub fn initialize(
        worlds: &mut Worlds,
        config: SyncConfig,
        observer: impl LabelObserver + 'static,
    ) -> CoreResult<SharedSynchronizer> {
        let world = worlds.require_mut(config.world.as_deref())?;
        Self::attach(world, config, observer)
    }

    /// Reads a TOML configuration file, then initializes from it.
    ///
    /// # Errors
    ///
    /// Any [`InspectError`](crate::InspectError): unreadable or invalid
    /// configuration, or a missing world.
    pub fn initialize_from_file(
        worlds: &mut Worlds,
        path: impl AsRef<Path>,
        observer: impl LabelObserver + 'static,
    ) -> InspectResult<SharedSynchronizer> {
        let config = SyncConfig::from_file(path)?;
        Ok(Self::initialize(worlds, config, observer)?)
    }

    /// Like [`LabelSynchronizer::initialize`], for a world the caller holds
    /// directly. Entities already alive are adopted as if just created; in
    /// explicit mode their current [`DebugName`] is taken over whether or
    /// not its `changed` flag is still raised.
    ///
    /// # Errors
    ///
    /// [`CoreError::WorldDestroyed`] if the world was torn down.
    pub fn attach(
        world: &mut World,
        config: SyncConfig,
        observer: impl LabelObserver + 'static,
    ) -> CoreResult<SharedSynchronizer> {
        if world.is_destroyed() {
            return Err(CoreError::WorldDestroyed);
        }

        let mut sync = Self::new(&config, world.capacity(), Box::new(observer));
        for entity in world.entities() {
            sync.on_entity_created(entity);
        }
        if sync.mode == LabelMode::Explicit {
            sync.adopt_debug_names(world);
        }

        let shared = Arc::new(Mutex::new(sync));
        let handle = world.add_listener(shared.clone());
        shared.lock().listener = Some(handle);

        info!(
            world = ?config.world,
            mode = ?config.mode,
            capacity = world.capacity(),
            adopted = world.alive_count(),
            "label synchronizer attached"
        );
        Ok(shared)
    }

    /// Unsubscribes from `world` and releases all state.
    ///
    /// Returns `false` if the synchronizer was not subscribed to it.
    pub fn detach(&mut self, world: &mut World) -> bool {
        let removed = self
            .listener
            .take()
            .is_some_and(|handle| world.remove_listener(handle));
        self.release();
        removed
    }

    /// Label source.
    #[must_use]
    pub const fn mode(&self) -> LabelMode {
        self.mode
    }

    /// Registry name of the observed world.
    #[must_use]
    pub fn world_name(&self) -> Option<&str> {
        self.world_name.as_deref()
    }

    /// Label for the host's root node of this world.
    #[must_use]
    pub fn world_label(&self) -> String {
        match &self.world_name {
            Some(name) => format!("[ECS-WORLD {name}]"),
            None => "[ECS-WORLD]".to_owned(),
        }
    }

    /// All label slots.
    #[must_use]
    pub const fn labels(&self) -> &LabelTable {
        &self.labels
    }

    /// Slot at `index`, `None` if beyond the table or never used.
    #[must_use]
    pub fn entry(&self, index: usize) -> Option<&LabelEntry> {
        if index >= self.labels.len() {
            return None;
        }
        self.labels.get(index)
    }

    /// Entries pending recomputation (baked mode).
    #[must_use]
    pub const fn dirty(&self) -> &DirtySet {
        &self.dirty
    }

    /// Current label of a live entity.
    ///
    /// `None` if the slot is hidden, belongs to another generation, or the
    /// index is beyond the table.
    #[must_use]
    pub fn label(&self, entity: EntityId) -> Option<&str> {
        self.entry(entity.slot())
            .filter(|entry| entry.is_active() && entry.generation() == entity.generation())
            .map(|entry| entry.text())
    }

    /// Subscription handle, while subscribed.
    #[must_use]
    pub const fn listener(&self) -> Option<ListenerId> {
        self.listener
    }

    /// Returns `true` once the world was destroyed or the synchronizer
    /// detached.
    #[must_use]
    pub const fn is_released(&self) -> bool {
        self.released
    }

    /// Brings labels up to date. Call once per host tick.
    ///
    /// - Baked: every dirty, still active entry gets
    ///   `{index:08X}` + `:{Type}` per attached component; the dirty set is
    ///   emptied.
    /// - Explicit: every [`DebugName`] with `changed` set is copied into its
    ///   entity's label. The flag is left as is; a name that is already
    ///   shown costs one comparison and no notification.
    pub fn tick(&mut self, world: &World) -> TickStats {
        if self.released {
            return TickStats::default();
        }
        let stats = match self.mode {
            LabelMode::Baked => self.flush_dirty(world),
            LabelMode::Explicit => self.copy_debug_names(world),
        };
        if stats.entries_flushed > 0 {
            trace!(
                flushed = stats.entries_flushed,
                updated = stats.labels_updated,
                "labels synchronized"
            );
        }
        stats
    }

    fn flush_dirty(&mut self, world: &World) -> TickStats {
        let mut stats = TickStats::default();

        for index in self.dirty.iter() {
            stats.entries_flushed += 1;
            // Hidden slots keep their last text until the index is reused
            if !self.labels.get(index).is_some_and(LabelEntry::is_active) {
                continue;
            }
            let generation = world.generation(index);

            world.component_type_names(index, &mut self.type_names);
            write_baked_label(
                &mut self.scratch,
                index as u32,
                &self.type_names,
                &mut self.clean_names,
            );
            if self.labels.set_text(index, &self.scratch) {
                stats.labels_updated += 1;
                self.observer
                    .on_label_changed(EntityId::new(index as u32, generation), &self.scratch);
            }
        }
        self.dirty.clear();

        stats
    }

    fn copy_debug_names(&mut self, world: &World) -> TickStats {
        let mut stats = TickStats::default();

        for (entity, name) in world.iter_with::<DebugName>() {
            if !name.changed {
                continue;
            }
            stats.entries_flushed += 1;
            if self.show_name(entity, &name.display_name) {
                stats.labels_updated += 1;
            }
        }

        stats
    }

    fn adopt_debug_names(&mut self, world: &World) {
        for (entity, name) in world.iter_with::<DebugName>() {
            self.show_name(entity, &name.display_name);
        }
    }

    fn show_name(&mut self, entity: EntityId, name: &str) -> bool {
        let changed = self.labels.set_text(entity.slot(), name);
        if changed {
            self.observer.on_label_changed(entity, name);
        }
        changed
    }

    /// Drops all label state and stops reacting to events. Idempotent.
    ///
    /// Does not unsubscribe; use [`LabelSynchronizer::detach`] while the
    /// world is still reachable.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.listener = None;
        self.labels = LabelTable::default();
        self.dirty = DirtySet::default();
        self.type_names = Vec::new();
        self.scratch = String::new();
        self.clean_names = CleanNames::default();
        info!(world = ?self.world_name, "label synchronizer released");
    }
}

impl WorldEventListener for LabelSynchronizer {
    fn on_entity_created(&mut self, entity: EntityId) {
        if self.released {
            return;
        }
        if self.labels.activate(entity) {
            self.observer.on_visibility_changed(entity, true);
        }
        match self.mode {
            LabelMode::Baked => {
                self.dirty.insert(entity.slot());
            }
            LabelMode::Explicit => {
                // A reused slot must not show the previous owner's name
                if self.labels.set_text(entity.slot(), "") {
                    self.observer.on_label_changed(entity, "");
                }
            }
        }
    }

    fn on_entity_destroyed(&mut self, entity: EntityId) {
        if self.released {
            return;
        }
        if self.labels.deactivate(entity.slot()) {
            self.observer.on_visibility_changed(entity, false);
        }
    }

    fn on_entity_changed(&mut self, entity: EntityId) {
        if self.released || self.mode != LabelMode::Baked {
            return;
        }
        self.dirty.insert(entity.slot());
    }

    fn on_world_resized(&mut self, new_size: usize) {
        if self.released {
            return;
        }
        debug!(old = self.labels.len(), new = new_size, "label table grown");
        self.labels.grow(new_size);
        self.dirty.grow(new_size);
    }

    fn on_world_destroyed(&mut self) {
        self.release();
    }
}
