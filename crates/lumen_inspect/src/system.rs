//! # Scheduler Integration
//!
//! [`WorldDebugSystem`] wires a [`LabelSynchronizer`] into a
//! [`Systems`](lumen_core::Systems) group: it subscribes during `init` and
//! flushes labels on every `run`.

use lumen_core::{CoreResult, System, Worlds};
use tracing::warn;

use crate::config::SyncConfig;
use crate::observer::{LabelObserver, NullObserver};
use crate::synchronizer::{LabelSynchronizer, SharedSynchronizer, TickStats};

/// System keeping the labels of one world up to date.
pub struct WorldDebugSystem {
    config: SyncConfig,
    observer: Option<Box<dyn LabelObserver>>,
    synchronizer: Option<SharedSynchronizer>,
    last_tick: TickStats,
}

impl WorldDebugSystem {
    /// Creates the system. Nothing is subscribed until `init`.
    #[must_use]
    pub fn new(config: SyncConfig, observer: impl LabelObserver + 'static) -> Self {
        Self {
            config,
            observer: Some(Box::new(observer)),
            synchronizer: None,
            last_tick: TickStats::default(),
        }
    }

    /// The synchronizer, once initialized.
    #[must_use]
    pub fn synchronizer(&self) -> Option<&SharedSynchronizer> {
        self.synchronizer.as_ref()
    }

    /// Stats of the most recent `run`.
    #[must_use]
    pub const fn last_tick(&self) -> TickStats {
        self.last_tick
    }
}

impl System for WorldDebugSystem {
    fn init(&mut self, worlds: &mut Worlds) -> CoreResult<()> {
        // A second init after destroy has no observer left to hand over
        let observer: Box<dyn LabelObserver> = match self.observer.take() {
            Some(observer) => observer,
            None => Box::new(NullObserver),
        };
        let synchronizer = LabelSynchronizer::initialize(worlds, self.config.clone(), observer)?;
        self.synchronizer = Some(synchronizer);
        Ok(())
    }

    fn run(&mut self, worlds: &mut Worlds) {
        let Some(synchronizer) = &self.synchronizer else {
            return;
        };
        match worlds.get(self.config.world.as_deref()) {
            Some(world) => self.last_tick = synchronizer.lock().tick(world),
            None => warn!(world = ?self.config.world, "observed world disappeared"),
        }
    }

    fn destroy(&mut self, worlds: &mut Worlds) {
        let Some(synchronizer) = self.synchronizer.take() else {
            return;
        };
        let mut synchronizer = synchronizer.lock();
        match worlds.get_mut(self.config.world.as_deref()) {
            Some(world) => {
                synchronizer.detach(world);
            }
            None => synchronizer.release(),
        }
    }
}
