//! # Presentation Seam
//!
//! The synchronizer never renders anything itself. Whatever presents labels
//! to a developer (an editor hierarchy, an overlay, a log) implements
//! [`LabelObserver`] and is told about every change.

use std::sync::Arc;

use lumen_core::EntityId;
use parking_lot::Mutex;
use tracing::debug;

/// Receiver of label updates.
pub trait LabelObserver: Send {
    /// The label of `entity` now reads `label`.
    ///
    /// Only called when the text actually changed.
    fn on_label_changed(&mut self, entity: EntityId, label: &str);

    /// The slot of `entity` was shown (`true`, entity created) or hidden
    /// (`false`, entity destroyed).
    fn on_visibility_changed(&mut self, entity: EntityId, visible: bool) {
        let _ = (entity, visible);
    }
}

impl<T: LabelObserver + ?Sized> LabelObserver for Box<T> {
    fn on_label_changed(&mut self, entity: EntityId, label: &str) {
        (**self).on_label_changed(entity, label);
    }

    fn on_visibility_changed(&mut self, entity: EntityId, visible: bool) {
        (**self).on_visibility_changed(entity, visible);
    }
}

impl<T: LabelObserver + ?Sized> LabelObserver for Arc<Mutex<T>> {
    fn on_label_changed(&mut self, entity: EntityId, label: &str) {
        self.lock().on_label_changed(entity, label);
    }

    fn on_visibility_changed(&mut self, entity: EntityId, visible: bool) {
        self.lock().on_visibility_changed(entity, visible);
    }
}

/// Observer that discards every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl LabelObserver for NullObserver {
    fn on_label_changed(&mut self, _entity: EntityId, _label: &str) {}
}

/// Observer that reports label changes through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl LabelObserver for TracingObserver {
    fn on_label_changed(&mut self, entity: EntityId, label: &str) {
        debug!(target: "lumen::labels", %entity, label, "label changed");
    }

    fn on_visibility_changed(&mut self, entity: EntityId, visible: bool) {
        debug!(target: "lumen::labels", %entity, visible, "label visibility");
    }
}

/// One recorded notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelNotice {
    /// From [`LabelObserver::on_label_changed`].
    Changed(EntityId, String),
    /// From [`LabelObserver::on_visibility_changed`].
    Visibility(EntityId, bool),
}

/// Observer that records every notification, in order.
#[derive(Debug, Default)]
pub struct LabelLog {
    /// Notifications in delivery order.
    pub notices: Vec<LabelNotice>,
}

impl LabelLog {
    /// Creates an empty log wrapped for sharing with a synchronizer.
    #[must_use]
    pub fn shared() -> Arc<Mutex<Self>> {
        Arc::new(Mutex::new(Self::default()))
    }

    /// Takes all recorded notices, leaving the log empty.
    pub fn drain(&mut self) -> Vec<LabelNotice> {
        std::mem::take(&mut self.notices)
    }

    /// Only the label changes, dropping visibility notices.
    pub fn drain_changes(&mut self) -> Vec<(EntityId, String)> {
        self.drain()
            .into_iter()
            .filter_map(|notice| match notice {
                LabelNotice::Changed(entity, label) => Some((entity, label)),
                LabelNotice::Visibility(..) => None,
            })
            .collect()
    }
}

impl LabelObserver for LabelLog {
    fn on_label_changed(&mut self, entity: EntityId, label: &str) {
        self.notices.push(LabelNotice::Changed(entity, label.to_owned()));
    }

    fn on_visibility_changed(&mut self, entity: EntityId, visible: bool) {
        self.notices.push(LabelNotice::Visibility(entity, visible));
    }
}
