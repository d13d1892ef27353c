//! # Label Table
//!
//! One label slot per entity index, sized to the world's capacity.
//!
//! A slot is created the first time an entity spawns at its index and is
//! never freed afterwards: destroying the entity only hides it, so the next
//! entity reusing the index reactivates the same slot without allocating.

use lumen_core::EntityId;

/// Displayed label of one entity slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelEntry {
    text: String,
    generation: u32,
    active: bool,
}

impl LabelEntry {
    /// The currently displayed text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Generation of the entity the slot was last activated for.
    #[must_use]
    pub const fn generation(&self) -> u32 {
        self.generation
    }

    /// Whether the slot is shown (its entity is alive).
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }
}

/// Label slots indexed by entity index.
#[derive(Debug, Clone, Default)]
pub struct LabelTable {
    entries: Vec<Option<LabelEntry>>,
    active: usize,
}

impl LabelTable {
    /// Creates a table with `len` empty slots.
    #[must_use]
    pub fn new(len: usize) -> Self {
        let mut entries = Vec::with_capacity(len);
        entries.resize_with(len, || None);
        Self { entries, active: 0 }
    }

    /// Number of slots. Always at least the world's capacity.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of active slots.
    #[must_use]
    pub const fn active_count(&self) -> usize {
        self.active
    }

    /// Grows the table to `len` slots, preserving entries. Never shrinks.
    pub fn grow(&mut self, len: usize) {
        if len > self.entries.len() {
            self.entries.resize_with(len, || None);
        }
    }

    /// Returns the slot at `index`, `None` if no entity ever lived there.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`LabelTable::len`].
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&LabelEntry> {
        self.check(index);
        self.entries[index].as_ref()
    }

    /// Activates the slot for `id`, creating it on first use.
    ///
    /// Returns `true` if the slot was hidden or new.
    ///
    /// # Panics
    ///
    /// Panics if the index is not below [`LabelTable::len`].
    pub fn activate(&mut self, id: EntityId) -> bool {
        self.check(id.slot());
        let entry = self.entries[id.slot()].get_or_insert_with(LabelEntry::default);
        entry.generation = id.generation();
        if entry.active {
            return false;
        }
        entry.active = true;
        self.active += 1;
        true
    }

    /// Hides the slot at `index`, keeping its text.
    ///
    /// Returns `true` if the slot was active.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`LabelTable::len`].
    pub fn deactivate(&mut self, index: usize) -> bool {
        self.check(index);
        match &mut self.entries[index] {
            Some(entry) if entry.active => {
                entry.active = false;
                self.active -= 1;
                true
            }
            _ => false,
        }
    }

    /// Replaces the text of an existing slot.
    ///
    /// Returns `true` if the text changed; `false` if it was identical or
    /// the slot was never created.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`LabelTable::len`].
    pub fn set_text(&mut self, index: usize, text: &str) -> bool {
        self.check(index);
        match &mut self.entries[index] {
            Some(entry) if entry.text != text => {
                entry.text.clear();
                entry.text.push_str(text);
                true
            }
            _ => false,
        }
    }

    fn check(&self, index: usize) {
        assert!(
            index < self.entries.len(),
            "label slot {index} out of range (len {}); world grew without a resize event",
            self.entries.len()
        );
    }
}
