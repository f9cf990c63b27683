//! Selectable in-memory collections for saved addresses and payment
//! methods.
//!
//! Both registries share one lifecycle: entries are appended with a
//! freshly generated unique id and auto-selected, deletion re-targets
//! the selection pointer, and the pointer is only ever `""` or the id
//! of an existing entry.

use corner_market_core::{Address, PaymentMethod};

/// An entry identified by a string id.
pub trait Keyed {
    fn id(&self) -> &str;
}

impl Keyed for Address {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Keyed for PaymentMethod {
    fn id(&self) -> &str {
        &self.id
    }
}

/// An append/remove collection with a selection pointer.
#[derive(Debug, Clone)]
pub struct Registry<T> {
    entries: Vec<T>,
    selected_id: String,
}

impl<T: Keyed> Registry<T> {
    /// Create a registry from initial entries; the first entry (if any)
    /// starts selected.
    #[must_use]
    pub fn new(entries: Vec<T>) -> Self {
        let selected_id = entries.first().map(Keyed::id).unwrap_or_default().to_string();
        Self {
            entries,
            selected_id,
        }
    }

    /// Append an entry and select it.
    pub fn add(&mut self, entry: T) {
        self.selected_id = entry.id().to_string();
        self.entries.push(entry);
    }

    /// Remove an entry by id. If the removed id was selected, the
    /// pointer re-targets to the first remaining entry, or `""` when
    /// none remain. Returns whether an entry was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id() != id);
        let removed = self.entries.len() != before;

        if removed && self.selected_id == id {
            self.selected_id = self
                .entries
                .first()
                .map(Keyed::id)
                .unwrap_or_default()
                .to_string();
        }
        removed
    }

    /// Point the selection at an existing entry. Selecting an unknown
    /// id is ignored, preserving the pointer invariant.
    pub fn select(&mut self, id: &str) {
        if self.entries.iter().any(|entry| entry.id() == id) {
            self.selected_id = id.to_string();
        }
    }

    /// The currently selected entry, resolved against the live
    /// collection. A stale or empty pointer yields `None`.
    #[must_use]
    pub fn selected(&self) -> Option<&T> {
        self.entries
            .iter()
            .find(|entry| entry.id() == self.selected_id)
    }

    /// The raw selection pointer (`""` when nothing is selected).
    #[must_use]
    pub fn selected_id(&self) -> &str {
        &self.selected_id
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Keyed> Default for Registry<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
