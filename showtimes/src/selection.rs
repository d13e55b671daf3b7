//! Bulk selection scoped to the visible page.

use crate::types::ShowtimeId;
use std::collections::BTreeSet;

/// Ids selected for bulk operations
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: BTreeSet<ShowtimeId>,
}

impl SelectionSet {
    /// Empty selection
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ids: BTreeSet::new(),
        }
    }

    /// Adds `id` if absent, removes it otherwise
    pub fn toggle(&mut self, id: ShowtimeId) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    /// Selects exactly `page_ids`, or clears when they are all selected already
    ///
    /// Only the page's ids are ever selected, never the rest of the
    /// filtered result.
    pub fn select_all_visible(&mut self, page_ids: &[ShowtimeId]) {
        let all_selected = !page_ids.is_empty() && page_ids.iter().all(|id| self.ids.contains(id));
        if all_selected {
            self.ids.clear();
        } else {
            self.ids = page_ids.iter().copied().collect();
        }
    }

    /// Drops every id not in `visible`
    pub fn retain_visible(&mut self, visible: &[ShowtimeId]) {
        self.ids.retain(|id| visible.contains(id));
    }

    /// Deselects everything
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Whether `id` is selected
    #[must_use]
    pub fn contains(&self, id: ShowtimeId) -> bool {
        self.ids.contains(&id)
    }

    /// Selected ids in ascending order
    #[must_use]
    pub fn ids(&self) -> Vec<ShowtimeId> {
        self.ids.iter().copied().collect()
    }

    /// Number of selected ids
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
