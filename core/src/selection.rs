//! Bulk selection for list views.
//!
//! Tracks which identifiers of a caller-supplied list are selected. The
//! tracker knows nothing about rendering or where the items came from.

use std::collections::HashSet;

use crm_common::Identifiable;

/// Selected identifiers of a list.
///
/// [`select_one`](Self::select_one) accepts any identifier. Identifiers that
/// are not in the item list stay selected until [`sync_items`](Self::sync_items)
/// or [`clear`](Self::clear) removes them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionTracker {
    item_ids: Vec<String>,
    selected: HashSet<String>,
}

impl SelectionTracker {
    /// Create a tracker over `items` with nothing selected.
    pub fn new<T: Identifiable>(items: &[T]) -> Self {
        Self {
            item_ids: collect_ids(items),
            selected: HashSet::new(),
        }
    }

    /// Replace the item list, dropping selected identifiers that are no
    /// longer present.
    pub fn sync_items<T: Identifiable>(&mut self, items: &[T]) {
        self.item_ids = collect_ids(items);
        let before = self.selected.len();
        let current: HashSet<&str> = self.item_ids.iter().map(String::as_str).collect();
        self.selected.retain(|id| current.contains(id.as_str()));

        let pruned = before - self.selected.len();
        if pruned > 0 {
            tracing::debug!(pruned, "dropped stale selections");
        }
    }

    /// Select every item, or nothing.
    pub fn select_all(&mut self, checked: bool) {
        if checked {
            self.selected = self.item_ids.iter().cloned().collect();
        } else {
            self.selected.clear();
        }
    }

    /// Add or remove one identifier. Repeating a call is a no-op.
    pub fn select_one(&mut self, id: &str, checked: bool) {
        if checked {
            if !self.selected.contains(id) {
                self.selected.insert(id.to_string());
            }
        } else {
            self.selected.remove(id);
        }
    }

    /// Flip one identifier's selection.
    pub fn toggle(&mut self, id: &str) {
        let checked = !self.is_selected(id);
        self.select_one(id, checked);
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Every item is selected. False for an empty list.
    pub fn all_selected(&self) -> bool {
        !self.item_ids.is_empty() && self.item_ids.iter().all(|id| self.selected.contains(id))
    }

    /// Partial selection (the indeterminate checkbox state).
    ///
    /// Compares set sizes, so identifiers outside the item list count toward
    /// the selection. With items `[a, b]` and `b` plus an unlisted id
    /// selected, neither this nor [`all_selected`](Self::all_selected) holds
    /// while [`has_selection`](Self::has_selection) does. Call
    /// [`sync_items`](Self::sync_items) to drop unlisted ids.
    pub fn some_selected(&self) -> bool {
        !self.selected.is_empty() && self.selected.len() < self.item_ids.len()
    }

    pub fn has_selection(&self) -> bool {
        !self.selected.is_empty()
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Selected identifiers in item-list order. Identifiers not in the list
    /// come last, sorted.
    pub fn selected_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .item_ids
            .iter()
            .filter(|id| self.selected.contains(*id))
            .map(String::as_str)
            .collect();

        let listed: HashSet<&str> = self.item_ids.iter().map(String::as_str).collect();
        let mut unlisted: Vec<&str> = self
            .selected
            .iter()
            .map(String::as_str)
            .filter(|id| !listed.contains(id))
            .collect();
        unlisted.sort_unstable();
        ids.extend(unlisted);
        ids
    }

    /// The selected elements of `items`, in order.
    pub fn selected_items<'a, T: Identifiable>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().filter(|item| self.is_selected(item.id())).collect()
    }

    /// Number of items in the tracked list.
    pub fn len(&self) -> usize {
        self.item_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.item_ids.is_empty()
    }
}

fn collect_ids<T: Identifiable>(items: &[T]) -> Vec<String> {
    items.iter().map(|item| item.id().to_string()).collect()
}
