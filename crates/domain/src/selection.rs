//! Ephemeral permission selection for one sub-admin being created or edited.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::taxonomy::PERMISSION_TAXONOMY;

/// Tri-state rendering of a category checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategorySelection {
    /// No leaf of the category is selected.
    Unchecked,
    /// Some, but not all, leaves are selected.
    Partial,
    /// Every leaf is selected.
    Checked,
}

/// Selected leaf ids plus the categories expanded in the editor.
///
/// Owned by exactly one editing form; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionDraft {
    selected_leaf_ids: BTreeSet<String>,
    expanded_category_ids: BTreeSet<String>,
}

impl SelectionDraft {
    /// Creates an empty draft for the create flow.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a draft seeded from an existing account's permissions.
    #[must_use]
    pub fn from_permissions<I, S>(permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selected_leaf_ids: permissions.into_iter().map(Into::into).collect(),
            expanded_category_ids: BTreeSet::new(),
        }
    }

    /// Adds the leaf when absent, removes it when present.
    pub fn toggle_leaf(&mut self, leaf_id: &str) {
        if !self.selected_leaf_ids.remove(leaf_id) {
            self.selected_leaf_ids.insert(leaf_id.to_owned());
        }
    }

    /// Bulk toggle for a category.
    ///
    /// A fully selected category becomes empty; any other state (empty or
    /// partial) becomes fully selected. Unknown categories are ignored.
    pub fn toggle_category(&mut self, category_id: &str) {
        let Some(category) = PERMISSION_TAXONOMY.find_category(category_id) else {
            return;
        };

        if self.is_category_fully_selected(category_id) {
            for leaf in category.leaves() {
                self.selected_leaf_ids.remove(leaf.id());
            }
        } else {
            for leaf in category.leaves() {
                self.selected_leaf_ids.insert(leaf.id().to_owned());
            }
        }
    }

    /// True iff every leaf of the category is selected.
    #[must_use]
    pub fn is_category_fully_selected(&self, category_id: &str) -> bool {
        PERMISSION_TAXONOMY
            .find_category(category_id)
            .is_some_and(|category| {
                category
                    .leaves()
                    .iter()
                    .all(|leaf| self.selected_leaf_ids.contains(leaf.id()))
            })
    }

    /// Derives the tri-state checkbox value for a category.
    #[must_use]
    pub fn category_state(&self, category_id: &str) -> CategorySelection {
        let Some(category) = PERMISSION_TAXONOMY.find_category(category_id) else {
            return CategorySelection::Unchecked;
        };

        let selected = category
            .leaves()
            .iter()
            .filter(|leaf| self.selected_leaf_ids.contains(leaf.id()))
            .count();

        match selected {
            0 => CategorySelection::Unchecked,
            count if count == category.leaves().len() => CategorySelection::Checked,
            _ => CategorySelection::Partial,
        }
    }

    /// Flips whether a category shows its leaves. Never touches the selection.
    pub fn toggle_expanded(&mut self, category_id: &str) {
        if !self.expanded_category_ids.remove(category_id) {
            self.expanded_category_ids.insert(category_id.to_owned());
        }
    }

    /// Returns whether the category is expanded.
    #[must_use]
    pub fn is_expanded(&self, category_id: &str) -> bool {
        self.expanded_category_ids.contains(category_id)
    }

    /// Returns whether the leaf is selected.
    #[must_use]
    pub fn is_selected(&self, leaf_id: &str) -> bool {
        self.selected_leaf_ids.contains(leaf_id)
    }

    /// Returns the selected leaf ids.
    #[must_use]
    pub fn selected_leaf_ids(&self) -> &BTreeSet<String> {
        &self.selected_leaf_ids
    }

    /// Returns the expanded category ids.
    #[must_use]
    pub fn expanded_category_ids(&self) -> &BTreeSet<String> {
        &self.expanded_category_ids
    }

    /// Returns whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected_leaf_ids.is_empty()
    }

    /// Flat permission list for submission. Category information is dropped.
    #[must_use]
    pub fn flatten(&self) -> Vec<String> {
        self.selected_leaf_ids.iter().cloned().collect()
    }
}
