//! Fixed permission taxonomy shared by every screen that displays, assigns,
//! or checks permissions.
//!
//! The tree is two levels deep: categories group leaf permissions for
//! display and bulk toggling, and only leaves are ever granted.

use std::collections::{BTreeSet, HashMap};

use eventdesk_core::{AppError, AppResult};
use serde::Serialize;

/// Smallest grantable unit of access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PermissionLeaf {
    id: &'static str,
    title: &'static str,
}

impl PermissionLeaf {
    /// Creates a leaf permission.
    #[must_use]
    pub const fn new(id: &'static str, title: &'static str) -> Self {
        Self { id, title }
    }

    /// Returns the stable leaf id.
    #[must_use]
    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Returns the human label.
    #[must_use]
    pub fn title(&self) -> &'static str {
        self.title
    }
}

/// Named grouping of leaf permissions. Confers no access by itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PermissionCategory {
    id: &'static str,
    title: &'static str,
    leaves: &'static [PermissionLeaf],
}

impl PermissionCategory {
    /// Creates a category from its ordered leaves.
    #[must_use]
    pub const fn new(
        id: &'static str,
        title: &'static str,
        leaves: &'static [PermissionLeaf],
    ) -> Self {
        Self { id, title, leaves }
    }

    /// Returns the stable category id.
    #[must_use]
    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Returns the human label.
    #[must_use]
    pub fn title(&self) -> &'static str {
        self.title
    }

    /// Returns the ordered leaves of this category.
    #[must_use]
    pub fn leaves(&self) -> &'static [PermissionLeaf] {
        self.leaves
    }

    /// Returns whether the leaf belongs to this category.
    #[must_use]
    pub fn contains_leaf(&self, leaf_id: &str) -> bool {
        self.leaves.iter().any(|leaf| leaf.id == leaf_id)
    }
}

/// Leaves of one category selected out of a flat permission list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionGroup {
    /// Owning category.
    pub category: &'static PermissionCategory,
    /// Granted leaves in taxonomy order.
    pub leaves: Vec<&'static PermissionLeaf>,
}

/// Ordered, immutable sequence of permission categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PermissionTaxonomy {
    categories: &'static [PermissionCategory],
}

impl PermissionTaxonomy {
    /// Creates a taxonomy from ordered categories.
    #[must_use]
    pub const fn new(categories: &'static [PermissionCategory]) -> Self {
        Self { categories }
    }

    /// Returns the ordered categories.
    #[must_use]
    pub fn categories(&self) -> &'static [PermissionCategory] {
        self.categories
    }

    /// Finds a category by id.
    #[must_use]
    pub fn find_category(&self, category_id: &str) -> Option<&'static PermissionCategory> {
        self.categories
            .iter()
            .find(|category| category.id == category_id)
    }

    /// Returns the category owning a leaf id.
    #[must_use]
    pub fn category_of(&self, leaf_id: &str) -> Option<&'static PermissionCategory> {
        self.categories
            .iter()
            .find(|category| category.contains_leaf(leaf_id))
    }

    /// Returns whether the leaf id exists anywhere in the taxonomy.
    #[must_use]
    pub fn contains_leaf(&self, leaf_id: &str) -> bool {
        self.category_of(leaf_id).is_some()
    }

    /// Iterates every leaf id in taxonomy order.
    pub fn all_leaf_ids(&self) -> impl Iterator<Item = &'static str> {
        self.categories
            .iter()
            .flat_map(|category| category.leaves.iter().map(|leaf| leaf.id))
    }

    /// Builds the leaf id to category lookup.
    #[must_use]
    pub fn leaf_index(&self) -> HashMap<&'static str, &'static PermissionCategory> {
        self.categories
            .iter()
            .flat_map(|category| category.leaves.iter().map(move |leaf| (leaf.id, category)))
            .collect()
    }

    /// Groups a flat list of leaf ids by owning category.
    ///
    /// Categories and leaves keep taxonomy order; categories without any
    /// granted leaf are omitted and unknown ids are dropped.
    #[must_use]
    pub fn group_leaf_ids<'a>(
        &self,
        leaf_ids: impl IntoIterator<Item = &'a str>,
    ) -> Vec<PermissionGroup> {
        let granted: BTreeSet<&str> = leaf_ids.into_iter().collect();

        self.categories
            .iter()
            .filter_map(|category| {
                let leaves: Vec<&'static PermissionLeaf> = category
                    .leaves
                    .iter()
                    .filter(|leaf| granted.contains(leaf.id))
                    .collect();
                (!leaves.is_empty()).then_some(PermissionGroup { category, leaves })
            })
            .collect()
    }

    /// Normalizes submitted leaf ids into a set, rejecting unknown ids.
    pub fn validate_leaf_ids<I, S>(&self, leaf_ids: I) -> AppResult<BTreeSet<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized = BTreeSet::new();
        let mut unknown = Vec::new();

        for leaf_id in leaf_ids {
            let leaf_id = leaf_id.as_ref().trim();
            if self.contains_leaf(leaf_id) {
                normalized.insert(leaf_id.to_owned());
            } else {
                unknown.push(leaf_id.to_owned());
            }
        }

        if !unknown.is_empty() {
            return Err(AppError::Validation(format!(
                "unknown permission ids: {}",
                unknown.join(", ")
            )));
        }

        Ok(normalized)
    }

    /// Verifies that no leaf id or category id appears twice.
    ///
    /// A collision is a configuration defect and must abort startup.
    pub fn ensure_unique_ids(&self) -> AppResult<()> {
        let mut category_ids = BTreeSet::new();
        let mut leaf_ids = BTreeSet::new();

        for category in self.categories {
            if !category_ids.insert(category.id) {
                return Err(AppError::Internal(format!(
                    "permission category '{}' is defined twice",
                    category.id
                )));
            }

            for leaf in category.leaves {
                if !leaf_ids.insert(leaf.id) {
                    return Err(AppError::Internal(format!(
                        "permission leaf '{}' appears in more than one category",
                        leaf.id
                    )));
                }
            }
        }

        Ok(())
    }
}

const EVENT_LEAVES: &[PermissionLeaf] = &[
    PermissionLeaf::new("events-all", "All Events"),
    PermissionLeaf::new("events-create", "Create New Event"),
    PermissionLeaf::new("events-categories", "Event Categories"),
    PermissionLeaf::new("events-approvals", "Event Approvals"),
];

const ORGANIZER_LEAVES: &[PermissionLeaf] = &[
    PermissionLeaf::new("organizers-all", "All Organizers"),
    PermissionLeaf::new("organizers-create", "Add Organizer"),
    PermissionLeaf::new("organizers-approvals", "Organizer Approvals"),
];

const EXHIBITOR_LEAVES: &[PermissionLeaf] = &[
    PermissionLeaf::new("exhibitors-all", "All Exhibitors"),
    PermissionLeaf::new("exhibitors-create", "Add Exhibitor"),
];

const SPEAKER_LEAVES: &[PermissionLeaf] = &[
    PermissionLeaf::new("speakers-all", "All Speakers"),
    PermissionLeaf::new("speakers-create", "Add Speaker"),
];

const VENUE_LEAVES: &[PermissionLeaf] = &[
    PermissionLeaf::new("venues-all", "All Venues"),
    PermissionLeaf::new("venues-create", "Add Venue"),
];

const CONTENT_LEAVES: &[PermissionLeaf] = &[
    PermissionLeaf::new("content-banners", "Banners"),
    PermissionLeaf::new("content-blogs", "Blogs"),
    PermissionLeaf::new("content-faqs", "FAQs"),
    PermissionLeaf::new("content-pages", "Static Pages"),
];

const SUB_ADMIN_LEAVES: &[PermissionLeaf] = &[
    PermissionLeaf::new("subadmins-all", "All Sub-Admins"),
    PermissionLeaf::new("subadmins-create", "Add Sub-Admin"),
    PermissionLeaf::new("subadmins-edit", "Edit Sub-Admins"),
    PermissionLeaf::new("subadmins-delete", "Delete Sub-Admins"),
];

const CATEGORIES: &[PermissionCategory] = &[
    PermissionCategory::new("events", "Events Management", EVENT_LEAVES),
    PermissionCategory::new("organizers", "Organizer Management", ORGANIZER_LEAVES),
    PermissionCategory::new("exhibitors", "Exhibitor Management", EXHIBITOR_LEAVES),
    PermissionCategory::new("speakers", "Speaker Management", SPEAKER_LEAVES),
    PermissionCategory::new("venues", "Venue Management", VENUE_LEAVES),
    PermissionCategory::new("content", "Content Management", CONTENT_LEAVES),
    PermissionCategory::new("sub-admins", "Sub-Admin Management", SUB_ADMIN_LEAVES),
];

/// The permission taxonomy. Never redefine it locally.
pub static PERMISSION_TAXONOMY: PermissionTaxonomy = PermissionTaxonomy::new(CATEGORIES);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_ids_are_unique() {
        assert!(PERMISSION_TAXONOMY.ensure_unique_ids().is_ok());

        let leaf_count = PERMISSION_TAXONOMY.all_leaf_ids().count();
        let distinct: BTreeSet<&str> = PERMISSION_TAXONOMY.all_leaf_ids().collect();
        assert_eq!(leaf_count, distinct.len());
    }

    #[test]
    fn colliding_leaf_ids_are_reported() {
        const LEFT: &[PermissionLeaf] = &[PermissionLeaf::new("shared", "Shared")];
        const RIGHT: &[PermissionLeaf] = &[PermissionLeaf::new("shared", "Shared again")];
        const BROKEN_CATEGORIES: &[PermissionCategory] = &[
            PermissionCategory::new("left", "Left", LEFT),
            PermissionCategory::new("right", "Right", RIGHT),
        ];
        static BROKEN: PermissionTaxonomy = PermissionTaxonomy::new(BROKEN_CATEGORIES);

        assert!(matches!(
            BROKEN.ensure_unique_ids(),
            Err(AppError::Internal(_))
        ));
    }

    #[test]
    fn category_of_resolves_owning_category() {
        let category = PERMISSION_TAXONOMY.category_of("events-create");
        assert_eq!(category.map(PermissionCategory::title), Some("Events Management"));
        assert!(PERMISSION_TAXONOMY.category_of("events-delete").is_none());
    }

    #[test]
    fn leaf_index_covers_every_leaf() {
        let index = PERMISSION_TAXONOMY.leaf_index();
        assert_eq!(index.len(), PERMISSION_TAXONOMY.all_leaf_ids().count());
        assert_eq!(index.get("content-faqs").map(|category| category.id()), Some("content"));
    }

    #[test]
    fn grouping_follows_taxonomy_order() {
        let groups =
            PERMISSION_TAXONOMY.group_leaf_ids(["venues-all", "events-approvals", "events-all"]);

        let shape: Vec<(&str, Vec<&str>)> = groups
            .iter()
            .map(|group| {
                (
                    group.category.id(),
                    group.leaves.iter().map(|leaf| leaf.id()).collect(),
                )
            })
            .collect();

        assert_eq!(
            shape,
            vec![
                ("events", vec!["events-all", "events-approvals"]),
                ("venues", vec!["venues-all"]),
            ]
        );
    }

    #[test]
    fn grouping_drops_unknown_ids() {
        assert!(PERMISSION_TAXONOMY.group_leaf_ids(["nope"]).is_empty());
    }

    #[test]
    fn validate_leaf_ids_collapses_duplicates() {
        let normalized =
            PERMISSION_TAXONOMY.validate_leaf_ids(["events-all", "events-all", " venues-all "]);
        assert_eq!(
            normalized.ok(),
            Some(BTreeSet::from([
                "events-all".to_owned(),
                "venues-all".to_owned()
            ]))
        );
    }

    #[test]
    fn validate_leaf_ids_rejects_unknown_ids() {
        let result = PERMISSION_TAXONOMY.validate_leaf_ids(["events-all", "events-purge"]);
        assert!(matches!(result, Err(AppError::Validation(message)) if message.contains("events-purge")));
    }
}
