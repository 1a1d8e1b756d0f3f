//! Sidebar menu, navigation state, and section to view resolution.

use std::collections::BTreeSet;

use eventdesk_core::ActorIdentity;
use serde::{Deserialize, Serialize};

/// Id of the landing section.
pub const OVERVIEW_SECTION_ID: &str = "overview";

/// Component occupying the dashboard content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DashboardView {
    /// Landing page.
    Overview,
    /// Event table.
    EventList,
    /// Event creation form.
    EventCreate,
    /// Event category management.
    EventCategories,
    /// Pending event approvals.
    EventApprovals,
    /// Organizer table.
    OrganizerList,
    /// Organizer creation form.
    OrganizerCreate,
    /// Pending organizer approvals.
    OrganizerApprovals,
    /// Exhibitor table.
    ExhibitorList,
    /// Exhibitor creation form.
    ExhibitorCreate,
    /// Speaker table.
    SpeakerList,
    /// Speaker creation form.
    SpeakerCreate,
    /// Venue table.
    VenueList,
    /// Venue creation form.
    VenueCreate,
    /// Banner management.
    ContentBanners,
    /// Blog management.
    ContentBlogs,
    /// FAQ management.
    ContentFaqs,
    /// Static page management.
    ContentPages,
    /// Sub-admin table.
    SubAdminList,
    /// Sub-admin creation form.
    SubAdminCreate,
}

impl DashboardView {
    /// Returns the stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::EventList => "event-list",
            Self::EventCreate => "event-create",
            Self::EventCategories => "event-categories",
            Self::EventApprovals => "event-approvals",
            Self::OrganizerList => "organizer-list",
            Self::OrganizerCreate => "organizer-create",
            Self::OrganizerApprovals => "organizer-approvals",
            Self::ExhibitorList => "exhibitor-list",
            Self::ExhibitorCreate => "exhibitor-create",
            Self::SpeakerList => "speaker-list",
            Self::SpeakerCreate => "speaker-create",
            Self::VenueList => "venue-list",
            Self::VenueCreate => "venue-create",
            Self::ContentBanners => "content-banners",
            Self::ContentBlogs => "content-blogs",
            Self::ContentFaqs => "content-faqs",
            Self::ContentPages => "content-pages",
            Self::SubAdminList => "sub-admin-list",
            Self::SubAdminCreate => "sub-admin-create",
        }
    }

    /// Leaf permission needed to render the view, `None` for open views.
    #[must_use]
    pub fn required_permission(&self) -> Option<&'static str> {
        match self {
            Self::Overview => None,
            Self::EventList => Some("events-all"),
            Self::EventCreate => Some("events-create"),
            Self::EventCategories => Some("events-categories"),
            Self::EventApprovals => Some("events-approvals"),
            Self::OrganizerList => Some("organizers-all"),
            Self::OrganizerCreate => Some("organizers-create"),
            Self::OrganizerApprovals => Some("organizers-approvals"),
            Self::ExhibitorList => Some("exhibitors-all"),
            Self::ExhibitorCreate => Some("exhibitors-create"),
            Self::SpeakerList => Some("speakers-all"),
            Self::SpeakerCreate => Some("speakers-create"),
            Self::VenueList => Some("venues-all"),
            Self::VenueCreate => Some("venues-create"),
            Self::ContentBanners => Some("content-banners"),
            Self::ContentBlogs => Some("content-blogs"),
            Self::ContentFaqs => Some("content-faqs"),
            Self::ContentPages => Some("content-pages"),
            Self::SubAdminList => Some("subadmins-all"),
            Self::SubAdminCreate => Some("subadmins-create"),
        }
    }
}

/// Sidebar sub-item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuSubSection {
    /// Sub-section id, unique across the menu.
    pub id: &'static str,
    /// Label.
    pub title: &'static str,
    /// View rendered when selected.
    pub view: DashboardView,
}

/// Top-level sidebar group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuSection {
    /// Section id.
    pub id: &'static str,
    /// Label.
    pub title: &'static str,
    /// View rendered when the section is selected without a sub-item.
    pub default_view: DashboardView,
    /// Ordered sub-items.
    pub sub_sections: &'static [MenuSubSection],
}

const fn sub(id: &'static str, title: &'static str, view: DashboardView) -> MenuSubSection {
    MenuSubSection { id, title, view }
}

/// Fixed sidebar menu.
pub const DASHBOARD_MENU: &[MenuSection] = &[
    MenuSection {
        id: OVERVIEW_SECTION_ID,
        title: "Dashboard",
        default_view: DashboardView::Overview,
        sub_sections: &[],
    },
    MenuSection {
        id: "events",
        title: "Events",
        default_view: DashboardView::EventList,
        sub_sections: &[
            sub("all-events", "All Events", DashboardView::EventList),
            sub("create-event", "Create New Event", DashboardView::EventCreate),
            sub("event-categories", "Event Categories", DashboardView::EventCategories),
            sub("event-approvals", "Event Approvals", DashboardView::EventApprovals),
        ],
    },
    MenuSection {
        id: "organizers",
        title: "Organizers",
        default_view: DashboardView::OrganizerList,
        sub_sections: &[
            sub("all-organizers", "All Organizers", DashboardView::OrganizerList),
            sub("add-organizer", "Add Organizer", DashboardView::OrganizerCreate),
            sub("organizer-approvals", "Organizer Approvals", DashboardView::OrganizerApprovals),
        ],
    },
    MenuSection {
        id: "exhibitors",
        title: "Exhibitors",
        default_view: DashboardView::ExhibitorList,
        sub_sections: &[
            sub("all-exhibitors", "All Exhibitors", DashboardView::ExhibitorList),
            sub("add-exhibitor", "Add Exhibitor", DashboardView::ExhibitorCreate),
        ],
    },
    MenuSection {
        id: "speakers",
        title: "Speakers",
        default_view: DashboardView::SpeakerList,
        sub_sections: &[
            sub("all-speakers", "All Speakers", DashboardView::SpeakerList),
            sub("add-speaker", "Add Speaker", DashboardView::SpeakerCreate),
        ],
    },
    MenuSection {
        id: "venues",
        title: "Venues",
        default_view: DashboardView::VenueList,
        sub_sections: &[
            sub("all-venues", "All Venues", DashboardView::VenueList),
            sub("add-venue", "Add Venue", DashboardView::VenueCreate),
        ],
    },
    MenuSection {
        id: "content",
        title: "Content",
        default_view: DashboardView::ContentBanners,
        sub_sections: &[
            sub("banners", "Banners", DashboardView::ContentBanners),
            sub("blogs", "Blogs", DashboardView::ContentBlogs),
            sub("faqs", "FAQs", DashboardView::ContentFaqs),
            sub("static-pages", "Static Pages", DashboardView::ContentPages),
        ],
    },
    MenuSection {
        id: "sub-admins",
        title: "Sub-Admins",
        default_view: DashboardView::SubAdminList,
        sub_sections: &[
            sub("all-sub-admins", "All Sub-Admins", DashboardView::SubAdminList),
            sub("add-sub-admin", "Add Sub-Admin", DashboardView::SubAdminCreate),
        ],
    },
];

/// Structural lookup from the active selection to a view.
///
/// Sub-section mappings win over section defaults; anything unmapped lands
/// on the overview. Permissions are not consulted here.
#[must_use]
pub fn resolve_view(section_id: &str, sub_section_id: Option<&str>) -> DashboardView {
    let from_sub_section = sub_section_id
        .filter(|value| !value.is_empty())
        .and_then(|sub_id| {
            DASHBOARD_MENU
                .iter()
                .flat_map(|section| section.sub_sections.iter())
                .find(|candidate| candidate.id == sub_id)
        })
        .map(|sub_section| sub_section.view);

    from_sub_section
        .or_else(|| {
            DASHBOARD_MENU
                .iter()
                .find(|section| section.id == section_id)
                .map(|section| section.default_view)
        })
        .unwrap_or(DashboardView::Overview)
}

/// Returns whether the actor may render a view.
#[must_use]
pub fn can_access_view(actor: &ActorIdentity, view: DashboardView) -> bool {
    if !actor.is_active() {
        return false;
    }

    view.required_permission()
        .is_none_or(|leaf_id| actor.holds(leaf_id))
}

/// Sidebar state for one signed-in actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    active_section: String,
    active_sub_section: Option<String>,
    expanded_menus: BTreeSet<String>,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            active_section: OVERVIEW_SECTION_ID.to_owned(),
            active_sub_section: None,
            expanded_menus: BTreeSet::new(),
        }
    }
}

impl NavigationState {
    /// Creates state with the overview active.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Activates a section and clears the sub-section.
    pub fn select_section(&mut self, section_id: &str) {
        self.active_section = section_id.to_owned();
        self.active_sub_section = None;
    }

    /// Activates a sub-section under its parent.
    pub fn select_sub_section(&mut self, parent_id: &str, sub_section_id: &str) {
        self.active_section = parent_id.to_owned();
        self.active_sub_section = Some(sub_section_id.to_owned());
    }

    /// Shows or hides the sub-items of a section.
    pub fn toggle_menu(&mut self, section_id: &str) {
        if !self.expanded_menus.remove(section_id) {
            self.expanded_menus.insert(section_id.to_owned());
        }
    }

    /// Returns the active section id.
    #[must_use]
    pub fn active_section(&self) -> &str {
        self.active_section.as_str()
    }

    /// Returns the active sub-section id.
    #[must_use]
    pub fn active_sub_section(&self) -> Option<&str> {
        self.active_sub_section.as_deref()
    }

    /// Returns whether a section shows its sub-items.
    #[must_use]
    pub fn is_menu_expanded(&self, section_id: &str) -> bool {
        self.expanded_menus.contains(section_id)
    }

    /// Resolves the view for the current selection.
    #[must_use]
    pub fn active_view(&self) -> DashboardView {
        resolve_view(&self.active_section, self.active_sub_section.as_deref())
    }
}

/// Sidebar sub-item projected for one actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuSubEntry {
    /// Sub-section id.
    pub id: &'static str,
    /// Label.
    pub title: &'static str,
    /// Resolved view.
    pub view: DashboardView,
    /// Whether the actor may open it.
    pub enabled: bool,
}

/// Sidebar section projected for one actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuEntry {
    /// Section id.
    pub id: &'static str,
    /// Label.
    pub title: &'static str,
    /// Whether the section itself can be opened.
    pub enabled: bool,
    /// Projected sub-items.
    pub sub_sections: Vec<MenuSubEntry>,
}

/// Projects the menu for an actor, marking what they may open.
#[must_use]
pub fn menu_for(actor: &ActorIdentity) -> Vec<MenuEntry> {
    DASHBOARD_MENU
        .iter()
        .map(|section| {
            let sub_sections: Vec<MenuSubEntry> = section
                .sub_sections
                .iter()
                .map(|sub_section| MenuSubEntry {
                    id: sub_section.id,
                    title: sub_section.title,
                    view: sub_section.view,
                    enabled: can_access_view(actor, sub_section.view),
                })
                .collect();

            let enabled = can_access_view(actor, section.default_view)
                || sub_sections.iter().any(|entry| entry.enabled);

            MenuEntry {
                id: section.id,
                title: section.title,
                enabled,
                sub_sections,
            }
        })
        .collect()
}
