use crate::user::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Dashboard,
    Courses,
    Admin,
    Docs,
    Viva,
    Player,
}

impl Tab {
    pub const ALL: [Tab; 6] = [
        Tab::Dashboard,
        Tab::Courses,
        Tab::Admin,
        Tab::Docs,
        Tab::Viva,
        Tab::Player,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Tab::Dashboard => "dashboard",
            Tab::Courses => "courses",
            Tab::Admin => "admin",
            Tab::Docs => "docs",
            Tab::Viva => "viva",
            Tab::Player => "player",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.key().eq_ignore_ascii_case(key))
    }

    /// Tabs that keep the search box local instead of jumping to the catalog.
    pub fn hosts_search(self) -> bool {
        matches!(self, Tab::Courses | Tab::Dashboard | Tab::Player)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavSection {
    Primary,
    Resources,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavEntry {
    pub tab: Tab,
    pub label: &'static str,
    pub section: NavSection,
}

const fn entry(tab: Tab, label: &'static str, section: NavSection) -> NavEntry {
    NavEntry {
        tab,
        label,
        section,
    }
}

const STUDENT_NAV: [NavEntry; 4] = [
    entry(Tab::Dashboard, "Dashboard", NavSection::Primary),
    entry(Tab::Courses, "Courses", NavSection::Primary),
    entry(Tab::Docs, "Project Docs", NavSection::Resources),
    entry(Tab::Viva, "Viva Prep", NavSection::Resources),
];

const ADMIN_NAV: [NavEntry; 3] = [
    entry(Tab::Admin, "Admin Portal", NavSection::Primary),
    entry(Tab::Docs, "Project Docs", NavSection::Resources),
    entry(Tab::Viva, "Viva Prep", NavSection::Resources),
];

/// Sidebar entries visible to a role. The player is never listed; it is
/// reached by starting a course.
pub fn nav_entries(role: Role) -> &'static [NavEntry] {
    match role {
        Role::Student => &STUDENT_NAV,
        Role::Admin => &ADMIN_NAV,
    }
}

/// Tab to land on right after switching into `role`.
pub fn home_tab(role: Role) -> Tab {
    match role {
        Role::Student => Tab::Dashboard,
        Role::Admin => Tab::Admin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tabs(role: Role) -> Vec<Tab> {
        nav_entries(role).iter().map(|e| e.tab).collect()
    }

    #[test]
    fn student_sees_learning_tabs() {
        assert_eq!(
            tabs(Role::Student),
            vec![Tab::Dashboard, Tab::Courses, Tab::Docs, Tab::Viva]
        );
    }

    #[test]
    fn admin_sees_portal_only_plus_resources() {
        assert_eq!(tabs(Role::Admin), vec![Tab::Admin, Tab::Docs, Tab::Viva]);
    }

    #[test]
    fn player_is_never_a_menu_entry() {
        for role in [Role::Student, Role::Admin] {
            assert!(!tabs(role).contains(&Tab::Player));
        }
    }

    #[test]
    fn keys_round_trip() {
        for tab in Tab::ALL {
            assert_eq!(Tab::from_key(tab.key()), Some(tab));
        }
        assert_eq!(Tab::from_key("Settings"), None);
    }

    #[test]
    fn search_hosts() {
        assert!(Tab::Player.hosts_search());
        assert!(!Tab::Docs.hosts_search());
        assert!(!Tab::Admin.hosts_search());
    }
}
