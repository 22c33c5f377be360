//! Application state and its reducer.
//!
//! Front ends hold one `AppState`, render it read-only and send `Action`s
//! back; `reduce` swaps in the next state.

use crate::advisor::DashboardAdvice;
use crate::catalog::{find_course, CategoryFilter, Course};
use crate::nav::{home_tab, Tab};
use crate::player::PlayerSession;
use crate::user::{mock_user, User};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum AdviceState {
    #[default]
    Idle,
    Loading { revision: u64 },
    Ready { revision: u64, advice: DashboardAdvice },
}

impl AdviceState {
    /// Whether a fetch still has to be started for `revision`.
    pub fn needs_fetch(&self, revision: u64) -> bool {
        match self {
            AdviceState::Idle => true,
            AdviceState::Loading { revision: r } | AdviceState::Ready { revision: r, .. } => {
                *r != revision
            }
        }
    }

    pub fn ready(&self) -> Option<&DashboardAdvice> {
        match self {
            AdviceState::Ready { advice, .. } => Some(advice),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Login { email: String },
    Logout,
    SelectTab(Tab),
    ToggleRole,
    ToggleSidebar,
    SetSearch(String),
    SetCategory(CategoryFilter),
    StartCourse(String),
    SelectLesson(String),
    ToggleLessonComplete(String),
    AdviceRequested { revision: u64 },
    AdviceArrived { revision: u64, advice: DashboardAdvice },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub catalog: Vec<Course>,
    pub authenticated: bool,
    pub user: User,
    pub tab: Tab,
    pub sidebar_open: bool,
    pub search_query: String,
    pub category: CategoryFilter,
    pub player: Option<PlayerSession>,
    pub advice: AdviceState,
    /// Bumped whenever the user changes; advice for an older revision is
    /// discarded on arrival.
    pub user_revision: u64,
}

impl AppState {
    pub fn new(catalog: Vec<Course>) -> Self {
        Self {
            catalog,
            authenticated: false,
            user: mock_user(),
            tab: Tab::Dashboard,
            sidebar_open: true,
            search_query: String::new(),
            category: CategoryFilter::All,
            player: None,
            advice: AdviceState::Idle,
            user_revision: 0,
        }
    }

    pub fn with_sidebar(mut self, open: bool) -> Self {
        self.sidebar_open = open;
        self
    }

    /// Dashboard is showing and has nothing for the current user yet.
    pub fn wants_advice(&self) -> bool {
        self.authenticated
            && self.tab == Tab::Dashboard
            && self.advice.needs_fetch(self.user_revision)
    }

    fn user_changed(&mut self, user: User) {
        self.user = user;
        self.user_revision += 1;
        self.advice = AdviceState::Idle;
    }
}

pub fn reduce(mut state: AppState, action: Action) -> AppState {
    debug!(?action, "reduce");
    match action {
        Action::Login { email } => {
            let email = email.trim();
            if email.is_empty() {
                return state;
            }
            info!(%email, "signed in");
            let user = mock_user().with_email(email);
            state.user_changed(user);
            state.authenticated = true;
        }
        Action::Logout => {
            info!(email = %state.user.email, "signed out");
            state.authenticated = false;
            state.tab = Tab::Dashboard;
            state.search_query.clear();
        }
        Action::SelectTab(tab) => state.tab = tab,
        Action::ToggleRole => {
            let user = state.user.with_toggled_role();
            state.tab = home_tab(user.role);
            state.user_changed(user);
        }
        Action::ToggleSidebar => state.sidebar_open = !state.sidebar_open,
        Action::SetSearch(query) => {
            state.search_query = query;
            if !state.tab.hosts_search() {
                state.tab = Tab::Courses;
            }
        }
        Action::SetCategory(category) => state.category = category,
        Action::StartCourse(course_id) => {
            if let Some(course) = find_course(&state.catalog, &course_id) {
                state.player = Some(PlayerSession::new(course.clone()));
                state.tab = Tab::Player;
            }
        }
        Action::SelectLesson(lesson_id) => {
            if let Some(player) = state.player.as_mut() {
                player.select(&lesson_id);
            }
        }
        Action::ToggleLessonComplete(lesson_id) => {
            if let Some(player) = state.player.as_mut() {
                if player.has_lesson(&lesson_id) {
                    player.toggle(&lesson_id);
                } else {
                    debug!(%lesson_id, "not a lesson of the open course");
                }
            }
        }
        Action::AdviceRequested { revision } => {
            if revision == state.user_revision {
                state.advice = AdviceState::Loading { revision };
            }
        }
        Action::AdviceArrived { revision, advice } => {
            if revision == state.user_revision {
                state.advice = AdviceState::Ready { revision, advice };
            } else {
                debug!(revision, current = state.user_revision, "dropping stale advice");
            }
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::{Recommendation, Retrieval, INSIGHT_FALLBACK};
    use crate::catalog::{filter_courses, mock_catalog};
    use crate::user::Role;

    fn signed_in() -> AppState {
        reduce(
            AppState::new(mock_catalog()),
            Action::Login {
                email: "ada@example.com".to_string(),
            },
        )
    }

    fn advice(insight: &str) -> DashboardAdvice {
        DashboardAdvice {
            recommendations: Retrieval::Fresh(vec![Recommendation {
                course_id: "c3".to_string(),
                reason: "fundamentals".to_string(),
            }]),
            insight: Retrieval::Fresh(insight.to_string()),
        }
    }

    #[test]
    fn login_requires_an_email() {
        let state = reduce(
            AppState::new(mock_catalog()),
            Action::Login {
                email: "   ".to_string(),
            },
        );
        assert!(!state.authenticated);
        assert_eq!(state.user_revision, 0);
    }

    #[test]
    fn login_uses_profile_with_entered_email() {
        let state = signed_in();
        assert!(state.authenticated);
        assert_eq!(state.user.email, "ada@example.com");
        assert_eq!(state.user.name, "John BCA Student");
        assert_eq!(state.tab, Tab::Dashboard);
        assert!(state.wants_advice());
    }

    #[test]
    fn logout_returns_to_dashboard() {
        let state = reduce(signed_in(), Action::SelectTab(Tab::Viva));
        let state = reduce(state, Action::Logout);
        assert!(!state.authenticated);
        assert_eq!(state.tab, Tab::Dashboard);
        assert!(!state.wants_advice());
    }

    #[test]
    fn search_does_not_survive_sign_out() {
        let state = reduce(signed_in(), Action::SetSearch("react".to_string()));
        assert_eq!(state.tab, Tab::Courses);
        let state = reduce(state, Action::Logout);
        assert!(state.search_query.is_empty());
        let state = reduce(
            state,
            Action::Login {
                email: "ada@example.com".to_string(),
            },
        );
        assert!(state.search_query.is_empty());
        assert_eq!(
            filter_courses(&state.catalog, &state.category, &state.search_query).len(),
            state.catalog.len()
        );
    }

    #[test]
    fn any_tab_is_reachable_from_any_other() {
        let mut state = signed_in();
        for tab in [Tab::Viva, Tab::Admin, Tab::Courses, Tab::Docs, Tab::Dashboard] {
            state = reduce(state, Action::SelectTab(tab));
            assert_eq!(state.tab, tab);
        }
    }

    #[test]
    fn role_toggle_switches_home_tab() {
        let state = reduce(signed_in(), Action::ToggleRole);
        assert_eq!(state.user.role, Role::Admin);
        assert_eq!(state.tab, Tab::Admin);

        let state = reduce(state, Action::ToggleRole);
        assert_eq!(state.user.role, Role::Student);
        assert_eq!(state.tab, Tab::Dashboard);
        assert_eq!(state.user_revision, 3);
    }

    #[test]
    fn search_pulls_resource_tabs_to_catalog() {
        let state = reduce(signed_in(), Action::SelectTab(Tab::Docs));
        let state = reduce(state, Action::SetSearch("react".to_string()));
        assert_eq!(state.tab, Tab::Courses);
        assert_eq!(state.search_query, "react");

        let state = reduce(state, Action::SelectTab(Tab::Dashboard));
        let state = reduce(state, Action::SetSearch("ml".to_string()));
        assert_eq!(state.tab, Tab::Dashboard);
    }

    #[test]
    fn start_course_opens_player() {
        let state = reduce(signed_in(), Action::StartCourse("c1".to_string()));
        assert_eq!(state.tab, Tab::Player);
        let player = state.player.as_ref().unwrap();
        assert_eq!(player.course().id, "c1");

        let state = reduce(state, Action::SelectLesson("l2".to_string()));
        let state = reduce(state, Action::ToggleLessonComplete("l2".to_string()));
        let player = state.player.as_ref().unwrap();
        assert_eq!(player.current_lesson().id, "l2");
        assert!(player.is_completed("l2"));
        assert!(!state.catalog[0].lessons[1].is_completed);
    }

    #[test]
    fn unknown_course_is_ignored() {
        let before = reduce(signed_in(), Action::SelectTab(Tab::Courses));
        let after = reduce(before.clone(), Action::StartCourse("zz".to_string()));
        assert_eq!(after, before);
    }

    #[test]
    fn restarting_a_course_resets_completion() {
        let state = reduce(signed_in(), Action::StartCourse("c1".to_string()));
        let state = reduce(state, Action::ToggleLessonComplete("l1".to_string()));
        let state = reduce(state, Action::StartCourse("c1".to_string()));
        assert!(state.player.unwrap().is_completed("l1"));
    }

    #[test]
    fn advice_for_current_revision_is_applied() {
        let state = signed_in();
        let rev = state.user_revision;
        let state = reduce(state, Action::AdviceRequested { revision: rev });
        assert_eq!(state.advice, AdviceState::Loading { revision: rev });
        assert!(!state.wants_advice());

        let state = reduce(
            state,
            Action::AdviceArrived {
                revision: rev,
                advice: advice("steady"),
            },
        );
        assert_eq!(state.advice.ready().unwrap().insight.value(), "steady");
        assert!(!state.wants_advice());
    }

    #[test]
    fn stale_advice_is_discarded() {
        let state = signed_in();
        let old = state.user_revision;
        let state = reduce(state, Action::AdviceRequested { revision: old });
        let state = reduce(state, Action::ToggleRole);
        let state = reduce(state, Action::ToggleRole);
        let state = reduce(
            state,
            Action::AdviceArrived {
                revision: old,
                advice: advice(INSIGHT_FALLBACK),
            },
        );
        assert_eq!(state.advice, AdviceState::Idle);
        assert!(state.wants_advice());
    }

    #[test]
    fn sidebar_toggles() {
        let state = AppState::new(mock_catalog()).with_sidebar(false);
        let state = reduce(state, Action::ToggleSidebar);
        assert!(state.sidebar_open);
    }

    #[test]
    fn completion_ignores_lessons_of_other_courses() {
        let state = reduce(signed_in(), Action::StartCourse("c1".to_string()));
        let state = reduce(state, Action::ToggleLessonComplete("l3".to_string()));
        let state = reduce(state, Action::ToggleLessonComplete("bogus".to_string()));
        let player = state.player.as_ref().unwrap();
        assert!(!player.is_completed("l3"));
        assert!(!player.is_completed("bogus"));
        assert_eq!(player.progress_label(), "1/2 Lessons");
    }
}
