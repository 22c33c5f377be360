//! Terminal front end: parses commands into actions and prints views.

use crate::advisor::{resolve_recommendations, DashboardAdvice};
use crate::analytics::render_admin_report;
use crate::catalog::{enrolled_courses, filter_courses, group_thousands, CategoryFilter};
use crate::content::{CODE_BLOCKS, DOCS_INTRO, DOCS_TITLE, VIVA_INTRO, VIVA_QA, VIVA_TITLE};
use crate::nav::{nav_entries, Tab};
use crate::state::{Action, AppState};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Act(Action),
    /// Marks the current lesson when no id is given.
    CompleteCurrent,
    Help,
    Show,
    Exit,
    Invalid(String),
}

pub const HELP: &str = "Commands:
  login <email>        sign in (password is not checked)
  logout               sign out
  tab <name>           dashboard | courses | admin | docs | viva | player
  search [text]        filter the catalog (empty clears)
  category <name|All>  filter the catalog by category
  open <course-id>     start a course in the player
  lesson <lesson-id>   select a lesson in the player
  complete [lesson-id] toggle completion (current lesson by default)
  role                 switch between STUDENT and ADMIN
  sidebar              collapse or expand the sidebar
  show                 print the current view again
  help                 this list
  exit                 quit";

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let (cmd, rest) = match line.split_once(char::is_whitespace) {
        Some((c, r)) => (c, r.trim()),
        None => (line, ""),
    };
    let need = |what: &str| Command::Invalid(format!("Usage: {cmd} <{what}>"));

    match cmd.to_ascii_lowercase().as_str() {
        "" | "show" => Command::Show,
        "help" | "?" => Command::Help,
        "exit" | "quit" => Command::Exit,
        "logout" => Command::Act(Action::Logout),
        "role" => Command::Act(Action::ToggleRole),
        "sidebar" => Command::Act(Action::ToggleSidebar),
        "login" if rest.is_empty() => need("email"),
        "login" => Command::Act(Action::Login {
            email: rest.to_string(),
        }),
        "tab" => match Tab::from_key(rest) {
            Some(tab) => Command::Act(Action::SelectTab(tab)),
            None => {
                let keys: Vec<&str> = Tab::ALL.iter().map(|t| t.key()).collect();
                need(&keys.join("|"))
            }
        },
        "search" => Command::Act(Action::SetSearch(rest.to_string())),
        "category" => Command::Act(Action::SetCategory(CategoryFilter::parse(rest))),
        "open" if rest.is_empty() => need("course-id"),
        "open" => Command::Act(Action::StartCourse(rest.to_string())),
        "lesson" if rest.is_empty() => need("lesson-id"),
        "lesson" => Command::Act(Action::SelectLesson(rest.to_string())),
        "complete" if rest.is_empty() => Command::CompleteCurrent,
        "complete" => Command::Act(Action::ToggleLessonComplete(rest.to_string())),
        other => Command::Invalid(format!("Unknown command '{other}'. Type 'help'.")),
    }
}

pub fn render(state: &AppState) -> String {
    if !state.authenticated {
        return "Welcome back\nThe intelligent way to learn technology.\n\
                Sign in with: login <email>\n"
            .to_string();
    }

    let mut out = render_header(state);
    out.push('\n');
    out.push_str(&match state.tab {
        Tab::Dashboard => render_dashboard(state),
        Tab::Courses => render_catalog(state),
        Tab::Admin => render_admin_report(&state.catalog),
        Tab::Docs => render_docs(),
        Tab::Viva => render_viva(),
        Tab::Player => render_player(state),
    });
    out
}

fn render_header(state: &AppState) -> String {
    let mut out = format!(
        "EduAI | {} ({}) | Mode: {}\n",
        state.user.name, state.user.email, state.user.role
    );
    if state.sidebar_open {
        let entries: Vec<String> = nav_entries(state.user.role)
            .iter()
            .map(|e| {
                if e.tab == state.tab {
                    format!("[{}]", e.label)
                } else {
                    e.label.to_string()
                }
            })
            .collect();
        out.push_str(&format!("{}\n", entries.join(" | ")));
    }
    if !state.search_query.is_empty() {
        out.push_str(&format!("Search: {}\n", state.search_query));
    }
    out
}

fn render_dashboard(state: &AppState) -> String {
    let mut out = format!("Welcome back, {}!\n\nIn Progress\n", state.user.first_name());
    let enrolled = enrolled_courses(&state.catalog, &state.user);
    if enrolled.is_empty() {
        out.push_str("  (no enrollments)\n");
    }
    for c in enrolled {
        out.push_str(&format!("  [{}] {} - {}\n", c.id, c.title, c.instructor));
    }

    match state.advice.ready() {
        Some(advice) => out.push_str(&render_advice(state, advice)),
        None => out.push_str("\nAI Learning Insight\n  Generating personalized insights...\n"),
    }
    out
}

fn render_advice(state: &AppState, advice: &DashboardAdvice) -> String {
    let mut out = format!("\nAI Learning Insight\n  {}\n", advice.insight.value());
    out.push_str("\nRecommended for You\n");
    let resolved = resolve_recommendations(advice.recommendations.value(), &state.catalog);
    if resolved.is_empty() {
        out.push_str("  No recommendations right now.\n");
    }
    for (course, reason) in resolved {
        out.push_str(&format!("  [{}] {}\n      {}\n", course.id, course.title, reason));
    }
    out
}

fn render_catalog(state: &AppState) -> String {
    let mut out = String::from("Course Catalog\n");
    if state.search_query.is_empty() {
        out.push_str("Browse through our expert-led courses.\n");
    } else {
        out.push_str(&format!("Showing results for \"{}\"\n", state.search_query));
    }
    let chips: Vec<String> = CategoryFilter::choices()
        .iter()
        .map(|c| {
            if *c == state.category {
                format!("[{}]", c.label())
            } else {
                c.label().to_string()
            }
        })
        .collect();
    out.push_str(&format!("{}\n\n", chips.join(" | ")));

    let found = filter_courses(&state.catalog, &state.category, &state.search_query);
    if found.is_empty() {
        out.push_str("No courses found\nTry adjusting your search query or category filter.\n");
    }
    for c in found {
        out.push_str(&format!(
            "  [{}] {} ({})\n      {}\n      * {:.1} | {} | {} students\n",
            c.id,
            c.title,
            c.category,
            c.description,
            c.rating,
            c.duration,
            group_thousands(c.students_count)
        ));
    }
    out
}

fn render_player(state: &AppState) -> String {
    let Some(player) = &state.player else {
        return "No course selected. Use: open <course-id>\n".to_string();
    };
    let current = player.current_lesson();
    let mut out = format!(
        "{}\nNow playing: {} ({})\n  {}\n  {}\n  Instructor: {}\n\nCourse Content - {}\n",
        player.course().title,
        current.title,
        if player.is_completed(&current.id) {
            "Completed"
        } else {
            "Mark as Complete"
        },
        current.video_url,
        player.lesson_summary(),
        player.course().instructor,
        player.progress_label()
    );
    for (idx, lesson) in player.lessons().iter().enumerate() {
        out.push_str(&format!(
            "  {} {}{}. {} [{}] ({})\n",
            if lesson.id == current.id { ">" } else { " " },
            if player.is_completed(&lesson.id) { "x " } else { "  " },
            idx + 1,
            lesson.title,
            lesson.id,
            lesson.duration
        ));
    }
    out
}

fn render_docs() -> String {
    let mut out = format!("{DOCS_TITLE}\n{DOCS_INTRO}\n");
    for block in &CODE_BLOCKS {
        out.push_str(&format!(
            "\n== {} ({}) ==\n{}\n",
            block.title, block.language, block.code
        ));
    }
    out
}

fn render_viva() -> String {
    let mut out = format!("{VIVA_TITLE}\n{VIVA_INTRO}\n");
    for (i, pair) in VIVA_QA.iter().enumerate() {
        out.push_str(&format!("\nQ{}. {}\n    \"{}\"\n", i + 1, pair.question, pair.answer));
    }
    out
}
