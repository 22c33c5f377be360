use crate::advisor::{resolve_recommendations, DashboardAdvice};
use crate::analytics::{
    course_performance, truncate_for_table, StatKind, STAT_CARDS, WEEKLY_TREND,
};
use crate::catalog::{enrolled_courses, filter_courses, group_thousands, CategoryFilter, Course};
use crate::content::{CODE_BLOCKS, DOCS_INTRO, DOCS_TITLE, VIVA_INTRO, VIVA_QA, VIVA_TITLE};
use crate::state::{Action, AppState};
use crate::theme::ThemeConfig;
use eframe::egui::{self, Align, Frame, Layout, ProgressBar, RichText, ScrollArea, Sense, Stroke};
use std::time::{Duration, Instant};

const CARD_WIDTH: f32 = 260.0;
const COPIED_FOR: Duration = Duration::from_secs(2);

/// Which code block was copied last, and when.
#[derive(Debug, Default)]
pub struct CopyFeedback {
    last: Option<(&'static str, Instant)>,
}

impl CopyFeedback {
    fn mark(&mut self, id: &'static str) {
        self.last = Some((id, Instant::now()));
    }

    fn is_fresh(&self, id: &str) -> bool {
        matches!(self.last, Some((last, at)) if last == id && at.elapsed() < COPIED_FOR)
    }
}

fn card(theme: &ThemeConfig) -> Frame {
    Frame::none()
        .fill(theme.card_fill())
        .stroke(Stroke::new(1.0, theme.border()))
        .rounding(theme.radius)
        .inner_margin(egui::Margin::same(14.0))
}

fn section_title(ui: &mut egui::Ui, text: &str) {
    ui.add_space(6.0);
    ui.label(RichText::new(text).strong().size(18.0));
}

pub fn dashboard(ui: &mut egui::Ui, state: &AppState, theme: &ThemeConfig, out: &mut Vec<Action>) {
    ui.heading(format!("Welcome back, {}!", state.user.first_name()));
    ui.label(RichText::new("Pick up where you left off.").color(theme.muted()));

    section_title(ui, "In Progress");
    let enrolled = enrolled_courses(&state.catalog, &state.user);
    if enrolled.is_empty() {
        ui.label(RichText::new("You are not enrolled in any course yet.").color(theme.muted()));
    }
    ui.horizontal_wrapped(|ui| {
        for course in enrolled {
            card(theme).show(ui, |ui| {
                ui.set_width(CARD_WIDTH);
                ui.label(RichText::new(&course.category).small().color(theme.accent()));
                ui.label(RichText::new(&course.title).strong());
                ui.label(RichText::new(&course.instructor).color(theme.muted()));
                let done = course.lessons.iter().filter(|l| l.is_completed).count();
                let total = course.lessons.len().max(1);
                ui.add(ProgressBar::new(done as f32 / total as f32).show_percentage());
                if ui.button("Continue Learning").clicked() {
                    out.push(Action::StartCourse(course.id.clone()));
                }
            });
        }
    });

    match state.advice.ready() {
        Some(advice) => advice_panels(ui, state, advice, theme, out),
        None => {
            section_title(ui, "AI Learning Insight");
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(RichText::new("Generating personalized insights...").color(theme.muted()));
            });
        }
    }
}

fn advice_panels(
    ui: &mut egui::Ui,
    state: &AppState,
    advice: &DashboardAdvice,
    theme: &ThemeConfig,
    out: &mut Vec<Action>,
) {
    section_title(ui, "AI Learning Insight");
    card(theme).fill(theme.accent_soft()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(RichText::new(advice.insight.value()).italics());
    });

    section_title(ui, "Recommended for You");
    let resolved = resolve_recommendations(advice.recommendations.value(), &state.catalog);
    if resolved.is_empty() {
        ui.label(RichText::new("No recommendations right now.").color(theme.muted()));
    }
    for (course, reason) in resolved {
        let response = card(theme)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(&course.title).strong());
                ui.label(RichText::new(reason).color(theme.muted()));
            })
            .response
            .interact(Sense::click())
            .on_hover_cursor(egui::CursorIcon::PointingHand);
        if response.clicked() {
            out.push(Action::StartCourse(course.id.clone()));
        }
    }
}

pub fn catalog(ui: &mut egui::Ui, state: &AppState, theme: &ThemeConfig, out: &mut Vec<Action>) {
    ui.heading("Course Catalog");
    if state.search_query.is_empty() {
        ui.label(RichText::new("Browse through our expert-led courses.").color(theme.muted()));
    } else {
        ui.label(
            RichText::new(format!("Showing results for \"{}\"", state.search_query))
                .color(theme.muted()),
        );
    }

    ui.horizontal_wrapped(|ui| {
        for choice in CategoryFilter::choices() {
            let selected = choice == state.category;
            if ui.selectable_label(selected, choice.label()).clicked() && !selected {
                out.push(Action::SetCategory(choice));
            }
        }
    });
    ui.separator();

    let found = filter_courses(&state.catalog, &state.category, &state.search_query);
    if found.is_empty() {
        ui.add_space(24.0);
        ui.vertical_centered(|ui| {
            ui.label(RichText::new("No courses found").strong());
            ui.label(
                RichText::new("Try adjusting your search query or category filter.")
                    .color(theme.muted()),
            );
        });
        return;
    }
    ui.horizontal_wrapped(|ui| {
        for course in found {
            course_card(ui, course, theme, out);
        }
    });
}

fn course_card(ui: &mut egui::Ui, course: &Course, theme: &ThemeConfig, out: &mut Vec<Action>) {
    let response = card(theme)
        .show(ui, |ui| {
            ui.set_width(CARD_WIDTH);
            ui.horizontal(|ui| {
                ui.label(RichText::new(&course.category).small().color(theme.accent()));
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    ui.label(format!("★ {:.1}", course.rating));
                });
            });
            ui.label(RichText::new(&course.title).strong());
            ui.label(RichText::new(&course.description).color(theme.muted()));
            ui.horizontal(|ui| {
                ui.label(RichText::new(&course.duration).small());
                ui.label(
                    RichText::new(format!("{} students", group_thousands(course.students_count)))
                        .small(),
                );
            });
        })
        .response
        .interact(Sense::click())
        .on_hover_cursor(egui::CursorIcon::PointingHand);
    if response.clicked() {
        out.push(Action::StartCourse(course.id.clone()));
    }
}

pub fn player(ui: &mut egui::Ui, state: &AppState, theme: &ThemeConfig, out: &mut Vec<Action>) {
    let Some(session) = &state.player else {
        ui.label("No course selected. Pick one from the catalog.");
        if ui.button("Browse courses").clicked() {
            out.push(Action::SelectTab(crate::nav::Tab::Courses));
        }
        return;
    };
    let current = session.current_lesson();
    let done = session.is_completed(&current.id);

    egui::SidePanel::right("lesson_list")
        .resizable(false)
        .default_width(280.0)
        .show_inside(ui, |ui| {
            ui.label(RichText::new("Course Content").strong());
            ui.label(RichText::new(session.progress_label()).color(theme.muted()));
            ui.separator();
            for (idx, lesson) in session.lessons().iter().enumerate() {
                let marker = if session.is_completed(&lesson.id) { "✔" } else { "○" };
                let label = format!("{marker} {}. {}  ({})", idx + 1, lesson.title, lesson.duration);
                if ui.selectable_label(lesson.id == current.id, label).clicked() {
                    out.push(Action::SelectLesson(lesson.id.clone()));
                }
            }
        });

    ui.label(RichText::new(&session.course().title).color(theme.muted()));
    ui.heading(&current.title);
    card(theme).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.set_min_height(180.0);
        ui.vertical_centered(|ui| {
            ui.add_space(60.0);
            ui.hyperlink_to("▶ Play lesson video", &current.video_url);
        });
    });

    ui.horizontal(|ui| {
        let (text, color) = if done {
            ("Completed", theme.success())
        } else {
            ("Mark as Complete", theme.accent())
        };
        if ui.button(RichText::new(text).color(color)).clicked() {
            out.push(Action::ToggleLessonComplete(current.id.clone()));
        }
        ui.label(RichText::new(&current.duration).color(theme.muted()));
    });

    section_title(ui, "About this lesson");
    ui.label(session.lesson_summary());
    ui.label(RichText::new(format!("Instructor: {}", session.course().instructor)).color(theme.muted()));
}

pub fn admin(ui: &mut egui::Ui, state: &AppState, theme: &ThemeConfig) {
    ui.heading("Admin Dashboard");
    ui.label(RichText::new("Manage your academy and monitor performance.").color(theme.muted()));

    ui.horizontal_wrapped(|ui| {
        for stat in &STAT_CARDS {
            card(theme).show(ui, |ui| {
                ui.set_width(180.0);
                ui.horizontal(|ui| {
                    ui.label(RichText::new(stat_icon(stat.kind)).color(theme.accent()));
                    ui.label(RichText::new(stat.label).color(theme.muted()));
                });
                ui.label(RichText::new(stat.value).strong().size(22.0));
                ui.label(RichText::new(stat.trend).small().color(theme.success()));
            });
        }
    });

    section_title(ui, "Enrollment Trends");
    card(theme).show(ui, |ui| {
        ui.set_width(ui.available_width());
        enrollment_chart(ui, theme);
    });

    section_title(ui, "Recent Course Performance");
    card(theme).show(ui, |ui| {
        egui::Grid::new("course_performance")
            .num_columns(3)
            .striped(true)
            .spacing([24.0, 8.0])
            .show(ui, |ui| {
                ui.label(RichText::new("Course").strong());
                ui.label(RichText::new("Instructor").strong());
                ui.label(RichText::new("Sales").strong());
                ui.end_row();
                for row in course_performance(&state.catalog) {
                    ui.label(truncate_for_table(&row.title, 36));
                    ui.label(&row.instructor);
                    ui.label(row.sales.to_string());
                    ui.end_row();
                }
            });
    });
}

fn stat_icon(kind: StatKind) -> &'static str {
    match kind {
        StatKind::Students => "👥",
        StatKind::Courses => "📚",
        StatKind::Revenue => "$",
        StatKind::Completion => "✔",
    }
}

fn enrollment_chart(ui: &mut egui::Ui, theme: &ThemeConfig) {
    let height = 160.0;
    let (rect, _) =
        ui.allocate_exact_size(egui::vec2(ui.available_width(), height), Sense::hover());
    let painter = ui.painter_at(rect);
    let max = WEEKLY_TREND.iter().map(|d| d.enrollments).max().unwrap_or(1).max(1) as f32;
    let slot = rect.width() / WEEKLY_TREND.len() as f32;
    let label_band = 18.0;

    for (i, day) in WEEKLY_TREND.iter().enumerate() {
        let bar_height = (rect.height() - label_band) * day.enrollments as f32 / max;
        let x = rect.left() + slot * i as f32;
        let bottom = rect.bottom() - label_band;
        let bar = egui::Rect::from_min_max(
            egui::pos2(x + slot * 0.2, bottom - bar_height),
            egui::pos2(x + slot * 0.8, bottom),
        );
        painter.rect_filled(bar, 4.0, theme.accent());
        painter.text(
            egui::pos2(x + slot * 0.5, rect.bottom()),
            egui::Align2::CENTER_BOTTOM,
            day.day,
            egui::FontId::proportional(12.0),
            theme.muted(),
        );
    }
}

pub fn docs(ui: &mut egui::Ui, theme: &ThemeConfig, copied: &mut CopyFeedback) {
    ui.heading(DOCS_TITLE);
    ui.label(RichText::new(DOCS_INTRO).color(theme.muted()));

    for block in &CODE_BLOCKS {
        ui.add_space(8.0);
        card(theme).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(RichText::new(block.title).strong());
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    let label = if copied.is_fresh(block.id) { "Copied!" } else { "Copy" };
                    if ui.button(label).clicked() {
                        ui.output_mut(|o| o.copied_text = block.code.to_string());
                        copied.mark(block.id);
                        ui.ctx().request_repaint_after(COPIED_FOR);
                    }
                });
            });
            ScrollArea::horizontal()
                .id_source(block.id)
                .show(ui, |ui| ui.label(RichText::new(block.code).monospace()));
        });
    }
}

pub fn viva(ui: &mut egui::Ui, theme: &ThemeConfig) {
    ui.heading(VIVA_TITLE);
    ui.label(RichText::new(VIVA_INTRO).color(theme.muted()));

    for (i, pair) in VIVA_QA.iter().enumerate() {
        ui.add_space(6.0);
        card(theme).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(format!("Q{}. {}", i + 1, pair.question)).strong());
            ui.label(RichText::new(format!("\"{}\"", pair.answer)).italics());
        });
    }
}
