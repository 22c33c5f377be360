use super::views::{self, CopyFeedback};
use crate::advisor::fetch_dashboard_advice;
use crate::catalog::mock_catalog;
use crate::gemini::{runtime, GeminiClient};
use crate::nav::{nav_entries, NavSection, Tab};
use crate::settings::{save_settings, Settings};
use crate::state::{reduce, Action, AppState};
use crate::theme::{apply_theme, ensure_theme_files, load_presets, select_theme, ThemeConfig};
use eframe::{
    egui::{
        self, Align, CentralPanel, Context, Layout, RichText, ScrollArea, SidePanel,
        TopBottomPanel,
    },
    App, CreationContext,
};
use parking_lot::Mutex;
use std::mem;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, warn};

#[derive(Debug, Default)]
struct LoginForm {
    email: String,
    password: String,
    registering: bool,
    missing_fields: bool,
}

pub struct EduApp {
    state: AppState,
    settings: Settings,
    base_path: PathBuf,
    client: Arc<GeminiClient>,
    /// Actions produced off the UI thread, drained every frame.
    inbox: Arc<Mutex<Vec<Action>>>,
    theme: ThemeConfig,
    presets: Vec<ThemeConfig>,
    login: LoginForm,
    search_input: String,
    copied: CopyFeedback,
}

impl EduApp {
    pub fn new(
        cc: &CreationContext<'_>,
        base_path: PathBuf,
        settings: Settings,
        client: GeminiClient,
    ) -> Self {
        if let Err(e) = ensure_theme_files(&base_path) {
            warn!(error = %e, "could not write theme presets; using built-ins");
        }
        let presets = load_presets(&base_path);
        let theme = select_theme(&presets, settings.ui.last_theme.as_deref());
        apply_theme(&theme, &cc.egui_ctx);

        let state = AppState::new(mock_catalog()).with_sidebar(settings.ui.sidebar_open);
        Self {
            state,
            settings,
            base_path,
            client: Arc::new(client),
            inbox: Arc::new(Mutex::new(Vec::new())),
            theme,
            presets,
            login: LoginForm::default(),
            search_input: String::new(),
            copied: CopyFeedback::default(),
        }
    }

    fn dispatch(&mut self, action: Action) {
        let sidebar_was = self.state.sidebar_open;
        let state = mem::replace(&mut self.state, AppState::new(Vec::new()));
        self.state = reduce(state, action);
        if self.search_input != self.state.search_query {
            self.search_input.clone_from(&self.state.search_query);
        }
        if self.state.sidebar_open != sidebar_was {
            self.settings.ui.sidebar_open = self.state.sidebar_open;
            self.persist_settings();
        }
    }

    fn drain_inbox(&mut self) {
        let arrived = mem::take(&mut *self.inbox.lock());
        for action in arrived {
            self.dispatch(action);
        }
    }

    /// Starts both dashboard retrievals on the shared runtime. The result
    /// comes back through the inbox tagged with the user revision it was
    /// requested for.
    fn spawn_advice(&mut self, ctx: &Context) {
        let revision = self.state.user_revision;
        self.dispatch(Action::AdviceRequested { revision });

        let client = Arc::clone(&self.client);
        let inbox = Arc::clone(&self.inbox);
        let user = self.state.user.clone();
        let catalog = self.state.catalog.clone();
        let ctx = ctx.clone();
        runtime().spawn(async move {
            let advice = fetch_dashboard_advice(client.as_ref(), &user, &catalog).await;
            inbox.lock().push(Action::AdviceArrived { revision, advice });
            ctx.request_repaint();
        });
    }

    fn switch_theme(&mut self, name: &str, ctx: &Context) {
        self.theme = select_theme(&self.presets, Some(name));
        apply_theme(&self.theme, ctx);
        self.settings.ui.last_theme = Some(self.theme.name.clone());
        self.persist_settings();
    }

    fn persist_settings(&self) {
        if let Err(e) = save_settings(&self.settings, &self.base_path) {
            error!("Could not save settings: {e}");
        }
    }

    fn render_login(&mut self, ctx: &Context) -> Option<Action> {
        let mut action = None;
        CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(80.0);
                ui.label(RichText::new("EduAI").size(30.0).strong().color(self.theme.accent()));
                let title = if self.login.registering {
                    "Create an account"
                } else {
                    "Welcome back"
                };
                ui.heading(title);
                ui.label(
                    RichText::new("The intelligent way to learn technology.")
                        .color(self.theme.muted()),
                );
                ui.add_space(16.0);

                ui.add(
                    egui::TextEdit::singleline(&mut self.login.email)
                        .hint_text("Email address")
                        .desired_width(280.0),
                );
                let password = ui.add(
                    egui::TextEdit::singleline(&mut self.login.password)
                        .password(true)
                        .hint_text("Password")
                        .desired_width(280.0),
                );
                let submit_label = if self.login.registering {
                    "Sign Up"
                } else {
                    "Sign In"
                };
                let submitted = ui.button(submit_label).clicked()
                    || (password.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)));
                if submitted {
                    let email = self.login.email.trim();
                    if email.is_empty() || self.login.password.is_empty() {
                        self.login.missing_fields = true;
                    } else {
                        action = Some(Action::Login {
                            email: email.to_string(),
                        });
                    }
                }
                if self.login.missing_fields {
                    ui.label(
                        RichText::new("Enter an email and password.").color(self.theme.danger()),
                    );
                }

                ui.add_space(8.0);
                let switch_label = if self.login.registering {
                    "Already have an account? Sign in"
                } else {
                    "New here? Create an account"
                };
                if ui.link(switch_label).clicked() {
                    self.login.registering = !self.login.registering;
                }
            });
        });
        if action.is_some() {
            self.login = LoginForm::default();
        }
        action
    }

    fn render_sidebar(&mut self, ctx: &Context, out: &mut Vec<Action>) {
        let open = self.state.sidebar_open;
        SidePanel::left("nav")
            .resizable(false)
            .exact_width(if open { 220.0 } else { 56.0 })
            .show(ctx, |ui| {
                ui.add_space(8.0);
                let brand = if open { "EduAI" } else { "E" };
                ui.label(RichText::new(brand).size(22.0).strong().color(self.theme.accent()));
                ui.separator();

                let mut section = NavSection::Primary;
                for entry in nav_entries(self.state.user.role) {
                    if entry.section != section {
                        section = entry.section;
                        ui.separator();
                    }
                    let text = if open {
                        entry.label.to_string()
                    } else {
                        entry.label.chars().take(1).collect()
                    };
                    let selected = self.state.tab == entry.tab;
                    let resp = ui.selectable_label(selected, text).on_hover_text(entry.label);
                    if resp.clicked() && !selected {
                        out.push(Action::SelectTab(entry.tab));
                    }
                }

                ui.with_layout(Layout::bottom_up(Align::Min), |ui| {
                    ui.add_space(8.0);
                    if ui.button(if open { "Sign Out" } else { "⏻" }).clicked() {
                        out.push(Action::Logout);
                    }
                    let role = self.state.user.role;
                    let mode = if open {
                        format!("Mode: {role}")
                    } else {
                        role.as_str().chars().take(1).collect()
                    };
                    if ui.button(mode).on_hover_text("Switch role").clicked() {
                        out.push(Action::ToggleRole);
                    }
                    if open {
                        self.render_theme_picker(ui, ctx);
                    }
                });
            });
    }

    fn render_theme_picker(&mut self, ui: &mut egui::Ui, ctx: &Context) {
        let mut chosen = None;
        egui::ComboBox::from_id_source("theme_picker")
            .selected_text(self.theme.name.as_str())
            .show_ui(ui, |ui| {
                for preset in &self.presets {
                    let selected = preset.name == self.theme.name;
                    if ui.selectable_label(selected, preset.name.as_str()).clicked() && !selected {
                        chosen = Some(preset.name.clone());
                    }
                }
            });
        if let Some(name) = chosen {
            self.switch_theme(&name, ctx);
        }
    }

    fn render_top_bar(&mut self, ctx: &Context, out: &mut Vec<Action>) {
        TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ui.button("☰").on_hover_text("Toggle sidebar").clicked() {
                    out.push(Action::ToggleSidebar);
                }
                let search = ui.add(
                    egui::TextEdit::singleline(&mut self.search_input)
                        .hint_text("Search for courses...")
                        .desired_width(320.0),
                );
                if search.changed() {
                    out.push(Action::SetSearch(self.search_input.clone()));
                }
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    ui.label(
                        RichText::new(self.state.user.role.as_str()).color(self.theme.muted()),
                    );
                    ui.label(RichText::new(&self.state.user.name).strong());
                });
            });
            ui.add_space(4.0);
        });
    }

    fn render_tab(&mut self, ctx: &Context, out: &mut Vec<Action>) {
        CentralPanel::default().show(ctx, |ui| {
            let state = &self.state;
            let theme = &self.theme;
            if state.tab == Tab::Player {
                views::player(ui, state, theme, out);
                return;
            }
            ScrollArea::vertical().auto_shrink([false; 2]).show(ui, |ui| match state.tab {
                Tab::Dashboard => views::dashboard(ui, state, theme, out),
                Tab::Courses => views::catalog(ui, state, theme, out),
                Tab::Admin => views::admin(ui, state, theme),
                Tab::Docs => views::docs(ui, theme, &mut self.copied),
                Tab::Viva => views::viva(ui, theme),
                Tab::Player => {}
            });
        });
    }
}

impl App for EduApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.drain_inbox();

        if !self.state.authenticated {
            if let Some(action) = self.render_login(ctx) {
                self.dispatch(action);
                ctx.request_repaint();
            }
            return;
        }

        if self.state.wants_advice() {
            self.spawn_advice(ctx);
        }

        let mut actions = Vec::new();
        self.render_sidebar(ctx, &mut actions);
        self.render_top_bar(ctx, &mut actions);
        self.render_tab(ctx, &mut actions);

        if !actions.is_empty() {
            for action in actions {
                self.dispatch(action);
            }
            ctx.request_repaint();
        }
    }
}

pub fn launch_gui(
    base_path: PathBuf,
    settings: Settings,
    client: GeminiClient,
) -> eframe::Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("EduAI")
            .with_inner_size([1200.0, 780.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "EduAI",
        native_options,
        Box::new(move |cc| Box::new(EduApp::new(cc, base_path, settings, client))),
    )
}
