use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod advisor;
mod analytics;
mod catalog;
mod cli;
mod content;
mod gemini;
mod gui;
mod nav;
mod player;
mod settings;
mod state;
mod theme;
mod user;

use cli::{parse_command, render, Command, HELP};
use gemini::{runtime, GeminiClient};
use settings::{
    default_base_path, ensure_base_folders, load_or_init_settings, save_settings, Settings,
};
use state::{reduce, Action, AppState};

#[derive(Parser, Debug)]
#[command(
    name = "eduai",
    version,
    about = "EduAI learning dashboard with AI course recommendations"
)]
struct CliArgs {
    /// Choose GUI (default) or CLI mode
    #[arg(long, value_enum, default_value = "gui")]
    mode: RunMode,
    /// Override data base path (defaults to ./data next to the exe)
    #[arg(long)]
    base_path: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum RunMode {
    Gui,
    Cli,
}

impl RunMode {
    fn as_str(self) -> &'static str {
        match self {
            RunMode::Gui => "gui",
            RunMode::Cli => "cli",
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("eduai=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = CliArgs::parse();
    let base_path = args.base_path.unwrap_or_else(default_base_path);

    ensure_base_folders(&base_path)
        .with_context(|| format!("creating base folders at {}", base_path.display()))?;
    let mut settings = load_or_init_settings(&base_path).context("loading settings")?;
    settings.mode = args.mode.as_str().to_string();
    info!(path = %base_path.display(), mode = %settings.mode, "using data path");

    let client = GeminiClient::from_settings(&settings.ai);
    if !client.has_api_key() {
        warn!(
            var = %settings.ai.api_key_env,
            "no API key in environment; AI panels will show fallback content"
        );
    }

    match args.mode {
        RunMode::Gui => {
            if let Err(e) = gui::launch_gui(base_path.clone(), settings.clone(), client) {
                error!("Failed to start GUI: {e}");
            }
            // The GUI saves its own settings on exit.
            return Ok(());
        }
        RunMode::Cli => run_cli(&mut settings, &client),
    }

    if let Err(e) = save_settings(&settings, &base_path) {
        error!("Could not save settings: {e}");
    }
    Ok(())
}

fn run_cli(settings: &mut Settings, client: &GeminiClient) {
    println!("EduAI CLI (model {})", client.model());
    println!("Type 'help' for commands, 'exit' to quit.\n");

    let mut state =
        AppState::new(catalog::mock_catalog()).with_sidebar(settings.ui.sidebar_open);
    print!("{}", render(&state));

    let stdin = io::stdin();
    loop {
        print!("eduai> ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                error!("Error reading input: {e}");
                break;
            }
        }

        let action = match parse_command(&input) {
            Command::Exit => {
                println!("Goodbye");
                break;
            }
            Command::Help => {
                println!("{HELP}");
                continue;
            }
            Command::Invalid(msg) => {
                println!("{msg}");
                continue;
            }
            Command::Show => None,
            Command::CompleteCurrent => state
                .player
                .as_ref()
                .map(|p| Action::ToggleLessonComplete(p.current_lesson().id.clone())),
            Command::Act(action) => Some(action),
        };

        if let Some(action) = action {
            state = reduce(state, action);
        }
        state = refresh_advice(state, client);
        settings.ui.sidebar_open = state.sidebar_open;
        println!();
        print!("{}", render(&state));
    }
}

/// Blocks on both AI retrievals when the dashboard has nothing for the
/// current user yet.
fn refresh_advice(state: AppState, client: &GeminiClient) -> AppState {
    if !state.wants_advice() {
        return state;
    }
    let revision = state.user_revision;
    let state = reduce(state, Action::AdviceRequested { revision });
    println!("Generating personalized insights...");
    let advice = runtime().block_on(advisor::fetch_dashboard_advice(
        client,
        &state.user,
        &state.catalog,
    ));
    reduce(state, Action::AdviceArrived { revision, advice })
}
