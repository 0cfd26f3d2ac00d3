use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use parley_core::{ConversationService, HttpBackend, OpenAiAssistant, ParleyConfig};
use parley_tui::app::App;

#[derive(Parser, Debug)]
#[command(name = "parley-tui")]
#[command(author, version, about = "Terminal messaging client with an AI assistant", long_about = None)]
struct Args {
    /// Color theme (tokyo-night, lavender, dracula, nord)
    #[arg(short, long)]
    theme: Option<String>,

    /// Act as this user id instead of the configured one
    #[arg(short, long)]
    user: Option<i64>,

    /// Read configuration from this file only
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ParleyConfig::load_from_paths(vec![path.clone()]),
        None => ParleyConfig::load(),
    }
    .context("Failed to load configuration")?;
    if let Some(user) = args.user {
        config.session.current_user_id = user;
    }

    setup_logging(&config)?;

    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, &config, args.theme.as_deref());
    restore_terminal(&mut terminal)?;

    if let Err(e) = result {
        eprintln!("Application error: {e}");
        return Err(e);
    }

    Ok(())
}

/// The terminal owns stdout, so log lines go to a file.
fn setup_logging(config: &ParleyConfig) -> Result<()> {
    let Some(path) = config.log_file() else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level())),
        )
        .init();

    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &ParleyConfig,
    theme: Option<&str>,
) -> Result<()> {
    let backend = HttpBackend::from_config(config)?;
    let assistant = OpenAiAssistant::from_config(&config.assistant)?;
    if !assistant.is_configured() {
        info!("No assistant API key configured; assistant replies will explain how to set one");
    }
    info!(
        user = config.current_user_id(),
        backend = backend.base_url(),
        "Starting parley-tui"
    );

    let service = ConversationService::new(Arc::new(backend), Arc::new(assistant));

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let mut app = App::new(config, service, theme);
        app.run(terminal).await
    })
}
