//! Terminal UI for tic-tac-toe

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod app;
mod cli;
mod config;
mod input;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::EnvFilter;

use app::App;
use cli::{Cli, Command};
use config::TuiConfig;
use ui::BoardLayout;

type Tty = Terminal<CrosstermBackend<Stdout>>;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = TuiConfig::load(&cli.config)?;
    if let Some(log_file) = cli.log_file {
        config = config.with_log_file(log_file);
    }
    if cli.no_mouse {
        config = config.with_mouse(false);
    }

    match cli.command.unwrap_or_default() {
        Command::Play => play(&config),
        Command::PrintConfig => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

/// Logs go to a file so they never corrupt the terminal.
fn initialize_tracing(log_file: &Path) -> Result<()> {
    let file = std::fs::File::create(log_file)
        .with_context(|| format!("Failed to create log file {}", log_file.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tictactoe=debug")),
        )
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

/// Runs an interactive game until the user quits.
fn play(config: &TuiConfig) -> Result<()> {
    initialize_tracing(config.log_file())?;
    info!(?config, "Starting tic-tac-toe TUI");

    let palette = config.resolve_palette()?;
    let mouse = *config.mouse();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let app = App::new(config.title().clone(), palette);
    let res = run_app(&mut terminal, app, config.tick_rate());

    restore_terminal(&mut terminal, mouse)?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    info!("Exiting");
    res
}

fn restore_terminal(terminal: &mut Tty, mouse: bool) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    if mouse {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    terminal.show_cursor()?;
    Ok(())
}

/// Event loop: redraw when something changed, then wait for input.
#[instrument(skip_all, fields(tick = ?tick))]
fn run_app(terminal: &mut Tty, mut app: App, tick: Duration) -> Result<()> {
    let mut layout = BoardLayout::default();

    while !app.should_quit() {
        if app.take_redraw() {
            terminal.draw(|frame| {
                layout = BoardLayout::new(frame.area());
                ui::draw(frame, &app, &layout);
            })?;
        }

        if !event::poll(tick)? {
            continue;
        }
        let intent = match event::read()? {
            Event::Key(key) => input::key_intent(key),
            Event::Mouse(mouse) => input::mouse_intent(mouse, &layout),
            Event::Resize(width, height) => {
                debug!(width, height, "Terminal resized");
                app.request_redraw();
                None
            }
            _ => None,
        };
        if let Some(intent) = intent {
            app.dispatch(intent);
        }
    }

    Ok(())
}
