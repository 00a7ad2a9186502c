//! Strictly 2048 - terminal game and headless autoplay.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::sync::Mutex;
use strictly_2048::{GameEngine, RandomSource, RngSource, ScoreStore, StdRngSource};
use strictly_2048_tui::{
    App, AppConfig, Cli, Command, JsonFileStore, action_for_key, play_game, ui,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config).context("Failed to load configuration")?;

    match cli.command {
        Command::Play { seed } => run_play(&config, seed),
        Command::Autoplay {
            games,
            seed,
            max_moves,
        } => run_autoplay(&config, games, seed, max_moves),
    }
}

fn filter(config: &AppConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter()))
}

fn rng_source(seed: Option<u64>) -> StdRngSource {
    match seed {
        Some(seed) => RngSource::seeded(seed),
        None => RngSource::from_os_rng(),
    }
}

/// Run the interactive terminal game
fn run_play(config: &AppConfig, seed: Option<u64>) -> Result<()> {
    // Logs go to a file; stdout belongs to the terminal UI.
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(config.log_file())
        .with_context(|| format!("Failed to open log file {}", config.log_file().display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter(config))
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    info!(seed = ?seed, "Starting Strictly 2048");

    let store = JsonFileStore::new(config.best_score_file());
    let engine = GameEngine::new(rng_source(seed), store);
    let mut app = App::new(engine);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        warn!(error = %err, "Game loop failed");
    }
    info!("Exiting Strictly 2048");
    res
}

fn run_app<R, S>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<R, S>,
) -> Result<()>
where
    R: RandomSource,
    S: ScoreStore,
{
    loop {
        let snapshot = app.snapshot();
        terminal.draw(|f| ui::draw(f, &snapshot, app.status_message()))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && let Some(action) = action_for_key(key.code)
        {
            app.handle(action);
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}

/// Run headless games and print one line per game
fn run_autoplay(config: &AppConfig, games: u32, seed: Option<u64>, max_moves: usize) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(filter(config))
        .with_writer(io::stderr)
        .init();

    info!(games, "Starting autoplay");

    let store = JsonFileStore::new(config.best_score_file());
    let mut engine = GameEngine::new(rng_source(seed), store);

    for game in 1..=games {
        if game > 1 {
            engine.reset();
        }
        let summary = play_game(&mut engine, max_moves);
        if let Some(e) = engine.take_store_warning() {
            warn!(error = %e, "Best score not saved");
        }
        println!(
            "game {:>3}  score {:>7}  max tile {:>5}  moves {:>5}{}",
            game,
            summary.score,
            summary.max_tile,
            summary.moves,
            if summary.won { "  reached 2048" } else { "" }
        );
    }

    println!("best score {}", engine.best_score());
    Ok(())
}
