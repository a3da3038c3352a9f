use std::fs::File;
use std::io::{self, stdout, Stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use boardgames::{Checkers, Minesweeper, Snake};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{
    crossterm::{
        event::{self, Event, KeyCode},
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    },
    prelude::*,
};
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod checkers_ui;
mod config;
mod minesweeper_ui;
mod screen;
mod snake_ui;

use checkers_ui::CheckersScreen;
use config::{Config, Game};
use minesweeper_ui::MinesweeperScreen;
use screen::Screen;
use snake_ui::SnakeScreen;

#[derive(Parser)]
struct Args {
    /// Which game to play
    #[arg(value_enum)]
    game: Game,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Board width, overrides the config file
    #[arg(long)]
    width: Option<usize>,

    /// Board height, overrides the config file
    #[arg(long)]
    height: Option<usize>,

    /// Path to a JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,

    /// Write the log to this file. Without it, nothing is logged, since the
    /// terminal is taken by the game.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level, args.log_file.as_deref())?;

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let size = config.board_size(args.game);
    let (width, height) = (
        args.width.unwrap_or(size.width),
        args.height.unwrap_or(size.height),
    );

    // Get a random seed
    let seed = args.seed.or(config.seed).unwrap_or_else(rand::random);
    info!(seed, game = ?args.game, width, height);
    let rng = StdRng::seed_from_u64(seed);

    let mut screen: Box<dyn Screen> = match args.game {
        Game::Checkers => Box::new(CheckersScreen::new(Checkers::with_size(width, height)?)),
        Game::Minesweeper => Box::new(MinesweeperScreen::new(Minesweeper::new(
            width, height, rng,
        )?)),
        Game::Snake => Box::new(SnakeScreen::new(Snake::new(width, height, rng)?)),
    };

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let result = Terminal::new(CrosstermBackend::new(stdout()))
        .and_then(|mut terminal| run(&mut terminal, screen.as_mut()));
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result?;
    Ok(())
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    screen: &mut dyn Screen,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| screen.render(frame))?;
        match next_key()? {
            Some(KeyCode::Char('q') | KeyCode::Esc) => return Ok(()),
            Some(key) => screen.handle_key(key),
            None => {}
        }
        screen.tick();
    }
}

/// Waits up to one frame for a key press.
fn next_key() -> io::Result<Option<KeyCode>> {
    if event::poll(std::time::Duration::from_millis(16))? {
        if let Event::Key(key) = event::read()? {
            if key.kind == event::KeyEventKind::Press {
                return Ok(Some(key.code));
            }
        }
    }
    Ok(None)
}

fn initialize_logging(level: LevelFilter, log_file: Option<&Path>) -> io::Result<()> {
    let writer = match log_file {
        Some(path) => BoxMakeWriter::new(Mutex::new(File::create(path)?)),
        None => BoxMakeWriter::new(io::sink),
    };

    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .with_ansi(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_ansi(false)
                .with_writer(writer),
        )
        .with(filter)
        .init();
    Ok(())
}
