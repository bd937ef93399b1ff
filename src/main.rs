//! blockfall - a falling-block puzzle for the terminal

mod board;
mod game;
mod game_loop;
mod input;
mod piece;
mod score;
mod settings;
mod tetromino;
mod ui;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use game::{Action, Game};
use game_loop::GameLoop;
use input::InputHandler;
use ratatui::{backend::CrosstermBackend, Terminal};
use settings::Settings;
use std::{
    io::{self, stdout},
    time::{Duration, Instant},
};

/// Upper bound on how long a frame waits for input
const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Get the blockfall temp directory, creating it if needed
fn temp_dir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("blockfall");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn main() -> io::Result<()> {
    let session_id: u32 = rand::random();

    // The terminal belongs to the UI, so logs go to a file
    let log_dir = temp_dir();
    let log_file = format!("{:08x}.log", session_id);
    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("blockfall=debug"));
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(filter)
        .with_ansi(false)
        .init();

    tracing::info!(
        "blockfall starting up, session={:08x}, log={}",
        session_id,
        log_dir.join(&log_file).display()
    );

    let settings = Settings::load();
    let game = match settings.gameplay.seed {
        Some(seed) => Game::with_seed(seed),
        None => Game::new(),
    };
    let mut driver = GameLoop::new(game, settings.tick_interval(), Instant::now());
    let input = InputHandler::from_settings(&settings);

    // Setup terminal; once raw mode is on, every path below restores it
    enable_raw_mode()?;
    let run = execute!(stdout(), EnterAlternateScreen).and_then(|()| {
        let backend = CrosstermBackend::new(stdout());
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;
        run_app(&mut terminal, &mut driver, &input, &settings)
    });

    let result = first_error(run, restore_terminal());

    if let Err(e) = &result {
        tracing::error!("terminal error: {}", e);
    }

    let final_state = driver.snapshot();
    tracing::info!(
        score = final_state.score,
        lines = final_state.lines,
        "shutting down"
    );
    if result.is_ok() {
        println!("Final Score: {}", final_state.score);
        println!("Lines: {}", final_state.lines);
    }

    result
}

/// Leave raw mode and the alternate screen. Both steps always run.
fn restore_terminal() -> io::Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(stdout(), LeaveAlternateScreen);
    first_error(raw, screen)
}

/// The first failure wins; later ones are only logged
fn first_error(first: io::Result<()>, second: io::Result<()>) -> io::Result<()> {
    match (first, second) {
        (Err(e), Err(later)) => {
            tracing::warn!("also failed while restoring the terminal: {}", later);
            Err(e)
        }
        (Err(e), Ok(())) | (Ok(()), Err(e)) => Err(e),
        (Ok(()), Ok(())) => Ok(()),
    }
}

/// Draw, wait for input until the next tick is due, apply it, then advance the clock.
/// Commands and ticks run one after another on this thread only.
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    driver: &mut GameLoop,
    input: &InputHandler,
    settings: &Settings,
) -> io::Result<()> {
    loop {
        let snapshot = driver.snapshot();
        terminal.draw(|frame| ui::render_game(frame, &snapshot, settings))?;

        let timeout = driver.time_until_tick(Instant::now()).min(FRAME_DURATION);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match input.key_down(key) {
                    Some(Action::Quit) => return Ok(()),
                    Some(action) => driver.handle(action, Instant::now()),
                    None => {}
                }
            }
        }

        driver.advance(Instant::now());
    }
}
