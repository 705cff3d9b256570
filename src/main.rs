mod clock;
mod collision;
mod constants;
mod entities;
mod game;
mod input;
mod kinematics;
mod rendering;
mod spawner;
mod state;
mod terminal_io;
mod types;

use std::io::{self, Write};
use clap::Parser;
use crossterm::{
    cursor::{Hide, Show},
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal::{disable_raw_mode, enable_raw_mode, size, supports_keyboard_enhancement},
};
use log::{error, info, LevelFilter};

use crate::game::Game;
use crate::rendering::{GameGrid, OutputTarget, ScreenBuffer};
use crate::terminal_io::SimulatedInput;

const DEFAULT_DEBUG_FRAMES: u64 = 600;

#[derive(Parser)]
#[command(name = "meteor-dash")]
#[command(about = "Dodge and shoot drifting meteors in the terminal")]
struct Cli {
    /// Run a scripted flight headlessly, dumping frames to the log
    #[arg(long)]
    debug: bool,

    /// Screen width in debug mode
    #[arg(long, default_value_t = 80)]
    width: u16,

    /// Screen height in debug mode
    #[arg(long, default_value_t = 24)]
    height: u16,

    /// Stop after this many frames
    #[arg(long)]
    frames: Option<u64>,

    /// Seed for meteor placement
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value = "meteor-dash.log")]
    log_file: String,

    /// off, error, warn, info, debug or trace
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn parse_log_level(level: &str) -> io::Result<LevelFilter> {
    level.parse::<LevelFilter>().map_err(|e| {
        // The logger is not installed yet, so this only reaches stderr.
        eprintln!("Invalid log level '{}': {}", level, e);
        io::Error::new(io::ErrorKind::InvalidInput, format!("invalid log level '{}'", level))
    })
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let log_level = parse_log_level(&cli.log_level)?;
    simple_logging::log_to_file(&cli.log_file, log_level)?;
    info!("Starting meteor-dash.");

    if cli.debug {
        info!("Debug mode enabled. Screen {}x{}", cli.width, cli.height);
        let quit_frame = cli.frames.unwrap_or(DEFAULT_DEBUG_FRAMES);
        let mut game = Game::new(
            cli.width,
            cli.height,
            OutputTarget::ScreenBuffer(ScreenBuffer::new(cli.width, cli.height)),
            Some(SimulatedInput::demo(quit_frame)),
            cli.frames,
            cli.seed,
        );
        let score = game.run()?;
        info!("Debug run finished with score {}", score);
        return Ok(());
    }

    info!("Attempting to enable raw mode.");
    enable_raw_mode().map_err(|e| { error!("Failed to enable raw mode: {}", e); e })?;
    let result = run_in_terminal(&cli);
    let restored = restore_terminal();
    match &result {
        Ok(score) => info!("Exiting with final score {}", score),
        Err(e) => error!("Game aborted: {}", e),
    }
    result.and(restored)
}

fn run_in_terminal(cli: &Cli) -> io::Result<u32> {
    let (width, height) = size().map_err(|e| { error!("Failed to get terminal size: {}", e); e })?;
    info!("Terminal size: {}x{}", width, height);
    let mut stdout_target = OutputTarget::Stdout(io::stdout());

    // Release events let held keys end promptly; without them the hold window applies.
    if supports_keyboard_enhancement().unwrap_or(false) {
        stdout_target
            .execute_other_command(PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES))
            .map_err(|e| { error!("Failed to enable key release events: {}", e); e })?;
        info!("Keyboard enhancement enabled.");
    }

    let game_grid_dummy = GameGrid::new(width, height);
    game_grid_dummy
        .clear_screen_manual(&mut stdout_target, width, height)
        .map_err(|e| { error!("Failed to clear screen manually: {}", e); e })?;
    stdout_target.execute_other_command(Hide).map_err(|e| { error!("Failed to hide cursor: {}", e); e })?;
    stdout_target.flush()?;

    let mut game = Game::new(width, height, stdout_target, None, cli.frames, cli.seed);
    game.run()
}

// Every step runs even if an earlier one fails; the first error is reported.
fn restore_terminal() -> io::Result<()> {
    let mut stdout_target = OutputTarget::Stdout(io::stdout());
    let popped = if supports_keyboard_enhancement().unwrap_or(false) {
        stdout_target.execute_other_command(PopKeyboardEnhancementFlags)
    } else {
        Ok(())
    };
    let cleared = size().and_then(|(width, height)| {
        GameGrid::new(width, height).clear_screen_manual(&mut stdout_target, width, height)
    });
    let shown = stdout_target
        .execute_other_command(Show)
        .map_err(|e| { error!("Failed to show cursor on exit: {}", e); e });
    let raw_mode_off = disable_raw_mode().map_err(|e| { error!("Failed to disable raw mode on exit: {}", e); e });
    popped.and(cleared).and(shown).and(raw_mode_off)
}
