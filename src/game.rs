use std::io::{self, Write};
use std::time::Duration;
use crossterm::{
    cursor::MoveTo,
    event::{self, Event},
};
use log::{error, info};

use crate::clock::FrameClock;
use crate::constants::*;
use crate::input::InputState;
use crate::rendering::{GameGrid, OutputTarget};
use crate::state::{GameState, Phase};
use crate::terminal_io::{is_quit_key, KeyboardState, SimulatedInput};

const HUD_ROWS: u16 = 1;
const DEBUG_DUMP_EVERY: u64 = 60;

/// Terminal host: feeds input and time into a `GameState` once per frame and
/// draws the result.
pub struct Game {
    pub terminal_width: u16,
    pub terminal_height: u16,
    pub stdout_target: OutputTarget,
    simulated_input: Option<SimulatedInput>,
    max_frames: Option<u64>,
    seed: Option<u64>,
}

impl Game {
    pub fn new(
        terminal_width: u16,
        terminal_height: u16,
        stdout_target: OutputTarget,
        simulated_input: Option<SimulatedInput>,
        max_frames: Option<u64>,
        seed: Option<u64>,
    ) -> Self {
        Game {
            terminal_width,
            terminal_height,
            stdout_target,
            simulated_input,
            max_frames,
            seed,
        }
    }

    fn debug_mode_active(&self) -> bool {
        self.simulated_input.is_some()
    }

    /// Runs until quit (or the frame limit) and returns the final score.
    pub fn run(&mut self) -> io::Result<u32> {
        let mut clock = if self.debug_mode_active() {
            FrameClock::fixed(Duration::from_millis(FRAME_PERIOD_MS))
        } else {
            self.show_title_screen()?;
            FrameClock::real()
        };

        let mut state = match self.seed {
            Some(seed) => GameState::with_seed(seed, clock.now()),
            None => GameState::new(clock.now()),
        };
        let mut keyboard = KeyboardState::new(Duration::from_millis(KEY_HOLD_WINDOW_MS));
        let mut game_grid = self.playfield_grid();

        let mut running = true;
        let mut frame_count: u64 = 0;

        while running && self.max_frames.is_none_or(|max| frame_count < max) {
            let now = clock.tick();
            let input = self.handle_input(&mut running, &mut keyboard, &mut game_grid, frame_count, now)?;
            if !running {
                break;
            }

            state.update(&input, now);

            game_grid.clear();
            state.draw(&mut game_grid);
            if state.phase() == Phase::GameOver {
                let middle = game_grid.height / 2;
                game_grid.write_centered(middle.saturating_sub(1), "Game Over");
                game_grid.write_centered(middle, "Press R to restart");
            }
            self.render(&game_grid, &state, frame_count)?;

            frame_count += 1;
        }

        info!("Game loop ended after {} frames. Final score: {}", frame_count, state.score());
        Ok(state.score())
    }

    fn playfield_grid(&self) -> GameGrid {
        GameGrid::new(self.terminal_width, self.terminal_height.saturating_sub(HUD_ROWS))
    }

    fn handle_input(
        &mut self,
        running: &mut bool,
        keyboard: &mut KeyboardState,
        game_grid: &mut GameGrid,
        frame_count: u64,
        now: Duration,
    ) -> io::Result<InputState> {
        if let Some(sim_input) = &self.simulated_input {
            if sim_input.should_quit(frame_count) {
                *running = false;
            }
            return Ok(sim_input.input_for(frame_count));
        }

        // The first poll paces the frame; the rest drain whatever queued up meanwhile.
        let mut timeout = Duration::from_millis(FRAME_PERIOD_MS);
        while event::poll(timeout).map_err(|e| { error!("Failed to poll event: {}", e); e })? {
            timeout = Duration::ZERO;
            match event::read().map_err(|e| { error!("Failed to read event: {}", e); e })? {
                Event::Key(key_event) => {
                    if is_quit_key(&key_event) {
                        *running = false;
                    } else {
                        keyboard.handle_key(&key_event, now);
                    }
                }
                Event::Resize(new_width, new_height) => {
                    info!("Terminal resized to {}x{}", new_width, new_height);
                    self.terminal_width = new_width;
                    self.terminal_height = new_height;
                    *game_grid = self.playfield_grid();
                    game_grid.clear_screen_manual(&mut self.stdout_target, new_width, new_height)?;
                }
                Event::FocusLost => keyboard.clear(),
                _ => {}
            }
        }
        Ok(keyboard.snapshot(now))
    }

    fn render(&mut self, game_grid: &GameGrid, state: &GameState, frame_count: u64) -> io::Result<()> {
        game_grid.render(&mut self.stdout_target, HUD_ROWS)?;

        let hud = format!("Score: {}", state.score());
        let controls = "Arrows: move  Space: boost  r: restart  q: quit";
        let padding = (self.terminal_width as usize).saturating_sub(hud.len() + controls.len());
        self.stdout_target.execute_move_to(MoveTo(0, 0))?;
        write!(self.stdout_target, "{}{}{}", hud, " ".repeat(padding), controls)?;
        self.stdout_target.flush()?;

        if let OutputTarget::ScreenBuffer(sb) = &self.stdout_target {
            if frame_count % DEBUG_DUMP_EVERY == 0 {
                let ship = state.ship_position();
                info!(
                    "Frame {}: ship at ({:.1}, {:.1}), {} meteors, {} bullets, alive: {}",
                    frame_count,
                    ship.x,
                    ship.y,
                    state.meteor_positions().count(),
                    state.bullet_positions().count(),
                    state.is_alive()
                );
                sb.print_to_log();
            }
        }
        Ok(())
    }

    fn show_title_screen(&mut self) -> io::Result<()> {
        let title_art = [
            r" __  __ ___ _____ ___ ___  ___   ___   _   ___ _  _ ",
            r"|  \/  | __|_   _| __/ _ \| _ \ |   \ /_\ / __| || |",
            r"| |\/| | _|  | | | _| (_) |   / | |) / _ \\__ \ __ |",
            r"|_|  |_|___| |_| |___\___/|_|_\ |___/_/ \_\___/_||_|",
        ];

        let title_start_y = (self.terminal_height / 2).saturating_sub(title_art.len() as u16 / 2);
        for (i, line) in title_art.iter().enumerate() {
            let x = (self.terminal_width / 2).saturating_sub(line.len() as u16 / 2);
            self.stdout_target.execute_move_to(MoveTo(x, title_start_y + i as u16))?;
            write!(self.stdout_target, "{}", line)?;
        }

        let press_any_key_msg = "Press any key to start...";
        let msg_x = (self.terminal_width / 2).saturating_sub(press_any_key_msg.len() as u16 / 2);
        self.stdout_target.execute_move_to(MoveTo(msg_x, self.terminal_height.saturating_sub(5)))?;
        write!(self.stdout_target, "{}", press_any_key_msg)?;
        self.stdout_target.flush()?;
        info!("Title screen displayed. Waiting for key press.");

        loop {
            if let Event::Key(_) = event::read().map_err(|e| { error!("Failed to read event: {}", e); e })? {
                break;
            }
        }

        let game_grid_dummy = GameGrid::new(self.terminal_width, self.terminal_height);
        game_grid_dummy.clear_screen_manual(&mut self.stdout_target, self.terminal_width, self.terminal_height)?;
        self.stdout_target.flush()?;
        Ok(())
    }
}
