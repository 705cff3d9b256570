use std::collections::HashMap;
use std::ops::Range;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::input::{Action, InputState};

/// Quit keys belong to the host and never reach the simulation.
pub fn is_quit_key(key_event: &KeyEvent) -> bool {
    match key_event.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key_event.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

// --- Held-key tracking for live terminals ---
//
// Most terminals only send presses and auto-repeats, so a key counts as held
// until its hold window lapses without another repeat, or until a release
// event arrives on terminals that report them. Restart is the exception: it
// fires once per fresh press and is never held.
pub struct KeyboardState {
    last_seen: HashMap<Action, Duration>,
    hold_window: Duration,
    restart_pressed: bool,
}

impl KeyboardState {
    pub fn new(hold_window: Duration) -> Self {
        KeyboardState { last_seen: HashMap::new(), hold_window, restart_pressed: false }
    }

    pub fn handle_key(&mut self, key_event: &KeyEvent, now: Duration) {
        let Some(action) = Action::from_key_code(key_event.code) else {
            return;
        };
        if action == Action::Restart {
            if key_event.kind == KeyEventKind::Press {
                self.restart_pressed = true;
            }
            return;
        }
        match key_event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.last_seen.insert(action, now);
            }
            KeyEventKind::Release => {
                self.last_seen.remove(&action);
            }
        }
    }

    /// Input for the frame at `now`. A pending restart press is consumed.
    pub fn snapshot(&mut self, now: Duration) -> InputState {
        let mut input = InputState::new();
        for (&action, &seen) in &self.last_seen {
            if now.saturating_sub(seen) <= self.hold_window {
                input.press(action);
            }
        }
        if std::mem::take(&mut self.restart_pressed) {
            input.press(Action::Restart);
        }
        input
    }

    pub fn clear(&mut self) {
        self.last_seen.clear();
        self.restart_pressed = false;
    }
}

// --- SimulatedInput for debugging ---
pub struct SimulatedInput {
    holds: Vec<(Range<u64>, Action)>,
    quit_frame: u64,
}

impl SimulatedInput {
    pub fn new(holds: Vec<(Range<u64>, Action)>, quit_frame: u64) -> Self {
        SimulatedInput { holds, quit_frame }
    }

    /// Short scripted flight: climb, boost right, dive, then drift.
    pub fn demo(quit_frame: u64) -> Self {
        SimulatedInput::new(
            vec![
                (1..40, Action::Up),
                (40..120, Action::Right),
                (60..90, Action::Boost),
                (120..200, Action::Down),
                (200..260, Action::Left),
            ],
            quit_frame,
        )
    }

    pub fn input_for(&self, frame: u64) -> InputState {
        let held: Vec<Action> = self
            .holds
            .iter()
            .filter(|(frames, _)| frames.contains(&frame))
            .map(|(_, action)| *action)
            .collect();
        InputState::from_actions(&held)
    }

    pub fn should_quit(&self, frame: u64) -> bool {
        frame >= self.quit_frame
    }
}
