use crossterm::event::KeyCode;

/// Logical actions the simulation understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Boost,
    Restart,
}

impl Action {
    pub fn from_key_code(code: KeyCode) -> Option<Action> {
        match code {
            KeyCode::Up => Some(Action::Up),
            KeyCode::Down => Some(Action::Down),
            KeyCode::Left => Some(Action::Left),
            KeyCode::Right => Some(Action::Right),
            KeyCode::Char(' ') => Some(Action::Boost),
            KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Restart),
            _ => None,
        }
    }

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Snapshot of the actions held during one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    held: u8,
}

impl InputState {
    pub fn new() -> Self {
        InputState::default()
    }

    pub fn from_actions(actions: &[Action]) -> Self {
        let mut state = InputState::new();
        for &action in actions {
            state.press(action);
        }
        state
    }

    pub fn press(&mut self, action: Action) {
        self.held |= action.bit();
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held & action.bit() != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_arrow_space_and_restart_keys() {
        assert_eq!(Action::from_key_code(KeyCode::Up), Some(Action::Up));
        assert_eq!(Action::from_key_code(KeyCode::Left), Some(Action::Left));
        assert_eq!(Action::from_key_code(KeyCode::Char(' ')), Some(Action::Boost));
        assert_eq!(Action::from_key_code(KeyCode::Char('R')), Some(Action::Restart));
        assert_eq!(Action::from_key_code(KeyCode::Char('r')), Some(Action::Restart));
        assert_eq!(Action::from_key_code(KeyCode::Char('x')), None);
    }

    #[test]
    fn held_actions_are_independent() {
        let mut input = InputState::from_actions(&[Action::Up, Action::Right]);
        assert!(input.is_held(Action::Up));
        assert!(input.is_held(Action::Right));
        assert!(!input.is_held(Action::Boost));
        assert!(!input.is_held(Action::Down));

        input.press(Action::Up);
        input.press(Action::Boost);
        assert_eq!(input, InputState::from_actions(&[Action::Right, Action::Boost, Action::Up]));
        assert_ne!(input, InputState::new());
    }
}
