//! Keyboard input mapped to game actions
//!
//! Every key press yields at most one discrete action. Held keys rely on the terminal's own
//! auto-repeat.

use crate::game::Action;
use crate::settings::Settings;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Resolved key bindings - supports multiple keys per action
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: Vec<(KeyCode, Action)>,
}

impl KeyBindings {
    /// Parse a key string into KeyCode
    fn parse_key(s: &str) -> Option<KeyCode> {
        let code = match s.to_lowercase().as_str() {
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "space" => KeyCode::Char(' '),
            "enter" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "backspace" => KeyCode::Backspace,
            "esc" | "escape" => KeyCode::Esc,
            s => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return None,
                }
            }
        };
        Some(code)
    }

    fn bind(&mut self, keys: &[String], action: Action) {
        for key in keys {
            match Self::parse_key(key) {
                Some(code) => self.bindings.push((code, action)),
                None => tracing::warn!("unknown key {:?} for {:?}, skipped", key, action),
            }
        }
    }

    /// Create keybindings from settings
    pub fn from_settings(settings: &Settings) -> Self {
        let keys = &settings.keys;
        let mut bindings = Self {
            bindings: Vec::new(),
        };
        bindings.bind(&keys.move_left, Action::MoveLeft);
        bindings.bind(&keys.move_right, Action::MoveRight);
        bindings.bind(&keys.soft_drop, Action::SoftDrop);
        bindings.bind(&keys.hard_drop, Action::HardDrop);
        bindings.bind(&keys.rotate_right, Action::RotateRight);
        bindings.bind(&keys.rotate_left, Action::RotateLeft);
        bindings.bind(&keys.pause, Action::TogglePause);
        bindings.bind(&keys.restart, Action::Restart);
        bindings.bind(&keys.quit, Action::Quit);
        bindings
    }

    /// First action bound to `code`
    pub fn action_for(&self, code: KeyCode) -> Option<Action> {
        let code = normalize_key(code);
        self.bindings
            .iter()
            .find(|(bound, _)| *bound == code)
            .map(|&(_, action)| action)
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Turns key events into actions
#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    bindings: KeyBindings,
}

impl InputHandler {
    /// Create input handler from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            bindings: KeyBindings::from_settings(settings),
        }
    }

    /// Handle a key event - returns the action it triggers, if any
    pub fn key_down(&self, key: KeyEvent) -> Option<Action> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        // Ctrl+C always quits
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        self.bindings.action_for(key.code)
    }
}

/// Normalize key codes for consistent handling
fn normalize_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}
