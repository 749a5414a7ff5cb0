//! Key-binding lookup for monitor commands
//!
//! The monitor has a single binding context, so bindings are a flat map
//! from command name to key strings. Key strings accept both `ctrl+h` and
//! the `ctrl-h` spelling used by the original dock defaults.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Command → key-string bindings with key-event lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Keybindings {
    bindings: HashMap<String, Vec<String>>,
}

impl Keybindings {
    /// Create an empty set of bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a command to one or more key strings, replacing any previous
    /// binding for that command.
    pub fn add(&mut self, command: impl Into<String>, keys: Vec<String>) {
        self.bindings.insert(command.into(), keys);
    }

    /// Keys bound to a command.
    pub fn keys_for(&self, command: &str) -> Option<&[String]> {
        self.bindings.get(command).map(Vec::as_slice)
    }

    /// Find the command bound to a key event, if any.
    ///
    /// Character keys compare case-insensitively; kind and state are
    /// ignored.
    pub fn get_command(&self, key: KeyEvent) -> Option<&str> {
        for (command, keys) in &self.bindings {
            for key_str in keys {
                let Some(bound) = parse_key_string(key_str) else {
                    continue;
                };
                let codes_match = match (&bound.code, &key.code) {
                    (KeyCode::Char(a), KeyCode::Char(b)) => a.eq_ignore_ascii_case(b),
                    (a, b) => a == b,
                };
                if codes_match && bound.modifiers == key.modifiers {
                    return Some(command.as_str());
                }
            }
        }
        None
    }

    /// Merge user bindings onto defaults; user bindings win per command.
    pub fn merge(mut defaults: Self, user: Self) -> Self {
        for (command, keys) in user.bindings {
            defaults.bindings.insert(command, keys);
        }
        defaults
    }
}

/// Parse a key string like "e", "esc", "ctrl+h" or "ctrl-m" into a
/// `KeyEvent`.
pub fn parse_key_string(key_str: &str) -> Option<KeyEvent> {
    let mut key_str = key_str.trim().to_lowercase();
    if key_str.is_empty() {
        return None;
    }
    // Accept '-' as a separator for multi-character strings ("ctrl-h").
    if key_str.len() > 1 {
        key_str = key_str.replace('-', "+");
    }

    // shift+tab arrives as BackTab.
    if key_str == "shift+tab" || key_str == "backtab" {
        return Some(key_event(KeyCode::BackTab, KeyModifiers::SHIFT));
    }

    let parts: Vec<&str> = key_str.split('+').collect();
    let key_part = parts.last()?.trim();

    let mut modifiers = KeyModifiers::empty();
    for part in &parts[..parts.len().saturating_sub(1)] {
        match part.trim() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" => modifiers |= KeyModifiers::ALT,
            _ => {}
        }
    }

    let code = match key_part {
        "esc" | "escape" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "delete" => KeyCode::Delete,
        "insert" => KeyCode::Insert,
        "space" => KeyCode::Char(' '),
        f if f.len() > 1 && f.starts_with('f') => {
            let n: u8 = f[1..].parse().ok()?;
            if !(1..=12).contains(&n) {
                return None;
            }
            KeyCode::F(n)
        }
        c if c.chars().count() == 1 => KeyCode::Char(c.chars().next()?),
        _ => return None,
    };

    Some(key_event(code, modifiers))
}

fn key_event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}
