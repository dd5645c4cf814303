use crossterm::event::KeyCode;

use crate::config::KeysConfig;
use crate::error::{IntroError, IntroResult};

/// Logical keys the intro reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    /// Starts the spin
    Trigger,
    /// Restarts the intro once it has finished
    Replay,
    /// Anything else
    Other,
}

impl Key {
    pub const COUNT: usize = 7;

    fn index(self) -> usize {
        self as usize
    }
}

/// Pressed-state per logical key. A press stays latched until the logic
/// step consumes it or clears everything.
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    pressed: [bool; Key::COUNT],
}

impl KeyState {
    pub fn press(&mut self, key: Key) {
        self.pressed[key.index()] = true;
    }

    #[cfg(test)]
    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed[key.index()]
    }

    /// Returns whether `key` was pressed and releases it.
    pub fn consume(&mut self, key: Key) -> bool {
        std::mem::take(&mut self.pressed[key.index()])
    }

    pub fn any_pressed(&self) -> bool {
        self.pressed.iter().any(|&p| p)
    }

    pub fn clear_all(&mut self) {
        self.pressed = [false; Key::COUNT];
    }
}

/// Terminal key codes bound to the configurable logical keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    pub trigger: KeyCode,
    pub replay: KeyCode,
}

impl KeyBindings {
    pub fn from_config(keys: &KeysConfig) -> IntroResult<Self> {
        let trigger = parse_key(&keys.trigger)?;
        let replay = parse_key(&keys.replay)?;
        if trigger == replay {
            return Err(IntroError::Config(format!(
                "trigger and replay are both bound to \"{}\"",
                keys.replay
            )));
        }
        Ok(Self { trigger, replay })
    }

    /// Map a terminal key to its logical key. Arrows are fixed.
    pub fn map(&self, code: KeyCode) -> Key {
        let code = normalize(code);
        match code {
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            c if c == self.trigger => Key::Trigger,
            c if c == self.replay => Key::Replay,
            _ => Key::Other,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            trigger: KeyCode::Char(' '),
            replay: KeyCode::Char('r'),
        }
    }
}

fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

/// Parse a key name from the config file: a single character, or one of
/// `space`, `enter`, `tab`, `backspace`, `f1`..`f12`.
pub fn parse_key(name: &str) -> IntroResult<KeyCode> {
    let lower = name.trim().to_lowercase();
    let code = match lower.as_str() {
        "space" => KeyCode::Char(' '),
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        f if f.len() > 1 && f.starts_with('f') => match f[1..].parse::<u8>() {
            Ok(n @ 1..=12) => KeyCode::F(n),
            _ => return Err(IntroError::UnknownKey(name.to_string())),
        },
        s => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return Err(IntroError::UnknownKey(name.to_string())),
            }
        }
    };
    Ok(code)
}
