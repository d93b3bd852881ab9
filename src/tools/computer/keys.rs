//! Key names accepted by the `key` action

use crate::core::{ComputerError, Result};

/// A backend-neutral key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Control,
    Shift,
    Alt,
    Meta,
    Return,
    Tab,
    Escape,
    Space,
    Backspace,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
    CapsLock,
    /// F1 through F12
    F(u8),
    /// Any single character
    Char(char),
}

impl Key {
    pub fn is_modifier(&self) -> bool {
        matches!(self, Key::Control | Key::Shift | Key::Alt | Key::Meta)
    }
}

/// Look up a single (already lower-cased) key name
pub fn parse_key(name: &str) -> Result<Key> {
    let key = match name {
        "ctrl" | "control" | "ctrlleft" | "ctrlright" | "control_l" | "control_r" => Key::Control,
        "shift" | "shiftleft" | "shiftright" | "shift_l" | "shift_r" => Key::Shift,
        "alt" | "option" | "altleft" | "altright" | "alt_l" | "alt_r" => Key::Alt,
        "super" | "super_l" | "super_r" | "win" | "winleft" | "winright" | "cmd" | "command"
        | "meta" => Key::Meta,
        "enter" | "return" | "kp_enter" => Key::Return,
        "tab" => Key::Tab,
        "esc" | "escape" => Key::Escape,
        "space" => Key::Space,
        "backspace" => Key::Backspace,
        "delete" | "del" => Key::Delete,
        "home" => Key::Home,
        "end" => Key::End,
        "pageup" | "pgup" | "page_up" | "prior" => Key::PageUp,
        "pagedown" | "pgdn" | "page_down" | "next" => Key::PageDown,
        "up" => Key::Up,
        "down" => Key::Down,
        "left" => Key::Left,
        "right" => Key::Right,
        "capslock" | "caps_lock" => Key::CapsLock,
        _ => {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Key::Char(c),
                (Some('f'), Some(_)) => match name[1..].parse::<u8>() {
                    Ok(n @ 1..=12) => Key::F(n),
                    _ => return Err(unknown(name)),
                },
                _ => return Err(unknown(name)),
            }
        }
    };
    Ok(key)
}

/// Parse the `text` of a `key` action.
///
/// A `+` joins several keys into a chord; each part is trimmed and
/// lower-cased. Anything else is a single key name.
pub fn parse_key_combo(text: &str) -> Result<Vec<Key>> {
    if text == "+" || !text.contains('+') {
        return Ok(vec![parse_key(&text.to_lowercase())?]);
    }

    text.split('+')
        .map(|part| {
            let part = part.trim().to_lowercase();
            if part.is_empty() {
                return Err(ComputerError::invalid_request(format!(
                    "empty key name in {:?}",
                    text
                )));
            }
            parse_key(&part)
        })
        .collect()
}

fn unknown(name: &str) -> ComputerError {
    ComputerError::invalid_request(format!("unknown key name: {}", name))
}
