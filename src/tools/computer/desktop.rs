//! Desktop backend - the seam to native input and capture
//!
//! [`NativeDesktop`] drives the real mouse and keyboard through `enigo`
//! and grabs the screen through `xcap`. All methods block.

use image::RgbaImage;
use std::thread;
use std::time::Duration;

use enigo::{Button, Direction, Enigo, Keyboard, Mouse, Settings};
use xcap::Monitor;

use crate::core::{ComputerError, Result};
use crate::tools::computer::action::Coordinate;
use crate::tools::computer::keys::Key;

/// Pause between the halves of a drag or double click
const CLICK_SETTLE: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Native input and capture capabilities, in computer space
pub trait Desktop: Send + Sync {
    /// Move the pointer to an absolute position
    fn move_mouse(&self, to: Coordinate) -> Result<()>;

    /// Press the left button here, move to `to`, release
    fn drag_to(&self, to: Coordinate) -> Result<()>;

    /// Click `count` times at the current pointer position
    fn click(&self, button: MouseButton, count: u32) -> Result<()>;

    /// Press all keys in order, then release them in reverse
    fn press_keys(&self, keys: &[Key]) -> Result<()>;

    /// Type text one character at a time
    fn type_text(&self, text: &str, interval: Duration) -> Result<()>;

    /// Current pointer position
    fn cursor_position(&self) -> Result<Coordinate>;

    /// Grab the full screen
    fn capture_screen(&self) -> Result<RgbaImage>;
}

/// Desktop backed by `enigo` and `xcap`
#[derive(Debug, Clone, Default)]
pub struct NativeDesktop {
    #[cfg_attr(not(target_os = "linux"), allow(dead_code))]
    display_num: Option<u32>,
}

impl NativeDesktop {
    pub fn new(display_num: Option<u32>) -> Self {
        Self { display_num }
    }

    #[cfg(target_os = "linux")]
    fn settings(&self) -> Settings {
        match self.display_num {
            Some(n) => Settings {
                x11_display: Some(format!(":{}", n)),
                ..Settings::default()
            },
            None => Settings::default(),
        }
    }

    #[cfg(not(target_os = "linux"))]
    fn settings(&self) -> Settings {
        Settings::default()
    }

    // Enigo is not Send on every platform, so each call builds its own.
    fn connect(&self) -> Result<Enigo> {
        Enigo::new(&self.settings())
            .map_err(|e| ComputerError::input(format!("Failed to connect to display: {}", e)))
    }
}

fn input_err(what: &str) -> impl FnOnce(enigo::InputError) -> ComputerError + '_ {
    move |e| ComputerError::input(format!("{} failed: {:?}", what, e))
}

fn to_i32(at: Coordinate) -> (i32, i32) {
    (
        i32::try_from(at.x).unwrap_or(i32::MAX),
        i32::try_from(at.y).unwrap_or(i32::MAX),
    )
}

fn to_enigo_key(key: Key) -> enigo::Key {
    match key {
        Key::Control => enigo::Key::Control,
        Key::Shift => enigo::Key::Shift,
        Key::Alt => enigo::Key::Alt,
        Key::Meta => enigo::Key::Meta,
        Key::Return => enigo::Key::Return,
        Key::Tab => enigo::Key::Tab,
        Key::Escape => enigo::Key::Escape,
        Key::Space => enigo::Key::Space,
        Key::Backspace => enigo::Key::Backspace,
        Key::Delete => enigo::Key::Delete,
        Key::Home => enigo::Key::Home,
        Key::End => enigo::Key::End,
        Key::PageUp => enigo::Key::PageUp,
        Key::PageDown => enigo::Key::PageDown,
        Key::Up => enigo::Key::UpArrow,
        Key::Down => enigo::Key::DownArrow,
        Key::Left => enigo::Key::LeftArrow,
        Key::Right => enigo::Key::RightArrow,
        Key::CapsLock => enigo::Key::CapsLock,
        Key::F(1) => enigo::Key::F1,
        Key::F(2) => enigo::Key::F2,
        Key::F(3) => enigo::Key::F3,
        Key::F(4) => enigo::Key::F4,
        Key::F(5) => enigo::Key::F5,
        Key::F(6) => enigo::Key::F6,
        Key::F(7) => enigo::Key::F7,
        Key::F(8) => enigo::Key::F8,
        Key::F(9) => enigo::Key::F9,
        Key::F(10) => enigo::Key::F10,
        Key::F(11) => enigo::Key::F11,
        Key::F(_) => enigo::Key::F12,
        Key::Char(c) => enigo::Key::Unicode(c),
    }
}

impl Desktop for NativeDesktop {
    fn move_mouse(&self, to: Coordinate) -> Result<()> {
        let (x, y) = to_i32(to);
        self.connect()?
            .move_mouse(x, y, enigo::Coordinate::Abs)
            .map_err(input_err("Mouse move"))
    }

    fn drag_to(&self, to: Coordinate) -> Result<()> {
        let (x, y) = to_i32(to);
        let mut enigo = self.connect()?;
        enigo
            .button(Button::Left, Direction::Press)
            .map_err(input_err("Mouse press"))?;
        thread::sleep(CLICK_SETTLE);
        let moved = enigo
            .move_mouse(x, y, enigo::Coordinate::Abs)
            .map_err(input_err("Mouse move"));
        thread::sleep(CLICK_SETTLE);
        // release even if the move failed
        enigo
            .button(Button::Left, Direction::Release)
            .map_err(input_err("Mouse release"))?;
        moved
    }

    fn click(&self, button: MouseButton, count: u32) -> Result<()> {
        let button = match button {
            MouseButton::Left => Button::Left,
            MouseButton::Right => Button::Right,
            MouseButton::Middle => Button::Middle,
        };
        let mut enigo = self.connect()?;
        for i in 0..count {
            if i > 0 {
                thread::sleep(CLICK_SETTLE);
            }
            enigo
                .button(button, Direction::Click)
                .map_err(input_err("Click"))?;
        }
        Ok(())
    }

    fn press_keys(&self, keys: &[Key]) -> Result<()> {
        let mut enigo = self.connect()?;
        for key in keys {
            enigo
                .key(to_enigo_key(*key), Direction::Press)
                .map_err(input_err("Key press"))?;
        }
        for key in keys.iter().rev() {
            enigo
                .key(to_enigo_key(*key), Direction::Release)
                .map_err(input_err("Key release"))?;
        }
        Ok(())
    }

    fn type_text(&self, text: &str, interval: Duration) -> Result<()> {
        let mut enigo = self.connect()?;
        let mut buf = [0u8; 4];
        for c in text.chars() {
            enigo
                .text(c.encode_utf8(&mut buf))
                .map_err(input_err("Typing"))?;
            thread::sleep(interval);
        }
        Ok(())
    }

    fn cursor_position(&self) -> Result<Coordinate> {
        let (x, y) = self.connect()?.location().map_err(input_err("Cursor query"))?;
        Ok(Coordinate::new(x.max(0) as u32, y.max(0) as u32))
    }

    fn capture_screen(&self) -> Result<RgbaImage> {
        let monitors = Monitor::all()
            .map_err(|e| ComputerError::capture(format!("Failed to list monitors: {}", e)))?;

        let monitor = monitors
            .iter()
            .find(|m| m.is_primary())
            .or_else(|| monitors.first())
            .ok_or_else(|| ComputerError::capture("No monitors found"))?;

        monitor
            .capture_image()
            .map_err(|e| ComputerError::capture(format!("Screen capture failed: {}", e)))
    }
}
