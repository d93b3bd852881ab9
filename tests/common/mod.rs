//! Shared fixtures for integration tests

#![allow(dead_code)]

use computer_use::core::{ComputerError, Config, DisplayConfig, Result};
use computer_use::tools::computer::{ComputerTool, Coordinate, Desktop, Key, MouseButton};
use image::{Rgba, RgbaImage};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

/// Something the fake desktop was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Move(Coordinate),
    Drag(Coordinate),
    Click(MouseButton, u32),
    Keys(Vec<Key>),
    Type(String),
    CursorQuery,
    Capture,
}

/// Records every call and serves a solid-color screen
pub struct FakeDesktop {
    width: u32,
    height: u32,
    cursor: Coordinate,
    fail_capture: bool,
    events: Mutex<Vec<Event>>,
}

impl FakeDesktop {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cursor: Coordinate::new(0, 0),
            fail_capture: false,
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn with_cursor(mut self, x: u32, y: u32) -> Self {
        self.cursor = Coordinate::new(x, y);
        self
    }

    pub fn failing_capture(mut self) -> Self {
        self.fail_capture = true;
        self
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    /// Events other than screen captures
    pub fn inputs(&self) -> Vec<Event> {
        self.events()
            .into_iter()
            .filter(|e| *e != Event::Capture)
            .collect()
    }

    fn record(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl Desktop for FakeDesktop {
    fn move_mouse(&self, to: Coordinate) -> Result<()> {
        self.record(Event::Move(to));
        Ok(())
    }

    fn drag_to(&self, to: Coordinate) -> Result<()> {
        self.record(Event::Drag(to));
        Ok(())
    }

    fn click(&self, button: MouseButton, count: u32) -> Result<()> {
        self.record(Event::Click(button, count));
        Ok(())
    }

    fn press_keys(&self, keys: &[Key]) -> Result<()> {
        self.record(Event::Keys(keys.to_vec()));
        Ok(())
    }

    fn type_text(&self, text: &str, _interval: Duration) -> Result<()> {
        self.record(Event::Type(text.to_string()));
        Ok(())
    }

    fn cursor_position(&self) -> Result<Coordinate> {
        self.record(Event::CursorQuery);
        Ok(self.cursor)
    }

    fn capture_screen(&self) -> Result<RgbaImage> {
        self.record(Event::Capture);
        if self.fail_capture {
            return Err(ComputerError::capture("no display"));
        }
        Ok(RgbaImage::from_pixel(
            self.width,
            self.height,
            Rgba([30, 60, 90, 255]),
        ))
    }
}

/// A config with no screenshot delay, writing into a temp dir
pub fn test_config(width: u32, height: u32, dir: &TempDir) -> Config {
    let mut config = Config::new(DisplayConfig::new(width, height));
    config.tool.output_dir = dir.path().join("outputs");
    config.tool.scaling_enabled = true;
    config.tool.screenshot_delay_ms = 0;
    config.tool.typing_delay_ms = 0;
    config
}

/// A 1920x1080 tool over a fake desktop
pub fn full_hd_tool(dir: &TempDir) -> (ComputerTool, Arc<FakeDesktop>) {
    let desktop = Arc::new(FakeDesktop::new(1920, 1080).with_cursor(960, 540));
    let tool = ComputerTool::with_desktop(&test_config(1920, 1080, dir), desktop.clone())
        .expect("valid config");
    (tool, desktop)
}
