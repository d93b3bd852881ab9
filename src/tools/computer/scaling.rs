//! Conversion between computer space and API space
//!
//! API space caps the width at a fixed maximum and keeps the aspect ratio.
//! Screens already narrower than the cap are left unscaled.

use tracing::debug;

use crate::core::{ComputerError, Resolution, Result};
use crate::tools::computer::action::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scaler {
    screen: Resolution,
    api: Resolution,
    x_factor: f64,
    y_factor: f64,
}

impl Scaler {
    /// Build the mapping for a screen.
    ///
    /// Only screens wider than `max_api_width` are scaled down. A narrower
    /// screen keeps its own resolution as API space and is never scaled up
    /// to the cap.
    pub fn new(screen: Resolution, max_api_width: u32, enabled: bool) -> Self {
        if !enabled || screen.width <= max_api_width {
            return Self::identity(screen);
        }

        let target_width = f64::from(max_api_width);
        let target_height = target_width / screen.aspect_ratio();
        // both below 1
        let x_factor = target_width / f64::from(screen.width);
        let y_factor = target_height / f64::from(screen.height);

        let api = Resolution::new(
            scale(screen.width, x_factor),
            scale(screen.height, y_factor),
        );

        Self {
            screen,
            api,
            x_factor,
            y_factor,
        }
    }

    pub fn identity(screen: Resolution) -> Self {
        Self {
            screen,
            api: screen,
            x_factor: 1.0,
            y_factor: 1.0,
        }
    }

    /// The resolution advertised to the agent
    pub fn api(&self) -> Resolution {
        self.api
    }

    /// Whether the two spaces differ
    pub fn is_scaling(&self) -> bool {
        self.screen != self.api
    }

    /// Convert an agent-supplied coordinate to a screen coordinate.
    ///
    /// The bound is the API-space resolution the agent was given, inclusive.
    pub fn to_device(&self, at: Coordinate) -> Result<Coordinate> {
        if at.x > self.api.width || at.y > self.api.height {
            return Err(ComputerError::OutOfBounds { x: at.x, y: at.y });
        }

        let device = Coordinate::new(
            scale(at.x, 1.0 / self.x_factor),
            scale(at.y, 1.0 / self.y_factor),
        );
        debug!(api = ?at, ?device, "scaled coordinate to device space");
        Ok(device)
    }

    /// Convert a screen coordinate to API space
    pub fn to_api(&self, at: Coordinate) -> Coordinate {
        Coordinate::new(scale(at.x, self.x_factor), scale(at.y, self.y_factor))
    }
}

fn scale(value: u32, factor: f64) -> u32 {
    (f64::from(value) * factor).round() as u32
}
