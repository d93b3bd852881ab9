//! Core module - shared infrastructure
//!
//! This module contains foundational types, configuration, and error handling
//! used throughout the crate.

pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, DisplayConfig, ToolConfig};
pub use error::{ComputerError, Result};
pub use types::*;
