//! Shared types used across the tool modules
//!
//! Contains tool results and screen geometry.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::error::{ComputerError, Result};

/// Result of executing a tool
///
/// Every field is optional; absent fields are omitted on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Text output from the tool
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Error message when the tool failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Base64 encoded PNG
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base64_image: Option<String>,
    /// Out-of-band note for the system prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
}

impl ToolResult {
    /// Create a text-only result
    pub fn text(output: impl Into<String>) -> Self {
        Self {
            output: Some(output.into()),
            ..Self::default()
        }
    }

    /// Create an image-only result
    pub fn image(base64_image: impl Into<String>) -> Self {
        Self {
            base64_image: Some(base64_image.into()),
            ..Self::default()
        }
    }

    /// Create a failed result
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// Whether the result carries nothing at all
    pub fn is_empty(&self) -> bool {
        self.output.is_none()
            && self.error.is_none()
            && self.base64_image.is_none()
            && self.system.is_none()
    }

    /// Whether the result is a failure
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Merge two results. Text fields are concatenated; two images conflict.
    pub fn combine(self, other: ToolResult) -> Result<ToolResult> {
        fn concat(a: Option<String>, b: Option<String>) -> Option<String> {
            match (a, b) {
                (Some(a), Some(b)) => Some(a + &b),
                (a, b) => a.or(b),
            }
        }

        let base64_image = match (self.base64_image, other.base64_image) {
            (Some(_), Some(_)) => {
                return Err(ComputerError::invalid_request(
                    "Cannot combine tool results with two images",
                ))
            }
            (a, b) => a.or(b),
        };

        Ok(ToolResult {
            output: concat(self.output, other.output),
            error: concat(self.error, other.error),
            base64_image,
            system: concat(self.system, other.system),
        })
    }

    /// Return a copy with the text output replaced
    pub fn replace_output(self, output: Option<String>) -> Self {
        Self { output, ..self }
    }
}

/// A pixel resolution in either computer space or API space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width divided by height
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
