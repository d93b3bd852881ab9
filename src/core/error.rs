//! Custom error types for the computer tool
//!
//! Provides a unified error handling system across all modules.

use thiserror::Error;

/// Main error type for computer tool operations
#[derive(Error, Debug)]
pub enum ComputerError {
    /// A request field is missing, forbidden, or malformed
    #[error("{0}")]
    InvalidRequest(String),

    /// The action tag is not one of the supported actions
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// Agent-supplied coordinates fall outside the advertised screen
    #[error("Coordinates {x}, {y} are out of bounds")]
    OutOfBounds { x: u32, y: u32 },

    /// Screen capture or screenshot persistence failed
    #[error("Screenshot error: {0}")]
    Capture(String),

    /// Mouse or keyboard injection failed
    #[error("Input error: {0}")]
    Input(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// No tool registered under the requested name
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Image encoding errors
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Convenience Result type for computer tool operations
pub type Result<T> = std::result::Result<T, ComputerError>;

impl ComputerError {
    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Create an invalid action error
    pub fn invalid_action(action: impl Into<String>) -> Self {
        Self::InvalidAction(action.into())
    }

    /// Create a capture error
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture(msg.into())
    }

    /// Create an input injection error
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Wrap an error with additional context
    pub fn with_context<E>(context: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::WithContext {
            context: context.into(),
            source: Box::new(error),
        }
    }

    /// Whether this error is a tool failure that should be reported back to
    /// the agent as a result rather than aborting the caller.
    pub fn is_tool_failure(&self) -> bool {
        matches!(
            self,
            Self::InvalidRequest(_)
                | Self::InvalidAction(_)
                | Self::OutOfBounds { .. }
                | Self::Capture(_)
                | Self::Input(_)
                | Self::UnknownTool(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            ComputerError::invalid_request("text is required for key").to_string(),
            "text is required for key"
        );
        assert_eq!(
            ComputerError::invalid_action("scroll").to_string(),
            "Invalid action: scroll"
        );
        assert_eq!(
            ComputerError::OutOfBounds { x: 1300, y: 10 }.to_string(),
            "Coordinates 1300, 10 are out of bounds"
        );
    }

    #[test]
    fn test_tool_failure_classification() {
        assert!(ComputerError::capture("Failed to take screenshot").is_tool_failure());
        assert!(ComputerError::UnknownTool("bash".into()).is_tool_failure());
        assert!(!ComputerError::config("WIDTH must be set").is_tool_failure());

        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        assert!(!ComputerError::from(io).is_tool_failure());
    }
}
