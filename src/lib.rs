//! computer-use - mouse, keyboard and screen control for agents
//!
//! Translates a small fixed set of agent actions (click, type, move, drag,
//! key press, screenshot, cursor query) into native input injection and
//! returns the resulting screen state as a base64 PNG.
//!
//! # Architecture
//!
//! - **Core**: Shared types, configuration, and error handling
//! - **Tools**: The computer tool, its desktop backend, and the tool registry
//! - **CLI**: JSON-lines server used by the binary
//!
//! # Usage
//!
//! ```rust,no_run
//! use computer_use::tools::computer::{ActionRequest, ComputerTool};
//! use computer_use::Config;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::load().unwrap();
//!     let tool = ComputerTool::new(&config).unwrap();
//!
//!     let request = ActionRequest::new("mouse_move").with_coordinate(600, 300);
//!     let result = tool.run(&request).await.unwrap();
//!     println!("{} bytes of screenshot", result.base64_image.unwrap_or_default().len());
//! }
//! ```

pub mod cli;
pub mod core;
pub mod tools;

// Re-export commonly used items
pub use cli::Server;
pub use core::{ComputerError, Config, Result, ToolResult};
pub use tools::{ComputerTool, Tool, ToolRegistry};
