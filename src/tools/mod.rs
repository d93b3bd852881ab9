//! Tools module - Tool implementations for the agent
//!
//! Contains the computer tool and the tool registry.

pub mod computer;
pub mod registry;
pub mod traits;

pub use computer::ComputerTool;
pub use registry::ToolRegistry;
pub use traits::Tool;
