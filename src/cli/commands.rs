//! Serve-loop commands
//!
//! Lines that are not JSON requests are treated as control commands.

use crate::core::Result;
use crate::tools::ToolRegistry;

/// Result of parsing a line
#[derive(Debug, PartialEq, Eq)]
pub enum CommandResult {
    /// A JSON request to hand to the tool
    Continue(String),
    /// Command was handled, show output
    Handled(String),
    /// Stop serving
    Exit,
    /// No output needed
    None,
}

/// Parse and handle a line of input
pub fn handle_command(input: &str, registry: &ToolRegistry) -> Result<CommandResult> {
    let input = input.trim();

    if input.is_empty() {
        return Ok(CommandResult::None);
    }
    if input.starts_with('{') {
        return Ok(CommandResult::Continue(input.to_string()));
    }

    match input.to_lowercase().as_str() {
        "exit" | "quit" | "q" => Ok(CommandResult::Exit),
        "help" | "?" => Ok(CommandResult::Handled(help_text())),
        "describe" | "tools" => Ok(CommandResult::Handled(serde_json::to_string(
            &registry.all_params(),
        )?)),
        other => Ok(CommandResult::Handled(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            other
        ))),
    }
}

/// Generate help text
fn help_text() -> String {
    r#"Send one JSON action per line, for example:
  {"action": "screenshot"}
  {"action": "mouse_move", "coordinate": [600, 300]}
  {"action": "key", "text": "ctrl+c"}

Commands:
  describe, tools  Print the tool descriptors
  help, ?          Show this help message
  exit, quit, q    Stop serving"#
        .to_string()
}
