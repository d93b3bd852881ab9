//! Registry and serve-loop integration tests

mod common;

use common::{full_hd_tool, test_config, Event, FakeDesktop};
use computer_use::core::ToolResult;
use computer_use::tools::computer::{ComputerTool, TOOL_NAME};
use computer_use::{Server, ToolRegistry};
use serde_json::json;
use std::sync::Arc;
use tempfile::{NamedTempFile, TempDir};

fn registry(dir: &TempDir) -> (ToolRegistry, Arc<common::FakeDesktop>) {
    let (tool, desktop) = full_hd_tool(dir);
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(tool));
    (registry, desktop)
}

#[tokio::test]
async fn test_tool_failures_become_results() {
    let dir = TempDir::new().unwrap();
    let (registry, _desktop) = registry(&dir);

    let result = registry
        .run(TOOL_NAME, json!({ "action": "type" }))
        .await
        .unwrap();

    assert_eq!(result, ToolResult::failure("text is required for type"));
}

#[tokio::test]
async fn test_unknown_tool() {
    let dir = TempDir::new().unwrap();
    let (registry, _desktop) = registry(&dir);

    let result = registry
        .run("bash", json!({ "command": "ls" }))
        .await
        .unwrap();

    assert_eq!(result.error.as_deref(), Some("Unknown tool: bash"));
}

#[tokio::test]
async fn test_listing() {
    let dir = TempDir::new().unwrap();
    let (registry, _desktop) = registry(&dir);

    assert_eq!(registry.names(), vec!["computer"]);
    assert!(registry.get(TOOL_NAME).is_some());
    assert_eq!(registry.all_params()[0]["display_width_px"], 1200);
}

#[tokio::test]
async fn test_serve_handles_requests_and_commands() {
    let dir = TempDir::new().unwrap();
    let (registry, desktop) = registry(&dir);
    let server = Server::new(registry);

    let line = server
        .handle_line(r#"{"action": "cursor_position"}"#)
        .await
        .unwrap()
        .unwrap();
    let result: ToolResult = serde_json::from_str(&line).unwrap();
    assert_eq!(result.output.as_deref(), Some("X=600,Y=338"));
    assert_eq!(desktop.events(), vec![Event::CursorQuery]);

    let line = server.handle_line("{not json").await.unwrap().unwrap();
    let result: ToolResult = serde_json::from_str(&line).unwrap();
    assert!(result.error.unwrap().starts_with("Malformed request"));

    let line = server.handle_line("describe").await.unwrap().unwrap();
    assert!(line.contains("computer_20241022"));

    assert_eq!(server.handle_line("").await.unwrap(), Some(String::new()));
    assert_eq!(server.handle_line("exit").await.unwrap(), None);
}

fn tool_with_output_dir(dir: &TempDir, output_dir: std::path::PathBuf) -> ToolRegistry {
    let mut config = test_config(1920, 1080, dir);
    config.tool.output_dir = output_dir;
    let desktop = Arc::new(FakeDesktop::new(1920, 1080));
    let tool = ComputerTool::with_desktop(&config, desktop).unwrap();
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(tool));
    registry
}

#[tokio::test]
async fn test_unwritable_output_dir_is_a_failure_result() {
    let dir = TempDir::new().unwrap();
    let file = NamedTempFile::new().unwrap();
    let registry = tool_with_output_dir(&dir, file.path().join("outputs"));

    let result = registry
        .run(TOOL_NAME, json!({ "action": "screenshot" }))
        .await
        .unwrap();

    assert!(result.error.unwrap().starts_with("Screenshot error"));
    assert!(result.base64_image.is_none());
}

#[tokio::test]
async fn test_serve_keeps_going_after_a_failed_request() {
    let dir = TempDir::new().unwrap();
    let file = NamedTempFile::new().unwrap();
    let server = Server::new(tool_with_output_dir(&dir, file.path().join("outputs")));

    let line = server
        .handle_line(r#"{"action": "left_click"}"#)
        .await
        .unwrap()
        .unwrap();
    let result: ToolResult = serde_json::from_str(&line).unwrap();
    assert!(result.is_error());

    let line = server
        .handle_line(r#"{"action": "cursor_position"}"#)
        .await
        .unwrap()
        .unwrap();
    let result: ToolResult = serde_json::from_str(&line).unwrap();
    assert!(result.output.is_some());
}

#[tokio::test]
async fn test_serve_answers_one_line_per_request_until_exit() {
    let dir = TempDir::new().unwrap();
    let (registry, desktop) = registry(&dir);
    let server = Server::new(registry);

    let input = b"{\"action\": \"cursor_position\"}\n\n{oops\nexit\n{\"action\": \"left_click\"}\n";
    let mut output = Vec::new();
    server.serve(&input[..], &mut output).await.unwrap();

    let output = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("X=600,Y=338"));
    assert!(lines[1].contains("Malformed request"));
    // nothing after exit runs
    assert_eq!(desktop.events(), vec![Event::CursorQuery]);
}

