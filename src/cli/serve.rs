//! JSON-lines serve loop
//!
//! Reads one request per line from stdin and writes one result per line to
//! stdout. Logs go to stderr.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use crate::cli::commands::{handle_command, CommandResult};
use crate::core::{Result, ToolResult};
use crate::tools::computer::TOOL_NAME;
use crate::tools::ToolRegistry;

/// Line-oriented server around a tool registry
pub struct Server {
    registry: ToolRegistry,
    tool: String,
}

impl Server {
    /// Serve requests for the computer tool
    pub fn new(registry: ToolRegistry) -> Self {
        Self::for_tool(registry, TOOL_NAME)
    }

    /// Serve requests for a specific tool
    pub fn for_tool(registry: ToolRegistry, tool: impl Into<String>) -> Self {
        Self {
            registry,
            tool: tool.into(),
        }
    }

    /// Handle one line; `None` means stop
    pub async fn handle_line(&self, line: &str) -> Result<Option<String>> {
        match handle_command(line, &self.registry)? {
            CommandResult::Exit => Ok(None),
            CommandResult::None => Ok(Some(String::new())),
            CommandResult::Handled(output) => Ok(Some(output)),
            CommandResult::Continue(json) => {
                let result = match serde_json::from_str(&json) {
                    Ok(input) => match self.registry.run(&self.tool, input).await {
                        Ok(result) => result,
                        // one bad request must not end the session
                        Err(e) => {
                            warn!(error = %e, "request failed");
                            ToolResult::failure(e.to_string())
                        }
                    },
                    Err(e) => ToolResult::failure(format!("Malformed request: {}", e)),
                };
                Ok(Some(serde_json::to_string(&result)?))
            }
        }
    }

    /// Run on stdin and stdout until EOF or an exit command
    pub async fn run(&self) -> Result<()> {
        info!(tool = %self.tool, "serving requests on stdin");
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Answer each request line from `reader` with one line on `writer`
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        while let Some(input) = lines.next_line().await? {
            match self.handle_line(&input).await? {
                None => return Ok(()),
                Some(output) if output.is_empty() => continue,
                Some(output) => {
                    writer.write_all(output.as_bytes()).await?;
                    writer.write_all(b"\n").await?;
                    writer.flush().await?;
                }
            }
        }

        debug!("input closed");
        Ok(())
    }
}
