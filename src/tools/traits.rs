//! Tool trait shared by everything the registry can dispatch to

use async_trait::async_trait;
use serde_json::Value;

use crate::core::{Result, ToolResult};

/// A tool the agent can call by name
#[async_trait]
pub trait Tool: Send + Sync {
    /// Name the agent calls the tool by
    fn name(&self) -> &str;

    /// Parameters advertised to the agent
    fn to_params(&self) -> Value;

    /// Run the tool with JSON input
    async fn call(&self, input: Value) -> Result<ToolResult>;
}
