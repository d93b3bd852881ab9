//! Computer tool - mouse, keyboard and screen control
//!
//! Each call validates one action, performs it on the desktop and, for
//! everything but pure queries, returns a screenshot taken once the UI has
//! had a moment to settle.

pub mod action;
pub mod desktop;
pub mod keys;
pub mod scaling;
pub mod screenshot;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::core::{ComputerError, Config, Resolution, Result, ToolConfig, ToolResult};
use crate::tools::traits::Tool;

pub use action::{Action, ActionKind, ActionRequest, Coordinate};
pub use desktop::{Desktop, MouseButton, NativeDesktop};
pub use keys::Key;
pub use scaling::Scaler;
pub use screenshot::ScreenshotStore;

/// Tool name the agent calls
pub const TOOL_NAME: &str = "computer";

/// Tool type understood by the agent API
pub const TOOL_TYPE: &str = "computer_20241022";

/// Capability descriptor advertised to the agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputerToolParams {
    pub name: String,
    #[serde(rename = "type")]
    pub tool_type: String,
    pub display_width_px: u32,
    pub display_height_px: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_number: Option<u32>,
}

/// Dispatches agent actions to a [`Desktop`]
pub struct ComputerTool {
    desktop: Arc<dyn Desktop>,
    scaler: Scaler,
    store: ScreenshotStore,
    settings: ToolConfig,
    display_num: Option<u32>,
}

impl ComputerTool {
    /// Create a tool driving the native desktop
    pub fn new(config: &Config) -> Result<Self> {
        let desktop = NativeDesktop::new(config.display.display_num);
        Self::with_desktop(config, Arc::new(desktop))
    }

    /// Create a tool over any desktop backend
    pub fn with_desktop(config: &Config, desktop: Arc<dyn Desktop>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            desktop,
            scaler: Scaler::new(
                config.display.resolution(),
                config.tool.max_api_width,
                config.tool.scaling_enabled,
            ),
            store: ScreenshotStore::new(&config.tool.output_dir),
            settings: config.tool.clone(),
            display_num: config.display.display_num,
        })
    }

    /// The descriptor, in API space
    pub fn params(&self) -> ComputerToolParams {
        let api = self.scaler.api();
        ComputerToolParams {
            name: TOOL_NAME.to_string(),
            tool_type: TOOL_TYPE.to_string(),
            display_width_px: api.width,
            display_height_px: api.height,
            display_number: self.display_num,
        }
    }

    /// Validate and run a raw request
    pub async fn run(&self, request: &ActionRequest) -> Result<ToolResult> {
        let action = Action::parse(request)?;
        self.execute(action).await
    }

    /// Run a validated action
    pub async fn execute(&self, action: Action) -> Result<ToolResult> {
        debug!(action = %action.kind(), "dispatching computer action");

        match action {
            Action::MouseMove { coordinate } => {
                let to = self.scaler.to_device(coordinate)?;
                self.blocking(move |d| d.move_mouse(to)).await?;
                self.take_action_screenshot().await
            }
            Action::LeftClickDrag { coordinate } => {
                let to = self.scaler.to_device(coordinate)?;
                self.blocking(move |d| d.drag_to(to)).await?;
                self.take_action_screenshot().await
            }
            Action::Key { text } => {
                let keys = keys::parse_key_combo(&text)?;
                self.blocking(move |d| d.press_keys(&keys)).await?;
                self.take_action_screenshot().await
            }
            Action::Type { text } => {
                let interval = self.settings.typing_delay();
                self.blocking(move |d| d.type_text(&text, interval)).await?;
                self.take_action_screenshot().await
            }
            Action::LeftClick => self.click(MouseButton::Left, 1).await,
            Action::RightClick => self.click(MouseButton::Right, 1).await,
            Action::MiddleClick => self.click(MouseButton::Middle, 1).await,
            Action::DoubleClick => self.click(MouseButton::Left, 2).await,
            Action::Screenshot => self.screenshot().await,
            Action::CursorPosition => {
                let at = self.blocking(|d| d.cursor_position()).await?;
                let at = self.scaler.to_api(at);
                Ok(ToolResult::text(format!("X={},Y={}", at.x, at.y)))
            }
        }
    }

    /// Capture the screen and return it as a base64 PNG
    pub async fn screenshot(&self) -> Result<ToolResult> {
        let image = self.blocking(|d| d.capture_screen()).await?;
        let size: Resolution = if self.scaler.is_scaling() {
            self.scaler.api()
        } else {
            Resolution::new(image.width(), image.height())
        };

        let path = self.store.persist(image, size).await?;
        let encoded = self.store.encode(&path).await?;
        Ok(ToolResult::image(encoded))
    }

    async fn click(&self, button: MouseButton, count: u32) -> Result<ToolResult> {
        self.blocking(move |d| d.click(button, count)).await?;
        self.take_action_screenshot().await
    }

    /// Wait for the UI to settle, then screenshot; only the image is kept
    async fn take_action_screenshot(&self) -> Result<ToolResult> {
        tokio::time::sleep(self.settings.screenshot_delay()).await;
        let shot = self.screenshot().await?;
        Ok(ToolResult {
            base64_image: shot.base64_image,
            ..ToolResult::default()
        })
    }

    async fn blocking<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn Desktop) -> Result<T> + Send + 'static,
    {
        let desktop = Arc::clone(&self.desktop);
        tokio::task::spawn_blocking(move || f(desktop.as_ref()))
            .await
            .map_err(|e| ComputerError::with_context("Desktop task failed", e))?
    }
}

#[async_trait]
impl Tool for ComputerTool {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn to_params(&self) -> Value {
        serde_json::to_value(self.params()).unwrap_or(Value::Null)
    }

    async fn call(&self, input: Value) -> Result<ToolResult> {
        let request: ActionRequest = serde_json::from_value(input)
            .map_err(|e| ComputerError::invalid_request(format!("Invalid input: {}", e)))?;
        self.run(&request).await
    }
}
