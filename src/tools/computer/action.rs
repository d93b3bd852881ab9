//! Action requests and their validated form
//!
//! The wire request stays loosely typed so validation can name the
//! offending field; [`Action`] carries only the fields each action accepts.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::core::{ComputerError, Result};

/// Raw request as received from the agent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionRequest {
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinate: Option<Value>,
}

impl ActionRequest {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            ..Self::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(Value::String(text.into()));
        self
    }

    pub fn with_coordinate(mut self, x: i64, y: i64) -> Self {
        self.coordinate = Some(serde_json::json!([x, y]));
        self
    }
}

/// A pixel position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: u32,
    pub y: u32,
}

impl Coordinate {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// The fixed set of action names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Key,
    Type,
    MouseMove,
    LeftClick,
    LeftClickDrag,
    RightClick,
    MiddleClick,
    DoubleClick,
    Screenshot,
    CursorPosition,
}

impl ActionKind {
    pub const ALL: [ActionKind; 10] = [
        ActionKind::Key,
        ActionKind::Type,
        ActionKind::MouseMove,
        ActionKind::LeftClick,
        ActionKind::LeftClickDrag,
        ActionKind::RightClick,
        ActionKind::MiddleClick,
        ActionKind::DoubleClick,
        ActionKind::Screenshot,
        ActionKind::CursorPosition,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Key => "key",
            ActionKind::Type => "type",
            ActionKind::MouseMove => "mouse_move",
            ActionKind::LeftClick => "left_click",
            ActionKind::LeftClickDrag => "left_click_drag",
            ActionKind::RightClick => "right_click",
            ActionKind::MiddleClick => "middle_click",
            ActionKind::DoubleClick => "double_click",
            ActionKind::Screenshot => "screenshot",
            ActionKind::CursorPosition => "cursor_position",
        }
    }
}

impl FromStr for ActionKind {
    type Err = ComputerError;

    fn from_str(s: &str) -> Result<Self> {
        ActionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ComputerError::invalid_action(s))
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Key { text: String },
    Type { text: String },
    MouseMove { coordinate: Coordinate },
    LeftClickDrag { coordinate: Coordinate },
    LeftClick,
    RightClick,
    MiddleClick,
    DoubleClick,
    Screenshot,
    CursorPosition,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Key { .. } => ActionKind::Key,
            Action::Type { .. } => ActionKind::Type,
            Action::MouseMove { .. } => ActionKind::MouseMove,
            Action::LeftClickDrag { .. } => ActionKind::LeftClickDrag,
            Action::LeftClick => ActionKind::LeftClick,
            Action::RightClick => ActionKind::RightClick,
            Action::MiddleClick => ActionKind::MiddleClick,
            Action::DoubleClick => ActionKind::DoubleClick,
            Action::Screenshot => ActionKind::Screenshot,
            Action::CursorPosition => ActionKind::CursorPosition,
        }
    }

    /// Validate a raw request against the fields its action accepts.
    ///
    /// The action name is checked first, so an unknown action is reported as
    /// such whatever else the request holds.
    pub fn parse(request: &ActionRequest) -> Result<Action> {
        let kind: ActionKind = request.action.parse()?;
        let text = request.text.as_ref().filter(|v| !v.is_null());
        let coordinate = request.coordinate.as_ref().filter(|v| !v.is_null());

        match kind {
            ActionKind::MouseMove | ActionKind::LeftClickDrag => {
                let Some(coordinate) = coordinate else {
                    return Err(ComputerError::invalid_request(format!(
                        "coordinate is required for {}",
                        kind
                    )));
                };
                if text.is_some() {
                    return Err(ComputerError::invalid_request(format!(
                        "text is not accepted for {}",
                        kind
                    )));
                }
                let coordinate = parse_coordinate(coordinate)?;
                Ok(if kind == ActionKind::MouseMove {
                    Action::MouseMove { coordinate }
                } else {
                    Action::LeftClickDrag { coordinate }
                })
            }
            ActionKind::Key | ActionKind::Type => {
                let Some(text) = text else {
                    return Err(ComputerError::invalid_request(format!(
                        "text is required for {}",
                        kind
                    )));
                };
                if coordinate.is_some() {
                    return Err(ComputerError::invalid_request(format!(
                        "coordinate is not accepted for {}",
                        kind
                    )));
                }
                let Value::String(text) = text else {
                    return Err(ComputerError::invalid_request(format!(
                        "{} must be a string",
                        text
                    )));
                };
                let text = text.clone();
                Ok(if kind == ActionKind::Key {
                    Action::Key { text }
                } else {
                    Action::Type { text }
                })
            }
            _ => {
                if text.is_some() {
                    return Err(ComputerError::invalid_request(format!(
                        "text is not accepted for {}",
                        kind
                    )));
                }
                if coordinate.is_some() {
                    return Err(ComputerError::invalid_request(format!(
                        "coordinate is not accepted for {}",
                        kind
                    )));
                }
                Ok(match kind {
                    ActionKind::LeftClick => Action::LeftClick,
                    ActionKind::RightClick => Action::RightClick,
                    ActionKind::MiddleClick => Action::MiddleClick,
                    ActionKind::DoubleClick => Action::DoubleClick,
                    ActionKind::Screenshot => Action::Screenshot,
                    _ => Action::CursorPosition,
                })
            }
        }
    }
}

fn parse_coordinate(value: &Value) -> Result<Coordinate> {
    let pair = match value.as_array() {
        Some(items) if items.len() == 2 => items,
        _ => {
            return Err(ComputerError::invalid_request(format!(
                "{} must be a tuple of length 2",
                value
            )))
        }
    };

    let mut parsed = [0u32; 2];
    for (slot, item) in parsed.iter_mut().zip(pair) {
        let n = item.as_u64().ok_or_else(|| {
            ComputerError::invalid_request(format!(
                "{} must be a tuple of non-negative ints",
                value
            ))
        })?;
        *slot = u32::try_from(n).map_err(|_| {
            ComputerError::invalid_request(format!("{} is out of range", value))
        })?;
    }

    Ok(Coordinate::new(parsed[0], parsed[1]))
}
