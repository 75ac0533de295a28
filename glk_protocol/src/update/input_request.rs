//! Requests for player input.

use serde::{Deserialize, Serialize};

use crate::content::WindowId;

wire_name_enum! {
    /// Kind of input a window expects.
    pub enum InputKind {
        Line => "line",
        Char => "char",
    }
}

/// A window waiting for input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRequest {
    pub id: WindowId,
    #[serde(rename = "type")]
    pub kind: InputKind,
    #[serde(
        default,
        deserialize_with = "crate::lenient::opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub gen: Option<u64>,
    #[serde(
        default,
        deserialize_with = "crate::lenient::opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub maxlen: Option<u32>,
    /// Text to prefill the line input with.
    #[serde(
        default,
        deserialize_with = "crate::lenient::opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub initial: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::lenient::opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub mouse: Option<bool>,
    #[serde(
        default,
        deserialize_with = "crate::lenient::opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub hyperlink: Option<bool>,
    /// Cursor position in grid windows.
    #[serde(
        default,
        deserialize_with = "crate::lenient::opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub xpos: Option<u32>,
    #[serde(
        default,
        deserialize_with = "crate::lenient::opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub ypos: Option<u32>,
    /// Keys that end line input, e.g. `["escape", "func1"]`.
    #[serde(
        default,
        deserialize_with = "crate::lenient::seq",
        skip_serializing_if = "Option::is_none"
    )]
    pub terminators: Option<Vec<String>>,
}

impl InputRequest {
    /// A request with no optional fields.
    pub fn new(id: WindowId, kind: InputKind) -> Self {
        Self {
            id,
            kind,
            gen: None,
            maxlen: None,
            initial: None,
            mouse: None,
            hyperlink: None,
            xpos: None,
            ypos: None,
            terminators: None,
        }
    }

    pub fn line(id: WindowId, maxlen: u32) -> Self {
        Self {
            maxlen: Some(maxlen),
            ..Self::new(id, InputKind::Line)
        }
    }

    pub fn char(id: WindowId) -> Self {
        Self::new(id, InputKind::Char)
    }
}
