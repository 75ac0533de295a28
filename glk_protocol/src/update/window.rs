//! Window layout descriptors.

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::content::WindowId;

wire_name_enum! {
    /// Glk window types.
    pub enum WindowKind {
        Buffer => "buffer",
        Grid => "grid",
        Graphics => "graphics",
        Pair => "pair",
    }
}

/// One window of the layout, as sent by the interpreter.
///
/// Passed through to the renderer untouched. Geometry is kept as the JSON
/// number it arrived as, fractional or negative; only `id` and `type` must
/// decode for the window to survive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowDescriptor {
    pub id: WindowId,
    #[serde(rename = "type")]
    pub kind: WindowKind,
    #[serde(
        default,
        deserialize_with = "crate::lenient::opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub rock: Option<Number>,
    #[serde(
        default,
        deserialize_with = "crate::lenient::opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub left: Option<Number>,
    #[serde(
        default,
        deserialize_with = "crate::lenient::opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub top: Option<Number>,
    #[serde(
        default,
        deserialize_with = "crate::lenient::opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub width: Option<Number>,
    #[serde(
        default,
        deserialize_with = "crate::lenient::opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub height: Option<Number>,

    /// Character cell dimensions of a grid window.
    #[serde(
        default,
        deserialize_with = "crate::lenient::opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub gridwidth: Option<Number>,
    #[serde(
        default,
        deserialize_with = "crate::lenient::opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub gridheight: Option<Number>,

    /// Canvas pixel dimensions of a graphics window.
    #[serde(
        default,
        deserialize_with = "crate::lenient::opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub graphwidth: Option<Number>,
    #[serde(
        default,
        deserialize_with = "crate::lenient::opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub graphheight: Option<Number>,
}

impl WindowDescriptor {
    /// A window with the given size and no optional geometry.
    pub fn new(id: WindowId, kind: WindowKind, width: u32, height: u32) -> Self {
        Self {
            id,
            kind,
            rock: Some(0.into()),
            left: None,
            top: None,
            width: Some(width.into()),
            height: Some(height.into()),
            gridwidth: None,
            gridheight: None,
            graphwidth: None,
            graphheight: None,
        }
    }

    /// Set the top-left corner.
    pub fn at(mut self, left: u32, top: u32) -> Self {
        self.left = Some(left.into());
        self.top = Some(top.into());
        self
    }

    pub fn is_grid(&self) -> bool {
        self.kind == WindowKind::Grid
    }
}
