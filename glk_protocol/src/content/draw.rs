//! Graphics window drawing operations.

use serde::{Deserialize, Serialize};

use super::Color;

wire_name_enum! {
    /// What a drawing operation does.
    pub enum DrawKind {
        SetColor => "setcolor",
        Fill => "fill",
        Image => "image",
    }
}

/// One operation in a graphics window's `draw` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawOperation {
    pub special: DrawKind,

    /// Either a packed `0xRRGGBB` number or a CSS color string.
    #[serde(
        default,
        deserialize_with = "crate::lenient::opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub color: Option<Color>,
    #[serde(
        default,
        deserialize_with = "crate::lenient::opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub x: Option<i32>,
    #[serde(
        default,
        deserialize_with = "crate::lenient::opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub y: Option<i32>,
    #[serde(
        default,
        deserialize_with = "crate::lenient::opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub width: Option<u32>,
    #[serde(
        default,
        deserialize_with = "crate::lenient::opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub height: Option<u32>,
    #[serde(
        default,
        deserialize_with = "crate::lenient::opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<u32>,
    #[serde(
        default,
        deserialize_with = "crate::lenient::opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub url: Option<String>,
}

impl DrawOperation {
    fn new(special: DrawKind) -> Self {
        Self {
            special,
            color: None,
            x: None,
            y: None,
            width: None,
            height: None,
            image: None,
            url: None,
        }
    }

    /// Set the background color used by later fills.
    pub fn set_color(color: Color) -> Self {
        Self {
            color: Some(color),
            ..Self::new(DrawKind::SetColor)
        }
    }

    /// Fill a rectangle, with the current background color if `color` is absent.
    pub fn fill(color: Option<Color>, x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            color,
            x: Some(x),
            y: Some(y),
            width: Some(width),
            height: Some(height),
            ..Self::new(DrawKind::Fill)
        }
    }

    /// Draw an image at a position.
    pub fn image(image: u32, x: i32, y: i32) -> Self {
        Self {
            image: Some(image),
            x: Some(x),
            y: Some(y),
            ..Self::new(DrawKind::Image)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_fill() {
        let op: DrawOperation = serde_json::from_value(json!({
            "special": "fill", "color": "#FF0000", "x": 1, "y": 2, "width": 30, "height": 40
        }))
        .unwrap();

        assert_eq!(
            op,
            DrawOperation::fill(Some(Color::Css("#FF0000".to_owned())), 1, 2, 30, 40)
        );
    }

    #[test]
    fn test_decode_unknown_operation() {
        let op: DrawOperation = serde_json::from_value(json!({ "special": "blit" })).unwrap();
        assert_eq!(op.special, DrawKind::Other("blit".to_owned()));
    }

    #[test]
    fn test_packed_color_and_malformed_geometry() {
        let op: DrawOperation = serde_json::from_value(json!({
            "special": "fill", "color": 0xFF0000, "x": "left", "y": 2, "width": 30.5, "height": 40
        }))
        .unwrap();

        assert_eq!(op.color, Some(Color::Rgb(0xFF0000)));
        assert_eq!(op.x, None);
        assert_eq!(op.y, Some(2));
        assert_eq!(op.width, None);
        assert_eq!(op.height, Some(40));
    }
}
