//! Span events - the normalized unit of window content.

use glk_protocol::{Color, ImageAlignment};
use serde::{Deserialize, Serialize};

/// One normalized piece of content.
///
/// Buffer paragraphs, grid lines and graphics draw lists all collapse into
/// a flat list of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SpanEvent {
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        style: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        hyperlink: Option<u32>,
    },

    /// An image; `image_url` is absent when the resolver had no URL for it.
    #[serde(rename_all = "camelCase")]
    Image {
        image_number: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image_url: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        width: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        height: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alignment: Option<ImageAlignment>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alt_text: Option<String>,
    },

    FlowBreak,

    SetColor {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<Color>,
    },

    Fill {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<Color>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        x: Option<i32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        y: Option<i32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        width: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        height: Option<u32>,
    },
}

impl SpanEvent {
    /// Unstyled text.
    pub fn text(text: impl Into<String>) -> Self {
        SpanEvent::Text {
            text: text.into(),
            style: None,
            hyperlink: None,
        }
    }

    /// Text in a named style.
    pub fn styled(style: impl Into<String>, text: impl Into<String>) -> Self {
        SpanEvent::Text {
            text: text.into(),
            style: Some(style.into()),
            hyperlink: None,
        }
    }

    /// The text of a text span.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SpanEvent::Text { text, .. } => Some(text),
            _ => None,
        }
    }

    pub fn is_flowbreak(&self) -> bool {
        matches!(self, SpanEvent::FlowBreak)
    }

    /// Name of the variant as it appears in the serialized `type` field.
    pub fn kind_name(&self) -> &'static str {
        match self {
            SpanEvent::Text { .. } => "text",
            SpanEvent::Image { .. } => "image",
            SpanEvent::FlowBreak => "flowbreak",
            SpanEvent::SetColor { .. } => "setcolor",
            SpanEvent::Fill { .. } => "fill",
        }
    }
}

/// The spans of a grid content event that came from one grid line.
///
/// `start..end` indexes into the event's flat span list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    pub line: u32,
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_image_serializes_with_camel_case_fields() {
        let span = SpanEvent::Image {
            image_number: 5,
            image_url: Some("blob:test-image-5".to_owned()),
            width: Some(100),
            height: Some(80),
            alignment: None,
            alt_text: None,
        };

        assert_eq!(
            serde_json::to_value(&span).unwrap(),
            json!({
                "type": "image",
                "imageNumber": 5,
                "imageUrl": "blob:test-image-5",
                "width": 100,
                "height": 80
            })
        );
    }

    #[test]
    fn test_flowbreak_serializes_as_marker() {
        assert_eq!(
            serde_json::to_value(SpanEvent::FlowBreak).unwrap(),
            json!({ "type": "flowbreak" })
        );
    }

    #[test]
    fn test_kind_names_match_serialized_tags() {
        let spans = [
            SpanEvent::text("a"),
            SpanEvent::FlowBreak,
            SpanEvent::SetColor { color: None },
        ];
        for span in spans {
            let tag = serde_json::to_value(&span).unwrap()["type"].clone();
            assert_eq!(tag, span.kind_name());
        }
    }

    #[test]
    fn test_styled_text() {
        let span = SpanEvent::styled("emphasized", "Important text");
        assert_eq!(span.as_text(), Some("Important text"));
        assert!(!span.is_flowbreak());
    }

    #[test]
    fn test_line_range_len() {
        let range = LineRange { line: 3, start: 2, end: 5 };
        assert_eq!(range.len(), 3);
        assert!(!range.is_empty());
        assert!(LineRange { line: 0, start: 4, end: 4 }.is_empty());
    }
}
