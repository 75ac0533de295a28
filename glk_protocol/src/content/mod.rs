//! Window content updates.
//!
//! A content block never names the kind of window it belongs to. Which body
//! it carries is read from the fields that are present:
//! - **text**: buffer windows, a list of paragraphs
//! - **lines**: grid windows, a list of sparse line overwrites
//! - **draw**: graphics windows, a list of drawing operations

mod draw;
mod span;

pub use draw::*;
pub use span::*;

use serde::{Deserialize, Serialize};

/// Numeric identifier the interpreter assigns to a window.
pub type WindowId = u32;

/// One window's content changes for a generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawContentBlock", into = "RawContentBlock")]
pub struct ContentBlock {
    pub id: WindowId,
    /// Discard prior window content before applying this block.
    pub clear: Option<bool>,
    pub body: ContentBody,
}

/// The window-kind-specific payload of a content block.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ContentBody {
    /// Buffer window paragraphs.
    Buffer(Vec<Paragraph>),
    /// Grid window line overwrites, in document order.
    Grid(Vec<GridLine>),
    /// Graphics window drawing operations.
    Graphics(Vec<DrawOperation>),
    /// The block carried no recognizable body.
    #[default]
    Empty,
}

impl ContentBlock {
    /// A buffer block with the given paragraphs.
    pub fn buffer(id: WindowId, paragraphs: Vec<Paragraph>) -> Self {
        Self {
            id,
            clear: None,
            body: ContentBody::Buffer(paragraphs),
        }
    }

    /// A grid block with the given lines.
    pub fn grid(id: WindowId, lines: Vec<GridLine>) -> Self {
        Self {
            id,
            clear: None,
            body: ContentBody::Grid(lines),
        }
    }

    /// Set the clear flag.
    pub fn with_clear(mut self, clear: bool) -> Self {
        self.clear = Some(clear);
        self
    }

    /// Whether prior content should be discarded. Absent means no.
    pub fn clears(&self) -> bool {
        self.clear.unwrap_or(false)
    }
}

impl ContentBody {
    /// Wire name of the field this body was read from.
    pub fn field_name(&self) -> Option<&'static str> {
        match self {
            ContentBody::Buffer(_) => Some("text"),
            ContentBody::Grid(_) => Some("lines"),
            ContentBody::Graphics(_) => Some("draw"),
            ContentBody::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ContentBody::Buffer(paragraphs) => paragraphs.is_empty(),
            ContentBody::Grid(lines) => lines.is_empty(),
            ContentBody::Graphics(operations) => operations.is_empty(),
            ContentBody::Empty => true,
        }
    }
}

/// A paragraph of a buffer window.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Paragraph {
    /// Continue the previous line instead of starting a new one.
    #[serde(
        default,
        deserialize_with = "crate::lenient::opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub append: Option<bool>,

    /// Force a line break regardless of content.
    #[serde(
        default,
        deserialize_with = "crate::lenient::opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub flowbreak: Option<bool>,

    #[serde(
        default,
        deserialize_with = "crate::lenient::seq",
        skip_serializing_if = "Option::is_none"
    )]
    pub content: Option<Vec<ContentSpan>>,
}

impl Paragraph {
    /// A paragraph holding the given spans.
    pub fn new(content: Vec<ContentSpan>) -> Self {
        Self {
            content: Some(content),
            ..Default::default()
        }
    }

    /// Mark the paragraph as continuing the previous line.
    pub fn appended(mut self) -> Self {
        self.append = Some(true);
        self
    }

    /// Mark the paragraph as carrying a flow break.
    pub fn with_flowbreak(mut self) -> Self {
        self.flowbreak = Some(true);
        self
    }

    pub fn spans(&self) -> &[ContentSpan] {
        self.content.as_deref().unwrap_or(&[])
    }
}

/// One overwritten line of a grid window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridLine {
    /// Zero-based row; lines are sparse and may arrive in any order.
    pub line: u32,

    #[serde(
        default,
        deserialize_with = "crate::lenient::seq",
        skip_serializing_if = "Option::is_none"
    )]
    pub content: Option<Vec<ContentSpan>>,
}

impl GridLine {
    pub fn new(line: u32, content: Vec<ContentSpan>) -> Self {
        Self {
            line,
            content: Some(content),
        }
    }

    pub fn spans(&self) -> &[ContentSpan] {
        self.content.as_deref().unwrap_or(&[])
    }
}

/// The block exactly as it appears on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawContentBlock {
    id: WindowId,

    #[serde(
        default,
        deserialize_with = "crate::lenient::opt",
        skip_serializing_if = "Option::is_none"
    )]
    clear: Option<bool>,

    #[serde(
        default,
        deserialize_with = "crate::lenient::seq",
        skip_serializing_if = "Option::is_none"
    )]
    text: Option<Vec<Paragraph>>,

    #[serde(
        default,
        deserialize_with = "crate::lenient::seq",
        skip_serializing_if = "Option::is_none"
    )]
    lines: Option<Vec<GridLine>>,

    #[serde(
        default,
        deserialize_with = "crate::lenient::seq",
        skip_serializing_if = "Option::is_none"
    )]
    draw: Option<Vec<DrawOperation>>,
}

impl From<RawContentBlock> for ContentBlock {
    fn from(raw: RawContentBlock) -> Self {
        let present = [raw.text.is_some(), raw.lines.is_some(), raw.draw.is_some()]
            .iter()
            .filter(|present| **present)
            .count();
        if present > 1 {
            tracing::warn!(
                window = raw.id,
                "content block carries more than one body, using the first of text/lines/draw"
            );
        }

        // Precedence: text, lines, draw
        let body = match (raw.text, raw.lines, raw.draw) {
            (Some(paragraphs), _, _) => ContentBody::Buffer(paragraphs),
            (None, Some(lines), _) => ContentBody::Grid(lines),
            (None, None, Some(operations)) => ContentBody::Graphics(operations),
            (None, None, None) => ContentBody::Empty,
        };

        Self {
            id: raw.id,
            clear: raw.clear,
            body,
        }
    }
}

impl From<ContentBlock> for RawContentBlock {
    fn from(block: ContentBlock) -> Self {
        let mut raw = RawContentBlock {
            id: block.id,
            clear: block.clear,
            text: None,
            lines: None,
            draw: None,
        };
        match block.body {
            ContentBody::Buffer(paragraphs) => raw.text = Some(paragraphs),
            ContentBody::Grid(lines) => raw.lines = Some(lines),
            ContentBody::Graphics(operations) => raw.draw = Some(operations),
            ContentBody::Empty => {}
        }
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn decode(value: serde_json::Value) -> ContentBlock {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_buffer_body_from_text_field() {
        let block = decode(json!({
            "id": 1,
            "text": [{ "append": true, "content": [{ "style": "normal", "text": "Hello, world!" }] }]
        }));

        assert_eq!(block.id, 1);
        assert!(!block.clears());
        match &block.body {
            ContentBody::Buffer(paragraphs) => {
                assert_eq!(paragraphs.len(), 1);
                assert_eq!(paragraphs[0].append, Some(true));
                assert_eq!(paragraphs[0].spans().len(), 1);
            }
            other => panic!("expected buffer body, got {:?}", other),
        }
    }

    #[test]
    fn test_grid_body_from_lines_field() {
        let block = decode(json!({
            "id": 2,
            "lines": [
                { "line": 0, "content": [" At End Of Road                     Score: 36    Moves: 1"] }
            ]
        }));

        match &block.body {
            ContentBody::Grid(lines) => {
                assert_eq!(lines.len(), 1);
                assert_eq!(lines[0].line, 0);
            }
            other => panic!("expected grid body, got {:?}", other),
        }
    }

    #[test]
    fn test_graphics_body_from_draw_field() {
        let block = decode(json!({
            "id": 3,
            "draw": [{ "special": "fill", "color": "#FF0000", "x": 0, "y": 0, "width": 10, "height": 10 }]
        }));

        assert_eq!(block.body.field_name(), Some("draw"));
        assert!(!block.body.is_empty());
    }

    #[test]
    fn test_missing_body_is_empty() {
        let block = decode(json!({ "id": 4, "clear": true }));
        assert_eq!(block.body, ContentBody::Empty);
        assert!(block.clears());
    }

    #[test]
    fn test_text_takes_precedence_over_lines() {
        let block = decode(json!({ "id": 5, "text": [], "lines": [{ "line": 0 }] }));
        assert_eq!(block.body, ContentBody::Buffer(Vec::new()));
    }

    #[test]
    fn test_malformed_paragraph_is_dropped() {
        let block = decode(json!({
            "id": 6,
            "text": [{ "content": ["kept"] }, 7, { "content": ["also kept"] }]
        }));

        match block.body {
            ContentBody::Buffer(paragraphs) => assert_eq!(paragraphs.len(), 2),
            other => panic!("expected buffer body, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_flags_read_as_absent() {
        let block = decode(json!({
            "id": 7,
            "clear": "please",
            "text": [{ "append": "yes", "flowbreak": 1, "content": ["still here"] }]
        }));

        assert_eq!(block.clear, None);
        assert_eq!(
            block.body,
            ContentBody::Buffer(vec![Paragraph::new(vec![ContentSpan::text("still here")])])
        );
    }

    #[test]
    fn test_block_serializes_back_to_wire_shape() {
        let block = ContentBlock::grid(2, vec![GridLine::new(3, vec![ContentSpan::text("X")])])
            .with_clear(true);

        assert_eq!(
            serde_json::to_value(&block).unwrap(),
            json!({ "id": 2, "clear": true, "lines": [{ "line": 3, "content": ["X"] }] })
        );
    }
}
