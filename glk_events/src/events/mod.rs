//! UI events - the parser's only output.
//!
//! Events are built fresh for each parse call and owned by the caller
//! afterwards; nothing here refers back to the source document.

mod span;

pub use span::*;

use glk_protocol::{InputEvent, InputKind, InputRequest, WindowDescriptor, WindowId};
use serde::{Deserialize, Serialize};

/// Everything a renderer needs to apply one generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UiEvent {
    #[serde(rename = "window-event")]
    Window(WindowEvent),

    #[serde(rename = "content-event")]
    Content(ContentEvent),

    #[serde(rename = "input-request-event")]
    InputRequest(InputRequestEvent),

    #[serde(rename = "error-event")]
    Error(ErrorEvent),
}

impl UiEvent {
    /// Name of the variant as it appears in the serialized `type` field.
    pub fn kind_name(&self) -> &'static str {
        match self {
            UiEvent::Window(_) => "window-event",
            UiEvent::Content(_) => "content-event",
            UiEvent::InputRequest(_) => "input-request-event",
            UiEvent::Error(_) => "error-event",
        }
    }

    /// The window this event concerns, if it concerns exactly one.
    pub fn window_id(&self) -> Option<WindowId> {
        match self {
            UiEvent::Content(event) => Some(event.window_id),
            UiEvent::InputRequest(event) => Some(event.window_id),
            UiEvent::Window(_) | UiEvent::Error(_) => None,
        }
    }

    pub fn as_content(&self) -> Option<&ContentEvent> {
        match self {
            UiEvent::Content(event) => Some(event),
            _ => None,
        }
    }

    pub fn as_input_request(&self) -> Option<&InputRequestEvent> {
        match self {
            UiEvent::InputRequest(event) => Some(event),
            _ => None,
        }
    }
}

/// The full window layout, exactly as the interpreter described it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowEvent {
    pub windows: Vec<WindowDescriptor>,
}

/// Normalized content for one window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentEvent {
    pub window_id: WindowId,

    /// Discard prior window content before applying `spans`.
    pub clear: bool,

    pub spans: Vec<SpanEvent>,

    /// For grid windows, which range of `spans` each grid line produced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lines: Option<Vec<LineRange>>,
}

impl ContentEvent {
    /// A content event with no line grouping.
    pub fn new(window_id: WindowId, clear: bool, spans: Vec<SpanEvent>) -> Self {
        Self {
            window_id,
            clear,
            spans,
            lines: None,
        }
    }

    /// Spans grouped by grid line, in document order.
    ///
    /// Empty for events without line grouping. Ranges built by the parser
    /// always lie within `spans`; a range from a hand-built or deserialized
    /// event that does not yields no spans for its line.
    pub fn line_spans(&self) -> impl Iterator<Item = (u32, &[SpanEvent])> + '_ {
        self.lines
            .iter()
            .flatten()
            .map(move |range| (range.line, self.spans.get(range.start..range.end).unwrap_or(&[])))
    }

    /// All text spans concatenated.
    pub fn plain_text(&self) -> String {
        self.spans.iter().filter_map(SpanEvent::as_text).collect()
    }
}

/// A window waiting for input.
///
/// Optional fields stay absent when the interpreter did not send them, so a
/// renderer can tell "not specified" from "explicitly disabled".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputRequestEvent {
    pub window_id: WindowId,
    pub input_type: InputKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gen: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xpos: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ypos: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminators: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mouse: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hyperlink: Option<bool>,
}

impl InputRequestEvent {
    /// Build the input event that answers this request.
    ///
    /// Returns `None` for input types this crate does not know how to answer.
    pub fn reply(&self, gen: u64, value: impl Into<String>) -> Option<InputEvent> {
        let window = self.window_id;
        match self.input_type {
            InputKind::Line => Some(InputEvent::Line {
                gen,
                window,
                value: value.into(),
            }),
            InputKind::Char => Some(InputEvent::Char {
                gen,
                window,
                value: value.into(),
            }),
            InputKind::Other(_) => None,
        }
    }

    /// Whether `key` ends line input in addition to return.
    pub fn is_terminator(&self, key: &str) -> bool {
        self.terminators
            .as_deref()
            .is_some_and(|keys| keys.iter().any(|k| k == key))
    }
}

impl From<&InputRequest> for InputRequestEvent {
    fn from(request: &InputRequest) -> Self {
        Self {
            window_id: request.id,
            input_type: request.kind.clone(),
            gen: request.gen,
            max_length: request.maxlen,
            initial: request.initial.clone(),
            xpos: request.xpos,
            ypos: request.ypos,
            terminators: request.terminators.clone(),
            mouse: request.mouse,
            hyperlink: request.hyperlink,
        }
    }
}

/// The interpreter reported an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEvent {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_event_tags() {
        let event = UiEvent::Error(ErrorEvent {
            message: "boom".to_owned(),
        });
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({ "type": "error-event", "message": "boom" })
        );
        assert_eq!(event.kind_name(), "error-event");
        assert_eq!(event.window_id(), None);
    }

    #[test]
    fn test_content_event_wire_shape() {
        let event = UiEvent::Content(ContentEvent::new(1, true, Vec::new()));
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({ "type": "content-event", "windowId": 1, "clear": true, "spans": [] })
        );
    }

    #[test]
    fn test_line_spans_out_of_bounds_range_is_empty() {
        let event: ContentEvent = serde_json::from_value(json!({
            "windowId": 2,
            "clear": false,
            "spans": [{ "type": "text", "text": "ab" }],
            "lines": [{ "line": 0, "start": 0, "end": 1 }, { "line": 1, "start": 1, "end": 9 }]
        }))
        .unwrap();

        let grouped: Vec<_> = event.line_spans().collect();
        assert_eq!(grouped[0], (0, &[SpanEvent::text("ab")][..]));
        assert_eq!(grouped[1], (1, &[][..]));
    }

    #[test]
    fn test_line_spans() {
        let event = ContentEvent {
            window_id: 2,
            clear: false,
            spans: vec![SpanEvent::text("ab"), SpanEvent::text("cd"), SpanEvent::text("ef")],
            lines: Some(vec![
                LineRange { line: 4, start: 0, end: 2 },
                LineRange { line: 1, start: 2, end: 3 },
            ]),
        };

        let grouped: Vec<_> = event.line_spans().collect();
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].0, 4);
        assert_eq!(grouped[0].1.len(), 2);
        assert_eq!(grouped[1], (1, &[SpanEvent::text("ef")][..]));
        assert_eq!(event.plain_text(), "abcdef");
    }

    #[test]
    fn test_out_of_bounds_line_range_is_empty() {
        let event = ContentEvent {
            window_id: 2,
            clear: false,
            spans: vec![SpanEvent::text("x")],
            lines: Some(vec![LineRange { line: 0, start: 3, end: 9 }]),
        };
        let grouped: Vec<_> = event.line_spans().collect();
        assert!(grouped[0].1.is_empty());
    }

    #[test]
    fn test_input_request_omits_absent_fields() {
        let event = InputRequestEvent::from(&InputRequest::line(1, 255));
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({ "windowId": 1, "inputType": "line", "maxLength": 255 })
        );
    }

    #[test]
    fn test_reply_matches_request_kind() {
        let line = InputRequestEvent::from(&InputRequest::line(1, 80));
        assert_eq!(
            line.reply(4, "go north"),
            Some(InputEvent::Line {
                gen: 4,
                window: 1,
                value: "go north".to_owned()
            })
        );

        let char_request = InputRequestEvent::from(&InputRequest::char(2));
        assert!(matches!(
            char_request.reply(5, "return"),
            Some(InputEvent::Char { window: 2, .. })
        ));

        let unknown = InputRequestEvent::from(&InputRequest::new(3, InputKind::from("pointer")));
        assert_eq!(unknown.reply(6, "x"), None);
    }

    #[test]
    fn test_terminators() {
        let mut request = InputRequest::line(1, 80);
        request.terminators = Some(vec!["escape".to_owned(), "func1".to_owned()]);
        let event = InputRequestEvent::from(&request);
        assert!(event.is_terminator("escape"));
        assert!(!event.is_terminator("func2"));
    }
}
