//! Update Parser - turns one update document into an ordered list of UI events.
//!
//! Dispatch works as follows:
//! 1. **Error documents**: a single error event, nothing else is looked at
//! 2. **Windows**: one window event when the document carries a layout
//! 3. **Content**: one content event per block, in document order
//! 4. **Input**: one input-request event per request, in document order
//!
//! Client directives (`timer`, `specialinput`, `disable`, `exit`,
//! `debugoutput`) never become UI events; they are read through
//! [`UpdateDocument::directives`].

use glk_protocol::{ContentBlock, ContentBody, UpdateDocument, UpdateKind};
use serde_json::Value;

use crate::config::ParserConfig;
use crate::error::Result;
use crate::events::{ContentEvent, ErrorEvent, InputRequestEvent, UiEvent, WindowEvent};
use crate::normalizer::ContentNormalizer;
use crate::resolver::ImageResolver;

/// Parses update documents with a fixed configuration.
///
/// Holds no state between calls, so one parser can serve any number of
/// threads as long as the resolver handed to it is shareable.
#[derive(Debug, Clone, Default)]
pub struct UpdateParser {
    config: ParserConfig,
}

impl UpdateParser {
    /// Create a new parser with the given configuration.
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Create a parser with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(ParserConfig::default())
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a decoded document.
    ///
    /// Never fails: missing optional fields are treated as absent and
    /// malformed pieces produce less output rather than an error.
    pub fn parse<R>(&self, document: &UpdateDocument, resolver: &R) -> Vec<UiEvent>
    where
        R: ImageResolver + ?Sized,
    {
        let _span = tracing::debug_span!(
            "parse_update",
            gen = document.gen,
            kind = ?document.kind
        )
        .entered();

        match document.kind {
            UpdateKind::Error => {
                let message = document.message.clone().unwrap_or_default();
                tracing::debug!(%message, "interpreter reported an error");
                vec![UiEvent::Error(ErrorEvent { message })]
            }
            UpdateKind::Update => self.parse_update(document, resolver),
        }
    }

    /// Decode JSON text and parse it.
    pub fn parse_json<R>(&self, text: &str, resolver: &R) -> Result<Vec<UiEvent>>
    where
        R: ImageResolver + ?Sized,
    {
        let document = UpdateDocument::from_json(text)?;
        Ok(self.parse(&document, resolver))
    }

    /// Decode an already-parsed JSON value and parse it.
    pub fn parse_value<R>(&self, value: Value, resolver: &R) -> Result<Vec<UiEvent>>
    where
        R: ImageResolver + ?Sized,
    {
        let document = UpdateDocument::from_value(value)?;
        Ok(self.parse(&document, resolver))
    }

    fn parse_update<R>(&self, document: &UpdateDocument, resolver: &R) -> Vec<UiEvent>
    where
        R: ImageResolver + ?Sized,
    {
        let content = document.content.as_deref().unwrap_or(&[]);
        let input = document.input.as_deref().unwrap_or(&[]);
        let mut events = Vec::with_capacity(
            usize::from(document.windows.is_some()) + content.len() + input.len(),
        );

        if let Some(windows) = &document.windows {
            tracing::trace!(windows = windows.len(), "window layout");
            events.push(UiEvent::Window(WindowEvent {
                windows: windows.clone(),
            }));
        }

        let normalizer = ContentNormalizer::new(resolver, &self.config);
        for block in content {
            events.push(UiEvent::Content(self.content_event(&normalizer, block)));
        }

        for request in input {
            tracing::trace!(window = request.id, kind = %request.kind, "input request");
            events.push(UiEvent::InputRequest(InputRequestEvent::from(request)));
        }

        tracing::debug!(events = events.len(), "update parsed");
        events
    }

    fn content_event<R>(&self, normalizer: &ContentNormalizer<'_, R>, block: &ContentBlock) -> ContentEvent
    where
        R: ImageResolver + ?Sized,
    {
        if block.body == ContentBody::Empty {
            tracing::debug!(window = block.id, "content block has no body");
        }

        let normalized = normalizer.normalize(&block.body);
        tracing::trace!(
            window = block.id,
            body = block.body.field_name().unwrap_or("none"),
            spans = normalized.spans.len(),
            "content block normalized"
        );

        ContentEvent {
            window_id: block.id,
            clear: block.clears(),
            spans: normalized.spans,
            lines: normalized.lines,
        }
    }
}

/// Parse a decoded document with the default configuration.
pub fn parse<R>(document: &UpdateDocument, resolver: &R) -> Vec<UiEvent>
where
    R: ImageResolver + ?Sized,
{
    UpdateParser::with_defaults().parse(document, resolver)
}

/// Decode JSON text and parse it with the default configuration.
pub fn parse_json<R>(text: &str, resolver: &R) -> Result<Vec<UiEvent>>
where
    R: ImageResolver + ?Sized,
{
    UpdateParser::with_defaults().parse_json(text, resolver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::SpanEvent;
    use crate::resolver::NoImages;
    use glk_protocol::{ContentSpan, GridLine, InputRequest, Paragraph, WindowDescriptor, WindowKind};
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    #[test]
    fn test_error_document_yields_single_error_event() {
        let mut document = UpdateDocument::error(0, "Something went wrong");
        // Ignored for error documents
        document.windows = Some(vec![WindowDescriptor::new(1, WindowKind::Buffer, 80, 25)]);

        let events = parse(&document, &NoImages);
        assert_eq!(
            events,
            vec![UiEvent::Error(ErrorEvent {
                message: "Something went wrong".to_owned()
            })]
        );
    }

    #[test]
    fn test_error_without_message_is_empty_string() {
        let mut document = UpdateDocument::error(0, "");
        document.message = None;

        let events = parse(&document, &NoImages);
        assert_eq!(
            events,
            vec![UiEvent::Error(ErrorEvent {
                message: String::new()
            })]
        );
    }

    #[test]
    fn test_bare_update_is_empty() {
        assert!(parse(&UpdateDocument::update(7), &NoImages).is_empty());
    }

    #[test]
    fn test_event_order_windows_content_input() {
        let mut document = UpdateDocument::update(1);
        document.windows = Some(vec![WindowDescriptor::new(1, WindowKind::Buffer, 80, 25)]);
        document.content = Some(vec![
            ContentBlock::buffer(1, vec![Paragraph::new(vec![ContentSpan::text("Welcome")])]),
            ContentBlock::grid(2, vec![GridLine::new(0, vec![ContentSpan::text("Score: 0")])]),
        ]);
        document.input = Some(vec![InputRequest::line(1, 255)]);

        let events = parse(&document, &NoImages);
        let kinds: Vec<_> = events.iter().map(UiEvent::kind_name).collect();
        assert_eq!(
            kinds,
            ["window-event", "content-event", "content-event", "input-request-event"]
        );
        assert_eq!(events[1].window_id(), Some(1));
        assert_eq!(events[2].window_id(), Some(2));
        assert_eq!(events[3].window_id(), Some(1));
    }

    #[test]
    fn test_empty_window_list_still_emits_window_event() {
        let mut document = UpdateDocument::update(2);
        document.windows = Some(Vec::new());

        assert_eq!(
            parse(&document, &NoImages),
            vec![UiEvent::Window(WindowEvent { windows: Vec::new() })]
        );
    }

    #[test]
    fn test_clear_only_block() {
        let mut document = UpdateDocument::update(3);
        document.content = Some(vec![ContentBlock::buffer(1, Vec::new()).with_clear(true)]);

        let events = parse(&document, &NoImages);
        assert_eq!(events, vec![UiEvent::Content(ContentEvent::new(1, true, Vec::new()))]);
    }

    #[test]
    fn test_grid_block_carries_line_ranges() {
        let mut document = UpdateDocument::update(4);
        document.content = Some(vec![ContentBlock::grid(
            2,
            vec![GridLine::new(1, vec![ContentSpan::text("X")])],
        )]);

        let events = parse(&document, &NoImages);
        let content = events[0].as_content().unwrap();
        assert_eq!(content.spans, vec![SpanEvent::text("X")]);
        assert_eq!(content.line_spans().collect::<Vec<_>>(), vec![(1, &content.spans[..])]);
    }

    #[test]
    fn test_config_is_applied() {
        let parser = UpdateParser::new(ParserConfig::default().with_group_grid_lines(false));
        let mut document = UpdateDocument::update(4);
        document.content = Some(vec![ContentBlock::grid(
            2,
            vec![GridLine::new(1, vec![ContentSpan::text("X")])],
        )]);

        let events = parser.parse(&document, &NoImages);
        assert_eq!(events[0].as_content().unwrap().lines, None);
        assert!(!parser.config().group_grid_lines);
    }

    #[test]
    fn test_parse_json_rejects_untyped_document() {
        assert!(parse_json(r#"{"gen": 1}"#, &NoImages).is_err());
        assert!(parse_json("[]", &NoImages).is_err());
    }

    #[test]
    fn test_parser_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<UpdateParser>();
    }

    #[traced_test]
    #[test]
    fn test_body_less_block_is_logged() {
        let mut document = UpdateDocument::update(5);
        document.content = Some(vec![ContentBlock {
            id: 9,
            clear: None,
            body: ContentBody::Empty,
        }]);

        let events = parse(&document, &NoImages);
        assert_eq!(events, vec![UiEvent::Content(ContentEvent::new(9, false, Vec::new()))]);
        assert!(logs_contain("content block has no body"));
    }
}
