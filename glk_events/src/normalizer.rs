//! Content Normalizer - collapses window-kind-specific content into spans.
//!
//! The normalization works as follows:
//! 1. **Dispatch**: Branch once on the block body (buffer, grid, graphics)
//! 2. **Walk**: Visit paragraphs, lines or draw operations in document order
//! 3. **Map**: Turn each wire span into at most one span event
//! 4. **Resolve**: Look image ids up through the injected resolver
//!
//! Grid lines are never sorted: a later entry for the same row is an
//! overwrite the renderer must apply last.

use glk_protocol::{
    ContentBody, ContentSpan, DrawKind, DrawOperation, GridLine, Paragraph, SpecialContent,
    SpecialKind,
};

use crate::config::ParserConfig;
use crate::events::{LineRange, SpanEvent};
use crate::resolver::ImageResolver;

/// Result of normalizing one content block body.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Normalized {
    pub spans: Vec<SpanEvent>,
    /// Per-line ranges into `spans`, only for grid bodies.
    pub lines: Option<Vec<LineRange>>,
}

/// Normalizes content bodies against one resolver and configuration.
pub struct ContentNormalizer<'a, R: ImageResolver + ?Sized> {
    resolver: &'a R,
    config: &'a ParserConfig,
}

impl<'a, R: ImageResolver + ?Sized> ContentNormalizer<'a, R> {
    /// Create a normalizer that resolves images through `resolver`.
    pub fn new(resolver: &'a R, config: &'a ParserConfig) -> Self {
        Self { resolver, config }
    }

    /// Normalize a content block body into an ordered list of span events.
    pub fn normalize(&self, body: &ContentBody) -> Normalized {
        match body {
            ContentBody::Buffer(paragraphs) => Normalized {
                spans: self.normalize_paragraphs(paragraphs),
                lines: None,
            },
            ContentBody::Grid(lines) => self.normalize_lines(lines),
            ContentBody::Graphics(operations) => Normalized {
                spans: self.normalize_draw(operations),
                lines: None,
            },
            ContentBody::Empty => Normalized::default(),
        }
    }

    /// Buffer windows: a paragraph flow break comes before its content.
    fn normalize_paragraphs(&self, paragraphs: &[Paragraph]) -> Vec<SpanEvent> {
        let mut spans = Vec::new();
        for paragraph in paragraphs {
            if paragraph.flowbreak == Some(true) {
                spans.push(SpanEvent::FlowBreak);
            }
            self.push_spans(paragraph.spans(), &mut spans);
        }
        spans
    }

    /// Grid windows: spans flattened in the order the lines were given.
    fn normalize_lines(&self, lines: &[GridLine]) -> Normalized {
        let mut spans = Vec::new();
        let mut ranges = Vec::with_capacity(lines.len());

        for line in lines {
            let start = spans.len();
            self.push_spans(line.spans(), &mut spans);
            ranges.push(LineRange {
                line: line.line,
                start,
                end: spans.len(),
            });
        }

        Normalized {
            spans,
            lines: self.config.group_grid_lines.then_some(ranges),
        }
    }

    /// Graphics windows: every operation is an opaque drawing directive.
    fn normalize_draw(&self, operations: &[DrawOperation]) -> Vec<SpanEvent> {
        operations
            .iter()
            .filter_map(|operation| self.draw_event(operation))
            .collect()
    }

    fn push_spans(&self, content: &[ContentSpan], spans: &mut Vec<SpanEvent>) {
        spans.extend(content.iter().filter_map(|span| self.span_event(span)));
    }

    /// Map one wire span to its event. Only unusable spans map to nothing.
    pub fn span_event(&self, span: &ContentSpan) -> Option<SpanEvent> {
        match span {
            ContentSpan::Text(text) => Some(SpanEvent::text(text.clone())),
            ContentSpan::Styled(styled) => Some(SpanEvent::Text {
                text: styled.text.clone(),
                style: styled.style.clone(),
                hyperlink: styled.hyperlink,
            }),
            ContentSpan::Special { special } => self.special_event(special),
            ContentSpan::Unrecognized(value) => {
                tracing::debug!(%value, "skipping unrecognized content span");
                None
            }
        }
    }

    fn special_event(&self, special: &SpecialContent) -> Option<SpanEvent> {
        match &special.kind {
            SpecialKind::Image => {
                let Some(image) = special.image else {
                    tracing::debug!("skipping image span without an image number");
                    return None;
                };
                Some(SpanEvent::Image {
                    image_number: image,
                    image_url: self.resolve_image(image, special.url.as_deref()),
                    width: special.width,
                    height: special.height,
                    alignment: special.alignment,
                    alt_text: special.alttext.clone(),
                })
            }
            SpecialKind::FlowBreak => Some(SpanEvent::FlowBreak),
            SpecialKind::SetColor => Some(SpanEvent::SetColor {
                color: special.color.clone(),
            }),
            SpecialKind::Fill => Some(SpanEvent::Fill {
                color: special.color.clone(),
                x: special.x,
                y: special.y,
                width: special.width,
                height: special.height,
            }),
            SpecialKind::Other(kind) => {
                tracing::debug!(kind = %kind, "skipping unknown special span");
                None
            }
        }
    }

    fn draw_event(&self, operation: &DrawOperation) -> Option<SpanEvent> {
        match &operation.special {
            DrawKind::SetColor => Some(SpanEvent::SetColor {
                color: operation.color.clone(),
            }),
            DrawKind::Fill => Some(SpanEvent::Fill {
                color: operation.color.clone(),
                x: operation.x,
                y: operation.y,
                width: operation.width,
                height: operation.height,
            }),
            DrawKind::Image => {
                let Some(image) = operation.image else {
                    tracing::debug!("skipping image draw without an image number");
                    return None;
                };
                Some(SpanEvent::Image {
                    image_number: image,
                    image_url: self.resolve_image(image, operation.url.as_deref()),
                    width: operation.width,
                    height: operation.height,
                    alignment: None,
                    alt_text: None,
                })
            }
            DrawKind::Other(kind) => {
                tracing::debug!(kind = %kind, "skipping unknown draw operation");
                None
            }
        }
    }

    /// The resolver wins; the span's own URL is only a configured fallback.
    fn resolve_image(&self, image: u32, inline_url: Option<&str>) -> Option<String> {
        self.resolver.resolve(image).or_else(|| {
            if self.config.inline_image_urls {
                inline_url.map(str::to_owned)
            } else {
                None
            }
        })
    }
}
