//! Content spans - the pieces a paragraph or grid line is made of.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::lenient::json_kind;

/// One element of a paragraph's or grid line's `content` list.
///
/// The wire shape is a loose union; the variant is decided once, from field
/// presence, when the span is decoded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ContentSpan {
    /// A bare string in the default style.
    Text(String),

    /// Text with a style name and optional hyperlink.
    Styled(TextSpan),

    /// An image, flow break or drawing directive.
    Special { special: SpecialContent },

    /// A value that matches none of the shapes above, kept as-is.
    Unrecognized(Value),
}

impl ContentSpan {
    /// A plain text span.
    pub fn text(text: impl Into<String>) -> Self {
        ContentSpan::Text(text.into())
    }

    /// A styled text span.
    pub fn styled(style: impl Into<String>, text: impl Into<String>) -> Self {
        ContentSpan::Styled(TextSpan {
            style: Some(style.into()),
            text: text.into(),
            hyperlink: None,
        })
    }

    /// A special span.
    pub fn special(special: SpecialContent) -> Self {
        ContentSpan::Special { special }
    }

    /// Classify a raw JSON value.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(text) => ContentSpan::Text(text),
            Value::Object(map) if map.contains_key("special") => special_from_object(map),
            Value::Object(map) if map.get("text").is_some_and(Value::is_string) => {
                let value = Value::Object(map);
                match serde_json::from_value::<TextSpan>(value.clone()) {
                    Ok(span) => ContentSpan::Styled(span),
                    Err(err) => {
                        tracing::debug!(error = %err, "styled span did not decode");
                        ContentSpan::Unrecognized(value)
                    }
                }
            }
            other => {
                tracing::debug!(found = json_kind(&other), "unrecognized content span");
                ContentSpan::Unrecognized(other)
            }
        }
    }
}

impl<'de> Deserialize<'de> for ContentSpan {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(ContentSpan::from_value)
    }
}

/// Accepts both `{"special": {"type": "image", ...}}` and the flat
/// `{"special": "image", "image": 5, ...}` form.
fn special_from_object(mut map: Map<String, Value>) -> ContentSpan {
    let special = match map.remove("special") {
        Some(Value::Object(nested)) => Value::Object(nested),
        Some(Value::String(kind)) => {
            map.insert("type".to_owned(), Value::String(kind));
            Value::Object(std::mem::take(&mut map))
        }
        Some(other) => {
            map.insert("special".to_owned(), other);
            return ContentSpan::Unrecognized(Value::Object(map));
        }
        None => return ContentSpan::Unrecognized(Value::Object(map)),
    };

    match serde_json::from_value::<SpecialContent>(special.clone()) {
        Ok(special) => ContentSpan::Special { special },
        Err(err) => {
            tracing::debug!(error = %err, "special span did not decode");
            ContentSpan::Unrecognized(serde_json::json!({ "special": special }))
        }
    }
}

/// Styled text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSpan {
    #[serde(
        default,
        deserialize_with = "crate::lenient::opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub style: Option<String>,

    pub text: String,

    /// Link value set by the game with `glk_set_hyperlink`.
    #[serde(
        default,
        deserialize_with = "crate::lenient::opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub hyperlink: Option<u32>,
}

impl TextSpan {
    pub fn with_hyperlink(mut self, link: u32) -> Self {
        self.hyperlink = Some(link);
        self
    }
}

wire_name_enum! {
    /// Kind of a special span.
    pub enum SpecialKind {
        Image => "image",
        FlowBreak => "flowbreak",
        SetColor => "setcolor",
        Fill => "fill",
    }
}

/// Payload of a special span. Which fields matter depends on `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialContent {
    #[serde(rename = "type")]
    pub kind: SpecialKind,

    // Image fields
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
    #[serde(
        default,
        deserialize_with = "ImageAlignment::deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub alignment: Option<ImageAlignment>,
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
    pub alttext: Option<String>,

    // Graphics window fields
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
}

impl SpecialContent {
    /// A special of the given kind with every field absent.
    pub fn new(kind: SpecialKind) -> Self {
        Self {
            kind,
            image: None,
            url: None,
            alignment: None,
            width: None,
            height: None,
            alttext: None,
            color: None,
            x: None,
            y: None,
        }
    }

    /// An image special.
    pub fn image(image: u32, width: u32, height: u32) -> Self {
        Self {
            image: Some(image),
            width: Some(width),
            height: Some(height),
            ..Self::new(SpecialKind::Image)
        }
    }

    pub fn flowbreak() -> Self {
        Self::new(SpecialKind::FlowBreak)
    }

    pub fn with_alignment(mut self, alignment: ImageAlignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn with_alttext(mut self, alttext: impl Into<String>) -> Self {
        self.alttext = Some(alttext.into());
        self
    }
}

/// Image alignment in buffer windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageAlignment {
    InlineUp,
    InlineDown,
    InlineCenter,
    MarginLeft,
    MarginRight,
}

impl ImageAlignment {
    /// Map a Glk `imagealign_*` constant (1-5).
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            1 => Some(ImageAlignment::InlineUp),
            2 => Some(ImageAlignment::InlineDown),
            3 => Some(ImageAlignment::InlineCenter),
            4 => Some(ImageAlignment::MarginLeft),
            5 => Some(ImageAlignment::MarginRight),
            _ => None,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "inlineup" => Some(ImageAlignment::InlineUp),
            "inlinedown" => Some(ImageAlignment::InlineDown),
            "inlinecenter" => Some(ImageAlignment::InlineCenter),
            "marginleft" => Some(ImageAlignment::MarginLeft),
            "marginright" => Some(ImageAlignment::MarginRight),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageAlignment::InlineUp => "inlineup",
            ImageAlignment::InlineDown => "inlinedown",
            ImageAlignment::InlineCenter => "inlinecenter",
            ImageAlignment::MarginLeft => "marginleft",
            ImageAlignment::MarginRight => "marginright",
        }
    }

    /// Accept a name or a numeric code; anything else decodes as absent.
    fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<Self>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        let alignment = match &value {
            None | Some(Value::Null) => None,
            Some(Value::String(name)) => Self::from_name(name),
            Some(Value::Number(code)) => code.as_u64().and_then(Self::from_code),
            Some(_) => None,
        };
        if alignment.is_none() && !matches!(value, None | Some(Value::Null)) {
            tracing::debug!(?value, "ignoring unknown image alignment");
        }
        Ok(alignment)
    }
}

impl std::fmt::Display for ImageAlignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A color, either a packed `0xRRGGBB` number or a CSS string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Color {
    Rgb(u32),
    Css(String),
}

impl Color {
    /// Render as a CSS color.
    pub fn to_css(&self) -> String {
        match self {
            Color::Rgb(packed) => format!("#{:06x}", packed & 0x00FF_FFFF),
            Color::Css(css) => css.clone(),
        }
    }
}
