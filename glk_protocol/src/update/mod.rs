//! The update document - everything the interpreter sends for one generation.

mod input_request;
mod window;

pub use input_request::*;
pub use window::*;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::content::ContentBlock;
use crate::error::{ProtocolError, Result};

/// Top-level tag of an update document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateKind {
    Update,
    Error,
}

impl UpdateKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "update" => Some(UpdateKind::Update),
            "error" => Some(UpdateKind::Error),
            _ => None,
        }
    }
}

/// One generation's output from the interpreter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateDocument {
    #[serde(rename = "type")]
    pub kind: UpdateKind,

    /// Generation number, mirrored back by the client.
    #[serde(default, deserialize_with = "crate::lenient::or_default")]
    pub gen: u64,

    #[serde(
        default,
        deserialize_with = "crate::lenient::seq",
        skip_serializing_if = "Option::is_none"
    )]
    pub windows: Option<Vec<WindowDescriptor>>,

    #[serde(
        default,
        deserialize_with = "crate::lenient::seq",
        skip_serializing_if = "Option::is_none"
    )]
    pub content: Option<Vec<ContentBlock>>,

    #[serde(
        default,
        deserialize_with = "crate::lenient::seq",
        skip_serializing_if = "Option::is_none"
    )]
    pub input: Option<Vec<InputRequest>>,

    /// File dialog request.
    #[serde(
        default,
        deserialize_with = "crate::lenient::opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub specialinput: Option<SpecialInput>,

    /// Timer interval in milliseconds; `null` cancels the timer.
    #[serde(
        default,
        deserialize_with = "crate::lenient::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub timer: Option<Option<u64>>,

    /// No input is expected while the game is processing.
    #[serde(
        default,
        deserialize_with = "crate::lenient::opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub disable: Option<bool>,

    /// The game has exited.
    #[serde(
        default,
        deserialize_with = "crate::lenient::opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub exit: Option<bool>,

    #[serde(
        default,
        deserialize_with = "crate::lenient::seq",
        skip_serializing_if = "Option::is_none"
    )]
    pub debugoutput: Option<Vec<String>>,

    /// Error text, only meaningful for `type = "error"`.
    #[serde(
        default,
        deserialize_with = "crate::lenient::opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub message: Option<String>,
}

impl UpdateDocument {
    /// An empty update for a generation.
    pub fn update(gen: u64) -> Self {
        Self {
            kind: UpdateKind::Update,
            gen,
            windows: None,
            content: None,
            input: None,
            specialinput: None,
            timer: None,
            disable: None,
            exit: None,
            debugoutput: None,
            message: None,
        }
    }

    /// An error document.
    pub fn error(gen: u64, message: impl Into<String>) -> Self {
        Self {
            kind: UpdateKind::Error,
            message: Some(message.into()),
            ..Self::update(gen)
        }
    }

    /// Decode a document from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Decode a document from an already-parsed JSON value.
    ///
    /// Only the `type` tag is checked strictly; everything below it is decoded
    /// leniently. An error document carries nothing but its message and gen.
    pub fn from_value(value: Value) -> Result<Self> {
        match value.get("type") {
            None => return Err(ProtocolError::MissingKind),
            Some(Value::String(name)) => match UpdateKind::from_name(name) {
                Some(UpdateKind::Error) => return Ok(Self::error_from_value(&value)),
                Some(UpdateKind::Update) => {}
                None => return Err(ProtocolError::UnknownKind { kind: name.clone() }),
            },
            Some(other) => {
                return Err(ProtocolError::UnknownKind {
                    kind: other.to_string(),
                })
            }
        }
        Ok(serde_json::from_value(value)?)
    }

    fn error_from_value(value: &Value) -> Self {
        let gen = value.get("gen").and_then(Value::as_u64).unwrap_or_default();
        Self {
            message: value.get("message").and_then(Value::as_str).map(str::to_owned),
            ..Self::error(gen, "")
        }
    }

    /// Top-level fields that steer the client rather than a window.
    pub fn directives(&self) -> Directives<'_> {
        let timer = match self.timer {
            None => TimerDirective::Unchanged,
            Some(None) => TimerDirective::Cancel,
            Some(Some(interval)) => TimerDirective::Set(interval),
        };

        Directives {
            special_input: self.specialinput.as_ref(),
            timer,
            disable: self.disable.unwrap_or(false),
            exit: self.exit.unwrap_or(false),
            debug_output: self.debugoutput.as_deref().unwrap_or(&[]),
        }
    }
}

/// What the interpreter wants done with the client timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerDirective {
    /// No `timer` field: leave the timer as it is.
    #[default]
    Unchanged,
    /// Fire every given number of milliseconds.
    Set(u64),
    /// `timer: null`.
    Cancel,
}

/// Client-level directives carried by an update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Directives<'a> {
    pub special_input: Option<&'a SpecialInput>,
    pub timer: TimerDirective,
    pub disable: bool,
    pub exit: bool,
    pub debug_output: &'a [String],
}

wire_name_enum! {
    /// The only special input GlkOte defines.
    pub enum SpecialInputKind {
        FilerefPrompt => "fileref_prompt",
    }
}

wire_name_enum! {
    pub enum FileMode {
        Read => "read",
        Write => "write",
        ReadWrite => "readwrite",
        WriteAppend => "writeappend",
    }
}

wire_name_enum! {
    pub enum FileType {
        Save => "save",
        Data => "data",
        Transcript => "transcript",
        Command => "command",
    }
}

/// Request for a file dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialInput {
    #[serde(rename = "type")]
    pub kind: SpecialInputKind,
    pub filemode: FileMode,
    pub filetype: FileType,
    #[serde(
        default,
        deserialize_with = "crate::lenient::opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub gameid: Option<String>,
}
