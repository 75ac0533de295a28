//! Input events - what the client sends back to the interpreter.

use serde::{Deserialize, Serialize};

use crate::content::WindowId;

/// Display metrics used by the interpreter to lay out windows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Metrics {
    pub width: f64,
    pub height: f64,

    // Generic character dimensions (superseded by the grid/buffer ones)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charwidth: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charheight: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outspacingx: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outspacingy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspacingx: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspacingy: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gridcharwidth: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gridcharheight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gridmarginx: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gridmarginy: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffercharwidth: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffercharheight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffermarginx: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffermarginy: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graphicsmarginx: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graphicsmarginy: Option<f64>,
}

impl Metrics {
    /// Metrics for a display of the given size with no optional fields.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Set the grid and buffer character cell size together.
    pub fn with_char_size(mut self, width: f64, height: f64) -> Self {
        self.gridcharwidth = Some(width);
        self.gridcharheight = Some(height);
        self.buffercharwidth = Some(width);
        self.buffercharheight = Some(height);
        self
    }
}

wire_name_enum! {
    /// Display features a client can announce in its `init` event.
    pub enum SupportFeature {
        Timer => "timer",
        Graphics => "graphics",
        GraphicsWin => "graphicswin",
        Hyperlinks => "hyperlinks",
    }
}

/// Events sent from the client to the interpreter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InputEvent {
    Init {
        gen: u64,
        metrics: Metrics,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        support: Option<Vec<SupportFeature>>,
    },
    Line {
        gen: u64,
        window: WindowId,
        value: String,
    },
    /// A single key, either one character or a key name like `"return"`.
    Char {
        gen: u64,
        window: WindowId,
        value: String,
    },
    Timer {
        gen: u64,
    },
    Arrange {
        gen: u64,
        metrics: Metrics,
    },
    Mouse {
        gen: u64,
        window: WindowId,
        x: u32,
        y: u32,
    },
    /// The link value set with `glk_set_hyperlink`.
    Hyperlink {
        gen: u64,
        window: WindowId,
        value: u32,
    },
}

impl InputEvent {
    pub fn gen(&self) -> u64 {
        match self {
            InputEvent::Init { gen, .. }
            | InputEvent::Line { gen, .. }
            | InputEvent::Char { gen, .. }
            | InputEvent::Timer { gen }
            | InputEvent::Arrange { gen, .. }
            | InputEvent::Mouse { gen, .. }
            | InputEvent::Hyperlink { gen, .. } => *gen,
        }
    }

    /// The window the event targets, if any.
    pub fn window(&self) -> Option<WindowId> {
        match self {
            InputEvent::Line { window, .. }
            | InputEvent::Char { window, .. }
            | InputEvent::Mouse { window, .. }
            | InputEvent::Hyperlink { window, .. } => Some(*window),
            InputEvent::Init { .. } | InputEvent::Timer { .. } | InputEvent::Arrange { .. } => None,
        }
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_init_event_wire_shape() {
        let event = InputEvent::Init {
            gen: 0,
            metrics: Metrics::new(800.0, 600.0),
            support: Some(vec![SupportFeature::Timer, SupportFeature::Hyperlinks]),
        };

        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "type": "init",
                "gen": 0,
                "metrics": { "width": 800.0, "height": 600.0 },
                "support": ["timer", "hyperlinks"]
            })
        );
    }

    #[test]
    fn test_line_event_wire_shape() {
        let event = InputEvent::Line {
            gen: 3,
            window: 1,
            value: "look".to_owned(),
        };
        assert_eq!(
            event.to_json().unwrap(),
            r#"{"type":"line","gen":3,"window":1,"value":"look"}"#
        );
        assert_eq!(event.window(), Some(1));
        assert_eq!(event.gen(), 3);
    }

    #[test]
    fn test_decode_hyperlink_event() {
        let event: InputEvent =
            serde_json::from_value(json!({ "type": "hyperlink", "gen": 9, "window": 2, "value": 42 }))
                .unwrap();
        assert_eq!(
            event,
            InputEvent::Hyperlink {
                gen: 9,
                window: 2,
                value: 42
            }
        );
    }

    #[test]
    fn test_timer_event_has_no_window() {
        assert_eq!(InputEvent::Timer { gen: 5 }.window(), None);
    }
}
