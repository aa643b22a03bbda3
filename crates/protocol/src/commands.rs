use serde::{Deserialize, Serialize};

use crate::theme::{Paint, ThemeToken};
use crate::types::{Point, Rect};

/// A single, stateless render instruction.
///
/// Views emit a `Vec<RenderCommand>`. Renderers consume this list
/// sequentially — each command carries all the data it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Draw a filled rectangle, optionally with an inline label and a hover
    /// string (tooltip) for interactive renderers.
    DrawRect {
        rect: Rect,
        fill: Paint,
        border_color: Option<ThemeToken>,
        label: Option<String>,
        hover: Option<String>,
    },

    /// Draw a text string at a position.
    DrawText {
        position: Point,
        text: String,
        color: Paint,
        font_size: f64,
        align: TextAlign,
    },

    /// Draw a line segment.
    DrawLine {
        from: Point,
        to: Point,
        color: ThemeToken,
        width: f64,
    },

    /// Begin a logical group (e.g. one track row). Renderers may use this
    /// for batching, layer separation, or accessibility.
    BeginGroup { id: String, label: Option<String> },

    /// End the current group.
    EndGroup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}
