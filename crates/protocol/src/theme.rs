use serde::{Deserialize, Serialize};

/// Semantic color tokens resolved by the renderer's active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    Background,
    Border,

    LaneBackground,
    LaneBorder,
    LaneHeaderBackground,
    LaneHeaderText,

    TextPrimary,
    TextMuted,

    /// Zero-width marker drawn for a track that has no intervals.
    Placeholder,
    SelectionHighlight,
}

/// Fill for a drawn shape: either a theme token or a CSS named color taken
/// verbatim from trace data (e.g. `"mediumblue"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Paint {
    Token(ThemeToken),
    Named(String),
}

impl From<ThemeToken> for Paint {
    fn from(token: ThemeToken) -> Self {
        Self::Token(token)
    }
}
