pub mod bar_series;
pub mod commands;
pub mod theme;
pub mod types;

pub use bar_series::BarSeries;
pub use commands::{RenderCommand, TextAlign};
pub use theme::{Paint, ThemeToken};
pub use types::{Point, Rect, Viewport};
