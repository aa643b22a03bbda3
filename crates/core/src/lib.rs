//! Turn per-counter event traces into labeled, colored timeline intervals.
//!
//! ```text
//!   trace JSON ─▶ parsers ─▶ Counter[] ─▶ reconstruct ─▶ Interval[]
//!                                                          │
//!                 BarSeries[] ◀─ TrackAggregator ◀─────────┘
//!                     │
//!                     └─▶ views ─▶ RenderCommand[] ─▶ svg / terminal
//! ```

pub mod aggregate;
pub mod error;
pub mod model;
pub mod parsers;
pub mod pipeline;
pub mod reconstruct;
pub mod registry;
pub mod svg;
pub mod views;

pub use aggregate::{TrackAggregator, TrackExport};
pub use error::TraceError;
pub use pipeline::{Timeline, build_timeline};
pub use registry::{CounterCategory, EventTypeRegistry};
