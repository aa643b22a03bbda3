//! End-to-end transform: counters → reconstructed intervals → aggregated
//! tracks.

use log::debug;
use serde::{Deserialize, Serialize};
use traceplot_protocol::BarSeries;

use crate::aggregate::{TrackAggregator, TrackExport};
use crate::error::TraceError;
use crate::model::{Counter, Interval};
use crate::reconstruct::reconstruct;
use crate::registry::EventTypeRegistry;

/// The complete, render-ready result of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub tracks: Vec<TrackExport>,
}

/// Build a timeline with the standard event registry.
pub fn build_timeline(counters: &[Counter]) -> Result<Timeline, TraceError> {
    build_timeline_with(&EventTypeRegistry::STANDARD, counters)
}

/// Build a timeline from counters in registration order.
///
/// All tracks are registered first, then every counter is reconstructed,
/// and only then are intervals attached. Any failure aborts the whole run,
/// so a caller never sees a partially populated timeline.
pub fn build_timeline_with(
    registry: &EventTypeRegistry,
    counters: &[Counter],
) -> Result<Timeline, TraceError> {
    let mut aggregator = TrackAggregator::new();
    for counter in counters {
        aggregator.register_track(counter.name.as_str())?;
    }

    let reconstructed = counters
        .iter()
        .map(|counter| reconstruct(counter, registry).map(|intervals| (counter, intervals)))
        .collect::<Result<Vec<_>, _>>()?;

    for (counter, intervals) in reconstructed {
        aggregator.attach_all(&counter.name, intervals)?;
    }

    let timeline = Timeline {
        tracks: aggregator.export_for_rendering(),
    };
    debug!(
        "timeline: {} tracks, {} intervals",
        timeline.tracks.len(),
        timeline.interval_count()
    );
    Ok(timeline)
}

impl Timeline {
    pub fn interval_count(&self) -> usize {
        self.tracks.iter().map(|t| t.intervals.len()).sum()
    }

    /// Earliest interval start, or 0 when no track has intervals.
    pub fn start_time(&self) -> f64 {
        let start = self
            .tracks
            .iter()
            .flat_map(|t| &t.intervals)
            .map(|iv| iv.start)
            .fold(f64::INFINITY, f64::min);
        if start.is_finite() { start } else { 0.0 }
    }

    /// Latest interval end, or 0 when no track has intervals.
    pub fn end_time(&self) -> f64 {
        let end = self
            .tracks
            .iter()
            .flat_map(|t| &t.intervals)
            .map(Interval::end)
            .fold(f64::NEG_INFINITY, f64::max);
        if end.is_finite() { end } else { 0.0 }
    }

    /// Per-track bar lists, in track order.
    pub fn bar_series(&self) -> Vec<BarSeries> {
        self.tracks.iter().map(TrackExport::to_bar_series).collect()
    }
}
