use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::{Deserialize, Serialize};
use traceplot_protocol::BarSeries;

use crate::error::TraceError;
use crate::model::Interval;

/// Owns the tracks of one visualization run and the intervals attached to
/// each of them.
///
/// Tracks keep registration order, which is the order they render in. Use is
/// phased: register every track, attach intervals, then export.
#[derive(Debug, Default)]
pub struct TrackAggregator {
    tracks: IndexMap<String, Vec<Interval>>,
}

/// One exported row: a track name and its intervals (possibly none).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackExport {
    pub track: String,
    pub intervals: Vec<Interval>,
}

impl TrackAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_track(&mut self, name: impl Into<String>) -> Result<(), TraceError> {
        match self.tracks.entry(name.into()) {
            Entry::Occupied(entry) => Err(TraceError::DuplicateTrack(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(Vec::new());
                Ok(())
            }
        }
    }

    pub fn attach(&mut self, track: &str, interval: Interval) -> Result<(), TraceError> {
        self.tracks
            .get_mut(track)
            .ok_or_else(|| TraceError::UnknownTrack(track.to_string()))?
            .push(interval);
        Ok(())
    }

    /// Attach a batch of intervals to one track. Nothing is attached if the
    /// track is unknown.
    pub fn attach_all(
        &mut self,
        track: &str,
        intervals: impl IntoIterator<Item = Interval>,
    ) -> Result<(), TraceError> {
        self.tracks
            .get_mut(track)
            .ok_or_else(|| TraceError::UnknownTrack(track.to_string()))?
            .extend(intervals);
        Ok(())
    }

    pub fn contains(&self, track: &str) -> bool {
        self.tracks.contains_key(track)
    }

    /// Number of registered tracks.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Every registered track exactly once, in registration order, including
    /// tracks that never received an interval.
    pub fn export_for_rendering(self) -> Vec<TrackExport> {
        self.tracks
            .into_iter()
            .map(|(track, intervals)| TrackExport { track, intervals })
            .collect()
    }
}

impl TrackExport {
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Index-aligned bar lists for a chart backend. An empty track becomes a
    /// single zero-length placeholder bar.
    pub fn to_bar_series(&self) -> BarSeries {
        if self.intervals.is_empty() {
            return BarSeries::placeholder(self.track.as_str());
        }

        let n = self.intervals.len();
        let mut series = BarSeries {
            track: self.track.clone(),
            durations: Vec::with_capacity(n),
            rows: Vec::with_capacity(n),
            bases: Vec::with_capacity(n),
            hover: Vec::with_capacity(n),
            labels: Vec::with_capacity(n),
            colors: Vec::with_capacity(n),
            placeholder: false,
        };
        for interval in &self.intervals {
            series.durations.push(interval.duration);
            series.rows.push(self.track.clone());
            series.bases.push(interval.start);
            series.hover.push(interval.hover_text());
            series.labels.push(interval.label.clone());
            series.colors.push(Some(interval.color.clone()));
        }
        series
    }
}
