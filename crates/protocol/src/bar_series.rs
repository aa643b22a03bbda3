use serde::{Deserialize, Serialize};

/// Per-track data handed to a horizontal-bar chart backend.
///
/// All lists are index-aligned: bar `i` spans `bases[i] .. bases[i] +
/// durations[i]` on the row named `rows[i]`, is filled with `colors[i]`,
/// carries the event name `labels[i]` and shows `hover[i]` as its tooltip.
///
/// A track without intervals is represented by a single zero-length
/// placeholder bar at offset zero, with empty hover text and no color, so
/// that the row still takes up space in the layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeries {
    pub track: String,
    pub durations: Vec<f64>,
    pub rows: Vec<String>,
    pub bases: Vec<f64>,
    pub hover: Vec<String>,
    pub labels: Vec<String>,
    pub colors: Vec<Option<String>>,
    pub placeholder: bool,
}

/// A borrowed view of one bar in a [`BarSeries`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar<'a> {
    pub base: f64,
    pub duration: f64,
    pub hover: &'a str,
    pub label: &'a str,
    pub color: Option<&'a str>,
}

impl Bar<'_> {
    pub fn end(&self) -> f64 {
        self.base + self.duration
    }
}

impl BarSeries {
    /// The zero-width row used for a track that received no intervals.
    pub fn placeholder(track: impl Into<String>) -> Self {
        let track = track.into();
        Self {
            rows: vec![track.clone()],
            track,
            durations: vec![0.0],
            bases: vec![0.0],
            hover: vec![String::new()],
            labels: vec![String::new()],
            colors: vec![None],
            placeholder: true,
        }
    }

    /// Number of bars (1 for a placeholder).
    pub fn len(&self) -> usize {
        self.durations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.durations.is_empty()
    }

    /// Whether every list has the same length.
    pub fn is_aligned(&self) -> bool {
        let n = self.durations.len();
        self.rows.len() == n
            && self.bases.len() == n
            && self.hover.len() == n
            && self.labels.len() == n
            && self.colors.len() == n
    }

    /// Iterate the bars of this series. Yields nothing for a placeholder.
    pub fn bars(&self) -> impl Iterator<Item = Bar<'_>> {
        let count = if self.placeholder { 0 } else { self.len() };
        (0..count).map(move |i| Bar {
            base: self.bases[i],
            duration: self.durations[i],
            hover: &self.hover[i],
            label: &self.labels[i],
            color: self.colors[i].as_deref(),
        })
    }

    /// Earliest bar start in this series, if it has any real bars.
    pub fn start_time(&self) -> Option<f64> {
        self.bars().map(|b| b.base).reduce(f64::min)
    }

    /// Latest bar end in this series, if it has any real bars.
    pub fn end_time(&self) -> Option<f64> {
        self.bars().map(|b| Bar::end(&b)).reduce(f64::max)
    }
}
