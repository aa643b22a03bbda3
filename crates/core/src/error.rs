use thiserror::Error;

use crate::registry::CounterCategory;

/// Errors raised while turning counters into rendered tracks.
///
/// Every variant is fatal to a run: nothing is rendered once one occurs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TraceError {
    #[error("unknown counter category code {0}")]
    UnknownCategory(i64),
    #[error("event type {type_id} is not defined for {category} counters")]
    UnknownEvent {
        category: CounterCategory,
        type_id: i64,
    },
    #[error("no color configured for event {0}")]
    UnknownColor(String),
    #[error(
        "counter {counter:?}: event {index} at {timestamp} s precedes the previous event at {previous} s"
    )]
    NonMonotonicTimestamp {
        counter: String,
        index: usize,
        previous: f64,
        timestamp: f64,
    },
    #[error("counter {counter:?}: event {index} has a non-finite timestamp")]
    NonFiniteTimestamp { counter: String, index: usize },
    #[error("track {0:?} registered twice")]
    DuplicateTrack(String),
    #[error("track {0:?} was never registered")]
    UnknownTrack(String),
}
