use indexmap::IndexMap;
use log::info;
use serde::Deserialize;
use thiserror::Error;

use crate::error::TraceError;
use crate::model::{Counter, Event};
use crate::registry::CounterCategory;

#[derive(Debug, Error)]
pub enum TraceParseError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("track {track:?}: {field} {value:?} is not an integer")]
    InvalidCode {
        track: String,
        field: &'static str,
        value: String,
    },
    #[error("track {track:?}: {source}")]
    Counter {
        track: String,
        #[source]
        source: TraceError,
    },
}

/// Counter trace export: a JSON object mapping each track name to its
/// counter category and chronologically ordered events.
///
/// ```json
/// { "SU_0": { "counter type": "1",
///             "events": [ { "type": "0", "value": 0.0 }, ... ] } }
/// ```
///
/// Object key order is significant: it becomes track registration order.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct TraceExport {
    counters: IndexMap<String, RawCounter>,
}

#[derive(Debug, Deserialize)]
struct RawCounter {
    #[serde(rename = "counter type")]
    counter_type: Code,
    #[serde(default)]
    events: Vec<RawEvent>,
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    #[serde(rename = "type")]
    event_type: Code,
    value: f64,
}

/// Codes are written as JSON integers, integral floats (`1.0`) or numeric
/// strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Code {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Code {
    fn to_i64(&self) -> Option<i64> {
        match self {
            Code::Int(v) => Some(*v),
            Code::Float(v) => integral(*v),
            Code::Text(s) => s.trim().parse().ok(),
        }
    }

    fn describe(&self) -> String {
        match self {
            Code::Int(v) => v.to_string(),
            Code::Float(v) => format!("{v:?}"),
            Code::Text(s) => s.clone(),
        }
    }
}

fn integral(v: f64) -> Option<i64> {
    let in_range = v >= i64::MIN as f64 && v < i64::MAX as f64;
    (v.fract() == 0.0 && in_range).then_some(v as i64)
}

/// Parse a counter trace export into counters, in file order.
///
/// Only the shape of the document is checked here. Event codes are
/// validated against their category during reconstruction.
pub fn parse_trace(data: &[u8]) -> Result<Vec<Counter>, TraceParseError> {
    let export: TraceExport = serde_json::from_slice(data)?;

    let mut counters = Vec::with_capacity(export.counters.len());
    for (track, raw) in export.counters {
        let code = raw
            .counter_type
            .to_i64()
            .ok_or_else(|| TraceParseError::InvalidCode {
                track: track.clone(),
                field: "counter type",
                value: raw.counter_type.describe(),
            })?;
        let category = CounterCategory::from_code(code).map_err(|source| {
            TraceParseError::Counter {
                track: track.clone(),
                source,
            }
        })?;

        let mut events = Vec::with_capacity(raw.events.len());
        for event in &raw.events {
            let type_id = event
                .event_type
                .to_i64()
                .ok_or_else(|| TraceParseError::InvalidCode {
                    track: track.clone(),
                    field: "event type",
                    value: event.event_type.describe(),
                })?;
            events.push(Event::new(event.value, type_id));
        }

        counters.push(Counter {
            name: track,
            category,
            events,
        });
    }

    info!(
        "parsed {} counters, {} events",
        counters.len(),
        counters.iter().map(|c| c.events.len()).sum::<usize>()
    );
    Ok(counters)
}
