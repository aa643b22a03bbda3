use serde::{Deserialize, Serialize};

use crate::registry::CounterCategory;

/// A single recorded transition point on a counter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Seconds since trace start.
    pub timestamp: f64,
    /// Event code, interpreted against the counter's category.
    pub type_id: i64,
}

impl Event {
    pub fn new(timestamp: f64, type_id: i64) -> Self {
        Self { timestamp, type_id }
    }
}

/// A named source of timestamped events, rendered as one timeline row.
///
/// Events are kept in insertion order, which is also time order. Nothing
/// here re-sorts them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Counter {
    pub name: String,
    pub category: CounterCategory,
    pub events: Vec<Event>,
}

impl Counter {
    pub fn new(name: impl Into<String>, category: CounterCategory) -> Self {
        Self {
            name: name.into(),
            category,
            events: Vec::new(),
        }
    }

    /// Append an event. Builder-style, mostly for tests and fixtures.
    pub fn with_event(mut self, type_id: i64, timestamp: f64) -> Self {
        self.events.push(Event::new(timestamp, type_id));
        self
    }
}
