use log::{debug, trace};

use crate::error::TraceError;
use crate::model::{Counter, Interval};
use crate::registry::EventTypeRegistry;

/// Turn one counter's event sequence into work intervals.
///
/// Events are transition points. Each adjacent pair `(prev, next)` spans
/// `prev.timestamp .. next.timestamp`. The span becomes an interval labeled
/// with `prev`'s symbolic name unless `prev` is a boundary marker. The last
/// event never opens an interval.
///
/// The whole counter is validated before anything is emitted: every event
/// code must resolve in the counter's category, and timestamps must be
/// finite and non-decreasing.
pub fn reconstruct(
    counter: &Counter,
    registry: &EventTypeRegistry,
) -> Result<Vec<Interval>, TraceError> {
    validate(counter, registry)?;

    let mut intervals = Vec::with_capacity(counter.events.len().saturating_sub(1));
    for pair in counter.events.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        let def = registry.resolve(counter.category, prev.type_id)?;
        if def.boundary {
            trace!(
                "{}: skipping {} at {} s",
                counter.name, def.name, prev.timestamp
            );
            continue;
        }

        intervals.push(Interval {
            track: counter.name.clone(),
            start: prev.timestamp,
            duration: next.timestamp - prev.timestamp,
            label: def.name.to_string(),
            color: registry.color_of(def.name)?.to_string(),
        });
    }

    debug!(
        "{} ({}): {} events -> {} intervals",
        counter.name,
        counter.category,
        counter.events.len(),
        intervals.len()
    );
    Ok(intervals)
}

fn validate(counter: &Counter, registry: &EventTypeRegistry) -> Result<(), TraceError> {
    let mut previous: Option<f64> = None;
    for (index, event) in counter.events.iter().enumerate() {
        registry.resolve(counter.category, event.type_id)?;

        if !event.timestamp.is_finite() {
            return Err(TraceError::NonFiniteTimestamp {
                counter: counter.name.clone(),
                index,
            });
        }
        if let Some(prev) = previous
            && event.timestamp < prev
        {
            return Err(TraceError::NonMonotonicTimestamp {
                counter: counter.name.clone(),
                index,
                previous: prev,
                timestamp: event.timestamp,
            });
        }
        previous = Some(event.timestamp);
    }
    Ok(())
}
