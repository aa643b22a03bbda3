//! Static event-type and color tables.
//!
//! Each counter category owns a closed enumeration of event codes. An event
//! code resolves to an [`EventDef`] carrying its symbolic name and whether it
//! is a boundary marker (start/end/idle) or a work marker. Symbolic names map
//! to CSS named colors through a separate table.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TraceError;

/// The kind of hardware unit a counter instruments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CounterCategory {
    System,
    SchedulingUnit,
    MemoryUnit,
    ComputeUnit,
}

impl CounterCategory {
    pub const ALL: [Self; 4] = [
        Self::System,
        Self::SchedulingUnit,
        Self::MemoryUnit,
        Self::ComputeUnit,
    ];

    /// Decode the integer written in the trace's `"counter type"` field.
    pub fn from_code(code: i64) -> Result<Self, TraceError> {
        match code {
            0 => Ok(Self::System),
            1 => Ok(Self::SchedulingUnit),
            2 => Ok(Self::MemoryUnit),
            3 => Ok(Self::ComputeUnit),
            _ => Err(TraceError::UnknownCategory(code)),
        }
    }

    pub fn code(self) -> i64 {
        match self {
            Self::System => 0,
            Self::SchedulingUnit => 1,
            Self::MemoryUnit => 2,
            Self::ComputeUnit => 3,
        }
    }

    /// Symbolic name of the category, also a key in the color table.
    pub fn name(self) -> &'static str {
        match self {
            Self::System => "SYS_TIMER",
            Self::SchedulingUnit => "SU_TIMER",
            Self::MemoryUnit => "MEM_TIMER",
            Self::ComputeUnit => "CU_TIMER",
        }
    }

    /// Event definitions, indexed by event code.
    pub fn events(self) -> &'static [EventDef] {
        match self {
            Self::System => &SYS_EVENTS,
            Self::SchedulingUnit => &SU_EVENTS,
            Self::MemoryUnit => &MEM_EVENTS,
            Self::ComputeUnit => &CU_EVENTS,
        }
    }
}

impl fmt::Display for CounterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One entry of a category's event enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventDef {
    pub name: &'static str,
    /// Start, end and idle markers delimit periods that are not work and
    /// never become intervals.
    pub boundary: bool,
}

impl EventDef {
    const fn boundary_marker(name: &'static str) -> Self {
        Self {
            name,
            boundary: true,
        }
    }

    const fn work_marker(name: &'static str) -> Self {
        Self {
            name,
            boundary: false,
        }
    }
}

static SYS_EVENTS: [EventDef; 2] = [
    EventDef::boundary_marker("SYS_START"),
    EventDef::boundary_marker("SYS_END"),
];

static SU_EVENTS: [EventDef; 7] = [
    EventDef::boundary_marker("SU_START"),
    EventDef::boundary_marker("SU_END"),
    EventDef::work_marker("FETCH_DECODE_INSTRUCTION"),
    EventDef::work_marker("DISPATCH_INSTRUCTION"),
    EventDef::work_marker("EXECUTE_CONTROL_INSTRUCTION"),
    EventDef::work_marker("EXECUTE_ARITH_INSTRUCTION"),
    EventDef::boundary_marker("SU_IDLE"),
];

static MEM_EVENTS: [EventDef; 4] = [
    EventDef::boundary_marker("MEM_START"),
    EventDef::boundary_marker("MEM_END"),
    EventDef::work_marker("MEM_EXECUTION"),
    EventDef::boundary_marker("MEM_IDLE"),
];

static CU_EVENTS: [EventDef; 4] = [
    EventDef::boundary_marker("CU_START"),
    EventDef::boundary_marker("CU_END"),
    EventDef::work_marker("CU_EXECUTION"),
    EventDef::boundary_marker("CU_IDLE"),
];

/// Symbolic name → CSS named color.
pub const STANDARD_COLORS: [(&str, &str); 21] = [
    ("SYS_TIMER", "lightslategray"),
    ("SU_TIMER", "peachpuff"),
    ("MEM_TIMER", "midnightblue"),
    ("CU_TIMER", "mediumseagreen"),
    ("SYS_START", "lightgray"),
    ("SYS_END", "yellow"),
    ("SU_START", "thistle"),
    ("SU_END", "firebrick"),
    ("FETCH_DECODE_INSTRUCTION", "mediumblue"),
    ("DISPATCH_INSTRUCTION", "blue"),
    ("EXECUTE_CONTROL_INSTRUCTION", "darkblue"),
    ("EXECUTE_ARITH_INSTRUCTION", "black"),
    ("SU_IDLE", "whitesmoke"),
    ("MEM_START", "silver"),
    ("MEM_END", "teal"),
    ("MEM_EXECUTION", "yellowgreen"),
    ("MEM_IDLE", "palevioletred"),
    ("CU_START", "mediumaquamarine"),
    ("CU_END", "linen"),
    ("CU_EXECUTION", "darkviolet"),
    ("CU_IDLE", "darkslateblue"),
];

/// Read-only lookup over the event enumerations and a color table.
///
/// The event enumerations are fixed per category. The color table is
/// swappable so that a misconfigured palette can be exercised in tests.
#[derive(Debug, Clone, Copy)]
pub struct EventTypeRegistry {
    colors: &'static [(&'static str, &'static str)],
}

impl EventTypeRegistry {
    pub const STANDARD: Self = Self {
        colors: &STANDARD_COLORS,
    };

    pub const fn with_colors(colors: &'static [(&'static str, &'static str)]) -> Self {
        Self { colors }
    }

    /// Look up the definition of `type_id` within `category`.
    pub fn resolve(
        &self,
        category: CounterCategory,
        type_id: i64,
    ) -> Result<&'static EventDef, TraceError> {
        usize::try_from(type_id)
            .ok()
            .and_then(|idx| category.events().get(idx))
            .ok_or(TraceError::UnknownEvent { category, type_id })
    }

    /// CSS color configured for a symbolic event (or category) name.
    pub fn color_of(&self, name: &str) -> Result<&'static str, TraceError> {
        self.colors
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, color)| *color)
            .ok_or_else(|| TraceError::UnknownColor(name.to_string()))
    }
}

impl Default for EventTypeRegistry {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_scheduling_unit_codes() {
        let registry = EventTypeRegistry::STANDARD;
        let def = registry
            .resolve(CounterCategory::SchedulingUnit, 2)
            .unwrap();
        assert_eq!(def.name, "FETCH_DECODE_INSTRUCTION");
        assert!(!def.boundary);

        let idle = registry
            .resolve(CounterCategory::SchedulingUnit, 6)
            .unwrap();
        assert_eq!(idle.name, "SU_IDLE");
        assert!(idle.boundary);
    }

    #[test]
    fn out_of_range_code_is_an_error() {
        let registry = EventTypeRegistry::STANDARD;
        assert_eq!(
            registry.resolve(CounterCategory::MemoryUnit, 4),
            Err(TraceError::UnknownEvent {
                category: CounterCategory::MemoryUnit,
                type_id: 4,
            })
        );
        assert!(registry.resolve(CounterCategory::System, -1).is_err());
        // Valid for SU, not for SYS.
        assert!(registry.resolve(CounterCategory::System, 2).is_err());
    }

    #[test]
    fn every_resolvable_name_has_a_color() {
        let registry = EventTypeRegistry::STANDARD;
        for category in CounterCategory::ALL {
            assert!(registry.color_of(category.name()).is_ok(), "{category}");
            for def in category.events() {
                assert!(registry.color_of(def.name).is_ok(), "{}", def.name);
            }
        }
    }

    #[test]
    fn boundary_flag_matches_name_suffix() {
        for category in CounterCategory::ALL {
            for def in category.events() {
                let by_suffix = def.name.ends_with("IDLE")
                    || def.name.ends_with("START")
                    || def.name.ends_with("END");
                assert_eq!(def.boundary, by_suffix, "{}", def.name);
            }
        }
    }

    #[test]
    fn unknown_color_is_an_error() {
        let registry = EventTypeRegistry::STANDARD;
        assert_eq!(registry.color_of("MEM_EXECUTION"), Ok("yellowgreen"));
        assert_eq!(
            registry.color_of("GPU_EXECUTION"),
            Err(TraceError::UnknownColor("GPU_EXECUTION".into()))
        );
    }

    #[test]
    fn category_codes_round_trip() {
        for category in CounterCategory::ALL {
            assert_eq!(CounterCategory::from_code(category.code()), Ok(category));
        }
        assert_eq!(
            CounterCategory::from_code(7),
            Err(TraceError::UnknownCategory(7))
        );
    }
}
