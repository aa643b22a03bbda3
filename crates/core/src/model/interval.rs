use serde::{Deserialize, Serialize};

/// A labeled, colored work period on a track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub track: String,
    /// Seconds since trace start.
    pub start: f64,
    /// Seconds until the next recorded event on the same counter.
    pub duration: f64,
    /// Symbolic name of the event that opened this interval.
    pub label: String,
    /// CSS named color.
    pub color: String,
}

impl Interval {
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    /// Tooltip text: the label followed by the literal duration in seconds,
    /// e.g. `FETCH_DECODE_INSTRUCTION [0.5 s]`.
    pub fn hover_text(&self) -> String {
        format!("{} [{} s]", self.label, float_repr(self.duration))
    }
}

/// Shortest round-tripping text for `value`, in the notation trace tooling
/// prints: plain decimals with at least one fractional digit, switching to
/// `1.5e-05` / `1e+16` style outside `1e-4..1e16`.
pub fn float_repr(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let scientific = format!("{value:e}");
    let (mantissa, exponent) = scientific
        .split_once('e')
        .and_then(|(m, e)| Some((m, e.parse::<i32>().ok()?)))
        .unwrap_or((scientific.as_str(), 0));

    if value != 0.0 && !(-4..16).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs());
    }

    let plain = value.to_string();
    if plain.contains('.') {
        plain
    } else {
        format!("{plain}.0")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interval(duration: f64) -> Interval {
        Interval {
            track: "SU_0".into(),
            start: 1.5,
            duration,
            label: "DISPATCH_INSTRUCTION".into(),
            color: "blue".into(),
        }
    }

    #[test]
    fn hover_keeps_fractional_part() {
        assert_eq!(interval(0.5).hover_text(), "DISPATCH_INSTRUCTION [0.5 s]");
        assert_eq!(interval(1.0).hover_text(), "DISPATCH_INSTRUCTION [1.0 s]");
    }

    #[test]
    fn tiny_and_huge_durations_use_signed_exponents() {
        assert_eq!(interval(5e-5).hover_text(), "DISPATCH_INSTRUCTION [5e-05 s]");
        assert_eq!(float_repr(1.5e-7), "1.5e-07");
        assert_eq!(float_repr(1e16), "1e+16");
        assert_eq!(float_repr(2.5e100), "2.5e+100");
    }

    #[test]
    fn exponent_switch_points() {
        assert_eq!(float_repr(0.0001), "0.0001");
        assert_eq!(float_repr(0.00009), "9e-05");
        assert_eq!(float_repr(1e15), "1000000000000000.0");
        assert_eq!(float_repr(0.0), "0.0");
        assert_eq!(float_repr(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn end_is_start_plus_duration() {
        assert!((interval(0.25).end() - 1.75).abs() < f64::EPSILON);
    }
}
