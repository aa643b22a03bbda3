//! Integration test: parse a multi-unit counter trace, reconstruct every
//! track and check the render-ready output end to end.

use traceplot_core::parsers::{LoadError, parse_trace, parse_trace_file};
use traceplot_core::svg::render_svg;
use traceplot_core::views::{chart_height, render_chart};
use traceplot_core::{CounterCategory, TraceError, build_timeline};
use traceplot_protocol::Viewport;

const TRACE: &[u8] = include_bytes!("fixtures/scmulate-trace.json");

#[test]
fn every_counter_becomes_a_track_in_file_order() {
    let counters = parse_trace(TRACE).expect("fixture should parse");
    assert_eq!(counters.len(), 5);
    assert_eq!(counters[2].category, CounterCategory::MemoryUnit);

    let timeline = build_timeline(&counters).expect("fixture should reconstruct");
    let names: Vec<_> = timeline.tracks.iter().map(|t| t.track.as_str()).collect();
    assert_eq!(names, ["SYS", "SU", "MEM", "CU_0", "CU_1"]);

    // SYS and CU_1 only ever record boundary markers.
    assert!(timeline.tracks[0].intervals.is_empty());
    assert!(timeline.tracks[4].intervals.is_empty());
}

#[test]
fn scheduling_unit_intervals_follow_work_events() {
    let counters = parse_trace(TRACE).unwrap();
    let timeline = build_timeline(&counters).unwrap();
    let su = &timeline.tracks[1];

    let summary: Vec<_> = su
        .intervals
        .iter()
        .map(|iv| (iv.label.as_str(), iv.start, iv.duration))
        .collect();
    assert_eq!(
        summary,
        [
            ("FETCH_DECODE_INSTRUCTION", 0.25, 0.25),
            ("DISPATCH_INSTRUCTION", 0.5, 0.25),
            ("FETCH_DECODE_INSTRUCTION", 1.0, 0.5),
            ("EXECUTE_ARITH_INSTRUCTION", 1.5, 0.5),
            ("EXECUTE_CONTROL_INSTRUCTION", 2.0, 1.5),
        ]
    );
    // 8 events, 7 adjacent pairs, only the 5 opened by work markers remain.
    assert!(su.intervals.len() < counters[1].events.len());
}

#[test]
fn bar_series_match_the_rendering_contract() {
    let counters = parse_trace(TRACE).unwrap();
    let series = build_timeline(&counters).unwrap().bar_series();
    assert_eq!(series.len(), 5);

    for s in &series {
        assert!(s.is_aligned(), "{} lists are not aligned", s.track);
        assert!(s.rows.iter().all(|r| *r == s.track));
    }

    let sys = &series[0];
    assert!(sys.placeholder);
    assert_eq!(sys.durations, [0.0]);
    assert_eq!(sys.bases, [0.0]);

    let mem = &series[2];
    assert!(!mem.placeholder);
    assert_eq!(mem.hover, ["MEM_EXECUTION [0.75 s]"]);
    assert_eq!(mem.colors, [Some("yellowgreen".to_string())]);
}

#[test]
fn renders_complete_svg() {
    let counters = parse_trace(TRACE).unwrap();
    let timeline = build_timeline(&counters).unwrap();
    let series = timeline.bar_series();

    let width = 1200.0;
    let height = chart_height(series.len());
    let viewport = Viewport::new(width, height);
    let commands = render_chart(&series, &viewport, 0.0, timeline.end_time());
    let svg = render_svg(&commands, width, height, false);

    for track in ["SYS", "SU", "MEM", "CU_0", "CU_1"] {
        assert!(svg.contains(&format!(r#"<g id="track-{track}">"#)), "{track}");
    }
    assert!(svg.contains("<title>EXECUTE_CONTROL_INSTRUCTION [1.5 s]</title>"));
    assert!(svg.contains(r#"fill="darkviolet""#));
}

#[test]
fn invalid_event_code_aborts_before_export() {
    let data = include_bytes!("fixtures/bad-event-code.json");
    let counters = parse_trace(data).unwrap();
    let err = build_timeline(&counters).unwrap_err();
    assert_eq!(
        err,
        TraceError::UnknownEvent {
            category: CounterCategory::ComputeUnit,
            type_id: 7,
        }
    );
}

#[test]
fn missing_file_is_a_load_error() {
    let err = parse_trace_file("tests/fixtures/does-not-exist.json").unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}

#[test]
fn fixture_loads_from_disk() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/scmulate-trace.json");
    let counters = parse_trace_file(path).unwrap();
    assert_eq!(counters[0].name, "SYS");
}
