use traceplot_protocol::{Point, Rect, RenderCommand, TextAlign, ThemeToken};

pub const AXIS_HEIGHT: f64 = 24.0;
const MAJOR_TICK_HEIGHT: f64 = 10.0;
const MINOR_TICK_HEIGHT: f64 = 4.0;
const FONT_SIZE: f64 = 10.0;
const LABEL_Y: f64 = 12.0;
const MIN_MAJOR_SPACING_PX: f64 = 80.0;

/// Render a seconds ruler across `area` with major/minor ticks and labels.
///
/// `view_start` and `view_end` are trace timestamps in seconds. Major ticks
/// also get a vertical gridline extending `grid_height` below the axis.
pub fn render_time_axis(
    area: Rect,
    view_start: f64,
    view_end: f64,
    grid_height: f64,
) -> Vec<RenderCommand> {
    let duration = view_end - view_start;
    if duration <= 0.0 || area.w <= 0.0 {
        return Vec::new();
    }

    let x_scale = area.w / duration;
    let baseline = area.y + AXIS_HEIGHT;
    let mut commands = Vec::with_capacity(64);

    commands.push(RenderCommand::DrawRect {
        rect: Rect::new(area.x, area.y, area.w, AXIS_HEIGHT),
        fill: ThemeToken::LaneHeaderBackground.into(),
        border_color: Some(ThemeToken::LaneBorder),
        label: None,
        hover: None,
    });

    let (major, subdivisions) = nice_interval(duration, area.w);
    let minor = major / f64::from(subdivisions);

    // Step by index rather than accumulating, so ticks stay on exact multiples.
    let first_minor = (view_start / minor).ceil() as i64;
    let last_minor = (view_end / minor).floor() as i64;
    for i in first_minor..=last_minor {
        let t = i as f64 * minor;
        let x = area.x + (t - view_start) * x_scale;
        let is_major = i.rem_euclid(i64::from(subdivisions)) == 0;

        if !is_major {
            commands.push(RenderCommand::DrawLine {
                from: Point::new(x, baseline - MINOR_TICK_HEIGHT),
                to: Point::new(x, baseline),
                color: ThemeToken::TextMuted,
                width: 0.5,
            });
            continue;
        }

        commands.push(RenderCommand::DrawLine {
            from: Point::new(x, baseline - MAJOR_TICK_HEIGHT),
            to: Point::new(x, baseline),
            color: ThemeToken::LaneBorder,
            width: 1.0,
        });
        commands.push(RenderCommand::DrawText {
            position: Point::new(x + 3.0, area.y + LABEL_Y),
            text: format_seconds(t, major),
            color: ThemeToken::TextPrimary.into(),
            font_size: FONT_SIZE,
            align: TextAlign::Left,
        });
        if grid_height > 0.0 {
            commands.push(RenderCommand::DrawLine {
                from: Point::new(x, baseline),
                to: Point::new(x, baseline + grid_height),
                color: ThemeToken::LaneBorder,
                width: 0.5,
            });
        }
    }

    commands
}

/// Pick a 1-2-5 major tick interval (in seconds) giving roughly one tick per
/// `MIN_MAJOR_SPACING_PX`. Returns `(major_interval, subdivisions)`.
fn nice_interval(duration: f64, width_px: f64) -> (f64, u32) {
    let target_count = (width_px / MIN_MAJOR_SPACING_PX).max(2.0);
    let raw = duration / target_count;
    let magnitude = 10.0_f64.powf(raw.log10().floor());

    for (step, subdivisions) in [(1.0, 2), (2.0, 2), (5.0, 5), (10.0, 2)] {
        let interval = step * magnitude;
        if interval >= raw {
            return (interval, subdivisions);
        }
    }
    (10.0 * magnitude, 2)
}

/// Format a tick timestamp with just enough decimals for the tick spacing.
fn format_seconds(t: f64, interval: f64) -> String {
    let decimals = (-interval.log10().floor()).max(0.0) as usize;
    let t = if t.abs() < interval * 1e-6 { 0.0 } else { t };
    format!("{t:.decimals$}s")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_interval_selects_reasonable_value() {
        // 1 second across 800px → ~10 major ticks → 100ms interval.
        let (interval, _) = nice_interval(1.0, 800.0);
        assert!((0.05..=0.2).contains(&interval), "interval={interval}");

        let (interval, subdivisions) = nice_interval(40.0, 800.0);
        assert_eq!(interval, 5.0);
        assert_eq!(subdivisions, 5);
    }

    #[test]
    fn renders_ticks_labels_and_gridlines() {
        let area = Rect::new(160.0, 0.0, 800.0, AXIS_HEIGHT);
        let cmds = render_time_axis(area, 0.0, 2.0, 400.0);

        let rects = cmds
            .iter()
            .filter(|c| matches!(c, RenderCommand::DrawRect { .. }))
            .count();
        assert_eq!(rects, 1);

        let labels: Vec<_> = cmds
            .iter()
            .filter_map(|c| match c {
                RenderCommand::DrawText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(labels.first(), Some(&"0.0s"));
        assert!(labels.contains(&"1.0s"));

        let lines = cmds
            .iter()
            .filter(|c| matches!(c, RenderCommand::DrawLine { .. }))
            .count();
        assert!(lines >= 3);
    }

    #[test]
    fn empty_range_renders_nothing() {
        let area = Rect::new(0.0, 0.0, 800.0, AXIS_HEIGHT);
        assert!(render_time_axis(area, 1.0, 1.0, 0.0).is_empty());
    }

    #[test]
    fn format_labels() {
        assert_eq!(format_seconds(1.5, 0.5), "1.5s");
        assert_eq!(format_seconds(2.0, 1.0), "2s");
        assert_eq!(format_seconds(0.025, 0.005), "0.025s");
    }
}
