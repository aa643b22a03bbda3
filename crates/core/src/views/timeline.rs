use traceplot_protocol::{BarSeries, Paint, Point, Rect, RenderCommand, TextAlign, ThemeToken};

pub const ROW_HEIGHT: f64 = 24.0;
const BAR_INSET: f64 = 4.0;
const LABEL_PADDING: f64 = 6.0;
const FONT_SIZE: f64 = 11.0;

/// Height taken by `track_count` rows.
pub fn rows_height(track_count: usize) -> f64 {
    track_count as f64 * ROW_HEIGHT
}

/// Render one horizontal row per track into `area`.
///
/// The leftmost `gutter` pixels hold the track name; the rest is the plot,
/// mapping `view_start..view_end` (seconds) onto its width. Bars outside the
/// visible window are culled and partially visible bars are clipped to the
/// plot. A placeholder series renders as a zero-width bar at offset zero so
/// the row is still present.
pub fn render_timeline(
    series: &[BarSeries],
    area: Rect,
    gutter: f64,
    view_start: f64,
    view_end: f64,
) -> Vec<RenderCommand> {
    let plot_x = area.x + gutter;
    let plot_w = (area.w - gutter).max(0.0);
    let duration = view_end - view_start;
    let x_scale = if duration > 0.0 { plot_w / duration } else { 0.0 };
    let to_x = |t: f64| plot_x + (t - view_start) * x_scale;

    let bar_count: usize = series.iter().map(BarSeries::len).sum();
    let mut commands = Vec::with_capacity(series.len() * 5 + bar_count);

    for (row, track) in series.iter().enumerate() {
        let y = area.y + row as f64 * ROW_HEIGHT;
        if y >= area.bottom() {
            break;
        }
        let bar_y = y + BAR_INSET;
        let bar_h = ROW_HEIGHT - 2.0 * BAR_INSET;

        commands.push(RenderCommand::BeginGroup {
            id: format!("track-{}", track.track),
            label: Some(track.track.clone()),
        });

        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(area.x, y, area.w, ROW_HEIGHT),
            fill: ThemeToken::LaneBackground.into(),
            border_color: Some(ThemeToken::LaneBorder),
            label: None,
            hover: None,
        });

        commands.push(RenderCommand::DrawText {
            position: Point::new(area.x + LABEL_PADDING, y + ROW_HEIGHT * 0.65),
            text: track.track.clone(),
            color: ThemeToken::LaneHeaderText.into(),
            font_size: FONT_SIZE,
            align: TextAlign::Left,
        });

        if track.placeholder {
            let x = to_x(0.0).clamp(plot_x, plot_x + plot_w);
            commands.push(RenderCommand::DrawRect {
                rect: Rect::new(x, bar_y, 0.0, bar_h),
                fill: ThemeToken::Placeholder.into(),
                border_color: None,
                label: None,
                hover: None,
            });
        }

        for bar in track.bars() {
            let x0 = to_x(bar.base);
            let x1 = to_x(bar.end());
            if x1 < plot_x || x0 > plot_x + plot_w {
                continue;
            }
            let x0 = x0.max(plot_x);
            let x1 = x1.min(plot_x + plot_w);

            commands.push(RenderCommand::DrawRect {
                rect: Rect::new(x0, bar_y, x1 - x0, bar_h),
                fill: bar.color.map_or(
                    Paint::Token(ThemeToken::Placeholder),
                    |c| Paint::Named(c.to_string()),
                ),
                border_color: None,
                label: Some(bar.label.to_string()),
                hover: Some(bar.hover.to_string()),
            });
        }

        commands.push(RenderCommand::EndGroup);
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(track: &str, bars: &[(f64, f64, &str)]) -> BarSeries {
        BarSeries {
            track: track.into(),
            durations: bars.iter().map(|b| b.1).collect(),
            rows: bars.iter().map(|_| track.to_string()).collect(),
            bases: bars.iter().map(|b| b.0).collect(),
            hover: bars
                .iter()
                .map(|b| format!("{} [{:?} s]", b.2, b.1))
                .collect(),
            labels: bars.iter().map(|b| b.2.to_string()).collect(),
            colors: bars.iter().map(|_| Some("blue".to_string())).collect(),
            placeholder: false,
        }
    }

    fn bar_rects(cmds: &[RenderCommand]) -> Vec<(&Rect, &Paint, Option<&str>)> {
        cmds.iter()
            .filter_map(|c| match c {
                RenderCommand::DrawRect {
                    rect, fill, hover, ..
                } if *fill != Paint::Token(ThemeToken::LaneBackground) => {
                    Some((rect, fill, hover.as_deref()))
                }
                _ => None,
            })
            .collect()
    }

    #[test]
    fn one_group_per_track_in_order() {
        let input = vec![
            series("A", &[(0.0, 1.0, "CU_EXECUTION")]),
            BarSeries::placeholder("B"),
        ];
        let area = Rect::new(0.0, 0.0, 1100.0, rows_height(2));
        let cmds = render_timeline(&input, area, 100.0, 0.0, 2.0);

        let groups: Vec<_> = cmds
            .iter()
            .filter_map(|c| match c {
                RenderCommand::BeginGroup { label, .. } => label.as_deref(),
                _ => None,
            })
            .collect();
        assert_eq!(groups, ["A", "B"]);

        let ends = cmds
            .iter()
            .filter(|c| matches!(c, RenderCommand::EndGroup))
            .count();
        assert_eq!(ends, 2);
    }

    #[test]
    fn bars_are_scaled_into_the_plot() {
        let input = vec![series("A", &[(0.5, 0.5, "DISPATCH_INSTRUCTION")])];
        let area = Rect::new(0.0, 0.0, 1100.0, ROW_HEIGHT);
        let cmds = render_timeline(&input, area, 100.0, 0.0, 1.0);

        let bars = bar_rects(&cmds);
        assert_eq!(bars.len(), 1);
        let (rect, fill, hover) = bars[0];
        assert!((rect.x - 600.0).abs() < 1e-9);
        assert!((rect.w - 500.0).abs() < 1e-9);
        assert_eq!(*fill, Paint::Named("blue".into()));
        assert_eq!(hover, Some("DISPATCH_INSTRUCTION [0.5 s]"));
    }

    #[test]
    fn placeholder_row_gets_zero_width_bar() {
        let input = vec![BarSeries::placeholder("idle")];
        let area = Rect::new(0.0, 0.0, 500.0, ROW_HEIGHT);
        let cmds = render_timeline(&input, area, 100.0, 0.0, 4.0);

        let bars = bar_rects(&cmds);
        assert_eq!(bars.len(), 1);
        let (rect, fill, hover) = bars[0];
        assert_eq!(rect.w, 0.0);
        assert_eq!(rect.x, 100.0);
        assert_eq!(*fill, Paint::Token(ThemeToken::Placeholder));
        assert_eq!(hover, None);
    }

    #[test]
    fn culls_and_clips_to_view_window() {
        let input = vec![series(
            "A",
            &[(0.0, 1.0, "early"), (1.5, 1.0, "straddle"), (5.0, 1.0, "late")],
        )];
        let area = Rect::new(0.0, 0.0, 300.0, ROW_HEIGHT);
        let cmds = render_timeline(&input, area, 100.0, 2.0, 4.0);

        let bars = bar_rects(&cmds);
        assert_eq!(bars.len(), 1);
        let (rect, _, hover) = bars[0];
        assert_eq!(rect.x, 100.0);
        assert!((rect.w - 50.0).abs() < 1e-9);
        assert_eq!(hover, Some("straddle [1.0 s]"));
    }
}
