pub mod time_axis;
pub mod timeline;

use traceplot_protocol::{BarSeries, Rect, RenderCommand, Viewport};

use time_axis::AXIS_HEIGHT;

/// Width of the track-name column to the left of the plot.
pub const LABEL_GUTTER: f64 = 160.0;

/// Total height of a chart with `track_count` rows.
pub fn chart_height(track_count: usize) -> f64 {
    AXIS_HEIGHT + timeline::rows_height(track_count)
}

/// Full chart: a seconds ruler along the top and one row per track below,
/// covering `view_start..view_end` across the plot width. Rows that do not
/// fit in the viewport height are dropped.
pub fn render_chart(
    series: &[BarSeries],
    viewport: &Viewport,
    view_start: f64,
    view_end: f64,
) -> Vec<RenderCommand> {
    let plot_width = (viewport.width - LABEL_GUTTER).max(0.0);
    let rows = Rect::new(
        0.0,
        AXIS_HEIGHT,
        viewport.width,
        timeline::rows_height(series.len()).min((viewport.height - AXIS_HEIGHT).max(0.0)),
    );

    let mut commands =
        timeline::render_timeline(series, rows, LABEL_GUTTER, view_start, view_end);
    commands.extend(time_axis::render_time_axis(
        Rect::new(LABEL_GUTTER, 0.0, plot_width, AXIS_HEIGHT),
        view_start,
        view_end,
        rows.h,
    ));
    commands
}
