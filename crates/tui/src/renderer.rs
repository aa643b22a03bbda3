use std::io::stdout;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Paragraph},
};
use traceplot_core::views::timeline::{ROW_HEIGHT, render_timeline, rows_height};
use traceplot_protocol::{BarSeries, Paint, RenderCommand, ThemeToken};

/// Logical pixels per terminal column when laying out render commands.
const CELL_WIDTH: f64 = 8.0;
const LABEL_COLUMNS: u16 = 16;
const ZOOM_STEP: f64 = 1.3;

fn theme_to_color(token: ThemeToken) -> Color {
    match token {
        ThemeToken::Background | ThemeToken::LaneBackground => Color::Black,
        ThemeToken::Border | ThemeToken::LaneBorder => Color::DarkGray,
        ThemeToken::LaneHeaderBackground => Color::DarkGray,
        ThemeToken::LaneHeaderText | ThemeToken::TextPrimary => Color::White,
        ThemeToken::TextMuted | ThemeToken::Placeholder => Color::Gray,
        ThemeToken::SelectionHighlight => Color::LightYellow,
    }
}

/// RGB values for the CSS named colors used by the event palette.
fn css_to_color(name: &str) -> Color {
    match name {
        "lightslategray" => Color::Rgb(119, 136, 153),
        "peachpuff" => Color::Rgb(255, 218, 185),
        "midnightblue" => Color::Rgb(25, 25, 112),
        "mediumseagreen" => Color::Rgb(60, 179, 113),
        "lightgray" => Color::Rgb(211, 211, 211),
        "yellow" => Color::Rgb(255, 255, 0),
        "thistle" => Color::Rgb(216, 191, 216),
        "firebrick" => Color::Rgb(178, 34, 34),
        "mediumblue" => Color::Rgb(0, 0, 205),
        "blue" => Color::Rgb(0, 0, 255),
        "darkblue" => Color::Rgb(0, 0, 139),
        "black" => Color::Rgb(0, 0, 0),
        "whitesmoke" => Color::Rgb(245, 245, 245),
        "silver" => Color::Rgb(192, 192, 192),
        "teal" => Color::Rgb(0, 128, 128),
        "yellowgreen" => Color::Rgb(154, 205, 50),
        "palevioletred" => Color::Rgb(219, 112, 147),
        "mediumaquamarine" => Color::Rgb(102, 205, 170),
        "linen" => Color::Rgb(250, 240, 230),
        "darkviolet" => Color::Rgb(148, 0, 211),
        "darkslateblue" => Color::Rgb(72, 61, 139),
        _ => Color::Gray,
    }
}

fn paint_to_color(paint: &Paint) -> Color {
    match paint {
        Paint::Token(token) => theme_to_color(*token),
        Paint::Named(name) => css_to_color(name),
    }
}

/// Pan/zoom/selection state of the viewer.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ViewState {
    full_start: f64,
    full_end: f64,
    view_start: f64,
    zoom: f64,
    /// Time under the cursor, in seconds.
    cursor: f64,
    selected_row: usize,
    scroll_row: usize,
}

impl ViewState {
    fn new(full_start: f64, full_end: f64) -> Self {
        Self {
            full_start,
            full_end,
            view_start: full_start,
            zoom: 1.0,
            cursor: full_start,
            selected_row: 0,
            scroll_row: 0,
        }
    }

    fn visible_duration(&self) -> f64 {
        (self.full_end - self.full_start) / self.zoom
    }

    fn view_end(&self) -> f64 {
        self.view_start + self.visible_duration()
    }

    fn pan(&mut self, fraction: f64) {
        let max_start = self.full_end - self.visible_duration();
        self.view_start = (self.view_start + self.visible_duration() * fraction)
            .clamp(self.full_start, max_start.max(self.full_start));
        self.cursor = self.cursor.clamp(self.view_start, self.view_end());
    }

    fn zoom_by(&mut self, factor: f64) {
        let anchor = self.cursor;
        self.zoom = (self.zoom * factor).max(1.0);
        self.view_start = anchor - self.visible_duration() / 2.0;
        self.pan(0.0);
    }

    fn move_cursor(&mut self, fraction: f64) {
        self.cursor = (self.cursor + self.visible_duration() * fraction)
            .clamp(self.full_start, self.full_end);
        if self.cursor < self.view_start {
            self.view_start = self.cursor;
        } else if self.cursor > self.view_end() {
            self.view_start = self.cursor - self.visible_duration();
        }
        self.pan(0.0);
    }

    fn select(&mut self, delta: isize, rows: usize, visible_rows: usize) {
        if rows == 0 {
            return;
        }
        self.selected_row = self.selected_row.saturating_add_signed(delta).min(rows - 1);
        if self.selected_row < self.scroll_row {
            self.scroll_row = self.selected_row;
        } else if visible_rows > 0 && self.selected_row >= self.scroll_row + visible_rows {
            self.scroll_row = self.selected_row + 1 - visible_rows;
        }
    }
}

/// Hover text of the bar on `series` that covers time `t`, if any.
fn hover_at(series: &BarSeries, t: f64) -> Option<&str> {
    series
        .bars()
        .find(|bar| bar.base <= t && t < bar.end())
        .map(|bar| bar.hover)
}

/// Paint render commands onto a terminal buffer region. Rect coordinates are
/// logical pixels: `CELL_WIDTH` per column and `ROW_HEIGHT` per row.
fn draw_commands(buf: &mut Buffer, area: Rect, commands: &[RenderCommand]) {
    for cmd in commands {
        match cmd {
            RenderCommand::DrawRect {
                rect, fill, label, ..
            } => {
                if *fill == Paint::Token(ThemeToken::LaneBackground) {
                    continue;
                }
                let col = (rect.x / CELL_WIDTH) as u16;
                let row = (rect.y / ROW_HEIGHT) as u16;
                if row >= area.height || col >= area.width {
                    continue;
                }

                let width = ((rect.w / CELL_WIDTH).round() as u16).max(1);
                let clamped_width = width.min(area.width - col);
                let y = area.y + row;

                if *fill == Paint::Token(ThemeToken::Placeholder) {
                    buf[(area.x + col, y)]
                        .set_char('·')
                        .set_fg(theme_to_color(ThemeToken::Placeholder));
                    continue;
                }

                let bg = paint_to_color(fill);
                let label = label.as_deref().unwrap_or("");
                let mut chars = label.chars();
                for i in 0..clamped_width {
                    let ch = if clamped_width as usize > label.len() {
                        chars.next().unwrap_or(' ')
                    } else {
                        ' '
                    };
                    buf[(area.x + col + i, y)]
                        .set_char(ch)
                        .set_fg(Color::White)
                        .set_bg(bg);
                }
            }
            RenderCommand::DrawText { position, text, color, .. } => {
                let row = (position.y / ROW_HEIGHT) as u16;
                if row >= area.height {
                    continue;
                }
                let max = usize::from(LABEL_COLUMNS.saturating_sub(1).min(area.width));
                let shown: String = text.chars().take(max).collect();
                buf.set_string(
                    area.x,
                    area.y + row,
                    shown,
                    Style::default().fg(paint_to_color(color)),
                );
            }
            _ => {}
        }
    }
}

pub fn render_tui(series: &[BarSeries], full_start: f64, full_end: f64) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, series, full_start, full_end);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    series: &[BarSeries],
    full_start: f64,
    full_end: f64,
) -> Result<()> {
    let mut state = ViewState::new(full_start, full_end);

    loop {
        let term_size = terminal.size()?;
        // Header and footer take one line each.
        let visible_rows = usize::from(term_size.height.saturating_sub(2));
        let first = state.scroll_row.min(series.len());
        let visible = &series[first..(first + visible_rows).min(series.len())];

        let logical = traceplot_protocol::Rect::new(
            0.0,
            0.0,
            f64::from(term_size.width) * CELL_WIDTH,
            rows_height(visible.len()),
        );
        let gutter = f64::from(LABEL_COLUMNS) * CELL_WIDTH;
        let cmds = render_timeline(visible, logical, gutter, state.view_start, state.view_end());

        let footer_text = match series.get(state.selected_row) {
            Some(track) => format!(
                " {} @ {:.6}s  {}",
                track.track,
                state.cursor,
                hover_at(track, state.cursor).unwrap_or("-")
            ),
            None => " no tracks".to_string(),
        };

        terminal.draw(|frame| {
            let area = frame.area();

            let header_area = Rect::new(0, 0, area.width, 1);
            let header = Block::default()
                .title(format!(
                    " traceplot — {} tracks | {:.6}s – {:.6}s | ←→ pan  [ ] cursor  ↑↓ track  +/- zoom  q quit ",
                    series.len(),
                    state.view_start,
                    state.view_end()
                ))
                .style(Style::default().fg(Color::White).bg(Color::DarkGray));
            frame.render_widget(header, header_area);

            let content_area = Rect::new(0, 1, area.width, area.height.saturating_sub(2));
            frame.render_widget(
                Block::default().style(Style::default().bg(Color::Black)),
                content_area,
            );
            draw_commands(frame.buffer_mut(), content_area, &cmds);

            // Highlight the selected row label and the cursor column.
            let buf = frame.buffer_mut();
            if let Some(offset) = state.selected_row.checked_sub(state.scroll_row)
                && offset < visible_rows
                && let Ok(row) = u16::try_from(offset)
                && row < content_area.height
            {
                let highlight = theme_to_color(ThemeToken::SelectionHighlight);
                for x in 0..LABEL_COLUMNS.min(content_area.width) {
                    buf[(content_area.x + x, content_area.y + row)].set_fg(highlight);
                }
            }
            let plot_cols = f64::from(content_area.width.saturating_sub(LABEL_COLUMNS));
            let cursor_frac = (state.cursor - state.view_start) / state.visible_duration();
            if (0.0..=1.0).contains(&cursor_frac) {
                let col = LABEL_COLUMNS + (cursor_frac * plot_cols) as u16;
                if col < content_area.width {
                    for y in 0..content_area.height {
                        buf[(content_area.x + col, content_area.y + y)].set_char('│');
                    }
                }
            }

            let footer_area = Rect::new(0, area.height.saturating_sub(1), area.width, 1);
            frame.render_widget(
                Paragraph::new(footer_text.as_str())
                    .style(Style::default().fg(Color::White).bg(Color::DarkGray)),
                footer_area,
            );
        })?;

        if event::poll(std::time::Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Left => state.pan(-0.1),
                    KeyCode::Right => state.pan(0.1),
                    KeyCode::Char('[') => state.move_cursor(-0.02),
                    KeyCode::Char(']') => state.move_cursor(0.02),
                    KeyCode::Up => state.select(-1, series.len(), visible_rows),
                    KeyCode::Down => state.select(1, series.len(), visible_rows),
                    KeyCode::Char('+') | KeyCode::Char('=') => state.zoom_by(ZOOM_STEP),
                    KeyCode::Char('-') => state.zoom_by(1.0 / ZOOM_STEP),
                    _ => {}
                },
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollDown => state.select(1, series.len(), visible_rows),
                    MouseEventKind::ScrollUp => state.select(-1, series.len(), visible_rows),
                    MouseEventKind::ScrollLeft => state.pan(-0.05),
                    MouseEventKind::ScrollRight => state.pan(0.05),
                    _ => {}
                },
                _ => {}
            }
        }
    }

    Ok(())
}
