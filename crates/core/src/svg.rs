//! SVG renderer: converts `RenderCommand` lists into standalone SVG strings.
//!
//! Hover strings become `<title>` children, which browsers show as tooltips,
//! so the output is a self-contained interactive timeline.

use std::fmt::Write as _;

use traceplot_protocol::{Paint, RenderCommand, TextAlign, ThemeToken};

/// Render a list of commands as an SVG document string.
///
/// `width` and `height` define the SVG viewBox dimensions.
/// `dark` selects the color palette for theme tokens; named colors from the
/// trace are emitted as-is.
pub fn render_svg(commands: &[RenderCommand], width: f64, height: f64, dark: bool) -> String {
    let mut svg = String::with_capacity(commands.len() * 160);
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}" style="font-family:system-ui,-apple-system,sans-serif;font-size:11px">"#,
    );

    let bg = resolve_token(ThemeToken::Background, dark);
    let _ = write!(svg, r#"<rect width="{width}" height="{height}" fill="{bg}"/>"#);

    for cmd in commands {
        match cmd {
            RenderCommand::DrawRect {
                rect,
                fill,
                border_color,
                label,
                hover,
            } => {
                let fill_css = resolve_paint(fill, dark);
                let _ = write!(
                    svg,
                    r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{fill_css}""#,
                    rect.x, rect.y, rect.w, rect.h,
                );
                if let Some(border) = border_color {
                    let stroke = resolve_token(*border, dark);
                    let _ = write!(svg, r#" stroke="{stroke}" stroke-width="0.5""#);
                }
                svg.push('>');
                if let Some(hover) = hover {
                    let _ = write!(svg, "<title>{}</title>", escape_xml(hover));
                }
                svg.push_str("</rect>");

                // Inline label when the bar is wide enough to hold some of it
                if let Some(label) = label
                    && rect.w > 30.0
                {
                    let text_color = label_color(fill, dark);
                    let tx = rect.x + 3.0;
                    let ty = rect.y + rect.h * 0.75;
                    let max_chars = (rect.w / 7.0) as usize;
                    let text = if label.chars().count() > max_chars && max_chars > 2 {
                        let truncated: String = label.chars().take(max_chars - 1).collect();
                        format!("{truncated}…")
                    } else {
                        label.clone()
                    };
                    let _ = write!(
                        svg,
                        r#"<text x="{tx}" y="{ty}" fill="{text_color}" style="pointer-events:none">{}</text>"#,
                        escape_xml(&text),
                    );
                }
            }
            RenderCommand::DrawLine {
                from,
                to,
                color,
                width: line_width,
            } => {
                let stroke = resolve_token(*color, dark);
                let _ = write!(
                    svg,
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{stroke}" stroke-width="{line_width}"/>"#,
                    from.x, from.y, to.x, to.y,
                );
            }
            RenderCommand::DrawText {
                text,
                position,
                color,
                font_size,
                align,
            } => {
                let fill = resolve_paint(color, dark);
                let anchor = match align {
                    TextAlign::Left => "start",
                    TextAlign::Center => "middle",
                    TextAlign::Right => "end",
                };
                let _ = write!(
                    svg,
                    r#"<text x="{}" y="{}" fill="{fill}" font-size="{font_size}" text-anchor="{anchor}">{}</text>"#,
                    position.x,
                    position.y,
                    escape_xml(text),
                );
            }
            RenderCommand::BeginGroup { id, .. } => {
                let _ = write!(svg, r#"<g id="{}">"#, escape_xml(id));
            }
            RenderCommand::EndGroup => svg.push_str("</g>"),
        }
    }

    svg.push_str("</svg>");
    svg
}

fn resolve_paint(paint: &Paint, dark: bool) -> String {
    match paint {
        Paint::Token(token) => resolve_token(*token, dark).to_string(),
        Paint::Named(name) => escape_xml(name),
    }
}

/// Dark fills get light text and vice versa. Only the trace colors that are
/// too dark for black text are listed.
fn label_color(fill: &Paint, dark: bool) -> &'static str {
    match fill {
        Paint::Named(name)
            if matches!(
                name.as_str(),
                "black"
                    | "blue"
                    | "darkblue"
                    | "mediumblue"
                    | "midnightblue"
                    | "darkviolet"
                    | "darkslateblue"
                    | "firebrick"
                    | "teal"
            ) =>
        {
            "#ffffff"
        }
        Paint::Named(_) => "#1a1a2e",
        Paint::Token(_) => resolve_token(ThemeToken::TextPrimary, dark),
    }
}

fn resolve_token(token: ThemeToken, dark: bool) -> &'static str {
    if dark {
        match token {
            ThemeToken::Background => "#1a1a2e",
            ThemeToken::Border | ThemeToken::LaneBorder => "#303030",
            ThemeToken::LaneBackground => "#181818",
            ThemeToken::LaneHeaderBackground => "#242424",
            ThemeToken::TextPrimary | ThemeToken::LaneHeaderText => "#ececec",
            ThemeToken::TextMuted => "#9e9e9e",
            ThemeToken::Placeholder => "#616161",
            ThemeToken::SelectionHighlight => "#448aff",
        }
    } else {
        match token {
            ThemeToken::Background => "#ffffff",
            ThemeToken::Border | ThemeToken::LaneBorder => "#dee2e6",
            ThemeToken::LaneBackground => "#f8f9fa",
            ThemeToken::LaneHeaderBackground => "#eef0f2",
            ThemeToken::TextPrimary | ThemeToken::LaneHeaderText => "#1a1a2e",
            ThemeToken::TextMuted => "#666677",
            ThemeToken::Placeholder => "#999999",
            ThemeToken::SelectionHighlight => "#ffd60a",
        }
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use traceplot_protocol::Rect;

    fn bar(label: &str, hover: &str) -> RenderCommand {
        RenderCommand::DrawRect {
            rect: Rect::new(10.0, 20.0, 100.0, 16.0),
            fill: Paint::Named("mediumblue".into()),
            border_color: None,
            label: Some(label.into()),
            hover: Some(hover.into()),
        }
    }

    #[test]
    fn basic_svg_output() {
        let commands = vec![
            RenderCommand::BeginGroup {
                id: "track-SU_0".into(),
                label: Some("SU_0".into()),
            },
            bar("FETCH", "FETCH_DECODE_INSTRUCTION [0.5 s]"),
            RenderCommand::EndGroup,
        ];
        let svg = render_svg(&commands, 800.0, 400.0, true);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(r#"fill="mediumblue""#));
        assert!(svg.contains("<title>FETCH_DECODE_INSTRUCTION [0.5 s]</title>"));
        assert!(svg.contains(r#"<g id="track-SU_0">"#));
        assert!(svg.contains("#1a1a2e"));
    }

    #[test]
    fn escapes_xml_entities() {
        let commands = vec![bar("a<b>", "x & y")];
        let svg = render_svg(&commands, 400.0, 100.0, false);
        assert!(svg.contains("a&lt;b&gt;"));
        assert!(svg.contains("<title>x &amp; y</title>"));
    }

    #[test]
    fn narrow_bars_have_no_inline_text() {
        let commands = vec![RenderCommand::DrawRect {
            rect: Rect::new(0.0, 0.0, 10.0, 16.0),
            fill: Paint::Named("blue".into()),
            border_color: None,
            label: Some("DISPATCH_INSTRUCTION".into()),
            hover: Some("DISPATCH_INSTRUCTION [0.1 s]".into()),
        }];
        let svg = render_svg(&commands, 100.0, 20.0, false);
        assert!(!svg.contains("<text"));
        assert!(svg.contains("<title>"));
    }
}
