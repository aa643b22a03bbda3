mod renderer;

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use traceplot_core::parsers::parse_trace_file;
use traceplot_core::svg::render_svg;
use traceplot_core::views::{chart_height, render_chart};
use traceplot_core::{Timeline, build_timeline};
use traceplot_protocol::Viewport;

/// Plot counter traces as a Gantt-style timeline.
#[derive(Debug, Parser)]
#[command(name = "traceplot", version)]
struct Args {
    /// Trace file to plot.
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// Write the timeline as an SVG file instead of opening the viewer.
    #[arg(long, value_name = "PATH", conflicts_with = "export_json")]
    svg: Option<PathBuf>,

    /// SVG width in pixels.
    #[arg(long, default_value_t = 1200.0)]
    width: f64,

    /// Use the dark palette for SVG output.
    #[arg(long)]
    dark: bool,

    /// Print the per-track bar series as JSON on stdout.
    #[arg(long)]
    export_json: bool,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("traceplot: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn run(args: &Args) -> Result<()> {
    let counters = parse_trace_file(&args.input)?;
    // Every track must reconstruct before anything is rendered.
    let timeline = build_timeline(&counters)
        .with_context(|| format!("cannot plot {}", args.input.display()))?;

    if args.export_json {
        let mut out = io::stdout().lock();
        serde_json::to_writer_pretty(&mut out, &timeline.bar_series())?;
        writeln!(out)?;
        return Ok(());
    }

    let (view_start, view_end) = view_range(&timeline);
    if let Some(path) = &args.svg {
        let series = timeline.bar_series();
        let height = chart_height(series.len());
        let viewport = Viewport::new(args.width, height);
        let commands = render_chart(&series, &viewport, view_start, view_end);
        let svg = render_svg(&commands, args.width, height, args.dark);
        fs::write(path, svg).with_context(|| format!("cannot write {}", path.display()))?;
        info!("wrote {} tracks to {}", series.len(), path.display());
        return Ok(());
    }

    renderer::render_tui(&timeline.bar_series(), view_start, view_end)
}

/// The time window shown initially: from zero (or the earliest interval, if
/// earlier) to the latest interval end.
fn view_range(timeline: &Timeline) -> (f64, f64) {
    let start = timeline.start_time().min(0.0);
    let end = timeline.end_time();
    if end > start {
        (start, end)
    } else {
        (start, start + 1.0)
    }
}
