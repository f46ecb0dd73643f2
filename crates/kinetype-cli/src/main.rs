use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use kinetype_core::{
    AnimatedText, Clock, ManualClock, MonospaceMeasurer, Phase, RenderSink, SystemClock, UnitFrame,
    Vec2,
};
use kinetype_pipeline::load_animated_text;
use kinetype_schema::TextAnimationConfiguration;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the JSON configuration
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Seconds to simulate. Defaults to running until every unit has disappeared.
    #[arg(long)]
    duration: Option<f64>,

    /// Snapshots per second
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Seed for stagger delays, jumps and random colors
    #[arg(long)]
    seed: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum OutputFormat {
    /// One summary line per frame
    Text,
    /// One JSON object per frame (NDJSON)
    Json,
}

/// Upper bound on simulated time when no `--duration` is given.
const MAX_AUTO_DURATION: f64 = 600.0;

#[derive(Serialize)]
struct Snapshot<'a> {
    frame: u64,
    /// Seconds since the text was started.
    time: f64,
    units: &'a [UnitFrame],
}

/// Renders a frame as a single line: visible units as their text, hidden
/// ones as `.`, lines separated by ` | `.
#[derive(Default)]
struct LineSink {
    out: String,
    line: usize,
    counts: [usize; 3],
}

impl RenderSink for LineSink {
    fn begin_frame(&mut self, _size: Vec2) {
        self.out.clear();
        self.line = 0;
        self.counts = [0; 3];
    }

    fn draw_unit(&mut self, frame: &UnitFrame) {
        while self.line < frame.line {
            self.out.push_str(" | ");
            self.line += 1;
        }
        if frame.visible {
            self.out.push_str(&frame.text);
        } else {
            self.out.push('.');
        }
        let slot = match frame.phase {
            Phase::Appearing => 0,
            Phase::Main => 1,
            Phase::Disappearing => 2,
        };
        self.counts[slot] += 1;
    }
}

fn init_logging(level: LogLevel, format: LogFormat) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(level.to_string().parse()?)
        .from_env_lossy();

    let subscriber_builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match format {
        LogFormat::Json => subscriber_builder.json().init(),
        LogFormat::Pretty => subscriber_builder.pretty().init(),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level, cli.log_format)?;

    let config = TextAnimationConfiguration::from_path(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    info!("Config: {:?}", cli.config);

    let fps = cli.fps.max(1);
    let dt = 1.0 / f64::from(fps);
    let start = SystemClock.now();
    let mut clock = ManualClock::new(start);

    let measurer = Arc::new(MonospaceMeasurer::default());
    let mut text = load_animated_text(&config, measurer, cli.seed, clock.now());
    info!(
        "Animating {} units on {} lines at {} fps",
        text.units().len(),
        text.layout().line_count(),
        fps
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut sink = LineSink::default();
    let mut frame = 0u64;

    loop {
        let elapsed = clock.now() - start;
        text.tick(clock.now());
        write_frame(&mut out, &text, &mut sink, cli.format, frame, elapsed)?;

        let done = match cli.duration {
            Some(duration) => elapsed >= duration,
            None => text.is_finished() || elapsed >= MAX_AUTO_DURATION,
        };
        if done {
            break;
        }
        frame += 1;
        clock.set(start + frame as f64 * dt);
    }

    info!("Wrote {} frames", frame + 1);
    Ok(())
}

fn write_frame(
    out: &mut impl Write,
    text: &AnimatedText,
    sink: &mut LineSink,
    format: OutputFormat,
    frame: u64,
    time: f64,
) -> Result<()> {
    match format {
        OutputFormat::Text => {
            text.render(sink);
            let [appearing, main, disappearing] = sink.counts;
            writeln!(
                out,
                "{:05} {:>8.3}s A{:<3} M{:<3} D{:<3} {}",
                frame, time, appearing, main, disappearing, sink.out
            )?;
        }
        OutputFormat::Json => {
            let units = text.frames();
            let snapshot = Snapshot {
                frame,
                time,
                units: &units,
            };
            serde_json::to_writer(&mut *out, &snapshot)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
