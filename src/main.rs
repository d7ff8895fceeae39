use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use healthplot::{
    dataset::{load_source, DataSource, NUMERIC_FIELDS},
    render::{frames_json, render_frame_svg, render_page_html},
    ChartConfig, ChartContext,
};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Global health bubble chart: GDP per capita vs life expectancy, by year"
)]
struct Args {
    /// YAML chart config; unset keys keep their defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive HTML page with a year slider and hover tooltips
    Page {
        /// CSV path or http(s) URL
        #[arg(short, long)]
        input: String,
        #[arg(short, long, default_value = "chart.html")]
        out: PathBuf,
        /// Year shown first (defaults to the config's initial_year)
        #[arg(short, long)]
        year: Option<i32>,
    },
    /// Static SVG for a single year
    Frame {
        #[arg(short, long)]
        input: String,
        #[arg(short, long)]
        year: i32,
        #[arg(short, long, default_value = "frame.svg")]
        out: PathBuf,
    },
    /// Every year's points and domains as JSON
    Json {
        #[arg(short, long)]
        input: String,
        #[arg(short, long, default_value = "frames.json")]
        out: PathBuf,
    },
}

fn write_output(path: &Path, contents: &str) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), bytes = contents.len(), "wrote output");
    Ok(())
}

fn open_context(input: &str, config: ChartConfig, year: Option<i32>) -> Result<ChartContext> {
    let source = DataSource::parse(input);
    let data = load_source(&source, NUMERIC_FIELDS)?;
    ChartContext::new(Arc::new(data), config, year)
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    // ─── 2) config ───────────────────────────────────────────────────
    let args = Args::parse();
    let config = match &args.config {
        Some(path) => ChartConfig::from_yaml_file(path)?,
        None => ChartConfig::default(),
    };

    // ─── 3) load + render ────────────────────────────────────────────
    match args.command {
        Command::Page { input, out, year } => {
            let ctx = open_context(&input, config, year)?;
            write_output(&out, &render_page_html(&ctx)?)?;
        }
        Command::Frame { input, year, out } => {
            let ctx = open_context(&input, config, Some(year))?;
            if ctx.frame().is_empty() {
                info!(year, "no plottable rows for year; rendering empty frame");
            }
            write_output(&out, &render_frame_svg(ctx.frame(), ctx.config()))?;
        }
        Command::Json { input, out } => {
            let ctx = open_context(&input, config, None)?;
            write_output(&out, &frames_json(&ctx.all_frames())?)?;
        }
    }

    info!("all done");
    Ok(())
}
