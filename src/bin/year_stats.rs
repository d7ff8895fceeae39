use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use healthplot::{
    dataset::{load_source, DataSource, NUMERIC_FIELDS},
    numfmt::tick_label,
    scale::Extent,
    stats::summarize,
    ChartConfig,
};

use prettytable::{format, Cell, Row, Table};

#[derive(Parser)]
#[command(author, version, about = "Per-year row counts and domains of a global health CSV")]
struct Args {
    /// CSV path or http(s) URL
    #[arg(short, long)]
    input: String,
    /// YAML chart config (channel field names)
    #[arg(long)]
    config: Option<std::path::PathBuf>,
}

fn extent_cell(e: &Extent) -> Cell {
    match e {
        Extent::Empty => Cell::new("-"),
        Extent::Range { min, max } => {
            Cell::new(&format!("{} .. {}", tick_label(*min, 2), tick_label(*max, 2)))
        }
    }
}

fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr) // Log to stderr
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(p) => ChartConfig::from_yaml_file(p)?,
        None => ChartConfig::default(),
    };
    config.validate(NUMERIC_FIELDS)?;

    let source = DataSource::parse(&args.input);
    let data = load_source(&source, NUMERIC_FIELDS).context("Failed to load dataset")?;
    let (summaries, undated) = summarize(&data, &config);

    if summaries.is_empty() {
        println!("No rows with a valid Year in {}.", source);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.add_row(Row::new(vec![
        Cell::new("Year").style_spec("bFg"),
        Cell::new("Rows").style_spec("bFg"),
        Cell::new("Plottable").style_spec("bFg"),
        Cell::new(&config.channels.x).style_spec("bFg"),
        Cell::new(&config.channels.y).style_spec("bFg"),
        Cell::new(&config.channels.size).style_spec("bFg"),
        Cell::new(&config.channels.color).style_spec("bFg"),
    ]));

    for s in &summaries {
        table.add_row(Row::new(vec![
            Cell::new(&s.year.to_string()),
            Cell::new(&s.rows.to_string()).style_spec("r"),
            Cell::new(&s.plottable.to_string()).style_spec("r"),
            extent_cell(&s.domains.x),
            extent_cell(&s.domains.y),
            extent_cell(&s.domains.size),
            extent_cell(&s.domains.color),
        ]));
    }

    println!("\n--- Year Statistics: {} ---", source);
    table.printstd();
    if undated > 0 {
        println!("{} row(s) had no valid Year and are never plotted.", undated);
    }

    tracing::info!(years = summaries.len(), "year statistics finished");
    Ok(())
}
