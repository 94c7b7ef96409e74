//! Driver that turns a series file and a road network into per-year frame files.

use anyhow::{Context, Result};
use chronomap::io::{SeriesColumns, read_lines, read_series, series_to_json};
use chronomap::{
    Config, OutOfDomainPolicy, PartialLineMode, RunSummary, Scene, YearRange, geojson,
};
use clap::{Parser, ValueEnum};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Series file: CSV with a header row, or a JSON array of samples
    #[arg(short, long)]
    pub series: PathBuf,

    /// GeoJSON FeatureCollection of lines with start_year/end_year properties
    #[arg(short, long)]
    pub lines: PathBuf,

    /// JSON or TOML run configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub min_year: Option<i32>,

    #[arg(long)]
    pub max_year: Option<i32>,

    #[arg(long, value_enum)]
    pub partial_mode: Option<PartialMode>,

    /// Refuse years outside the sampled series instead of clamping
    #[arg(long)]
    pub strict: bool,

    #[arg(long, default_value = "year")]
    pub year_column: String,

    #[arg(long, default_value = "population")]
    pub value_column: String,

    #[arg(short, long, default_value = "outputs/frames")]
    pub out_dir: PathBuf,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PartialMode {
    Chord,
    Trace,
}

impl From<PartialMode> for PartialLineMode {
    fn from(mode: PartialMode) -> Self {
        match mode {
            PartialMode::Chord => PartialLineMode::Chord,
            PartialMode::Trace => PartialLineMode::Trace,
        }
    }
}

/// Configuration file settings with command-line overrides applied.
pub fn resolve_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };

    if args.min_year.is_some() || args.max_year.is_some() {
        let current = config.year_range;
        let range = YearRange::new(
            args.min_year.unwrap_or(current.min()),
            args.max_year.unwrap_or(current.max()),
        )?;
        config = config.with_year_range(range);
    }
    if let Some(mode) = args.partial_mode {
        config = config.with_partial_line(mode.into());
    }
    if args.strict {
        config = config.with_out_of_domain(OutOfDomainPolicy::Fail);
    }

    Ok(config)
}

/// Loads the inputs, writes `series.json` and one `frame_{index}.geojson` per year.
pub fn run(args: &Args) -> Result<RunSummary> {
    let config = resolve_config(args)?;

    let columns = SeriesColumns {
        year: args.year_column.clone(),
        value: args.value_column.clone(),
        ..SeriesColumns::default()
    };
    let input = read_series(&args.series, &columns)
        .with_context(|| format!("loading series {}", args.series.display()))?;
    let lines = read_lines(&args.lines)
        .with_context(|| format!("loading lines {}", args.lines.display()))?;

    let mut builder = Scene::builder()
        .series(input.series)
        .load_report(lines)
        .config(config);
    if let Some(landmark) = input.landmark {
        builder = builder.landmark(landmark);
    }
    let scene = builder.build()?;

    for rejected in scene.rejected() {
        warn!(
            index = rejected.index,
            id = rejected.id.as_deref().unwrap_or("unnamed"),
            "input rejected: {}",
            rejected.error
        );
    }

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    let table = scene.dense_series()?;
    fs::write(args.out_dir.join("series.json"), series_to_json(&table)?)?;

    let range = scene.year_range();
    let frames = scene.frames()?;
    for frame in &frames {
        let index = (frame.year - range.min()) as usize;
        let path = args.out_dir.join(format!("frame_{}.geojson", index));
        fs::write(&path, geojson::frame_to_geojson(frame)?)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    let summary = scene.summarize(&frames);
    if summary.is_complete() {
        info!(frames = summary.frames, "all frames complete");
    } else {
        warn!(
            frames = summary.frames,
            frames_with_failures = summary.frames_with_failures,
            entity_failures = summary.entity_failures,
            rejected_inputs = summary.rejected_inputs,
            "some line entities could not be drawn"
        );
    }

    Ok(summary)
}
