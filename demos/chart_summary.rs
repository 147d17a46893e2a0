//! Chart summary
//!
//! Builds the timeline of a chart file and prints what a renderer would draw: the extent, beat lines,
//! highlighted speed regions, coincident notes and subdivisions. Errors are shown with their location
//! in the chart text.
//!
//! ```sh
//! RUST_LOG=debug cargo run --example chart_summary -- tests/files/sample_chart.json --mirror
//! ```

use std::path::PathBuf;

use chainbeet::{diagnostics::emit_chart_error, prelude::*};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "chart_summary")]
#[command(about = "Summarize a Chainbeet chart", long_about = None)]
struct Config {
    /// Chart file path
    #[arg(value_name = "FILE")]
    chart_path: PathBuf,

    /// Flip lane positions horizontally
    #[arg(short, long)]
    mirror: bool,

    /// Draw beat lines until this time instead of the chart end
    #[arg(long, value_name = "SECONDS")]
    max_time: Option<f64>,

    /// Scroll distance per second at speed scale 1.0
    #[arg(long, default_value = "300", value_name = "PIXELS")]
    height_factor: f64,

    /// Print subdivisions as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), String> {
    env_logger::init();
    let config = Config::parse();

    let source = std::fs::read_to_string(&config.chart_path)
        .map_err(|e| format!("Failed to read {}: {e}", config.chart_path.display()))?;
    let name = config.chart_path.display().to_string();
    let options = ParseOptions::default().with_mirror(config.mirror);
    let timeline = match parse_chart(&source, options) {
        Ok(timeline) => timeline,
        Err(err) => {
            emit_chart_error(&name, &source, &err);
            return Err(format!("Failed to build {name}"));
        }
    };

    let scroll = ScrollConfig {
        height_factor: config.height_factor,
        ..ScrollConfig::default()
    };
    let calc = YCalculator::new(&timeline, scroll);
    let end = chart_end_time(&timeline).unwrap_or_default();

    println!("Chart: {name}");
    println!(
        "Base tempo: {} BPM, assets in {:?}, delay {}",
        timeline.base_tempo(),
        timeline.asset_directory(),
        timeline.start_delay()
    );
    println!(
        "Notes: {} ({} visual), length {}, height {:.1}",
        timeline.notes().len(),
        timeline.visual_notes().count(),
        TimeLabel(end),
        calc.get_y(end).as_f64()
    );
    println!();

    println!("Tempo changes:");
    for (note, tempo) in timeline.tempo_changes() {
        println!("  {} {} -> {tempo}", TimeLabel(note.time()), note.tempo());
    }

    let lines = beat_lines(&timeline, config.max_time);
    println!("Beat lines: {}", lines.len());
    for time in lines.iter().take(16) {
        println!("  {} at y {:.1}", TimeLabel(*time), calc.get_y(*time).as_f64());
    }

    println!("Speed regions:");
    for region in speed_regions(&timeline, calc.config(), end) {
        println!(
            "  {} - {} x{} (written x{})",
            TimeLabel(region.start),
            TimeLabel(region.end),
            region.scale,
            region.raw_scale
        );
    }

    println!("Coincident notes:");
    for group in coincident_groups(&timeline) {
        let (left, right) = group.span();
        println!(
            "  {} {} notes from {left:.2} to {right:.2}, combo {}",
            TimeLabel(group.time),
            group.notes.len(),
            combo_before(&timeline, group.time)
        );
    }

    let found = subdivisions(&timeline);
    if config.json {
        let json = serde_json::to_string_pretty(&found).map_err(|e| e.to_string())?;
        println!("{json}");
    } else {
        println!("Subdivisions:");
        for subdivision in found {
            println!("  {} 1/{}", TimeLabel(subdivision.time), subdivision.split);
        }
    }

    Ok(())
}
