//! Export a route file as CSV, KML, GPX or GML.
//!
//! Usage:
//!   cargo run -p route-cli --bin route_export -- route.json --format gpx --output kiel.gpx

use anyhow::{Context, Result};
use clap::Parser;
use route_cli::{export_input, init_tracing, input::RouteInput};
use route_core::{CoordStyle, ExportFormat, TableLabels};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Export a nautical route to CSV/KML/GPX/GML")]
struct Args {
    /// Route file (JSON with `points` as [lon, lat] and optional `descriptions`)
    input: PathBuf,

    /// Output format: csv, kml, gpx or gml
    #[arg(long, default_value = "csv")]
    format: ExportFormat,

    /// Trip name, used as document name and file stem
    #[arg(long)]
    name: Option<String>,

    /// Output file; defaults to `<name>.<ext>` in the current directory, `-` for stdout
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Write coordinates as degrees/minutes instead of decimal degrees
    #[arg(long)]
    dms: bool,

    /// Column label language (en, de)
    #[arg(long, default_value = "en")]
    lang: String,
}

fn main() -> Result<()> {
    init_tracing()?;
    let args = Args::parse();

    let input = RouteInput::load(&args.input)?;
    let style = if args.dms { CoordStyle::Dms } else { CoordStyle::Decimal };
    let labels = TableLabels::for_language(&args.lang);

    let file = export_input(&input, args.format, args.name.as_deref(), style, &labels);

    let target = args.output.unwrap_or_else(|| PathBuf::from(&file.filename));
    if target.as_os_str() == "-" {
        print!("{}", file.content);
        return Ok(());
    }

    std::fs::write(&target, &file.content)
        .with_context(|| format!("Failed to write {}", target.display()))?;
    println!(
        "Wrote {} ({}, {} points, {} bytes)",
        target.display(),
        file.mimetype,
        input.points.len(),
        file.content.len()
    );
    Ok(())
}
