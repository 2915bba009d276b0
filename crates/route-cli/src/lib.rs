//! Shared helpers for the route CLI tools.

pub mod input;

use input::RouteInput;
use route_core::{export_route, CoordStyle, ExportContext, ExportFile, ExportFormat, HemisphereFormatter, LonLat, TableLabels};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Log to stderr so exports written to stdout stay clean.
pub fn init_tracing() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("route_cli=info".parse()?))
        .init();
    Ok(())
}

/// Export a route file. `trip_name` overrides the name stored in the file.
pub fn export_input(
    input: &RouteInput,
    format: ExportFormat,
    trip_name: Option<&str>,
    coord_style: CoordStyle,
    labels: &TableLabels,
) -> ExportFile {
    let ctx = ExportContext {
        projection: &LonLat,
        formatter: &HemisphereFormatter,
        coord_style,
        labels,
    };
    let name = trip_name.or(input.name.as_deref()).unwrap_or("");
    export_route(format, &input.points(), &input.descriptions(), name, &ctx)
}
