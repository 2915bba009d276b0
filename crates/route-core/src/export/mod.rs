//! Route export to CSV, KML, GPX and GML.
//!
//! Formatters never fail: empty or single-point routes produce degenerate
//! but well-formed text.

pub mod csv;
pub mod gml;
pub mod gpx;
pub mod kml;

use crate::coords::CoordFormatter;
use crate::models::{CoordStyle, Point, TableLabels};
use crate::projection::Projection;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

pub use self::csv::route_csv;
pub use self::gml::route_gml;
pub use self::gpx::route_gpx;
pub use self::kml::route_kml;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExportFormat {
    Csv,
    Kml,
    Gpx,
    Gml,
}

impl ExportFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Kml => "application/vnd.google-earth.kml+xml",
            ExportFormat::Gpx => "application/gpx+xml",
            ExportFormat::Gml => "application/gml+xml",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Kml => "kml",
            ExportFormat::Gpx => "gpx",
            ExportFormat::Gml => "gml",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.extension().to_ascii_uppercase())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "kml" => Ok(ExportFormat::Kml),
            "gpx" => Ok(ExportFormat::Gpx),
            "gml" => Ok(ExportFormat::Gml),
            other => Err(format!("unknown export format '{}'", other)),
        }
    }
}

/// A finished export, shaped like the download form: mime type, file name, body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportFile {
    pub mimetype: String,
    pub filename: String,
    pub content: String,
}

impl ExportFile {
    /// File name is `<trip name>.<ext>`, or `route.<ext>` for a blank name.
    pub fn new(format: ExportFormat, trip_name: &str, content: String) -> Self {
        let stem = match trip_name.trim() {
            "" => "route",
            name => name,
        };
        Self {
            mimetype: format.mime_type().to_string(),
            filename: format!("{}.{}", stem, format.extension()),
            content,
        }
    }
}

/// Collaborators shared by all formatters.
#[derive(Clone, Copy)]
pub struct ExportContext<'a> {
    pub projection: &'a dyn Projection,
    pub formatter: &'a dyn CoordFormatter,
    pub coord_style: CoordStyle,
    pub labels: &'a TableLabels,
}

/// Geometry handed to the KML and GPX writers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum RouteGeometry {
    LineString(Vec<Point>),
    Point(Point),
    Polygon(Vec<Vec<Point>>),
}

/// A map feature with its attribute bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteFeature {
    pub name: Option<String>,
    pub geometry: RouteGeometry,
    /// Per-vertex descriptions, index `i` belongs to vertex `i`
    pub descriptions: Option<Vec<String>>,
    /// Free-text description written by the KML/GPX writers
    pub description: Option<String>,
}

impl RouteFeature {
    pub fn line(points: Vec<Point>) -> Self {
        Self {
            name: None,
            geometry: RouteGeometry::LineString(points),
            descriptions: None,
            description: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.name = if name.trim().is_empty() { None } else { Some(name) };
        self
    }

    pub fn with_descriptions(mut self, descriptions: Vec<String>) -> Self {
        self.descriptions = Some(descriptions);
        self
    }

    /// Fold per-vertex descriptions into `description` as
    /// `Point <n>: <text>` lines. Only open paths are touched.
    pub fn combine_descriptions(&mut self) {
        let RouteGeometry::LineString(points) = &self.geometry else {
            return;
        };
        let descriptions = self.descriptions.as_deref().unwrap_or(&[]);
        let lines: Vec<String> = (0..points.len())
            .map(|i| {
                let text = descriptions.get(i).map(String::as_str).unwrap_or("");
                format!("Point {}: {}", i + 1, text)
            })
            .collect();
        self.description = Some(lines.join("\n"));
    }
}

/// Per-vertex descriptions from the per-segment list.
///
/// Segment `i` describes its arrival vertex `i + 1`; the start vertex has none.
pub fn point_descriptions(segment_descriptions: &[String], point_count: usize) -> Vec<String> {
    (0..point_count)
        .map(|i| match i {
            0 => String::new(),
            _ => segment_descriptions.get(i - 1).cloned().unwrap_or_default(),
        })
        .collect()
}

/// Export `route` with its per-segment descriptions in the chosen format.
pub fn export_route(
    format: ExportFormat,
    route: &[Point],
    segment_descriptions: &[String],
    trip_name: &str,
    ctx: &ExportContext<'_>,
) -> ExportFile {
    let content = match format {
        ExportFormat::Csv => route_csv(route, segment_descriptions, ctx),
        ExportFormat::Kml | ExportFormat::Gpx => {
            let feature = RouteFeature::line(route.to_vec())
                .with_name(trip_name)
                .with_descriptions(point_descriptions(segment_descriptions, route.len()));
            if format == ExportFormat::Kml {
                route_kml(&feature, ctx.projection)
            } else {
                route_gpx(&feature, ctx.projection)
            }
        }
        ExportFormat::Gml => {
            let has_text = segment_descriptions.iter().any(|d| !d.trim().is_empty());
            let descriptions = point_descriptions(segment_descriptions, route.len());
            route_gml(route, has_text.then_some(descriptions.as_slice()), ctx.projection)
        }
    };
    tracing::info!(
        "Exported {} route with {} points ({} bytes)",
        format,
        route.len(),
        content.len()
    );
    ExportFile::new(format, trip_name, content)
}

pub(crate) fn escape_xml(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}
