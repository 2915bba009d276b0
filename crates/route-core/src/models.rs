//! Core data models for route editing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A route vertex in projected map units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// True when both axes differ by no more than `tolerance`.
    pub fn approx_eq(&self, other: &Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Unit used when displaying distances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    /// Nautical miles
    #[default]
    Nm,
    /// Kilometers
    Km,
}

impl DistanceUnit {
    pub fn suffix(&self) -> &'static str {
        match self {
            DistanceUnit::Nm => "nm",
            DistanceUnit::Km => "km",
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

impl FromStr for DistanceUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nm" => Ok(DistanceUnit::Nm),
            "km" => Ok(DistanceUnit::Km),
            other => Err(format!("unknown distance unit '{}'", other)),
        }
    }
}

/// How coordinates are written in tables and exports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordStyle {
    /// Decimal degrees
    #[default]
    Decimal,
    /// Degrees, minutes, seconds
    Dms,
}

impl FromStr for CoordStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "decimal" | "dec" => Ok(CoordStyle::Decimal),
            "dms" | "coordformatdms" => Ok(CoordStyle::Dms),
            other => Err(format!("unknown coordinate format '{}'", other)),
        }
    }
}

/// Column captions for the segment table and the CSV header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableLabels {
    pub course: String,
    pub distance: String,
    pub coordinate: String,
    pub description: String,
}

impl TableLabels {
    pub fn english() -> Self {
        Self {
            course: "Course".into(),
            distance: "Distance".into(),
            coordinate: "Coordinate".into(),
            description: "Description".into(),
        }
    }

    pub fn german() -> Self {
        Self {
            course: "Kurs".into(),
            distance: "Distanz".into(),
            coordinate: "Koordinate".into(),
            description: "Beschreibung".into(),
        }
    }

    /// Pick a label set by language code, falling back to English.
    pub fn for_language(lang: &str) -> Self {
        match lang.trim().to_ascii_lowercase().as_str() {
            "de" => Self::german(),
            _ => Self::english(),
        }
    }
}

impl Default for TableLabels {
    fn default() -> Self {
        Self::english()
    }
}
