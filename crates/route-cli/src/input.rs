//! Route files read by the export tool.
//!
//! ```json
//! { "name": "Kiel to Laboe",
//!   "points": [[10.1394, 54.3233], [10.2, 54.4]],
//!   "descriptions": ["Harbor entrance"] }
//! ```
//!
//! Points are `[lon, lat]` in degrees; `descriptions[i]` belongs to segment `i`.

use anyhow::{bail, Context, Result};
use route_core::Point;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteInput {
    #[serde(default)]
    pub name: Option<String>,
    pub points: Vec<[f64; 2]>,
    #[serde(default)]
    pub descriptions: Vec<String>,
}

impl RouteInput {
    pub fn from_json(text: &str) -> Result<Self> {
        let input: RouteInput = serde_json::from_str(text).context("Invalid route file")?;
        input.validate()?;
        Ok(input)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&text)
    }

    fn validate(&self) -> Result<()> {
        for (i, [lon, lat]) in self.points.iter().enumerate() {
            if !lon.is_finite() || !lat.is_finite() || lat.abs() > 90.0 || lon.abs() > 180.0 {
                bail!("Point {} is not a valid lon/lat pair: [{}, {}]", i + 1, lon, lat);
            }
        }
        if self.descriptions.len() > self.points.len().saturating_sub(1) {
            tracing::warn!(
                "{} descriptions for {} segments; extra entries are ignored",
                self.descriptions.len(),
                self.points.len().saturating_sub(1)
            );
        }
        Ok(())
    }

    /// Points as lon/lat map coordinates.
    pub fn points(&self) -> Vec<Point> {
        self.points.iter().copied().map(Point::from).collect()
    }

    /// One description per segment, padded with blanks.
    pub fn descriptions(&self) -> Vec<String> {
        let mut descriptions = self.descriptions.clone();
        descriptions.resize(self.points.len().saturating_sub(1), String::new());
        descriptions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_points_and_pads_descriptions() {
        let input = RouteInput::from_json(
            r#"{"name":"Kiel","points":[[10.1,54.3],[10.2,54.4],[10.3,54.5]],"descriptions":["Buoy"]}"#,
        )
        .unwrap();
        assert_eq!(input.points()[1], Point::new(10.2, 54.4));
        assert_eq!(input.descriptions(), vec!["Buoy", ""]);
        assert_eq!(input.name.as_deref(), Some("Kiel"));
    }

    #[test]
    fn rejects_out_of_range_latitude() {
        let err = RouteInput::from_json(r#"{"points":[[10.0,95.0]]}"#).unwrap_err();
        assert!(err.to_string().contains("Point 1"));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(RouteInput::from_json(r#"{"points":"#).is_err());
    }
}
