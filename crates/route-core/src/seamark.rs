//! Nearest navigational feature ranking and label formatting.
//!
//! Elements come from the map-data query service (OSM tags). Each is
//! measured from the query point, the ten nearest are kept and turned into
//! a short chart-style label such as `Cape Light; Fl.R.5s (2.3 sm)`.

use crate::geo::{fixed, haversine_distance, meters_to_nm};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Search radius around the query point.
pub const SEARCH_RADIUS_M: u32 = 5000;

/// Number of labels offered to the user.
pub const MAX_RESULTS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

/// One element of the service response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureElement {
    #[serde(rename = "type", default)]
    pub element_type: String,
    pub id: i64,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    /// Centre of a way or relation
    #[serde(default)]
    pub center: Option<LatLon>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureResponse {
    #[serde(default)]
    pub elements: Vec<FeatureElement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    Lighthouse,
    Light,
    Beacon,
    Buoy,
    Place,
    Island,
    Unknown,
}

impl FeatureElement {
    /// Non-empty tag value.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str).filter(|v| !v.is_empty())
    }

    /// Node position, or the centre for ways and relations.
    pub fn position(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lon, self.center) {
            (Some(lat), Some(lon), _) => Some((lat, lon)),
            (_, _, Some(center)) => Some((center.lat, center.lon)),
            _ => None,
        }
    }

    /// Type identifier: `seamark:type`, else `man_made`, else `place`.
    pub fn feature_type(&self) -> Option<&str> {
        self.tag("seamark:type")
            .or_else(|| self.tag("man_made"))
            .or_else(|| self.tag("place"))
    }

    pub fn kind(&self) -> FeatureKind {
        match self.feature_type() {
            Some("lighthouse") => FeatureKind::Lighthouse,
            Some("light_major" | "light_minor") => FeatureKind::Light,
            Some(t) if t.starts_with("beacon") => FeatureKind::Beacon,
            Some(t) if t.starts_with("buoy") => FeatureKind::Buoy,
            Some("island" | "islet") => FeatureKind::Island,
            _ if self.tag("place").is_some() => FeatureKind::Place,
            _ => FeatureKind::Unknown,
        }
    }

    /// Chart-style label with the distance suffix ` (<d> sm)`.
    pub fn label(&self, distance_nm: f64) -> String {
        let distance = fixed(distance_nm, 1);

        match self.feature_type() {
            Some("lighthouse" | "light_minor" | "light_major") => {
                let name = self.tag("seamark:name").unwrap_or("Unnamed Light");
                format!("{}{} ({} sm)", name, self.light_characteristic(true), distance)
            }
            Some("beacon_lateral") => {
                let category = self.tag("seamark:beacon_lateral:category").unwrap_or("");
                format!(
                    "Beacon {}{} ({} sm)",
                    category,
                    self.light_characteristic(false),
                    distance
                )
            }
            Some(t) if t.starts_with("beacon") => format!("Beacon ({} sm)", distance),
            _ if self.tags.contains_key("place") => {
                format!("{} ({} sm)", self.tag("name").unwrap_or(""), distance)
            }
            _ => format!("Unknown ({} sm)", distance),
        }
    }

    /// `; <character>.<colour><period>s[<height>m<range>M]`, empty without a
    /// light character. White is the default colour and is not written.
    fn light_characteristic(&self, with_height_and_range: bool) -> String {
        let Some(character) = self.tag("seamark:light:character") else {
            return String::new();
        };

        let colour = self
            .tag("seamark:light:colour")
            .and_then(|c| c.chars().next())
            .map(|c| c.to_uppercase().collect::<String>())
            .filter(|c| c != "W")
            .map(|c| format!("{}.", c))
            .unwrap_or_default();

        let mut text = format!("; {}.{}{}", character, colour, suffixed(self.tag("seamark:light:period"), "s"));
        if with_height_and_range {
            text.push_str(&suffixed(self.tag("seamark:light:height"), "m"));
            text.push_str(&suffixed(self.tag("seamark:light:range"), "M"));
        }
        text
    }
}

fn suffixed(value: Option<&str>, suffix: &str) -> String {
    value.map(|v| format!("{}{}", v, suffix)).unwrap_or_default()
}

/// A feature measured from the query point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedFeature {
    pub element: FeatureElement,
    pub distance_nm: f64,
    pub label: String,
}

/// Measure, sort ascending by distance and keep the nearest [`MAX_RESULTS`].
///
/// Elements without a usable position are skipped.
pub fn rank_features(elements: Vec<FeatureElement>, lat: f64, lon: f64) -> Vec<RankedFeature> {
    let mut measured: Vec<(FeatureElement, f64)> = elements
        .into_iter()
        .filter_map(|element| {
            let (el_lat, el_lon) = element.position()?;
            match haversine_distance(lat, lon, el_lat, el_lon) {
                Ok(meters) => Some((element, meters_to_nm(meters))),
                Err(e) => {
                    tracing::debug!("Skipping feature {}: {}", element.id, e);
                    None
                }
            }
        })
        .collect();

    measured.sort_by(|a, b| a.1.total_cmp(&b.1));
    measured.truncate(MAX_RESULTS);

    measured
        .into_iter()
        .map(|(element, distance_nm)| RankedFeature {
            label: element.label(distance_nm),
            element,
            distance_nm,
        })
        .collect()
}

/// Labels of the nearest features, closest first.
pub fn nearest_labels(elements: Vec<FeatureElement>, lat: f64, lon: f64) -> Vec<String> {
    rank_features(elements, lat, lon)
        .into_iter()
        .map(|ranked| ranked.label)
        .collect()
}
