//! Per-segment bearing/distance computation and the segment table model.

use crate::coords::{table_position, CoordFormatter};
use crate::geo::{distance_nm, fixed, initial_bearing, nm_to_km, GeoError};
use crate::models::{CoordStyle, DistanceUnit, Point};
use crate::projection::Projection;
use serde::{Deserialize, Serialize};

/// One leg of the route in geographic terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leg {
    pub from_lat: f64,
    pub from_lon: f64,
    pub to_lat: f64,
    pub to_lon: f64,
    pub bearing_deg: f64,
    pub distance_nm: f64,
}

impl Leg {
    pub fn between(projection: &dyn Projection, from: Point, to: Point) -> Result<Self, GeoError> {
        let (from_lon, from_lat) = projection.to_lon_lat(from);
        let (to_lon, to_lat) = projection.to_lon_lat(to);
        Ok(Self {
            from_lat,
            from_lon,
            to_lat,
            to_lon,
            bearing_deg: initial_bearing(from_lat, from_lon, to_lat, to_lon)?,
            distance_nm: distance_nm(from_lat, from_lon, to_lat, to_lon)?,
        })
    }

    /// Distance converted to the display unit.
    pub fn distance_in(&self, unit: DistanceUnit) -> f64 {
        match unit {
            DistanceUnit::Nm => self.distance_nm,
            DistanceUnit::Km => nm_to_km(self.distance_nm),
        }
    }
}

/// Legs for every consecutive pair of `route`.
///
/// A leg with non-finite coordinates is logged and reported with zero
/// bearing and distance so the table keeps one row per segment.
pub fn route_legs(projection: &dyn Projection, route: &[Point]) -> Vec<Leg> {
    route
        .windows(2)
        .map(|pair| {
            Leg::between(projection, pair[0], pair[1]).unwrap_or_else(|err| {
                tracing::warn!("Degenerate route leg {:?} -> {:?}: {}", pair[0], pair[1], err);
                let (from_lon, from_lat) = projection.to_lon_lat(pair[0]);
                let (to_lon, to_lat) = projection.to_lon_lat(pair[1]);
                Leg {
                    from_lat,
                    from_lon,
                    to_lat,
                    to_lon,
                    bearing_deg: 0.0,
                    distance_nm: 0.0,
                }
            })
        })
        .collect()
}

/// A row of the segment table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentRow {
    /// 1-based row number
    pub number: usize,
    /// Id of the description input, `desc_<segment index>`
    pub input_id: String,
    pub bearing_deg: f64,
    pub distance: f64,
    pub bearing_text: String,
    pub distance_text: String,
    /// Formatted arrival point
    pub position: String,
    pub arrival_lat: f64,
    pub arrival_lon: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub start: String,
    pub end: String,
    pub total_distance: f64,
    pub total_distance_text: String,
}

/// Everything the route panel shows for the current route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayModel {
    pub unit: DistanceUnit,
    pub rows: Vec<SegmentRow>,
    pub summary: Option<RouteSummary>,
}

impl DisplayModel {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.summary.is_none()
    }
}

pub fn description_input_id(segment_index: usize) -> String {
    format!("desc_{}", segment_index)
}

/// Builds the segment table from route points and their descriptions.
pub struct SegmentRenderer<'a> {
    projection: &'a dyn Projection,
    formatter: &'a dyn CoordFormatter,
}

impl<'a> SegmentRenderer<'a> {
    pub fn new(projection: &'a dyn Projection, formatter: &'a dyn CoordFormatter) -> Self {
        Self {
            projection,
            formatter,
        }
    }

    /// Render `route`; row `i` shows the description stored at index `i`.
    ///
    /// Fewer than two points produce an empty model.
    pub fn render(
        &self,
        route: &[Point],
        annotations: &[String],
        unit: DistanceUnit,
        style: CoordStyle,
    ) -> DisplayModel {
        if route.len() < 2 {
            return DisplayModel {
                unit,
                ..DisplayModel::default()
            };
        }
        let (first, last) = (route[0], route[route.len() - 1]);

        let mut total = 0.0;
        let rows: Vec<SegmentRow> = route_legs(self.projection, route)
            .iter()
            .enumerate()
            .map(|(i, leg)| {
                let distance = leg.distance_in(unit);
                total += distance;
                SegmentRow {
                    number: i + 1,
                    input_id: description_input_id(i),
                    bearing_deg: leg.bearing_deg,
                    distance,
                    bearing_text: format!("{}°", fixed(leg.bearing_deg, 2)),
                    distance_text: format!("{} {}", fixed(distance, 2), unit),
                    position: table_position(self.formatter, style, leg.to_lat, leg.to_lon),
                    arrival_lat: leg.to_lat,
                    arrival_lon: leg.to_lon,
                    description: annotations.get(i).cloned().unwrap_or_default(),
                }
            })
            .collect();

        let (start_lon, start_lat) = self.projection.to_lon_lat(first);
        let (end_lon, end_lat) = self.projection.to_lon_lat(last);

        DisplayModel {
            unit,
            rows,
            summary: Some(RouteSummary {
                start: table_position(self.formatter, style, start_lat, start_lon),
                end: table_position(self.formatter, style, end_lat, end_lon),
                total_distance: total,
                total_distance_text: format!("{} {}", fixed(total, 2), unit),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::HemisphereFormatter;
    use crate::projection::LonLat;

    fn route() -> Vec<Point> {
        vec![
            Point::new(10.0, 54.0),
            Point::new(10.0, 54.1),
            Point::new(10.2, 54.1),
        ]
    }

    #[test]
    fn three_points_make_two_rows() {
        let renderer = SegmentRenderer::new(&LonLat, &HemisphereFormatter);
        let annotations = vec!["Harbor entrance".to_string()];
        let model = renderer.render(&route(), &annotations, DistanceUnit::Nm, CoordStyle::Decimal);

        assert_eq!(model.rows.len(), 2);
        assert_eq!(model.rows[0].input_id, "desc_0");
        assert_eq!(model.rows[0].description, "Harbor entrance");
        assert_eq!(model.rows[1].description, "");
        assert_eq!(model.rows[0].bearing_text, "0.00°");
        // 0.1 degree of latitude is six nautical miles
        assert!((model.rows[0].distance - 6.0).abs() < 0.01);

        let summary = model.summary.expect("summary");
        let sum: f64 = model.rows.iter().map(|r| r.distance).sum();
        assert_eq!(summary.total_distance_text, format!("{} nm", fixed(sum, 2)));
        assert_eq!(summary.start, "N 54.000° - E010.000°");
        assert_eq!(summary.end, "N 54.100° - E010.200°");
    }

    #[test]
    fn kilometer_unit_scales_distances() {
        let renderer = SegmentRenderer::new(&LonLat, &HemisphereFormatter);
        let nm = renderer.render(&route(), &[], DistanceUnit::Nm, CoordStyle::Decimal);
        let km = renderer.render(&route(), &[], DistanceUnit::Km, CoordStyle::Decimal);
        assert!((km.rows[1].distance - nm.rows[1].distance * 1.852).abs() < 1e-9);
        assert!(km.rows[1].distance_text.ends_with(" km"));
    }

    #[test]
    fn short_routes_render_empty() {
        let renderer = SegmentRenderer::new(&LonLat, &HemisphereFormatter);
        assert!(renderer.render(&[], &[], DistanceUnit::Nm, CoordStyle::Decimal).is_empty());
        let single = [Point::new(10.0, 54.0)];
        assert!(renderer.render(&single, &[], DistanceUnit::Nm, CoordStyle::Dms).is_empty());
    }

    #[test]
    fn dms_style_formats_arrival_points() {
        let renderer = SegmentRenderer::new(&LonLat, &HemisphereFormatter);
        let model = renderer.render(&route(), &[], DistanceUnit::Nm, CoordStyle::Dms);
        assert_eq!(model.rows[0].position, "N 54°06'00\" - E010°00'00\"");
    }
}
