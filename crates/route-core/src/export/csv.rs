//! Semicolon-separated leg list.

use super::ExportContext;
use crate::coords::csv_position;
use crate::geo::fixed;
use crate::metrics::route_legs;
use crate::models::Point;

/// One row per leg: number, course, distance in nm, arrival point, description.
///
/// `descriptions[i]` is the text of leg `i`; missing entries are empty.
pub fn route_csv(route: &[Point], descriptions: &[String], ctx: &ExportContext<'_>) -> String {
    let labels = ctx.labels;
    let mut out = format!(
        ";{};{};{};{}\n",
        labels.course, labels.distance, labels.coordinate, labels.description
    );

    for (i, leg) in route_legs(ctx.projection, route).iter().enumerate() {
        let coord = csv_position(ctx.formatter, ctx.coord_style, leg.to_lat, leg.to_lon);
        let description = descriptions.get(i).map(String::as_str).unwrap_or("");
        out.push_str(&format!(
            "{};{}°;{}nm;\"{}\";\"{}\"\n",
            i + 1,
            fixed(leg.bearing_deg, 2),
            fixed(leg.distance_nm, 2),
            quote(&coord),
            quote(description)
        ));
    }

    out
}

fn quote(field: &str) -> String {
    field.replace('"', "\"\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::HemisphereFormatter;
    use crate::metrics::Leg;
    use crate::models::{CoordStyle, TableLabels};
    use crate::projection::{LonLat, Projection, WebMercator};

    fn ctx<'a>(projection: &'a dyn Projection, labels: &'a TableLabels, style: CoordStyle) -> ExportContext<'a> {
        ExportContext {
            projection,
            formatter: &HemisphereFormatter,
            coord_style: style,
            labels,
        }
    }

    #[test]
    fn two_point_route_has_header_and_one_row() {
        let labels = TableLabels::english();
        let route = [
            WebMercator.from_lon_lat(10.1394, 54.3233),
            WebMercator.from_lon_lat(10.2000, 54.4000),
        ];
        let csv = route_csv(
            &route,
            &["Harbor entrance".to_string()],
            &ctx(&WebMercator, &labels, CoordStyle::Decimal),
        );

        let leg = Leg::between(&WebMercator, route[0], route[1]).unwrap();
        let coord = csv_position(&HemisphereFormatter, CoordStyle::Decimal, leg.to_lat, leg.to_lon);
        let expected = format!(
            "1;{}°;{}nm;\"{}\";\"Harbor entrance\"",
            fixed(leg.bearing_deg, 2),
            fixed(leg.distance_nm, 2),
            coord
        );

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], ";Course;Distance;Coordinate;Description");
        assert_eq!(lines[1], expected);
    }

    #[test]
    fn dms_style_uses_decimal_minutes() {
        let labels = TableLabels::german();
        let route = [Point::new(10.0, 54.0), Point::new(10.0, 54.5)];
        let csv = route_csv(&route, &[], &ctx(&LonLat, &labels, CoordStyle::Dms));
        assert!(csv.starts_with(";Kurs;Distanz;Koordinate;Beschreibung\n"));
        assert!(csv.contains("\"N054°30.0000' - E010°00.0000'\";\"\""));
    }

    #[test]
    fn quotes_in_descriptions_are_doubled() {
        let labels = TableLabels::english();
        let route = [Point::new(10.0, 54.0), Point::new(10.0, 54.5)];
        let csv = route_csv(&route, &["the \"Old\" light".into()], &ctx(&LonLat, &labels, CoordStyle::Decimal));
        assert!(csv.contains("\"the \"\"Old\"\" light\""));
    }

    #[test]
    fn degenerate_routes_only_write_header() {
        let labels = TableLabels::english();
        let c = ctx(&LonLat, &labels, CoordStyle::Decimal);
        assert_eq!(route_csv(&[], &[], &c).lines().count(), 1);
        assert_eq!(route_csv(&[Point::new(1.0, 1.0)], &[], &c).lines().count(), 1);
    }
}
