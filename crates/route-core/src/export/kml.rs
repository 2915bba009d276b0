//! KML 2.2 placemark writer.

use super::{escape_xml, RouteFeature, RouteGeometry};
use crate::models::Point;
use crate::projection::Projection;

/// Write `feature` as KML in WGS84, after folding its per-vertex
/// descriptions into the placemark description.
pub fn route_kml(feature: &RouteFeature, projection: &dyn Projection) -> String {
    let mut feature = feature.clone();
    feature.combine_descriptions();
    write_feature(&feature, projection)
}

/// Serialize a single feature without touching its attributes.
pub fn write_feature(feature: &RouteFeature, projection: &dyn Projection) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str("<kml xmlns=\"http://www.opengis.net/kml/2.2\">\n<Document>\n<Placemark>\n");

    if let Some(name) = feature.name.as_deref() {
        out.push_str(&format!("<name>{}</name>\n", escape_xml(name)));
    }
    if let Some(description) = feature.description.as_deref() {
        out.push_str(&format!("<description>{}</description>\n", escape_xml(description)));
    }

    match &feature.geometry {
        RouteGeometry::LineString(points) => {
            out.push_str(&format!(
                "<LineString>\n<coordinates>{}</coordinates>\n</LineString>\n",
                coordinates(points, projection)
            ));
        }
        RouteGeometry::Point(point) => {
            out.push_str(&format!(
                "<Point>\n<coordinates>{}</coordinates>\n</Point>\n",
                coordinates(std::slice::from_ref(point), projection)
            ));
        }
        RouteGeometry::Polygon(rings) => {
            out.push_str("<Polygon>\n");
            for (i, ring) in rings.iter().enumerate() {
                let boundary = if i == 0 { "outerBoundaryIs" } else { "innerBoundaryIs" };
                out.push_str(&format!(
                    "<{b}>\n<LinearRing>\n<coordinates>{}</coordinates>\n</LinearRing>\n</{b}>\n",
                    coordinates(ring, projection),
                    b = boundary
                ));
            }
            out.push_str("</Polygon>\n");
        }
    }

    out.push_str("</Placemark>\n</Document>\n</kml>\n");
    out
}

fn coordinates(points: &[Point], projection: &dyn Projection) -> String {
    points
        .iter()
        .map(|p| {
            let (lon, lat) = projection.to_lon_lat(*p);
            format!("{},{}", lon, lat)
        })
        .collect::<Vec<_>>()
        .join(" ")
}
