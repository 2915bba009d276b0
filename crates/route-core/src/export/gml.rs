//! Minimal GML 2.1.2 feature member.

use super::escape_xml;
use crate::models::Point;
use crate::projection::Projection;

const NO_DESCRIPTION: &str = "No description available";

/// A `featureMember` with one `LineString` of `lon,lat` pairs in route order.
///
/// Without descriptions the placeholder text is written instead.
pub fn route_gml(route: &[Point], descriptions: Option<&[String]>, projection: &dyn Projection) -> String {
    let coord_text: String = route
        .iter()
        .map(|p| {
            let (lon, lat) = projection.to_lon_lat(*p);
            format!("{},{} ", lon, lat)
        })
        .collect();

    let desc_text = match descriptions {
        Some(descriptions) if !descriptions.is_empty() => descriptions
            .iter()
            .enumerate()
            .map(|(i, d)| format!("Point {}: {}", i + 1, d))
            .collect::<Vec<_>>()
            .join("\n"),
        _ => NO_DESCRIPTION.to_string(),
    };

    format!(
        r#"
<gml:featureMember xmlns:gml="http://www.opengis.net/gml" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="http://www.opengis.net/gml http://schemas.opengis.net/gml/2.1.2/feature.xsd">
    <gml:null>
        <gml:description>{}</gml:description>
        <gml:geometry>
            <gml:LineString>
                <gml:coordinates decimal="." cs="," ts=" ">{}</gml:coordinates>
            </gml:LineString>
        </gml:geometry>
    </gml:null>
</gml:featureMember>
"#,
        escape_xml(&desc_text),
        coord_text
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::LonLat;

    #[test]
    fn coordinates_are_lon_lat_pairs_in_order() {
        let route = [Point::new(10.5, 54.25), Point::new(11.0, 54.5)];
        let gml = route_gml(&route, None, &LonLat);
        assert!(gml.contains(r#"ts=" ">10.5,54.25 11,54.5 </gml:coordinates>"#));
        assert!(gml.contains("<gml:description>No description available</gml:description>"));
    }

    #[test]
    fn descriptions_are_numbered() {
        let route = [Point::new(10.5, 54.25), Point::new(11.0, 54.5)];
        let descriptions = vec!["".to_string(), "Fish & chips".to_string()];
        let gml = route_gml(&route, Some(descriptions.as_slice()), &LonLat);
        assert!(gml.contains("<gml:description>Point 1: \nPoint 2: Fish &amp; chips</gml:description>"));
    }

    #[test]
    fn empty_route_has_empty_coordinates() {
        let gml = route_gml(&[], Some(&[][..]), &LonLat);
        assert!(gml.contains(r#"ts=" "></gml:coordinates>"#));
        assert!(gml.contains(NO_DESCRIPTION));
    }
}
