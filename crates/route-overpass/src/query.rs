//! Overpass QL for the fixed set of navigational features.

use route_core::SEARCH_RADIUS_M;

/// Node filters searched around the query point.
const NODE_FILTERS: &[&str] = &[
    r#"["man_made"="lighthouse"]"#,
    r#"["seamark:type"="light_major"]"#,
    r#"["seamark:type"="light_minor"]"#,
    r#"["seamark:type"="buoy"]"#,
    r#"["seamark:type"="beacon_cardinal"]"#,
    r#"["seamark:type"="beacon_lateral"]"#,
    r#"["seamark:type"="beacon_isolated_danger"]"#,
    r#"["place"~"city|town|village"]["name"]"#,
];

/// Islands may be mapped as nodes, closed ways or multipolygons.
const ISLAND_FILTER: &str = r#"["place"~"island|islet"]["name"]"#;

/// Query for every feature kind within [`SEARCH_RADIUS_M`] of `(lat, lon)`.
///
/// Ways and relations are returned with a `center` so they can be ranked
/// like nodes.
pub fn build_query(lat: f64, lon: f64) -> String {
    let around = format!("(around:{},{},{});", SEARCH_RADIUS_M, lat, lon);

    let mut query = String::from("[out:json];\n(\n");
    for filter in NODE_FILTERS {
        query.push_str(&format!("  node{}{}\n", filter, around));
    }
    for element in ["node", "way", "relation"] {
        query.push_str(&format!("  {}{}{}\n", element, ISLAND_FILTER, around));
    }
    query.push_str(");\nout body center;\n");
    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_covers_every_kind_with_fixed_radius() {
        let query = build_query(54.3233, 10.1394);
        assert!(query.starts_with("[out:json];"));
        assert!(query.trim_end().ends_with("out body center;"));
        assert_eq!(query.matches("(around:5000,54.3233,10.1394);").count(), 11);
        assert!(query.contains(r#"node["seamark:type"="beacon_isolated_danger"]"#));
        assert!(query.contains(r#"relation["place"~"island|islet"]["name"]"#));
    }
}
