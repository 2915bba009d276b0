//! GPX 1.1 export through the `gpx` crate.

use super::{RouteFeature, RouteGeometry};
use crate::models::Point;
use crate::projection::Projection;
use ::gpx::{Gpx, GpxVersion, Route, Waypoint};

const CREATOR: &str = "route-core";

/// Write `feature` as GPX: a line becomes a `<rte>`, a point a `<wpt>`.
///
/// Polygons have no GPX counterpart and yield an empty document.
pub fn route_gpx(feature: &RouteFeature, projection: &dyn Projection) -> String {
    let mut feature = feature.clone();
    feature.combine_descriptions();

    let mut gpx = Gpx {
        version: GpxVersion::Gpx11,
        creator: Some(CREATOR.into()),
        ..Default::default()
    };

    match &feature.geometry {
        RouteGeometry::LineString(points) => {
            let mut route = Route::default();
            route.name = feature.name.clone();
            route.description = feature.description.clone();
            route.points = points.iter().map(|p| to_waypoint(*p, projection)).collect();
            gpx.routes.push(route);
        }
        RouteGeometry::Point(point) => {
            let mut waypoint = to_waypoint(*point, projection);
            waypoint.name = feature.name.clone();
            waypoint.description = feature.description.clone();
            gpx.waypoints.push(waypoint);
        }
        RouteGeometry::Polygon(_) => {
            tracing::debug!("GPX has no polygon type; writing empty document");
        }
    }

    let mut buffer = Vec::new();
    if let Err(e) = ::gpx::write(&gpx, &mut buffer) {
        tracing::error!("Failed to write GPX document: {}", e);
        return String::new();
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

fn to_waypoint(point: Point, projection: &dyn Projection) -> Waypoint {
    let (lon, lat) = projection.to_lon_lat(point);
    Waypoint::new(geo_types::Point::new(lon, lat))
}
