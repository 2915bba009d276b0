//! Conversion between projected map units and WGS84 degrees.

use crate::models::Point;
use std::f64::consts::PI;

/// Spherical Mercator radius (EPSG:3857).
const MERCATOR_RADIUS_M: f64 = 6_378_137.0;

const MERCATOR_HALF_SIZE: f64 = PI * MERCATOR_RADIUS_M;

/// Reprojection between the drawing surface and geographic coordinates.
pub trait Projection: Send + Sync {
    /// Projected `point` to `(lon, lat)` in degrees.
    fn to_lon_lat(&self, point: Point) -> (f64, f64);

    /// `(lon, lat)` in degrees to projected units.
    fn from_lon_lat(&self, lon: f64, lat: f64) -> Point;
}

/// EPSG:3857, the default projection of the map surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebMercator;

impl Projection for WebMercator {
    fn to_lon_lat(&self, point: Point) -> (f64, f64) {
        let lon = (point.x / MERCATOR_RADIUS_M).to_degrees();
        let lat = (2.0 * (point.y / MERCATOR_RADIUS_M).exp().atan() - PI / 2.0).to_degrees();
        (lon, lat)
    }

    fn from_lon_lat(&self, lon: f64, lat: f64) -> Point {
        let x = MERCATOR_RADIUS_M * lon.to_radians();
        let y = MERCATOR_RADIUS_M * (PI / 4.0 + lat.to_radians() / 2.0).tan().ln();
        Point::new(x, y.clamp(-MERCATOR_HALF_SIZE, MERCATOR_HALF_SIZE))
    }
}

/// Identity projection, for callers that already hold `(lon, lat)` pairs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LonLat;

impl Projection for LonLat {
    fn to_lon_lat(&self, point: Point) -> (f64, f64) {
        (point.x, point.y)
    }

    fn from_lon_lat(&self, lon: f64, lat: f64) -> Point {
        Point::new(lon, lat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_maps_to_null_island() {
        let (lon, lat) = WebMercator.to_lon_lat(Point::new(0.0, 0.0));
        assert!(lon.abs() < 1e-12);
        assert!(lat.abs() < 1e-12);
    }

    #[test]
    fn web_mercator_round_trips_kiel() {
        let p = WebMercator.from_lon_lat(10.1394, 54.3233);
        let (lon, lat) = WebMercator.to_lon_lat(p);
        assert!((lon - 10.1394).abs() < 1e-9);
        assert!((lat - 54.3233).abs() < 1e-9);
    }

    #[test]
    fn antimeridian_is_half_world_width() {
        let p = WebMercator.from_lon_lat(180.0, 0.0);
        assert!((p.x - MERCATOR_HALF_SIZE).abs() < 1e-6);
    }
}
