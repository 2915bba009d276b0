//! Great-circle math for route legs and feature distances.

use thiserror::Error;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

pub const METERS_PER_NM: f64 = 1852.0;

pub const KM_PER_NM: f64 = 1.852;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeoError {
    #[error("coordinate is not finite: lat={lat}, lon={lon}")]
    NonFinite { lat: f64, lon: f64 },
}

fn ensure_finite(lat: f64, lon: f64) -> Result<(), GeoError> {
    if lat.is_finite() && lon.is_finite() {
        Ok(())
    } else {
        Err(GeoError::NonFinite { lat, lon })
    }
}

/// Calculate distance between two points in meters using Haversine formula.
///
/// # Arguments
/// * `lat1`, `lon1` - First point coordinates in decimal degrees
/// * `lat2`, `lon2` - Second point coordinates in decimal degrees
///
/// # Returns
/// Distance in meters, or `GeoError::NonFinite` for NaN/infinite input
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Result<f64, GeoError> {
    ensure_finite(lat1, lon1)?;
    ensure_finite(lat2, lon2)?;

    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();
    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    // Rounding can push `a` a hair outside [0, 1] for antipodal points.
    let a = a.clamp(0.0, 1.0);
    Ok(2.0 * EARTH_RADIUS_M * a.sqrt().atan2((1.0 - a).sqrt()))
}

/// Haversine distance in nautical miles.
pub fn distance_nm(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Result<f64, GeoError> {
    haversine_distance(lat1, lon1, lat2, lon2).map(meters_to_nm)
}

/// Forward azimuth from point 1 to point 2 in degrees, in `[0, 360)`.
pub fn initial_bearing(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Result<f64, GeoError> {
    ensure_finite(lat1, lon1)?;
    ensure_finite(lat2, lon2)?;

    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_lambda = (lon2 - lon1).to_radians();

    let x = delta_lambda.sin() * phi2.cos();
    let y = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();

    let degrees = x.atan2(y).to_degrees().rem_euclid(360.0);
    // rem_euclid of a tiny negative value rounds up to exactly 360.
    Ok(if degrees >= 360.0 { 0.0 } else { degrees })
}

pub fn meters_to_nm(meters: f64) -> f64 {
    meters / METERS_PER_NM
}

pub fn nm_to_km(nm: f64) -> f64 {
    nm * KM_PER_NM
}

/// Format `value` with `decimals` places, rounding ties away from zero.
pub fn fixed(value: f64, decimals: usize) -> String {
    let scale = 10f64.powi(decimals as i32);
    format!("{:.*}", decimals, (value * scale).round() / scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_known_distance() {
        // ~111km between these points (1 degree latitude)
        let dist = haversine_distance(0.0, 0.0, 1.0, 0.0).unwrap();
        assert!((dist - 111_194.0).abs() < 100.0);
    }

    #[test]
    fn test_haversine_same_point() {
        let dist = haversine_distance(54.3233, 10.1394, 54.3233, 10.1394).unwrap();
        assert_eq!(dist, 0.0);
    }

    #[test]
    fn haversine_is_symmetric_and_non_negative() {
        let pairs = [
            ((54.32, 10.14), (54.50, 10.30)),
            ((-33.86, 151.21), (51.51, -0.13)),
            ((0.0, 179.9), (0.0, -179.9)),
        ];
        for ((lat1, lon1), (lat2, lon2)) in pairs {
            let ab = haversine_distance(lat1, lon1, lat2, lon2).unwrap();
            let ba = haversine_distance(lat2, lon2, lat1, lon1).unwrap();
            assert!(ab >= 0.0);
            assert!((ab - ba).abs() < 1e-6, "asymmetric: {ab} vs {ba}");
        }
    }

    #[test]
    fn haversine_rejects_non_finite_input() {
        assert!(matches!(
            haversine_distance(f64::NAN, 0.0, 1.0, 1.0),
            Err(GeoError::NonFinite { .. })
        ));
        assert!(haversine_distance(0.0, 0.0, 1.0, f64::INFINITY).is_err());
    }

    #[test]
    fn bearing_cardinal_directions() {
        let north = initial_bearing(0.0, 0.0, 1.0, 0.0).unwrap();
        let east = initial_bearing(0.0, 0.0, 0.0, 1.0).unwrap();
        let south = initial_bearing(1.0, 0.0, 0.0, 0.0).unwrap();
        let west = initial_bearing(0.0, 1.0, 0.0, 0.0).unwrap();
        assert!(north.abs() < 1e-9);
        assert!((east - 90.0).abs() < 1e-9);
        assert!((south - 180.0).abs() < 1e-9);
        assert!((west - 270.0).abs() < 1e-9);
    }

    #[test]
    fn bearing_stays_in_range() {
        let samples = [
            (54.0, 10.0, 53.9, 9.9),
            (54.0, 10.0, 54.0, 10.0),
            (-10.0, 170.0, 10.0, -170.0),
            (89.0, 0.0, -89.0, 180.0),
        ];
        for (lat1, lon1, lat2, lon2) in samples {
            let b = initial_bearing(lat1, lon1, lat2, lon2).unwrap();
            assert!((0.0..360.0).contains(&b), "bearing {b} out of range");
        }
    }

    #[test]
    fn unit_conversions() {
        assert_eq!(meters_to_nm(1852.0), 1.0);
        assert!((nm_to_km(10.0) - 18.52).abs() < 1e-12);
    }

    #[test]
    fn fixed_rounds_ties_up() {
        assert_eq!(fixed(0.25, 1), "0.3");
        assert_eq!(fixed(0.125, 2), "0.13");
        assert_eq!(fixed(2.5, 0), "3");
        assert_eq!(fixed(6.0, 2), "6.00");
        assert_eq!(fixed(359.994, 2), "359.99");
    }
}
