//! Great-circle distance and bearing, computed directly over
//! [`FixedPointCoordinate`]s so callers never have to round-trip
//! through floating-point degrees themselves.

use crate::geo::fixed::{FixedPointCoordinate, COORDINATE_PRECISION};

const EARTH_RADIUS_METERS: f64 = 6_372_797.560_856;
const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Haversine distance in meters, matching the extractor's
/// `ApproximateDistance` (spec.md §4.6): close enough for description
/// purposes at road-segment scale, much cheaper than a full geodesic.
pub fn approximate_distance(a: FixedPointCoordinate, b: FixedPointCoordinate) -> f64 {
    let lat1 = a.lat_degrees() * DEG_TO_RAD;
    let lat2 = b.lat_degrees() * DEG_TO_RAD;
    let dlat = lat1 - lat2;
    let dlon = (a.lon_degrees() - b.lon_degrees()) * DEG_TO_RAD;

    let sin_dlat_2 = (dlat / 2.0).sin();
    let sin_dlon_2 = (dlon / 2.0).sin();
    let aharv = sin_dlat_2 * sin_dlat_2 + lat1.cos() * lat2.cos() * sin_dlon_2 * sin_dlon_2;
    let charv = 2.0 * aharv.sqrt().atan2((1.0 - aharv).sqrt());

    EARTH_RADIUS_METERS * charv
}

/// Azimuth in degrees `[0, 360)` from `a` to `b`, matching
/// `Util/Azimuth.h`'s companion `GetAzimuth` in the upstream engine
/// this crate's description pipeline is modelled on.
pub fn azimuth(a: FixedPointCoordinate, b: FixedPointCoordinate) -> f64 {
    let lon_diff = ((a.lon - b.lon) as f64 / COORDINATE_PRECISION).to_radians();
    let a_lat = a.lat_degrees() * DEG_TO_RAD;
    let b_lat = b.lat_degrees() * DEG_TO_RAD;

    let y = lon_diff.sin() * b_lat.cos();
    let x = a_lat.cos() * b_lat.sin() - a_lat.sin() * b_lat.cos() * lon_diff.cos();
    let mut angle = y.atan2(x).to_degrees();
    while angle < 0.0 {
        angle += 360.0;
    }
    angle
}

/// Buckets a bearing into one of the eight compass points, using the
/// same boundaries as `Azimuth::Get` in the upstream engine.
pub fn cardinal_direction(heading: f64) -> &'static str {
    if heading <= 202.5 {
        if (0.0..=22.5).contains(&heading) {
            return "N";
        }
        if heading > 22.5 && heading <= 67.5 {
            return "NE";
        }
        if heading > 67.5 && heading <= 112.5 {
            return "E";
        }
        if heading > 112.5 && heading <= 157.5 {
            return "SE";
        }
        return "S";
    }
    if heading > 202.5 && heading <= 247.5 {
        return "SW";
    }
    if heading > 247.5 && heading <= 292.5 {
        return "W";
    }
    if heading > 292.5 && heading <= 337.5 {
        return "NW";
    }
    "N"
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn distance_of_coincident_points_is_zero() {
        let p = FixedPointCoordinate::from_degrees(48.8566, 2.3522);
        assert!(approximate_distance(p, p) < 1e-6);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = FixedPointCoordinate::from_degrees(38.9126, -77.0234);
        let b = FixedPointCoordinate::from_degrees(38.9177, -77.0346);
        approx::assert_relative_eq!(approximate_distance(a, b), approximate_distance(b, a), epsilon = 1e-6);
    }

    #[test]
    fn cardinal_direction_boundaries() {
        assert_eq!(cardinal_direction(0.0), "N");
        assert_eq!(cardinal_direction(45.0), "NE");
        assert_eq!(cardinal_direction(90.0), "E");
        assert_eq!(cardinal_direction(135.0), "SE");
        assert_eq!(cardinal_direction(180.0), "S");
        assert_eq!(cardinal_direction(225.0), "SW");
        assert_eq!(cardinal_direction(270.0), "W");
        assert_eq!(cardinal_direction(315.0), "NW");
        assert_eq!(cardinal_direction(359.9), "N");
    }
}
