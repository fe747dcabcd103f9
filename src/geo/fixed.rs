use geo::Point;

/// Factor used to pack a floating-point degree into the fixed-point
/// integer representation used throughout the on-disk graph and the
/// query core (`COORDINATE_PRECISION` in the upstream engine).
pub const COORDINATE_PRECISION: f64 = 1_000_000.0;

/// A latitude/longitude pair stored as fixed-point integers.
///
/// Keeping coordinates as integers (rather than `f64`) means repeated
/// delta/accumulate operations over a long route — as the polyline
/// encoder and the Douglas-Peucker simplifier both do — never
/// accumulate floating point error; every arithmetic step is exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(C)]
pub struct FixedPointCoordinate {
    pub lat: i32,
    pub lon: i32,
}

impl FixedPointCoordinate {
    pub const INVALID: FixedPointCoordinate = FixedPointCoordinate {
        lat: i32::MAX,
        lon: i32::MAX,
    };

    pub fn new(lat: i32, lon: i32) -> Self {
        FixedPointCoordinate { lat, lon }
    }

    pub fn from_degrees(lat: f64, lon: f64) -> Self {
        FixedPointCoordinate {
            lat: (lat * COORDINATE_PRECISION).round() as i32,
            lon: (lon * COORDINATE_PRECISION).round() as i32,
        }
    }

    pub fn lat_degrees(&self) -> f64 {
        self.lat as f64 / COORDINATE_PRECISION
    }

    pub fn lon_degrees(&self) -> f64 {
        self.lon as f64 / COORDINATE_PRECISION
    }

    pub fn is_valid(&self) -> bool {
        *self != Self::INVALID
    }

    pub fn to_point(self) -> Point<f64> {
        Point::new(self.lon_degrees(), self.lat_degrees())
    }
}

impl From<Point<f64>> for FixedPointCoordinate {
    fn from(point: Point<f64>) -> Self {
        FixedPointCoordinate::from_degrees(point.y(), point.x())
    }
}
