//! Route summary numerics and human-readable strings (SPEC_FULL §3
//! "Route summary duration/length strings"), ported from
//! `DescriptionFactory.cpp`'s `BuildRouteSummary`.

use crate::geo::FixedPointCoordinate;
use crate::model::Weight;

/// Total distance/time for a route, alongside its endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteSummary {
    pub total_distance_m: f64,
    pub total_time_ds: Weight,
    pub start_point: FixedPointCoordinate,
    pub end_point: FixedPointCoordinate,
}

impl RouteSummary {
    /// Renders `total_distance_m`/`total_time_ds` as the human strings
    /// the original prints alongside the numeric fields, e.g.
    /// `("5.3 km", "12 min")`.
    pub fn describe(&self) -> (String, String) {
        let distance = if self.total_distance_m >= 1000.0 {
            format!("{:.1} km", self.total_distance_m / 1000.0)
        } else {
            format!("{:.0} m", self.total_distance_m)
        };

        let total_seconds = self.total_time_ds as f64 / 10.0;
        let minutes = (total_seconds / 60.0).round() as i64;
        let time = if minutes < 1 {
            format!("{} s", total_seconds.round() as i64)
        } else {
            format!("{} min", minutes)
        };

        (distance, time)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn describes_kilometers_and_minutes() {
        let summary = RouteSummary {
            total_distance_m: 5_300.0,
            total_time_ds: 7_200,
            start_point: FixedPointCoordinate::default(),
            end_point: FixedPointCoordinate::default(),
        };
        let (distance, time) = summary.describe();
        assert_eq!(distance, "5.3 km");
        assert_eq!(time, "12 min");
    }

    #[test]
    fn describes_meters_and_seconds_for_short_routes() {
        let summary = RouteSummary {
            total_distance_m: 120.0,
            total_time_ds: 250,
            start_point: FixedPointCoordinate::default(),
            end_point: FixedPointCoordinate::default(),
        };
        let (distance, time) = summary.describe();
        assert_eq!(distance, "120 m");
        assert_eq!(time, "25 s");
    }
}
