//! Converts an unpacked path into the user-visible route
//! representations (spec.md §4.6): segment construction, length and
//! bearing, Douglas-Peucker generalisation, polyline encoding,
//! turn-instruction synthesis and route-name extraction.
//!
//! Every step here is allowed to fail independently; per spec.md §4.6
//! "failure of any description step is non-fatal", `describe_leg`
//! never returns an error — a step that finds nothing just leaves its
//! corresponding field at its default.

pub mod instructions;
pub mod polyline;
pub mod route_names;
pub mod segment;
pub mod simplify;
pub mod summary;

use crate::facade::DataFacade;
use crate::geo::distance::{approximate_distance, azimuth};
use crate::model::{PathData, PhantomNode, SegmentInformation};

pub use instructions::RouteInstruction;
pub use route_names::RouteNames;
pub use summary::RouteSummary;

/// The complete description-pipeline output for one leg.
#[derive(Debug, Clone)]
pub struct DescribedRoute {
    pub segments: Vec<SegmentInformation>,
    pub geometry: String,
    pub instructions: Vec<RouteInstruction>,
    pub summary: RouteSummary,
}

/// Runs the full pipeline for one leg's unpacked path at the given
/// zoom level.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(facade)))]
pub fn describe_leg(
    facade: &DataFacade,
    source: &PhantomNode,
    target: &PhantomNode,
    path: &[PathData],
    zoom: u8,
) -> DescribedRoute {
    let mut segments = segment::build_segments(facade, source, target, path);
    compute_lengths_and_bearings(&mut segments);
    simplify::simplify(&mut segments, zoom);

    let necessary_locations: Vec<_> = segments
        .iter()
        .filter(|s| s.necessary)
        .map(|s| s.location)
        .collect();
    let geometry = polyline::encode(&necessary_locations);

    let instructions = instructions::build_instructions(facade, &segments);

    let total_distance_m: f64 = segments.iter().map(|s| s.length).sum();
    let total_time_ds = segments.iter().map(|s| s.duration).sum();
    let summary = RouteSummary {
        total_distance_m,
        total_time_ds,
        start_point: source.location,
        end_point: target.location,
    };

    DescribedRoute {
        segments,
        geometry,
        instructions,
        summary,
    }
}

/// Fills in each segment's `length` (from the previous one) and
/// `bearing` (towards the next one), in a single left-to-right pass
/// (spec.md §4.6 "Bearing and length").
fn compute_lengths_and_bearings(segments: &mut [SegmentInformation]) {
    let n = segments.len();
    for i in 1..n {
        segments[i].length = approximate_distance(segments[i - 1].location, segments[i].location);
    }
    for i in 0..n.saturating_sub(1) {
        let next = segments[i + 1].location;
        segments[i].bearing = azimuth(segments[i].location, next);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::facade::graph::{CsrGraph, RawEdgeRecord};
    use crate::facade::names::NameTable;
    use crate::geo::FixedPointCoordinate;
    use crate::model::{NodeId, TurnInstruction, INVALID_EDGE_WEIGHT, SPECIAL_NODEID};

    fn phantom(node: NodeId, location: FixedPointCoordinate, ratio: f64) -> PhantomNode {
        PhantomNode {
            forward_node: node,
            reverse_node: SPECIAL_NODEID,
            name_id: 0,
            forward_weight: 0,
            reverse_weight: INVALID_EDGE_WEIGHT,
            location,
            ratio,
        }
    }

    #[test]
    fn describes_a_two_point_leg_ending_in_reached_destination() {
        let coords = vec![
            FixedPointCoordinate::from_degrees(0.0, 0.0),
            FixedPointCoordinate::from_degrees(0.0, 0.01),
        ];
        let graph = CsrGraph::new(
            vec![0, 1, 1],
            vec![RawEdgeRecord::pack(1, 100, 100, 0, true, true, false, 0).unpack()],
        );
        let facade = DataFacade::from_parts(graph, coords.clone(), NameTable::from_names(["Test St"]), vec![], 0);

        let source = phantom(0, coords[0], 0.3);
        let target = phantom(1, coords[1], 0.8);
        let path = vec![PathData {
            node: 1,
            name_id: 0,
            duration: 100,
            turn_instruction: TurnInstruction::NoTurn,
        }];

        let described = describe_leg(&facade, &source, &target, &path, 18);
        assert_eq!(described.summary.total_time_ds, 50);
        assert_eq!(
            described.instructions.last().unwrap().turn_id,
            "reached-destination"
        );
        assert!(!described.geometry.is_empty());
    }
}
