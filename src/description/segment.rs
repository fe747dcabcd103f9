//! Builds the annotated segment array a leg's unpacked path feeds into
//! the rest of the description pipeline (spec.md §4.6 "Segment
//! construction"), ported from `DescriptionFactory.cpp`'s `Run`.

use crate::facade::DataFacade;
use crate::model::{PathData, PhantomNode, SegmentInformation, TurnInstruction, Weight};

/// Builds one leg's segment array: the source phantom, one segment
/// per unpacked [`PathData`], and the target phantom, with the first
/// and last segments' durations scaled by the phantoms' split ratios.
///
/// A residual segment whose scaled length rounds to zero (the split
/// ratio landed exactly on a graph node) is dropped and its turn
/// instruction promoted onto the segment that becomes the new
/// boundary, matching the original's degenerate-end trimming
/// (SPEC_FULL §3).
pub fn build_segments(
    facade: &DataFacade,
    source: &PhantomNode,
    target: &PhantomNode,
    path: &[PathData],
) -> Vec<SegmentInformation> {
    let mut segments = Vec::with_capacity(path.len() + 2);

    segments.push(SegmentInformation {
        location: source.location,
        name_id: source.name_id,
        length: 0.0,
        duration: 0,
        bearing: 0.0,
        turn_instruction: TurnInstruction::HeadOn,
        necessary: true,
    });

    for step in path {
        segments.push(SegmentInformation {
            location: facade.get_coordinate_of_node(step.node),
            name_id: step.name_id,
            length: 0.0,
            duration: step.duration,
            bearing: 0.0,
            turn_instruction: step.turn_instruction,
            necessary: false,
        });
    }

    segments.push(SegmentInformation {
        location: target.location,
        name_id: target.name_id,
        length: 0.0,
        duration: 0,
        bearing: 0.0,
        turn_instruction: TurnInstruction::ReachedDestination,
        necessary: true,
    });

    scale_residual(&mut segments, source.ratio, target.ratio);
    trim_degenerate_ends(&mut segments);

    if let Some(first) = segments.first_mut() {
        first.necessary = true;
    }
    if let Some(last) = segments.last_mut() {
        last.necessary = true;
        last.turn_instruction = TurnInstruction::ReachedDestination;
    }

    segments
}

/// Scales the first real edge's duration by the source's split ratio
/// and the last real edge's duration by the target's residual ratio
/// (spec.md §4.6: "duration *= ratio at the ends").
///
/// When the path has exactly one real edge, the source and target
/// phantoms sit on the *same* edge, and the two scalings collapse
/// into one: the traveled portion runs from the source's ratio to
/// the target's, not the product of `(1 - source_ratio)` and
/// `target_ratio` independently (spec.md §8 S2).
fn scale_residual(segments: &mut [SegmentInformation], source_ratio: f64, target_ratio: f64) {
    let len = segments.len();
    if len < 3 {
        return;
    }
    if len == 3 {
        let duration = segments[1].duration as f64;
        segments[1].duration = (duration * (target_ratio - source_ratio)).max(0.0).round() as Weight;
        return;
    }
    if let Some(second) = segments.get_mut(1) {
        second.duration = (second.duration as f64 * (1.0 - source_ratio)).round() as Weight;
    }
    let second_last = &mut segments[len - 2];
    second_last.duration = (second_last.duration as f64 * target_ratio).round() as Weight;
}

/// Drops a residual boundary segment that scaled to zero duration,
/// promoting its turn instruction onto the new boundary segment.
fn trim_degenerate_ends(segments: &mut Vec<SegmentInformation>) {
    if segments.len() >= 3 && segments[1].duration == 0 {
        let promoted = segments[1].turn_instruction;
        segments.remove(1);
        if let Some(new_boundary) = segments.get_mut(1) {
            new_boundary.turn_instruction = promoted;
        }
    }

    let len = segments.len();
    if len >= 3 && segments[len - 2].duration == 0 {
        let promoted = segments[len - 2].turn_instruction;
        segments.remove(len - 2);
        let new_len = segments.len();
        if new_len >= 2 {
            segments[new_len - 2].turn_instruction = promoted;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::facade::graph::{CsrGraph, RawEdgeRecord};
    use crate::facade::names::NameTable;
    use crate::geo::FixedPointCoordinate;
    use crate::model::{NodeId, INVALID_EDGE_WEIGHT, SPECIAL_NODEID};

    fn facade_with_coords(coords: Vec<FixedPointCoordinate>) -> DataFacade {
        let graph = CsrGraph::new(vec![0; coords.len() + 1], Vec::new());
        DataFacade::from_parts(graph, coords, NameTable::default(), vec![], 0)
    }

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
    fn builds_source_path_target_with_scaled_ends() {
        let facade = facade_with_coords(vec![
            FixedPointCoordinate::from_degrees(0.0, 0.0),
            FixedPointCoordinate::from_degrees(0.0, 1.0),
        ]);
        let source = phantom(0, FixedPointCoordinate::from_degrees(0.0, 0.0), 0.3);
        let target = phantom(1, FixedPointCoordinate::from_degrees(0.0, 1.0), 0.8);
        let path = vec![PathData {
            node: 1,
            name_id: 3,
            duration: 100,
            turn_instruction: TurnInstruction::GoStraight,
        }];
        let segments = build_segments(&facade, &source, &target, &path);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[1].duration, 50);
        assert!(segments.first().unwrap().necessary);
        assert!(segments.last().unwrap().necessary);
        assert_eq!(segments.last().unwrap().turn_instruction, TurnInstruction::ReachedDestination);
    }
}
