//! Expands a packed path (a node sequence joined by possibly-shortcut
//! edges) into a flat, ground-level `Vec<PathData>` (spec.md §4.5),
//! ported from `BasicRoutingInterface.h`'s `UnpackPath`/`UnpackEdge`.
//!
//! The expansion uses an explicit stack rather than recursion: the
//! upstream engine recurses through `UnpackEdge`, but a long packed
//! path (a cross-country route can pack into a handful of very deep
//! shortcuts) makes that a real stack-overflow risk in a
//! systems re-implementation (spec.md §9).

use crate::facade::DataFacade;
use crate::model::{EdgeData, NodeId, PathData, Weight};
use crate::query::error::RouteError;

/// Finds the single smallest-weight edge from `a` to `b`, trying `a`'s
/// forward edges before `b`'s backward edges (spec.md §4.5 step 2).
fn find_edge(facade: &DataFacade, a: NodeId, b: NodeId) -> Result<EdgeData, RouteError> {
    let mut best: Option<EdgeData> = None;
    for edge in facade.edges_of(a) {
        if edge.target == b && edge.forward {
            if best.is_none_or(|current| edge.weight < current.weight) {
                best = Some(*edge);
            }
        }
    }
    if let Some(edge) = best {
        return Ok(edge);
    }
    for edge in facade.edges_of(b) {
        if edge.target == a && edge.backward {
            if best.is_none_or(|current| edge.weight < current.weight) {
                best = Some(*edge);
            }
        }
    }
    best.ok_or(RouteError::CorruptPackedPath)
}

/// Expands `packed_path` into the ground-level node sequence, one
/// [`PathData`] per surviving original edge.
pub fn unpack(facade: &DataFacade, packed_path: &[NodeId]) -> Result<Vec<PathData>, RouteError> {
    if packed_path.len() < 2 {
        return Ok(Vec::new());
    }

    let mut stack: Vec<(NodeId, NodeId)> = packed_path.windows(2).rev().map(|w| (w[0], w[1])).collect();
    let mut out = Vec::with_capacity(packed_path.len());

    while let Some((a, b)) = stack.pop() {
        let edge = find_edge(facade, a, b)?;
        if edge.is_shortcut {
            stack.push((edge.middle, b));
            stack.push((a, edge.middle));
        } else {
            out.push(PathData {
                node: b,
                name_id: edge.name_id,
                duration: edge.duration,
                turn_instruction: edge.turn_instruction,
            });
        }
    }

    Ok(out)
}

/// Sums the edge weight shared between two packed paths' common
/// prefix and common suffix, used by the alternative-path engine's
/// approximate sharing filter (spec.md §4.4).
///
/// A shortcut's weight already equals the sum of the real edges it
/// replaces (a CH invariant enforced at contraction time), so the
/// shared weight can be summed directly over the packed (not fully
/// unpacked) common prefix/suffix without descending into shortcuts.
pub fn shared_length(
    facade: &DataFacade,
    path_a: &[NodeId],
    path_b: &[NodeId],
) -> Result<Weight, RouteError> {
    let prefix_len = path_a
        .iter()
        .zip(path_b.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut shared: Weight = 0;
    for window in path_a[..prefix_len.min(path_a.len())].windows(2) {
        shared = shared.saturating_add(find_edge(facade, window[0], window[1])?.weight);
    }

    if prefix_len >= path_a.len() || prefix_len >= path_b.len() {
        return Ok(shared);
    }

    let suffix_len = path_a[prefix_len..]
        .iter()
        .rev()
        .zip(path_b[prefix_len..].iter().rev())
        .take_while(|(a, b)| a == b)
        .count();
    let a_suffix = &path_a[path_a.len() - suffix_len..];
    for window in a_suffix.windows(2) {
        shared = shared.saturating_add(find_edge(facade, window[0], window[1])?.weight);
    }

    Ok(shared)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::facade::graph::{CsrGraph, RawEdgeRecord};
    use crate::facade::names::NameTable;
    use crate::facade::DataFacade;
    use crate::geo::FixedPointCoordinate;

    fn shortcut_facade() -> DataFacade {
        // 0 -shortcut(middle=1)-> 2, plus real edges 0->1, 1->2.
        let edges = vec![
            RawEdgeRecord::pack(1, 50, 50, 7, true, false, false, 0).unpack(),
            RawEdgeRecord::pack(2, 100, 100, 9, true, false, true, 1).unpack(),
            RawEdgeRecord::pack(2, 50, 50, 8, true, false, false, 0).unpack(),
        ];
        let graph = CsrGraph::new(vec![0, 2, 3, 3], edges);
        DataFacade::from_parts(
            graph,
            vec![FixedPointCoordinate::default(); 3],
            NameTable::default(),
            vec![],
            0,
        )
    }

    #[test]
    fn expands_a_shortcut_into_its_real_edges() {
        let facade = shortcut_facade();
        let path = unpack(&facade, &[0, 2]).unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(path[0].node, 1);
        assert_eq!(path[0].name_id, 7);
        assert_eq!(path[1].node, 2);
        assert_eq!(path[1].name_id, 8);
    }

    #[test]
    fn missing_edge_is_corrupt_data() {
        let facade = shortcut_facade();
        assert!(matches!(
            unpack(&facade, &[2, 0]),
            Err(RouteError::CorruptPackedPath)
        ));
    }

    #[test]
    fn shared_length_sums_the_common_prefix() {
        let facade = shortcut_facade();
        let shared = shared_length(&facade, &[0, 1, 2], &[0, 1]).unwrap();
        assert_eq!(shared, 50);
    }
}
