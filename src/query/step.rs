//! The single relax-one-node step of the bidirectional search
//! (spec.md §4.3 `RoutingStep`), ported from `BasicRoutingInterface.h`.

use log::debug;

use crate::facade::DataFacade;
use crate::model::{NodeId, Weight};
use crate::query::heap::QueryHeap;

/// Pops the minimum-key node from `heap` and relaxes its outgoing
/// edges in direction `forward`, applying stall-on-demand pruning.
///
/// Returns the node it settled, or `None` once `heap` is empty (the
/// caller's search loop should stop advancing this direction). The
/// alternative-path engine also uses the returned node to collect
/// via-node candidates (spec.md §4.4): any node settled by both heaps
/// is one.
pub fn routing_step(
    facade: &DataFacade,
    forward: bool,
    heap: &mut QueryHeap,
    other_heap: &QueryHeap,
    upper_bound: &mut Weight,
    middle: &mut Option<NodeId>,
) -> Option<NodeId> {
    let (u, key_u) = heap.pop_min()?;
    debug!("routing_step: settling {u} (forward={forward}, key={key_u})");

    if other_heap.was_settled(u) {
        if let Some(other_key) = other_heap.key(u) {
            let candidate = key_u.saturating_add(other_key);
            if candidate >= 0 && candidate < *upper_bound {
                *upper_bound = candidate;
                *middle = Some(u);
            }
        }
    }

    // Stall-on-demand: if a cheaper path into `u` exists via a node
    // already queued in the opposing direction, `u` contributes
    // nothing new and its own outgoing edges are not relaxed.
    for edge in facade.edges_of(u) {
        if !edge.traversable(!forward) {
            continue;
        }
        if let Some(v_key) = heap.key(edge.target) {
            if v_key.saturating_add(edge.weight) < key_u {
                return Some(u);
            }
        }
    }

    for edge in facade.edges_of(u) {
        if !edge.traversable(forward) {
            continue;
        }
        let candidate_key = key_u.saturating_add(edge.weight);
        heap.insert(edge.target, candidate_key, u);
    }

    Some(u)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::facade::graph::{CsrGraph, RawEdgeRecord};
    use crate::facade::names::NameTable;
    use crate::facade::DataFacade;
    use crate::geo::FixedPointCoordinate;

    fn line_facade() -> DataFacade {
        // 0 --100--> 1 --100--> 2, bidirectional.
        let edges = vec![
            RawEdgeRecord::pack(1, 100, 100, 0, true, true, false, 0).unpack(),
            RawEdgeRecord::pack(0, 100, 100, 0, true, true, false, 0).unpack(),
            RawEdgeRecord::pack(2, 100, 100, 0, true, true, false, 0).unpack(),
            RawEdgeRecord::pack(1, 100, 100, 0, true, true, false, 0).unpack(),
        ];
        let graph = CsrGraph::new(vec![0, 1, 3, 4], edges);
        DataFacade::from_parts(
            graph,
            vec![FixedPointCoordinate::default(); 3],
            NameTable::default(),
            vec![],
            0,
        )
    }

    #[test]
    fn meets_in_the_middle() {
        let facade = line_facade();
        let mut fwd = QueryHeap::new();
        let mut rev = QueryHeap::new();
        fwd.insert(0, 0, 0);
        rev.insert(2, 0, 2);

        let mut upper_bound = Weight::MAX;
        let mut middle = None;

        for _ in 0..4 {
            if routing_step(&facade, true, &mut fwd, &rev, &mut upper_bound, &mut middle).is_none() {
                break;
            }
            if routing_step(&facade, false, &mut rev, &fwd, &mut upper_bound, &mut middle).is_none() {
                break;
            }
        }

        assert_eq!(middle, Some(1));
        assert_eq!(upper_bound, 200);
    }
}
