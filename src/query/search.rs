//! Bidirectional CH search and multi-leg composition (spec.md §4.3),
//! ported from `ShortestPathRouting.h`/`BasicRoutingInterface.h`.

use std::collections::VecDeque;

use log::info;

use crate::config::EngineConfig;
use crate::facade::DataFacade;
use crate::model::{NodeId, PhantomNodes, Weight, INVALID_EDGE_WEIGHT, SPECIAL_NODEID};
use crate::query::engine_data::SearchEngineData;
use crate::query::error::RouteError;
use crate::query::heap::QueryHeap;
use crate::query::step::routing_step;

/// The packed (shortcut-level) path and length for a whole, possibly
/// multi-leg, route.
#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    pub packed_path: Vec<NodeId>,
    pub length: Weight,
}

pub(crate) fn seed(heap: &mut QueryHeap, node: NodeId, key: Weight) {
    if node != SPECIAL_NODEID {
        // A node is its own parent at the root of a heap's chain;
        // `retrieve_packed_path` uses that to know where to stop.
        heap.insert(node, key, node);
    }
}

/// Runs one bidirectional search to termination (spec.md §4.3 step 5)
/// and returns `(upper_bound, middle)`. `candidates`, if given,
/// collects every node settled by both heaps (spec.md §4.4's via-node
/// candidate list) as it is discovered.
pub(crate) fn run_to_termination(
    facade: &DataFacade,
    forward_heap: &mut QueryHeap,
    reverse_heap: &mut QueryHeap,
    mut upper_bound: Weight,
    offset: Weight,
    mut candidates: Option<&mut Vec<NodeId>>,
) -> (Weight, Option<NodeId>) {
    let mut middle = None;

    loop {
        if forward_heap.is_empty() && reverse_heap.is_empty() {
            break;
        }
        let bound = forward_heap
            .min_key()
            .into_iter()
            .chain(reverse_heap.min_key())
            .min()
            .unwrap_or(Weight::MAX);
        if bound.saturating_sub(offset) > upper_bound {
            break;
        }

        if !forward_heap.is_empty() {
            if let Some(u) = routing_step(facade, true, forward_heap, reverse_heap, &mut upper_bound, &mut middle) {
                if reverse_heap.was_settled(u) {
                    if let Some(list) = candidates.as_deref_mut() {
                        list.push(u);
                    }
                }
            }
        }
        if !reverse_heap.is_empty() {
            if let Some(u) = routing_step(facade, false, reverse_heap, forward_heap, &mut upper_bound, &mut middle) {
                if forward_heap.was_settled(u) {
                    if let Some(list) = candidates.as_deref_mut() {
                        list.push(u);
                    }
                }
            }
        }
    }

    (upper_bound, middle)
}

/// Walks the parent chains of both heaps from `middle` outwards,
/// producing the packed node sequence (spec.md §4.3 "Retrieving the
/// packed path").
pub fn retrieve_packed_path(
    forward_heap: &QueryHeap,
    reverse_heap: &QueryHeap,
    middle: NodeId,
) -> Vec<NodeId> {
    let mut path: VecDeque<NodeId> = VecDeque::new();
    path.push_back(middle);

    let mut node = middle;
    while let Some(parent) = forward_heap.parent(node) {
        if parent == node {
            break;
        }
        path.push_front(parent);
        node = parent;
    }

    let mut node = middle;
    while let Some(parent) = reverse_heap.parent(node) {
        if parent == node {
            break;
        }
        path.push_back(parent);
        node = parent;
    }

    path.into_iter().collect()
}

/// Computes the termination offset for a leg: the largest residual
/// weight on each end, so the bound comparison in
/// [`run_to_termination`] accounts for the phantom's partial edges
/// (spec.md §4.3).
fn leg_offset(leg: &PhantomNodes) -> Weight {
    let source = &leg.source_phantom;
    let target = &leg.target_phantom;
    source
        .forward_weight
        .max(source.reverse_weight)
        .saturating_add(target.forward_weight.max(target.reverse_weight))
}

/// Runs the canonical bidirectional search for a leg, seeded from the
/// source phantom's forward side and both sides of the target
/// phantom. This is the search the alternative-path engine collects
/// its via-node candidates from (spec.md §4.4).
pub(crate) fn primary_bidirectional_search(
    facade: &DataFacade,
    forward_heap: &mut QueryHeap,
    reverse_heap: &mut QueryHeap,
    leg: &PhantomNodes,
    config: &EngineConfig,
    candidates: Option<&mut Vec<NodeId>>,
) -> (Weight, Option<NodeId>) {
    let source = &leg.source_phantom;
    let target = &leg.target_phantom;
    let offset = leg_offset(leg);

    forward_heap.clear();
    reverse_heap.clear();
    seed(forward_heap, source.forward_node, -source.forward_weight);
    seed(reverse_heap, target.forward_node, target.forward_weight);
    seed(reverse_heap, target.reverse_node, target.reverse_weight);

    run_to_termination(
        facade,
        forward_heap,
        reverse_heap,
        config.initial_upper_bound,
        offset,
        candidates,
    )
}

/// Resolves one leg's packed path, trying both sides of a
/// bidirectional source phantom as independent candidates and
/// returning the cheaper (spec.md §4.3 "Multi-leg composition";
/// SPEC_FULL §3 "two-candidate... composition").
///
/// The target phantom's two sides (if bidirectional) are merged into
/// a single reverse-heap seeding rather than split into their own
/// candidate, since standard multi-source Dijkstra already picks the
/// cheaper target side with no extra bookkeeping.
fn search_leg(
    facade: &DataFacade,
    engine: &mut SearchEngineData,
    leg: &PhantomNodes,
    config: &EngineConfig,
) -> (Weight, Vec<NodeId>) {
    let source = &leg.source_phantom;
    let target = &leg.target_phantom;

    let (bound1, middle1) = primary_bidirectional_search(
        facade,
        &mut engine.forward_heap_1,
        &mut engine.reverse_heap_1,
        leg,
        config,
        None,
    );

    let candidate1 = middle1.map(|m| {
        (
            bound1,
            retrieve_packed_path(&engine.forward_heap_1, &engine.reverse_heap_1, m),
        )
    });

    let candidate2 = if source.is_bidirectional() {
        engine.forward_heap_2.clear();
        engine.reverse_heap_2.clear();
        seed(&mut engine.forward_heap_2, source.reverse_node, -source.reverse_weight);
        seed(&mut engine.reverse_heap_2, target.forward_node, target.forward_weight);
        seed(&mut engine.reverse_heap_2, target.reverse_node, target.reverse_weight);

        let (bound2, middle2) = run_to_termination(
            facade,
            &mut engine.forward_heap_2,
            &mut engine.reverse_heap_2,
            config.initial_upper_bound,
            leg_offset(leg),
            None,
        );
        middle2.map(|m| {
            (
                bound2,
                retrieve_packed_path(&engine.forward_heap_2, &engine.reverse_heap_2, m),
            )
        })
    } else {
        None
    };

    match (candidate1, candidate2) {
        (Some(c1), Some(c2)) => {
            if c2.0 < c1.0 {
                c2
            } else {
                c1
            }
        }
        (Some(c1), None) => c1,
        (None, Some(c2)) => c2,
        (None, None) => (INVALID_EDGE_WEIGHT, Vec::new()),
    }
}

/// Runs the bidirectional search over every leg of a (possibly
/// multi-point) route and splices the packed paths, dropping the
/// duplicate node at each leg boundary.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(facade, engine)))]
pub fn shortest_path(
    facade: &DataFacade,
    engine: &mut SearchEngineData,
    legs: &[PhantomNodes],
    config: &EngineConfig,
) -> Result<SearchResult, RouteError> {
    if legs.is_empty() {
        return Err(RouteError::NotEnoughCoordinates);
    }

    let mut total_length: Weight = 0;
    let mut packed_path: Vec<NodeId> = Vec::new();
    let mut any_leg_found = false;

    for (index, leg) in legs.iter().enumerate() {
        let (length, leg_path) = search_leg(facade, engine, leg, config);

        if length == INVALID_EDGE_WEIGHT || leg_path.is_empty() {
            continue;
        }
        any_leg_found = true;
        total_length = total_length.saturating_add(length);

        if index > 0 && packed_path.last() == leg_path.first() {
            packed_path.extend(leg_path.into_iter().skip(1));
        } else {
            packed_path.extend(leg_path);
        }
    }

    if !any_leg_found {
        info!("no leg of the route found a path; reporting unreachable");
        return Err(RouteError::Unreachable);
    }

    Ok(SearchResult {
        packed_path,
        length: total_length,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::facade::graph::{CsrGraph, RawEdgeRecord};
    use crate::facade::names::NameTable;
    use crate::facade::DataFacade;
    use crate::geo::FixedPointCoordinate;
    use crate::model::PhantomNode;

    fn line_facade() -> DataFacade {
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

    fn phantom_at(node: NodeId) -> PhantomNode {
        PhantomNode {
            forward_node: node,
            reverse_node: SPECIAL_NODEID,
            name_id: 0,
            forward_weight: 0,
            reverse_weight: INVALID_EDGE_WEIGHT,
            location: FixedPointCoordinate::default(),
            ratio: 0.0,
        }
    }

    #[test]
    fn finds_shortest_path_across_single_leg() {
        let facade = line_facade();
        let mut engine = SearchEngineData::new();
        let legs = vec![PhantomNodes {
            source_phantom: phantom_at(0),
            target_phantom: phantom_at(2),
        }];
        let result = shortest_path(&facade, &mut engine, &legs, &EngineConfig::default()).unwrap();
        assert_eq!(result.length, 200);
        assert_eq!(result.packed_path, vec![0, 1, 2]);
    }

    #[test]
    fn disconnected_graph_is_unreachable() {
        let edges = vec![RawEdgeRecord::pack(1, 100, 100, 0, true, true, false, 0).unpack()];
        let graph = CsrGraph::new(vec![0, 1, 1, 1], edges);
        let facade = DataFacade::from_parts(
            graph,
            vec![FixedPointCoordinate::default(); 3],
            NameTable::default(),
            vec![],
            0,
        );
        let mut engine = SearchEngineData::new();
        let legs = vec![PhantomNodes {
            source_phantom: phantom_at(0),
            target_phantom: phantom_at(2),
        }];
        let err = shortest_path(&facade, &mut engine, &legs, &EngineConfig::default()).unwrap_err();
        assert!(matches!(err, RouteError::Unreachable));
    }
}
