//! Computes one admissible alternative path via a via-node approach
//! over the contraction hierarchy (spec.md §4.4), ported from the
//! `AlternativeRouting` helper.
//!
//! Candidate collection reuses [`crate::query::primary_bidirectional_search`]
//! with its `candidates` list enabled, so the alternative engine never
//! runs a duplicate of the shortest-path search. The approximate
//! pre-filter and the exact ranking pass share one helper
//! ([`unpack::shared_length`]) rather than two, because a settled
//! heap key in this facade's model is already the exact shortest
//! distance to that node (the CH bidirectional-search invariant), so
//! the "half-searches rooted at v" the distilled spec describes for
//! exact ranking reduce to reading `forward_heap.key(v)` and
//! `reverse_heap.key(v)` directly — no second search is needed.

use log::debug;

use crate::config::EngineConfig;
use crate::facade::DataFacade;
use crate::model::{NodeId, PhantomNodes, Weight};
use crate::query::engine_data::SearchEngineData;
use crate::query::error::RouteError;
use crate::query::heap::QueryHeap;
use crate::query::search::{primary_bidirectional_search, retrieve_packed_path, SearchResult};
use crate::unpack;

/// One via-node surviving both the approximate pre-filter and exact
/// ranking, scored by `2*length + sharing` (lower is better).
struct Survivor {
    packed_path: Vec<NodeId>,
    length: Weight,
    score: Weight,
}

/// Computes a single admissible alternative for `leg`, if one exists.
///
/// Returns `Ok(None)` when the leg itself has no path, or when no
/// via-node candidate survives the admissibility bounds — both are
/// non-fatal outcomes (spec.md §4.6 callers already expect an
/// `Option`); an unpacking failure over corrupt preprocessing data is
/// the only hard error.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(facade, engine)))]
pub fn compute(
    facade: &DataFacade,
    engine: &mut SearchEngineData,
    leg: &PhantomNodes,
    config: &EngineConfig,
) -> Result<Option<SearchResult>, RouteError> {
    let mut candidates: Vec<NodeId> = Vec::new();
    let (upper_bound, middle) = primary_bidirectional_search(
        facade,
        &mut engine.forward_heap_1,
        &mut engine.reverse_heap_1,
        leg,
        config,
        Some(&mut candidates),
    );

    let Some(middle) = middle else {
        return Ok(None);
    };

    let shortest_packed =
        retrieve_packed_path(&engine.forward_heap_1, &engine.reverse_heap_1, middle);

    candidates.sort_unstable();
    candidates.dedup();

    let mut best: Option<Survivor> = None;
    for v in candidates {
        if v == middle {
            continue;
        }
        if let Some(survivor) = evaluate_candidate(
            facade,
            &engine.forward_heap_1,
            &engine.reverse_heap_1,
            &shortest_packed,
            v,
            upper_bound,
            config,
        )? {
            let better = match &best {
                None => true,
                Some(current) => survivor.score < current.score,
            };
            if better {
                best = Some(survivor);
            }
        }
    }

    Ok(best.map(|survivor| SearchResult {
        packed_path: survivor.packed_path,
        length: survivor.length,
    }))
}

/// Applies the approximate pre-filter and (in this model, equivalent)
/// exact ranking bounds to one via-node candidate.
fn evaluate_candidate(
    facade: &DataFacade,
    forward_heap: &QueryHeap,
    reverse_heap: &QueryHeap,
    shortest_packed: &[NodeId],
    v: NodeId,
    upper_bound: Weight,
    config: &EngineConfig,
) -> Result<Option<Survivor>, RouteError> {
    let (Some(fwd_key), Some(rev_key)) = (forward_heap.key(v), reverse_heap.key(v)) else {
        return Ok(None);
    };
    let length = fwd_key.saturating_add(rev_key);

    let length_bound = (upper_bound as f64 * config.length_bound_factor) as Weight;
    if length >= length_bound {
        return Ok(None);
    }

    let candidate_packed = retrieve_packed_path(forward_heap, reverse_heap, v);
    let sharing = unpack::shared_length(facade, shortest_packed, &candidate_packed)?;

    let sharing_bound = (upper_bound as f64 * config.sharing_bound_factor) as Weight;
    if sharing > sharing_bound {
        return Ok(None);
    }

    let stretch_bound = (config.length_bound_factor * (upper_bound - sharing) as f64) as Weight;
    if length - sharing >= stretch_bound {
        return Ok(None);
    }

    debug!("alternative candidate {v} admissible: length={length}, sharing={sharing}");

    Ok(Some(Survivor {
        score: 2 * length + sharing,
        packed_path: candidate_packed,
        length,
    }))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::facade::graph::{CsrGraph, RawEdgeRecord};
    use crate::facade::names::NameTable;
    use crate::geo::FixedPointCoordinate;
    use crate::model::{PhantomNode, INVALID_EDGE_WEIGHT, SPECIAL_NODEID};

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

    /// A diamond: 0 -> {1, 2} -> 3, with the 0-1-3 path cheaper than
    /// 0-2-3, so a single admissible alternative should surface
    /// through via-node 2.
    fn diamond_facade() -> DataFacade {
        let edges = vec![
            RawEdgeRecord::pack(1, 10, 10, 0, true, false, false, 0).unpack(),
            RawEdgeRecord::pack(2, 11, 11, 0, true, false, false, 0).unpack(),
            RawEdgeRecord::pack(3, 10, 10, 0, true, false, false, 0).unpack(),
            RawEdgeRecord::pack(3, 11, 11, 0, true, false, false, 0).unpack(),
            RawEdgeRecord::pack(1, 10, 10, 0, false, true, false, 0).unpack(),
            RawEdgeRecord::pack(2, 11, 11, 0, false, true, false, 0).unpack(),
            RawEdgeRecord::pack(0, 10, 10, 0, false, true, false, 0).unpack(),
            RawEdgeRecord::pack(0, 11, 11, 0, false, true, false, 0).unpack(),
        ];
        let graph = CsrGraph::new(vec![0, 2, 4, 6, 8], edges);
        DataFacade::from_parts(
            graph,
            vec![FixedPointCoordinate::default(); 4],
            NameTable::default(),
            vec![],
            0,
        )
    }

    #[test]
    fn finds_an_admissible_alternative_through_the_diamond() {
        let facade = diamond_facade();
        let mut engine = SearchEngineData::new();
        let leg = PhantomNodes {
            source_phantom: phantom_at(0),
            target_phantom: phantom_at(3),
        };
        let config = EngineConfig::default();
        let alt = compute(&facade, &mut engine, &leg, &config).unwrap();
        let alt = alt.expect("an admissible alternative exists");
        assert_eq!(alt.length, 22);
        assert_eq!(alt.packed_path, vec![0, 2, 3]);
    }

    #[test]
    fn no_alternative_when_only_one_path_exists() {
        let edges = vec![
            RawEdgeRecord::pack(1, 10, 10, 0, true, false, false, 0).unpack(),
            RawEdgeRecord::pack(0, 10, 10, 0, false, true, false, 0).unpack(),
        ];
        let graph = CsrGraph::new(vec![0, 1, 2], edges);
        let facade = DataFacade::from_parts(
            graph,
            vec![FixedPointCoordinate::default(); 2],
            NameTable::default(),
            vec![],
            0,
        );
        let mut engine = SearchEngineData::new();
        let leg = PhantomNodes {
            source_phantom: phantom_at(0),
            target_phantom: phantom_at(1),
        };
        let alt = compute(&facade, &mut engine, &leg, &EngineConfig::default()).unwrap();
        assert!(alt.is_none());
    }
}
