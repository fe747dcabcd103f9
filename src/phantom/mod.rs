//! Snaps a request coordinate to the road graph (spec.md §4.2).
//!
//! A [`crate::model::PhantomNode`] names two residual weights, not one
//! weight and a ratio, because the search core needs to seed its
//! heaps with the *already-consumed* cost of both directions
//! independently — see [`crate::query`].

pub mod error;
pub mod hint;

use log::warn;

pub use error::PhantomError;
pub use hint::{decode_hint, encode_hint};

use crate::facade::DataFacade;
use crate::geo::FixedPointCoordinate;
use crate::model::{PhantomNode, Weight, INVALID_EDGE_WEIGHT, SPECIAL_NODEID};

/// Resolves a coordinate (and optional hint) against a facade.
///
/// If `hint` decodes and its checksum matches `facade`'s, it is
/// trusted outright — no R-tree lookup is performed. Otherwise (no
/// hint, malformed hint, or checksum mismatch) the coordinate is
/// snapped to the nearest edge via the facade's R-tree.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(facade)))]
pub fn resolve(
    facade: &DataFacade,
    coordinate: FixedPointCoordinate,
    hint: Option<&str>,
) -> Result<PhantomNode, PhantomError> {
    if let Some(hint) = hint {
        match decode_hint(hint) {
            Some((node, checksum)) if facade.verify_checksum(checksum) => {
                if node.is_valid(facade.number_of_nodes()) {
                    return Ok(node);
                }
                warn!("hint decoded but named an out-of-range node; falling back to R-tree");
            }
            Some(_) => warn!("hint checksum mismatch; discarding hint and re-snapping"),
            None => warn!("malformed hint; discarding and re-snapping"),
        }
    }

    snap(facade, coordinate)
}

fn snap(facade: &DataFacade, coordinate: FixedPointCoordinate) -> Result<PhantomNode, PhantomError> {
    let projection = facade
        .nearest_edge(coordinate)
        .ok_or(PhantomError::Unreachable)?;

    let forward_weight = if projection.edge.forward_weight >= 0 {
        (projection.edge.forward_weight as f64 * projection.ratio).round() as Weight
    } else {
        INVALID_EDGE_WEIGHT
    };
    let reverse_weight = if projection.edge.reverse_weight >= 0 {
        (projection.edge.reverse_weight as f64 * (1.0 - projection.ratio)).round() as Weight
    } else {
        INVALID_EDGE_WEIGHT
    };

    let reverse_node = if projection.edge.reverse_weight >= 0 {
        projection.edge.target_node
    } else {
        SPECIAL_NODEID
    };

    Ok(PhantomNode {
        forward_node: projection.edge.source_node,
        reverse_node,
        name_id: projection.edge.name_id,
        forward_weight,
        reverse_weight,
        location: projection.location,
        ratio: projection.ratio,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::facade::graph::{CsrGraph, RawEdgeRecord};
    use crate::facade::names::NameTable;
    use crate::facade::rtree::EdgeBox;
    use geo::Point;

    fn two_node_facade() -> DataFacade {
        let coordinates = vec![
            FixedPointCoordinate::from_degrees(0.0, 0.0),
            FixedPointCoordinate::from_degrees(0.0, 0.01),
        ];
        let graph = CsrGraph::new(
            vec![0, 1, 1],
            vec![RawEdgeRecord::pack(1, 100, 100, 0, true, true, false, 0).unpack()],
        );
        let edges_for_index = vec![EdgeBox {
            edge_id: 0,
            source_node: 0,
            target_node: 1,
            source: coordinates[0].to_point(),
            target: coordinates[1].to_point(),
            name_id: 0,
            forward_weight: 100,
            reverse_weight: 100,
        }];
        DataFacade::from_parts(
            graph,
            coordinates,
            NameTable::from_names(["Test Street"]),
            edges_for_index,
            0xCAFE,
        )
    }

    #[test]
    fn snaps_onto_nearest_edge_with_expected_ratio() {
        let facade = two_node_facade();
        let midpoint = FixedPointCoordinate::from(Point::new(0.005, 0.0));
        let phantom = resolve(&facade, midpoint, None).expect("resolves");
        assert!((phantom.ratio - 0.5).abs() < 0.1);
        assert_eq!(phantom.forward_node, 0);
        assert_eq!(phantom.reverse_node, 1);
    }

    #[test]
    fn trusts_a_valid_matching_hint() {
        let facade = two_node_facade();
        let node = PhantomNode {
            forward_node: 0,
            reverse_node: 1,
            name_id: 0,
            forward_weight: 30,
            reverse_weight: 70,
            location: FixedPointCoordinate::from_degrees(0.0, 0.003),
            ratio: 0.3,
        };
        let hint = encode_hint(&node, facade.get_checksum());
        let resolved = resolve(&facade, node.location, Some(&hint)).expect("resolves");
        assert_eq!(resolved.forward_weight, 30);
        assert_eq!(resolved.reverse_weight, 70);
    }

    #[test]
    fn falls_back_when_checksum_mismatches() {
        let facade = two_node_facade();
        let node = PhantomNode {
            forward_node: 0,
            reverse_node: 1,
            name_id: 0,
            forward_weight: 999,
            reverse_weight: 999,
            location: FixedPointCoordinate::from_degrees(0.0, 0.005),
            ratio: 0.5,
        };
        let hint = encode_hint(&node, 0x1234);
        let resolved = resolve(&facade, node.location, Some(&hint)).expect("resolves");
        assert_ne!(resolved.forward_weight, 999);
    }
}
