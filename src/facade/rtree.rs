use geo::{Destination, Geodesic, Haversine, InterpolatableLine, Line, LineLocatePoint, Point};
use rstar::{RTree, AABB};

use crate::geo::FixedPointCoordinate;
use crate::model::{EdgeId, NodeId};

/// One node-based-graph edge as the static R-tree sees it: its two
/// endpoints, in map space, plus enough identity to rebuild a
/// [`crate::model::PhantomNode`] once a query lands on it.
///
/// Mirrors the upstream facade's edge R-tree, which indexes the
/// *node-based* graph (not the edge-based CH graph the search runs
/// over) precisely so that phantom resolution can split an original
/// road segment rather than a shortcut.
#[derive(Debug, Clone, Copy)]
pub struct EdgeBox {
    pub edge_id: EdgeId,
    pub source_node: NodeId,
    pub target_node: NodeId,
    pub source: Point<f64>,
    pub target: Point<f64>,
    pub name_id: u32,
    pub forward_weight: i32,
    pub reverse_weight: i32,
}

impl rstar::RTreeObject for EdgeBox {
    type Envelope = AABB<Point<f64>>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.source, self.target)
    }
}

impl rstar::PointDistance for EdgeBox {
    fn distance_2(&self, point: &Point<f64>) -> f64 {
        let line = Line::new(self.source, self.target);
        let ratio = line.line_locate_point(point).unwrap_or(0.0).clamp(0.0, 1.0);
        let projected = line.point_at_ratio_from_start(&Haversine, ratio);
        let d = Haversine.distance(projected, *point);
        d * d
    }
}

/// Static spatial index over the node-based edges, used by the
/// phantom-node resolver's R-tree fallback (spec.md §4.1/§4.2).
#[derive(Debug, Default)]
pub struct EdgeIndex {
    tree: RTree<EdgeBox>,
}

/// Projection of a query point onto its nearest edge: the edge
/// itself, the projected location, and `ratio` (the fraction of the
/// edge's length already traversed at the projection).
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    pub edge: EdgeBox,
    pub location: FixedPointCoordinate,
    pub ratio: f64,
}

impl EdgeIndex {
    pub fn bulk_load(edges: Vec<EdgeBox>) -> Self {
        EdgeIndex {
            tree: RTree::bulk_load(edges),
        }
    }

    /// Finds the closest edge to `point`, ties broken by smallest
    /// edge-id (spec.md §4.2), and projects `point` onto it.
    pub fn nearest(&self, point: Point<f64>) -> Option<Projection> {
        let radius = 5_000.0;
        let bottom_right = Geodesic.destination(point, 135.0, radius);
        let top_left = Geodesic.destination(point, 315.0, radius);
        let bbox = AABB::from_corners(top_left, bottom_right);

        let mut candidates: Vec<&EdgeBox> = self.tree.locate_in_envelope(&bbox).collect();
        if candidates.is_empty() {
            candidates = self.tree.iter().collect();
        }

        candidates
            .into_iter()
            .map(|edge| {
                let line = Line::new(edge.source, edge.target);
                let ratio = line.line_locate_point(&point).unwrap_or(0.0).clamp(0.0, 1.0);
                let projected = line.point_at_ratio_from_start(&Haversine, ratio);
                let dist = Haversine.distance(projected, point);
                (edge, ratio, projected, dist)
            })
            .min_by(|a, b| {
                a.3.partial_cmp(&b.3)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.0.edge_id.cmp(&b.0.edge_id))
            })
            .map(|(edge, ratio, projected, _)| Projection {
                edge: *edge,
                location: FixedPointCoordinate::from(projected),
                ratio,
            })
    }
}
