//! Core identifiers and value types shared by every component of the
//! query engine: the facade, the phantom-node resolver, the search
//! core, the unpacker and the description pipeline all speak the same
//! `NodeId`/`EdgeId`/`Weight` vocabulary so none of them need to
//! convert between private representations at their seams.

use crate::geo::FixedPointCoordinate;

/// Dense index into the edge-based graph's node array.
pub type NodeId = u32;

/// Dense index into the edge-based graph's edge array.
pub type EdgeId = u32;

/// Index into the name blob's offset table.
pub type NameId = u32;

/// A (possibly CH-scaled) edge weight, in the same units as duration
/// (deciseconds). Negative values occur transiently as heap keys when
/// a phantom's residual weight is subtracted before a search starts.
pub type Weight = i32;

/// Sentinel `NodeId` meaning "no such node" (`SPECIAL_NODEID` upstream).
pub const SPECIAL_NODEID: NodeId = NodeId::MAX;

/// Sentinel `EdgeId` meaning "no such edge" (`SPECIAL_EDGEID` upstream).
pub const SPECIAL_EDGEID: EdgeId = EdgeId::MAX;

/// Sentinel weight reported for a leg that has no path at all.
pub const INVALID_EDGE_WEIGHT: Weight = Weight::MAX;

/// One directed edge of the contracted, edge-based graph.
///
/// When `is_shortcut` is set, `middle` names the node the shortcut was
/// contracted through; the unpacker recurses on `(source, middle)` and
/// `(middle, target)` rather than emitting this edge directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeData {
    pub target: NodeId,
    pub weight: Weight,
    pub duration: Weight,
    pub name_id: NameId,
    pub forward: bool,
    pub backward: bool,
    pub is_shortcut: bool,
    pub middle: NodeId,
    pub turn_instruction: TurnInstruction,
}

impl EdgeData {
    /// Whether this edge may be traversed in the direction the search
    /// is currently relaxing (`true` = forward heap, `false` = reverse
    /// heap).
    pub fn traversable(&self, forward: bool) -> bool {
        if forward {
            self.forward
        } else {
            self.backward
        }
    }
}

/// A coordinate snapped onto a directed edge of the node-based graph.
///
/// `forward_weight`/`reverse_weight` are the residual weights of the
/// two halves of the edge the phantom splits (`w1`/`w2` in spec
/// terms); for a one-way edge the unusable half carries
/// [`INVALID_EDGE_WEIGHT`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhantomNode {
    /// The edge-based-node id used to seed the forward-direction
    /// search. Always valid when the phantom itself is valid.
    pub forward_node: NodeId,
    /// The twin edge-based-node id used to seed the reverse-direction
    /// search on a bidirectional edge; [`SPECIAL_NODEID`] on a
    /// strictly one-way edge.
    pub reverse_node: NodeId,
    pub name_id: NameId,
    pub forward_weight: Weight,
    pub reverse_weight: Weight,
    pub location: FixedPointCoordinate,
    pub ratio: f64,
}

impl PhantomNode {
    pub fn is_valid(&self, node_count: u32) -> bool {
        self.forward_node < node_count || self.reverse_node < node_count
    }

    pub fn is_bidirectional(&self) -> bool {
        self.forward_node != SPECIAL_NODEID && self.reverse_node != SPECIAL_NODEID
    }
}

/// The pair of phantoms bounding one leg of a (possibly multi-point)
/// route.
#[derive(Debug, Clone, Copy)]
pub struct PhantomNodes {
    pub source_phantom: PhantomNode,
    pub target_phantom: PhantomNode,
}

/// One original-graph node surviving path unpacking, annotated with
/// enough information for the description pipeline to build a segment
/// from it.
#[derive(Debug, Clone, Copy)]
pub struct PathData {
    pub node: NodeId,
    pub name_id: NameId,
    pub duration: Weight,
    pub turn_instruction: TurnInstruction,
}

/// One annotated geometry vertex, built by the description pipeline
/// from a [`PathData`] (or a leg's phantom endpoints) and carried
/// through simplification, polyline encoding and instruction
/// synthesis.
#[derive(Debug, Clone, Copy)]
pub struct SegmentInformation {
    pub location: FixedPointCoordinate,
    pub name_id: NameId,
    /// Great-circle length, in meters, from the previous segment.
    pub length: f64,
    pub duration: Weight,
    /// Azimuth in degrees `[0, 360)` towards the next segment.
    pub bearing: f64,
    pub turn_instruction: TurnInstruction,
    /// Whether this vertex survives geometry simplification.
    /// Endpoints are always necessary (spec.md §3 invariant).
    pub necessary: bool,
}

/// Turn instructions the description pipeline may attach to a
/// segment. `NoTurn` is the default and is never emitted as a visible
/// instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnInstruction {
    NoTurn,
    GoStraight,
    TurnSlightRight,
    TurnRight,
    TurnSharpRight,
    UTurn,
    TurnSharpLeft,
    TurnLeft,
    TurnSlightLeft,
    HeadOn,
    EnterRoundabout,
    StayOnRoundabout,
    LeaveRoundabout,
    ReachedVia,
    ReachedDestination,
}

impl TurnInstruction {
    /// Whether this instruction is one of the turns the description
    /// pipeline surfaces in `route_instructions` (spec.md §4.6); plain
    /// `NoTurn` waypoints are dropped.
    pub fn is_visible(self) -> bool {
        !matches!(self, TurnInstruction::NoTurn)
    }

    pub fn is_roundabout(self) -> bool {
        matches!(
            self,
            TurnInstruction::EnterRoundabout
                | TurnInstruction::StayOnRoundabout
                | TurnInstruction::LeaveRoundabout
        )
    }
}
