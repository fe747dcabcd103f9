use zerocopy::{FromBytes, Immutable, KnownLayout};

use crate::model::{EdgeData, EdgeId, NameId, NodeId, TurnInstruction, Weight};

const FORWARD_BIT: u8 = 0b001;
const BACKWARD_BIT: u8 = 0b010;
const SHORTCUT_BIT: u8 = 0b100;

/// On-disk representation of one `EdgeData` (spec.md §6, `.osrm.hsgr`):
/// a fixed byte layout read directly out of the mapped file, no
/// per-field deserialisation pass.
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct RawEdgeRecord {
    pub target: u32,
    pub weight: i32,
    pub duration: i32,
    pub name_id: u32,
    pub middle: u32,
    pub flags: u8,
    _pad: [u8; 3],
}

impl RawEdgeRecord {
    pub fn pack(
        target: NodeId,
        weight: Weight,
        duration: Weight,
        name_id: NameId,
        forward: bool,
        backward: bool,
        is_shortcut: bool,
        middle: NodeId,
    ) -> Self {
        let mut flags = 0u8;
        if forward {
            flags |= FORWARD_BIT;
        }
        if backward {
            flags |= BACKWARD_BIT;
        }
        if is_shortcut {
            flags |= SHORTCUT_BIT;
        }
        RawEdgeRecord {
            target,
            weight,
            duration,
            name_id,
            middle,
            flags,
            _pad: [0; 3],
        }
    }

    pub fn unpack(&self) -> EdgeData {
        EdgeData {
            target: self.target,
            weight: self.weight,
            duration: self.duration,
            name_id: self.name_id,
            forward: self.flags & FORWARD_BIT != 0,
            backward: self.flags & BACKWARD_BIT != 0,
            is_shortcut: self.flags & SHORTCUT_BIT != 0,
            middle: self.middle,
            // The turn instruction a non-shortcut edge carries is not
            // part of the CH metric file; it is joined in from the
            // geometry file when the unpacker builds `PathData`. The
            // facade itself only ever hands out `NoTurn` here.
            turn_instruction: TurnInstruction::NoTurn,
        }
    }
}

/// The CSR (compressed sparse row) edge-based graph: `first_edge[n]`
/// is the first index into `edges` for node `n`'s outgoing edges, and
/// `first_edge[n+1]` is one past the last. This is the in-memory form
/// the facade exposes regardless of whether it was built by mapping a
/// `.osrm.hsgr` file or assembled in memory by [`super::DataFacade::from_parts`].
#[derive(Debug, Clone)]
pub struct CsrGraph {
    first_edge: Vec<EdgeId>,
    edges: Vec<EdgeData>,
}

impl CsrGraph {
    pub fn new(first_edge: Vec<EdgeId>, edges: Vec<EdgeData>) -> Self {
        debug_assert!(first_edge.windows(2).all(|w| w[0] <= w[1]));
        CsrGraph { first_edge, edges }
    }

    pub fn number_of_nodes(&self) -> u32 {
        self.first_edge.len().saturating_sub(1) as u32
    }

    pub fn number_of_edges(&self) -> u32 {
        self.edges.len() as u32
    }

    #[inline]
    pub fn begin_edges(&self, node: NodeId) -> EdgeId {
        self.first_edge[node as usize]
    }

    #[inline]
    pub fn end_edges(&self, node: NodeId) -> EdgeId {
        self.first_edge[node as usize + 1]
    }

    #[inline]
    pub fn edges_of(&self, node: NodeId) -> &[EdgeData] {
        &self.edges[self.begin_edges(node) as usize..self.end_edges(node) as usize]
    }

    #[inline]
    pub fn edge(&self, edge: EdgeId) -> &EdgeData {
        &self.edges[edge as usize]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn round_trips_through_raw_record() {
        let raw = RawEdgeRecord::pack(7, 120, 90, 3, true, false, true, 4);
        let edge = raw.unpack();
        assert_eq!(edge.target, 7);
        assert_eq!(edge.weight, 120);
        assert!(edge.forward);
        assert!(!edge.backward);
        assert!(edge.is_shortcut);
        assert_eq!(edge.middle, 4);
    }

    #[test]
    fn csr_ranges_are_contiguous() {
        let graph = CsrGraph::new(
            vec![0, 2, 2, 3],
            vec![
                RawEdgeRecord::pack(1, 1, 1, 0, true, false, false, 0).unpack(),
                RawEdgeRecord::pack(2, 1, 1, 0, true, false, false, 0).unpack(),
                RawEdgeRecord::pack(0, 1, 1, 0, true, false, false, 0).unpack(),
            ],
        );
        assert_eq!(graph.number_of_nodes(), 3);
        assert_eq!(graph.edges_of(0).len(), 2);
        assert_eq!(graph.edges_of(1).len(), 0);
        assert_eq!(graph.edges_of(2).len(), 1);
    }
}
