//! Read-only view over the preprocessed graph (spec.md §4.1).
//!
//! Everything else — the phantom resolver, the search core, the
//! unpacker, the description pipeline — only ever talks to the graph
//! through [`DataFacade`]. The backing arrays are immutable once
//! built, so a `DataFacade` is `Send + Sync` and is shared across
//! worker threads without locking.

pub mod error;
pub mod fingerprint;
pub mod graph;
pub mod names;
pub mod rtree;

use std::fs::File;
use std::path::Path;

use geo::Point;
use memmap2::Mmap;
use zerocopy::FromBytes;

pub use error::FacadeError;
pub use fingerprint::Fingerprint;

use crate::facade::graph::{CsrGraph, RawEdgeRecord};
use crate::facade::names::NameTable;
use crate::facade::rtree::{EdgeBox, EdgeIndex, Projection};
use crate::geo::FixedPointCoordinate;
use crate::model::{EdgeData, EdgeId, NameId, NodeId};

/// A fully loaded, read-only preprocessed graph.
pub struct DataFacade {
    graph: CsrGraph,
    coordinates: Vec<FixedPointCoordinate>,
    names: NameTable,
    edge_index: EdgeIndex,
    checksum: u32,
}

impl DataFacade {
    /// Assembles a facade from in-memory parts. This is the path unit
    /// tests and `testutil` use; `open` is the path a long-running
    /// process uses against real `.osrm.*` files.
    pub fn from_parts(
        graph: CsrGraph,
        coordinates: Vec<FixedPointCoordinate>,
        names: NameTable,
        edges_for_index: Vec<EdgeBox>,
        checksum: u32,
    ) -> Self {
        DataFacade {
            graph,
            coordinates,
            names,
            edge_index: EdgeIndex::bulk_load(edges_for_index),
            checksum,
        }
    }

    /// Opens the preprocessed graph from a directory holding the
    /// `<base>.osrm.hsgr`, `.osrm.nodes`, `.osrm.names` and
    /// `.osrm.fileIndex` files (spec.md §6), memory-mapping each and
    /// validating their fingerprints.
    ///
    /// The node/edge/name records are read directly out of the
    /// mapping via `zerocopy`, without a deserialisation pass; this
    /// function only fails if a file is missing, a fingerprint
    /// mismatches, or a length is inconsistent with its header.
    pub fn open(base_path: &Path) -> Result<Self, FacadeError> {
        let hsgr = map_file(&base_path.with_extension("osrm.hsgr"))?;
        let nodes = map_file(&base_path.with_extension("osrm.nodes"))?;
        let names = map_file(&base_path.with_extension("osrm.names"))?;

        let (fingerprint, rest) = Fingerprint::read_from_prefix(&hsgr[..])
            .map_err(|_| FacadeError::CorruptData("hsgr file too short for fingerprint".into()))?;
        fingerprint.validate()?;

        let mut cursor = rest;
        let checksum = take_u32(&mut cursor)?;
        let num_nodes = take_u32(&mut cursor)? as usize;
        let num_edges = take_u32(&mut cursor)? as usize;

        let first_edge = take_u32_slice(&mut cursor, num_nodes + 1)?;
        let (records, _) = <[RawEdgeRecord]>::ref_from_prefix_with_elems(cursor, num_edges)
            .map_err(|_| FacadeError::CorruptData("hsgr edge array truncated".into()))?;
        let edges: Vec<EdgeData> = records.iter().map(RawEdgeRecord::unpack).collect();

        let (node_fingerprint, node_rest) = Fingerprint::read_from_prefix(&nodes[..])
            .map_err(|_| FacadeError::CorruptData("nodes file too short for fingerprint".into()))?;
        node_fingerprint.validate()?;
        let (raw_coords, _) =
            <[RawCoordinate]>::ref_from_prefix_with_elems(node_rest, num_nodes)
                .map_err(|_| FacadeError::CorruptData("node coordinate array truncated".into()))?;
        let coordinates = raw_coords
            .iter()
            .map(|c| FixedPointCoordinate::new(c.lat, c.lon))
            .collect();

        let (name_fingerprint, name_rest) = Fingerprint::read_from_prefix(&names[..])
            .map_err(|_| FacadeError::CorruptData("names file too short for fingerprint".into()))?;
        name_fingerprint.validate()?;
        let blob_len = take_u32_from(&name_rest[..4])? as usize;
        let blob = name_rest[4..4 + blob_len].to_vec();
        let offsets_bytes = &name_rest[4 + blob_len..];
        let offsets = offsets_bytes
            .chunks_exact(4)
            .map(|c| u32::from_ne_bytes(c.try_into().unwrap()))
            .collect();
        let name_table = NameTable::new(blob, offsets);

        let edge_boxes = build_edge_index(&first_edge, &edges, &coordinates);

        Ok(DataFacade {
            graph: CsrGraph::new(first_edge, edges),
            coordinates,
            names: name_table,
            edge_index: EdgeIndex::bulk_load(edge_boxes),
            checksum,
        })
    }

    pub fn number_of_nodes(&self) -> u32 {
        self.graph.number_of_nodes()
    }

    pub fn begin_edges(&self, node: NodeId) -> EdgeId {
        self.graph.begin_edges(node)
    }

    pub fn end_edges(&self, node: NodeId) -> EdgeId {
        self.graph.end_edges(node)
    }

    pub fn edges_of(&self, node: NodeId) -> &[EdgeData] {
        self.graph.edges_of(node)
    }

    pub fn edge_data(&self, edge: EdgeId) -> &EdgeData {
        self.graph.edge(edge)
    }

    pub fn get_coordinate_of_node(&self, node: NodeId) -> FixedPointCoordinate {
        self.coordinates[node as usize]
    }

    pub fn get_name_for_name_id(&self, id: NameId) -> Result<&str, FacadeError> {
        self.names.get(id)
    }

    pub fn get_checksum(&self) -> u32 {
        self.checksum
    }

    /// Verifies a request's checksum against the facade's. spec.md §7:
    /// on mismatch, the caller must silently ignore hints and re-snap,
    /// not fail the request.
    pub fn verify_checksum(&self, request_checksum: u32) -> bool {
        self.checksum == request_checksum
    }

    /// R-tree fallback nearest-edge lookup, used by the phantom-node
    /// resolver when no usable hint was supplied (spec.md §4.1/§4.2).
    pub fn nearest_edge(&self, coordinate: FixedPointCoordinate) -> Option<Projection> {
        self.edge_index.nearest(Point::new(
            coordinate.lon_degrees(),
            coordinate.lat_degrees(),
        ))
    }
}

#[derive(Debug, Clone, Copy, zerocopy::FromBytes, zerocopy::Immutable, zerocopy::KnownLayout)]
#[repr(C)]
struct RawCoordinate {
    lat: i32,
    lon: i32,
}

fn map_file(path: &Path) -> Result<Mmap, FacadeError> {
    let file = File::open(path)
        .map_err(|e| FacadeError::DataUnavailable(format!("{}: {e}", path.display())))?;
    unsafe { Mmap::map(&file) }
        .map_err(|e| FacadeError::DataUnavailable(format!("{}: {e}", path.display())))
}

fn take_u32(cursor: &mut &[u8]) -> Result<u32, FacadeError> {
    if cursor.len() < 4 {
        return Err(FacadeError::CorruptData("unexpected end of hsgr header".into()));
    }
    let (head, tail) = cursor.split_at(4);
    *cursor = tail;
    take_u32_from(head)
}

fn take_u32_from(bytes: &[u8]) -> Result<u32, FacadeError> {
    bytes
        .try_into()
        .map(u32::from_ne_bytes)
        .map_err(|_| FacadeError::CorruptData("malformed u32 field".into()))
}

fn take_u32_slice(cursor: &mut &[u8], count: usize) -> Result<Vec<u32>, FacadeError> {
    let needed = count * 4;
    if cursor.len() < needed {
        return Err(FacadeError::CorruptData("CSR offset array truncated".into()));
    }
    let (head, tail) = cursor.split_at(needed);
    *cursor = tail;
    Ok(head
        .chunks_exact(4)
        .map(|c| u32::from_ne_bytes(c.try_into().unwrap()))
        .collect())
}

fn build_edge_index(
    first_edge: &[EdgeId],
    edges: &[EdgeData],
    coordinates: &[FixedPointCoordinate],
) -> Vec<EdgeBox> {
    let mut out = Vec::with_capacity(edges.len());
    for node in 0..first_edge.len().saturating_sub(1) as NodeId {
        let start = first_edge[node as usize];
        let end = first_edge[node as usize + 1];
        for edge_id in start..end {
            let edge = &edges[edge_id as usize];
            if edge.is_shortcut {
                continue;
            }
            out.push(EdgeBox {
                edge_id,
                source_node: node,
                target_node: edge.target,
                source: coordinates[node as usize].to_point(),
                target: coordinates[edge.target as usize].to_point(),
                name_id: edge.name_id,
                forward_weight: if edge.forward { edge.weight } else { -1 },
                reverse_weight: if edge.backward { edge.weight } else { -1 },
            });
        }
    }
    out
}
