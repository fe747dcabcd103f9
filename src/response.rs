//! The structures a routing request resolves to (spec.md §3 `RawRouteData`,
//! §6 "Request output"): the raw, undescribed result of the search and
//! unpacker, and the fully described response a rendering sink would
//! serialise. This crate builds both; it does not serialise either.

use crate::description::{RouteInstruction, RouteNames, RouteSummary};
use crate::geo::FixedPointCoordinate;
use crate::model::{PathData, PhantomNodes, Weight};

/// Result of routing before the description pipeline runs.
#[derive(Debug, Clone)]
pub struct RawRouteData {
    pub shortest_path: Vec<PathData>,
    pub alternative_path: Option<Vec<PathData>>,
    pub legs: Vec<PhantomNodes>,
    pub shortest_length: Weight,
    pub alternative_length: Option<Weight>,
    pub checksum: u32,
}

/// A round-trippable snapshot of every phantom resolved for a
/// request, so a follow-up request can skip the R-tree lookup
/// (spec.md §6 `hint_data`).
#[derive(Debug, Clone)]
pub struct HintData {
    pub checksum: u32,
    pub locations: Vec<String>,
}

/// `status` as spec.md §6 defines it: `0` the route was found, `207`
/// no path exists between the requested points.
pub const STATUS_OK: u16 = 0;
pub const STATUS_UNREACHABLE: u16 = 207;

/// The fully-described response a JSON/GPX/KML/Protobuf sink would
/// render (spec.md §6); this crate stops here and never serialises
/// it itself.
#[derive(Debug, Clone)]
pub struct RouteResponse {
    pub status: u16,
    pub status_message: String,
    pub route_geometry: String,
    pub route_instructions: Vec<RouteInstruction>,
    pub route_summary: RouteSummary,
    pub route_names: RouteNames,
    pub via_points: Vec<FixedPointCoordinate>,
    pub via_indices: Vec<usize>,
    pub alternative_geometry: Option<String>,
    pub alternative_instructions: Option<Vec<RouteInstruction>>,
    pub alternative_summary: Option<RouteSummary>,
    pub alternative_names: Option<RouteNames>,
    pub hint_data: HintData,
}
