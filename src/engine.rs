//! Top-level orchestrator: resolves a request's coordinates into
//! phantoms, runs the search core, unpacks and describes the result.
//! Everything else in this crate is a component `RouteEngine` wires
//! together; callers only ever need this module and [`response`].

use std::path::Path;

use log::info;

use crate::config::EngineConfig;
use crate::description::{self, DescribedRoute};
use crate::facade::{DataFacade, FacadeError};
use crate::geo::FixedPointCoordinate;
use crate::model::{PhantomNode, PhantomNodes};
use crate::phantom;
use crate::query::{self, RouteError, SearchEngineData};
use crate::response::{HintData, RouteResponse, STATUS_OK, STATUS_UNREACHABLE};
use crate::unpack;
use crate::Error;

/// One routing request (spec.md §6 "Request input").
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub coordinates: Vec<FixedPointCoordinate>,
    pub hints: Vec<Option<String>>,
    pub alternate_route: bool,
    pub zoom_level: u8,
    /// The facade checksum the caller last saw; hints are honoured
    /// only when this matches the facade's current checksum
    /// (spec.md §7 `ChecksumMismatch`).
    pub checksum: Option<u32>,
}

impl RouteRequest {
    pub fn new(coordinates: Vec<FixedPointCoordinate>) -> Self {
        let hints = vec![None; coordinates.len()];
        RouteRequest {
            coordinates,
            hints,
            alternate_route: false,
            zoom_level: 18,
            checksum: None,
        }
    }
}

/// Holds the shared, read-only preprocessed graph and the tunable
/// engine constants. One `RouteEngine` is built per process; each
/// worker thread answers requests against it with its own
/// [`SearchEngineData`] (spec.md §5).
pub struct RouteEngine {
    facade: DataFacade,
    config: EngineConfig,
}

impl RouteEngine {
    pub fn new(facade: DataFacade, config: EngineConfig) -> Self {
        RouteEngine { facade, config }
    }

    /// Opens the preprocessed graph from disk (spec.md §6) using
    /// configuration loaded from the environment.
    pub fn open(base_path: &Path) -> Result<Self, FacadeError> {
        let facade = DataFacade::open(base_path)?;
        Ok(RouteEngine::new(facade, EngineConfig::from_env()))
    }

    pub fn facade(&self) -> &DataFacade {
        &self.facade
    }

    /// Answers one routing request. Per spec.md §7, an unreachable
    /// route is reported as a `207` response rather than an error;
    /// only malformed input or corrupt preprocessing data error out.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, engine_data)))]
    pub fn route(
        &self,
        engine_data: &mut SearchEngineData,
        request: &RouteRequest,
    ) -> Result<RouteResponse, Error> {
        if request.coordinates.len() < 2 {
            return Err(RouteError::NotEnoughCoordinates.into());
        }

        let checksum_trusted = request.checksum == Some(self.facade.get_checksum());
        let resolved: Result<Vec<PhantomNode>, crate::phantom::PhantomError> = request
            .coordinates
            .iter()
            .zip(request.hints.iter())
            .map(|(coordinate, hint)| {
                let hint = if checksum_trusted { hint.as_deref() } else { None };
                phantom::resolve(&self.facade, *coordinate, hint)
            })
            .collect();

        // A coordinate with no edge anywhere near it (spec.md §8 S1,
        // the empty-graph case) is reported the same way as a search
        // that finds no path: a 207 response, not a hard error.
        let phantoms = match resolved {
            Ok(phantoms) => phantoms,
            Err(crate::phantom::PhantomError::Unreachable) => {
                info!("no coordinate could be snapped to the graph; reporting unreachable");
                return Ok(unresolved_response(&request.coordinates));
            }
            Err(other) => return Err(other.into()),
        };

        let legs: Vec<PhantomNodes> = phantoms
            .windows(2)
            .map(|pair| PhantomNodes {
                source_phantom: pair[0],
                target_phantom: pair[1],
            })
            .collect();

        let search_result = match query::shortest_path(&self.facade, engine_data, &legs, &self.config) {
            Ok(result) => result,
            Err(RouteError::Unreachable) => {
                info!("no path between requested points; reporting unreachable");
                return Ok(self.unreachable_response(&phantoms));
            }
            Err(other) => return Err(other.into()),
        };

        let shortest_path = unpack::unpack(&self.facade, &search_result.packed_path)?;
        let source = phantoms.first().expect("at least two phantoms");
        let target = phantoms.last().expect("at least two phantoms");
        let shortest = description::describe_leg(&self.facade, source, target, &shortest_path, request.zoom_level);

        let alternative = if request.alternate_route && legs.len() == 1 {
            alternative_route(&self.facade, engine_data, &legs[0], &self.config, request.zoom_level)?
        } else {
            None
        };

        Ok(self.build_response(&phantoms, &shortest, alternative.as_ref()))
    }

    fn unreachable_response(&self, phantoms: &[PhantomNode]) -> RouteResponse {
        RouteResponse {
            status: STATUS_UNREACHABLE,
            status_message: "no route found".to_string(),
            route_geometry: String::new(),
            route_instructions: Vec::new(),
            route_summary: crate::description::RouteSummary {
                total_distance_m: 0.0,
                total_time_ds: crate::model::INVALID_EDGE_WEIGHT,
                start_point: phantoms.first().map(|p| p.location).unwrap_or_default(),
                end_point: phantoms.last().map(|p| p.location).unwrap_or_default(),
            },
            route_names: crate::description::RouteNames::default(),
            via_points: phantoms.iter().map(|p| p.location).collect(),
            via_indices: Vec::new(),
            alternative_geometry: None,
            alternative_instructions: None,
            alternative_summary: None,
            alternative_names: None,
            hint_data: self.hint_data(phantoms),
        }
    }

    fn build_response(
        &self,
        phantoms: &[PhantomNode],
        shortest: &DescribedRoute,
        alternative: Option<&DescribedRoute>,
    ) -> RouteResponse {
        let route_names = description::route_names::extract_route_names(
            &self.facade,
            &shortest.segments,
            alternative.map(|a| a.segments.as_slice()).unwrap_or(&[]),
        );
        let alternative_names = alternative.map(|a| {
            description::route_names::extract_route_names(&self.facade, &a.segments, &shortest.segments)
        });

        RouteResponse {
            status: STATUS_OK,
            status_message: "ok".to_string(),
            route_geometry: shortest.geometry.clone(),
            route_instructions: shortest.instructions.clone(),
            route_summary: shortest.summary,
            route_names,
            via_points: phantoms.iter().map(|p| p.location).collect(),
            via_indices: via_indices(&shortest.segments, phantoms),
            alternative_geometry: alternative.map(|a| a.geometry.clone()),
            alternative_instructions: alternative.map(|a| a.instructions.clone()),
            alternative_summary: alternative.map(|a| a.summary),
            alternative_names,
            hint_data: self.hint_data(phantoms),
        }
    }

    fn hint_data(&self, phantoms: &[PhantomNode]) -> HintData {
        let checksum = self.facade.get_checksum();
        HintData {
            checksum,
            locations: phantoms
                .iter()
                .map(|p| phantom::encode_hint(p, checksum))
                .collect(),
        }
    }
}

/// Computes the alternative for a single-leg request. Multi-leg
/// alternative composition is out of scope here: via-node candidates
/// are only collected for the one primary search a single leg runs
/// (spec.md §4.4 describes a single "the primary bidirectional
/// search", not a per-leg chain of them).
fn alternative_route(
    facade: &DataFacade,
    engine_data: &mut SearchEngineData,
    leg: &PhantomNodes,
    config: &EngineConfig,
    zoom: u8,
) -> Result<Option<DescribedRoute>, Error> {
    let Some(result) = crate::alternative::compute(facade, engine_data, leg, config)? else {
        return Ok(None);
    };
    let path = unpack::unpack(facade, &result.packed_path)?;
    Ok(Some(description::describe_leg(
        facade,
        &leg.source_phantom,
        &leg.target_phantom,
        &path,
        zoom,
    )))
}

/// Builds a 207 response for a request where not even phantom
/// resolution succeeded (spec.md §8 S1) — there are no phantoms, no
/// hints, nothing to echo back but the raw request coordinates.
fn unresolved_response(coordinates: &[FixedPointCoordinate]) -> RouteResponse {
    RouteResponse {
        status: STATUS_UNREACHABLE,
        status_message: "no route found".to_string(),
        route_geometry: String::new(),
        route_instructions: Vec::new(),
        route_summary: crate::description::RouteSummary {
            total_distance_m: 0.0,
            total_time_ds: crate::model::INVALID_EDGE_WEIGHT,
            start_point: coordinates.first().copied().unwrap_or_default(),
            end_point: coordinates.last().copied().unwrap_or_default(),
        },
        route_names: crate::description::RouteNames::default(),
        via_points: coordinates.to_vec(),
        via_indices: Vec::new(),
        alternative_geometry: None,
        alternative_instructions: None,
        alternative_summary: None,
        alternative_names: None,
        hint_data: HintData { checksum: 0, locations: Vec::new() },
    }
}

/// Finds, for each requested coordinate, the index of its phantom's
/// location among the route's necessary (simplified) geometry points
/// (spec.md §6 `via_indices`).
fn via_indices(segments: &[crate::model::SegmentInformation], phantoms: &[PhantomNode]) -> Vec<usize> {
    let necessary_locations: Vec<_> = segments.iter().filter(|s| s.necessary).map(|s| s.location).collect();
    phantoms
        .iter()
        .filter_map(|p| necessary_locations.iter().position(|loc| *loc == p.location))
        .collect()
}
