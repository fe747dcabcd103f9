//! Route-name extraction (spec.md §4.6 "Route-name extraction"),
//! ported from `ExtractRouteNames.h`.

use crate::facade::DataFacade;
use crate::model::{NameId, SegmentInformation};

/// The two most distinctive street names on a route, ordered by
/// their position along it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteNames {
    pub name1: String,
    pub name2: String,
}

/// Picks `s1` (the longest segment of `route`), then picks `s2` as
/// the longest segment of `route` whose name-id does not appear
/// anywhere in `other` (a true set-difference by name-id, not merely
/// "the next differently-named segment" — SPEC_FULL §3), reorders the
/// pair by path position, and resolves both to strings.
pub fn extract_route_names(
    facade: &DataFacade,
    route: &[SegmentInformation],
    other: &[SegmentInformation],
) -> RouteNames {
    let Some((s1_index, _)) = longest(route) else {
        return RouteNames::default();
    };
    let s1_name = route[s1_index].name_id;

    let other_names: std::collections::HashSet<NameId> = other.iter().map(|s| s.name_id).collect();
    let difference: Vec<(usize, &SegmentInformation)> = route
        .iter()
        .enumerate()
        .filter(|(_, s)| s.name_id != s1_name && !other_names.contains(&s.name_id))
        .collect();

    let s2_index = difference
        .iter()
        .max_by(|(_, a), (_, b)| a.length.partial_cmp(&b.length).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| *i);

    let (first_index, second_index) = match s2_index {
        Some(i) if i < s1_index => (i, s1_index),
        Some(i) => (s1_index, i),
        None => (s1_index, s1_index),
    };

    RouteNames {
        name1: resolve(facade, route[first_index].name_id),
        name2: resolve(facade, route[second_index].name_id),
    }
}

fn longest(segments: &[SegmentInformation]) -> Option<(usize, f64)> {
    segments
        .iter()
        .enumerate()
        .map(|(i, s)| (i, s.length))
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
}

fn resolve(facade: &DataFacade, id: NameId) -> String {
    facade.get_name_for_name_id(id).unwrap_or("").to_string()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::facade::graph::CsrGraph;
    use crate::facade::names::NameTable;
    use crate::geo::FixedPointCoordinate;
    use crate::model::TurnInstruction;

    fn facade() -> DataFacade {
        let graph = CsrGraph::new(vec![0], Vec::new());
        DataFacade::from_parts(
            graph,
            Vec::new(),
            NameTable::from_names(["Main St", "Oak Ave", "Elm Rd"]),
            vec![],
            0,
        )
    }

    fn segment(name_id: NameId, length: f64) -> SegmentInformation {
        SegmentInformation {
            location: FixedPointCoordinate::default(),
            name_id,
            length,
            duration: 0,
            bearing: 0.0,
            turn_instruction: TurnInstruction::NoTurn,
            necessary: false,
        }
    }

    #[test]
    fn picks_the_two_longest_distinctly_named_segments_in_position_order() {
        let facade = facade();
        let route = vec![segment(1, 50.0), segment(0, 500.0), segment(2, 100.0)];
        let other = vec![segment(2, 10.0)];
        let names = extract_route_names(&facade, &route, &other);
        assert_eq!(names.name1, "Oak Ave");
        assert_eq!(names.name2, "Main St");
    }
}
