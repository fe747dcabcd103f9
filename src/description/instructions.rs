//! Turn-by-turn instruction synthesis over the necessary segments
//! (spec.md §4.6 "Turn-instruction synthesis"), ported from
//! `DescriptionFactory.cpp`'s instruction pass.

use crate::facade::DataFacade;
use crate::geo::distance::cardinal_direction;
use crate::model::{NameId, SegmentInformation, TurnInstruction, Weight};

/// One row of the `route_instructions` output (spec.md §6): turn id,
/// street name, length in meters, begin index into the simplified
/// geometry, duration in deciseconds, a human length string, the
/// cardinal-direction bucket and the numeric bearing.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteInstruction {
    pub turn_id: String,
    pub street_name: String,
    pub length_m: f64,
    pub begin_index: usize,
    pub duration_ds: Weight,
    pub length_string: String,
    pub cardinal_direction: &'static str,
    pub bearing_deg: f64,
}

/// The stable turn-id strings the original emits, independent of
/// locale: `N-k` for a roundabout left at exit `k`, otherwise the
/// instruction's own name.
fn turn_id(instruction: TurnInstruction, roundabout_exit: Option<u32>) -> String {
    if let Some(exit) = roundabout_exit {
        return format!("enter-roundabout-{exit}");
    }
    match instruction {
        TurnInstruction::NoTurn => "no-turn",
        TurnInstruction::GoStraight => "continue",
        TurnInstruction::TurnSlightRight => "slight-right",
        TurnInstruction::TurnRight => "right",
        TurnInstruction::TurnSharpRight => "sharp-right",
        TurnInstruction::UTurn => "u-turn",
        TurnInstruction::TurnSharpLeft => "sharp-left",
        TurnInstruction::TurnLeft => "left",
        TurnInstruction::TurnSlightLeft => "slight-left",
        TurnInstruction::HeadOn => "head-on",
        TurnInstruction::EnterRoundabout | TurnInstruction::StayOnRoundabout => "roundabout",
        TurnInstruction::LeaveRoundabout => "roundabout",
        TurnInstruction::ReachedVia => "reached-via",
        TurnInstruction::ReachedDestination => "reached-destination",
    }
    .to_string()
}

fn humanize_length(meters: f64) -> String {
    if meters >= 1000.0 {
        format!("{:.1} km", meters / 1000.0)
    } else {
        format!("{:.0} m", meters)
    }
}

/// Walks the necessary segments in order and emits one
/// [`RouteInstruction`] per visible turn, collapsing an
/// enter/stay*/leave roundabout run into a single
/// `enter-roundabout-k` instruction at the leave point, where `k` is
/// the 1-based exit ordinal (spec.md §4.6, SPEC_FULL S5 scenario).
pub fn build_instructions(
    facade: &DataFacade,
    segments: &[SegmentInformation],
) -> Vec<RouteInstruction> {
    let mut out = Vec::new();
    let mut roundabout_exits: u32 = 0;
    let mut in_roundabout = false;
    let mut roundabout_begin_index = 0;
    let mut roundabout_name_id: NameId = 0;

    for (index, segment) in segments.iter().enumerate() {
        if !segment.necessary {
            continue;
        }

        match segment.turn_instruction {
            TurnInstruction::EnterRoundabout => {
                in_roundabout = true;
                roundabout_exits = 1;
                roundabout_begin_index = index;
                roundabout_name_id = segment.name_id;
                continue;
            }
            TurnInstruction::StayOnRoundabout => {
                if in_roundabout {
                    roundabout_exits += 1;
                }
                continue;
            }
            TurnInstruction::LeaveRoundabout => {
                if in_roundabout {
                    out.push(emit(
                        facade,
                        segments,
                        roundabout_begin_index,
                        roundabout_name_id,
                        TurnInstruction::EnterRoundabout,
                        Some(roundabout_exits),
                    ));
                    in_roundabout = false;
                }
                continue;
            }
            other if other.is_visible() => {
                out.push(emit(facade, segments, index, segment.name_id, other, None));
            }
            _ => {}
        }
    }

    out
}

fn emit(
    facade: &DataFacade,
    segments: &[SegmentInformation],
    index: usize,
    name_id: NameId,
    instruction: TurnInstruction,
    roundabout_exit: Option<u32>,
) -> RouteInstruction {
    let segment = &segments[index];
    let street_name = facade.get_name_for_name_id(name_id).unwrap_or("").to_string();

    RouteInstruction {
        turn_id: turn_id(instruction, roundabout_exit),
        street_name,
        length_m: segment.length,
        begin_index: index,
        duration_ds: segment.duration,
        length_string: humanize_length(segment.length),
        cardinal_direction: cardinal_direction(segment.bearing),
        bearing_deg: segment.bearing,
    }
}
