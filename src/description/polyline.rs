//! Google polyline encoding over fixed-point coordinates (spec.md
//! §4.6 "Polyline encoding"), ported from `PolylineCompressor.h`.

use crate::geo::fixed::FixedPointCoordinate;

const POLYLINE_PRECISION: i64 = 100_000;

/// Encodes a coordinate sequence into a Google-polyline string, lat
/// then lon per point, over deltas from the previous point (absolute
/// for the first).
pub fn encode(coordinates: &[FixedPointCoordinate]) -> String {
    let mut out = String::new();
    let mut last_lat: i64 = 0;
    let mut last_lon: i64 = 0;

    for coord in coordinates {
        let lat = to_polyline_unit(coord.lat);
        let lon = to_polyline_unit(coord.lon);
        encode_value(lat - last_lat, &mut out);
        encode_value(lon - last_lon, &mut out);
        last_lat = lat;
        last_lon = lon;
    }

    out
}

/// Decodes a Google-polyline string back into its coordinate
/// sequence. Malformed input (a continuation byte with no following
/// byte, or a value outside the printable range the encoder uses)
/// yields `None` rather than panicking.
pub fn decode(polyline: &str) -> Option<Vec<FixedPointCoordinate>> {
    let bytes = polyline.as_bytes();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lon: i64 = 0;
    let mut out = Vec::new();

    while index < bytes.len() {
        let dlat = decode_value(bytes, &mut index)?;
        let dlon = decode_value(bytes, &mut index)?;
        lat += dlat;
        lon += dlon;
        out.push(FixedPointCoordinate::new(
            from_polyline_unit(lat),
            from_polyline_unit(lon),
        ));
    }

    Some(out)
}

/// `FixedPointCoordinate` is already scaled by 10^6; polyline strings
/// are scaled by 10^5, so every value is divided by 10 on the way in
/// and multiplied by 10 on the way out.
fn to_polyline_unit(value: i32) -> i64 {
    value as i64 / 10
}

fn from_polyline_unit(value: i64) -> i32 {
    (value * 10) as i32
}

fn encode_value(value: i64, out: &mut String) {
    let mut shifted = value << 1;
    if value < 0 {
        shifted = !shifted;
    }

    while shifted >= 0x20 {
        push_byte(((shifted & 0x1f) | 0x20) as u8 + 63, out);
        shifted >>= 5;
    }
    push_byte(shifted as u8 + 63, out);
}

/// Emits `byte` as a single character, doubling a literal backslash
/// so the result stays safe to embed in a JSON string (spec.md §4.6
/// step 4).
fn push_byte(byte: u8, out: &mut String) {
    out.push(byte as char);
    if byte == b'\\' {
        out.push(byte as char);
    }
}

fn decode_value(bytes: &[u8], index: &mut usize) -> Option<i64> {
    let mut result: i64 = 0;
    let mut shift = 0;

    loop {
        let mut byte = *bytes.get(*index)?;
        *index += 1;
        // A literal backslash was doubled by the encoder; the second
        // copy carries no information.
        if byte == b'\\' && bytes.get(*index) == Some(&b'\\') {
            *index += 1;
        }
        byte = byte.checked_sub(63)?;
        result |= ((byte & 0x1f) as i64) << shift;
        shift += 5;
        if byte & 0x20 == 0 {
            break;
        }
    }

    Some(if result & 1 != 0 { !(result >> 1) } else { result >> 1 })
}
