//! Reversible hint encoding for [`PhantomNode`] (spec.md §4.2), ported
//! from the upstream engine's raw-byte-plus-base64 `Hint` object: the
//! phantom's fields are written in a fixed byte layout, not a
//! self-describing format, then base64-encoded with the URL-safe
//! alphabet (`+ -> -`, `/ -> _`) so a hint is safe to embed in a URL
//! query string.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::geo::FixedPointCoordinate;
use crate::model::{NameId, NodeId, PhantomNode, Weight};

#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
struct RawHint {
    checksum: u32,
    forward_node: u32,
    reverse_node: u32,
    name_id: u32,
    forward_weight: i32,
    reverse_weight: i32,
    lat: i32,
    lon: i32,
    ratio_bits: u64,
}

/// Encodes `node` plus the facade `checksum` it was resolved against
/// into a URL-safe base64 string.
pub fn encode_hint(node: &PhantomNode, checksum: u32) -> String {
    let raw = RawHint {
        checksum,
        forward_node: node.forward_node,
        reverse_node: node.reverse_node,
        name_id: node.name_id,
        forward_weight: node.forward_weight,
        reverse_weight: node.reverse_weight,
        lat: node.location.lat,
        lon: node.location.lon,
        ratio_bits: node.ratio.to_bits(),
    };
    URL_SAFE_NO_PAD.encode(raw.as_bytes())
}

/// Decodes a hint produced by [`encode_hint`]. Returns `None` on any
/// malformed input (bad base64, wrong length) — callers treat that
/// the same as "no hint", per spec.md §4.2's fallback contract.
pub fn decode_hint(hint: &str) -> Option<(PhantomNode, u32)> {
    let bytes = URL_SAFE_NO_PAD.decode(hint).ok()?;
    let raw = RawHint::read_from_bytes(&bytes[..]).ok()?;

    let node = PhantomNode {
        forward_node: raw.forward_node as NodeId,
        reverse_node: raw.reverse_node as NodeId,
        name_id: raw.name_id as NameId,
        forward_weight: raw.forward_weight as Weight,
        reverse_weight: raw.reverse_weight as Weight,
        location: FixedPointCoordinate::new(raw.lat, raw.lon),
        ratio: f64::from_bits(raw.ratio_bits),
    };
    Some((node, raw.checksum))
}

#[cfg(test)]
mod test {
    use super::*;

    fn sample() -> PhantomNode {
        PhantomNode {
            forward_node: 10,
            reverse_node: 11,
            name_id: 3,
            forward_weight: 42,
            reverse_weight: 58,
            location: FixedPointCoordinate::from_degrees(38.9126, -77.0234),
            ratio: 0.42,
        }
    }

    #[test]
    fn round_trips() {
        let node = sample();
        let encoded = encode_hint(&node, 0xDEADBEEF);
        let (decoded, checksum) = decode_hint(&encoded).expect("decodes");
        assert_eq!(checksum, 0xDEADBEEF);
        assert_eq!(decoded.forward_node, node.forward_node);
        assert_eq!(decoded.reverse_node, node.reverse_node);
        assert_eq!(decoded.location, node.location);
        assert!((decoded.ratio - node.ratio).abs() < 1e-12);
    }

    #[test]
    fn is_url_safe() {
        let encoded = encode_hint(&sample(), u32::MAX);
        assert!(!encoded.contains('+'));
        assert!(!encoded.contains('/'));
    }

    #[test]
    fn garbage_input_decodes_to_none() {
        assert!(decode_hint("not-a-hint").is_none());
    }
}
