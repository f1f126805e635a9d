// Concentrated-liquidity venue module
// Packs tick-spacing paths for the router's V3 commands and for mixed
// quotes, including the per-chain tick-spacing override
//
// Numan Thabit 2025 Nov

use alloy::primitives::Bytes;

use crate::config::TickSpacingOverride;
use crate::venues::pool::PoolEdge;

const ADDRESS_BYTES: usize = 20;
const TICK_BYTES: usize = 3;

/// Two's-complement int24, big endian.
fn int24_be(value: i32) -> [u8; TICK_BYTES] {
    let [_, a, b, c] = value.to_be_bytes();
    [a, b, c]
}

/// Tick-spacing slot for a hop: its raw type, flagged when the factory matches.
pub fn hop_tick_spacing(edge: &PoolEdge, tick_override: Option<&TickSpacingOverride>) -> i32 {
    let raw = edge.kind.to_raw();
    match tick_override {
        Some(o) => o.apply(edge.factory, raw),
        None => raw,
    }
}

/// Packed `address, int24, address, ...` path.
///
/// Constant-product hops in a mixed path keep their raw type (-1 or 0) in the slot.
pub fn encode_tick_path(edges: &[PoolEdge], tick_override: Option<&TickSpacingOverride>) -> Bytes {
    let Some(first) = edges.first() else {
        return Bytes::new();
    };
    let mut out = Vec::with_capacity(ADDRESS_BYTES + edges.len() * (ADDRESS_BYTES + TICK_BYTES));
    out.extend_from_slice(first.from.as_slice());
    for edge in edges {
        out.extend_from_slice(&int24_be(hop_tick_spacing(edge, tick_override)));
        out.extend_from_slice(edge.to.as_slice());
    }
    Bytes::from(out)
}
