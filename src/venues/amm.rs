// Constant-product venue module
// Encodes constant-product / stable pool hops the way the router's V2
// commands and the quoter expect them
//
// Numan Thabit 2025 Nov

use alloy::primitives::Bytes;

use crate::abi::Route;
use crate::venues::pool::PoolEdge;

/// Hop list for a V2 swap command. `stable` is set only for the stable variant.
pub fn routes(edges: &[PoolEdge]) -> Vec<Route> {
    edges
        .iter()
        .map(|edge| Route {
            from: edge.from,
            to: edge.to,
            stable: edge.kind.is_stable(),
        })
        .collect()
}

/// Packed `address, bool, address, ...` path for an all-constant-product quote.
pub fn encode_stable_path(edges: &[PoolEdge]) -> Bytes {
    let Some(first) = edges.first() else {
        return Bytes::new();
    };
    let mut out = Vec::with_capacity(20 + edges.len() * 21);
    out.extend_from_slice(first.from.as_slice());
    for edge in edges {
        out.push(u8::from(edge.kind.is_stable()));
        out.extend_from_slice(edge.to.as_slice());
    }
    Bytes::from(out)
}
