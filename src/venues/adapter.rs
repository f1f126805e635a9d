// Venue adapter module
// This file defines the quoting interface the router prices candidate paths
// through, and the path packing shared by every quote source
//
// Numan Thabit 2025 Nov

use alloy::primitives::{Bytes, U256};
use async_trait::async_trait;

use crate::config::TickSpacingOverride;
use crate::errors::AggrError;
use crate::venues::pool::{Family, PoolEdge};
use crate::venues::{amm, concentrated};

/// Source of exact-input quotes for packed paths.
///
/// An error or a zero output means the path has no usable liquidity; callers
/// skip it rather than failing the request.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn quote_exact_input(&self, path: &Bytes, amount_in: U256) -> Result<U256, AggrError>;

    /// Label used in logs and metrics
    fn name(&self) -> &str {
        "quoter"
    }
}

/// Pack a route for the quoter. All-constant-product paths carry a stable flag per
/// hop; anything touching a concentrated pool carries int24 tick-spacing slots.
pub fn pack_path(edges: &[PoolEdge], tick_override: Option<&TickSpacingOverride>) -> Bytes {
    let all_constant_product = edges
        .iter()
        .all(|edge| edge.family() == Family::ConstantProduct);
    if all_constant_product {
        amm::encode_stable_path(edges)
    } else {
        concentrated::encode_tick_path(edges, tick_override)
    }
}
