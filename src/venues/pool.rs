// Pool model module
// Liquidity pool records as delivered by the pool data source, protocol family
// classification, and the directed edges the router walks
//
// Numan Thabit 2025 Nov

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

/// Execution family of a pool. Each family maps to its own router command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    /// Constant-product / stable pools (V2-style commands)
    ConstantProduct,
    /// Concentrated-liquidity pools (V3-style commands)
    Concentrated,
}

/// Pool type with the family, stability flag and tick spacing kept apart.
///
/// On the wire pools carry a single integer: below 1 is constant-product
/// (0 stable, negative volatile), 1 and above is a tick spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum PoolKind {
    ConstantProduct { stable: bool },
    Concentrated { tick_spacing: i32 },
}

impl PoolKind {
    pub const VOLATILE_RAW: i32 = -1;
    pub const STABLE_RAW: i32 = 0;

    pub fn from_raw(raw: i32) -> Self {
        if raw >= 1 {
            PoolKind::Concentrated { tick_spacing: raw }
        } else {
            PoolKind::ConstantProduct {
                stable: raw == Self::STABLE_RAW,
            }
        }
    }

    pub fn to_raw(self) -> i32 {
        match self {
            PoolKind::ConstantProduct { stable: true } => Self::STABLE_RAW,
            PoolKind::ConstantProduct { stable: false } => Self::VOLATILE_RAW,
            PoolKind::Concentrated { tick_spacing } => tick_spacing,
        }
    }

    pub fn family(self) -> Family {
        match self {
            PoolKind::ConstantProduct { .. } => Family::ConstantProduct,
            PoolKind::Concentrated { .. } => Family::Concentrated,
        }
    }

    pub fn is_stable(self) -> bool {
        matches!(self, PoolKind::ConstantProduct { stable: true })
    }
}

impl From<i32> for PoolKind {
    fn from(raw: i32) -> Self {
        PoolKind::from_raw(raw)
    }
}

impl From<PoolKind> for i32 {
    fn from(kind: PoolKind) -> Self {
        kind.to_raw()
    }
}

/// Pool as listed by the pool data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolRecord {
    pub pool_id: Address,
    #[serde(rename = "type")]
    pub kind: PoolKind,
    pub token0: Address,
    pub token1: Address,
    pub factory: Address,
    #[serde(default)]
    pub fee: u32,
}

impl PoolRecord {
    /// Both traversal directions of this pool.
    pub fn edges(&self, chain_id: u64) -> [PoolEdge; 2] {
        let edge = |from, to| PoolEdge {
            from,
            to,
            pool_id: self.pool_id,
            factory: self.factory,
            kind: self.kind,
            fee: self.fee,
            chain_id,
        };
        [edge(self.token0, self.token1), edge(self.token1, self.token0)]
    }
}

/// One directed hop across a single pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PoolEdge {
    pub from: Address,
    pub to: Address,
    pub pool_id: Address,
    pub factory: Address,
    #[serde(rename = "type")]
    pub kind: PoolKind,
    pub fee: u32,
    pub chain_id: u64,
}

impl PoolEdge {
    pub fn family(&self) -> Family {
        self.kind.family()
    }
}
