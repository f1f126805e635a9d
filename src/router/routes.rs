// Route types
// This file defines tokens, candidate route paths, family groups and the
// quotes the selector produces for them
//
// Numan Thabit 2025 Nov

use alloy::primitives::{Address, I256, U256};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::venues::pool::{Family, PoolEdge};

/// Token snapshot for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub chain_id: u64,
    pub address: Address,
    #[serde(default)]
    pub symbol: String,
    pub decimals: u8,
    /// Set only for the chain's native currency: its wrapped ERC-20 counterpart
    #[serde(default)]
    pub wrapped_address: Option<Address>,
    #[serde(default)]
    pub listed: bool,
    /// Oracle USD price; zero when unknown
    #[serde(default)]
    pub price: Decimal,
}

impl Token {
    pub fn is_native(&self) -> bool {
        self.wrapped_address.is_some()
    }

    /// Address the token trades under inside pools.
    pub fn routing_address(&self) -> Address {
        self.wrapped_address.unwrap_or(self.address)
    }
}

/// One simple path of pool hops, `from` of each hop equal to `to` of the previous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RoutePath {
    edges: Vec<PoolEdge>,
}

impl RoutePath {
    pub fn new(edges: Vec<PoolEdge>) -> Self {
        Self { edges }
    }

    pub fn edges(&self) -> &[PoolEdge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Tokens in traversal order, endpoints included.
    pub fn vertices(&self) -> Vec<Address> {
        let mut out = Vec::with_capacity(self.edges.len() + 1);
        if let Some(first) = self.edges.first() {
            out.push(first.from);
        }
        out.extend(self.edges.iter().map(|e| e.to));
        out
    }

    pub fn is_contiguous(&self) -> bool {
        self.edges.windows(2).all(|w| w[0].to == w[1].from)
    }

    pub fn is_simple(&self) -> bool {
        let vertices = self.vertices();
        let unique: HashSet<_> = vertices.iter().collect();
        unique.len() == vertices.len()
    }

    /// Split into maximal runs of same-family hops, left to right.
    pub fn groups(&self) -> Vec<Group> {
        let mut groups: Vec<Group> = Vec::new();
        for edge in &self.edges {
            match groups.last_mut() {
                Some(group) if group.family == edge.family() => group.edges.push(*edge),
                _ => groups.push(Group {
                    family: edge.family(),
                    edges: vec![*edge],
                }),
            }
        }
        groups
    }
}

/// Consecutive hops of one family, executed by a single router command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub family: Family,
    pub edges: Vec<PoolEdge>,
}

impl Group {
    /// Pool that receives funds first when this group is entered.
    pub fn entry_point(&self) -> Address {
        self.edges
            .first()
            .map(|e| e.pool_id)
            .unwrap_or(Address::ZERO)
    }
}

/// Priced route for a fixed input amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub path: RoutePath,
    pub amount_in: U256,
    pub amount_out: U256,
    pub from_token: Token,
    pub to_token: Token,
    /// Percent scaled by 1e18; positive when the route returns less than oracle prices imply
    pub price_impact: I256,
    /// Contract the input token must be approved for
    pub spender: Address,
}
