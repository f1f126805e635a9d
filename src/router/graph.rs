// Pool graph
// Directed multigraph over pool tokens. Every pool contributes one edge per
// direction and parallel pools between the same pair stay separate edges
//
// Numan Thabit 2025 Nov

use alloy::primitives::Address;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use crate::venues::pool::{PoolEdge, PoolRecord};

pub type EdgeId = usize;

/// Edge identity: direction plus pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct EdgeKey {
    from: Address,
    to: Address,
    pool_id: Address,
}

/// Every edge from one vertex to one neighbor.
#[derive(Debug, Clone)]
struct Adjacent {
    to: Address,
    edges: Vec<EdgeId>,
}

#[derive(Debug, Clone, Default)]
pub struct PoolGraph {
    edges: Vec<PoolEdge>,
    keys: HashSet<EdgeKey>,
    /// Neighbors kept in insertion order so path enumeration is deterministic
    adjacency: HashMap<Address, Vec<Adjacent>>,
}

impl PoolGraph {
    /// Build from a pool list. With an allow-list, pools touching none of its
    /// tokens are left out.
    pub fn build(pools: &[PoolRecord], chain_id: u64, allow: Option<&HashSet<Address>>) -> Self {
        let mut graph = Self::default();
        for pool in pools {
            if pool.token0 == pool.token1 {
                continue;
            }
            if let Some(allow) = allow {
                if !allow.contains(&pool.token0) && !allow.contains(&pool.token1) {
                    continue;
                }
            }
            for edge in pool.edges(chain_id) {
                graph.insert(edge);
            }
        }
        graph
    }

    /// Build with the allow-list first and fall back to every pool when that
    /// leaves nothing. An empty result means there is nothing to route through.
    pub fn build_with_fallback(
        pools: &[PoolRecord],
        chain_id: u64,
        allow: &HashSet<Address>,
    ) -> Self {
        let filtered = Self::build(pools, chain_id, Some(allow));
        if !filtered.is_empty() {
            return filtered;
        }
        debug!(
            allowed = allow.len(),
            pools = pools.len(),
            "allow-list pruned every pool; rebuilding unfiltered"
        );
        let full = Self::build(pools, chain_id, None);
        if full.is_empty() {
            warn!(pools = pools.len(), "pool graph is empty");
        }
        full
    }

    fn insert(&mut self, edge: PoolEdge) {
        let key = EdgeKey {
            from: edge.from,
            to: edge.to,
            pool_id: edge.pool_id,
        };
        if !self.keys.insert(key) {
            return;
        }
        let id = self.edges.len();
        self.edges.push(edge);

        let neighbors = self.adjacency.entry(edge.from).or_default();
        match neighbors.iter_mut().find(|adj| adj.to == edge.to) {
            Some(adj) => adj.edges.push(id),
            None => neighbors.push(Adjacent {
                to: edge.to,
                edges: vec![id],
            }),
        }
        self.adjacency.entry(edge.to).or_default();
    }

    pub fn edge(&self, id: EdgeId) -> &PoolEdge {
        &self.edges[id]
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn contains(&self, vertex: &Address) -> bool {
        self.adjacency.contains_key(vertex)
    }

    /// Neighbors of `vertex` with the parallel edges leading to each.
    pub fn neighbors(&self, vertex: &Address) -> impl Iterator<Item = (Address, &[EdgeId])> + '_ {
        self.adjacency
            .get(vertex)
            .into_iter()
            .flatten()
            .map(|adj| (adj.to, adj.edges.as_slice()))
    }
}
