// Path finder
// Enumerates simple hop-bounded paths through the pool graph with an explicit
// depth-first search; parallel pools multiply into distinct candidates
//
// Numan Thabit 2025 Nov

use alloy::primitives::Address;
use std::collections::HashSet;

use crate::router::graph::{EdgeId, PoolGraph};
use crate::router::routes::{RoutePath, Token};

pub const DEFAULT_MAX_HOPS: usize = 3;

pub struct PathFinder<'g> {
    graph: &'g PoolGraph,
    max_hops: usize,
}

impl<'g> PathFinder<'g> {
    pub fn new(graph: &'g PoolGraph, max_hops: usize) -> Self {
        Self { graph, max_hops }
    }

    /// Paths between two tokens, native currencies replaced by their wrapped form.
    pub fn find_paths(&self, from: &Token, to: &Token) -> Vec<RoutePath> {
        self.find_between(from.routing_address(), to.routing_address())
    }

    /// Every simple path from `source` to `destination` with at most `max_hops` pools.
    /// Unknown or disconnected endpoints yield an empty list.
    pub fn find_between(&self, source: Address, destination: Address) -> Vec<RoutePath> {
        let mut out = Vec::new();
        if source == destination
            || self.max_hops == 0
            || !self.graph.contains(&source)
            || !self.graph.contains(&destination)
        {
            return out;
        }

        let mut visited = HashSet::from([source]);
        let mut groups: Vec<&[EdgeId]> = Vec::with_capacity(self.max_hops);
        self.walk(source, destination, &mut visited, &mut groups, &mut out);
        out
    }

    fn walk<'a>(
        &'a self,
        vertex: Address,
        destination: Address,
        visited: &mut HashSet<Address>,
        groups: &mut Vec<&'a [EdgeId]>,
        out: &mut Vec<RoutePath>,
    ) {
        if groups.len() == self.max_hops {
            return;
        }
        for (next, parallel) in self.graph.neighbors(&vertex) {
            if visited.contains(&next) {
                continue;
            }
            groups.push(parallel);
            if next == destination {
                self.expand(groups, out);
            } else {
                visited.insert(next);
                self.walk(next, destination, visited, groups, out);
                visited.remove(&next);
            }
            groups.pop();
        }
    }

    /// Cross product of the parallel edges chosen at each transition.
    fn expand(&self, groups: &[&[EdgeId]], out: &mut Vec<RoutePath>) {
        let mut combos: Vec<Vec<EdgeId>> = vec![Vec::with_capacity(groups.len())];
        for parallel in groups {
            combos = combos
                .into_iter()
                .flat_map(|prefix| {
                    parallel.iter().map(move |id| {
                        let mut next = prefix.clone();
                        next.push(*id);
                        next
                    })
                })
                .collect();
        }
        out.extend(combos.into_iter().map(|ids| {
            RoutePath::new(ids.into_iter().map(|id| *self.graph.edge(id)).collect())
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::venues::pool::{PoolKind, PoolRecord};

    fn pool(id: u8, a: u8, b: u8) -> PoolRecord {
        PoolRecord {
            pool_id: Address::repeat_byte(id),
            kind: PoolKind::from_raw(-1),
            token0: Address::repeat_byte(a),
            token1: Address::repeat_byte(b),
            factory: Address::ZERO,
            fee: 0,
        }
    }

    fn addr(b: u8) -> Address {
        Address::repeat_byte(b)
    }

    #[test]
    fn finds_direct_and_multi_hop_paths() {
        // 1-2, 2-3, 1-3, 3-4
        let pools = vec![pool(0xa1, 1, 2), pool(0xa2, 2, 3), pool(0xa3, 1, 3), pool(0xa4, 3, 4)];
        let graph = PoolGraph::build(&pools, 10, None);
        let paths = PathFinder::new(&graph, 3).find_between(addr(1), addr(3));
        assert_eq!(paths.len(), 2);
        for path in &paths {
            assert!(path.is_simple());
            assert!(path.is_contiguous());
            assert_eq!(path.edges()[0].from, addr(1));
            assert_eq!(path.edges().last().unwrap().to, addr(3));
        }
    }

    #[test]
    fn hop_bound_is_respected() {
        let pools = vec![pool(0xa1, 1, 2), pool(0xa2, 2, 3), pool(0xa3, 3, 4)];
        let graph = PoolGraph::build(&pools, 10, None);
        assert!(PathFinder::new(&graph, 2).find_between(addr(1), addr(4)).is_empty());
        assert_eq!(PathFinder::new(&graph, 3).find_between(addr(1), addr(4)).len(), 1);
        assert!(PathFinder::new(&graph, 0).find_between(addr(1), addr(2)).is_empty());
    }

    #[test]
    fn parallel_edges_multiply_candidates() {
        // two pools 1-2, three pools 2-3
        let pools = vec![
            pool(0xa1, 1, 2),
            pool(0xa2, 1, 2),
            pool(0xb1, 2, 3),
            pool(0xb2, 2, 3),
            pool(0xb3, 2, 3),
        ];
        let graph = PoolGraph::build(&pools, 10, None);
        let paths = PathFinder::new(&graph, 3).find_between(addr(1), addr(3));
        assert_eq!(paths.len(), 6);
        let distinct: HashSet<_> = paths
            .iter()
            .map(|p| p.edges().iter().map(|e| e.pool_id).collect::<Vec<_>>())
            .collect();
        assert_eq!(distinct.len(), 6);
    }

    #[test]
    fn never_revisits_a_vertex() {
        // dense graph over 5 tokens
        let mut pools = Vec::new();
        let mut id = 0u8;
        for a in 1..=5u8 {
            for b in (a + 1)..=5u8 {
                id += 1;
                pools.push(pool(id, a, b));
            }
        }
        let graph = PoolGraph::build(&pools, 10, None);
        let paths = PathFinder::new(&graph, 4).find_between(addr(1), addr(5));
        // 1 direct + 3 two-hop + 6 three-hop + 6 four-hop
        assert_eq!(paths.len(), 16);
        assert!(paths.iter().all(|p| p.is_simple() && p.is_contiguous()));
    }

    #[test]
    fn disconnected_or_unknown_endpoints_yield_nothing() {
        let pools = vec![pool(0xa1, 1, 2), pool(0xa2, 3, 4)];
        let graph = PoolGraph::build(&pools, 10, None);
        let finder = PathFinder::new(&graph, DEFAULT_MAX_HOPS);
        assert!(finder.find_between(addr(1), addr(4)).is_empty());
        assert!(finder.find_between(addr(1), addr(9)).is_empty());
        assert!(finder.find_between(addr(1), addr(1)).is_empty());
    }
}
