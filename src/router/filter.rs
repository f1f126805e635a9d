// Path filter
// Applies must-include / must-exclude token constraints to candidate paths
//
// Numan Thabit 2025 Nov

use alloy::primitives::Address;
use std::collections::HashSet;

use crate::router::routes::{RoutePath, Token};

#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    include: HashSet<Address>,
    exclude: HashSet<Address>,
}

impl PathFilter {
    pub fn new(
        include: impl IntoIterator<Item = Address>,
        exclude: impl IntoIterator<Item = Address>,
    ) -> Self {
        Self {
            include: include.into_iter().collect(),
            exclude: exclude.into_iter().collect(),
        }
    }

    /// Trade endpoints can never be excluded, in raw or wrapped form.
    pub fn for_trade(mut self, from: &Token, to: &Token) -> Self {
        for token in [from, to] {
            self.exclude.remove(&token.address);
            self.exclude.remove(&token.routing_address());
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }

    pub fn allows(&self, path: &RoutePath) -> bool {
        let touched = path.vertices();
        let included =
            self.include.is_empty() || touched.iter().any(|v| self.include.contains(v));
        let clean = self.exclude.is_empty() || !touched.iter().any(|v| self.exclude.contains(v));
        included && clean
    }

    pub fn apply(&self, paths: Vec<RoutePath>) -> Vec<RoutePath> {
        if self.is_empty() {
            return paths;
        }
        paths.into_iter().filter(|p| self.allows(p)).collect()
    }
}
