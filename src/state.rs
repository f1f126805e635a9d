// Market snapshot and state loading
//
// Loads the token registry and pool list the router searches over. A snapshot
// file stands in for the paginated pool data source and is read once at start.
//
// Numan Thabit 2025 Nov

use alloy::primitives::Address;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

use crate::router::routes::Token;
use crate::venues::pool::PoolRecord;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketSnapshot {
	#[serde(default)]
	pub tokens: Vec<Token>,
	#[serde(default)]
	pub pools: Vec<PoolRecord>,
}

impl MarketSnapshot {
	/// Read a snapshot, picking the format from the file extension.
	pub fn load(path: &Path) -> Result<Self> {
		let raw = std::fs::read_to_string(path)
			.with_context(|| format!("read snapshot {}", path.display()))?;
		let ext = path
			.extension()
			.and_then(|e| e.to_str())
			.map(str::to_ascii_lowercase);
		let snapshot: MarketSnapshot = match ext.as_deref() {
			Some("json") => serde_json::from_str(&raw).context("parse JSON snapshot")?,
			Some("yaml") | Some("yml") => serde_yaml::from_str(&raw).context("parse YAML snapshot")?,
			other => bail!("unsupported snapshot format: {:?}", other),
		};
		info!(
			path = %path.display(),
			tokens = snapshot.tokens.len(),
			pools = snapshot.pools.len(),
			"loaded market snapshot"
		);
		Ok(snapshot)
	}

	/// Every snapshot token keyed by address, so a request naming a token from
	/// another chain resolves and fails validation as a chain mismatch.
	/// An address listed on several chains resolves to its `chain_id` entry;
	/// later duplicates on the same chain replace earlier ones.
	pub fn token_index(&self, chain_id: u64) -> HashMap<Address, Token> {
		let mut index: HashMap<Address, Token> = HashMap::with_capacity(self.tokens.len());
		for token in &self.tokens {
			match index.get(&token.address).map(|t| t.chain_id) {
				Some(existing) if existing == token.chain_id => {
					warn!(address = %token.address, "duplicate token in snapshot");
				}
				Some(existing) if existing == chain_id => continue,
				_ => {}
			}
			index.insert(token.address, token.clone());
		}
		index
	}
}
