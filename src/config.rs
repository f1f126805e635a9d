// Configuration management module
// This file handles loading and parsing of configuration settings
// from an optional config file layered under environment variables
//
// Numan Thabit 2025 Nov

use alloy::primitives::Address;
use anyhow::{ensure, Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use url::Url;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// JSON-RPC node used for quoter eth_calls, e.g. https://mainnet.optimism.io
    pub rpc_endpoint: Url,
    /// Address the HTTP API binds to
    #[serde(default = "default_listen_addr")]
    pub listen_addr: SocketAddr,
    /// Token and pool snapshot (JSON or YAML) standing in for the pool data source
    pub snapshot_path: PathBuf,
    pub chain: ChainConfig,
    #[serde(default)]
    pub routing: RoutingConfig,
}

/// Chain-specific constants. Passed explicitly to everything that needs them.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainConfig {
    pub chain_id: u64,
    /// Batch-executor router; also the spender of quoted input tokens
    pub router: Address,
    /// Mixed-route quoter contract
    pub quoter: Address,
    /// Connector tokens allowed as intermediate hops
    #[serde(default)]
    pub connectors: Vec<Address>,
    #[serde(default)]
    pub tick_spacing_override: Option<TickSpacingOverride>,
}

/// Bit flag OR-ed into the tick spacing of every hop whose pool comes from `factory`.
///
/// Applied on factory match alone; the pool's own tick spacing is not consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TickSpacingOverride {
    pub factory: Address,
    pub flag: i32,
}

impl TickSpacingOverride {
    pub fn apply(&self, factory: Address, tick_spacing: i32) -> i32 {
        if factory == self.factory {
            tick_spacing | self.flag
        } else {
            tick_spacing
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoutingConfig {
    /// Maximum pools per route
    #[serde(default = "default_max_hops")]
    pub max_hops: usize,
    /// Quoter calls in flight per quote request
    #[serde(default = "default_quote_concurrency")]
    pub quote_concurrency: usize,
    /// Absolute price impact (percent) at which a quote touching a listed token is rejected
    #[serde(default = "default_max_price_impact_pct")]
    pub max_price_impact_pct: Decimal,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            max_hops: default_max_hops(),
            quote_concurrency: default_quote_concurrency(),
            max_price_impact_pct: default_max_price_impact_pct(),
        }
    }
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

fn default_max_hops() -> usize {
    3
}

fn default_quote_concurrency() -> usize {
    8
}

fn default_max_price_impact_pct() -> Decimal {
    Decimal::ONE_HUNDRED
}

impl AppConfig {
    /// Load from `APP_CONFIG` (if set) and `APP__*` environment variables.
    pub fn load() -> Result<Self> {
        let file = std::env::var("APP_CONFIG").ok().map(PathBuf::from);
        Self::load_from(file.as_deref())
    }

    pub fn load_from(file: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        let cfg = builder
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("chain.connectors")
                    .try_parsing(true),
            )
            .build()
            .context("assemble configuration sources")?;
        let app: AppConfig = cfg
            .try_deserialize()
            .context("deserialize configuration")?;
        app.validate()?;
        Ok(app)
    }

    fn validate(&self) -> Result<()> {
        ensure!(self.routing.max_hops >= 1, "routing.max_hops must be at least 1");
        ensure!(
            self.routing.quote_concurrency >= 1,
            "routing.quote_concurrency must be at least 1"
        );
        ensure!(
            self.routing.max_price_impact_pct > Decimal::ZERO,
            "routing.max_price_impact_pct must be positive"
        );
        ensure!(self.chain.router != Address::ZERO, "chain.router is required");
        if let Some(o) = &self.chain.tick_spacing_override {
            // packed quote paths carry tick spacing as int24
            ensure!(
                (0..1 << 24).contains(&o.flag),
                "chain.tick_spacing_override.flag {:#x} does not fit in 24 bits",
                o.flag
            );
        }
        Ok(())
    }
}
