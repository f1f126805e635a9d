// Shared fixtures for integration tests
//
// Numan Thabit 2025 Nov

#![allow(dead_code)]

use alloy::primitives::{Address, Bytes, U256};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use ultra_route::config::{ChainConfig, RoutingConfig};
use ultra_route::errors::AggrError;
use ultra_route::router::{RoutePath, Router, Token};
use ultra_route::state::MarketSnapshot;
use ultra_route::venues::pool::{PoolKind, PoolRecord};
use ultra_route::venues::{pack_path, QuoteSource};

pub const CHAIN_ID: u64 = 10;
pub const FOREIGN_CHAIN_ID: u64 = 8453;

pub fn addr(b: u8) -> Address {
    Address::repeat_byte(b)
}

pub fn usdc() -> Address {
    addr(0x01)
}
pub fn op() -> Address {
    addr(0x03)
}
pub fn weth() -> Address {
    addr(0x42)
}
pub fn eth() -> Address {
    addr(0xee)
}
/// Token listed on another chain
pub fn foreign() -> Address {
    addr(0x77)
}
pub fn router_address() -> Address {
    addr(0xd0)
}
pub fn account() -> Address {
    addr(0xac)
}

/// USDC/WETH volatile pool
pub fn pool_usdc_weth() -> Address {
    addr(0xa1)
}
/// USDC/OP concentrated pool, tick spacing 100
pub fn pool_usdc_op() -> Address {
    addr(0xa2)
}
/// OP/WETH volatile pool
pub fn pool_op_weth() -> Address {
    addr(0xa3)
}

pub fn chain() -> ChainConfig {
    ChainConfig {
        chain_id: CHAIN_ID,
        router: router_address(),
        quoter: addr(0x99),
        connectors: vec![op()],
        tick_spacing_override: None,
    }
}

fn token(address: Address, symbol: &str, decimals: u8, listed: bool, price: Decimal) -> Token {
    Token {
        chain_id: CHAIN_ID,
        address,
        symbol: symbol.into(),
        decimals,
        wrapped_address: None,
        listed,
        price,
    }
}

fn pool(pool_id: Address, raw: i32, token0: Address, token1: Address) -> PoolRecord {
    PoolRecord {
        pool_id,
        kind: PoolKind::from_raw(raw),
        token0,
        token1,
        factory: addr(0xfa),
        fee: 0,
    }
}

pub fn snapshot() -> MarketSnapshot {
    let mut native = token(eth(), "ETH", 18, true, Decimal::from(2000));
    native.wrapped_address = Some(weth());
    MarketSnapshot {
        tokens: vec![
            token(usdc(), "USDC", 6, true, Decimal::ONE),
            token(op(), "OP", 18, false, Decimal::from(2)),
            token(weth(), "WETH", 18, true, Decimal::from(2000)),
            native,
            // isolated token with no pools
            token(addr(0x07), "LONE", 18, false, Decimal::ZERO),
            Token {
                chain_id: FOREIGN_CHAIN_ID,
                ..token(foreign(), "BASE", 18, false, Decimal::ZERO)
            },
        ],
        pools: vec![
            pool(pool_usdc_weth(), -1, usdc(), weth()),
            pool(pool_usdc_op(), 100, usdc(), op()),
            pool(pool_op_weth(), -1, op(), weth()),
        ],
    }
}

/// 1,000 USDC
pub fn thousand_usdc() -> U256 {
    U256::from(1_000_000_000u64)
}

pub fn wei(eth_milli: u64) -> U256 {
    U256::from(eth_milli) * U256::from(1_000_000_000_000_000u64)
}

/// Canned outputs keyed by packed path; anything else reverts.
#[derive(Default)]
pub struct MockQuoter {
    outputs: HashMap<Bytes, U256>,
    pub calls: AtomicUsize,
}

impl MockQuoter {
    pub fn with(mut self, tokens: &[Address], raws: &[i32], out: U256) -> Self {
        let path = path(tokens, raws);
        self.outputs.insert(pack_path(path.edges(), None), out);
        self
    }
}

/// Path along `tokens` with one pool type per hop. Pool ids are irrelevant to packing.
pub fn path(tokens: &[Address], raws: &[i32]) -> RoutePath {
    RoutePath::new(
        tokens
            .windows(2)
            .zip(raws)
            .map(|(w, raw)| ultra_route::venues::PoolEdge {
                from: w[0],
                to: w[1],
                pool_id: Address::ZERO,
                factory: addr(0xfa),
                kind: PoolKind::from_raw(*raw),
                fee: 0,
                chain_id: CHAIN_ID,
            })
            .collect(),
    )
}

#[async_trait]
impl QuoteSource for MockQuoter {
    async fn quote_exact_input(&self, path: &Bytes, _amount_in: U256) -> Result<U256, AggrError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outputs
            .get(path)
            .copied()
            .ok_or_else(|| AggrError::Provider("execution reverted".into()))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Direct USDC->WETH quotes 0.49 ETH, USDC->OP->WETH quotes 0.495 ETH.
pub fn default_quoter() -> MockQuoter {
    MockQuoter::default()
        .with(&[usdc(), weth()], &[-1], wei(490))
        .with(&[usdc(), op(), weth()], &[100, -1], wei(495))
}

pub fn router_with(quoter: MockQuoter) -> (Arc<Router>, Arc<MockQuoter>) {
    let quoter = Arc::new(quoter);
    let router = Router::new(chain(), RoutingConfig::default(), snapshot(), quoter.clone());
    (Arc::new(router), quoter)
}
