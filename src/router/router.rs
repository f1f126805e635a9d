// Router HTTP API implementation
// This file ties path search, quoting and route compilation together and
// serves them over HTTP
//
// Numan Thabit 2025 Nov

use alloy::primitives::{Address, Bytes, U256};
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router as AxumRouter,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::config::{ChainConfig, RoutingConfig};
use crate::errors::AggrError;
use crate::metrics::{self, CANDIDATE_PATHS};
use crate::router::compiler::RouteCompiler;
use crate::router::filter::PathFilter;
use crate::router::graph::PoolGraph;
use crate::router::pathfinder::PathFinder;
use crate::router::planner::CommandType;
use crate::router::routes::{Quote, RoutePath, Token};
use crate::router::selector::{ignore_errors, QuoteErrorHook, RouteSelector};
use crate::router::validation;
use crate::state::MarketSnapshot;
use crate::venues::adapter::QuoteSource;
use crate::venues::pool::PoolRecord;

/// Exact-input quote request.
#[derive(Debug, Clone, Default)]
pub struct QuoteRequest {
    pub from: Address,
    pub to: Address,
    pub amount_in: U256,
    /// Paths must touch at least one of these when non-empty
    pub include: Vec<Address>,
    /// Paths must touch none of these; trade endpoints are exempt
    pub exclude: Vec<Address>,
}

/// Everything needed to submit the swap transaction.
#[derive(Debug, Clone, Serialize)]
pub struct SwapPlan {
    /// Transaction target
    pub router: Address,
    pub commands: Vec<CommandType>,
    pub inputs: Vec<Bytes>,
    pub calldata: Bytes,
    pub value: U256,
    pub min_amount_out: U256,
}

/// High-level Router that ties path search, quoting and compilation together
pub struct Router {
    chain: ChainConfig,
    routing: RoutingConfig,
    tokens: HashMap<Address, Token>,
    pools: Vec<PoolRecord>,
    selector: RouteSelector,
}

impl Router {
    pub fn new(
        chain: ChainConfig,
        routing: RoutingConfig,
        snapshot: MarketSnapshot,
        quoter: Arc<dyn QuoteSource>,
    ) -> Self {
        let tokens = snapshot.token_index(chain.chain_id);
        let selector = RouteSelector::new(quoter, &routing);
        info!(
            chain_id = chain.chain_id,
            tokens = tokens.len(),
            pools = snapshot.pools.len(),
            "router ready"
        );
        Self {
            chain,
            routing,
            tokens,
            pools: snapshot.pools,
            selector,
        }
    }

    pub fn token(&self, address: &Address) -> Result<&Token, AggrError> {
        self.tokens
            .get(address)
            .ok_or(AggrError::TokenNotFound(*address))
    }

    /// Filtered candidate paths between two tokens.
    ///
    /// The graph is restricted to pools touching an endpoint or a connector
    /// token, falling back to every pool when that leaves nothing.
    pub fn candidate_paths(&self, from: &Token, to: &Token, filter: &PathFilter) -> Vec<RoutePath> {
        let mut allow: HashSet<Address> = self.chain.connectors.iter().copied().collect();
        allow.insert(from.routing_address());
        allow.insert(to.routing_address());

        let graph = PoolGraph::build_with_fallback(&self.pools, self.chain.chain_id, &allow);
        let paths = PathFinder::new(&graph, self.routing.max_hops).find_paths(from, to);
        let found = paths.len();
        let kept = filter.apply(paths);
        debug!(
            edges = graph.edge_count(),
            found,
            kept = kept.len(),
            "enumerated candidate paths"
        );
        kept
    }

    pub async fn quote(&self, req: &QuoteRequest) -> Result<Option<Quote>, AggrError> {
        self.quote_with_hook(req, &ignore_errors).await
    }

    /// Best quote for `req`. `Ok(None)` means no route; `on_error` sees every
    /// candidate the quote source failed on.
    pub async fn quote_with_hook(
        &self,
        req: &QuoteRequest,
        on_error: &QuoteErrorHook<'_>,
    ) -> Result<Option<Quote>, AggrError> {
        let from = self.token(&req.from)?;
        let to = self.token(&req.to)?;
        validation::validate_quote(self.chain.chain_id, from, to, req.amount_in).into_result()?;

        let filter = PathFilter::new(req.include.iter().copied(), req.exclude.iter().copied())
            .for_trade(from, to);
        let paths = self.candidate_paths(from, to, &filter);
        CANDIDATE_PATHS.observe(paths.len() as f64);
        if paths.is_empty() {
            info!(from = %from.address, to = %to.address, "no candidate paths");
            return Ok(None);
        }

        Ok(self
            .selector
            .best_quote(&self.chain, from, to, req.amount_in, paths, on_error)
            .await)
    }

    /// Compile a quote into execute() calldata for `account`.
    pub fn build_swap(
        &self,
        quote: &Quote,
        account: Address,
        slippage: Decimal,
        deadline: Option<u64>,
    ) -> Result<SwapPlan, AggrError> {
        validation::validate_swap(account, slippage).into_result()?;
        let compiled = RouteCompiler::new(&self.chain).compile(quote, account, slippage)?;
        let planner = &compiled.planner;
        let calldata = match deadline {
            Some(deadline) => planner.execute_calldata_with_deadline(U256::from(deadline)),
            None => planner.execute_calldata(),
        };
        Ok(SwapPlan {
            router: self.chain.router,
            commands: planner.command_types(),
            inputs: planner.inputs(),
            calldata,
            value: compiled.value,
            min_amount_out: compiled.min_amount_out,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct QuoteRequestBody {
    pub from: Address,
    pub to: Address,
    /// Base-10 or 0x-prefixed integer in the token's smallest unit
    pub amount_in: String,
    #[serde(default)]
    pub include: Vec<Address>,
    #[serde(default)]
    pub exclude: Vec<Address>,
}

impl QuoteRequestBody {
    fn into_request(self) -> Result<QuoteRequest, AggrError> {
        let amount_in = self
            .amount_in
            .trim()
            .parse::<U256>()
            .map_err(|e| AggrError::InvalidRequest(format!("amount_in: {e}")))?;
        Ok(QuoteRequest {
            from: self.from,
            to: self.to,
            amount_in,
            include: self.include,
            exclude: self.exclude,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct SwapRequestBody {
    pub from: Address,
    pub to: Address,
    pub amount_in: String,
    #[serde(default)]
    pub include: Vec<Address>,
    #[serde(default)]
    pub exclude: Vec<Address>,
    pub account: Address,
    /// Fraction in [0, 1], e.g. "0.005"
    pub slippage: Decimal,
    /// Unix seconds after which execution reverts
    #[serde(default)]
    pub deadline: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct HopResponse {
    pub pool_id: Address,
    pub from: Address,
    pub to: Address,
    #[serde(rename = "type")]
    pub pool_type: i32,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub from: Address,
    pub to: Address,
    pub amount_in: String,
    pub amount_out: String,
    /// Percent scaled by 1e18
    pub price_impact: String,
    pub spender: Address,
    pub route: Vec<HopResponse>,
}

impl From<&Quote> for QuoteResponse {
    fn from(quote: &Quote) -> Self {
        Self {
            from: quote.from_token.address,
            to: quote.to_token.address,
            amount_in: quote.amount_in.to_string(),
            amount_out: quote.amount_out.to_string(),
            price_impact: quote.price_impact.to_string(),
            spender: quote.spender,
            route: quote
                .path
                .edges()
                .iter()
                .map(|e| HopResponse {
                    pool_id: e.pool_id,
                    from: e.from,
                    to: e.to,
                    pool_type: e.kind.to_raw(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SwapResponse {
    pub quote: QuoteResponse,
    pub router: Address,
    pub commands: Vec<CommandType>,
    pub calldata: Bytes,
    pub value: String,
    pub min_amount_out: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(err: AggrError) -> ApiError {
    let status = if err.is_input_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

fn no_route() -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "no route".into(),
        }),
    )
}

/// Create the HTTP router with API endpoints
pub fn create_api_router(router: Arc<Router>) -> AxumRouter {
    AxumRouter::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_text))
        .route("/api/v1/quote", post(quote_route))
        .route("/api/v1/swap", post(build_swap))
        .layer(TraceLayer::new_for_http())
        .with_state(router)
}

/// Health check endpoint
async fn health_check() -> StatusCode {
    StatusCode::OK
}

async fn metrics_text() -> String {
    metrics::render()
}

/// Quote endpoint - best route without building a transaction
async fn quote_route(
    State(router): State<Arc<Router>>,
    Json(body): Json<QuoteRequestBody>,
) -> Result<Json<QuoteResponse>, ApiError> {
    let req = body.into_request().map_err(api_error)?;
    let quote = router
        .quote(&req)
        .await
        .map_err(api_error)?
        .ok_or_else(no_route)?;
    Ok(Json(QuoteResponse::from(&quote)))
}

/// Swap endpoint - quotes, then compiles the route into execute() calldata
async fn build_swap(
    State(router): State<Arc<Router>>,
    Json(body): Json<SwapRequestBody>,
) -> Result<Json<SwapResponse>, ApiError> {
    let req = QuoteRequestBody {
        from: body.from,
        to: body.to,
        amount_in: body.amount_in,
        include: body.include,
        exclude: body.exclude,
    }
    .into_request()
    .map_err(api_error)?;
    validation::validate_swap(body.account, body.slippage)
        .into_result()
        .map_err(api_error)?;

    let quote = router
        .quote(&req)
        .await
        .map_err(api_error)?
        .ok_or_else(no_route)?;
    let plan = router
        .build_swap(&quote, body.account, body.slippage, body.deadline)
        .map_err(api_error)?;

    Ok(Json(SwapResponse {
        quote: QuoteResponse::from(&quote),
        router: plan.router,
        commands: plan.commands,
        calldata: plan.calldata,
        value: plan.value.to_string(),
        min_amount_out: plan.min_amount_out.to_string(),
    }))
}
