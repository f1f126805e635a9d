// Router module - path search, quoting and command compilation
// This file wires the pool graph, path finder, filter, selector and
// route compiler behind the HTTP-facing router
//
// Numan Thabit 2025 Nov

pub mod compiler;
pub mod filter;
pub mod graph;
pub mod pathfinder;
pub mod planner;
pub mod routes;
pub mod selector;
pub mod validation;

#[allow(clippy::module_inception)]
pub mod router;

pub use compiler::{CompiledRoute, RouteCompiler};
pub use filter::PathFilter;
pub use graph::PoolGraph;
pub use pathfinder::PathFinder;
pub use planner::{CommandType, RoutePlanner};
pub use router::{create_api_router, QuoteRequest, Router, SwapPlan};
pub use routes::{Quote, RoutePath, Token};
pub use selector::RouteSelector;
