// Library root module for ultra-route
// This file defines the public API and module structure for the ultra-route library
// It exports the main functionality that can be used by other crates
//
// Numan Thabit 2025 Nov

pub mod abi;
pub mod config;
pub mod errors;
pub mod math;
pub mod metrics;
pub mod router;
pub mod state;
pub mod transport;
pub mod venues;
