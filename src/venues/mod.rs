// Venues module - pool families and their path encodings
// This file groups the pool model, the per-family encoders, and the
// quoting adapter the router prices candidate paths through
//
// Numan Thabit 2025 Nov

pub mod adapter;
pub mod amm;
pub mod concentrated;
pub mod pool;

pub use adapter::{pack_path, QuoteSource};
pub use pool::{Family, PoolEdge, PoolKind, PoolRecord};
