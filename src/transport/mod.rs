// Transport layer
// Network clients the router talks to
//
// Numan Thabit 2025 Nov

pub mod jsonrpc;

pub use jsonrpc::{JsonRpc, RpcQuoter};
