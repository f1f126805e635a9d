// Error types and error handling module
// This file defines custom error types and error conversion logic
// for the ultra-route project
//
// Numan Thabit 2025 Nov

use alloy::primitives::Address;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AggrError {
    #[error("slippage {0} outside [0, 1]")]
    InvalidSlippage(Decimal),
    #[error("chain mismatch: {from} vs {to}")]
    ChainMismatch { from: u64, to: u64 },
    #[error("token not found: {0}")]
    TokenNotFound(Address),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("cannot compile an empty route")]
    EmptyRoute,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("provider error: {0}")]
    Provider(String),
    #[error("decode error: {0}")]
    Decode(String),
}

impl AggrError {
    /// Input errors are the caller's fault and surface as 4xx on the API.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            AggrError::InvalidSlippage(_)
                | AggrError::ChainMismatch { .. }
                | AggrError::TokenNotFound(_)
                | AggrError::InvalidRequest(_)
        )
    }
}
