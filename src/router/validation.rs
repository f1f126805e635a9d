// Pre-quote validation module
// Validates token pairing, chain, amount, account and slippage before any
// path search or quoter traffic happens
//
// Numan Thabit 2025 Nov

use alloy::primitives::{Address, U256};
use rust_decimal::Decimal;
use tracing::warn;

use crate::errors::AggrError;
use crate::router::routes::Token;

/// Pre-quote validation result
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<AggrError>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: AggrError) {
        self.errors.push(error);
    }

    /// A lone failure keeps its own variant; several collapse into one request error.
    pub fn into_result(mut self) -> Result<(), AggrError> {
        match self.errors.len() {
            0 => Ok(()),
            1 => Err(self.errors.remove(0)),
            _ => {
                let joined = self
                    .errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ");
                Err(AggrError::InvalidRequest(format!("validation failed: {joined}")))
            }
        }
    }
}

pub fn validate_slippage(slippage: Decimal) -> Result<(), AggrError> {
    if slippage.is_sign_negative() || slippage > Decimal::ONE {
        return Err(AggrError::InvalidSlippage(slippage));
    }
    Ok(())
}

/// Validate a quote request against the configured chain
pub fn validate_quote(chain_id: u64, from: &Token, to: &Token, amount_in: U256) -> ValidationResult {
    let mut result = ValidationResult::new();

    if from.chain_id != to.chain_id {
        result.add_error(AggrError::ChainMismatch {
            from: from.chain_id,
            to: to.chain_id,
        });
    } else if from.chain_id != chain_id {
        result.add_error(AggrError::ChainMismatch {
            from: from.chain_id,
            to: chain_id,
        });
    }

    if from.address == to.address || from.routing_address() == to.routing_address() {
        result.add_error(AggrError::InvalidRequest(
            "from and to resolve to the same token".into(),
        ));
    }

    if amount_in.is_zero() {
        result.add_error(AggrError::InvalidRequest("amount_in must be non-zero".into()));
    }

    if !result.is_valid() {
        warn!(
            from = %from.address,
            to = %to.address,
            errors = result.errors.len(),
            "rejected quote request"
        );
    }
    result
}

/// Validate swap-only inputs on top of the quote checks
pub fn validate_swap(account: Address, slippage: Decimal) -> ValidationResult {
    let mut result = ValidationResult::new();
    if account == Address::ZERO {
        result.add_error(AggrError::InvalidRequest("account must be non-zero".into()));
    }
    if let Err(err) = validate_slippage(slippage) {
        result.add_error(err);
    }
    result
}
