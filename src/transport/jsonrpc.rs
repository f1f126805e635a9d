// JSON-RPC transport layer implementation
// This file implements the JSON-RPC client used to price packed paths
// through the on-chain mixed-route quoter via eth_call
//
// Numan Thabit 2025 Nov

use crate::errors::AggrError;
use crate::abi::MixedRouteQuoter;
use crate::venues::adapter::QuoteSource;
use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolCall;
use async_trait::async_trait;
use backoff::{future::retry, ExponentialBackoff};
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct JsonRpc {
    http: Client,
    url: String,
}

impl JsonRpc {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            url: url.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.url
    }

    /// `eth_call` against the latest block, returning the raw return data.
    pub async fn eth_call(&self, to: Address, data: &Bytes) -> Result<Bytes, AggrError> {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "eth_call",
            "params": [{ "to": to, "data": data }, "latest"]
        });
        let resp = self
            .http
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AggrError::Transport(format!("jsonrpc send: {e}")))?;
        if !resp.status().is_success() {
            // 5xx and 429 are worth retrying, anything else is the request's fault
            let status = resp.status();
            return Err(if status.is_server_error() || status.as_u16() == 429 {
                AggrError::Transport(format!("http {status}"))
            } else {
                AggrError::Provider(format!("http {status}"))
            });
        }
        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| AggrError::Transport(format!("json parse: {e}")))?;
        if let Some(err) = body.get("error") {
            return Err(AggrError::Provider(err.to_string()));
        }
        serde_json::from_value(body["result"].clone())
            .map_err(|e| AggrError::Decode(format!("decode result: {e}")))
    }
}

/// Quote source backed by a mixed-route quoter contract.
#[derive(Debug, Clone)]
pub struct RpcQuoter {
    rpc: JsonRpc,
    quoter: Address,
    max_elapsed: Duration,
}

impl RpcQuoter {
    pub fn new(rpc: JsonRpc, quoter: Address) -> Self {
        Self {
            rpc,
            quoter,
            max_elapsed: Duration::from_secs(5),
        }
    }

    pub fn with_max_elapsed(mut self, max_elapsed: Duration) -> Self {
        self.max_elapsed = max_elapsed;
        self
    }

    fn backoff(&self) -> ExponentialBackoff {
        ExponentialBackoff {
            initial_interval: Duration::from_millis(50),
            max_interval: Duration::from_secs(1),
            max_elapsed_time: Some(self.max_elapsed),
            multiplier: 2.0,
            ..Default::default()
        }
    }
}

#[async_trait]
impl QuoteSource for RpcQuoter {
    async fn quote_exact_input(&self, path: &Bytes, amount_in: U256) -> Result<U256, AggrError> {
        let calldata: Bytes = MixedRouteQuoter::quoteExactInputCall {
            path: path.clone(),
            amountIn: amount_in,
        }
        .abi_encode()
        .into();

        let rpc = &self.rpc;
        let quoter = self.quoter;
        let calldata = &calldata;
        // only transport failures are retried; a revert means no liquidity
        let raw = retry(self.backoff(), || async move {
            rpc.eth_call(quoter, calldata)
                .await
                .map_err(|err| match err {
                    AggrError::Transport(_) => {
                        debug!(error = %err, "retrying quoter call");
                        backoff::Error::transient(err)
                    }
                    other => backoff::Error::permanent(other),
                })
        })
        .await?;

        let decoded = MixedRouteQuoter::quoteExactInputCall::abi_decode_returns(&raw)
            .map_err(|e| AggrError::Decode(format!("quoteExactInput returns: {e}")))?;
        Ok(decoded.amountOut)
    }

    fn name(&self) -> &str {
        "mixed_route_quoter"
    }
}
