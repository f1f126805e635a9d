// Route selector - prices candidate paths and picks the best one
// Quotes every candidate through the configured quote source with bounded
// concurrency, drops paths without liquidity or with implausible price impact,
// and keeps the greatest output
//
// Numan Thabit 2025 Nov

use alloy::primitives::{I256, U256};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use crate::config::{ChainConfig, RoutingConfig};
use crate::errors::AggrError;
use crate::math::{self, DEFAULT_DECIMALS};
use crate::metrics::{QUOTE_LATENCY, QUOTE_OUTCOMES};
use crate::router::routes::{Quote, RoutePath, Token};
use crate::venues::adapter::{pack_path, QuoteSource};

/// Called once per candidate that failed to quote.
pub type QuoteErrorHook<'a> = dyn Fn(&RoutePath, &AggrError) + Send + Sync + 'a;

/// Hook that ignores failures.
pub fn ignore_errors(_: &RoutePath, _: &AggrError) {}

pub struct RouteSelector {
    quoter: Arc<dyn QuoteSource>,
    concurrency: usize,
    /// Percent scaled by 1e18
    max_price_impact: U256,
}

impl RouteSelector {
    pub fn new(quoter: Arc<dyn QuoteSource>, routing: &RoutingConfig) -> Self {
        Self {
            quoter,
            concurrency: routing.quote_concurrency.max(1),
            max_price_impact: math::scale_decimal(routing.max_price_impact_pct, DEFAULT_DECIMALS),
        }
    }

    /// Quote every path for `amount_in` and return the best survivor.
    ///
    /// When either endpoint is listed, candidates whose absolute price impact
    /// reaches the configured ceiling are dropped before selection. Ties keep
    /// the earlier candidate. `None` means no path produced a usable quote.
    #[tracing::instrument(
        skip_all,
        fields(from = %from.address, to = %to.address, %amount_in, candidates = paths.len())
    )]
    pub async fn best_quote(
        &self,
        chain: &ChainConfig,
        from: &Token,
        to: &Token,
        amount_in: U256,
        paths: Vec<RoutePath>,
        on_error: &QuoteErrorHook<'_>,
    ) -> Option<Quote> {
        let tick_override = chain.tick_spacing_override.as_ref();
        let source = self.quoter.name();

        // buffered() yields in input order, whatever order the calls finish in
        let results: Vec<(RoutePath, Result<U256, AggrError>)> = stream::iter(paths)
            .map(|path| async move {
                let packed = pack_path(path.edges(), tick_override);
                let started = Instant::now();
                let result = self.quoter.quote_exact_input(&packed, amount_in).await;
                QUOTE_LATENCY
                    .with_label_values(&[source])
                    .observe(started.elapsed().as_secs_f64());
                (path, result)
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let check_impact = from.listed || to.listed;
        let mut best: Option<Quote> = None;
        for (path, result) in results {
            let amount_out = match result {
                Ok(out) if !out.is_zero() => out,
                Ok(_) => {
                    QUOTE_OUTCOMES.with_label_values(&["empty"]).inc();
                    on_error(&path, &AggrError::Provider("zero output".into()));
                    continue;
                }
                Err(err) => {
                    QUOTE_OUTCOMES.with_label_values(&["error"]).inc();
                    debug!(hops = path.len(), error = %err, "candidate has no liquidity");
                    on_error(&path, &err);
                    continue;
                }
            };

            let impact = price_impact(from, to, amount_in, amount_out);
            if check_impact && impact.unsigned_abs() >= self.max_price_impact {
                QUOTE_OUTCOMES.with_label_values(&["rejected"]).inc();
                debug!(hops = path.len(), %amount_out, %impact, "price impact too large");
                continue;
            }
            QUOTE_OUTCOMES.with_label_values(&["ok"]).inc();

            if best.as_ref().map_or(true, |b| amount_out > b.amount_out) {
                best = Some(Quote {
                    path,
                    amount_in,
                    amount_out,
                    from_token: from.clone(),
                    to_token: to.clone(),
                    price_impact: impact,
                    spender: chain.router,
                });
            }
        }

        match &best {
            Some(q) => info!(
                hops = q.path.len(),
                amount_out = %q.amount_out,
                price_impact = %q.price_impact,
                "selected best route"
            ),
            None => debug!("no candidate produced a quote"),
        }
        best
    }
}

/// Signed deviation of `amount_out` from what oracle prices imply, in percent
/// scaled by 1e18. Positive when the route returns less than expected; zero
/// when either price is unknown.
pub fn price_impact(from: &Token, to: &Token, amount_in: U256, amount_out: U256) -> I256 {
    if from.price.is_zero() || to.price.is_zero() {
        return I256::ZERO;
    }
    let amount_in = math::rescale(amount_in, from.decimals, DEFAULT_DECIMALS);
    let amount_out = math::rescale(amount_out, to.decimals, DEFAULT_DECIMALS);
    let price_from = math::scale_decimal(from.price, DEFAULT_DECIMALS);
    let price_to = math::scale_decimal(to.price, DEFAULT_DECIMALS);

    let expected = math::div_default(math::mul_default(amount_in, price_from), price_to);
    if expected.is_zero() {
        return I256::ZERO;
    }
    let (shortfall, worse) = if expected >= amount_out {
        (expected - amount_out, true)
    } else {
        (amount_out - expected, false)
    };
    let magnitude = I256::try_from(math::percent_of(expected, shortfall, DEFAULT_DECIMALS, false))
        .unwrap_or(I256::MAX);
    if worse {
        magnitude
    } else {
        -magnitude
    }
}
