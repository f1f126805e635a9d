// Metrics and observability module
// This file handles collection and reporting of quoting and route
// compilation metrics for the router
//
// Numan Thabit 2025 Nov

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_histogram, register_histogram_vec, CounterVec, Encoder,
    Histogram, HistogramVec, TextEncoder,
};

pub static QUOTE_LATENCY: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "route_quote_latency_seconds",
        "latency of quoter calls",
        &["source"]
    )
    .expect("register route_quote_latency_seconds")
});

pub static QUOTE_OUTCOMES: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "route_quote_outcomes_total",
        "quoter call outcomes per candidate path",
        &["outcome"]
    )
    .expect("register route_quote_outcomes_total")
});

pub static CANDIDATE_PATHS: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "route_candidate_paths",
        "candidate paths per quote request after filtering",
        vec![0.0, 1.0, 4.0, 16.0, 64.0, 256.0, 1024.0]
    )
    .expect("register route_candidate_paths")
});

pub static ROUTES_COMPILED: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "route_compiled_total",
        "compiled routes by group count",
        &["groups"]
    )
    .expect("register route_compiled_total")
});

/// Prometheus text exposition of the default registry.
pub fn render() -> String {
    let mut buf = Vec::new();
    if let Err(err) = TextEncoder::new().encode(&prometheus::gather(), &mut buf) {
        tracing::warn!(error = %err, "encode metrics");
    }
    String::from_utf8(buf).unwrap_or_default()
}
