use anyhow::{anyhow, Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use ultra_route::config::AppConfig;
use ultra_route::router::{create_api_router, Router};
use ultra_route::state::MarketSnapshot;
use ultra_route::transport::{JsonRpc, RpcQuoter};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing().context("initialize tracing subscriber")?;

    if let Err(err) = run().await {
        tracing::error!(error = ?err, "fatal router error");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> Result<()> {
    let config = AppConfig::load().context("load configuration from environment")?;

    let snapshot = MarketSnapshot::load(&config.snapshot_path)
        .with_context(|| format!("load snapshot {}", config.snapshot_path.display()))?;
    if snapshot.pools.is_empty() {
        warn!("snapshot has no pools; every quote will report no route");
    }

    let jsonrpc = JsonRpc::new(config.rpc_endpoint.to_string());
    let quoter = RpcQuoter::new(jsonrpc.clone(), config.chain.quoter)
        .with_max_elapsed(Duration::from_secs(3));

    let router = Arc::new(Router::new(
        config.chain.clone(),
        config.routing.clone(),
        snapshot,
        Arc::new(quoter),
    ));

    info!(
        chain_id = config.chain.chain_id,
        router = %config.chain.router,
        quoter = %config.chain.quoter,
        rpc = %jsonrpc.endpoint(),
        max_hops = config.routing.max_hops,
        "ultra-route online"
    );

    let api_router = create_api_router(router);
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("bind API server address {}", config.listen_addr))?;
    info!(address = %config.listen_addr, "HTTP API server starting");

    axum::serve(listener, api_router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("API server error")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "ctrl_c listener error");
    }
    info!("Shutdown signal received, exiting");
}

fn init_tracing() -> Result<()> {
    let env_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info,hyper=warn,reqwest=warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(env_filter))
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!("tracing subscriber init: {err}"))
}
