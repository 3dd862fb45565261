//! API server binary

use std::{net::SocketAddr, time::Duration};

use clap::Parser;
use config::{DEFAULT_ALLOWED_ORIGINS, Opts};
use dotenvy::dotenv;
use server::run;
use tracing_subscriber::filter::EnvFilter;
use tvl::TvlClient;
use warehouse::WarehouseReader;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenv().ok();
    let opts = Opts::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let reader = WarehouseReader::new(
        opts.warehouse.url,
        opts.warehouse.db,
        opts.warehouse.username,
        opts.warehouse.password,
        Duration::from_secs(opts.warehouse.query_cache_ttl_secs),
    )?;

    let tvl = TvlClient::new(
        opts.tvl.bridge_url,
        opts.tvl.breakdown_url,
        opts.tvl.chains_url,
        Duration::from_secs(opts.tvl.cache_ttl_secs),
    );

    let allowed_origins = opts
        .api
        .allowed_origins
        .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.split(',').map(ToOwned::to_owned).collect());

    let addr: SocketAddr = format!("{}:{}", opts.api.host, opts.api.port).parse()?;
    run(addr, reader, tvl, allowed_origins).await
}
