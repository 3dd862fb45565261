//! Axelarscope configuration
use clap::Parser;
use url::Url;

/// Origins allowed by default when `API_ALLOWED_ORIGINS` is not set.
pub const DEFAULT_ALLOWED_ORIGINS: &str = "https://axelarscope.xyz,https://www.axelarscope.xyz";

/// Clickhouse warehouse configuration options
#[derive(Debug, Clone, Parser)]
pub struct WarehouseOpts {
    /// Clickhouse URL
    #[clap(long, env = "CLICKHOUSE_URL")]
    pub url: Url,
    /// Clickhouse database
    #[clap(long, env = "CLICKHOUSE_DB")]
    pub db: String,
    /// Clickhouse username
    #[clap(long, env = "CLICKHOUSE_USERNAME")]
    pub username: String,
    /// Clickhouse password
    #[clap(long, env = "CLICKHOUSE_PASSWORD")]
    pub password: String,
    /// Query result cache TTL in seconds (0 disables caching)
    #[clap(long, env = "QUERY_CACHE_TTL_SECS", default_value = "3600")]
    pub query_cache_ttl_secs: u64,
}

/// TVL endpoint configuration options
#[derive(Debug, Clone, Parser)]
pub struct TvlOpts {
    /// Per-chain bridged TVL endpoint
    #[clap(long, env = "TVL_BRIDGE_URL")]
    pub bridge_url: Url,
    /// Nested per-asset TVL breakdown endpoint
    #[clap(long, env = "TVL_BREAKDOWN_URL")]
    pub breakdown_url: Url,
    /// Generic chains listing endpoint
    #[clap(long, env = "TVL_CHAINS_URL")]
    pub chains_url: Url,
    /// TVL response cache TTL in seconds (0 disables caching)
    #[clap(long, env = "TVL_CACHE_TTL_SECS", default_value = "3600")]
    pub cache_ttl_secs: u64,
}

/// API server configuration options
#[derive(Debug, Clone, Parser)]
pub struct ApiOpts {
    /// API server host
    #[clap(long, env = "API_HOST", default_value = "127.0.0.1")]
    pub host: String,
    /// API server port
    #[clap(long, env = "API_PORT", default_value = "3000")]
    pub port: u16,
    /// Comma separated list of allowed CORS origins
    #[clap(long, env = "API_ALLOWED_ORIGINS", value_delimiter = ',')]
    pub allowed_origins: Option<Vec<String>>,
}

/// CLI options for axelarscope
#[derive(Debug, Clone, Parser)]
pub struct Opts {
    /// Clickhouse warehouse configuration
    #[clap(flatten)]
    pub warehouse: WarehouseOpts,

    /// TVL endpoint configuration
    #[clap(flatten)]
    pub tvl: TvlOpts,

    /// API server configuration
    #[clap(flatten)]
    pub api: ApiOpts,
}
