//! Thin HTTP API over the warehouse and the TVL providers.

pub mod helpers;
pub mod validation;

mod routes;

use api_types::*;
use axum::{Router, routing::get};
use tvl::TvlClient;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use warehouse::WarehouseReader;

/// `OpenAPI` documentation structure
#[derive(Debug, OpenApi)]
#[openapi(
    paths(
        routes::users::user_stats,
        routes::users::user_growth,
        routes::users::users_over_time,
        routes::users::user_tx_distribution,
        routes::users::user_activity_distribution,
        routes::fees::fee_stats,
        routes::fees::fees_over_time,
        routes::fees::gas_stats,
        routes::blocks::block_stats,
        routes::blocks::blocks_over_time,
        routes::blocks::block_distribution,
        routes::blocks::top_blocks,
        routes::blocks::block_correlation,
        routes::tvl::tvl_chains,
        routes::tvl::tvl_assets,
        routes::tvl::tvl_summary,
        routes::overview::overview
    ),
    components(
        schemas(
            validation::FilterQuery,
            GrowthMetric,
            UserStatsResponse,
            UserGrowthResponse,
            UsersOverTimeResponse,
            DistributionBucket,
            UserTxDistributionResponse,
            UserActivityDistributionResponse,
            FeeStatsResponse,
            FeesOverTimeResponse,
            GasStatsResponse,
            BlockStatsResponse,
            BlocksOverTimeResponse,
            BlockDistributionResponse,
            TopBlocksResponse,
            BlockCorrelationResponse,
            TvlChainsResponse,
            TvlAssetsResponse,
            TvlSummaryResponse,
            OverviewResponse,
            api_types::ErrorResponse,
            warehouse::UsersOverTimeRow,
            warehouse::FeesOverTimeRow,
            warehouse::BlocksOverTimeRow,
            warehouse::TopBlockRow,
            tvl::ChainTvlRow,
            tvl::AssetTvlRow,
            tvl::ChainInfo,
            tvl::TvlShare,
            primitives::Trend,
            primitives::CorrelationStrength
        )
    ),
    tags(
        (name = "users", description = "User analysis endpoints"),
        (name = "fees", description = "Fee and gas analysis endpoints"),
        (name = "blocks", description = "Block analysis endpoints"),
        (name = "tvl", description = "TVL analysis endpoints"),
        (name = "overview", description = "Combined dashboard endpoint")
    ),
    info(
        title = "Axelarscope API",
        description = "API for accessing Axelar network metrics and data",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    reader: WarehouseReader,
    tvl: TvlClient,
}

impl std::fmt::Debug for ApiState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiState").finish_non_exhaustive()
    }
}

impl ApiState {
    /// Create a new [`ApiState`].
    pub const fn new(reader: WarehouseReader, tvl: TvlClient) -> Self {
        Self { reader, tvl }
    }

    /// Warehouse reader used by the analytics endpoints.
    pub const fn reader(&self) -> &WarehouseReader {
        &self.reader
    }

    /// Client for the TVL providers.
    pub const fn tvl(&self) -> &TvlClient {
        &self.tvl
    }
}

/// Build the API router with the Swagger UI mounted alongside.
pub fn router(state: ApiState) -> Router {
    let api_routes = Router::new()
        .route("/users/stats", get(routes::users::user_stats))
        .route("/users/growth", get(routes::users::user_growth))
        .route("/users/over-time", get(routes::users::users_over_time))
        .route("/users/tx-distribution", get(routes::users::user_tx_distribution))
        .route("/users/activity-distribution", get(routes::users::user_activity_distribution))
        .route("/fees/stats", get(routes::fees::fee_stats))
        .route("/fees/over-time", get(routes::fees::fees_over_time))
        .route("/gas/stats", get(routes::fees::gas_stats))
        .route("/blocks/stats", get(routes::blocks::block_stats))
        .route("/blocks/over-time", get(routes::blocks::blocks_over_time))
        .route("/blocks/distribution", get(routes::blocks::block_distribution))
        .route("/blocks/top", get(routes::blocks::top_blocks))
        .route("/blocks/correlation", get(routes::blocks::block_correlation))
        .route("/tvl/chains", get(routes::tvl::tvl_chains))
        .route("/tvl/assets", get(routes::tvl::tvl_assets))
        .route("/tvl/summary", get(routes::tvl::tvl_summary))
        .route("/overview", get(routes::overview::overview));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .merge(api_routes)
        .with_state(state)
}
