//! Data types for the Axelarscope API.
//!
//! These structs define the JSON responses returned by the API server. They
//! are provided in a separate crate so that consumers such as the dashboard can
//! depend on them without pulling in the rest of the server implementation.
//!
//! Every data response carries an optional `warning`: when an upstream fetch
//! fails the endpoint returns an empty but correctly shaped payload with the
//! warning set, instead of a 500.

#![allow(missing_docs)]

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use primitives::{CorrelationStrength, Trend};
use serde::Serialize;
use tvl::{AssetTvlRow, ChainInfo, ChainTvlRow, TvlShare};
use utoipa::ToSchema;
use warehouse::{BlocksOverTimeRow, FeesOverTimeRow, TopBlockRow, UsersOverTimeRow};

/// Growth over one lookback window: percentage plus qualitative direction.
/// `pct` is `None` when the baseline count was zero.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct GrowthMetric {
    pub pct: Option<f64>,
    pub trend: Trend,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserStatsResponse {
    pub total_users: u64,
    pub median_txs_per_user: Option<f64>,
    pub warning: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserGrowthResponse {
    pub growth_1d: GrowthMetric,
    pub growth_7d: GrowthMetric,
    pub growth_30d: GrowthMetric,
    pub growth_1y: GrowthMetric,
    pub warning: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UsersOverTimeResponse {
    pub granularity: String,
    pub buckets: Vec<UsersOverTimeRow>,
    pub warning: Option<String>,
}

/// One rung of a fixed distribution ladder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DistributionBucket {
    pub label: String,
    pub count: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserTxDistributionResponse {
    pub buckets: Vec<DistributionBucket>,
    pub warning: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserActivityDistributionResponse {
    pub buckets: Vec<DistributionBucket>,
    pub warning: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FeeStatsResponse {
    pub total_axl: Option<f64>,
    pub avg_axl: Option<f64>,
    pub median_axl: Option<f64>,
    pub max_axl: Option<f64>,
    pub warning: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FeesOverTimeResponse {
    pub granularity: String,
    pub buckets: Vec<FeesOverTimeRow>,
    pub warning: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GasStatsResponse {
    pub total_gas_used: u64,
    pub total_gas_wanted: u64,
    pub avg_gas_used: Option<f64>,
    pub avg_gas_wanted: Option<f64>,
    /// Used/wanted ratio; `None` when nothing was wanted.
    pub efficiency: Option<f64>,
    pub warning: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BlockStatsResponse {
    pub range_blocks: u64,
    pub range_avg_txs: Option<f64>,
    pub last_day_blocks: u64,
    pub last_day_avg_txs: Option<f64>,
    pub warning: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BlocksOverTimeResponse {
    pub granularity: String,
    pub buckets: Vec<BlocksOverTimeRow>,
    pub warning: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BlockDistributionResponse {
    pub buckets: Vec<DistributionBucket>,
    pub warning: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TopBlocksResponse {
    pub blocks: Vec<TopBlockRow>,
    pub warning: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BlockCorrelationResponse {
    /// Pearson coefficient; `None` when the range holds too few days.
    pub coefficient: Option<f64>,
    pub strength: Option<CorrelationStrength>,
    pub description: Option<String>,
    pub warning: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TvlChainsResponse {
    pub rows: Vec<ChainTvlRow>,
    pub warning: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TvlAssetsResponse {
    pub rows: Vec<AssetTvlRow>,
    pub warning: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TvlSummaryResponse {
    pub total_tvl_usd: f64,
    pub by_asset_type: Vec<TvlShare>,
    pub by_chain: Vec<TvlShare>,
    pub warning: Option<String>,
}

/// Combined dashboard payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct OverviewResponse {
    pub users: UserStatsResponse,
    pub user_growth: UserGrowthResponse,
    pub fees: FeeStatsResponse,
    pub blocks: BlockStatsResponse,
    pub tvl: TvlSummaryResponse,
    pub top_chains: Vec<ChainInfo>,
}

/// Payload of the `/health` endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// RFC 7807 style problem document.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub r#type: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(r#type: &str, title: &str, status: StatusCode, detail: String) -> Self {
        Self {
            r#type: r#type.to_owned(),
            title: title.to_owned(),
            status: status.as_u16(),
            detail,
        }
    }

    pub fn invalid_params(detail: String) -> Self {
        Self::new("invalid-params", "Bad Request", StatusCode::BAD_REQUEST, detail)
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_response_serializes_as_problem_document() {
        let err = ErrorResponse::invalid_params("granularity must be a string".to_owned());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "invalid-params");
        assert_eq!(json["title"], "Bad Request");
        assert_eq!(json["status"], 400);
        assert_eq!(json["detail"], "granularity must be a string");
    }

    #[test]
    fn growth_metric_serializes_null_pct() {
        let metric = GrowthMetric { pct: None, trend: Trend::Flat };
        let json = serde_json::to_value(metric).unwrap();
        assert!(json["pct"].is_null());
        assert_eq!(json["trend"], "flat");
    }
}
