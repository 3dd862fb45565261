//! TVL analysis endpoints. These read the HTTP providers, not the warehouse,
//! and never fail: a degraded fetch yields an empty payload with a warning.

use crate::ApiState;
use api_types::{TvlAssetsResponse, TvlChainsResponse, TvlSummaryResponse};
use axum::{Json, extract::State};
use tvl::{share_by_asset_type, share_by_chain, total_tvl};

#[utoipa::path(
    get,
    path = "/tvl/chains",
    responses(
        (status = 200, description = "Per-chain bridged TVL, sorted descending", body = TvlChainsResponse)
    ),
    tag = "tvl"
)]
pub(crate) async fn tvl_chains(State(state): State<ApiState>) -> Json<TvlChainsResponse> {
    let fetched = state.tvl().fetch_chain_tvl().await;
    Json(TvlChainsResponse { rows: fetched.rows, warning: fetched.warning })
}

#[utoipa::path(
    get,
    path = "/tvl/assets",
    responses(
        (status = 200, description = "Flattened per-asset per-chain TVL breakdown", body = TvlAssetsResponse)
    ),
    tag = "tvl"
)]
pub(crate) async fn tvl_assets(State(state): State<ApiState>) -> Json<TvlAssetsResponse> {
    let fetched = state.tvl().fetch_asset_breakdown().await;
    Json(TvlAssetsResponse { rows: fetched.rows, warning: fetched.warning })
}

#[utoipa::path(
    get,
    path = "/tvl/summary",
    responses(
        (status = 200, description = "Network-wide TVL with asset-type and chain splits", body = TvlSummaryResponse)
    ),
    tag = "tvl"
)]
pub(crate) async fn tvl_summary(State(state): State<ApiState>) -> Json<TvlSummaryResponse> {
    let fetched = state.tvl().fetch_asset_breakdown().await;
    Json(TvlSummaryResponse {
        total_tvl_usd: total_tvl(&fetched.rows),
        by_asset_type: share_by_asset_type(&fetched.rows),
        by_chain: share_by_chain(&fetched.rows),
        warning: fetched.warning,
    })
}
