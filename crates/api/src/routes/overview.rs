//! Combined dashboard endpoint.

use crate::{
    ApiState,
    helpers::degrade_warning,
    routes::{
        blocks::block_stats_response,
        fees::fee_stats_response,
        users::{degraded_growth_response, growth_response},
    },
    validation::{FilterQuery, resolve_filters},
};
use api_types::{ErrorResponse, OverviewResponse, TvlSummaryResponse, UserStatsResponse};
use axum::{
    Json,
    extract::{Query, State},
};
use tvl::{share_by_asset_type, share_by_chain, total_tvl};

/// Number of chains surfaced on the overview leaderboard.
pub const TOP_CHAINS_LIMIT: usize = 10;

#[utoipa::path(
    get,
    path = "/overview",
    params(FilterQuery),
    responses(
        (status = 200, description = "Combined dashboard payload", body = OverviewResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse)
    ),
    tag = "overview"
)]
pub(crate) async fn overview(
    State(state): State<ApiState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<OverviewResponse>, ErrorResponse> {
    let filters = resolve_filters(&query)?;
    let reader = state.reader();
    let warehouse = tokio::try_join!(
        reader.get_total_users(filters.range),
        reader.get_median_user_txs(filters.range),
        reader.get_user_growth_counts(),
        reader.get_fee_stats(filters.range),
        reader.get_block_stats(filters.range),
        reader.get_block_stats_last_day(),
    );

    let breakdown = state.tvl().fetch_asset_breakdown().await;
    let tvl_summary = TvlSummaryResponse {
        total_tvl_usd: total_tvl(&breakdown.rows),
        by_asset_type: share_by_asset_type(&breakdown.rows),
        by_chain: share_by_chain(&breakdown.rows),
        warning: breakdown.warning,
    };

    let chains = state.tvl().fetch_chains().await;
    let mut top_chains = chains.rows;
    top_chains.sort_by(|a, b| {
        b.tvl.unwrap_or(f64::NEG_INFINITY).total_cmp(&a.tvl.unwrap_or(f64::NEG_INFINITY))
    });
    top_chains.truncate(TOP_CHAINS_LIMIT);

    let response = match warehouse {
        Ok((total_users, median, growth, fee_row, range_blocks, last_day_blocks)) => {
            OverviewResponse {
                users: UserStatsResponse {
                    total_users,
                    median_txs_per_user: Some(median),
                    warning: None,
                },
                user_growth: growth_response(&growth, None),
                fees: fee_stats_response(fee_row, None),
                blocks: block_stats_response(range_blocks, last_day_blocks, None),
                tvl: tvl_summary,
                top_chains,
            }
        }
        Err(e) => {
            let warning = degrade_warning("overview", &e);
            OverviewResponse {
                users: UserStatsResponse {
                    total_users: 0,
                    median_txs_per_user: None,
                    warning: warning.clone(),
                },
                user_growth: degraded_growth_response(warning.clone()),
                fees: fee_stats_response(None, warning.clone()),
                blocks: block_stats_response(None, None, warning),
                tvl: tvl_summary,
                top_chains,
            }
        }
    };
    Ok(Json(response))
}
