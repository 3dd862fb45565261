//! Block analysis endpoints.

use crate::{
    ApiState,
    helpers::{degrade_warning, fold_block_tx_ladder},
    validation::{FilterQuery, resolve_filters},
};
use api_types::{
    BlockCorrelationResponse, BlockDistributionResponse, BlockStatsResponse,
    BlocksOverTimeResponse, ErrorResponse, TopBlocksResponse,
};
use axum::{
    Json,
    extract::{Query, State},
};
use primitives::{CorrelationStrength, nan_to_none};
use warehouse::BlockStatsRow;

/// Number of entries on the busiest-blocks leaderboard.
pub const TOP_BLOCKS_LIMIT: u64 = 10;

pub(crate) fn block_stats_response(
    range_row: Option<BlockStatsRow>,
    last_day_row: Option<BlockStatsRow>,
    warning: Option<String>,
) -> BlockStatsResponse {
    BlockStatsResponse {
        range_blocks: range_row.as_ref().map(|r| r.blocks).unwrap_or_default(),
        range_avg_txs: range_row.and_then(|r| nan_to_none(r.avg_txs)),
        last_day_blocks: last_day_row.as_ref().map(|r| r.blocks).unwrap_or_default(),
        last_day_avg_txs: last_day_row.and_then(|r| nan_to_none(r.avg_txs)),
        warning,
    }
}

#[utoipa::path(
    get,
    path = "/blocks/stats",
    params(FilterQuery),
    responses(
        (status = 200, description = "Block production for the range and the last day", body = BlockStatsResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse)
    ),
    tag = "blocks"
)]
pub(crate) async fn block_stats(
    State(state): State<ApiState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<BlockStatsResponse>, ErrorResponse> {
    let filters = resolve_filters(&query)?;
    let reader = state.reader();
    match tokio::try_join!(
        reader.get_block_stats(filters.range),
        reader.get_block_stats_last_day(),
    ) {
        Ok((range_row, last_day_row)) => {
            Ok(Json(block_stats_response(range_row, last_day_row, None)))
        }
        Err(e) => Ok(Json(block_stats_response(None, None, degrade_warning("block stats", &e)))),
    }
}

#[utoipa::path(
    get,
    path = "/blocks/over-time",
    params(FilterQuery),
    responses(
        (status = 200, description = "Block production per bucket", body = BlocksOverTimeResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse)
    ),
    tag = "blocks"
)]
pub(crate) async fn blocks_over_time(
    State(state): State<ApiState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<BlocksOverTimeResponse>, ErrorResponse> {
    let filters = resolve_filters(&query)?;
    let granularity = filters.granularity.as_str().to_owned();
    match state.reader().get_blocks_over_time(filters.range, filters.granularity).await {
        Ok(buckets) => Ok(Json(BlocksOverTimeResponse { granularity, buckets, warning: None })),
        Err(e) => Ok(Json(BlocksOverTimeResponse {
            granularity,
            buckets: Vec::new(),
            warning: degrade_warning("blocks over time", &e),
        })),
    }
}

#[utoipa::path(
    get,
    path = "/blocks/distribution",
    params(FilterQuery),
    responses(
        (status = 200, description = "Blocks folded into the transaction-count ladder", body = BlockDistributionResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse)
    ),
    tag = "blocks"
)]
pub(crate) async fn block_distribution(
    State(state): State<ApiState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<BlockDistributionResponse>, ErrorResponse> {
    let filters = resolve_filters(&query)?;
    match state.reader().get_block_tx_distribution(filters.range).await {
        Ok(rows) => Ok(Json(BlockDistributionResponse {
            buckets: fold_block_tx_ladder(&rows),
            warning: None,
        })),
        Err(e) => Ok(Json(BlockDistributionResponse {
            buckets: fold_block_tx_ladder(&[]),
            warning: degrade_warning("block distribution", &e),
        })),
    }
}

#[utoipa::path(
    get,
    path = "/blocks/top",
    params(FilterQuery),
    responses(
        (status = 200, description = "Busiest blocks in the range", body = TopBlocksResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse)
    ),
    tag = "blocks"
)]
pub(crate) async fn top_blocks(
    State(state): State<ApiState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<TopBlocksResponse>, ErrorResponse> {
    let filters = resolve_filters(&query)?;
    match state.reader().get_top_blocks(filters.range, TOP_BLOCKS_LIMIT).await {
        Ok(blocks) => Ok(Json(TopBlocksResponse { blocks, warning: None })),
        Err(e) => Ok(Json(TopBlocksResponse {
            blocks: Vec::new(),
            warning: degrade_warning("top blocks", &e),
        })),
    }
}

#[utoipa::path(
    get,
    path = "/blocks/correlation",
    params(FilterQuery),
    responses(
        (status = 200, description = "Correlation between daily block count and tx volume", body = BlockCorrelationResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse)
    ),
    tag = "blocks"
)]
pub(crate) async fn block_correlation(
    State(state): State<ApiState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<BlockCorrelationResponse>, ErrorResponse> {
    let filters = resolve_filters(&query)?;
    match state.reader().get_block_tx_correlation(filters.range).await {
        Ok(coefficient) => {
            let strength = coefficient.map(CorrelationStrength::from_coefficient);
            Ok(Json(BlockCorrelationResponse {
                coefficient,
                strength,
                description: strength.map(|s| s.description().to_owned()),
                warning: None,
            }))
        }
        Err(e) => Ok(Json(BlockCorrelationResponse {
            coefficient: None,
            strength: None,
            description: None,
            warning: degrade_warning("block correlation", &e),
        })),
    }
}
