//! User analysis endpoints.

use crate::{
    ApiState,
    helpers::{
        degrade_warning, fold_active_days_ladder, fold_user_tx_ladder, growth_metric,
        unknown_growth,
    },
    validation::{FilterQuery, resolve_filters},
};
use api_types::{
    ErrorResponse, UserActivityDistributionResponse, UserGrowthResponse, UserStatsResponse,
    UserTxDistributionResponse, UsersOverTimeResponse,
};
use axum::{
    Json,
    extract::{Query, State},
};
use warehouse::UserGrowthCounts;

/// Build the growth payload out of the fixed-offset activity counts.
pub(crate) fn growth_response(counts: &UserGrowthCounts, warning: Option<String>) -> UserGrowthResponse {
    UserGrowthResponse {
        growth_1d: growth_metric(counts.d1, counts.d2),
        growth_7d: growth_metric(counts.d1, counts.d8),
        growth_30d: growth_metric(counts.d1, counts.d31),
        growth_1y: growth_metric(counts.d1, counts.d366),
        warning,
    }
}

pub(crate) fn degraded_growth_response(warning: Option<String>) -> UserGrowthResponse {
    UserGrowthResponse {
        growth_1d: unknown_growth(),
        growth_7d: unknown_growth(),
        growth_30d: unknown_growth(),
        growth_1y: unknown_growth(),
        warning,
    }
}

#[utoipa::path(
    get,
    path = "/users/stats",
    params(FilterQuery),
    responses(
        (status = 200, description = "User totals for the filter range", body = UserStatsResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse)
    ),
    tag = "users"
)]
pub(crate) async fn user_stats(
    State(state): State<ApiState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<UserStatsResponse>, ErrorResponse> {
    let filters = resolve_filters(&query)?;
    let reader = state.reader();
    match tokio::try_join!(
        reader.get_total_users(filters.range),
        reader.get_median_user_txs(filters.range),
    ) {
        Ok((total_users, median)) => Ok(Json(UserStatsResponse {
            total_users,
            median_txs_per_user: Some(median),
            warning: None,
        })),
        Err(e) => Ok(Json(UserStatsResponse {
            total_users: 0,
            median_txs_per_user: None,
            warning: degrade_warning("user stats", &e),
        })),
    }
}

#[utoipa::path(
    get,
    path = "/users/growth",
    responses(
        (status = 200, description = "Short and long horizon user growth", body = UserGrowthResponse)
    ),
    tag = "users"
)]
pub(crate) async fn user_growth(
    State(state): State<ApiState>,
) -> Result<Json<UserGrowthResponse>, ErrorResponse> {
    match state.reader().get_user_growth_counts().await {
        Ok(counts) => Ok(Json(growth_response(&counts, None))),
        Err(e) => Ok(Json(degraded_growth_response(degrade_warning("user growth", &e)))),
    }
}

#[utoipa::path(
    get,
    path = "/users/over-time",
    params(FilterQuery),
    responses(
        (status = 200, description = "Total, new and returning users per bucket", body = UsersOverTimeResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse)
    ),
    tag = "users"
)]
pub(crate) async fn users_over_time(
    State(state): State<ApiState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<UsersOverTimeResponse>, ErrorResponse> {
    let filters = resolve_filters(&query)?;
    let granularity = filters.granularity.as_str().to_owned();
    match state.reader().get_users_over_time(filters.range, filters.granularity).await {
        Ok(buckets) => Ok(Json(UsersOverTimeResponse { granularity, buckets, warning: None })),
        Err(e) => Ok(Json(UsersOverTimeResponse {
            granularity,
            buckets: Vec::new(),
            warning: degrade_warning("users over time", &e),
        })),
    }
}

#[utoipa::path(
    get,
    path = "/users/tx-distribution",
    params(FilterQuery),
    responses(
        (status = 200, description = "Users folded into the transaction-count ladder", body = UserTxDistributionResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse)
    ),
    tag = "users"
)]
pub(crate) async fn user_tx_distribution(
    State(state): State<ApiState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<UserTxDistributionResponse>, ErrorResponse> {
    let filters = resolve_filters(&query)?;
    match state.reader().get_user_tx_distribution(filters.range).await {
        Ok(rows) => Ok(Json(UserTxDistributionResponse {
            buckets: fold_user_tx_ladder(&rows),
            warning: None,
        })),
        Err(e) => Ok(Json(UserTxDistributionResponse {
            buckets: fold_user_tx_ladder(&[]),
            warning: degrade_warning("user tx distribution", &e),
        })),
    }
}

#[utoipa::path(
    get,
    path = "/users/activity-distribution",
    params(FilterQuery),
    responses(
        (status = 200, description = "Users folded into the active-days ladder", body = UserActivityDistributionResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse)
    ),
    tag = "users"
)]
pub(crate) async fn user_activity_distribution(
    State(state): State<ApiState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<UserActivityDistributionResponse>, ErrorResponse> {
    let filters = resolve_filters(&query)?;
    match state.reader().get_user_activity_distribution(filters.range).await {
        Ok(rows) => Ok(Json(UserActivityDistributionResponse {
            buckets: fold_active_days_ladder(&rows),
            warning: None,
        })),
        Err(e) => Ok(Json(UserActivityDistributionResponse {
            buckets: fold_active_days_ladder(&[]),
            warning: degrade_warning("user activity distribution", &e),
        })),
    }
}
