//! Fee and gas analysis endpoints.

use crate::{
    ApiState,
    helpers::degrade_warning,
    validation::{FilterQuery, resolve_filters},
};
use api_types::{ErrorResponse, FeeStatsResponse, FeesOverTimeResponse, GasStatsResponse};
use axum::{
    Json,
    extract::{Query, State},
};
use primitives::{nan_to_none, safe_div};
use warehouse::{FeeStatsRow, GasStatsRow};

/// Map the aggregate row into the response, turning empty-window NaNs into
/// nulls.
pub(crate) fn fee_stats_response(
    row: Option<FeeStatsRow>,
    warning: Option<String>,
) -> FeeStatsResponse {
    match row {
        Some(row) => FeeStatsResponse {
            total_axl: nan_to_none(row.total_axl),
            avg_axl: nan_to_none(row.avg_axl),
            median_axl: nan_to_none(row.median_axl),
            max_axl: nan_to_none(row.max_axl),
            warning,
        },
        None => FeeStatsResponse {
            total_axl: None,
            avg_axl: None,
            median_axl: None,
            max_axl: None,
            warning,
        },
    }
}

fn gas_stats_response(row: Option<GasStatsRow>, warning: Option<String>) -> GasStatsResponse {
    match row {
        Some(row) => GasStatsResponse {
            total_gas_used: row.total_gas_used,
            total_gas_wanted: row.total_gas_wanted,
            avg_gas_used: nan_to_none(row.avg_gas_used),
            avg_gas_wanted: nan_to_none(row.avg_gas_wanted),
            efficiency: safe_div(row.total_gas_used as f64, row.total_gas_wanted as f64),
            warning,
        },
        None => GasStatsResponse {
            total_gas_used: 0,
            total_gas_wanted: 0,
            avg_gas_used: None,
            avg_gas_wanted: None,
            efficiency: None,
            warning,
        },
    }
}

#[utoipa::path(
    get,
    path = "/fees/stats",
    params(FilterQuery),
    responses(
        (status = 200, description = "Fee aggregates in AXL for the filter range", body = FeeStatsResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse)
    ),
    tag = "fees"
)]
pub(crate) async fn fee_stats(
    State(state): State<ApiState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<FeeStatsResponse>, ErrorResponse> {
    let filters = resolve_filters(&query)?;
    match state.reader().get_fee_stats(filters.range).await {
        Ok(row) => Ok(Json(fee_stats_response(row, None))),
        Err(e) => Ok(Json(fee_stats_response(None, degrade_warning("fee stats", &e)))),
    }
}

#[utoipa::path(
    get,
    path = "/fees/over-time",
    params(FilterQuery),
    responses(
        (status = 200, description = "Total and average fee per bucket", body = FeesOverTimeResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse)
    ),
    tag = "fees"
)]
pub(crate) async fn fees_over_time(
    State(state): State<ApiState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<FeesOverTimeResponse>, ErrorResponse> {
    let filters = resolve_filters(&query)?;
    let granularity = filters.granularity.as_str().to_owned();
    match state.reader().get_fees_over_time(filters.range, filters.granularity).await {
        Ok(buckets) => Ok(Json(FeesOverTimeResponse { granularity, buckets, warning: None })),
        Err(e) => Ok(Json(FeesOverTimeResponse {
            granularity,
            buckets: Vec::new(),
            warning: degrade_warning("fees over time", &e),
        })),
    }
}

#[utoipa::path(
    get,
    path = "/gas/stats",
    params(FilterQuery),
    responses(
        (status = 200, description = "Gas usage aggregates for the filter range", body = GasStatsResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse)
    ),
    tag = "fees"
)]
pub(crate) async fn gas_stats(
    State(state): State<ApiState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<GasStatsResponse>, ErrorResponse> {
    let filters = resolve_filters(&query)?;
    match state.reader().get_gas_stats(filters.range).await {
        Ok(row) => Ok(Json(gas_stats_response(row, None))),
        Err(e) => Ok(Json(gas_stats_response(None, degrade_warning("gas stats", &e)))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_aggregates_become_null() {
        let row = FeeStatsRow { total_axl: 0.0, avg_axl: f64::NAN, median_axl: f64::NAN, max_axl: f64::NAN };
        let response = fee_stats_response(Some(row), None);
        assert_eq!(response.total_axl, Some(0.0));
        assert_eq!(response.avg_axl, None);
        assert_eq!(response.median_axl, None);
        assert_eq!(response.max_axl, None);
    }

    #[test]
    fn gas_efficiency_guards_zero_wanted() {
        let row = GasStatsRow {
            total_gas_used: 0,
            total_gas_wanted: 0,
            avg_gas_used: f64::NAN,
            avg_gas_wanted: f64::NAN,
        };
        let response = gas_stats_response(Some(row), None);
        assert_eq!(response.efficiency, None);

        let row = GasStatsRow {
            total_gas_used: 75,
            total_gas_wanted: 100,
            avg_gas_used: 75.0,
            avg_gas_wanted: 100.0,
        };
        let response = gas_stats_response(Some(row), None);
        assert_eq!(response.efficiency, Some(0.75));
    }
}
