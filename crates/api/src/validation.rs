//! Validation functions for API query parameters

use api_types::ErrorResponse;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use warehouse::{DateRange, Granularity};

/// Default inclusive start of the filter window when `start` is omitted.
/// Shortly before the network's first mainnet block.
pub const DEFAULT_START: &str = "2022-01-01";

/// Common filter parameters accepted by every analytics endpoint.
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct FilterQuery {
    /// Bucket width for over-time series: `day`, `week` or `month`.
    /// Unrecognized values fall back to `day`.
    pub granularity: Option<String>,
    /// Inclusive start date, `YYYY-MM-DD`.
    pub start: Option<String>,
    /// Inclusive end date, `YYYY-MM-DD`. Defaults to today.
    pub end: Option<String>,
}

/// Resolved filter selection handed to the warehouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterState {
    /// Inclusive date window.
    pub range: DateRange,
    /// Bucket width for over-time series.
    pub granularity: Granularity,
}

fn parse_date(value: &str, param: &str) -> Result<NaiveDate, ErrorResponse> {
    value.parse().map_err(|_| {
        ErrorResponse::invalid_params(format!("{param} must be a YYYY-MM-DD date, got '{value}'"))
    })
}

/// Resolve query parameters into a [`FilterState`].
///
/// A reversed window (`start > end`) is not an error: it flows through and
/// the affected queries return empty result sets.
pub fn resolve_filters(query: &FilterQuery) -> Result<FilterState, ErrorResponse> {
    let start = match query.start.as_deref() {
        Some(value) => parse_date(value, "start")?,
        None => parse_date(DEFAULT_START, "start")?,
    };
    let end = match query.end.as_deref() {
        Some(value) => parse_date(value, "end")?,
        None => Utc::now().date_naive(),
    };
    let granularity = query.granularity.as_deref().map_or(Granularity::Day, Granularity::from_param);

    Ok(FilterState { range: DateRange::new(start, end), granularity })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(granularity: Option<&str>, start: Option<&str>, end: Option<&str>) -> FilterQuery {
        FilterQuery {
            granularity: granularity.map(ToOwned::to_owned),
            start: start.map(ToOwned::to_owned),
            end: end.map(ToOwned::to_owned),
        }
    }

    #[test]
    fn resolves_explicit_filters() {
        let state =
            resolve_filters(&query(Some("week"), Some("2023-01-01"), Some("2023-06-30"))).unwrap();
        assert_eq!(state.granularity, Granularity::Week);
        assert_eq!(state.range.start.to_string(), "2023-01-01");
        assert_eq!(state.range.end.to_string(), "2023-06-30");
    }

    #[test]
    fn defaults_when_omitted() {
        let state = resolve_filters(&FilterQuery::default()).unwrap();
        assert_eq!(state.granularity, Granularity::Day);
        assert_eq!(state.range.start.to_string(), DEFAULT_START);
        assert_eq!(state.range.end, Utc::now().date_naive());
    }

    #[test]
    fn unknown_granularity_falls_back_to_day() {
        let state = resolve_filters(&query(Some("hourly"), None, None)).unwrap();
        assert_eq!(state.granularity, Granularity::Day);
    }

    #[test]
    fn reversed_range_is_not_an_error() {
        let state =
            resolve_filters(&query(None, Some("2023-06-30"), Some("2023-01-01"))).unwrap();
        assert!(state.range.start > state.range.end);
    }

    #[test]
    fn malformed_date_is_rejected() {
        let err = resolve_filters(&query(None, Some("yesterday"), None)).unwrap_err();
        assert_eq!(err.r#type, "invalid-params");
        assert_eq!(err.status, 400);
        assert!(err.detail.contains("start"));

        let err = resolve_filters(&query(None, None, Some("30-06-2023"))).unwrap_err();
        assert!(err.detail.contains("end"));
    }
}
