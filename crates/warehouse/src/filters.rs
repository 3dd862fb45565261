//! Chart filter state shared by every analytics query.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Time bucket width for over-time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    Month,
}

impl Granularity {
    /// Parse a query-string value. Unrecognized values fall back to `Day`
    /// rather than erroring, so a stale link still renders a chart.
    pub fn from_param(value: &str) -> Self {
        match value {
            "week" => Self::Week,
            "month" => Self::Month,
            _ => Self::Day,
        }
    }

    /// ClickHouse truncation expression over a timestamp or date column.
    /// Weeks bucket from Monday, mode 1.
    pub fn trunc_expr(&self, column: &str) -> String {
        match self {
            Self::Day => format!("toDate({column})"),
            Self::Week => format!("toStartOfWeek({column}, 1)"),
            Self::Month => format!("toStartOfMonth({column})"),
        }
    }

    /// Lowercase label used in response payloads.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

/// Inclusive calendar date window.
///
/// A reversed window (`start > end`) is kept as-is; the generated predicate
/// simply matches nothing and queries return empty result sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// SQL predicate bounding `column` to the window, inclusive on both ends.
    pub fn filter(&self, column: &str) -> String {
        format!(
            "toDate({column}) >= '{start}' AND toDate({column}) <= '{end}'",
            start = self.start,
            end = self.end,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn granularity_parse_is_total() {
        assert_eq!(Granularity::from_param("day"), Granularity::Day);
        assert_eq!(Granularity::from_param("week"), Granularity::Week);
        assert_eq!(Granularity::from_param("month"), Granularity::Month);
        assert_eq!(Granularity::from_param("fortnight"), Granularity::Day);
        assert_eq!(Granularity::from_param(""), Granularity::Day);
    }

    #[test]
    fn granularity_trunc_expressions() {
        assert_eq!(Granularity::Day.trunc_expr("block_timestamp"), "toDate(block_timestamp)");
        assert_eq!(
            Granularity::Week.trunc_expr("block_timestamp"),
            "toStartOfWeek(block_timestamp, 1)"
        );
        assert_eq!(Granularity::Month.trunc_expr("first_tx"), "toStartOfMonth(first_tx)");
    }

    #[test]
    fn range_filter_is_inclusive_both_ends() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 6, 30).unwrap(),
        );
        assert_eq!(
            range.filter("block_timestamp"),
            "toDate(block_timestamp) >= '2023-01-01' AND toDate(block_timestamp) <= '2023-06-30'"
        );
    }

    #[test]
    fn reversed_range_is_preserved() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2023, 6, 30).unwrap(),
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
        );
        assert_eq!(
            range.filter("block_timestamp"),
            "toDate(block_timestamp) >= '2023-06-30' AND toDate(block_timestamp) <= '2023-01-01'"
        );
    }
}
