//! Typed results for the analytics queries.
//!
//! Rows that come straight off the wire derive [`clickhouse::Row`]; series
//! rows that expose a [`DateTime`] bucket are mapped from raw unix-timestamp
//! rows inside the reader.

use chrono::{DateTime, Utc};
use clickhouse::Row;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Distinct active users as of fixed offsets behind the current date, used to
/// derive 1D/7D/30D/1Y growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Row, Serialize, Deserialize, ToSchema)]
pub struct UserGrowthCounts {
    /// Users active on the last complete day.
    pub d1: u64,
    /// Users active two days ago.
    pub d2: u64,
    /// Users active eight days ago.
    pub d8: u64,
    pub d31: u64,
    pub d366: u64,
}

/// One bucket of the users-over-time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UsersOverTimeRow {
    pub bucket: DateTime<Utc>,
    pub total_users: u64,
    pub new_users: u64,
    pub returning_users: u64,
    pub cumulative_new_users: u64,
}

/// Distribution point: how many users sent exactly `tx_count` transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Row, Serialize, Deserialize, ToSchema)]
pub struct TxCountRow {
    pub tx_count: u64,
    pub users: u64,
}

/// Distribution point: how many users were active on `active_days` days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Row, Serialize, Deserialize, ToSchema)]
pub struct ActiveDaysRow {
    pub active_days: u64,
    pub users: u64,
}

/// Aggregate fee figures, already scaled from uaxl to AXL.
///
/// Aggregates over an empty window come back as NaN from the warehouse;
/// callers are expected to map those to `null` before serializing.
#[derive(Debug, Clone, Copy, PartialEq, Row, Serialize, Deserialize)]
pub struct FeeStatsRow {
    pub total_axl: f64,
    pub avg_axl: f64,
    pub median_axl: f64,
    pub max_axl: f64,
}

/// One bucket of the fees-over-time series, in AXL.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FeesOverTimeRow {
    pub bucket: DateTime<Utc>,
    pub total_axl: f64,
    pub avg_axl: f64,
}

/// Aggregate gas usage over the filtered window.
#[derive(Debug, Clone, Copy, PartialEq, Row, Serialize, Deserialize)]
pub struct GasStatsRow {
    pub total_gas_used: u64,
    pub total_gas_wanted: u64,
    pub avg_gas_used: f64,
    pub avg_gas_wanted: f64,
}

/// Block production over the last complete day.
#[derive(Debug, Clone, Copy, PartialEq, Row, Serialize, Deserialize)]
pub struct BlockStatsRow {
    pub blocks: u64,
    pub avg_txs: f64,
}

/// One bucket of the blocks-over-time series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BlocksOverTimeRow {
    pub bucket: DateTime<Utc>,
    pub blocks: u64,
    pub avg_txs: f64,
    pub validators: u64,
    pub cumulative_blocks: u64,
}

/// Distribution point: how many blocks carried exactly `tx_count` transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Row, Serialize, Deserialize, ToSchema)]
pub struct BlockTxCountRow {
    pub tx_count: u64,
    pub blocks: u64,
}

/// A single entry of the busiest-blocks leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TopBlockRow {
    pub block_id: u64,
    pub block_date: DateTime<Utc>,
    pub tx_count: u64,
    pub validator_hash: String,
}
