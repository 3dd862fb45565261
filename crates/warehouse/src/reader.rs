//! Read-only warehouse client and the analytics queries behind the API.

use crate::{
    filters::{DateRange, Granularity},
    models::{
        ActiveDaysRow, BlockStatsRow, BlockTxCountRow, BlocksOverTimeRow, FeeStatsRow,
        FeesOverTimeRow, GasStatsRow, TopBlockRow, TxCountRow, UserGrowthCounts, UsersOverTimeRow,
    },
};
use cache::TtlCache;
use chrono::{DateTime, Utc};
use clickhouse::{Client, Row, sql::Identifier};
use derive_more::Debug;
use eyre::{Context, ContextCompat, Result};
use serde::{Deserialize, Serialize};
use std::{sync::Arc, time::{Duration, Instant}};
use tracing::{debug, error};
use url::Url;

#[derive(Row, Serialize, Deserialize)]
struct CountRow {
    value: u64,
}

#[derive(Row, Serialize, Deserialize)]
struct MedianRow {
    value: f64,
}

#[derive(Row, Serialize, Deserialize)]
struct CorrelationRow {
    coefficient: f64,
}

#[derive(Row, Serialize, Deserialize)]
struct UsersOverTimeRaw {
    bucket_ts: u64,
    total_users: u64,
    new_users: u64,
    cumulative_new_users: u64,
}

#[derive(Row, Serialize, Deserialize)]
struct FeesOverTimeRaw {
    bucket_ts: u64,
    total_axl: f64,
    avg_axl: f64,
}

#[derive(Row, Serialize, Deserialize)]
struct BlocksOverTimeRaw {
    bucket_ts: u64,
    blocks: u64,
    avg_txs: f64,
    validators: u64,
    cumulative_blocks: u64,
}

#[derive(Row, Serialize, Deserialize)]
struct TopBlockRaw {
    block_id: u64,
    block_date_ts: u64,
    tx_count: u64,
    validator_hash: String,
}

fn bucket_time(ts: u64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(ts as i64, 0).context("bucket timestamp out of range")
}

/// Warehouse reader client (read-only operations).
///
/// Range-filtered queries run through a process-wide TTL cache keyed by the
/// full query text, so identical filter selections within the TTL window are
/// served without touching the warehouse. The last-day snapshot is always
/// fetched live.
#[derive(Clone, Debug)]
pub struct WarehouseReader {
    /// Base client
    #[debug(skip)]
    base: Client,
    /// Database name
    db_name: String,
    #[debug(skip)]
    cache: Arc<TtlCache<String>>,
}

impl WarehouseReader {
    /// Create a new warehouse reader client.
    pub fn new(
        url: Url,
        db_name: String,
        username: String,
        password: String,
        cache_ttl: Duration,
    ) -> Result<Self> {
        let client = Client::default().with_url(url).with_user(username).with_password(password);

        Ok(Self { base: client, db_name, cache: Arc::new(TtlCache::new(cache_ttl)) })
    }

    async fn execute<R>(&self, query: &str) -> Result<Vec<R>>
    where
        R: Row + for<'b> Deserialize<'b> + Serialize,
    {
        if let Some(json) = self.cache.get(query) {
            debug!(query = %query, "warehouse query served from cache");
            return serde_json::from_str(&json).context("decoding cached rows failed");
        }

        let client = self.base.clone();
        let start = Instant::now();

        let result = client.query(query).fetch_all::<R>().await;

        let duration_ms = start.elapsed().as_millis();
        match &result {
            Ok(rows) => {
                debug!(query = %query, duration_ms, rows = rows.len(), "warehouse query executed")
            }
            Err(e) => error!(query = %query, duration_ms, error = %e, "warehouse query failed"),
        }
        let rows = result?;

        // Rows containing NaN aggregates are not cacheable as JSON; they are
        // simply refetched next time.
        if let Ok(json) = serde_json::to_string(&rows) {
            self.cache.insert(query, json);
        }
        Ok(rows)
    }

    /// Distinct senders of successful transactions within the range.
    pub async fn get_total_users(&self, range: DateRange) -> Result<u64> {
        let sql = format!(
            "SELECT uniqExact(tx_from) AS value \
             FROM {db}.transactions \
             WHERE tx_succeeded = 1 AND {range}",
            db = self.db_name,
            range = range.filter("block_timestamp"),
        );
        let rows: Vec<CountRow> = self.execute(&sql).await?;
        Ok(rows.into_iter().next().map(|r| r.value).unwrap_or_default())
    }

    /// Median number of transactions per user within the range, rounded to a
    /// whole transaction.
    pub async fn get_median_user_txs(&self, range: DateRange) -> Result<f64> {
        let sql = format!(
            "SELECT round(toFloat64(quantileExact(0.5)(tx_count))) AS value \
             FROM ( \
                 SELECT tx_from, uniqExact(tx_id) AS tx_count \
                 FROM {db}.transactions \
                 WHERE tx_succeeded = 1 AND {range} \
                 GROUP BY tx_from \
             )",
            db = self.db_name,
            range = range.filter("block_timestamp"),
        );
        let rows: Vec<MedianRow> = self.execute(&sql).await?;
        Ok(rows.into_iter().next().map(|r| r.value).unwrap_or_default())
    }

    /// Distinct active users on each of the fixed offsets behind today,
    /// fetched in one pass over the trailing year.
    pub async fn get_user_growth_counts(&self) -> Result<UserGrowthCounts> {
        let sql = format!(
            "SELECT \
                 uniqExactIf(tx_from, toDate(block_timestamp) = today() - 1) AS d1, \
                 uniqExactIf(tx_from, toDate(block_timestamp) = today() - 2) AS d2, \
                 uniqExactIf(tx_from, toDate(block_timestamp) = today() - 8) AS d8, \
                 uniqExactIf(tx_from, toDate(block_timestamp) = today() - 31) AS d31, \
                 uniqExactIf(tx_from, toDate(block_timestamp) = today() - 366) AS d366 \
             FROM {db}.transactions \
             WHERE tx_succeeded = 1 AND toDate(block_timestamp) >= today() - 366",
            db = self.db_name,
        );
        let rows: Vec<UserGrowthCounts> = self.execute(&sql).await?;
        Ok(rows
            .into_iter()
            .next()
            .unwrap_or(UserGrowthCounts { d1: 0, d2: 0, d8: 0, d31: 0, d366: 0 }))
    }

    /// Total, new and cumulative new users per time bucket. A user is new in
    /// the bucket containing their first active day within the range.
    pub async fn get_users_over_time(
        &self,
        range: DateRange,
        granularity: Granularity,
    ) -> Result<Vec<UsersOverTimeRow>> {
        let sql = format!(
            "WITH firsts AS ( \
                 SELECT tx_from, min(toDate(block_timestamp)) AS first_tx \
                 FROM {db}.transactions \
                 WHERE tx_succeeded = 1 AND {range} \
                 GROUP BY tx_from \
             ) \
             SELECT \
                 toUInt64(toUnixTimestamp(toDateTime(bucket))) AS bucket_ts, \
                 total_users, \
                 new_users, \
                 toUInt64(sum(new_users) OVER (ORDER BY bucket)) AS cumulative_new_users \
             FROM ( \
                 SELECT \
                     {trunc} AS bucket, \
                     uniqExact(t.tx_from) AS total_users, \
                     uniqExactIf(t.tx_from, f.first_tx = toDate(t.block_timestamp)) AS new_users \
                 FROM {db}.transactions t \
                 INNER JOIN firsts f ON t.tx_from = f.tx_from \
                 WHERE t.tx_succeeded = 1 AND {range_t} \
                 GROUP BY bucket \
             ) \
             ORDER BY bucket",
            db = self.db_name,
            trunc = granularity.trunc_expr("t.block_timestamp"),
            range = range.filter("block_timestamp"),
            range_t = range.filter("t.block_timestamp"),
        );
        let rows: Vec<UsersOverTimeRaw> = self.execute(&sql).await?;
        rows.into_iter()
            .map(|r| {
                Ok(UsersOverTimeRow {
                    bucket: bucket_time(r.bucket_ts)?,
                    total_users: r.total_users,
                    new_users: r.new_users,
                    returning_users: r.total_users.saturating_sub(r.new_users),
                    cumulative_new_users: r.cumulative_new_users,
                })
            })
            .collect()
    }

    /// How many users sent exactly N transactions, for every observed N.
    pub async fn get_user_tx_distribution(&self, range: DateRange) -> Result<Vec<TxCountRow>> {
        let sql = format!(
            "SELECT tx_count, count() AS users \
             FROM ( \
                 SELECT tx_from, uniqExact(tx_id) AS tx_count \
                 FROM {db}.transactions \
                 WHERE tx_succeeded = 1 AND {range} \
                 GROUP BY tx_from \
             ) \
             GROUP BY tx_count \
             ORDER BY tx_count",
            db = self.db_name,
            range = range.filter("block_timestamp"),
        );
        self.execute(&sql).await
    }

    /// How many users were active on exactly N distinct days.
    pub async fn get_user_activity_distribution(
        &self,
        range: DateRange,
    ) -> Result<Vec<ActiveDaysRow>> {
        let sql = format!(
            "SELECT active_days, count() AS users \
             FROM ( \
                 SELECT tx_from, uniqExact(toDate(block_timestamp)) AS active_days \
                 FROM {db}.transactions \
                 WHERE tx_succeeded = 1 AND {range} \
                 GROUP BY tx_from \
             ) \
             GROUP BY active_days \
             ORDER BY active_days",
            db = self.db_name,
            range = range.filter("block_timestamp"),
        );
        self.execute(&sql).await
    }

    /// Aggregate fee figures in AXL over successful native-denom transactions.
    pub async fn get_fee_stats(&self, range: DateRange) -> Result<Option<FeeStatsRow>> {
        let sql = format!(
            "SELECT \
                 round(sum(fee) / 1000000) AS total_axl, \
                 round(avg(fee) / 1000000, 3) AS avg_axl, \
                 round(toFloat64(quantileExact(0.5)(fee)) / 1000000, 3) AS median_axl, \
                 round(toFloat64(max(fee)) / 1000000, 3) AS max_axl \
             FROM {db}.transactions \
             WHERE tx_succeeded = 1 AND fee_denom = 'uaxl' AND {range}",
            db = self.db_name,
            range = range.filter("block_timestamp"),
        );
        let rows: Vec<FeeStatsRow> = self.execute(&sql).await?;
        Ok(rows.into_iter().next())
    }

    /// Total and average fee per time bucket, in AXL.
    pub async fn get_fees_over_time(
        &self,
        range: DateRange,
        granularity: Granularity,
    ) -> Result<Vec<FeesOverTimeRow>> {
        let sql = format!(
            "SELECT \
                 toUInt64(toUnixTimestamp(toDateTime({trunc}))) AS bucket_ts, \
                 round(sum(fee) / 1000000, 2) AS total_axl, \
                 round(avg(fee) / 1000000, 4) AS avg_axl \
             FROM {db}.transactions \
             WHERE tx_succeeded = 1 AND fee_denom = 'uaxl' AND {range} \
             GROUP BY bucket_ts \
             ORDER BY bucket_ts",
            db = self.db_name,
            trunc = granularity.trunc_expr("block_timestamp"),
            range = range.filter("block_timestamp"),
        );
        let rows: Vec<FeesOverTimeRaw> = self.execute(&sql).await?;
        rows.into_iter()
            .map(|r| {
                Ok(FeesOverTimeRow {
                    bucket: bucket_time(r.bucket_ts)?,
                    total_axl: r.total_axl,
                    avg_axl: r.avg_axl,
                })
            })
            .collect()
    }

    /// Aggregate gas usage over successful transactions in the range.
    pub async fn get_gas_stats(&self, range: DateRange) -> Result<Option<GasStatsRow>> {
        let sql = format!(
            "SELECT \
                 toUInt64(sum(gas_used)) AS total_gas_used, \
                 toUInt64(sum(gas_wanted)) AS total_gas_wanted, \
                 avg(gas_used) AS avg_gas_used, \
                 avg(gas_wanted) AS avg_gas_wanted \
             FROM {db}.transactions \
             WHERE tx_succeeded = 1 AND {range}",
            db = self.db_name,
            range = range.filter("block_timestamp"),
        );
        let rows: Vec<GasStatsRow> = self.execute(&sql).await?;
        Ok(rows.into_iter().next())
    }

    /// Block production over the filtered range.
    pub async fn get_block_stats(&self, range: DateRange) -> Result<Option<BlockStatsRow>> {
        let sql = format!(
            "SELECT uniqExact(block_id) AS blocks, avg(tx_count) AS avg_txs \
             FROM {db}.blocks \
             WHERE {range}",
            db = self.db_name,
            range = range.filter("block_timestamp"),
        );
        let rows: Vec<BlockStatsRow> = self.execute(&sql).await?;
        Ok(rows.into_iter().next())
    }

    /// Block production over the last complete day, independent of the
    /// selected range.
    pub async fn get_block_stats_last_day(&self) -> Result<Option<BlockStatsRow>> {
        let sql = "SELECT uniqExact(block_id) AS blocks, avg(tx_count) AS avg_txs \
                   FROM ?.blocks \
                   WHERE toDate(block_timestamp) = today() - 1";

        let client = self.base.clone();
        let start = Instant::now();
        let result =
            client.query(sql).bind(Identifier(&self.db_name)).fetch_all::<BlockStatsRow>().await;

        let duration_ms = start.elapsed().as_millis();
        match &result {
            Ok(rows) => {
                debug!(query = sql, duration_ms, rows = rows.len(), "warehouse query executed")
            }
            Err(e) => error!(query = sql, duration_ms, error = %e, "warehouse query failed"),
        }
        let rows = result.context("fetching last-day block stats failed")?;
        Ok(rows.into_iter().next())
    }

    /// Blocks, average transactions, active validators and cumulative block
    /// count per time bucket.
    pub async fn get_blocks_over_time(
        &self,
        range: DateRange,
        granularity: Granularity,
    ) -> Result<Vec<BlocksOverTimeRow>> {
        let sql = format!(
            "SELECT \
                 bucket_ts, \
                 blocks, \
                 avg_txs, \
                 validators, \
                 toUInt64(sum(blocks) OVER (ORDER BY bucket_ts)) AS cumulative_blocks \
             FROM ( \
                 SELECT \
                     toUInt64(toUnixTimestamp(toDateTime({trunc}))) AS bucket_ts, \
                     uniqExact(block_id) AS blocks, \
                     avg(tx_count) AS avg_txs, \
                     uniqExact(validator_hash) AS validators \
                 FROM {db}.blocks \
                 WHERE {range} \
                 GROUP BY bucket_ts \
             ) \
             ORDER BY bucket_ts",
            db = self.db_name,
            trunc = granularity.trunc_expr("block_timestamp"),
            range = range.filter("block_timestamp"),
        );
        let rows: Vec<BlocksOverTimeRaw> = self.execute(&sql).await?;
        rows.into_iter()
            .map(|r| {
                Ok(BlocksOverTimeRow {
                    bucket: bucket_time(r.bucket_ts)?,
                    blocks: r.blocks,
                    avg_txs: r.avg_txs,
                    validators: r.validators,
                    cumulative_blocks: r.cumulative_blocks,
                })
            })
            .collect()
    }

    /// How many blocks carried exactly N transactions.
    pub async fn get_block_tx_distribution(
        &self,
        range: DateRange,
    ) -> Result<Vec<BlockTxCountRow>> {
        let sql = format!(
            "SELECT toUInt64(tx_count) AS tx_count, count() AS blocks \
             FROM {db}.blocks \
             WHERE {range} \
             GROUP BY tx_count \
             ORDER BY tx_count",
            db = self.db_name,
            range = range.filter("block_timestamp"),
        );
        self.execute(&sql).await
    }

    /// Busiest blocks in the range, ordered by transaction count.
    pub async fn get_top_blocks(&self, range: DateRange, limit: u64) -> Result<Vec<TopBlockRow>> {
        let sql = format!(
            "SELECT \
                 toUInt64(block_id) AS block_id, \
                 toUInt64(toUnixTimestamp(toDateTime(toDate(block_timestamp)))) AS block_date_ts, \
                 toUInt64(tx_count) AS tx_count, \
                 validator_hash \
             FROM {db}.blocks \
             WHERE {range} \
             ORDER BY tx_count DESC, block_id DESC \
             LIMIT {limit}",
            db = self.db_name,
            range = range.filter("block_timestamp"),
        );
        let rows: Vec<TopBlockRaw> = self.execute(&sql).await?;
        rows.into_iter()
            .map(|r| {
                Ok(TopBlockRow {
                    block_id: r.block_id,
                    block_date: bucket_time(r.block_date_ts)?,
                    tx_count: r.tx_count,
                    validator_hash: r.validator_hash,
                })
            })
            .collect()
    }

    /// Pearson coefficient between daily block count and daily transaction
    /// volume. `None` when the range holds too few days to correlate.
    pub async fn get_block_tx_correlation(&self, range: DateRange) -> Result<Option<f64>> {
        let sql = format!(
            "SELECT corr(toFloat64(blocks), toFloat64(txs)) AS coefficient \
             FROM ( \
                 SELECT \
                     toDate(block_timestamp) AS d, \
                     uniqExact(block_id) AS blocks, \
                     toUInt64(sum(tx_count)) AS txs \
                 FROM {db}.blocks \
                 WHERE {range} \
                 GROUP BY d \
             )",
            db = self.db_name,
            range = range.filter("block_timestamp"),
        );
        let rows: Vec<CorrelationRow> = self.execute(&sql).await?;
        Ok(rows.into_iter().next().and_then(|r| {
            if r.coefficient.is_nan() { None } else { Some(r.coefficient) }
        }))
    }
}
