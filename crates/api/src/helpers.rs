//! Pure assembly helpers shared across route handlers.

use api_types::{DistributionBucket, GrowthMetric};
use primitives::{
    ACTIVE_DAYS_LABELS, BLOCK_TX_LABELS, Trend, USER_TX_LABELS, active_days_bucket,
    block_tx_bucket, growth_pct, user_tx_bucket,
};
use warehouse::{ActiveDaysRow, BlockTxCountRow, TxCountRow};

/// Growth between two counts: percentage over the baseline plus direction.
pub fn growth_metric(current: u64, previous: u64) -> GrowthMetric {
    GrowthMetric {
        pct: growth_pct(current, previous),
        trend: Trend::from_delta(current as f64 - previous as f64),
    }
}

/// Placeholder metric for a degraded payload.
pub const fn unknown_growth() -> GrowthMetric {
    GrowthMetric { pct: None, trend: Trend::Flat }
}

fn fold(labels: &[&'static str], pairs: impl Iterator<Item = (&'static str, u64)>) -> Vec<DistributionBucket> {
    let mut counts = vec![0u64; labels.len()];
    for (label, count) in pairs {
        if let Some(idx) = labels.iter().position(|l| *l == label) {
            counts[idx] += count;
        }
    }
    labels
        .iter()
        .zip(counts)
        .map(|(label, count)| DistributionBucket { label: (*label).to_owned(), count })
        .collect()
}

/// Fold raw per-count rows into the fixed user transaction-count ladder.
/// Every rung is present in the output, empty rungs with a zero count.
pub fn fold_user_tx_ladder(rows: &[TxCountRow]) -> Vec<DistributionBucket> {
    fold(&USER_TX_LABELS, rows.iter().map(|r| (user_tx_bucket(r.tx_count), r.users)))
}

/// Fold raw per-count rows into the fixed per-block transaction ladder.
pub fn fold_block_tx_ladder(rows: &[BlockTxCountRow]) -> Vec<DistributionBucket> {
    fold(&BLOCK_TX_LABELS, rows.iter().map(|r| (block_tx_bucket(r.tx_count), r.blocks)))
}

/// Fold raw active-day rows into the fixed active-days ladder.
pub fn fold_active_days_ladder(rows: &[ActiveDaysRow]) -> Vec<DistributionBucket> {
    fold(&ACTIVE_DAYS_LABELS, rows.iter().map(|r| (active_days_bucket(r.active_days), r.users)))
}

/// Log a degraded fetch and produce the user-visible warning for the payload.
pub fn degrade_warning(what: &str, err: &eyre::Report) -> Option<String> {
    tracing::warn!(error = %err, "{what} fetch degraded");
    Some(format!("{what} unavailable: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_metric_directions() {
        let up = growth_metric(110, 100);
        assert!((up.pct.unwrap() - 10.0).abs() < 1e-9);
        assert!(matches!(up.trend, Trend::Up));

        let down = growth_metric(90, 100);
        assert!(down.pct.unwrap() < 0.0);
        assert!(matches!(down.trend, Trend::Down));

        let flat = growth_metric(100, 100);
        assert_eq!(flat.pct, Some(0.0));
        assert!(matches!(flat.trend, Trend::Flat));
    }

    #[test]
    fn growth_metric_zero_baseline_yields_null_pct() {
        let metric = growth_metric(5, 0);
        assert_eq!(metric.pct, None);
        assert!(matches!(metric.trend, Trend::Up));
    }

    #[test]
    fn user_ladder_folds_reference_counts() {
        let rows = [
            TxCountRow { tx_count: 1, users: 100 },
            TxCountRow { tx_count: 5, users: 40 },
            TxCountRow { tx_count: 10, users: 20 },
            TxCountRow { tx_count: 11, users: 10 },
            TxCountRow { tx_count: 1_000_000, users: 2 },
            TxCountRow { tx_count: 1_000_001, users: 1 },
        ];
        let buckets = fold_user_tx_ladder(&rows);
        assert_eq!(buckets.len(), USER_TX_LABELS.len());
        assert_eq!(buckets[0], DistributionBucket { label: "n=1 Txn".to_owned(), count: 100 });
        // 5 and 10 land on the same rung.
        assert_eq!(buckets[1], DistributionBucket { label: "1<n<=10 Txns".to_owned(), count: 60 });
        assert_eq!(buckets[2].count, 10);
        assert_eq!(buckets[6], DistributionBucket { label: "100k<n<=1m Txns".to_owned(), count: 2 });
        assert_eq!(buckets[7], DistributionBucket { label: "n>1m Txns".to_owned(), count: 1 });
        // Untouched rungs are present with zero counts.
        assert_eq!(buckets[4].count, 0);
    }

    #[test]
    fn block_ladder_includes_empty_rungs() {
        let rows = [BlockTxCountRow { tx_count: 3, blocks: 7 }];
        let buckets = fold_block_tx_ladder(&rows);
        assert_eq!(buckets.len(), BLOCK_TX_LABELS.len());
        assert_eq!(buckets[0].count, 7);
        assert!(buckets[1..].iter().all(|b| b.count == 0));
    }

    #[test]
    fn active_days_ladder_folds() {
        let rows = [
            ActiveDaysRow { active_days: 1, users: 50 },
            ActiveDaysRow { active_days: 7, users: 20 },
            ActiveDaysRow { active_days: 8, users: 10 },
            ActiveDaysRow { active_days: 31, users: 5 },
        ];
        let buckets = fold_active_days_ladder(&rows);
        assert_eq!(buckets[0].count, 50);
        assert_eq!(buckets[1].count, 20);
        assert_eq!(buckets[2].count, 10);
        assert_eq!(buckets[3].count, 5);
    }
}
