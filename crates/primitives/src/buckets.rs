//! Fixed threshold ladders for distribution charts.
//!
//! The boundaries and label strings are part of the chart contract: the
//! frontend groups series by label, so they must not drift.

/// Labels for the user transaction-count ladder, in ascending order.
pub const USER_TX_LABELS: [&str; 8] = [
    "n=1 Txn",
    "1<n<=10 Txns",
    "10<n<=100 Txns",
    "100<n<=1k Txns",
    "1k<n<=10k Txns",
    "10k<n<=100k Txns",
    "100k<n<=1m Txns",
    "n>1m Txns",
];

/// Labels for the per-block transaction-count ladder, in ascending order.
pub const BLOCK_TX_LABELS: [&str; 6] = [
    "n<=5 TXs",
    "5<n<=10 TXs",
    "10<n<=20 TXs",
    "20<n<=50 TXs",
    "50<n<=100 TXs",
    "n>100 TXs",
];

/// Labels for the active-days ladder, in ascending order.
pub const ACTIVE_DAYS_LABELS: [&str; 4] = ["n=1", "1<n<=7", "7<n<=30", "n>30"];

/// Bucket label for a user's distinct transaction count.
pub const fn user_tx_bucket(count: u64) -> &'static str {
    match count {
        0 | 1 => USER_TX_LABELS[0],
        2..=10 => USER_TX_LABELS[1],
        11..=100 => USER_TX_LABELS[2],
        101..=1_000 => USER_TX_LABELS[3],
        1_001..=10_000 => USER_TX_LABELS[4],
        10_001..=100_000 => USER_TX_LABELS[5],
        100_001..=1_000_000 => USER_TX_LABELS[6],
        _ => USER_TX_LABELS[7],
    }
}

/// Bucket label for a block's transaction count.
pub const fn block_tx_bucket(count: u64) -> &'static str {
    match count {
        0..=5 => BLOCK_TX_LABELS[0],
        6..=10 => BLOCK_TX_LABELS[1],
        11..=20 => BLOCK_TX_LABELS[2],
        21..=50 => BLOCK_TX_LABELS[3],
        51..=100 => BLOCK_TX_LABELS[4],
        _ => BLOCK_TX_LABELS[5],
    }
}

/// Bucket label for a user's count of distinct active days.
pub const fn active_days_bucket(days: u64) -> &'static str {
    match days {
        0 | 1 => ACTIVE_DAYS_LABELS[0],
        2..=7 => ACTIVE_DAYS_LABELS[1],
        8..=30 => ACTIVE_DAYS_LABELS[2],
        _ => ACTIVE_DAYS_LABELS[3],
    }
}
