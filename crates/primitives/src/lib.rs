//! Pure metric logic shared across the axelarscope crates: trend
//! classification, correlation strength labels, distribution bucket ladders,
//! and denomination scaling. Everything here is deterministic and free of I/O.

pub mod amounts;
pub mod buckets;
pub mod correlation;
pub mod trend;

pub use amounts::{UAXL_PER_AXL, human_format, nan_to_none, safe_div, uaxl_to_axl};
pub use buckets::{
    ACTIVE_DAYS_LABELS, BLOCK_TX_LABELS, USER_TX_LABELS, active_days_bucket, block_tx_bucket,
    user_tx_bucket,
};
pub use correlation::CorrelationStrength;
pub use trend::{Trend, growth_pct};
