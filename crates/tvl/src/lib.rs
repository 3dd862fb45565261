//! HTTP clients for the TVL endpoints and the deduplicating aggregation
//! behind the network-wide totals.

mod aggregation;
mod client;
mod models;

pub use aggregation::{dedup_by_asset, share_by_asset_type, share_by_chain, total_tvl, TvlShare};
pub use client::{Fetched, TvlClient};
pub use models::{AssetTvlRow, ChainInfo, ChainTvlRow};
