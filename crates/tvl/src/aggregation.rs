//! Network-wide TVL aggregation.
//!
//! An asset's USD value repeats on every chain row it appears on, so totals
//! and the asset-type split deduplicate by asset id first. The per-chain
//! split intentionally does not: each chain row carries that chain's share.

use crate::models::AssetTvlRow;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use utoipa::ToSchema;

/// One slice of a TVL share split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TvlShare {
    pub label: String,
    pub value_usd: f64,
}

/// Keep the first row per asset id, preserving order.
pub fn dedup_by_asset(rows: &[AssetTvlRow]) -> Vec<AssetTvlRow> {
    let mut seen = HashSet::new();
    rows.iter().filter(|r| seen.insert(r.asset_id.as_str())).cloned().collect()
}

/// Network-wide TVL in USD, summed over one row per asset.
pub fn total_tvl(rows: &[AssetTvlRow]) -> f64 {
    dedup_by_asset(rows).iter().filter_map(|r| r.value_usd).sum()
}

/// ITS vs non-ITS split over deduplicated assets.
pub fn share_by_asset_type(rows: &[AssetTvlRow]) -> Vec<TvlShare> {
    let mut shares = BTreeMap::new();
    for row in dedup_by_asset(rows) {
        let label = if row.asset_type.eq_ignore_ascii_case("its") { "ITS" } else { "non-ITS" };
        *shares.entry(label).or_insert(0.0) += row.value_usd.unwrap_or_default();
    }
    shares
        .into_iter()
        .map(|(label, value_usd)| TvlShare { label: label.to_owned(), value_usd })
        .collect()
}

/// Per-chain split over all rows.
pub fn share_by_chain(rows: &[AssetTvlRow]) -> Vec<TvlShare> {
    let mut shares = BTreeMap::new();
    for row in rows {
        *shares.entry(row.chain.clone()).or_insert(0.0) += row.value_usd.unwrap_or_default();
    }
    shares.into_iter().map(|(label, value_usd)| TvlShare { label, value_usd }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(asset_id: &str, asset_type: &str, chain: &str, value_usd: Option<f64>) -> AssetTvlRow {
        AssetTvlRow {
            asset_id: asset_id.to_owned(),
            asset_type: asset_type.to_owned(),
            chain: chain.to_owned(),
            token_symbol: None,
            token_name: None,
            contract_address: None,
            gateway_address: None,
            supply: None,
            chain_tvl: None,
            price_usd: None,
            value_usd,
            abnormal_supply: false,
        }
    }

    #[test]
    fn dedup_keeps_first_row_per_asset() {
        let rows = vec![
            row("uaxl", "its", "axelarnet", Some(100.0)),
            row("uaxl", "its", "ethereum", Some(100.0)),
            row("uusdc", "gateway", "ethereum", Some(50.0)),
        ];
        let deduped = dedup_by_asset(&rows);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].chain, "axelarnet");
        assert_eq!(deduped[1].asset_id, "uusdc");
    }

    #[test]
    fn dedup_total_never_exceeds_raw_total() {
        let rows = vec![
            row("uaxl", "its", "axelarnet", Some(100.0)),
            row("uaxl", "its", "ethereum", Some(100.0)),
            row("uusdc", "gateway", "ethereum", Some(50.0)),
        ];
        let raw: f64 = rows.iter().filter_map(|r| r.value_usd).sum();
        assert!(total_tvl(&rows) <= raw);
        assert_eq!(total_tvl(&rows), 150.0);
    }

    #[test]
    fn dedup_total_equals_raw_without_repeats() {
        let rows = vec![
            row("uaxl", "its", "axelarnet", Some(100.0)),
            row("uusdc", "gateway", "ethereum", Some(50.0)),
        ];
        let raw: f64 = rows.iter().filter_map(|r| r.value_usd).sum();
        assert_eq!(total_tvl(&rows), raw);
    }

    #[test]
    fn missing_values_are_skipped_in_totals() {
        let rows = vec![row("a", "its", "x", None), row("b", "gateway", "x", Some(5.0))];
        assert_eq!(total_tvl(&rows), 5.0);
    }

    #[test]
    fn asset_type_split_is_case_insensitive_and_deduped() {
        let rows = vec![
            row("uaxl", "ITS", "axelarnet", Some(100.0)),
            row("uaxl", "ITS", "ethereum", Some(100.0)),
            row("uusdc", "gateway", "ethereum", Some(50.0)),
        ];
        let shares = share_by_asset_type(&rows);
        assert_eq!(
            shares,
            vec![
                TvlShare { label: "ITS".to_owned(), value_usd: 100.0 },
                TvlShare { label: "non-ITS".to_owned(), value_usd: 50.0 },
            ]
        );
    }

    #[test]
    fn chain_split_counts_every_row() {
        let rows = vec![
            row("uaxl", "its", "axelarnet", Some(100.0)),
            row("uaxl", "its", "ethereum", Some(100.0)),
            row("uusdc", "gateway", "ethereum", Some(50.0)),
        ];
        let shares = share_by_chain(&rows);
        assert_eq!(
            shares,
            vec![
                TvlShare { label: "axelarnet".to_owned(), value_usd: 100.0 },
                TvlShare { label: "ethereum".to_owned(), value_usd: 150.0 },
            ]
        );
    }
}
