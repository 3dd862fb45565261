//! Flattened row types for the TVL endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One row of the per-chain bridged TVL table, already coerced to numeric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChainTvlRow {
    pub chain: String,
    pub token_symbol: Option<String>,
    /// USD value. `None` when the upstream cell was not numeric.
    pub tvl: Option<f64>,
}

/// One (asset, chain) entry flattened out of the nested breakdown payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AssetTvlRow {
    pub asset_id: String,
    pub asset_type: String,
    pub chain: String,
    pub token_symbol: Option<String>,
    pub token_name: Option<String>,
    pub contract_address: Option<String>,
    pub gateway_address: Option<String>,
    pub supply: Option<f64>,
    /// TVL locked on this chain, in asset units.
    pub chain_tvl: Option<f64>,
    pub price_usd: Option<f64>,
    /// USD value of the whole asset across chains. Repeats on every chain row
    /// of the asset, which is why network totals deduplicate by asset id.
    pub value_usd: Option<f64>,
    pub abnormal_supply: bool,
}

/// One entry of the generic chains listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChainInfo {
    pub name: String,
    pub tvl: Option<f64>,
    #[serde(rename = "tokenSymbol")]
    pub token_symbol: Option<String>,
}
