//! Degradable HTTP client for the three TVL endpoints.
//!
//! An upstream failure never surfaces as an error: the affected method logs a
//! warning and hands back an empty row set plus a user-visible warning
//! string, so the dashboard renders with a notice instead of a 500.

use crate::models::{AssetTvlRow, ChainInfo, ChainTvlRow};
use cache::TtlCache;
use eyre::{Context, Result, eyre};
use serde::Deserialize;
use serde_json::Value;
use std::{collections::BTreeMap, sync::Arc, time::Duration};
use tracing::warn;
use url::Url;

/// Rows from a degradable fetch, with the warning explaining an empty set.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    pub rows: Vec<T>,
    pub warning: Option<String>,
}

impl<T> Fetched<T> {
    fn ok(rows: Vec<T>) -> Self {
        Self { rows, warning: None }
    }

    fn degraded(what: &str, err: &eyre::Report) -> Self {
        Self { rows: Vec::new(), warning: Some(format!("{what} unavailable: {err}")) }
    }
}

#[derive(Deserialize)]
struct ProviderEnvelope {
    result: ProviderResult,
}

#[derive(Deserialize)]
struct ProviderResult {
    #[serde(default)]
    rows: Vec<ProviderRow>,
}

#[derive(Deserialize)]
struct ProviderRow {
    #[serde(rename = "Chain")]
    chain: String,
    #[serde(rename = "Token Symbol", default)]
    token_symbol: Option<String>,
    #[serde(rename = "TVL", default)]
    tvl: Option<Value>,
}

#[derive(Deserialize)]
struct BreakdownEnvelope {
    #[serde(default)]
    data: Vec<BreakdownAsset>,
}

#[derive(Deserialize)]
struct BreakdownAsset {
    #[serde(default)]
    asset: String,
    #[serde(rename = "assetType", default)]
    asset_type: String,
    #[serde(default)]
    price: Option<f64>,
    #[serde(default)]
    value: Option<f64>,
    #[serde(default)]
    is_abnormal_supply: bool,
    #[serde(default)]
    tvl: BTreeMap<String, BreakdownChain>,
}

#[derive(Deserialize)]
struct BreakdownChain {
    #[serde(default)]
    contract_data: Option<ContractData>,
    #[serde(default)]
    gateway_address: Option<String>,
    #[serde(default)]
    supply: Option<f64>,
    #[serde(default)]
    total: Option<f64>,
}

#[derive(Deserialize)]
struct ContractData {
    #[serde(default)]
    symbol: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    contract_address: Option<String>,
}

/// Upstream cells are sometimes numbers and sometimes numeric strings.
fn coerce_f64(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Client for the TVL endpoints, with a per-URL TTL cache on response bodies.
#[derive(Debug, Clone)]
pub struct TvlClient {
    client: reqwest::Client,
    bridge_url: Url,
    breakdown_url: Url,
    chains_url: Url,
    cache: Arc<TtlCache<String>>,
}

impl TvlClient {
    /// Create a client for the three endpoints. Bodies are cached per URL
    /// for `cache_ttl`.
    pub fn new(bridge_url: Url, breakdown_url: Url, chains_url: Url, cache_ttl: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            bridge_url,
            breakdown_url,
            chains_url,
            cache: Arc::new(TtlCache::new(cache_ttl)),
        }
    }

    async fn fetch_body(&self, url: &Url) -> Result<String> {
        if let Some(body) = self.cache.get(url.as_str()) {
            return Ok(body);
        }
        let response =
            self.client.get(url.clone()).send().await.context("sending request failed")?;
        let status = response.status();
        if !status.is_success() {
            return Err(eyre!("upstream responded with status {status}"));
        }
        let body = response.text().await.context("reading response body failed")?;
        self.cache.insert(url.as_str(), body.clone());
        Ok(body)
    }

    /// Per-chain bridged TVL rows, sorted descending by USD value.
    pub async fn fetch_chain_tvl(&self) -> Fetched<ChainTvlRow> {
        match self.try_fetch_chain_tvl().await {
            Ok(rows) => Fetched::ok(rows),
            Err(e) => {
                warn!(url = %self.bridge_url, error = %e, "chain TVL fetch degraded");
                Fetched::degraded("chain TVL", &e)
            }
        }
    }

    async fn try_fetch_chain_tvl(&self) -> Result<Vec<ChainTvlRow>> {
        let body = self.fetch_body(&self.bridge_url).await?;
        let envelope: ProviderEnvelope =
            serde_json::from_str(&body).context("decoding chain TVL payload failed")?;
        let mut rows: Vec<ChainTvlRow> = envelope
            .result
            .rows
            .into_iter()
            .map(|r| ChainTvlRow {
                chain: r.chain,
                token_symbol: r.token_symbol,
                tvl: coerce_f64(r.tvl.as_ref()),
            })
            .collect();
        rows.sort_by(|a, b| {
            b.tvl.unwrap_or(f64::NEG_INFINITY).total_cmp(&a.tvl.unwrap_or(f64::NEG_INFINITY))
        });
        Ok(rows)
    }

    /// Flattened per-asset per-chain breakdown.
    pub async fn fetch_asset_breakdown(&self) -> Fetched<AssetTvlRow> {
        match self.try_fetch_asset_breakdown().await {
            Ok(rows) => Fetched::ok(rows),
            Err(e) => {
                warn!(url = %self.breakdown_url, error = %e, "asset breakdown fetch degraded");
                Fetched::degraded("asset breakdown", &e)
            }
        }
    }

    async fn try_fetch_asset_breakdown(&self) -> Result<Vec<AssetTvlRow>> {
        let body = self.fetch_body(&self.breakdown_url).await?;
        let envelope: BreakdownEnvelope =
            serde_json::from_str(&body).context("decoding asset breakdown payload failed")?;
        let mut rows = Vec::new();
        for asset in envelope.data {
            for (chain, details) in asset.tvl {
                let contract = details.contract_data.as_ref();
                rows.push(AssetTvlRow {
                    asset_id: asset.asset.clone(),
                    asset_type: asset.asset_type.clone(),
                    chain,
                    token_symbol: contract.and_then(|c| c.symbol.clone()),
                    token_name: contract.and_then(|c| c.name.clone()),
                    contract_address: contract.and_then(|c| c.contract_address.clone()),
                    gateway_address: details.gateway_address,
                    supply: details.supply,
                    chain_tvl: details.total,
                    price_usd: asset.price,
                    value_usd: asset.value,
                    abnormal_supply: asset.is_abnormal_supply,
                });
            }
        }
        Ok(rows)
    }

    /// Generic chains listing with per-chain TVL.
    pub async fn fetch_chains(&self) -> Fetched<ChainInfo> {
        match self.try_fetch_chains().await {
            Ok(rows) => Fetched::ok(rows),
            Err(e) => {
                warn!(url = %self.chains_url, error = %e, "chains fetch degraded");
                Fetched::degraded("chains listing", &e)
            }
        }
    }

    async fn try_fetch_chains(&self) -> Result<Vec<ChainInfo>> {
        let body = self.fetch_body(&self.chains_url).await?;
        serde_json::from_str(&body).context("decoding chains payload failed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(server: &mockito::ServerGuard, ttl: Duration) -> TvlClient {
        let base = server.url();
        TvlClient::new(
            Url::parse(&format!("{base}/bridge")).unwrap(),
            Url::parse(&format!("{base}/breakdown")).unwrap(),
            Url::parse(&format!("{base}/chains")).unwrap(),
            ttl,
        )
    }

    #[tokio::test]
    async fn chain_tvl_parses_and_sorts_descending() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/bridge")
            .with_status(200)
            .with_body(
                r#"{"result":{"rows":[
                    {"Chain":"osmosis","Token Symbol":"OSMO","TVL":1000.5},
                    {"Chain":"Axelar","Token Symbol":"AXL","TVL":"2500000"},
                    {"Chain":"unknown","Token Symbol":null,"TVL":"n/a"}
                ]}}"#,
            )
            .create_async()
            .await;

        let fetched = client(&server, Duration::ZERO).fetch_chain_tvl().await;
        mock.assert_async().await;
        assert!(fetched.warning.is_none());
        assert_eq!(fetched.rows.len(), 3);
        assert_eq!(fetched.rows[0].chain, "Axelar");
        assert_eq!(fetched.rows[0].tvl, Some(2_500_000.0));
        assert_eq!(fetched.rows[1].chain, "osmosis");
        // Non-numeric cells coerce to None and sort last.
        assert_eq!(fetched.rows[2].tvl, None);
    }

    #[tokio::test]
    async fn non_success_status_degrades_to_empty_with_warning() {
        let mut server = mockito::Server::new_async().await;
        server.mock("GET", "/bridge").with_status(502).create_async().await;

        let fetched = client(&server, Duration::ZERO).fetch_chain_tvl().await;
        assert!(fetched.rows.is_empty());
        let warning = fetched.warning.unwrap();
        assert!(warning.contains("chain TVL unavailable"), "{warning}");
    }

    #[tokio::test]
    async fn malformed_payload_degrades_to_empty_with_warning() {
        let mut server = mockito::Server::new_async().await;
        server.mock("GET", "/breakdown").with_status(200).with_body("not json").create_async().await;

        let fetched = client(&server, Duration::ZERO).fetch_asset_breakdown().await;
        assert!(fetched.rows.is_empty());
        assert!(fetched.warning.is_some());
    }

    #[tokio::test]
    async fn breakdown_flattens_per_chain() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/breakdown")
            .with_status(200)
            .with_body(
                r#"{"data":[{
                    "asset":"uaxl",
                    "assetType":"its",
                    "price":0.55,
                    "value":1200000.0,
                    "is_abnormal_supply":false,
                    "tvl":{
                        "axelarnet":{"supply":900000.0,"total":900000.0},
                        "ethereum":{
                            "contract_data":{"symbol":"AXL","name":"Axelar","contract_address":"0xabc"},
                            "gateway_address":"0xgw",
                            "supply":300000.0,
                            "total":300000.0
                        }
                    }
                }]}"#,
            )
            .create_async()
            .await;

        let fetched = client(&server, Duration::ZERO).fetch_asset_breakdown().await;
        assert!(fetched.warning.is_none());
        assert_eq!(fetched.rows.len(), 2);
        let eth = fetched.rows.iter().find(|r| r.chain == "ethereum").unwrap();
        assert_eq!(eth.asset_id, "uaxl");
        assert_eq!(eth.token_symbol.as_deref(), Some("AXL"));
        assert_eq!(eth.gateway_address.as_deref(), Some("0xgw"));
        assert_eq!(eth.value_usd, Some(1_200_000.0));
        let axelarnet = fetched.rows.iter().find(|r| r.chain == "axelarnet").unwrap();
        assert_eq!(axelarnet.token_symbol, None);
    }

    #[tokio::test]
    async fn body_is_cached_per_url_within_ttl() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/chains")
            .with_status(200)
            .with_body(r#"[{"name":"ethereum","tvl":5.0,"tokenSymbol":"ETH"}]"#)
            .expect(1)
            .create_async()
            .await;

        let client = client(&server, Duration::from_secs(3600));
        let first = client.fetch_chains().await;
        let second = client.fetch_chains().await;
        mock.assert_async().await;
        assert_eq!(first, second);
        assert_eq!(first.rows[0].name, "ethereum");
    }
}
