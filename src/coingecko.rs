//! CoinGecko REST client.

use std::{collections::HashMap, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize};
use tracing::debug;

use crate::{
    config::CoinGeckoSettings,
    error::{BotError, Result},
    traits::{CoinListEntry, CoinRecord, PriceSource},
};

const API_KEY_HEADER: &str = "x-cg-demo-api-key";
const USD: &str = "usd";

/// Body of `GET /coins/{id}`, trimmed to what the reply needs
#[derive(Debug, Deserialize)]
struct CoinDetail {
    name: Option<String>,
    symbol: Option<String>,
    market_data: Option<MarketData>,
}

#[derive(Debug, Deserialize)]
struct MarketData {
    #[serde(default)]
    current_price: HashMap<String, Option<f64>>,
    #[serde(default)]
    price_change_percentage_24h_in_currency: HashMap<String, Option<f64>>,
    #[serde(default)]
    total_volume: HashMap<String, Option<f64>>,
    #[serde(default)]
    market_cap: HashMap<String, Option<f64>>,
}

pub struct CoinGeckoClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl CoinGeckoClient {
    pub fn new(settings: &CoinGeckoSettings) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone().filter(|k| !k.is_empty()),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "Requesting price API");

        let mut request = self.client.get(&url).query(query);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let body = request.send().await?.error_for_status()?.text().await?;
        serde_json::from_str(&body).map_err(|source| BotError::MalformedResponse {
            endpoint: path.to_string(),
            source,
        })
    }
}

#[async_trait]
impl PriceSource for CoinGeckoClient {
    async fn coin_list(&self) -> Result<Vec<CoinListEntry>> {
        let coins: Vec<CoinListEntry> = self.get_json("/coins/list", &[]).await?;
        debug!(count = coins.len(), "Fetched coin catalog");
        Ok(coins)
    }

    async fn coin_detail(&self, id: &str) -> Result<CoinRecord> {
        let detail: CoinDetail = self
            .get_json(
                &format!("/coins/{id}"),
                &[
                    ("localization", "false"),
                    ("tickers", "false"),
                    ("community_data", "false"),
                    ("developer_data", "false"),
                ],
            )
            .await?;
        detail.into_record()
    }
}

impl CoinDetail {
    fn into_record(self) -> Result<CoinRecord> {
        let name = self.name.ok_or(BotError::MissingField("name"))?;
        let symbol = self.symbol.ok_or(BotError::MissingField("symbol"))?;
        let market = self
            .market_data
            .ok_or(BotError::MissingField("market_data"))?;

        Ok(CoinRecord {
            name,
            symbol,
            price_usd: usd(&market.current_price, "market_data.current_price.usd")?,
            change_24h_pct: usd(
                &market.price_change_percentage_24h_in_currency,
                "market_data.price_change_percentage_24h_in_currency.usd",
            )?,
            volume_24h_usd: usd(&market.total_volume, "market_data.total_volume.usd")?,
            market_cap_usd: usd(&market.market_cap, "market_data.market_cap.usd")?,
        })
    }
}

fn usd(values: &HashMap<String, Option<f64>>, field: &'static str) -> Result<f64> {
    values
        .get(USD)
        .copied()
        .flatten()
        .ok_or(BotError::MissingField(field))
}
