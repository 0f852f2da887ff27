use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One row of the price provider's coin catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinListEntry {
    pub id: String,
    pub symbol: String,
    pub name: String,
}

/// USD market data for a single coin, valid for one request
#[derive(Debug, Clone, PartialEq)]
pub struct CoinRecord {
    pub name: String,
    pub symbol: String,
    pub price_usd: f64,
    pub change_24h_pct: f64,
    pub volume_24h_usd: f64,
    pub market_cap_usd: f64,
}

/// Read-only access to a cryptocurrency price index.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetches the full coin catalog, in provider order.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<CoinListEntry>)` on success
    /// * `Err(BotError)` if the request fails or the body cannot be parsed
    async fn coin_list(&self) -> Result<Vec<CoinListEntry>>;

    /// Fetches market data for one canonical coin id.
    ///
    /// # Arguments
    ///
    /// * `id` - The provider's identifier, e.g. `bitcoin`
    ///
    /// # Returns
    ///
    /// * `Ok(CoinRecord)` with USD values extracted
    /// * `Err(BotError::MissingField)` if a USD value is absent
    /// * `Err(BotError)` on transport or parse failure
    async fn coin_detail(&self, id: &str) -> Result<CoinRecord>;
}

/// A chat command that turns an argument list into a reply.
///
/// Implementations know nothing about the chat platform; the dispatcher
/// splits the message text and sends back whatever string is returned.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Command name without the leading slash
    fn name(&self) -> &'static str;

    async fn handle(&self, args: &[&str]) -> Result<String>;
}
