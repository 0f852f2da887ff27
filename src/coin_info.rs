use async_trait::async_trait;
use chrono::Utc;
use chrono_tz::Tz;
use tracing::{debug, info};

use crate::{
    error::Result,
    format::format_coin_message,
    traits::{CoinListEntry, CommandHandler, PriceSource},
};

pub const COMMAND_NAME: &str = "coin_info";
pub const USAGE_MESSAGE: &str = "Please provide a coin symbol. Usage: /coin_info <symbol>";
pub const NOT_FOUND_MESSAGE: &str = "Coin not found.";

/// Return the id of the first catalog entry whose ticker matches `symbol`,
/// ignoring case. Provider order decides ties.
pub fn resolve_symbol<'a>(catalog: &'a [CoinListEntry], symbol: &str) -> Option<&'a str> {
    let wanted = symbol.to_lowercase();
    catalog
        .iter()
        .find(|coin| coin.symbol.to_lowercase() == wanted)
        .map(|coin| coin.id.as_str())
}

/// Handler for `/coin_info <symbol>`
pub struct CoinInfoCommand<P> {
    source: P,
    timezone: Tz,
}

impl<P: PriceSource> CoinInfoCommand<P> {
    pub fn new(source: P, timezone: Tz) -> Self {
        Self { source, timezone }
    }

    /// Resolve a ticker to the provider's coin id. Fetches the whole catalog.
    pub async fn resolve(&self, symbol: &str) -> Result<Option<String>> {
        let catalog = self.source.coin_list().await?;
        Ok(resolve_symbol(&catalog, symbol).map(str::to_owned))
    }

    /// Fetch market data for `id` and render the reply.
    pub async fn market_summary(&self, id: &str) -> Result<String> {
        let coin = self.source.coin_detail(id).await?;
        let now = Utc::now().with_timezone(&self.timezone);
        Ok(format_coin_message(&coin, now))
    }
}

#[async_trait]
impl<P: PriceSource> CommandHandler for CoinInfoCommand<P> {
    fn name(&self) -> &'static str {
        COMMAND_NAME
    }

    async fn handle(&self, args: &[&str]) -> Result<String> {
        let Some(symbol) = args.first().filter(|s| !s.trim().is_empty()) else {
            return Ok(USAGE_MESSAGE.to_string());
        };

        match self.resolve(symbol).await? {
            Some(id) => {
                info!(symbol = %symbol, id = %id, "Resolved coin");
                self.market_summary(&id).await
            }
            None => {
                debug!(symbol = %symbol, "Symbol not in catalog");
                Ok(NOT_FOUND_MESSAGE.to_string())
            }
        }
    }
}
