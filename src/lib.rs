pub mod bot;
pub mod coin_info;
pub mod coingecko;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod traits;

pub use bot::{run, Command};
pub use coin_info::{resolve_symbol, CoinInfoCommand};
pub use coingecko::CoinGeckoClient;
pub use config::Settings;
pub use error::{BotError, ConfigError};
pub use teloxide::{prelude::*, types::ChatId, Bot};
pub use traits::{CoinListEntry, CoinRecord, CommandHandler, PriceSource};
