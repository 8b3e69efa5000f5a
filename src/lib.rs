pub mod client;
pub mod error;
pub mod models;
pub mod prelude;
pub mod symbol;
pub mod timeframe;

static UA: &str = "alpaca-helper-rs/0.1 (+https://github.com/bitbytelabio/alpaca-helper-rs)";

pub use crate::models::*;

pub use crate::client::account::{AccountClient, PortfolioHistoryOptions};
pub use crate::client::crypto::CryptoClient;
pub use crate::client::news::{NewsClient, NewsOptions};
pub use crate::client::options::OptionsClient;
pub use crate::client::stock::StockClient;
pub use crate::client::trading::{OrderStatusFilter, TradingClient};
pub use crate::client::{AlpacaClient, Credentials, RangeOptions};

pub use crate::symbol::{OptionSymbolInfo, OptionType, parse_option_symbol};
pub use crate::timeframe::{Timeframe, TimeframeUnit};

pub type Result<T> = std::result::Result<T, Error>;

pub use error::Error;
