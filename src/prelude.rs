pub use crate::client::account::{AccountClient, PortfolioHistoryOptions};
pub use crate::client::crypto::CryptoClient;
pub use crate::client::news::{NewsClient, NewsOptions};
pub use crate::client::options::OptionsClient;
pub use crate::client::stock::StockClient;
pub use crate::client::trading::{OrderStatusFilter, TradingClient};
pub use crate::client::{Credentials, RangeOptions};
pub use crate::models::{
    AccountInfo, BarData, CryptoBarData, CryptoQuoteData, CryptoSnapshotData, CryptoTradeData,
    NewsArticle, OptionData, OrderClass, OrderInfo, OrderRequest, OrderSide, OrderType,
    PortfolioHistoryData, PositionInfo, QuoteData, SnapshotData, StopLoss, TakeProfit,
    TimeInForce, TradeData,
};
pub use crate::symbol::{OptionSymbolInfo, OptionType, parse_option_symbol};
pub use crate::timeframe::{Timeframe, TimeframeUnit};
pub use crate::{Error, Result};
