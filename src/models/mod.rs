pub use self::news::*;
pub use self::options::*;
pub use self::trading::*;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod news;
pub mod options;
pub mod trading;

// ==================== Market data wire records ====================
//
// The data API abbreviates field names on the wire (`t/o/h/l/c/v/n/vw` for
// bars, `bp/bs/ap/as` for quotes). These records mirror that shape; helpers
// hand out the flat `*Data` value objects below instead.

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Bar {
    #[serde(rename = "t")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "o")]
    pub open: f64,
    #[serde(rename = "h")]
    pub high: f64,
    #[serde(rename = "l")]
    pub low: f64,
    #[serde(rename = "c")]
    pub close: f64,
    #[serde(rename = "v")]
    pub volume: f64,
    #[serde(rename = "n", default)]
    pub trade_count: Option<u64>,
    #[serde(rename = "vw", default)]
    pub vwap: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Quote {
    #[serde(rename = "t")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "bp")]
    pub bid_price: f64,
    #[serde(rename = "bs")]
    pub bid_size: f64,
    #[serde(rename = "ap")]
    pub ask_price: f64,
    #[serde(rename = "as")]
    pub ask_size: f64,
    #[serde(rename = "c", default)]
    pub conditions: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Trade {
    #[serde(rename = "t")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "p")]
    pub price: f64,
    #[serde(rename = "s")]
    pub size: f64,
    #[serde(rename = "c", default)]
    pub conditions: Option<Vec<String>>,
    #[serde(rename = "x", default)]
    pub exchange: Option<String>,
    #[serde(rename = "tks", default)]
    pub taker_side: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub latest_trade: Option<Trade>,
    #[serde(default)]
    pub latest_quote: Option<Quote>,
    #[serde(default)]
    pub minute_bar: Option<Bar>,
    #[serde(default)]
    pub daily_bar: Option<Bar>,
    #[serde(default)]
    pub prev_daily_bar: Option<Bar>,
}

// Response envelopes. Single-symbol stock endpoints return flat lists next to
// the symbol; multi-symbol and crypto endpoints key everything by symbol.

/// Historical endpoints page their results; a response carrying a
/// `next_page_token` has more data behind it. Taking the token (rather than
/// reading it) guarantees the fetch loop terminates once the server stops
/// returning one.
pub(crate) trait Paged {
    fn take_page_token(&mut self) -> Option<String>;
}

#[derive(Debug, Clone, Deserialize)]
pub struct SingleBarsResponse {
    #[serde(default)]
    pub bars: Vec<Bar>,
    pub symbol: String,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MultiBarsResponse {
    #[serde(default)]
    pub bars: HashMap<String, Vec<Bar>>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

impl Paged for SingleBarsResponse {
    fn take_page_token(&mut self) -> Option<String> {
        self.next_page_token.take()
    }
}

impl Paged for MultiBarsResponse {
    fn take_page_token(&mut self) -> Option<String> {
        self.next_page_token.take()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SingleQuotesResponse {
    #[serde(default)]
    pub quotes: Vec<Quote>,
    pub symbol: String,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SingleTradesResponse {
    #[serde(default)]
    pub trades: Vec<Trade>,
    pub symbol: String,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

impl Paged for SingleQuotesResponse {
    fn take_page_token(&mut self) -> Option<String> {
        self.next_page_token.take()
    }
}

impl Paged for SingleTradesResponse {
    fn take_page_token(&mut self) -> Option<String> {
        self.next_page_token.take()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LatestQuoteResponse {
    pub symbol: String,
    pub quote: Quote,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LatestTradeResponse {
    pub symbol: String,
    pub trade: Trade,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LatestBarResponse {
    pub symbol: String,
    pub bar: Bar,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LatestQuotesResponse {
    #[serde(default)]
    pub quotes: HashMap<String, Quote>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LatestTradesResponse {
    #[serde(default)]
    pub trades: HashMap<String, Trade>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LatestBarsResponse {
    #[serde(default)]
    pub bars: HashMap<String, Bar>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotsResponse {
    #[serde(default)]
    pub snapshots: HashMap<String, Snapshot>,
}

// ==================== Flat value objects ====================

/// Bar (OHLCV) data for one symbol with native numeric types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarData {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    pub trade_count: Option<u64>,
    pub vwap: Option<f64>,
}

impl BarData {
    pub fn from_bar(symbol: &str, bar: &Bar) -> Self {
        Self {
            symbol: symbol.to_string(),
            timestamp: bar.timestamp,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume as u64,
            trade_count: bar.trade_count,
            vwap: bar.vwap,
        }
    }
}

/// Quote (bid/ask) data with native numeric types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteData {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub bid_price: f64,
    pub bid_size: u64,
    pub ask_price: f64,
    pub ask_size: u64,
    pub conditions: Option<Vec<String>>,
}

impl QuoteData {
    pub fn from_quote(symbol: &str, quote: &Quote) -> Self {
        Self {
            symbol: symbol.to_string(),
            timestamp: quote.timestamp,
            bid_price: quote.bid_price,
            bid_size: quote.bid_size as u64,
            ask_price: quote.ask_price,
            ask_size: quote.ask_size as u64,
            conditions: quote.conditions.clone(),
        }
    }
}

/// Trade (tick) data with native numeric types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeData {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    pub size: u64,
    pub conditions: Option<Vec<String>>,
    pub exchange: Option<String>,
}

impl TradeData {
    pub fn from_trade(symbol: &str, trade: &Trade) -> Self {
        Self {
            symbol: symbol.to_string(),
            timestamp: trade.timestamp,
            price: trade.price,
            size: trade.size as u64,
            conditions: trade.conditions.clone(),
            exchange: trade.exchange.clone(),
        }
    }
}

/// Latest bar, quote and trade for one symbol in a single object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotData {
    pub symbol: String,
    pub latest_trade: Option<TradeData>,
    pub latest_quote: Option<QuoteData>,
    pub latest_bar: Option<BarData>,
    pub prev_daily_bar: Option<BarData>,
}

impl SnapshotData {
    pub fn from_snapshot(symbol: &str, snapshot: &Snapshot) -> Self {
        Self {
            symbol: symbol.to_string(),
            latest_trade: snapshot
                .latest_trade
                .as_ref()
                .map(|t| TradeData::from_trade(symbol, t)),
            latest_quote: snapshot
                .latest_quote
                .as_ref()
                .map(|q| QuoteData::from_quote(symbol, q)),
            latest_bar: snapshot
                .minute_bar
                .as_ref()
                .map(|b| BarData::from_bar(symbol, b)),
            prev_daily_bar: snapshot
                .prev_daily_bar
                .as_ref()
                .map(|b| BarData::from_bar(symbol, b)),
        }
    }
}

// Crypto variants carry fractional sizes, so volume and size stay `f64`.

/// Crypto bar (OHLCV) data; volume is fractional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CryptoBarData {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub trade_count: Option<u64>,
    pub vwap: Option<f64>,
}

impl CryptoBarData {
    pub fn from_bar(symbol: &str, bar: &Bar) -> Self {
        Self {
            symbol: symbol.to_string(),
            timestamp: bar.timestamp,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
            trade_count: bar.trade_count,
            vwap: bar.vwap,
        }
    }
}

/// Crypto quote data; sizes are fractional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CryptoQuoteData {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub bid_price: f64,
    pub bid_size: f64,
    pub ask_price: f64,
    pub ask_size: f64,
}

impl CryptoQuoteData {
    pub fn from_quote(symbol: &str, quote: &Quote) -> Self {
        Self {
            symbol: symbol.to_string(),
            timestamp: quote.timestamp,
            bid_price: quote.bid_price,
            bid_size: quote.bid_size,
            ask_price: quote.ask_price,
            ask_size: quote.ask_size,
        }
    }
}

/// Crypto trade data; size is fractional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CryptoTradeData {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    pub size: f64,
    pub taker_side: Option<String>,
}

impl CryptoTradeData {
    pub fn from_trade(symbol: &str, trade: &Trade) -> Self {
        Self {
            symbol: symbol.to_string(),
            timestamp: trade.timestamp,
            price: trade.price,
            size: trade.size,
            taker_side: trade.taker_side.clone(),
        }
    }
}

/// Latest crypto market data for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CryptoSnapshotData {
    pub symbol: String,
    pub latest_trade: Option<CryptoTradeData>,
    pub latest_quote: Option<CryptoQuoteData>,
    pub latest_bar: Option<CryptoBarData>,
    pub prev_daily_bar: Option<CryptoBarData>,
}

impl CryptoSnapshotData {
    pub fn from_snapshot(symbol: &str, snapshot: &Snapshot) -> Self {
        Self {
            symbol: symbol.to_string(),
            latest_trade: snapshot
                .latest_trade
                .as_ref()
                .map(|t| CryptoTradeData::from_trade(symbol, t)),
            latest_quote: snapshot
                .latest_quote
                .as_ref()
                .map(|q| CryptoQuoteData::from_quote(symbol, q)),
            latest_bar: snapshot
                .minute_bar
                .as_ref()
                .map(|b| CryptoBarData::from_bar(symbol, b)),
            prev_daily_bar: snapshot
                .prev_daily_bar
                .as_ref()
                .map(|b| CryptoBarData::from_bar(symbol, b)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_token_is_taken_once() {
        let json = r#"{"bars": [], "symbol": "AAPL", "next_page_token": "tok123"}"#;
        let mut res: SingleBarsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(res.take_page_token().as_deref(), Some("tok123"));
        assert_eq!(res.take_page_token(), None);
    }

    #[test]
    fn absent_page_token_ends_paging() {
        let json = r#"{"bars": {}}"#;
        let mut res: MultiBarsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(res.take_page_token(), None);

        let json = r#"{"quotes": [], "symbol": "AAPL", "next_page_token": null}"#;
        let mut res: SingleQuotesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(res.take_page_token(), None);
    }
}
