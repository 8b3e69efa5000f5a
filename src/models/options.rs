use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::symbol::{OptionType, parse_option_symbol};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OptionQuote {
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
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OptionTrade {
    #[serde(rename = "t")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "p")]
    pub price: f64,
    #[serde(rename = "s")]
    pub size: f64,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct Greeks {
    pub delta: Option<f64>,
    pub gamma: Option<f64>,
    pub theta: Option<f64>,
    pub vega: Option<f64>,
    pub rho: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionSnapshot {
    #[serde(default)]
    pub latest_quote: Option<OptionQuote>,
    #[serde(default)]
    pub latest_trade: Option<OptionTrade>,
    #[serde(default)]
    pub greeks: Option<Greeks>,
    #[serde(default)]
    pub implied_volatility: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OptionSnapshotsResponse {
    #[serde(default)]
    pub snapshots: HashMap<String, OptionSnapshot>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

impl super::Paged for OptionSnapshotsResponse {
    fn take_page_token(&mut self) -> Option<String> {
        self.next_page_token.take()
    }
}

/// Complete option contract information in a single flat object.
///
/// Strike, expiration and type are decoded from the contract symbol; when the
/// symbol does not parse they stay `None` and the record is still returned,
/// so a chain with a stray symbol never loses its other entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionData {
    pub symbol: String,
    pub strike: Option<f64>,
    pub expiration: Option<NaiveDate>,
    pub option_type: Option<OptionType>,

    pub bid: Option<f64>,
    pub ask: Option<f64>,
    pub mid: Option<f64>,
    pub last_price: Option<f64>,

    pub delta: Option<f64>,
    pub gamma: Option<f64>,
    pub theta: Option<f64>,
    pub vega: Option<f64>,
    pub rho: Option<f64>,

    pub implied_volatility: Option<f64>,

    pub bid_size: Option<f64>,
    pub ask_size: Option<f64>,
    pub last_size: Option<f64>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl OptionData {
    pub fn from_snapshot(symbol: &str, snapshot: &OptionSnapshot) -> Self {
        let parsed = parse_option_symbol(symbol);

        let (bid, ask, bid_size, ask_size, timestamp) = match &snapshot.latest_quote {
            Some(quote) => (
                Some(quote.bid_price),
                Some(quote.ask_price),
                Some(quote.bid_size),
                Some(quote.ask_size),
                Some(quote.timestamp),
            ),
            None => (None, None, None, None, None),
        };
        let mid = match (bid, ask) {
            (Some(b), Some(a)) => Some((b + a) / 2.0),
            _ => None,
        };

        let (last_price, last_size) = match &snapshot.latest_trade {
            Some(trade) => (Some(trade.price), Some(trade.size)),
            None => (None, None),
        };

        let greeks = snapshot.greeks.unwrap_or(Greeks {
            delta: None,
            gamma: None,
            theta: None,
            vega: None,
            rho: None,
        });

        Self {
            symbol: symbol.to_string(),
            strike: parsed.strike,
            expiration: parsed.expiration,
            option_type: parsed.option_type,
            bid,
            ask,
            mid,
            last_price,
            delta: greeks.delta,
            gamma: greeks.gamma,
            theta: greeks.theta,
            vega: greeks.vega,
            rho: greeks.rho,
            implied_volatility: snapshot.implied_volatility,
            bid_size,
            ask_size,
            last_size,
            timestamp,
        }
    }
}
