use std::collections::HashMap;

use crate::Result;
use crate::client::stock::{bars_query, range_query};
use crate::client::{AlpacaClient, Credentials, RangeOptions};
use crate::models::{
    CryptoBarData, CryptoQuoteData, CryptoSnapshotData, CryptoTradeData, LatestBarsResponse,
    LatestQuotesResponse, LatestTradesResponse, MultiBarsResponse, SnapshotsResponse,
};
use crate::timeframe::Timeframe;

static CRYPTO_PATH: &str = "/v1beta3/crypto/us";

/// Helper client for crypto market data. Symbols use the pair form
/// (`BTC/USD`); every endpoint is multi-symbol on the wire, so the
/// single-symbol methods return `None` when the feed has no entry.
#[derive(Debug, Clone)]
pub struct CryptoClient {
    client: AlpacaClient,
}

impl CryptoClient {
    pub fn new(credentials: &Credentials) -> Result<Self> {
        Ok(Self {
            client: AlpacaClient::new(credentials)?,
        })
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self {
            client: AlpacaClient::from_env()?,
        })
    }

    #[tracing::instrument(skip(self))]
    pub async fn latest_quote(&self, symbol: &str) -> Result<Option<CryptoQuoteData>> {
        Ok(self.latest_quotes(&[symbol]).await?.remove(symbol))
    }

    #[tracing::instrument(skip(self))]
    pub async fn latest_quotes(
        &self,
        symbols: &[&str],
    ) -> Result<HashMap<String, CryptoQuoteData>> {
        let url = self.client.data_url(&format!("{CRYPTO_PATH}/latest/quotes"))?;
        let query = [("symbols", symbols.join(","))];
        let res: LatestQuotesResponse = self.client.get_json(url, &query).await?;
        Ok(res
            .quotes
            .iter()
            .map(|(symbol, quote)| (symbol.clone(), CryptoQuoteData::from_quote(symbol, quote)))
            .collect())
    }

    #[tracing::instrument(skip(self))]
    pub async fn latest_bar(&self, symbol: &str) -> Result<Option<CryptoBarData>> {
        let url = self.client.data_url(&format!("{CRYPTO_PATH}/latest/bars"))?;
        let query = [("symbols", symbol.to_string())];
        let mut res: LatestBarsResponse = self.client.get_json(url, &query).await?;
        Ok(res
            .bars
            .remove(symbol)
            .map(|bar| CryptoBarData::from_bar(symbol, &bar)))
    }

    #[tracing::instrument(skip(self))]
    pub async fn latest_trade(&self, symbol: &str) -> Result<Option<CryptoTradeData>> {
        let url = self.client.data_url(&format!("{CRYPTO_PATH}/latest/trades"))?;
        let query = [("symbols", symbol.to_string())];
        let mut res: LatestTradesResponse = self.client.get_json(url, &query).await?;
        Ok(res
            .trades
            .remove(symbol)
            .map(|trade| CryptoTradeData::from_trade(symbol, &trade)))
    }

    /// Historical bars for one pair; the window defaults to the last 30 days.
    #[tracing::instrument(skip(self, options))]
    pub async fn bars(
        &self,
        symbol: &str,
        timeframe: &str,
        options: RangeOptions,
    ) -> Result<Vec<CryptoBarData>> {
        let mut all = self.bars_multi(&[symbol], timeframe, options).await?;
        Ok(all.remove(symbol).unwrap_or_default())
    }

    /// Historical bars for several pairs in one call, keyed by pair. Pages
    /// are followed until the window is complete; an explicit `limit` bounds
    /// the total bar count across pairs.
    #[tracing::instrument(skip(self, options))]
    pub async fn bars_multi(
        &self,
        symbols: &[&str],
        timeframe: &str,
        options: RangeOptions,
    ) -> Result<HashMap<String, Vec<CryptoBarData>>> {
        let tf = Timeframe::parse(timeframe)?;
        let url = self.client.data_url(&format!("{CRYPTO_PATH}/bars"))?;
        let mut query = bars_query(tf, &options);
        query.push(("symbols", symbols.join(",")));
        let limit = options.limit_value().map(|l| l as usize);
        let mut out: HashMap<String, Vec<CryptoBarData>> = HashMap::new();
        let mut total = 0usize;
        self.client
            .get_paged(url, &query, |res: MultiBarsResponse| {
                for (symbol, bars) in &res.bars {
                    total += bars.len();
                    out.entry(symbol.clone())
                        .or_default()
                        .extend(bars.iter().map(|bar| CryptoBarData::from_bar(symbol, bar)));
                }
                limit.is_none_or(|l| total < l)
            })
            .await?;
        Ok(out)
    }

    /// Historical quotes for one pair; the window defaults to the last day.
    #[tracing::instrument(skip(self, options))]
    pub async fn quotes(
        &self,
        symbol: &str,
        options: RangeOptions,
    ) -> Result<Vec<CryptoQuoteData>> {
        let url = self.client.data_url(&format!("{CRYPTO_PATH}/quotes"))?;
        let mut query = range_query(&options, 1);
        query.push(("symbols", symbol.to_string()));
        let limit = options.limit_value().map(|l| l as usize);
        let mut out = Vec::new();
        self.client
            .get_paged(url, &query, |mut res: QuotesBySymbol| {
                out.extend(
                    res.quotes
                        .remove(symbol)
                        .unwrap_or_default()
                        .iter()
                        .map(|quote| CryptoQuoteData::from_quote(symbol, quote)),
                );
                limit.is_none_or(|l| out.len() < l)
            })
            .await?;
        if let Some(limit) = limit {
            out.truncate(limit);
        }
        Ok(out)
    }

    /// Historical trades for one pair; the window defaults to the last day.
    #[tracing::instrument(skip(self, options))]
    pub async fn trades(
        &self,
        symbol: &str,
        options: RangeOptions,
    ) -> Result<Vec<CryptoTradeData>> {
        let url = self.client.data_url(&format!("{CRYPTO_PATH}/trades"))?;
        let mut query = range_query(&options, 1);
        query.push(("symbols", symbol.to_string()));
        let limit = options.limit_value().map(|l| l as usize);
        let mut out = Vec::new();
        self.client
            .get_paged(url, &query, |mut res: TradesBySymbol| {
                out.extend(
                    res.trades
                        .remove(symbol)
                        .unwrap_or_default()
                        .iter()
                        .map(|trade| CryptoTradeData::from_trade(symbol, trade)),
                );
                limit.is_none_or(|l| out.len() < l)
            })
            .await?;
        if let Some(limit) = limit {
            out.truncate(limit);
        }
        Ok(out)
    }

    #[tracing::instrument(skip(self))]
    pub async fn snapshot(&self, symbol: &str) -> Result<Option<CryptoSnapshotData>> {
        Ok(self.snapshots(&[symbol]).await?.remove(symbol))
    }

    #[tracing::instrument(skip(self))]
    pub async fn snapshots(&self, symbols: &[&str]) -> Result<HashMap<String, CryptoSnapshotData>> {
        let url = self.client.data_url(&format!("{CRYPTO_PATH}/snapshots"))?;
        let query = [("symbols", symbols.join(","))];
        let res: SnapshotsResponse = self.client.get_json(url, &query).await?;
        Ok(res
            .snapshots
            .iter()
            .map(|(symbol, snapshot)| {
                (
                    symbol.clone(),
                    CryptoSnapshotData::from_snapshot(symbol, snapshot),
                )
            })
            .collect())
    }
}

#[derive(Debug, serde::Deserialize)]
struct QuotesBySymbol {
    #[serde(default)]
    quotes: HashMap<String, Vec<crate::models::Quote>>,
    #[serde(default)]
    next_page_token: Option<String>,
}

impl crate::models::Paged for QuotesBySymbol {
    fn take_page_token(&mut self) -> Option<String> {
        self.next_page_token.take()
    }
}

#[derive(Debug, serde::Deserialize)]
struct TradesBySymbol {
    #[serde(default)]
    trades: HashMap<String, Vec<crate::models::Trade>>,
    #[serde(default)]
    next_page_token: Option<String>,
}

impl crate::models::Paged for TradesBySymbol {
    fn take_page_token(&mut self) -> Option<String> {
        self.next_page_token.take()
    }
}

#[cfg(test)]
mod tests {
    use crate::models::Paged;

    use super::*;

    #[test]
    fn pair_envelopes_surface_their_page_token() {
        let json = r#"{"quotes": {}, "next_page_token": "tok"}"#;
        let mut res: QuotesBySymbol = serde_json::from_str(json).unwrap();
        assert_eq!(res.take_page_token().as_deref(), Some("tok"));
        assert_eq!(res.take_page_token(), None);

        let json = r#"{"trades": {}}"#;
        let mut res: TradesBySymbol = serde_json::from_str(json).unwrap();
        assert_eq!(res.take_page_token(), None);
    }
}
