use std::collections::HashMap;

use crate::Result;
use crate::client::{AlpacaClient, Credentials, RangeOptions};
use crate::models::{
    BarData, LatestBarResponse, LatestQuoteResponse, LatestQuotesResponse, LatestTradeResponse,
    MultiBarsResponse, QuoteData, SingleBarsResponse, SingleQuotesResponse, SingleTradesResponse,
    Snapshot, SnapshotData, TradeData,
};
use crate::timeframe::Timeframe;

/// Helper client for stock market data: latest and historical bars, quotes,
/// trades and snapshots, flattened into the `*Data` value objects.
#[derive(Debug, Clone)]
pub struct StockClient {
    client: AlpacaClient,
}

impl StockClient {
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
    pub async fn latest_quote(&self, symbol: &str) -> Result<QuoteData> {
        let url = self.client.data_url(&format!("/v2/stocks/{symbol}/quotes/latest"))?;
        let res: LatestQuoteResponse = self.client.get_json(url, &[]).await?;
        Ok(QuoteData::from_quote(&res.symbol, &res.quote))
    }

    #[tracing::instrument(skip(self))]
    pub async fn latest_quotes(&self, symbols: &[&str]) -> Result<HashMap<String, QuoteData>> {
        let url = self.client.data_url("/v2/stocks/quotes/latest")?;
        let query = [("symbols", symbols.join(","))];
        let res: LatestQuotesResponse = self.client.get_json(url, &query).await?;
        Ok(res
            .quotes
            .iter()
            .map(|(symbol, quote)| (symbol.clone(), QuoteData::from_quote(symbol, quote)))
            .collect())
    }

    #[tracing::instrument(skip(self))]
    pub async fn latest_bar(&self, symbol: &str) -> Result<BarData> {
        let url = self.client.data_url(&format!("/v2/stocks/{symbol}/bars/latest"))?;
        let res: LatestBarResponse = self.client.get_json(url, &[]).await?;
        Ok(BarData::from_bar(&res.symbol, &res.bar))
    }

    #[tracing::instrument(skip(self))]
    pub async fn latest_trade(&self, symbol: &str) -> Result<TradeData> {
        let url = self.client.data_url(&format!("/v2/stocks/{symbol}/trades/latest"))?;
        let res: LatestTradeResponse = self.client.get_json(url, &[]).await?;
        Ok(TradeData::from_trade(&res.symbol, &res.trade))
    }

    /// Historical bars for one symbol. `timeframe` is the short string form
    /// (`1Min`, `1H`, `1Day`, ...); the window defaults to the last 30 days.
    /// Pages are followed until the window is complete or `limit` is hit.
    #[tracing::instrument(skip(self, options))]
    pub async fn bars(
        &self,
        symbol: &str,
        timeframe: &str,
        options: RangeOptions,
    ) -> Result<Vec<BarData>> {
        let tf = Timeframe::parse(timeframe)?;
        let url = self.client.data_url(&format!("/v2/stocks/{symbol}/bars"))?;
        let query = bars_query(tf, &options);
        let limit = options.limit_value().map(|l| l as usize);
        let mut out = Vec::new();
        self.client
            .get_paged(url, &query, |res: SingleBarsResponse| {
                out.extend(res.bars.iter().map(|bar| BarData::from_bar(&res.symbol, bar)));
                limit.is_none_or(|l| out.len() < l)
            })
            .await?;
        if let Some(limit) = limit {
            out.truncate(limit);
        }
        Ok(out)
    }

    /// Historical bars for several symbols in one call, keyed by symbol.
    /// Pages are followed until the window is complete; an explicit `limit`
    /// bounds the total bar count across symbols.
    #[tracing::instrument(skip(self, options))]
    pub async fn bars_multi(
        &self,
        symbols: &[&str],
        timeframe: &str,
        options: RangeOptions,
    ) -> Result<HashMap<String, Vec<BarData>>> {
        let tf = Timeframe::parse(timeframe)?;
        let url = self.client.data_url("/v2/stocks/bars")?;
        let mut query = bars_query(tf, &options);
        query.push(("symbols", symbols.join(",")));
        let limit = options.limit_value().map(|l| l as usize);
        let mut out: HashMap<String, Vec<BarData>> = HashMap::new();
        let mut total = 0usize;
        self.client
            .get_paged(url, &query, |res: MultiBarsResponse| {
                for (symbol, bars) in &res.bars {
                    total += bars.len();
                    out.entry(symbol.clone())
                        .or_default()
                        .extend(bars.iter().map(|bar| BarData::from_bar(symbol, bar)));
                }
                limit.is_none_or(|l| total < l)
            })
            .await?;
        Ok(out)
    }

    /// Historical quotes for one symbol; the window defaults to the last day.
    #[tracing::instrument(skip(self, options))]
    pub async fn quotes(&self, symbol: &str, options: RangeOptions) -> Result<Vec<QuoteData>> {
        let url = self.client.data_url(&format!("/v2/stocks/{symbol}/quotes"))?;
        let query = range_query(&options, 1);
        let limit = options.limit_value().map(|l| l as usize);
        let mut out = Vec::new();
        self.client
            .get_paged(url, &query, |res: SingleQuotesResponse| {
                out.extend(
                    res.quotes
                        .iter()
                        .map(|quote| QuoteData::from_quote(&res.symbol, quote)),
                );
                limit.is_none_or(|l| out.len() < l)
            })
            .await?;
        if let Some(limit) = limit {
            out.truncate(limit);
        }
        Ok(out)
    }

    /// Historical trades for one symbol; the window defaults to the last day.
    #[tracing::instrument(skip(self, options))]
    pub async fn trades(&self, symbol: &str, options: RangeOptions) -> Result<Vec<TradeData>> {
        let url = self.client.data_url(&format!("/v2/stocks/{symbol}/trades"))?;
        let query = range_query(&options, 1);
        let limit = options.limit_value().map(|l| l as usize);
        let mut out = Vec::new();
        self.client
            .get_paged(url, &query, |res: SingleTradesResponse| {
                out.extend(
                    res.trades
                        .iter()
                        .map(|trade| TradeData::from_trade(&res.symbol, trade)),
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
    pub async fn snapshot(&self, symbol: &str) -> Result<SnapshotData> {
        let url = self.client.data_url(&format!("/v2/stocks/{symbol}/snapshot"))?;
        let snapshot: Snapshot = self.client.get_json(url, &[]).await?;
        Ok(SnapshotData::from_snapshot(symbol, &snapshot))
    }

    #[tracing::instrument(skip(self))]
    pub async fn snapshots(&self, symbols: &[&str]) -> Result<HashMap<String, SnapshotData>> {
        let url = self.client.data_url("/v2/stocks/snapshots")?;
        let query = [("symbols", symbols.join(","))];
        let res: HashMap<String, Snapshot> = self.client.get_json(url, &query).await?;
        Ok(res
            .iter()
            .map(|(symbol, snapshot)| {
                (symbol.clone(), SnapshotData::from_snapshot(symbol, snapshot))
            })
            .collect())
    }
}

pub(crate) fn bars_query(tf: Timeframe, options: &RangeOptions) -> Vec<(&'static str, String)> {
    let (start, end) = options.window(30);
    let mut query = vec![
        ("timeframe", tf.to_string()),
        ("start", start.to_rfc3339()),
        ("end", end.to_rfc3339()),
    ];
    if let Some(limit) = options.limit_value() {
        query.push(("limit", limit.to_string()));
    }
    query
}

pub(crate) fn range_query(options: &RangeOptions, default_days: i64) -> Vec<(&'static str, String)> {
    let (start, end) = options.window(default_days);
    let mut query = vec![("start", start.to_rfc3339()), ("end", end.to_rfc3339())];
    if let Some(limit) = options.limit_value() {
        query.push(("limit", limit.to_string()));
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeframe::TimeframeUnit;

    #[test]
    fn bars_query_renders_timeframe_and_window() {
        let tf = Timeframe::new(5, TimeframeUnit::Minute);
        let query = bars_query(tf, &RangeOptions::new().limit(100));
        assert_eq!(query[0], ("timeframe", "5Min".to_string()));
        assert!(query.iter().any(|(k, v)| *k == "limit" && v == "100"));
        assert!(query.iter().any(|(k, _)| *k == "start"));
        assert!(query.iter().any(|(k, _)| *k == "end"));
    }

    #[test]
    fn range_query_omits_limit_when_unset() {
        let query = range_query(&RangeOptions::new(), 1);
        assert!(query.iter().all(|(k, _)| *k != "limit"));
    }
}
