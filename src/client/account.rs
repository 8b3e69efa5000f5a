use chrono::{DateTime, Duration, Utc};

use crate::Result;
use crate::client::{AlpacaClient, Credentials};
use crate::models::{Account, AccountInfo, PortfolioHistory, PortfolioHistoryData};

/// Query options for [`AccountClient::portfolio_history`]: a named `period`
/// (`1D`, `1W`, `1M`, `3M`, `1A`, `all`) or an explicit window, plus the data
/// resolution (`1Min`, `5Min`, `15Min`, `1H`, `1D`).
#[derive(Debug, Clone, Default)]
pub struct PortfolioHistoryOptions {
    period: Option<String>,
    timeframe: Option<String>,
    days_back: Option<i64>,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
}

impl PortfolioHistoryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn period<S: Into<String>>(mut self, period: S) -> Self {
        self.period = Some(period.into());
        self
    }

    pub fn timeframe<S: Into<String>>(mut self, timeframe: S) -> Self {
        self.timeframe = Some(timeframe.into());
        self
    }

    pub fn days_back(mut self, days: i64) -> Self {
        self.days_back = Some(days);
        self
    }

    pub fn start(mut self, start: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut start = self.start;
        let mut end = self.end;
        if let Some(days) = self.days_back {
            if start.is_none() {
                let until = end.unwrap_or_else(Utc::now);
                end = Some(until);
                start = Some(until - Duration::days(days));
            }
        }

        let mut query = Vec::new();
        if let Some(period) = &self.period {
            query.push(("period", period.clone()));
        }
        if let Some(timeframe) = &self.timeframe {
            query.push(("timeframe", timeframe.clone()));
        }
        if let Some(start) = start {
            query.push(("date_start", start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = end {
            query.push(("date_end", end.format("%Y-%m-%d").to_string()));
        }
        query
    }
}

/// Helper client for account state: balances, margin, pattern-day-trade
/// standing and portfolio history.
#[derive(Debug, Clone)]
pub struct AccountClient {
    client: AlpacaClient,
}

impl AccountClient {
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

    pub fn is_paper(&self) -> bool {
        self.client.is_paper()
    }

    #[tracing::instrument(skip(self))]
    pub async fn account(&self) -> Result<AccountInfo> {
        let url = self.client.trading_url("/v2/account")?;
        let account: Account = self.client.get_json(url, &[]).await?;
        Ok(AccountInfo::from_account(&account))
    }

    pub async fn cash(&self) -> Result<f64> {
        Ok(self.account().await?.cash)
    }

    pub async fn buying_power(&self) -> Result<f64> {
        Ok(self.account().await?.buying_power)
    }

    pub async fn portfolio_value(&self) -> Result<f64> {
        Ok(self.account().await?.portfolio_value)
    }

    pub async fn equity(&self) -> Result<f64> {
        Ok(self.account().await?.equity)
    }

    pub async fn is_pattern_day_trader(&self) -> Result<bool> {
        Ok(self.account().await?.pattern_day_trader)
    }

    /// Day trades remaining before the pattern-day-trader flag kicks in at
    /// four. Returns 0 for accounts already flagged.
    pub async fn day_trades_remaining(&self) -> Result<u32> {
        let account = self.account().await?;
        if account.pattern_day_trader {
            return Ok(0);
        }
        Ok(3u32.saturating_sub(account.daytrade_count))
    }

    pub async fn multiplier(&self) -> Result<f64> {
        Ok(self.account().await?.multiplier)
    }

    pub async fn is_blocked(&self) -> Result<bool> {
        let account = self.account().await?;
        Ok(account.account_blocked || account.trading_blocked)
    }

    #[tracing::instrument(skip(self, options))]
    pub async fn portfolio_history(
        &self,
        options: PortfolioHistoryOptions,
    ) -> Result<PortfolioHistoryData> {
        let url = self.client.trading_url("/v2/account/portfolio/history")?;
        let history: PortfolioHistory = self.client.get_json(url, &options.to_query()).await?;
        Ok(PortfolioHistoryData::from_history(&history))
    }
}
