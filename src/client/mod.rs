use std::env;

use reqwest::Response;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::models::Paged;
use crate::{Error, Result};

pub mod account;
pub mod crypto;
pub mod news;
pub mod options;
pub mod stock;
pub mod trading;

static DATA_BASE_URL: &str = "https://data.alpaca.markets";
static LIVE_TRADING_URL: &str = "https://api.alpaca.markets";
static PAPER_TRADING_URL: &str = "https://paper-api.alpaca.markets";

/// API credentials plus the live/paper switch.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_key: String,
    pub secret_key: String,
    pub paper: bool,
}

impl Credentials {
    pub fn new<S: Into<String>>(api_key: S, secret_key: S) -> Self {
        Self {
            api_key: api_key.into(),
            secret_key: secret_key.into(),
            paper: false,
        }
    }

    pub fn paper(mut self, paper: bool) -> Self {
        self.paper = paper;
        self
    }

    /// Reads `ALPACA_API_KEY` and `ALPACA_SECRET_KEY`; `ALPACA_PAPER` set to
    /// `true`/`1`/`yes` selects the paper trading host.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("ALPACA_API_KEY").unwrap_or_default();
        let secret_key = env::var("ALPACA_SECRET_KEY").unwrap_or_default();
        if api_key.is_empty() || secret_key.is_empty() {
            return Err(Error::MissingCredentials);
        }
        let paper = matches!(
            env::var("ALPACA_PAPER").unwrap_or_default().to_lowercase().as_str(),
            "true" | "1" | "yes"
        );
        Ok(Self {
            api_key,
            secret_key,
            paper,
        })
    }
}

fn build_request(credentials: &Credentials) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(
        "APCA-API-KEY-ID",
        HeaderValue::from_str(&credentials.api_key)?,
    );
    headers.insert(
        "APCA-API-SECRET-KEY",
        HeaderValue::from_str(&credentials.secret_key)?,
    );

    let builder = reqwest::Client::builder();
    #[cfg(feature = "rustls-tls")]
    let builder = builder.use_rustls_tls();

    let client = builder
        .default_headers(headers)
        .https_only(true)
        .user_agent(crate::UA)
        .build()?;
    Ok(client)
}

/// Shared HTTP plumbing behind every helper client: a configured
/// `reqwest::Client` carrying the auth headers plus the base URLs.
#[derive(Debug, Clone)]
pub struct AlpacaClient {
    http: reqwest::Client,
    data_base: url::Url,
    trading_base: url::Url,
    paper: bool,
}

impl AlpacaClient {
    pub fn new(credentials: &Credentials) -> Result<Self> {
        Ok(Self {
            http: build_request(credentials)?,
            data_base: url::Url::parse(DATA_BASE_URL)?,
            trading_base: url::Url::parse(if credentials.paper {
                PAPER_TRADING_URL
            } else {
                LIVE_TRADING_URL
            })?,
            paper: credentials.paper,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(&Credentials::from_env()?)
    }

    pub fn is_paper(&self) -> bool {
        self.paper
    }

    pub(crate) fn data_url(&self, path: &str) -> Result<url::Url> {
        Ok(self.data_base.join(path)?)
    }

    pub(crate) fn trading_url(&self, path: &str) -> Result<url::Url> {
        Ok(self.trading_base.join(path)?)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        url: url::Url,
        query: &[(&str, String)],
    ) -> Result<T> {
        debug!("GET {} {:?}", url, query);
        let response = self.http.get(url).query(query).send().await?;
        handle(response).await
    }

    /// GET with page-token follow-up. Historical endpoints cap a single
    /// response at the server's page size; this re-requests with the
    /// returned `page_token` until the server stops handing one out, feeding
    /// each page to `page`. The closure returns `false` to stop early, which
    /// is how callers honor an explicit item limit.
    pub(crate) async fn get_paged<T, F>(
        &self,
        url: url::Url,
        query: &[(&str, String)],
        mut page: F,
    ) -> Result<()>
    where
        T: DeserializeOwned + Paged,
        F: FnMut(T) -> bool,
    {
        let mut token: Option<String> = None;
        loop {
            let mut query = query.to_vec();
            if let Some(token) = &token {
                query.push(("page_token", token.clone()));
            }
            let mut res: T = self.get_json(url.clone(), &query).await?;
            token = res.take_page_token();
            if !page(res) || token.is_none() {
                return Ok(());
            }
        }
    }

    pub(crate) async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: url::Url,
        body: &B,
    ) -> Result<T> {
        debug!("POST {}", url);
        let response = self.http.post(url).json(body).send().await?;
        handle(response).await
    }

    pub(crate) async fn delete_json<T: DeserializeOwned>(
        &self,
        url: url::Url,
        query: &[(&str, String)],
    ) -> Result<T> {
        debug!("DELETE {} {:?}", url, query);
        let response = self.http.delete(url).query(query).send().await?;
        handle(response).await
    }

    pub(crate) async fn delete(&self, url: url::Url) -> Result<()> {
        debug!("DELETE {}", url);
        let response = self.http.delete(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::ApiError {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }
}

/// Time-window selection shared by the historical data queries.
///
/// `start`/`end` win over `days_back`; with nothing set the helper's default
/// lookback applies (30 days for bars, 1 day for quotes and trades).
#[derive(Debug, Clone, Copy, Default)]
pub struct RangeOptions {
    start: Option<chrono::DateTime<chrono::Utc>>,
    end: Option<chrono::DateTime<chrono::Utc>>,
    days_back: Option<i64>,
    limit: Option<u32>,
}

impl RangeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(mut self, start: chrono::DateTime<chrono::Utc>) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: chrono::DateTime<chrono::Utc>) -> Self {
        self.end = Some(end);
        self
    }

    pub fn days_back(mut self, days: i64) -> Self {
        self.days_back = Some(days);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub(crate) fn window(
        &self,
        default_days: i64,
    ) -> (chrono::DateTime<chrono::Utc>, chrono::DateTime<chrono::Utc>) {
        let end = self.end.unwrap_or_else(chrono::Utc::now);
        let start = match self.start {
            Some(start) => start,
            None => end - chrono::Duration::days(self.days_back.unwrap_or(default_days)),
        };
        (start, end)
    }

    pub(crate) fn limit_value(&self) -> Option<u32> {
        self.limit
    }
}

async fn handle<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(Error::ApiError {
            status: status.as_u16(),
            message,
        });
    }
    Ok(response.json::<T>().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn explicit_window_wins_over_days_back() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();
        let options = RangeOptions::new().start(start).end(end).days_back(5);
        assert_eq!(options.window(30), (start, end));
    }

    #[test]
    fn days_back_counts_from_end() {
        let end = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let options = RangeOptions::new().end(end).days_back(7);
        let (start, got_end) = options.window(30);
        assert_eq!(got_end, end);
        assert_eq!(start, end - Duration::days(7));
    }

    #[test]
    fn default_lookback_applies_when_nothing_is_set() {
        let options = RangeOptions::new();
        let (start, end) = options.window(30);
        assert_eq!(end - start, Duration::days(30));
    }

    #[test]
    fn credentials_paper_switch_selects_host() {
        let client = AlpacaClient::new(&Credentials::new("key", "secret").paper(true)).unwrap();
        assert!(client.is_paper());
        assert!(
            client
                .trading_url("/v2/account")
                .unwrap()
                .as_str()
                .starts_with(PAPER_TRADING_URL)
        );
        assert!(
            client
                .data_url("/v2/stocks/AAPL/bars")
                .unwrap()
                .as_str()
                .starts_with(DATA_BASE_URL)
        );

        let client = AlpacaClient::new(&Credentials::new("key", "secret")).unwrap();
        assert!(!client.is_paper());
        assert!(
            client
                .trading_url("/v2/account")
                .unwrap()
                .as_str()
                .starts_with(LIVE_TRADING_URL)
        );
    }
}
