use chrono::{DateTime, Duration, Utc};

use crate::Result;
use crate::client::{AlpacaClient, Credentials};
use crate::models::{NewsArticle, NewsResponse};

static NEWS_PATH: &str = "/v1beta1/news";

/// Query options for [`NewsClient::news`]. `start`/`end` win over
/// `days_back`; with nothing set the last 7 days are fetched.
#[derive(Debug, Clone, Default)]
pub struct NewsOptions {
    symbols: Vec<String>,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    days_back: Option<i64>,
    limit: Option<u32>,
    include_content: Option<bool>,
    exclude_contentless: Option<bool>,
    sort_ascending: bool,
}

impl NewsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn symbols<S: Into<String>>(mut self, symbols: impl IntoIterator<Item = S>) -> Self {
        self.symbols = symbols.into_iter().map(Into::into).collect();
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

    pub fn days_back(mut self, days: i64) -> Self {
        self.days_back = Some(days);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn include_content(mut self, include: bool) -> Self {
        self.include_content = Some(include);
        self
    }

    pub fn exclude_contentless(mut self, exclude: bool) -> Self {
        self.exclude_contentless = Some(exclude);
        self
    }

    pub fn sort_ascending(mut self, ascending: bool) -> Self {
        self.sort_ascending = ascending;
        self
    }

    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let end = self.end.unwrap_or_else(Utc::now);
        let start = match self.start {
            Some(start) => start,
            None => end - Duration::days(self.days_back.unwrap_or(7)),
        };

        let mut query = vec![
            ("start", start.to_rfc3339()),
            ("end", end.to_rfc3339()),
            ("limit", self.limit.unwrap_or(50).to_string()),
            (
                "include_content",
                self.include_content.unwrap_or(true).to_string(),
            ),
            (
                "exclude_contentless",
                self.exclude_contentless.unwrap_or(false).to_string(),
            ),
            (
                "sort",
                if self.sort_ascending { "asc" } else { "desc" }.to_string(),
            ),
        ];
        if !self.symbols.is_empty() {
            query.push(("symbols", self.symbols.join(",")));
        }
        query
    }
}

/// Helper client for the news feed, returning flattened [`NewsArticle`]s.
#[derive(Debug, Clone)]
pub struct NewsClient {
    client: AlpacaClient,
}

impl NewsClient {
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

    /// News articles matching `options`, most recent first unless
    /// ascending sort was requested. Pages are followed until `limit`
    /// articles are collected or the feed runs out.
    #[tracing::instrument(skip(self, options))]
    pub async fn news(&self, options: NewsOptions) -> Result<Vec<NewsArticle>> {
        let url = self.client.data_url(NEWS_PATH)?;
        let query = options.to_query();
        let limit = options.limit.unwrap_or(50) as usize;
        let mut out = Vec::new();
        self.client
            .get_paged(url, &query, |res: NewsResponse| {
                out.extend(res.news.iter().map(NewsArticle::from_news));
                out.len() < limit
            })
            .await?;
        out.truncate(limit);
        Ok(out)
    }

    /// News mentioning one symbol over the last `days_back` days.
    pub async fn news_for_symbol(
        &self,
        symbol: &str,
        days_back: i64,
        limit: u32,
    ) -> Result<Vec<NewsArticle>> {
        self.news(
            NewsOptions::new()
                .symbols([symbol])
                .days_back(days_back)
                .limit(limit),
        )
        .await
    }

    /// Most recent articles from the last 24 hours.
    pub async fn latest_news(&self, symbols: &[&str], limit: u32) -> Result<Vec<NewsArticle>> {
        self.news(
            NewsOptions::new()
                .symbols(symbols.iter().copied())
                .days_back(1)
                .limit(limit),
        )
        .await
    }

    /// Very recent articles from the last `hours_back` hours, with
    /// contentless entries excluded.
    #[tracing::instrument(skip(self))]
    pub async fn breaking_news(
        &self,
        symbols: &[&str],
        hours_back: i64,
        limit: u32,
    ) -> Result<Vec<NewsArticle>> {
        let end = Utc::now();
        let start = end - Duration::hours(hours_back);
        self.news(
            NewsOptions::new()
                .symbols(symbols.iter().copied())
                .start(start)
                .end(end)
                .limit(limit)
                .exclude_contentless(true),
        )
        .await
    }

    /// Historical coverage search for a set of symbols over the last
    /// `days_back` days (30-day window suits monthly analysis).
    pub async fn search_news(
        &self,
        symbols: &[&str],
        days_back: i64,
        limit: u32,
    ) -> Result<Vec<NewsArticle>> {
        self.news(
            NewsOptions::new()
                .symbols(symbols.iter().copied())
                .days_back(days_back)
                .limit(limit),
        )
        .await
    }

    /// News mentioning any of the symbols, for watchlist monitoring.
    pub async fn multi_symbol_news(
        &self,
        symbols: &[&str],
        days_back: i64,
        limit: u32,
    ) -> Result<Vec<NewsArticle>> {
        self.news(
            NewsOptions::new()
                .symbols(symbols.iter().copied())
                .days_back(days_back)
                .limit(limit),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn value<'a>(query: &'a [(&str, String)], key: &str) -> Option<&'a str> {
        query
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn defaults_cover_the_last_week() {
        let query = NewsOptions::new().to_query();
        assert_eq!(value(&query, "limit"), Some("50"));
        assert_eq!(value(&query, "include_content"), Some("true"));
        assert_eq!(value(&query, "exclude_contentless"), Some("false"));
        assert_eq!(value(&query, "sort"), Some("desc"));
        assert_eq!(value(&query, "symbols"), None);
    }

    #[test]
    fn symbols_are_comma_joined() {
        let query = NewsOptions::new().symbols(["AAPL", "TSLA"]).to_query();
        assert_eq!(value(&query, "symbols"), Some("AAPL,TSLA"));
    }

    #[test]
    fn explicit_window_is_rendered_rfc3339() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();
        let query = NewsOptions::new().start(start).end(end).to_query();
        assert_eq!(value(&query, "start"), Some("2024-01-01T00:00:00+00:00"));
        assert_eq!(value(&query, "end"), Some("2024-01-31T00:00:00+00:00"));
    }

    #[test]
    fn ascending_sort_flips_the_flag() {
        let query = NewsOptions::new().sort_ascending(true).to_query();
        assert_eq!(value(&query, "sort"), Some("asc"));
    }
}
