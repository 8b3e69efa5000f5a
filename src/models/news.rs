use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewsImage {
    pub size: String,
    pub url: String,
}

/// News article as returned by the news endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct News {
    pub id: i64,
    pub headline: String,
    #[serde(default)]
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub images: Vec<NewsImage>,
    #[serde(default)]
    pub symbols: Vec<String>,
    #[serde(default)]
    pub source: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewsResponse {
    #[serde(default)]
    pub news: Vec<News>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

impl super::Paged for NewsResponse {
    fn take_page_token(&mut self) -> Option<String> {
        self.next_page_token.take()
    }
}

/// Flattened news article; `content` may contain HTML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub id: i64,
    pub headline: String,
    pub source: String,
    pub author: String,
    pub summary: String,
    pub content: String,
    pub url: Option<String>,
    pub symbols: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub image_urls: Vec<String>,
}

impl NewsArticle {
    pub fn from_news(news: &News) -> Self {
        Self {
            id: news.id,
            headline: news.headline.clone(),
            source: news.source.clone(),
            author: news.author.clone(),
            summary: news.summary.clone(),
            content: news.content.clone(),
            url: news.url.clone(),
            symbols: news.symbols.clone(),
            created_at: news.created_at,
            updated_at: news.updated_at,
            image_urls: news.images.iter().map(|img| img.url.clone()).collect(),
        }
    }
}
