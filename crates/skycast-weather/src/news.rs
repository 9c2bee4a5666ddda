//! News search client (GNews-compatible `/api/v4/search`).

use serde::Deserialize;
use tracing::instrument;

use crate::error::ProviderError;
use crate::http::ApiClient;
use crate::types::NewsArticle;

/// Topic word prefixed to every city query.
pub const NEWS_TOPIC: &str = "weather";

/// Maximum number of articles requested.
pub const NEWS_LIMIT: u8 = 5;

const NEWS_LANGUAGE: &str = "en";

#[derive(Debug, Deserialize)]
struct ApiSearch {
    #[serde(default)]
    articles: Option<Vec<ApiArticle>>,
}

#[derive(Debug, Deserialize)]
struct ApiArticle {
    title: String,
    url: String,
    source: ApiSource,
}

#[derive(Debug, Deserialize)]
struct ApiSource {
    name: String,
}

impl From<ApiArticle> for NewsArticle {
    fn from(api: ApiArticle) -> Self {
        Self {
            title: api.title,
            source_name: api.source.name,
            url: api.url,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewsClient {
    api: ApiClient,
}

impl NewsClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Weather news mentioning `city`.
    ///
    /// An empty list is a normal outcome, distinct from a transport failure.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_news(&self, city: &str) -> Result<Vec<NewsArticle>, ProviderError> {
        let query = format!(
            "/api/v4/search?q={}&lang={}&max={}&apikey={}",
            urlencoding::encode(&format!("{} {}", NEWS_TOPIC, city.trim())),
            NEWS_LANGUAGE,
            NEWS_LIMIT,
            self.api.encoded_key()
        );
        let api: ApiSearch = self.api.get_json(&query).await?;

        let articles: Vec<NewsArticle> = api
            .articles
            .unwrap_or_default()
            .into_iter()
            .map(NewsArticle::from)
            .collect();

        tracing::debug!("Found {} news articles for {}", articles.len(), city);
        Ok(articles)
    }
}
