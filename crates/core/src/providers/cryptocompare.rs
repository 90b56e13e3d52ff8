use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::news::{FeedBatch, RawNewsItem};
use super::traits::NewsSource;

const BASE_URL: &str = "https://min-api.cryptocompare.com/data/v2/news/";

/// CryptoCompare news API: one JSON feed aggregating many crypto outlets.
///
/// - **Free**: works without a key; a key (sent as `Apikey` auth header)
///   raises the rate limit.
/// - Items carry their outlet name, which is kept as the per-item source.
pub struct CryptoCompareNewsSource {
    client: Client,
    category: String,
    api_key: Option<String>,
}

impl CryptoCompareNewsSource {
    pub fn new(category: impl Into<String>, api_key: Option<String>, timeout_secs: u64) -> Self {
        let builder = Client::builder().timeout(Duration::from_secs(timeout_secs));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            category: category.into().to_uppercase(),
            api_key,
        }
    }
}

// ── CryptoCompare API response types ────────────────────────────────

#[derive(Deserialize)]
struct NewsResponse {
    #[serde(rename = "Data", default)]
    data: Vec<NewsEntry>,
}

#[derive(Deserialize)]
struct NewsEntry {
    guid: Option<String>,
    published_on: Option<i64>, // unix seconds
    title: Option<String>,
    url: Option<String>,
    body: Option<String>,
    source: Option<String>,
    source_info: Option<SourceInfo>,
}

#[derive(Deserialize)]
struct SourceInfo {
    name: Option<String>,
}

impl From<NewsEntry> for RawNewsItem {
    fn from(entry: NewsEntry) -> Self {
        let source = entry.source_info.and_then(|s| s.name).or(entry.source);
        RawNewsItem {
            title: entry.title,
            link: entry.url,
            guid: entry.guid,
            snippet: entry.body,
            content: None,
            published_at: entry
                .published_on
                .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0)),
            source,
        }
    }
}

#[async_trait]
impl NewsSource for CryptoCompareNewsSource {
    fn name(&self) -> &str {
        "CryptoCompare"
    }

    async fn fetch(&self) -> Result<FeedBatch, CoreError> {
        let mut request = self
            .client
            .get(BASE_URL)
            .query(&[("lang", "EN"), ("categories", self.category.as_str())]);
        if let Some(key) = &self.api_key {
            request = request.header("authorization", format!("Apikey {key}"));
        }

        let resp: NewsResponse = request.send().await?.json().await.map_err(|e| CoreError::Api {
            provider: "CryptoCompare".into(),
            message: format!("Failed to parse news feed: {e}"),
        })?;

        Ok(FeedBatch {
            title: Some("CryptoCompare".to_string()),
            items: resp.data.into_iter().map(RawNewsItem::from).collect(),
        })
    }
}
