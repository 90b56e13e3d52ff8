use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::news::{FeedBatch, RawNewsItem};
use super::traits::NewsSource;

/// Outlets the sentiment index reads by default: (display name, RSS URL).
pub const DEFAULT_RSS_FEEDS: &[(&str, &str)] = &[
    ("Bitcoin Magazine", "https://bitcoinmagazine.com/.rss/full/"),
    ("WSJ Markets", "https://feeds.a.dj.com/rss/RSSMarketsMain.xml"),
    ("CoinDesk", "https://www.coindesk.com/arc/outboundfeeds/rss/"),
    ("Bitcoin.com", "https://news.bitcoin.com/feed/"),
    ("Cryptonews", "https://cryptonews.com/news/feed"),
];

/// A plain RSS 2.0 feed.
///
/// The channel title becomes the batch title, so outlet names like
/// "CoinDesk RSS Feed" go through the usual source-name cleanup.
pub struct RssNewsSource {
    client: Client,
    name: String,
    url: String,
}

impl RssNewsSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>, timeout_secs: u64) -> Self {
        let builder = Client::builder().timeout(Duration::from_secs(timeout_secs));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            name: name.into(),
            url: url.into(),
        }
    }

    /// Parse an RSS document into a feed batch. `provider` names the feed in errors.
    pub fn parse_feed(provider: &str, xml: &[u8]) -> Result<FeedBatch, CoreError> {
        let channel = rss::Channel::read_from(xml).map_err(|e| CoreError::Api {
            provider: provider.to_string(),
            message: format!("Failed to parse RSS feed: {e}"),
        })?;

        let title = Some(channel.title().trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        let items = channel.items().iter().map(raw_item).collect();
        Ok(FeedBatch { title, items })
    }
}

fn raw_item(item: &rss::Item) -> RawNewsItem {
    // content:encoded when present, else the description
    let content = item.content().or(item.description()).map(str::to_string);
    RawNewsItem {
        title: item.title().map(str::to_string),
        link: item.link().map(str::to_string),
        guid: item.guid().map(|g| g.value().to_string()),
        snippet: content.as_deref().map(strip_markup).filter(|s| !s.is_empty()),
        content,
        published_at: item.pub_date().and_then(parse_pub_date),
        source: item.source().and_then(|s| s.title()).map(str::to_string),
    }
}

/// RFC 2822 per RSS 2.0; some feeds send RFC 3339 instead.
fn parse_pub_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Text of an HTML fragment: tags dropped, whitespace collapsed.
fn strip_markup(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => {
                in_tag = true;
                text.push(' ');
            }
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[async_trait]
impl NewsSource for RssNewsSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<FeedBatch, CoreError> {
        let resp = self.client.get(&self.url).send().await?;
        if !resp.status().is_success() {
            return Err(CoreError::Api {
                provider: self.name.clone(),
                message: format!("HTTP {} for {}", resp.status(), self.url),
            });
        }

        let body = resp.bytes().await?;
        Self::parse_feed(&self.name, &body)
    }
}
