use std::time::Duration;

use crate::errors::CoreError;
use crate::models::news::{FeedBatch, NewsItem, RawNewsItem, SentimentResult};
use crate::models::settings::Settings;
use crate::providers::traits::NewsSource;

/// Market/crypto vocabulary that reads as bullish.
pub const POSITIVE_TERMS: &[&str] = &[
    "surge", "soar", "bull", "bullish", "rally", "record", "all-time high", "ath", "inflow",
    "adopt", "adoption", "approve", "approval", "sec ok", "growth", "gain", "gains", "climb",
    "spike", "breakout", "positive", "beat", "beats", "increase", "expansion", "pump",
    "accumulate", "hodl",
];

/// Market/crypto vocabulary that reads as bearish.
pub const NEGATIVE_TERMS: &[&str] = &[
    "drop", "dump", "bear", "bearish", "selloff", "sell-off", "down", "plunge", "crash", "fear",
    "ban", "banned", "restrict", "lawsuit", "sue", "sues", "hack", "hacked", "exploit",
    "outflow", "liquidation", "liquidations", "recession", "decline", "decrease", "negative",
    "miss", "misses",
];

const TERM_WEIGHT: i32 = 2;
const RAW_LIMIT: i32 = 20;

/// Midpoint of the index; "no signal" and "balanced signal" both land here.
pub const NEUTRAL_SCORE: u8 = 50;

/// Score text on the 0..=100 sentiment index.
///
/// Each lexicon term found anywhere in the lowercased text adds ±2, once
/// per distinct term no matter how often it occurs. Terms match as plain
/// substrings, so "hacked" also counts "hack". The raw sum is clamped to
/// [-20, 20] and mapped linearly onto [0, 100].
pub fn score_text(text: &str) -> u8 {
    if text.is_empty() {
        return NEUTRAL_SCORE;
    }
    let lower = text.to_lowercase();

    let positive = POSITIVE_TERMS.iter().filter(|t| lower.contains(*t)).count() as i32;
    let negative = NEGATIVE_TERMS.iter().filter(|t| lower.contains(*t)).count() as i32;
    let raw = ((positive - negative) * TERM_WEIGHT).clamp(-RAW_LIMIT, RAW_LIMIT);

    let mapped = ((f64::from(raw + RAW_LIMIT) / f64::from(2 * RAW_LIMIT)) * 100.0).round();
    mapped as u8
}

/// Rounded mean of per-item scores; 50 for an empty set.
pub fn aggregate(scores: &[u8]) -> u8 {
    if scores.is_empty() {
        return NEUTRAL_SCORE;
    }
    let sum: u32 = scores.iter().map(|&s| u32::from(s)).sum();
    let mean = f64::from(sum) / scores.len() as f64;
    mean.round() as u8
}

/// Score one raw feed item. `feed_title` names the source unless the item
/// carries its own.
pub fn score_item(item: &RawNewsItem, feed_title: Option<&str>) -> NewsItem {
    let title = item.title.clone().unwrap_or_default();
    let body = [&item.snippet, &item.content]
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
        .map(String::as_str)
        .unwrap_or("");
    let score = score_text(&format!("{title} {body}"));

    let link = [&item.link, &item.guid]
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
        .cloned()
        .unwrap_or_else(|| "#".to_string());

    let source = item
        .source
        .as_deref()
        .or(feed_title)
        .map(clean_source_name)
        .unwrap_or_default();

    NewsItem {
        title,
        link,
        source,
        published_at: item.published_at,
        score,
    }
}

/// Strip a trailing " RSS…" decoration from a feed title ("CoinDesk RSS Feed" → "CoinDesk").
pub fn clean_source_name(title: &str) -> String {
    for (i, c) in title.char_indices() {
        if !c.is_whitespace() {
            continue;
        }
        let rest = title[i..].trim_start();
        if rest.get(..3).is_some_and(|s| s.eq_ignore_ascii_case("rss")) {
            return title[..i].to_string();
        }
    }
    title.to_string()
}

/// Merge feed batches into one scored, recency-sorted window.
///
/// Takes at most `items_per_feed` items from each batch, sorts newest
/// first (undated items last, ties keep feed order), keeps `window` items
/// and averages their scores.
pub fn build_sentiment(batches: &[FeedBatch], items_per_feed: usize, window: usize) -> SentimentResult {
    let mut items: Vec<NewsItem> = batches
        .iter()
        .flat_map(|batch| {
            batch
                .items
                .iter()
                .take(items_per_feed)
                .map(move |item| score_item(item, batch.title.as_deref()))
        })
        .collect();

    items.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    items.truncate(window);

    let scores: Vec<u8> = items.iter().map(|i| i.score).collect();
    SentimentResult {
        score: aggregate(&scores),
        items,
    }
}

/// Pulls every configured news source and turns the merged result into a
/// sentiment reading.
///
/// Sources are fetched concurrently, each under its own timeout. A source
/// that errors or times out is logged and left out; the others still count.
pub struct SentimentService {
    sources: Vec<Box<dyn NewsSource>>,
    fetch_timeout: Duration,
    items_per_feed: usize,
    news_window: usize,
}

impl SentimentService {
    pub fn new(sources: Vec<Box<dyn NewsSource>>, settings: &Settings) -> Self {
        Self {
            sources,
            fetch_timeout: Duration::from_secs(settings.fetch_timeout_secs),
            items_per_feed: settings.items_per_feed,
            news_window: settings.news_window,
        }
    }

    /// Names of the configured sources, in registration order.
    pub fn source_names(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.name().to_string()).collect()
    }

    /// Fetch all sources, returning the batches that arrived in time.
    pub async fn fetch_batches(&self) -> Vec<FeedBatch> {
        let futures: Vec<_> = self
            .sources
            .iter()
            .map(|source| async move {
                match self.fetch_one(source.as_ref()).await {
                    Ok(batch) => Some(batch),
                    Err(e) => {
                        tracing::warn!("News source {} skipped: {}", source.name(), e);
                        None
                    }
                }
            })
            .collect();

        futures::future::join_all(futures)
            .await
            .into_iter()
            .flatten()
            .collect()
    }

    /// Current market sentiment. Never fails: with no usable source the
    /// result is the neutral score and an empty list.
    pub async fn fetch_sentiment(&self) -> SentimentResult {
        let batches = self.fetch_batches().await;
        let result = build_sentiment(&batches, self.items_per_feed, self.news_window);
        tracing::info!(
            "Sentiment {} from {} items ({}/{} sources)",
            result.score,
            result.items.len(),
            batches.len(),
            self.sources.len()
        );
        result
    }

    async fn fetch_one(&self, source: &dyn NewsSource) -> Result<FeedBatch, CoreError> {
        match tokio::time::timeout(self.fetch_timeout, source.fetch()).await {
            Ok(result) => result,
            Err(_) => Err(CoreError::Timeout {
                source_name: source.name().to_string(),
                seconds: self.fetch_timeout.as_secs(),
            }),
        }
    }
}
