use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An item as delivered by a feed, before scoring.
/// Every field is optional; absent text is treated as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawNewsItem {
    pub title: Option<String>,
    pub link: Option<String>,
    pub guid: Option<String>,

    /// Short plain-text summary, preferred over `content` for scoring
    pub snippet: Option<String>,
    pub content: Option<String>,

    pub published_at: Option<DateTime<Utc>>,

    /// Per-item publisher name, for aggregating feeds that mix outlets
    pub source: Option<String>,
}

impl RawNewsItem {
    /// Item with only a title; handy for feeds that carry nothing else.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}

/// One fetch from one feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedBatch {
    /// Feed title, used as the source name of its items
    pub title: Option<String>,
    pub items: Vec<RawNewsItem>,
}

/// A scored news item ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub link: String,
    pub source: String,
    pub published_at: Option<DateTime<Utc>>,

    /// Lexical sentiment, 0..=100
    pub score: u8,
}

/// Coarse reading of a 0–100 sentiment index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    Bullish,
    Neutral,
    Bearish,
}

impl SentimentLabel {
    pub fn from_score(score: u8) -> Self {
        if score >= 60 {
            SentimentLabel::Bullish
        } else if score <= 40 {
            SentimentLabel::Bearish
        } else {
            SentimentLabel::Neutral
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentLabel::Bullish => write!(f, "Bullish tilt"),
            SentimentLabel::Neutral => write!(f, "Neutral/Range"),
            SentimentLabel::Bearish => write!(f, "Bearish tilt"),
        }
    }
}

/// Aggregate sentiment plus the items that produced it (most recent first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub score: u8,
    pub items: Vec<NewsItem>,
}

impl SentimentResult {
    /// The "no signal" result: score 50, no items.
    pub fn neutral() -> Self {
        Self {
            score: 50,
            items: Vec::new(),
        }
    }

    pub fn label(&self) -> SentimentLabel {
        SentimentLabel::from_score(self.score)
    }
}

impl Default for SentimentResult {
    fn default() -> Self {
        Self::neutral()
    }
}
