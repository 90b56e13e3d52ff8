use crate::models::settings::Settings;

use super::coincap::CoinCapProvider;
use super::coingecko::CoinGeckoProvider;
use super::cryptocompare::CryptoCompareNewsSource;
use super::rss_feed::{RssNewsSource, DEFAULT_RSS_FEEDS};
use super::traits::{NewsSource, PriceHistoryProvider};

/// Registry of price history providers, in priority order.
///
/// The first provider that can quote the requested currency is tried first;
/// the rest serve as fallbacks.
pub struct PriceProviderRegistry {
    providers: Vec<Box<dyn PriceHistoryProvider>>,
}

impl PriceProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Create a registry with all default providers pre-configured.
    pub fn new_with_defaults(settings: &Settings) -> Self {
        let mut registry = Self::new();

        // CoinGecko — any vs_currency, no API key needed
        registry.register(Box::new(CoinGeckoProvider::new(settings.fetch_timeout_secs)));

        // CoinCap — USD only, fallback
        registry.register(Box::new(CoinCapProvider::new(settings.fetch_timeout_secs)));

        registry
    }

    /// Register a new price provider.
    pub fn register(&mut self, provider: Box<dyn PriceHistoryProvider>) {
        self.providers.push(provider);
    }

    /// All providers able to quote `currency`, ordered by registration priority.
    pub fn get_providers_for(&self, currency: &str) -> Vec<&dyn PriceHistoryProvider> {
        self.providers
            .iter()
            .filter(|p| p.supports_currency(currency))
            .map(|p| p.as_ref())
            .collect()
    }

    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl Default for PriceProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Default news sources for the sentiment index: the outlet RSS feeds,
/// then the CryptoCompare aggregate.
pub fn default_news_sources(settings: &Settings) -> Vec<Box<dyn NewsSource>> {
    let mut sources: Vec<Box<dyn NewsSource>> = DEFAULT_RSS_FEEDS
        .iter()
        .map(|(name, url)| {
            Box::new(RssNewsSource::new(*name, *url, settings.fetch_timeout_secs)) as Box<dyn NewsSource>
        })
        .collect();

    sources.push(Box::new(CryptoCompareNewsSource::new(
        settings.asset_symbol.clone(),
        settings.api_key("cryptocompare").map(str::to_string),
        settings.fetch_timeout_secs,
    )));
    sources
}
