use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::news::FeedBatch;
use crate::models::price::PricePoint;

/// Source of historical daily prices for one asset.
///
/// Each API (CoinGecko, CoinCap) implements this trait; the rest of the
/// crate only ever sees `PricePoint`s, so a provider can be swapped out
/// without touching the simulator.
#[async_trait]
pub trait PriceHistoryProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Whether this provider can quote prices in `currency`.
    fn supports_currency(&self, currency: &str) -> bool;

    /// Raw quotes for `asset_id` covering `from..=to`, in any order.
    /// Several quotes per day are fine; callers reduce them to daily prices.
    async fn get_price_history(
        &self,
        asset_id: &str,
        currency: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PricePoint>, CoreError>;
}

/// A news feed the sentiment index is computed from.
#[async_trait]
pub trait NewsSource: Send + Sync {
    fn name(&self) -> &str;

    /// Fetch the feed's current items.
    async fn fetch(&self) -> Result<FeedBatch, CoreError>;
}
