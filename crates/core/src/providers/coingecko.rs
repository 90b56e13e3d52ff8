use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::price::PricePoint;
use super::traits::PriceHistoryProvider;

const BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Longest look-back the free `market_chart` endpoint is asked for.
const MAX_DAYS: i64 = 3650;

/// CoinGecko API provider for daily crypto prices.
///
/// - **Free**: No API key required (rate limited).
/// - **Endpoint**: `/coins/{id}/market_chart?vs_currency=..&days=..&interval=daily`
///
/// `market_chart` counts `days` back from now, so the request always reaches
/// today and the result is trimmed to the requested range afterwards.
pub struct CoinGeckoProvider {
    client: Client,
}

impl CoinGeckoProvider {
    pub fn new(timeout_secs: u64) -> Self {
        let builder = Client::builder().timeout(Duration::from_secs(timeout_secs));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
        }
    }

    /// Look-back window (in days) needed to cover `from` as of `today`,
    /// with a few days of slack, bounded to `1..=3650`.
    pub fn market_chart_days(from: NaiveDate, today: NaiveDate) -> i64 {
        ((today - from).num_days() + 5).clamp(1, MAX_DAYS)
    }
}

// ── CoinGecko API response types ────────────────────────────────────

#[derive(Deserialize)]
struct MarketChartResponse {
    /// `[unix_millis, price]` pairs
    prices: Vec<(f64, f64)>,
}

#[async_trait]
impl PriceHistoryProvider for CoinGeckoProvider {
    fn name(&self) -> &str {
        "CoinGecko"
    }

    fn supports_currency(&self, _currency: &str) -> bool {
        true
    }

    async fn get_price_history(
        &self,
        asset_id: &str,
        currency: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PricePoint>, CoreError> {
        let today = chrono::Utc::now().date_naive();
        let days = Self::market_chart_days(from, today);
        let vs = currency.to_lowercase();
        let url = format!(
            "{BASE_URL}/coins/{asset_id}/market_chart?vs_currency={vs}&days={days}&interval=daily"
        );

        let resp = self.client.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(CoreError::Api {
                provider: "CoinGecko".into(),
                message: format!("HTTP {} for {asset_id}", resp.status()),
            });
        }

        let chart: MarketChartResponse = resp.json().await.map_err(|e| CoreError::Api {
            provider: "CoinGecko".into(),
            message: format!("Failed to parse market chart for {asset_id}: {e}"),
        })?;

        let points: Vec<PricePoint> = chart
            .prices
            .iter()
            .filter_map(|&(ts, price)| PricePoint::from_millis(ts as i64, price))
            .filter(|p| {
                let day = p.timestamp.date_naive();
                day >= from && day <= to
            })
            .collect();

        Ok(points)
    }
}
