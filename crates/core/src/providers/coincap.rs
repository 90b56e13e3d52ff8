use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::price::PricePoint;
use super::traits::PriceHistoryProvider;

const BASE_URL: &str = "https://api.coincap.io/v2";

/// CoinCap API provider, used as fallback for USD prices.
///
/// - **Free**: No API key required.
/// - **Endpoint**: `/assets/{id}/history?interval=d1&start=..&end=..`
///
/// CoinCap only quotes USD and uses lowercase ids ("bitcoin"), the same
/// ids CoinGecko uses for the large caps.
pub struct CoinCapProvider {
    client: Client,
    base_url: String,
}

impl CoinCapProvider {
    pub fn new(timeout_secs: u64) -> Self {
        Self::with_base_url(BASE_URL, timeout_secs)
    }

    /// Provider against a CoinCap-compatible API at `base_url` (e.g., a mirror).
    pub fn with_base_url(base_url: impl Into<String>, timeout_secs: u64) -> Self {
        let builder = Client::builder().timeout(Duration::from_secs(timeout_secs));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

// ── CoinCap API response types ──────────────────────────────────────

#[derive(Deserialize)]
struct HistoryResponse {
    data: Vec<HistoryPoint>,
}

#[derive(Deserialize)]
struct HistoryPoint {
    #[serde(rename = "priceUsd")]
    price_usd: String,
    time: i64, // unix timestamp in milliseconds
}

#[async_trait]
impl PriceHistoryProvider for CoinCapProvider {
    fn name(&self) -> &str {
        "CoinCap"
    }

    fn supports_currency(&self, currency: &str) -> bool {
        currency.eq_ignore_ascii_case("USD")
    }

    async fn get_price_history(
        &self,
        asset_id: &str,
        _currency: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PricePoint>, CoreError> {
        let start = from
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp_millis())
            .ok_or_else(|| CoreError::InvalidDate(from.to_string()))?;
        let end = to
            .and_hms_opt(23, 59, 59)
            .map(|dt| dt.and_utc().timestamp_millis())
            .ok_or_else(|| CoreError::InvalidDate(to.to_string()))?;

        let url = format!(
            "{}/assets/{asset_id}/history?interval=d1&start={start}&end={end}",
            self.base_url
        );

        let resp = self.client.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(CoreError::Api {
                provider: "CoinCap".into(),
                message: format!("HTTP {} for {asset_id}", resp.status()),
            });
        }

        let resp: HistoryResponse = resp.json().await.map_err(|e| CoreError::Api {
            provider: "CoinCap".into(),
            message: format!("Failed to parse history range for {asset_id}: {e}"),
        })?;

        let points: Vec<PricePoint> = resp
            .data
            .iter()
            .filter_map(|p| {
                let price: f64 = p.price_usd.parse().ok()?;
                PricePoint::from_millis(p.time, price)
            })
            .collect();

        Ok(points)
    }
}
