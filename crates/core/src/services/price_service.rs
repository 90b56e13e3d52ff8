use chrono::NaiveDate;
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::price::PriceSeries;
use crate::providers::registry::PriceProviderRegistry;
use crate::providers::traits::PriceHistoryProvider;

/// Daily prices fetched from one provider.
#[derive(Debug, Clone)]
pub struct FetchedPrices {
    pub provider: String,
    pub series: PriceSeries,
}

/// Fetches daily price series from the registered providers with fallback.
///
/// Providers are tried in registration order. A provider that errors,
/// times out, or returns no usable prices is skipped in favour of the next.
/// Nothing is cached: every call goes back to the providers.
pub struct PriceService {
    registry: PriceProviderRegistry,
    fetch_timeout: Duration,
}

impl PriceService {
    pub fn new(registry: PriceProviderRegistry, fetch_timeout: Duration) -> Self {
        Self {
            registry,
            fetch_timeout,
        }
    }

    /// Check if at least one provider can quote `currency`.
    pub fn has_provider_for(&self, currency: &str) -> bool {
        !self.registry.get_providers_for(currency).is_empty()
    }

    /// Get the names of all registered providers.
    pub fn provider_names(&self) -> Vec<String> {
        self.registry.provider_names()
    }

    /// Daily prices for `asset_id` in `currency` over `from..=to`.
    pub async fn get_price_series(
        &self,
        asset_id: &str,
        currency: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<FetchedPrices, CoreError> {
        let providers = self.registry.get_providers_for(currency);
        if providers.is_empty() {
            return Err(CoreError::NoProvider(format!("{asset_id}/{currency}")));
        }

        let mut last_error = None;
        for provider in &providers {
            match self.fetch_from(*provider, asset_id, currency, from, to).await {
                Ok(series) if !series.is_empty() => {
                    tracing::debug!(
                        "{} returned {} daily prices for {}",
                        provider.name(),
                        series.len(),
                        asset_id
                    );
                    return Ok(FetchedPrices {
                        provider: provider.name().to_string(),
                        series,
                    });
                }
                Ok(_) => {
                    tracing::warn!("{} returned no prices for {}, trying next provider", provider.name(), asset_id);
                    last_error = Some(CoreError::Api {
                        provider: provider.name().to_string(),
                        message: format!("No prices for {asset_id} between {from} and {to}"),
                    });
                }
                Err(e) => {
                    tracing::warn!("{} failed for {}: {}, trying next provider", provider.name(), asset_id, e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| CoreError::NoProvider(format!("{asset_id}/{currency}"))))
    }

    async fn fetch_from(
        &self,
        provider: &dyn PriceHistoryProvider,
        asset_id: &str,
        currency: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<PriceSeries, CoreError> {
        let fetch = provider.get_price_history(asset_id, currency, from, to);
        let points = tokio::time::timeout(self.fetch_timeout, fetch)
            .await
            .map_err(|_| CoreError::Timeout {
                source_name: provider.name().to_string(),
                seconds: self.fetch_timeout.as_secs(),
            })??;
        Ok(PriceSeries::from_points(&points))
    }
}
