pub mod errors;
pub mod models;
pub mod providers;
pub mod services;

use std::time::Duration;

use models::{
    news::SentimentResult,
    price::PriceSeries,
    request::DcaRequest,
    settings::Settings,
    simulation::{DcaReport, PriceSource},
};
use providers::registry::{default_news_sources, PriceProviderRegistry};
use providers::traits::NewsSource;
use services::{
    price_service::PriceService, sentiment_service::SentimentService, synthetic::synthetic_price_series,
};

use errors::CoreError;

pub use services::schedule_service::generate_schedule;
pub use services::sentiment_service::{aggregate, score_text};
pub use services::simulation_service::{simulate, timeline_to_csv};

/// Main entry point for the dashboard engine.
///
/// Composes the pure engine (schedule, simulation, scoring) with the I/O
/// layer that feeds it: price providers with a synthetic fallback, and news
/// sources for the sentiment index. Holds no results between calls.
#[must_use]
pub struct DcaDashboard {
    settings: Settings,
    price_service: PriceService,
    sentiment_service: SentimentService,
}

impl std::fmt::Debug for DcaDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DcaDashboard")
            .field("settings", &self.settings)
            .field("price_providers", &self.price_service.provider_names())
            .field("news_sources", &self.sentiment_service.source_names())
            .finish()
    }
}

impl DcaDashboard {
    /// Dashboard with the default providers (CoinGecko, CoinCap) and news
    /// sources (outlet RSS feeds, CryptoCompare).
    pub fn new(settings: Settings) -> Result<Self, CoreError> {
        let registry = PriceProviderRegistry::new_with_defaults(&settings);
        let sources = default_news_sources(&settings);
        Self::with_providers(settings, registry, sources)
    }

    /// Dashboard with caller-supplied providers and news sources.
    pub fn with_providers(
        settings: Settings,
        registry: PriceProviderRegistry,
        sources: Vec<Box<dyn NewsSource>>,
    ) -> Result<Self, CoreError> {
        settings.validate()?;
        let price_service = PriceService::new(registry, Duration::from_secs(settings.fetch_timeout_secs));
        let sentiment_service = SentimentService::new(sources, &settings);
        Ok(Self {
            settings,
            price_service,
            sentiment_service,
        })
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ── Requests ────────────────────────────────────────────────────

    /// Validate raw form input into a request, using the configured range limit.
    pub fn request(
        &self,
        start: &str,
        end: &str,
        cadence: &str,
        amount_per_purchase: f64,
    ) -> Result<DcaRequest, CoreError> {
        DcaRequest::parse(start, end, cadence, amount_per_purchase, self.settings.max_range_days)
    }

    /// Request over `start..=end` with the configured default cadence and amount.
    pub fn default_request(&self, start: &str, end: &str) -> Result<DcaRequest, CoreError> {
        let start = models::request::parse_iso_date(start)?;
        let end = models::request::parse_iso_date(end)?;
        DcaRequest::new(
            start,
            end,
            self.settings.default_cadence,
            self.settings.default_amount,
            self.settings.max_range_days,
        )
    }

    // ── Simulation ──────────────────────────────────────────────────

    /// Fetch prices for the request's range and run the simulation.
    ///
    /// Falls back to the synthetic demo series when every provider fails,
    /// so this never errors; the report's `price_source` says which was used.
    pub async fn simulate(&self, request: &DcaRequest) -> DcaReport {
        let schedule = generate_schedule(request.start(), request.end(), request.cadence());
        if schedule.is_empty() {
            return Self::report(request, schedule, &PriceSeries::new(), PriceSource::Unused);
        }

        let (prices, source) = match self
            .price_service
            .get_price_series(
                &self.settings.asset_id,
                &self.settings.currency,
                request.start(),
                request.end(),
            )
            .await
        {
            Ok(fetched) => (fetched.series, PriceSource::Live(fetched.provider)),
            Err(e) => {
                tracing::warn!("Price fetch failed ({}), using synthetic prices", e);
                (
                    synthetic_price_series(request.start(), request.end()),
                    PriceSource::Synthetic,
                )
            }
        };

        Self::report(request, schedule, &prices, source)
    }

    /// Run the simulation against a caller-supplied price series.
    pub fn simulate_with_prices(&self, request: &DcaRequest, prices: &PriceSeries) -> DcaReport {
        let schedule = generate_schedule(request.start(), request.end(), request.cadence());
        Self::report(request, schedule, prices, PriceSource::Provided)
    }

    /// CSV export of a report's timeline.
    #[must_use]
    pub fn export_csv(&self, report: &DcaReport) -> String {
        timeline_to_csv(&report.result.timeline)
    }

    // ── Sentiment ───────────────────────────────────────────────────

    /// Current market sentiment from all configured news sources.
    pub async fn market_sentiment(&self) -> SentimentResult {
        self.sentiment_service.fetch_sentiment().await
    }

    // ── Internal ────────────────────────────────────────────────────

    fn report(
        request: &DcaRequest,
        schedule: Vec<chrono::NaiveDate>,
        prices: &PriceSeries,
        price_source: PriceSource,
    ) -> DcaReport {
        let result = simulate(&schedule, prices, request.amount_per_purchase());
        DcaReport {
            start: request.start(),
            end: request.end(),
            cadence: request.cadence(),
            amount_per_purchase: request.amount_per_purchase(),
            schedule,
            price_source,
            result,
        }
    }
}
