// ═══════════════════════════════════════════════════════════════════
// Integration Tests — DcaDashboard facade end to end with mock
// price providers and news sources
// ═══════════════════════════════════════════════════════════════════

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use std::collections::HashMap;

use dca_sentiment_core::errors::CoreError;
use dca_sentiment_core::models::cadence::Cadence;
use dca_sentiment_core::models::news::{FeedBatch, RawNewsItem, SentimentLabel};
use dca_sentiment_core::models::price::{PricePoint, PriceSeries};
use dca_sentiment_core::models::settings::Settings;
use dca_sentiment_core::models::simulation::PriceSource;
use dca_sentiment_core::providers::registry::PriceProviderRegistry;
use dca_sentiment_core::providers::traits::{NewsSource, PriceHistoryProvider};
use dca_sentiment_core::{aggregate, generate_schedule, score_text, simulate, DcaDashboard};

fn make_date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
// Mock Price Provider (for testing without real API calls)
// ═══════════════════════════════════════════════════════════════════

struct MockPriceProvider {
    prices: HashMap<String, f64>,
}

impl MockPriceProvider {
    fn new() -> Self {
        let mut prices = HashMap::new();
        prices.insert("2024-01-01".to_string(), 40_000.0);
        prices.insert("2024-01-08".to_string(), 44_000.0);
        prices.insert("2024-01-15".to_string(), 42_000.0);
        // 2024-01-22 deliberately missing
        prices.insert("2024-01-29".to_string(), 48_000.0);
        prices.insert("2024-01-30".to_string(), 49_000.0);
        Self { prices }
    }
}

#[async_trait]
impl PriceHistoryProvider for MockPriceProvider {
    fn name(&self) -> &str {
        "MockProvider"
    }

    fn supports_currency(&self, currency: &str) -> bool {
        currency == "USD"
    }

    async fn get_price_history(
        &self,
        _asset_id: &str,
        _currency: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PricePoint>, CoreError> {
        let mut points = Vec::new();
        for (d, price) in &self.prices {
            let date = NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap();
            if date >= from && date <= to {
                points.push(PricePoint::new(date.and_hms_opt(0, 0, 0).unwrap().and_utc(), *price));
            }
        }
        Ok(points)
    }
}

struct DownProvider;

#[async_trait]
impl PriceHistoryProvider for DownProvider {
    fn name(&self) -> &str {
        "Down"
    }

    fn supports_currency(&self, _currency: &str) -> bool {
        true
    }

    async fn get_price_history(
        &self,
        _asset_id: &str,
        _currency: &str,
        _from: NaiveDate,
        _to: NaiveDate,
    ) -> Result<Vec<PricePoint>, CoreError> {
        Err(CoreError::Network("dns error".into()))
    }
}

struct HeadlineSource {
    title: &'static str,
    headlines: Vec<(&'static str, u32)>,
}

#[async_trait]
impl NewsSource for HeadlineSource {
    fn name(&self) -> &str {
        self.title
    }

    async fn fetch(&self) -> Result<FeedBatch, CoreError> {
        Ok(FeedBatch {
            title: Some(format!("{} RSS Feed", self.title)),
            items: self
                .headlines
                .iter()
                .map(|(title, day)| RawNewsItem {
                    title: Some(title.to_string()),
                    link: Some(format!("https://news.example/{day}")),
                    published_at: Some(Utc.with_ymd_and_hms(2024, 1, *day, 9, 0, 0).unwrap()),
                    ..RawNewsItem::default()
                })
                .collect(),
        })
    }
}

struct BrokenSource;

#[async_trait]
impl NewsSource for BrokenSource {
    fn name(&self) -> &str {
        "Broken"
    }

    async fn fetch(&self) -> Result<FeedBatch, CoreError> {
        Err(CoreError::Api {
            provider: "Broken".into(),
            message: "HTTP 503".into(),
        })
    }
}

fn dashboard_with(
    provider: Box<dyn PriceHistoryProvider>,
    sources: Vec<Box<dyn NewsSource>>,
) -> DcaDashboard {
    let mut registry = PriceProviderRegistry::new();
    registry.register(provider);
    let settings = Settings {
        fetch_timeout_secs: 2,
        ..Settings::default()
    };
    DcaDashboard::with_providers(settings, registry, sources).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
// Simulation through the facade
// ═══════════════════════════════════════════════════════════════════

mod simulation {
    use super::*;

    #[tokio::test]
    async fn live_prices_with_gap() {
        let dash = dashboard_with(Box::new(MockPriceProvider::new()), vec![]);
        let request = dash.request("2024-01-01", "2024-01-31", "weekly", 100.0).unwrap();

        let report = dash.simulate(&request).await;

        assert_eq!(report.price_source, PriceSource::Live("MockProvider".into()));
        assert_eq!(report.schedule.len(), 5);
        assert_eq!(report.result.timeline.len(), 4);
        assert_eq!(report.skipped_purchases(), 1);
        assert!((report.result.summary.total_invested - 400.0).abs() < 1e-9);
        assert_eq!(report.result.summary.latest_price, 48_000.0);
        assert_eq!(report.result.timeline.last().unwrap().date, make_date(2024, 1, 29));
    }

    #[tokio::test]
    async fn synthetic_fallback_when_providers_down() {
        let dash = dashboard_with(Box::new(DownProvider), vec![]);
        let request = dash.request("2024-01-01", "2024-03-31", "biweekly", 50.0).unwrap();

        let report = dash.simulate(&request).await;

        assert_eq!(report.price_source, PriceSource::Synthetic);
        // Synthetic series covers every day, so nothing is skipped
        assert_eq!(report.result.timeline.len(), report.schedule.len());
        assert!((report.result.summary.total_invested - 50.0 * report.schedule.len() as f64).abs() < 1e-9);
        assert!(report.result.summary.latest_price >= 10_000.0);
    }

    #[tokio::test]
    async fn inverted_range_skips_fetch() {
        let dash = dashboard_with(Box::new(DownProvider), vec![]);
        let request = dash.request("2024-02-01", "2024-01-01", "monthly", 50.0).unwrap();

        let report = dash.simulate(&request).await;

        assert_eq!(report.price_source, PriceSource::Unused);
        assert!(report.schedule.is_empty());
        assert!(report.result.timeline.is_empty());
        assert_eq!(report.result.summary.total_invested, 0.0);
    }

    #[test]
    fn simulate_with_caller_prices() {
        let dash = dashboard_with(Box::new(DownProvider), vec![]);
        let request = dash.request("2024-01-01", "2024-01-08", "weekly", 100.0).unwrap();
        let prices: PriceSeries = [(make_date(2024, 1, 1), 40_000.0), (make_date(2024, 1, 8), 44_000.0)]
            .into_iter()
            .collect();

        let report = dash.simulate_with_prices(&request, &prices);

        assert_eq!(report.price_source, PriceSource::Provided);
        assert!((report.result.summary.profit_and_loss_pct - 5.0).abs() < 1e-9);
    }

    #[test]
    fn default_request_uses_settings() {
        let dash = dashboard_with(Box::new(DownProvider), vec![]);
        let request = dash.default_request("2024-01-01", "2024-06-01").unwrap();
        assert_eq!(request.cadence(), Cadence::Weekly);
        assert_eq!(request.amount_per_purchase(), 100.0);
    }

    #[test]
    fn request_validation_errors_surface() {
        let dash = dashboard_with(Box::new(DownProvider), vec![]);
        assert!(matches!(
            dash.request("2024-01-01", "2024-01-31", "weekly", 0.0),
            Err(CoreError::InvalidAmount(_))
        ));
        assert!(matches!(
            dash.request("yesterday", "2024-01-31", "weekly", 10.0),
            Err(CoreError::InvalidDate(_))
        ));
        assert!(matches!(
            dash.request("2000-01-01", "2024-01-31", "weekly", 10.0),
            Err(CoreError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn csv_export_matches_timeline() {
        let dash = dashboard_with(Box::new(MockPriceProvider::new()), vec![]);
        let request = dash.request("2024-01-01", "2024-01-31", "weekly", 100.0).unwrap();
        let report = dash.simulate(&request).await;

        let csv = dash.export_csv(&report);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "date,invested,units,value,price");
        assert_eq!(lines.len(), report.result.timeline.len() + 1);
        assert!(lines[1].starts_with("2024-01-01,100,"));
    }

    #[test]
    fn invalid_settings_rejected() {
        let settings = Settings {
            currency: "DOLLARS".into(),
            ..Settings::default()
        };
        let result = DcaDashboard::with_providers(settings, PriceProviderRegistry::new(), vec![]);
        assert!(matches!(result, Err(CoreError::ValidationError(_))));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Sentiment through the facade
// ═══════════════════════════════════════════════════════════════════

mod sentiment {
    use super::*;

    #[tokio::test]
    async fn merges_sources_and_tolerates_failures() {
        let dash = dashboard_with(
            Box::new(MockPriceProvider::new()),
            vec![
                Box::new(HeadlineSource {
                    title: "CoinDesk",
                    headlines: vec![("BTC surges to new all-time high", 3)],
                }),
                Box::new(BrokenSource),
                Box::new(HeadlineSource {
                    title: "Bitcoin Magazine",
                    headlines: vec![
                        ("ETF inflows steady; miners adjust post-halving", 2),
                        ("Bullish breakout as rally extends", 1),
                    ],
                }),
            ],
        );

        let result = dash.market_sentiment().await;

        assert_eq!(result.items.len(), 3);
        assert_eq!(result.items[0].source, "CoinDesk");
        assert_eq!(result.items[0].link, "https://news.example/3");
        assert_eq!(result.items[2].source, "Bitcoin Magazine");
        let expected = aggregate(&result.items.iter().map(|i| i.score).collect::<Vec<_>>());
        assert_eq!(result.score, expected);
        assert_eq!(result.label(), SentimentLabel::Bullish);
    }

    #[tokio::test]
    async fn neutral_when_every_source_fails() {
        let dash = dashboard_with(Box::new(DownProvider), vec![Box::new(BrokenSource)]);
        let result = dash.market_sentiment().await;
        assert_eq!(result.score, 50);
        assert!(result.items.is_empty());
        assert_eq!(result.label(), SentimentLabel::Neutral);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Crate-root re-exports
// ═══════════════════════════════════════════════════════════════════

mod reexports {
    use super::*;

    #[test]
    fn pure_engine_available_at_root() {
        let schedule = generate_schedule(make_date(2024, 1, 1), make_date(2024, 1, 31), Cadence::Weekly);
        assert_eq!(schedule.len(), 5);
        let result = simulate(&schedule, &PriceSeries::new(), 100.0);
        assert!(result.timeline.is_empty());
        assert_eq!(score_text(""), 50);
        assert_eq!(aggregate(&[]), 50);
    }
}
