use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

use super::cadence::Cadence;
use crate::errors::CoreError;

/// Dashboard configuration. Every field has a default, so a partial JSON
/// document (or `{}`) is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Provider-side asset id (e.g., "bitcoin")
    pub asset_id: String,

    /// Display ticker (e.g., "BTC")
    pub asset_symbol: String,

    /// Fiat currency prices are quoted in (e.g., "USD"). Trimmed and
    /// uppercased on load; providers match it verbatim.
    #[serde(deserialize_with = "deserialize_currency")]
    pub currency: String,

    /// Per-fetch timeout for price and news requests
    pub fetch_timeout_secs: u64,

    /// Maximum raw items taken from each news feed
    pub items_per_feed: usize,

    /// Maximum scored items kept after merging all feeds
    pub news_window: usize,

    /// Longest simulation range accepted, in days
    pub max_range_days: i64,

    pub default_amount: f64,
    pub default_cadence: Cadence,

    /// Optional API keys. Keys: provider name (e.g., "cryptocompare").
    pub api_keys: HashMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            asset_id: "bitcoin".to_string(),
            asset_symbol: "BTC".to_string(),
            currency: "USD".to_string(),
            fetch_timeout_secs: 10,
            items_per_feed: 10,
            news_window: 20,
            max_range_days: 3650,
            default_amount: 100.0,
            default_cadence: Cadence::Weekly,
            api_keys: HashMap::new(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON and validate them.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize settings: {e}")))
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        let currency = &self.currency;
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(CoreError::ValidationError(format!(
                "Invalid currency code '{}': must be exactly 3 uppercase ASCII letters (e.g., USD, EUR)",
                self.currency
            )));
        }
        if self.asset_id.trim().is_empty() {
            return Err(CoreError::ValidationError("asset_id must not be empty".into()));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(CoreError::ValidationError(
                "fetch_timeout_secs must be greater than zero".into(),
            ));
        }
        if self.items_per_feed == 0 || self.news_window == 0 {
            return Err(CoreError::ValidationError(
                "items_per_feed and news_window must be greater than zero".into(),
            ));
        }
        if self.max_range_days <= 0 {
            return Err(CoreError::ValidationError(
                "max_range_days must be greater than zero".into(),
            ));
        }
        if !self.default_amount.is_finite() || self.default_amount <= 0.0 {
            return Err(CoreError::InvalidAmount(self.default_amount));
        }
        Ok(())
    }

    pub fn api_key(&self, provider: &str) -> Option<&str> {
        self.api_keys.get(provider).map(String::as_str)
    }
}

fn deserialize_currency<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().to_ascii_uppercase())
}
