use thiserror::Error;

/// Unified error type for the entire dca-sentiment-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
///
/// The pure engine (schedule, simulation, scoring) never fails; errors come
/// from boundary validation and from the I/O layer.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Input validation ────────────────────────────────────────────
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid purchase amount {0}: must be a finite number greater than zero")]
    InvalidAmount(f64),

    #[error("Invalid cadence '{0}': expected weekly, biweekly or monthly")]
    InvalidCadence(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),

    // ── API / Network ───────────────────────────────────────────────
    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("No provider available for {0}")]
    NoProvider(String),

    #[error("Fetch from {source_name} timed out after {seconds}s")]
    Timeout {
        source_name: String,
        seconds: u64,
    },

    // ── Serialization ───────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // reqwest errors often carry the full URL, including API keys in the query.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
