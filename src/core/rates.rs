//! Currency rate lookup abstractions and the conversion helper.

use async_trait::async_trait;
use std::collections::HashMap;

/// One response's worth of conversion factors relative to a base currency.
/// Valid only for the request that produced it; never cached or persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateSnapshot {
    rates: HashMap<String, f64>,
}

impl RateSnapshot {
    pub fn new(rates: HashMap<String, f64>) -> Self {
        Self { rates }
    }

    /// The conversion factor for a target code, if the upstream service
    /// provided it. Callers must treat a missing code as unknown, not zero.
    pub fn factor(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    /// The factor for a code, falling back to `1.0` when absent.
    ///
    /// With the identity fallback a missing code displays the base amount
    /// unchanged under the target currency's label.
    pub fn factor_or_identity(&self, code: &str) -> f64 {
        self.factor(code).unwrap_or(1.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RateLookupError {
    #[error("rate request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("rate service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("malformed rate response: {0}")]
    Malformed(String),
}

/// Fetches current conversion factors from a remote rate service.
///
/// Exactly one network round trip per call; no retry, no caching, no
/// internal timeout beyond what the transport enforces.
#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch_rates(
        &self,
        base: &str,
        targets: &[String],
    ) -> Result<RateSnapshot, RateLookupError>;
}

/// Converts a base-currency amount with the given factor. Display rounding
/// to two decimals is left to the renderer.
pub fn convert(amount: u32, factor: f64) -> f64 {
    f64::from(amount) * factor
}
