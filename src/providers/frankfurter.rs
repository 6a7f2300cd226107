use crate::core::rates::{RateLookupError, RateProvider, RateSnapshot};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Rate client for a frankfurter-style service: GET
/// `/latest?from=<base>&to=<c1,c2,...>` returning `{"rates": {...}}`.
///
/// Stateless by design, one round trip per call, no retry and no caching.
/// Codes the upstream does not quote are simply absent from the snapshot.
pub struct FrankfurterProvider {
    base_url: String,
}

impl FrankfurterProvider {
    pub fn new(base_url: &str) -> Self {
        FrankfurterProvider {
            base_url: base_url.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RatesResponse {
    rates: HashMap<String, f64>,
}

#[async_trait]
impl RateProvider for FrankfurterProvider {
    #[instrument(
        name = "RateFetch",
        skip(self, targets),
        fields(base = %base)
    )]
    async fn fetch_rates(
        &self,
        base: &str,
        targets: &[String],
    ) -> Result<RateSnapshot, RateLookupError> {
        let url = format!(
            "{}/latest?from={}&to={}",
            self.base_url,
            base,
            targets.join(",")
        );
        debug!("Requesting currency rates from {}", url);

        let client = reqwest::Client::builder().user_agent("slm/1.0").build()?;
        let response = client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RateLookupError::Status { status, body });
        }

        let text = response.text().await?;
        let data: RatesResponse = serde_json::from_str(&text)
            .map_err(|e| RateLookupError::Malformed(format!("{e} in body: {text}")))?;

        debug!(rates = data.rates.len(), "Received currency rates");
        Ok(RateSnapshot::new(data.rates))
    }
}
