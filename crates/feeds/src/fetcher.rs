//! Single-source price fetching over HTTP.

use crate::error::FetchError;
use async_trait::async_trait;
use dexwatch_core::{FixedPoint, PriceQuote, Source, Token};
use std::time::Duration;
use tracing::debug;

/// Default per-fetch deadline.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// One price query against one source for one token.
///
/// Seam between the aggregator and the transport: production code uses the
/// HTTP `PriceFetcher`, tests substitute scripted transports.
#[async_trait]
pub trait QuoteTransport: Send + Sync {
    async fn fetch(&self, source: &Source, token: &Token) -> Result<PriceQuote, FetchError>;
}

/// HTTP price fetcher.
///
/// Issues `GET {endpoint}/price?token={token}` with a bounded timeout and
/// parses the numeric `price` field out of the JSON body. No retries; a
/// failure is terminal for that source within the round.
#[derive(Debug, Clone)]
pub struct PriceFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl PriceFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn price_url(source: &Source, token: &Token) -> String {
        format!(
            "{}/price?token={}",
            source.endpoint().trim_end_matches('/'),
            token
        )
    }
}

impl Default for PriceFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_FETCH_TIMEOUT)
    }
}

#[async_trait]
impl QuoteTransport for PriceFetcher {
    async fn fetch(&self, source: &Source, token: &Token) -> Result<PriceQuote, FetchError> {
        let url = Self::price_url(source, token);
        debug!("{}: GET {}", source.name(), url);

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::BadResponse(format!("HTTP {status}")));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| FetchError::BadResponse(e.to_string()))?;

        let price = parse_price_field(&body)?;
        Ok(PriceQuote::new(source.name(), price))
    }
}

/// Extract the `price` field from a response body.
///
/// Sources quote the price as a JSON number or a numeric string. A missing
/// field is `MissingField`; a non-numeric, non-finite, or non-positive
/// price is `BadResponse`.
pub fn parse_price_field(body: &serde_json::Value) -> Result<FixedPoint, FetchError> {
    let field = body.get("price").ok_or(FetchError::MissingField)?;

    let value = match field {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| FetchError::BadResponse(format!("unparsable price: {field}")))?;

    match FixedPoint::try_from_f64(value) {
        Some(price) if !price.is_zero() => Ok(price),
        _ => Err(FetchError::BadResponse(format!(
            "non-positive price: {value}"
        ))),
    }
}
