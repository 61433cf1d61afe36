//! Concurrent price aggregation across all registered sources.

use crate::fetcher::{PriceFetcher, QuoteTransport};
use dexwatch_core::{PriceSnapshot, SourceRegistry, Token};
use futures_util::future::join_all;
use std::time::Duration;
use tracing::debug;

/// Fans one fetch out per registered source and collects the survivors.
///
/// Every fetch runs concurrently under its own deadline, so one slow or
/// unreachable source never delays the others: the whole round is bounded
/// by the fetch timeout, not by the sum of source latencies. Results are
/// keyed by source in registry order, independent of completion order.
/// Dropping the `aggregate` future cancels all in-flight fetches.
#[derive(Debug, Clone)]
pub struct PriceAggregator<T = PriceFetcher> {
    transport: T,
    timeout: Duration,
}

impl PriceAggregator<PriceFetcher> {
    /// Aggregator over HTTP with the given per-fetch timeout.
    pub fn new(timeout: Duration) -> Self {
        Self {
            transport: PriceFetcher::new(timeout),
            timeout,
        }
    }
}

impl<T: QuoteTransport> PriceAggregator<T> {
    /// Aggregator over a custom transport.
    pub fn with_transport(transport: T, timeout: Duration) -> Self {
        Self { transport, timeout }
    }

    /// Collect a snapshot of current prices for a token.
    ///
    /// Never fails: a source that errors or times out contributes nothing
    /// and the snapshot may come back empty.
    pub async fn aggregate(&self, registry: &SourceRegistry, token: &Token) -> PriceSnapshot {
        let fetches = registry.all().iter().map(|source| async move {
            let result = tokio::time::timeout(
                self.timeout,
                self.transport.fetch(source, token),
            )
            .await;
            (source, result)
        });

        let mut snapshot = PriceSnapshot::new(token.clone());
        for (source, result) in join_all(fetches).await {
            match result {
                Ok(Ok(quote)) => snapshot.insert(quote),
                Ok(Err(e)) => debug!("{}: dropped from round: {}", source.name(), e),
                Err(_) => debug!("{}: dropped from round: fetch timed out", source.name()),
            }
        }

        debug!(
            "{}: {}/{} sources quoted",
            token,
            snapshot.len(),
            registry.len()
        );
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use async_trait::async_trait;
    use dexwatch_core::{FixedPoint, PriceQuote, Source};
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::time::Instant;

    /// Scripted transport: per-source result plus an optional delay.
    struct StubTransport {
        outcomes: HashMap<String, Result<f64, FetchError>>,
        delays_ms: HashMap<String, u64>,
    }

    impl StubTransport {
        fn new() -> Self {
            Self {
                outcomes: HashMap::new(),
                delays_ms: HashMap::new(),
            }
        }

        fn quote(mut self, source: &str, price: f64) -> Self {
            self.outcomes.insert(source.to_string(), Ok(price));
            self
        }

        fn fail(mut self, source: &str, error: FetchError) -> Self {
            self.outcomes.insert(source.to_string(), Err(error));
            self
        }

        fn delay(mut self, source: &str, ms: u64) -> Self {
            self.delays_ms.insert(source.to_string(), ms);
            self
        }
    }

    #[async_trait]
    impl QuoteTransport for StubTransport {
        async fn fetch(&self, source: &Source, _token: &Token) -> Result<PriceQuote, FetchError> {
            if let Some(&ms) = self.delays_ms.get(source.name()) {
                tokio::time::sleep(Duration::from_millis(ms)).await;
            }
            match self.outcomes.get(source.name()) {
                Some(Ok(price)) => Ok(PriceQuote::new(source.name(), FixedPoint::from_f64(*price))),
                Some(Err(e)) => Err(e.clone()),
                None => Err(FetchError::NetworkUnavailable("unknown source".into())),
            }
        }
    }

    fn registry(names: &[&str]) -> SourceRegistry {
        let mut registry = SourceRegistry::new();
        for name in names {
            registry
                .register(name, &format!("https://{name}.example/api"))
                .unwrap();
        }
        registry
    }

    fn token() -> Token {
        Token::new("ETH").unwrap()
    }

    #[tokio::test]
    async fn test_aggregate_skips_failed_source() {
        let transport = StubTransport::new()
            .quote("a", 10.0)
            .fail("b", FetchError::BadResponse("HTTP 500".into()))
            .quote("c", 12.0);
        let aggregator = PriceAggregator::with_transport(transport, Duration::from_secs(1));

        let snapshot = aggregator.aggregate(&registry(&["a", "b", "c"]), &token()).await;

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get("a").unwrap().price, FixedPoint::from_f64(10.0));
        assert_eq!(snapshot.get("c").unwrap().price, FixedPoint::from_f64(12.0));
        assert!(snapshot.get("b").is_none());
    }

    #[tokio::test]
    async fn test_aggregate_all_sources_failed() {
        let transport = StubTransport::new()
            .fail("a", FetchError::Timeout)
            .fail("b", FetchError::MissingField);
        let aggregator = PriceAggregator::with_transport(transport, Duration::from_secs(1));

        let snapshot = aggregator.aggregate(&registry(&["a", "b"]), &token()).await;

        assert!(snapshot.is_empty());
    }

    #[tokio::test]
    async fn test_aggregate_snapshot_keeps_registry_order() {
        // "c" completes first, but the snapshot still iterates in
        // registration order.
        let transport = StubTransport::new()
            .quote("a", 10.0)
            .delay("a", 50)
            .quote("b", 11.0)
            .delay("b", 30)
            .quote("c", 12.0);
        let aggregator = PriceAggregator::with_transport(transport, Duration::from_secs(1));

        let snapshot = aggregator.aggregate(&registry(&["a", "b", "c"]), &token()).await;

        let order: Vec<&str> = snapshot.iter().map(|q| q.source.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_aggregate_slow_source_bounded_by_timeout() {
        let transport = StubTransport::new()
            .quote("fast", 10.0)
            .quote("slow", 11.0)
            .delay("slow", 2_000);
        let aggregator = PriceAggregator::with_transport(transport, Duration::from_millis(100));

        let started = Instant::now();
        let snapshot = aggregator
            .aggregate(&registry(&["fast", "slow"]), &token())
            .await;
        let elapsed = started.elapsed();

        // Bounded by the timeout, not the slow source's 2s latency
        assert!(elapsed < Duration::from_millis(1_000), "took {elapsed:?}");
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.get("slow").is_none());
    }

    #[tokio::test]
    async fn test_aggregate_empty_registry() {
        let aggregator =
            PriceAggregator::with_transport(StubTransport::new(), Duration::from_secs(1));
        let snapshot = aggregator.aggregate(&SourceRegistry::new(), &token()).await;
        assert!(snapshot.is_empty());
    }
}
