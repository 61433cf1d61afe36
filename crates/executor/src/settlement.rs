//! Settlement capability boundary.

use crate::error::SettlementError;
use async_trait::async_trait;
use dexwatch_core::{FixedPoint, Token};
use tracing::info;

/// The act of actually moving value to realize an opportunity.
///
/// Injected into the executor by the caller; the engine never constructs a
/// real implementation itself. An on-chain submission path and a simulation
/// stub are interchangeable behind this trait.
#[async_trait]
pub trait Settlement: Send + Sync {
    async fn settle(
        &self,
        buy_source: &str,
        sell_source: &str,
        token: &Token,
        amount: FixedPoint,
    ) -> Result<(), SettlementError>;
}

/// Settlement stub that logs the would-be trade and reports success.
///
/// Stands in for the real on-chain path during dry runs; holds the opaque
/// node connection string only to surface it in logs.
#[derive(Debug, Clone, Default)]
pub struct SimulatedSettlement {
    node_url: Option<String>,
}

impl SimulatedSettlement {
    pub fn new(node_url: Option<String>) -> Self {
        Self { node_url }
    }
}

#[async_trait]
impl Settlement for SimulatedSettlement {
    async fn settle(
        &self,
        buy_source: &str,
        sell_source: &str,
        token: &Token,
        amount: FixedPoint,
    ) -> Result<(), SettlementError> {
        info!(
            "simulated settlement: {} {} from {} to {}{}",
            amount.to_f64(),
            token,
            buy_source,
            sell_source,
            self.node_url
                .as_deref()
                .map(|url| format!(" via {url}"))
                .unwrap_or_default()
        );
        Ok(())
    }
}
