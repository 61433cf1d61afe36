//! dexwatch - cross-source price discrepancy watcher.
//!
//! Queries every configured quote source concurrently, reports the spread,
//! and runs detected opportunities through a simulated settlement path,
//! recording each attempt in the trade ledger.

mod config;
mod round;

use clap::Parser;
use config::AppConfig;
use dexwatch_core::{FixedPoint, Token, TradeLedger, TradeOutcome};
use dexwatch_executor::{SimulatedSettlement, TradeExecutor};
use dexwatch_feeds::PriceAggregator;
use round::{run_round, Round};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// dexwatch CLI
#[derive(Parser, Debug)]
#[command(name = "dexwatch")]
#[command(about = "Cross-source token price discrepancy watcher", long_about = None)]
struct Args {
    /// Token to price (symbol or contract address)
    token: String,

    /// Trade amount for detected opportunities
    #[arg(short, long, default_value_t = 1.0)]
    amount: f64,

    /// Configuration file path
    #[arg(short, long, default_value = "dexwatch.json")]
    config: String,

    /// Per-fetch timeout in milliseconds (overrides config)
    #[arg(short, long)]
    timeout_ms: Option<u64>,

    /// Log level: trace, debug, info, warn, error (overrides config)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Keep polling at this interval in seconds instead of running once
    #[arg(short, long)]
    watch: Option<u64>,

    /// Emit rounds as JSON instead of plain text
    #[arg(short, long, default_value_t = false)]
    json: bool,
}

/// The CLI flag wins; otherwise the config file's level applies.
fn effective_log_level<'a>(cli: Option<&'a str>, config: &'a AppConfig) -> &'a str {
    cli.unwrap_or(&config.log_level)
}

fn init_logging(level: &str) {
    let level = match level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

fn print_round(round: &Round, json: bool) {
    if json {
        match serde_json::to_string_pretty(round) {
            Ok(out) => println!("{out}"),
            Err(e) => error!("failed to serialize round: {}", e),
        }
        return;
    }

    if round.snapshot.is_empty() {
        println!("no source returned a price this round");
    }
    for quote in round.snapshot.iter() {
        println!("  {:<16} {}", quote.source, quote.price.to_f64());
    }

    match &round.opportunity {
        Some(opp) => println!(
            "opportunity: buy at {} ({}), sell at {} ({}), spread {} ({} bps)",
            opp.buy_source,
            opp.buy_price.to_f64(),
            opp.sell_source,
            opp.sell_price.to_f64(),
            opp.spread().to_f64(),
            opp.spread_bps()
        ),
        None => println!("no opportunity"),
    }

    if let Some(trade) = &round.trade {
        match &trade.outcome {
            TradeOutcome::Succeeded => println!(
                "trade: {} {} from {} to {}: succeeded",
                trade.amount.to_f64(),
                trade.token,
                trade.buy_source,
                trade.sell_source
            ),
            TradeOutcome::Failed(reason) => println!(
                "trade: {} {} from {} to {}: failed: {}",
                trade.amount.to_f64(),
                trade.token,
                trade.buy_source,
                trade.sell_source,
                reason
            ),
        }
    }
}

fn print_history(ledger: &TradeLedger) {
    let history = ledger.history();
    if history.is_empty() {
        return;
    }
    println!("trade history ({} records):", history.len());
    for record in &history {
        let outcome = match &record.outcome {
            TradeOutcome::Succeeded => "succeeded".to_string(),
            TradeOutcome::Failed(reason) => format!("failed: {reason}"),
        };
        println!(
            "  {} {} {} -> {}: {}",
            record.amount.to_f64(),
            record.token,
            record.buy_source,
            record.sell_source,
            outcome
        );
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env before reading any configuration from the environment
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let config = match AppConfig::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            init_logging(args.log_level.as_deref().unwrap_or("info"));
            error!("failed to load config '{}': {}", args.config, e);
            return ExitCode::FAILURE;
        }
    };
    init_logging(effective_log_level(args.log_level.as_deref(), &config));

    let registry = match config.build_registry() {
        Ok(registry) => registry,
        Err(e) => {
            error!("invalid source configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if registry.is_empty() {
        error!(
            "no sources configured; add them to '{}' or set DEXWATCH_SOURCE_* variables",
            args.config
        );
        return ExitCode::FAILURE;
    }

    let Some(token) = Token::new(&args.token) else {
        error!("token must not be empty");
        return ExitCode::FAILURE;
    };
    let Some(amount) = FixedPoint::try_from_f64(args.amount).filter(|a| !a.is_zero()) else {
        error!("amount must be a positive number");
        return ExitCode::FAILURE;
    };

    let timeout = Duration::from_millis(args.timeout_ms.unwrap_or(config.fetch_timeout_ms));
    let aggregator = PriceAggregator::new(timeout);
    let ledger = Arc::new(TradeLedger::new());
    let executor = TradeExecutor::new(
        Arc::new(SimulatedSettlement::new(config.node_url.clone())),
        Arc::clone(&ledger),
    );

    info!(
        "watching {} across {} sources (timeout {:?})",
        token,
        registry.len(),
        timeout
    );

    match args.watch {
        None => {
            let round = run_round(&aggregator, &executor, &registry, &token, amount).await;
            print_round(&round, args.json);
        }
        Some(secs) => {
            let interval = Duration::from_secs(secs.max(1));
            loop {
                let round = run_round(&aggregator, &executor, &registry, &token, amount).await;
                print_round(&round, args.json);

                tokio::select! {
                    _ = tokio::time::sleep(interval) => {}
                    _ = tokio::signal::ctrl_c() => {
                        info!("shutting down");
                        break;
                    }
                }
            }
        }
    }

    print_history(&ledger);
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_log_level_defaults_to_config() {
        let mut config = AppConfig::default();
        config.log_level = "debug".to_string();

        assert_eq!(effective_log_level(None, &config), "debug");
    }

    #[test]
    fn test_log_level_cli_overrides_config() {
        let mut config = AppConfig::default();
        config.log_level = "debug".to_string();

        assert_eq!(effective_log_level(Some("warn"), &config), "warn");
    }
}
