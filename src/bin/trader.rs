//! Trader
//!
//! Authenticates with the brokerage, then polls market data for every
//! configured symbol on a fixed interval until interrupted.

use dotenvy::dotenv;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::watch;
use tracing::{info, warn};
use tradeloop::config::{Config, TradingMode};
use tradeloop::core::{Scheduler, SymbolPipeline, WatchEntry};
use tradeloop::execution::{ExecutionGateway, PositionSizer};
use tradeloop::logging;
use tradeloop::metrics::Metrics;
use tradeloop::services::{
    Brokerage, HttpBrokerage, HttpMailNotifier, HttpMarketDataProvider, LogNotifier, MarketDataProvider,
    Notifier, PaperBrokerage,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let config = Config::from_env()?;
    info!("Starting Multi-Strategy Trading Platform");
    info!(environment = %config.environment, mode = ?config.mode, "Environment");

    let metrics = Arc::new(Metrics::new()?);

    let broker: Arc<dyn Brokerage> = match config.mode {
        TradingMode::Live => {
            let (Some(url), Some(credentials)) = (&config.broker.base_url, &config.broker.credentials) else {
                return Err("live mode requires BROKER_BASE_URL and broker credentials".into());
            };
            Arc::new(HttpBrokerage::new(url.clone(), credentials.clone()))
        }
        TradingMode::Paper => {
            info!(cash = config.broker.paper_starting_cash, "Using paper brokerage");
            Arc::new(PaperBrokerage::new(config.broker.paper_starting_cash))
        }
    };

    let market_data_url = config
        .market_data
        .base_url
        .clone()
        .ok_or("MARKET_DATA_BASE_URL (or BROKER_BASE_URL) must be set")?;
    let market_data: Arc<dyn MarketDataProvider> = Arc::new(HttpMarketDataProvider::new(market_data_url));

    let notifier: Arc<dyn Notifier> = match (&config.notifier.relay_url, &config.notifier.recipient) {
        (Some(url), Some(recipient)) => Arc::new(HttpMailNotifier::new(
            url.clone(),
            config.notifier.credentials.clone(),
            recipient.clone(),
        )),
        _ => {
            warn!("NOTIFIER_URL/ALERT_EMAIL not set, alerts will only be logged");
            Arc::new(LogNotifier)
        }
    };

    let gateway = ExecutionGateway::new(broker.clone(), config.execution.clone()).with_metrics(metrics.clone());
    let pipeline = SymbolPipeline::new(
        market_data,
        broker.clone(),
        notifier.clone(),
        PositionSizer::from_config(&config.trading),
        gateway,
        metrics.clone(),
    );
    let watchlist = WatchEntry::from_config(&config.symbols, config.schedule.enable_options);
    info!(
        interval_secs = config.schedule.poll_interval.as_secs(),
        symbols = watchlist.len(),
        "Polling every {}s",
        config.schedule.poll_interval.as_secs()
    );

    let mut scheduler = Scheduler::new(
        pipeline,
        broker,
        notifier,
        watchlist,
        config.schedule.clone(),
        metrics,
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                let _ = shutdown_tx.send(true);
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for Ctrl-C, stop the process externally");
                std::future::pending::<()>().await;
            }
        }
    });

    let counters = scheduler.run(shutdown_rx).await?;
    info!(
        trades = counters.trade_count,
        ticks = counters.data_ticks,
        "Trading platform stopped"
    );

    Ok(())
}
