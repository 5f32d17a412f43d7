use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use backend::{bingx::BingxClient, config::AppConfig, universe::StaticUniverse};
use common::logger::init_tracing;
use notifier::TelegramClient;
use scheduler::{ScanCounters, ScanEngine, SystemClock};

/// Fails startup when the exchange is unreachable or rejects the key.
async fn probe_exchange(feed: &BingxClient) -> anyhow::Result<()> {
    let server_ms = feed
        .check_connectivity()
        .await
        .context("bingx connectivity probe failed")?;

    let skew_ms = chrono::Utc::now().timestamp_millis() - server_ms as i64;
    if skew_ms.abs() > 5_000 {
        warn!(skew_ms, "local clock differs from exchange time");
    }
    info!(server_ms, "exchange reachable");
    Ok(())
}

/// Fails startup when the bot token is rejected.
async fn probe_chat(telegram: &TelegramClient) -> anyhow::Result<()> {
    let bot = telegram
        .check()
        .await
        .context("telegram bot probe failed")?;
    info!(bot = %bot, "chat bot reachable");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loaded before the logger exists; a bad config surfaces as main's error.
    let cfg = AppConfig::from_env().context("invalid configuration")?;
    init_tracing("scanner", cfg.is_production);

    info!("Starting contract signal scanner...");
    info!(config = ?cfg, "configuration loaded");

    let feed = BingxClient::new(cfg.bingx_http_endpoint.clone(), cfg.bingx_api_key.clone())?;
    probe_exchange(&feed).await?;

    let telegram = TelegramClient::new(
        &cfg.telegram_http_endpoint,
        &cfg.telegram_bot_token,
        cfg.telegram_chat_id.clone(),
    )?;
    probe_chat(&telegram).await?;

    let universe = StaticUniverse::perpetuals(&cfg.symbols, &cfg.settlement);
    info!(instruments = universe.len(), "scan universe ready");

    let engine = ScanEngine::new(
        cfg.scan_config(),
        Arc::new(feed),
        Arc::new(universe),
        Arc::new(telegram),
        Arc::new(SystemClock),
        ScanCounters::default(),
    );

    tokio::select! {
        _ = engine.run_forever() => {}
        res = tokio::signal::ctrl_c() => {
            res?;
            info!("Shutdown signal received");
        }
    }

    Ok(())
}
