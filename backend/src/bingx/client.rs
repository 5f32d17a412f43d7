use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use market::types::{BarInterval, BarSeries};
use market::{BarFeed, MarketError};

use crate::bingx::errors::BingxError;
use crate::bingx::types::{Envelope, Kline, ServerTime, into_bars};

const API_KEY_HEADER: &str = "X-BX-APIKEY";

#[derive(Clone)]
pub struct BingxClient {
    http: Client,
    url: String,
    api_key: String,
}

impl BingxClient {
    pub fn new(url: String, api_key: String) -> Result<Self, BingxError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            url: url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Startup probe. Returns the exchange server time in epoch milliseconds.
    #[instrument(skip(self), level = "debug")]
    pub async fn check_connectivity(&self) -> Result<u64, BingxError> {
        let url = format!("{}/openApi/swap/v2/server/time", self.url);

        let resp = self
            .http
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?
            .error_for_status()?;

        let envelope: Envelope<ServerTime> = resp.json().await?;
        Ok(envelope.into_data(None)?.server_time)
    }

    #[instrument(skip(self), level = "debug")]
    pub async fn fetch_klines(
        &self,
        symbol: &str,
        interval: BarInterval,
        limit: usize,
    ) -> Result<Vec<Kline>, BingxError> {
        let url = format!("{}/openApi/swap/v3/quote/klines", self.url);
        let limit = limit.to_string();

        let resp = self
            .http
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .query(&[
                ("symbol", symbol),
                ("interval", interval.as_str()),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let envelope: Envelope<Vec<Kline>> = resp.json().await?;
        let klines = envelope.into_data(Some(symbol))?;

        debug!(count = klines.len(), "bingx klines fetched");
        Ok(klines)
    }
}

#[async_trait]
impl BarFeed for BingxClient {
    async fn fetch_bars(
        &self,
        symbol: &str,
        interval: BarInterval,
        limit: usize,
    ) -> Result<BarSeries, MarketError> {
        let klines = self.fetch_klines(symbol, interval, limit).await?;
        BarSeries::new(into_bars(&klines)?)
    }
}
