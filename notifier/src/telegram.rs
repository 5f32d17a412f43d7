//! Telegram Bot API notifier.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::dispatch::Notifier;
use crate::errors::DeliveryError;

pub const DEFAULT_TELEGRAM_ENDPOINT: &str = "https://api.telegram.org";

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Every Bot API response is wrapped in this envelope.
#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
    result: Option<T>,
}

#[derive(Debug, Deserialize)]
struct BotUser {
    username: Option<String>,
}

#[derive(Clone)]
pub struct TelegramClient {
    http: Client,
    /// `{endpoint}/bot{token}`; never logged.
    base_url: String,
    chat_id: String,
}

impl TelegramClient {
    pub fn new(endpoint: &str, token: &str, chat_id: String) -> Result<Self, DeliveryError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            base_url: format!("{}/bot{}", endpoint.trim_end_matches('/'), token),
            chat_id,
        })
    }

    /// Startup probe: confirms the token is accepted and returns the bot name.
    #[instrument(skip(self), level = "debug")]
    pub async fn check(&self) -> Result<String, DeliveryError> {
        let url = format!("{}/getMe", self.base_url);
        let resp = self.http.get(&url).send().await?;
        let envelope: ApiEnvelope<BotUser> = resp.json().await?;
        let user = accept(envelope)?;
        Ok(user.username.unwrap_or_default())
    }
}

#[async_trait]
impl Notifier for TelegramClient {
    #[instrument(skip(self, text), fields(chat_id = %self.chat_id, len = text.len()), level = "debug")]
    async fn send(&self, text: &str) -> Result<(), DeliveryError> {
        let url = format!("{}/sendMessage", self.base_url);
        let body = SendMessage {
            chat_id: &self.chat_id,
            text,
        };

        let resp = self.http.post(&url).json(&body).send().await?;
        let status = resp.status();
        let envelope: ApiEnvelope<serde_json::Value> = resp.json().await?;
        accept(envelope).map_err(|e| match e {
            DeliveryError::Rejected(msg) => DeliveryError::Rejected(format!("{status}: {msg}")),
            other => other,
        })?;

        debug!("telegram message accepted");
        Ok(())
    }
}

fn accept<T>(envelope: ApiEnvelope<T>) -> Result<T, DeliveryError> {
    match (envelope.ok, envelope.result) {
        (true, Some(result)) => Ok(result),
        (true, None) => Err(DeliveryError::Rejected("empty result".into())),
        (false, _) => Err(DeliveryError::Rejected(
            envelope
                .description
                .unwrap_or_else(|| "unknown error".into()),
        )),
    }
}
