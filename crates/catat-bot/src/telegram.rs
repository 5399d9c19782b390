//! Telegram Bot API client
//!
//! Long-polling transport: `getUpdates` with an offset cursor, plus
//! `sendMessage` and `sendPhoto` for replies. Only the fields the bot
//! consumes are modeled; everything else in the API payloads is ignored.

use anyhow::{bail, Context, Result};
use reqwest::multipart;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://api.telegram.org";

/// Telegram Bot API client
#[derive(Clone)]
pub struct TelegramClient {
    http_client: Client,
    base_url: String,
    token: String,
}

impl TelegramClient {
    /// Create a new client
    ///
    /// `base_url` is explicit so tests can point the client at a mock
    /// server.
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    /// Create from environment variables
    ///
    /// Requires `TELEGRAM_TOKEN`; `TELEGRAM_API_URL` overrides the API
    /// host.
    pub fn from_env() -> Option<Self> {
        let token = std::env::var("TELEGRAM_TOKEN").ok()?;
        let base_url =
            std::env::var("TELEGRAM_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Some(Self::new(&base_url, &token))
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token, method)
    }

    /// Fetch pending updates, blocking server-side up to `timeout_secs`
    pub async fn get_updates(&self, offset: Option<i64>, timeout_secs: u64) -> Result<Vec<Update>> {
        let mut query = vec![("timeout", timeout_secs.to_string())];
        if let Some(offset) = offset {
            query.push(("offset", offset.to_string()));
        }

        let response = self
            .http_client
            .get(self.method_url("getUpdates"))
            .query(&query)
            .send()
            .await
            .context("getUpdates request failed")?;

        let envelope: ApiResponse<Vec<Update>> = response
            .json()
            .await
            .context("getUpdates response was not valid JSON")?;
        let updates = envelope.into_result("getUpdates")?;
        debug!(count = updates.len(), "fetched updates");
        Ok(updates)
    }

    /// Send a text reply to a chat
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        let response = self
            .http_client
            .post(self.method_url("sendMessage"))
            .json(&serde_json::json!({ "chat_id": chat_id, "text": text }))
            .send()
            .await
            .context("sendMessage request failed")?;

        let envelope: ApiResponse<serde_json::Value> = response
            .json()
            .await
            .context("sendMessage response was not valid JSON")?;
        envelope.into_result("sendMessage")?;
        Ok(())
    }

    /// Send a PNG photo to a chat
    pub async fn send_photo(&self, chat_id: i64, png: Vec<u8>) -> Result<()> {
        let part = multipart::Part::bytes(png)
            .file_name("chart.png")
            .mime_str("image/png")
            .context("invalid photo mime type")?;
        let form = multipart::Form::new()
            .text("chat_id", chat_id.to_string())
            .part("photo", part);

        let response = self
            .http_client
            .post(self.method_url("sendPhoto"))
            .multipart(form)
            .send()
            .await
            .context("sendPhoto request failed")?;

        let envelope: ApiResponse<serde_json::Value> = response
            .json()
            .await
            .context("sendPhoto response was not valid JSON")?;
        envelope.into_result("sendPhoto")?;
        Ok(())
    }

    /// Check if the bot token is valid and the API reachable
    pub async fn health_check(&self) -> bool {
        match self
            .http_client
            .get(self.method_url("getMe"))
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }
}

/// Envelope every Bot API response is wrapped in
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

impl<T> ApiResponse<T> {
    fn into_result(self, method: &str) -> Result<T> {
        if !self.ok {
            bail!(
                "{} failed: {}",
                method,
                self.description.unwrap_or_else(|| "unknown error".to_string())
            );
        }
        match self.result {
            Some(result) => Ok(result),
            None => bail!("{} returned ok without a result", method),
        }
    }
}

/// One incoming update
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

/// An incoming chat message
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}
