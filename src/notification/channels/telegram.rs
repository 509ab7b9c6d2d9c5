//! Telegram 渠道（Bot API sendMessage）

use crate::config::{Credentials, TELEGRAM_API_URL};
use crate::notification::channel::NotificationChannel;
use anyhow::{anyhow, bail, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

/// Telegram 渠道配置
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot API 基础 URL（支持代理和测试）
    pub api_url: String,
    /// Bot token
    pub bot_token: String,
    /// Chat ID
    pub chat_id: String,
    /// 请求超时，None 表示不设超时
    pub timeout: Option<Duration>,
}

impl TelegramConfig {
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            api_url: TELEGRAM_API_URL.to_string(),
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            timeout: None,
        }
    }

    pub fn from_credentials(credentials: &Credentials) -> Self {
        Self::new(credentials.telegram_token(), credentials.telegram_chat_id())
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_url.trim_end_matches('/'),
            self.bot_token
        )
    }
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct BotApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Telegram 渠道
pub struct TelegramChannel {
    client: reqwest::blocking::Client,
    config: TelegramConfig,
}

impl TelegramChannel {
    pub fn new(config: TelegramConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| anyhow!("Cannot create HTTP client: {}", e))?;

        Ok(Self { client, config })
    }

    pub fn chat_id(&self) -> &str {
        &self.config.chat_id
    }
}

impl NotificationChannel for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    fn send(&self, text: &str) -> Result<()> {
        let request = SendMessageRequest {
            chat_id: &self.config.chat_id,
            text,
        };

        let response = self
            .client
            .post(self.config.send_message_url())
            .json(&request)
            .send()
            // URL 中含 bot token，错误文本里必须去掉
            .map_err(|e| anyhow!("Telegram request failed: {}", e.without_url()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| anyhow!("Failed to read Telegram response: {}", e.without_url()))?;

        // 错误响应同样带 {"ok": false, "description": ...}
        let reply = serde_json::from_str::<BotApiResponse>(&body).ok();

        if !status.is_success() || !reply.as_ref().map_or(false, |r| r.ok) {
            let description = reply
                .and_then(|r| r.description)
                .unwrap_or(body);
            bail!("Telegram API error ({}): {}", status, description);
        }

        info!(chat_id = %self.config.chat_id, "Message sent successfully");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_message_url() {
        let config = TelegramConfig::new("123:abc", "42").with_api_url("http://localhost:8081/");
        assert_eq!(config.send_message_url(), "http://localhost:8081/bot123:abc/sendMessage");
    }

    #[test]
    fn test_default_api_url() {
        let config = TelegramConfig::new("t", "c");
        assert_eq!(config.api_url, TELEGRAM_API_URL);
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_request_body() {
        let body = serde_json::to_value(SendMessageRequest { chat_id: "42", text: "hi" }).unwrap();
        assert_eq!(body, serde_json::json!({"chat_id": "42", "text": "hi"}));
    }

    #[test]
    fn test_unreachable_api_is_error() {
        let config = TelegramConfig::new("t", "42")
            .with_api_url("http://127.0.0.1:1")
            .with_timeout(Duration::from_secs(5));
        let channel = TelegramChannel::new(config).unwrap();
        assert!(channel.send("hi").is_err());
    }

    #[test]
    fn test_transport_error_does_not_expose_token() {
        let config = TelegramConfig::new("123456:SECRET-BOT-TOKEN", "42")
            .with_api_url("http://127.0.0.1:1")
            .with_timeout(Duration::from_secs(5));
        let channel = TelegramChannel::new(config).unwrap();

        let err = channel.send("hi").unwrap_err();
        let text = format!("{:#} {:?}", err, err);
        assert!(text.contains("Telegram request failed"));
        assert!(!text.contains("SECRET-BOT-TOKEN"));
    }
}
