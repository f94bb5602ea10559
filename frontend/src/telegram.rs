use gloo_net::http::Request;
use serde::Serialize;
use thiserror::Error;

use crate::config::TelegramConfig;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum SubmitError {
    #[error("bot token or chat id was not provided at build time")]
    MissingCredentials,
    #[error("failed to encode request: {0}")]
    Encode(String),
    #[error("network request failed: {0}")]
    Network(String),
    #[error("Telegram rejected the message with status {0}")]
    Rejected(u16),
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum ParseMode {
    Markdown,
}

#[derive(Debug, Serialize)]
pub struct SendMessage<'a> {
    pub chat_id: &'a str,
    pub text: &'a str,
    pub parse_mode: ParseMode,
}

/// Anything that can deliver a finished lead message to the sales chat.
#[allow(async_fn_in_trait)]
pub trait MessageSender {
    async fn send_message(&self, text: &str) -> Result<(), SubmitError>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct TelegramClient {
    config: TelegramConfig,
}

impl TelegramClient {
    pub fn new(config: TelegramConfig) -> Self {
        Self { config }
    }

    pub fn endpoint(&self) -> Result<String, SubmitError> {
        let token = self
            .config
            .bot_token
            .as_deref()
            .ok_or(SubmitError::MissingCredentials)?;
        Ok(format!(
            "{}/bot{}/sendMessage",
            self.config.api_base.trim_end_matches('/'),
            token
        ))
    }

    pub fn request_body<'a>(&'a self, text: &'a str) -> Result<SendMessage<'a>, SubmitError> {
        let chat_id = self
            .config
            .chat_id
            .as_deref()
            .ok_or(SubmitError::MissingCredentials)?;
        Ok(SendMessage {
            chat_id,
            text,
            parse_mode: ParseMode::Markdown,
        })
    }
}

impl MessageSender for TelegramClient {
    async fn send_message(&self, text: &str) -> Result<(), SubmitError> {
        let url = self.endpoint()?;
        let body = self.request_body(text)?;

        let response = Request::post(&url)
            .json(&body)
            .map_err(|e| SubmitError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        if response.ok() {
            Ok(())
        } else {
            Err(SubmitError::Rejected(response.status()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client(token: Option<&str>, chat_id: Option<&str>) -> TelegramClient {
        TelegramClient::new(TelegramConfig {
            api_base: "https://api.telegram.org/".to_string(),
            bot_token: token.map(str::to_owned),
            chat_id: chat_id.map(str::to_owned),
        })
    }

    #[test]
    fn endpoint_embeds_token() {
        let client = client(Some("123:abc"), Some("-100"));
        assert_eq!(
            client.endpoint().unwrap(),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
    }

    #[test]
    fn body_uses_markdown_parse_mode() {
        let client = client(Some("123:abc"), Some("-100"));
        let body = client.request_body("*hi*").unwrap();
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "chat_id": "-100", "text": "*hi*", "parse_mode": "Markdown" })
        );
    }

    #[test]
    fn missing_credentials_are_reported() {
        assert_eq!(
            client(None, Some("-100")).endpoint(),
            Err(SubmitError::MissingCredentials)
        );
        assert_eq!(
            client(Some("123:abc"), None).request_body("x").unwrap_err(),
            SubmitError::MissingCredentials
        );
    }
}
