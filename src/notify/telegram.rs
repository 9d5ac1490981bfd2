use async_trait::async_trait;
use reqwest::Client;
use tracing::warn;

use super::{Notifier, NotifyStatus};
use crate::config::TelegramConfig;
use crate::utils::error::NotifyError;

const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Telegram Bot API `sendMessage` channel.
///
/// Message text goes out as a percent-encoded query parameter. When the bot
/// token or chat id is missing the notifier stays constructible and every
/// send becomes a logged no-op, so the pipeline keeps recording prices.
pub struct TelegramNotifier {
    client: Client,
    api_base: String,
    credentials: Option<Credentials>,
}

#[derive(Clone)]
struct Credentials {
    bot_token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(config: &TelegramConfig) -> Self {
        Self::with_api_base(config, DEFAULT_API_BASE)
    }

    /// Points the channel at a different API host. Test seam.
    pub fn with_api_base(config: &TelegramConfig, api_base: &str) -> Self {
        let credentials = match (&config.bot_token, &config.chat_id) {
            (Some(bot_token), Some(chat_id)) => Some(Credentials {
                bot_token: bot_token.clone(),
                chat_id: chat_id.clone(),
            }),
            _ => None,
        };

        Self {
            client: Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            credentials,
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, message: &str) -> Result<NotifyStatus, NotifyError> {
        let Some(credentials) = &self.credentials else {
            warn!("telegram credentials not configured, skipping alert");
            return Ok(NotifyStatus::Disabled);
        };

        let endpoint = format!("{}/bot{}/sendMessage", self.api_base, credentials.bot_token);
        let response = self
            .client
            .get(&endpoint)
            .query(&[("chat_id", credentials.chat_id.as_str()), ("text", message)])
            .send()
            .await
            .map_err(NotifyError::Unreachable)?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::RejectedByChannel {
                status: status.as_u16(),
            });
        }

        Ok(NotifyStatus::Sent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn configured(chat_id: &str) -> TelegramConfig {
        TelegramConfig {
            bot_token: Some("123456:test-token".to_string()),
            chat_id: Some(chat_id.to_string()),
        }
    }

    #[tokio::test]
    async fn test_missing_credentials_is_noop() {
        let notifier = TelegramNotifier::new(&TelegramConfig::default());
        let status = notifier.notify("price dropped").await.unwrap();
        assert_eq!(status, NotifyStatus::Disabled);
    }

    #[tokio::test]
    async fn test_partial_credentials_is_noop() {
        let config = TelegramConfig {
            bot_token: Some("123456:test-token".to_string()),
            chat_id: None,
        };
        let notifier = TelegramNotifier::new(&config);
        assert_eq!(notifier.notify("hi").await.unwrap(), NotifyStatus::Disabled);
    }

    #[tokio::test]
    async fn test_send_message_encodes_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bot123456:test-token/sendMessage"))
            .and(query_param("chat_id", "42"))
            .and(query_param("text", "Price: R$ 179,50 & falling\nLink: https://a.b/c?d=e"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"ok\":true}"))
            .expect(1)
            .mount(&server)
            .await;

        let notifier = TelegramNotifier::with_api_base(&configured("42"), &server.uri());
        let status = notifier
            .notify("Price: R$ 179,50 & falling\nLink: https://a.b/c?d=e")
            .await
            .unwrap();
        assert_eq!(status, NotifyStatus::Sent);
    }

    #[tokio::test]
    async fn test_channel_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let notifier = TelegramNotifier::with_api_base(&configured("42"), &server.uri());
        let err = notifier.notify("hi").await.unwrap_err();
        assert!(matches!(err, NotifyError::RejectedByChannel { status: 403 }));
    }

    #[tokio::test]
    async fn test_unreachable_channel() {
        let notifier = TelegramNotifier::with_api_base(&configured("42"), "http://127.0.0.1:1");
        let err = notifier.notify("hi").await.unwrap_err();
        assert!(matches!(err, NotifyError::Unreachable(_)));
    }
}
