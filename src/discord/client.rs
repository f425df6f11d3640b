use reqwest::{Client, StatusCode};
use url::Url;

use super::format::build_message;
use super::types::WebhookMessage;
use crate::config::EmbedStyle;
use crate::models::feed_entry::FeedEntry;

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("webhook answered {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
}

/// Posts embeds to a single Discord webhook.
pub struct DiscordClient {
    client: Client,
    webhook_url: Url,
    style: EmbedStyle,
}

impl DiscordClient {
    pub fn new(client: Client, webhook_url: Url, style: EmbedStyle) -> Self {
        Self {
            client,
            webhook_url,
            style,
        }
    }

    pub async fn send_entry(&self, entry: &FeedEntry) -> Result<(), DeliveryError> {
        let message = build_message(entry, &self.style, chrono::Utc::now());
        self.send_message(&message).await
    }

    /// One attempt; only `204 No Content` counts as delivered.
    pub async fn send_message(&self, message: &WebhookMessage) -> Result<(), DeliveryError> {
        let response = self
            .client
            .post(self.webhook_url.clone())
            .json(message)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::NO_CONTENT {
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!("Webhook accepted message");
        Ok(())
    }
}
