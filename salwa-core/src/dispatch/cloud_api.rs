//! WhatsApp Cloud API dispatcher.

use super::{DeliveryOutcome, DispatchError, MessageDispatcher, TemplateNotification};
use crate::config::WhatsAppConfig;
use async_trait::async_trait;
use tracing::{error, info};

/// Sends template messages through `POST /{phone_number_id}/messages`.
#[derive(Debug, Clone)]
pub struct CloudApiDispatcher {
    http_client: reqwest::Client,
}

impl CloudApiDispatcher {
    pub fn new() -> Self {
        Self::with_client(
            reqwest::Client::builder()
                .user_agent(concat!("salwa/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        )
    }

    pub fn with_client(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }
}

impl Default for CloudApiDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageDispatcher for CloudApiDispatcher {
    async fn send_template(
        &self,
        config: &WhatsAppConfig,
        notification: &TemplateNotification,
    ) -> Result<DeliveryOutcome, DispatchError> {
        let Some(credentials) = config.credentials() else {
            error!(
                template = %notification.template,
                "WhatsApp access token or phone number id not configured, message not sent"
            );
            return Ok(DeliveryOutcome::NotConfigured);
        };

        let url = config.messages_url(credentials.phone_number_id);
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(credentials.access_token)
            .timeout(config.request_timeout)
            .json(&notification.to_message())
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            info!(
                template = %notification.template,
                status = status.as_u16(),
                "WhatsApp message accepted"
            );
            Ok(DeliveryOutcome::Delivered)
        } else {
            let body = response.text().await.unwrap_or_default();
            error!(
                template = %notification.template,
                status = status.as_u16(),
                body = %body,
                "WhatsApp API rejected message"
            );
            Ok(DeliveryOutcome::Rejected {
                status: status.as_u16(),
                body,
            })
        }
    }
}
