//! Sending template notifications.
//!
//! Both event processors go through one [`MessageDispatcher`]: given a
//! destination, a template, a language and ordered named parameters, it makes
//! a single attempt to deliver the message. There is no retry.

mod cloud_api;

pub use cloud_api::CloudApiDispatcher;

use crate::config::WhatsAppConfig;
use async_trait::async_trait;
use salwa_sdk::objects::whatsapp::{TemplateMessage, TextParameter};
use thiserror::Error;

/// A named text value substituted into a template body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedParameter {
    pub name: &'static str,
    pub value: String,
}

impl NamedParameter {
    pub fn new(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

/// One templated message to one destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateNotification {
    pub to: String,
    pub template: String,
    pub language: String,
    pub parameters: Vec<NamedParameter>,
}

impl TemplateNotification {
    /// Look up a parameter value by name.
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }

    /// The Cloud API request body for this notification.
    pub fn to_message(&self) -> TemplateMessage {
        let parameters = self
            .parameters
            .iter()
            .map(|p| TextParameter::new(p.name, p.value.clone()))
            .collect();
        TemplateMessage::new(
            self.to.clone(),
            self.template.clone(),
            self.language.clone(),
            parameters,
        )
    }
}

/// What happened to a notification that did not fail in transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The provider accepted the message.
    Delivered,
    /// The provider answered with a non-success status.
    Rejected { status: u16, body: String },
    /// Credentials are missing; nothing was sent.
    NotConfigured,
}

impl DeliveryOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryOutcome::Delivered => "delivered",
            DeliveryOutcome::Rejected { .. } => "rejected",
            DeliveryOutcome::NotConfigured => "not_configured",
        }
    }
}

/// Errors that abort a dispatch attempt.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The request could not be completed (connect, TLS, timeout, ...).
    #[error("messaging API request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Delivers template notifications to the messaging provider.
#[async_trait]
pub trait MessageDispatcher: Send + Sync {
    /// Make one delivery attempt using the given provider configuration.
    async fn send_template(
        &self,
        config: &WhatsAppConfig,
        notification: &TemplateNotification,
    ) -> Result<DeliveryOutcome, DispatchError>;
}
