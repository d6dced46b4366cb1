//! Event processors.
//!
//! One processor per subscribed Saleor event. Each one extracts the fields it
//! needs, composes a [`TemplateNotification`] and hands it to the
//! [`MessageDispatcher`]:
//!
//! - `checkout_paid`: `CHECKOUT_FULLY_PAID` → payment confirmation
//! - `order_fulfilled`: `ORDER_FULFILLED` → shipment notification

pub mod checkout_paid;
pub mod order_fulfilled;

use crate::config::WhatsAppConfig;
use crate::dispatch::{DeliveryOutcome, DispatchError, MessageDispatcher, TemplateNotification};
use salwa_sdk::objects::events::SaleorEvent;
use thiserror::Error;
use tracing::{error, info};

/// Template parameter names.
pub mod params {
    pub const CUSTOMER_NAME: &str = "customer_name";
    pub const AMOUNT: &str = "amount";
    pub const ORDER_NUMBER: &str = "order_number";
    pub const TRACKING_NUMBER: &str = "tracking_number";
    pub const TRACKING_URL: &str = "tracking_url";
}

/// Metadata key holding a tracking page URL, on orders and fulfillments.
pub const TRACKING_URL_METADATA_KEY: &str = "tracking_url_provider";

/// Why an event produced no notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoCheckout,
    NoOrder,
    NoPhone,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoCheckout => write!(f, "no checkout in payload"),
            SkipReason::NoOrder => write!(f, "no order in payload"),
            SkipReason::NoPhone => write!(f, "no destination phone"),
        }
    }
}

/// Result of processing one event that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// Nothing to send.
    Skipped(SkipReason),
    /// One dispatch attempt was made.
    Dispatched(DeliveryOutcome),
}

/// Errors that abort event processing.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// Send a composed notification and log the outcome.
async fn deliver(
    event: SaleorEvent,
    dispatcher: &dyn MessageDispatcher,
    whatsapp: &WhatsAppConfig,
    notification: &TemplateNotification,
) -> Result<ProcessOutcome, ProcessError> {
    let outcome = dispatcher
        .send_template(whatsapp, notification)
        .await
        .inspect_err(|e| error!(event = %event, error = %e, "Notification dispatch failed"))?;

    match &outcome {
        DeliveryOutcome::Delivered => {
            info!(event = %event, template = %notification.template, "Notification sent");
        }
        DeliveryOutcome::Rejected { status, .. } => {
            error!(event = %event, status = *status, "Notification was not delivered");
        }
        DeliveryOutcome::NotConfigured => {
            error!(event = %event, "Notification skipped: messaging API not configured");
        }
    }

    Ok(ProcessOutcome::Dispatched(outcome))
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every notification and answers with a fixed outcome.
    pub struct RecordingDispatcher {
        pub sent: Mutex<Vec<TemplateNotification>>,
        outcome: DeliveryOutcome,
    }

    impl RecordingDispatcher {
        pub fn new(outcome: DeliveryOutcome) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                outcome,
            }
        }

        pub fn sent(&self) -> Vec<TemplateNotification> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MessageDispatcher for RecordingDispatcher {
        async fn send_template(
            &self,
            _config: &WhatsAppConfig,
            notification: &TemplateNotification,
        ) -> Result<DeliveryOutcome, DispatchError> {
            self.sent.lock().unwrap().push(notification.clone());
            Ok(self.outcome.clone())
        }
    }

    pub fn whatsapp_config() -> WhatsAppConfig {
        WhatsAppConfig {
            access_token: Some("token".to_string()),
            phone_number_id: Some("42".to_string()),
            ..WhatsAppConfig::new(url::Url::parse(crate::config::DEFAULT_API_BASE).unwrap())
        }
    }
}
