//! `CHECKOUT_FULLY_PAID` → payment confirmation message.

use super::{ProcessError, ProcessOutcome, SkipReason, deliver, params};
use crate::config::{NotificationConfig, WhatsAppConfig};
use crate::dispatch::{MessageDispatcher, NamedParameter, TemplateNotification};
use crate::utils::fields::{display_name, format_amount, non_empty};
use salwa_sdk::objects::events::{CheckoutFullyPaidPayload, SaleorEvent};
use tracing::{info, warn};

/// Build the payment confirmation for a fully paid checkout.
///
/// The destination is the shipping phone, or the configured fallback phone
/// when that is enabled for this event.
pub fn compose(
    payload: &CheckoutFullyPaidPayload,
    settings: &NotificationConfig,
) -> Result<TemplateNotification, SkipReason> {
    let checkout = payload.checkout.as_ref().ok_or(SkipReason::NoCheckout)?;
    let address = checkout.shipping_address.as_ref();

    let to = non_empty(address.and_then(|a| a.phone.as_deref()))
        .or_else(|| settings.fallback_phone())
        .ok_or(SkipReason::NoPhone)?;

    let name = display_name(
        address.and_then(|a| a.first_name.as_deref()),
        &settings.greeting,
    );
    let amount = format_amount(
        checkout
            .total_price
            .as_ref()
            .and_then(|p| p.gross.as_ref())
            .and_then(|g| g.amount),
    );

    Ok(TemplateNotification {
        to: to.to_string(),
        template: settings.template.clone(),
        language: settings.language.clone(),
        parameters: vec![
            NamedParameter::new(params::CUSTOMER_NAME, name),
            NamedParameter::new(params::AMOUNT, amount),
        ],
    })
}

/// Compose and send the payment confirmation for one event.
pub async fn process(
    payload: &CheckoutFullyPaidPayload,
    settings: &NotificationConfig,
    whatsapp: &WhatsAppConfig,
    dispatcher: &dyn MessageDispatcher,
) -> Result<ProcessOutcome, ProcessError> {
    let notification = match compose(payload, settings) {
        Ok(notification) => notification,
        Err(reason @ SkipReason::NoCheckout) => {
            warn!("CHECKOUT_FULLY_PAID payload has no checkout, nothing to send");
            return Ok(ProcessOutcome::Skipped(reason));
        }
        Err(reason) => {
            info!(reason = %reason, "Skipping payment confirmation");
            return Ok(ProcessOutcome::Skipped(reason));
        }
    };

    deliver(SaleorEvent::CheckoutFullyPaid, dispatcher, whatsapp, &notification).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::DeliveryOutcome;
    use crate::processors::testing::{RecordingDispatcher, whatsapp_config};
    use serde_json::json;

    fn payload(value: serde_json::Value) -> CheckoutFullyPaidPayload {
        serde_json::from_value(value).unwrap()
    }

    fn settings_with_fallback() -> NotificationConfig {
        NotificationConfig {
            fallback_phone_enabled: true,
            fallback_phone: Some("+15550100".to_string()),
            ..NotificationConfig::checkout_paid()
        }
    }

    #[test]
    fn test_compose_full_checkout() {
        let payload = payload(json!({
            "checkout": {
                "totalPrice": { "gross": { "amount": 12.5, "currency": "USD" } },
                "shippingAddress": { "phone": "+15551234567", "firstName": "maria" }
            }
        }));

        let notification = compose(&payload, &settings_with_fallback()).unwrap();
        assert_eq!(notification.to, "+15551234567");
        assert_eq!(notification.template, "payment_confirmation");
        assert_eq!(notification.language, "en_US");
        assert_eq!(
            notification.parameters,
            vec![
                NamedParameter::new(params::CUSTOMER_NAME, "Maria"),
                NamedParameter::new(params::AMOUNT, "12.50"),
            ]
        );
    }

    #[test]
    fn test_compose_falls_back_to_configured_phone() {
        let payload = payload(json!({
            "checkout": {
                "totalPrice": { "gross": { "amount": 12, "currency": "USD" } },
                "shippingAddress": { "phone": "", "firstName": null }
            }
        }));

        let notification = compose(&payload, &settings_with_fallback()).unwrap();
        assert_eq!(notification.to, "+15550100");
        assert_eq!(notification.parameter(params::CUSTOMER_NAME), Some("Customer"));
        assert_eq!(notification.parameter(params::AMOUNT), Some("12.00"));
    }

    #[test]
    fn test_compose_without_address_or_price() {
        let payload = payload(json!({ "checkout": {} }));
        let notification = compose(&payload, &settings_with_fallback()).unwrap();
        assert_eq!(notification.to, "+15550100");
        assert_eq!(notification.parameter(params::AMOUNT), Some("N/A"));
    }

    #[test]
    fn test_compose_without_phone_and_fallback_disabled() {
        let payload = payload(json!({ "checkout": { "shippingAddress": { "firstName": "ana" } } }));
        assert_eq!(
            compose(&payload, &NotificationConfig::checkout_paid()),
            Err(SkipReason::NoPhone)
        );
    }

    #[tokio::test]
    async fn test_process_without_checkout_sends_nothing() {
        let dispatcher = RecordingDispatcher::new(DeliveryOutcome::Delivered);
        let outcome = process(
            &payload(json!({ "checkout": null })),
            &settings_with_fallback(),
            &whatsapp_config(),
            &dispatcher,
        )
        .await
        .unwrap();

        assert_eq!(outcome, ProcessOutcome::Skipped(SkipReason::NoCheckout));
        assert!(dispatcher.sent().is_empty());
    }

    #[tokio::test]
    async fn test_process_reports_rejection_as_outcome() {
        let rejected = DeliveryOutcome::Rejected {
            status: 503,
            body: "unavailable".to_string(),
        };
        let dispatcher = RecordingDispatcher::new(rejected.clone());
        let outcome = process(
            &payload(json!({ "checkout": { "shippingAddress": { "phone": "+15551234567" } } })),
            &settings_with_fallback(),
            &whatsapp_config(),
            &dispatcher,
        )
        .await
        .unwrap();

        assert_eq!(outcome, ProcessOutcome::Dispatched(rejected));
        assert_eq!(dispatcher.sent().len(), 1);
        assert_eq!(dispatcher.sent()[0].to, "+15551234567");
    }
}
