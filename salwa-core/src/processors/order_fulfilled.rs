//! `ORDER_FULFILLED` → shipment notification message.

use super::{ProcessError, ProcessOutcome, SkipReason, TRACKING_URL_METADATA_KEY, deliver, params};
use crate::config::{NotificationConfig, WhatsAppConfig};
use crate::dispatch::{MessageDispatcher, NamedParameter, TemplateNotification};
use crate::utils::fields::{PLACEHOLDER, display_name, metadata_value, non_empty, select_tracking};
use salwa_sdk::objects::events::{Order, OrderFulfilledPayload, SaleorEvent};
use tracing::info;

/// Tracking number and tracking page for an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingInfo {
    pub number: String,
    pub url: String,
}

/// Resolve tracking details for `order`.
///
/// The tracking number comes from the first fulfillment with a non-blank
/// tracking number and is forwarded as received. The URL is taken from the
/// order metadata, then from that same fulfillment's metadata.
pub fn resolve_tracking(order: &Order) -> TrackingInfo {
    let selected = select_tracking(order.fulfillments.as_deref().unwrap_or_default());

    let url = non_empty(metadata_value(order.metadata.as_deref(), TRACKING_URL_METADATA_KEY))
        .or_else(|| {
            let (fulfillment, _) = selected?;
            non_empty(metadata_value(
                fulfillment.metadata.as_deref(),
                TRACKING_URL_METADATA_KEY,
            ))
        });

    TrackingInfo {
        number: selected.map_or(PLACEHOLDER, |(_, number)| number).to_string(),
        url: url.unwrap_or(PLACEHOLDER).to_string(),
    }
}

/// Build the shipment notification for a fulfilled order.
pub fn compose(
    payload: &OrderFulfilledPayload,
    settings: &NotificationConfig,
) -> Result<TemplateNotification, SkipReason> {
    let order = payload.order.as_ref().ok_or(SkipReason::NoOrder)?;
    let address = order.shipping_address.as_ref();

    let to = non_empty(address.and_then(|a| a.phone.as_deref()))
        .or_else(|| settings.fallback_phone())
        .ok_or(SkipReason::NoPhone)?;

    let name = display_name(
        address.and_then(|a| a.first_name.as_deref()),
        &settings.greeting,
    );
    let number = non_empty(order.number.as_deref()).unwrap_or(PLACEHOLDER);
    let tracking = resolve_tracking(order);

    Ok(TemplateNotification {
        to: to.to_string(),
        template: settings.template.clone(),
        language: settings.language.clone(),
        parameters: vec![
            NamedParameter::new(params::CUSTOMER_NAME, name),
            NamedParameter::new(params::ORDER_NUMBER, number),
            NamedParameter::new(params::TRACKING_NUMBER, tracking.number),
            NamedParameter::new(params::TRACKING_URL, tracking.url),
        ],
    })
}

/// Compose and send the shipment notification for one event.
pub async fn process(
    payload: &OrderFulfilledPayload,
    settings: &NotificationConfig,
    whatsapp: &WhatsAppConfig,
    dispatcher: &dyn MessageDispatcher,
) -> Result<ProcessOutcome, ProcessError> {
    let order_id = payload
        .order
        .as_ref()
        .and_then(|o| o.id.as_deref())
        .unwrap_or_default();

    let notification = match compose(payload, settings) {
        Ok(notification) => notification,
        Err(reason) => {
            info!(order_id = %order_id, reason = %reason, "Skipping shipment notification");
            return Ok(ProcessOutcome::Skipped(reason));
        }
    };

    info!(
        order_id = %order_id,
        order_number = notification.parameter(params::ORDER_NUMBER).unwrap_or_default(),
        "Sending shipment notification"
    );
    deliver(SaleorEvent::OrderFulfilled, dispatcher, whatsapp, &notification).await
}
