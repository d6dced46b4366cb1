//! Saleor webhook payloads for the subscribed events.
//!
//! The payloads are the `data` of the app's subscription queries. Saleor may
//! omit or null any field, so everything is optional and unknown fields are
//! ignored.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Event types this app subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SaleorEvent {
    CheckoutFullyPaid,
    OrderFulfilled,
}

impl SaleorEvent {
    /// The event name as sent in the `Saleor-Event` header.
    pub fn header_value(&self) -> &'static str {
        match self {
            SaleorEvent::CheckoutFullyPaid => "checkout_fully_paid",
            SaleorEvent::OrderFulfilled => "order_fulfilled",
        }
    }

    /// Whether a `Saleor-Event` header value names this event.
    pub fn matches_header(&self, value: &str) -> bool {
        value.trim().eq_ignore_ascii_case(self.header_value())
    }
}

impl std::fmt::Display for SaleorEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaleorEvent::CheckoutFullyPaid => write!(f, "CHECKOUT_FULLY_PAID"),
            SaleorEvent::OrderFulfilled => write!(f, "ORDER_FULFILLED"),
        }
    }
}

/// Payload types bound to exactly one [`SaleorEvent`].
pub trait EventPayload: for<'de> Deserialize<'de> + Send {
    const EVENT: SaleorEvent;
}

// ---------------------------------------------------------------------------
// CHECKOUT_FULLY_PAID
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutFullyPaidPayload {
    #[serde(default)]
    pub checkout: Option<Checkout>,
}

impl EventPayload for CheckoutFullyPaidPayload {
    const EVENT: SaleorEvent = SaleorEvent::CheckoutFullyPaid;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkout {
    #[serde(default)]
    pub total_price: Option<TaxedMoney>,
    #[serde(default)]
    pub shipping_address: Option<Address>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxedMoney {
    #[serde(default)]
    pub gross: Option<Money>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub currency: Option<String>,
}

// ---------------------------------------------------------------------------
// ORDER_FULFILLED
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFulfilledPayload {
    #[serde(default)]
    pub order: Option<Order>,
}

impl EventPayload for OrderFulfilledPayload {
    const EVENT: SaleorEvent = SaleorEvent::OrderFulfilled;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default)]
    pub id: Option<String>,
    /// Human-facing order number, e.g. `"1024"`.
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub shipping_address: Option<Address>,
    #[serde(default)]
    pub fulfillments: Option<Vec<Fulfillment>>,
    #[serde(default)]
    pub metadata: Option<Vec<MetadataItem>>,
}

/// One shipment of part or all of an order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fulfillment {
    #[serde(default)]
    pub tracking_number: Option<String>,
    #[serde(default)]
    pub metadata: Option<Vec<MetadataItem>>,
}

// ---------------------------------------------------------------------------
// Shared shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// A key/value pair from a Saleor metadata list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataItem {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

impl MetadataItem {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: Some(value.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_checkout_payload() {
        let json = r#"{
            "checkout": {
                "totalPrice": { "gross": { "amount": 12.5, "currency": "USD" } },
                "shippingAddress": { "phone": "+15551234567", "firstName": "maria", "lastName": null },
                "__typename": "Checkout"
            }
        }"#;
        let payload: CheckoutFullyPaidPayload = serde_json::from_str(json).unwrap();
        let checkout = payload.checkout.unwrap();
        let gross = checkout.total_price.unwrap().gross.unwrap();
        assert_eq!(gross.amount, Some(Decimal::new(125, 1)));
        assert_eq!(gross.currency.as_deref(), Some("USD"));
        let address = checkout.shipping_address.unwrap();
        assert_eq!(address.phone.as_deref(), Some("+15551234567"));
        assert_eq!(address.first_name.as_deref(), Some("maria"));
        assert_eq!(address.last_name, None);
    }

    #[test]
    fn test_parse_order_payload_with_nulls() {
        let json = r#"{
            "order": {
                "id": "T3JkZXI6MQ==",
                "number": "1024",
                "shippingAddress": null,
                "fulfillments": [
                    { "trackingNumber": "", "metadata": [] },
                    { "trackingNumber": "ABC123", "metadata": [{ "key": "tracking_url_provider", "value": "https://t.example/ABC123" }] }
                ],
                "metadata": null
            }
        }"#;
        let payload: OrderFulfilledPayload = serde_json::from_str(json).unwrap();
        let order = payload.order.unwrap();
        assert_eq!(order.number.as_deref(), Some("1024"));
        assert!(order.shipping_address.is_none());
        assert!(order.metadata.is_none());
        let fulfillments = order.fulfillments.unwrap();
        assert_eq!(fulfillments.len(), 2);
        assert_eq!(
            fulfillments[1].metadata.as_deref(),
            Some(&[MetadataItem::new("tracking_url_provider", "https://t.example/ABC123")][..])
        );
    }

    #[test]
    fn test_empty_object_yields_absent_entity() {
        let payload: OrderFulfilledPayload = serde_json::from_str("{}").unwrap();
        assert!(payload.order.is_none());
        let payload: CheckoutFullyPaidPayload =
            serde_json::from_str(r#"{"checkout":null}"#).unwrap();
        assert!(payload.checkout.is_none());
    }

    #[test]
    fn test_wrong_shape_is_an_error() {
        let result = serde_json::from_str::<CheckoutFullyPaidPayload>(r#"{"checkout":"paid"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_event_header_matching() {
        assert!(SaleorEvent::OrderFulfilled.matches_header("order_fulfilled"));
        assert!(SaleorEvent::OrderFulfilled.matches_header("ORDER_FULFILLED"));
        assert!(!SaleorEvent::OrderFulfilled.matches_header("checkout_fully_paid"));
        assert_eq!(SaleorEvent::CheckoutFullyPaid.to_string(), "CHECKOUT_FULLY_PAID");
    }

    #[test]
    fn test_parse_incomplete_metadata_entries() {
        let json = r#"{
            "order": {
                "metadata": [{ "key": "carrier", "value": null }, { "value": "orphan" }],
                "fulfillments": [{ "trackingNumber": "T1", "metadata": [{ "key": "tracking_url_provider" }] }]
            }
        }"#;
        let payload: OrderFulfilledPayload = serde_json::from_str(json).unwrap();
        let order = payload.order.unwrap();
        let metadata = order.metadata.unwrap();
        assert_eq!(metadata[0].key.as_deref(), Some("carrier"));
        assert_eq!(metadata[0].value, None);
        assert_eq!(metadata[1].key, None);
        let fulfillments = order.fulfillments.unwrap();
        let entry = &fulfillments[0].metadata.as_ref().unwrap()[0];
        assert_eq!(entry.key.as_deref(), Some("tracking_url_provider"));
        assert_eq!(entry.value, None);
    }
}
