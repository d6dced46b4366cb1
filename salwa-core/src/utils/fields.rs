//! Field extraction helpers shared by the event processors.

use rust_decimal::{Decimal, RoundingStrategy};
use salwa_sdk::objects::events::{Fulfillment, MetadataItem};

/// Literal sent for template values that could not be resolved.
pub const PLACEHOLDER: &str = "N/A";

/// `Some(value)` unless the value is absent or the empty string.
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Upper-case the first character, leaving the rest untouched.
pub fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Capitalized first name, or `greeting` when there is none.
pub fn display_name(first_name: Option<&str>, greeting: &str) -> String {
    match non_empty(first_name) {
        Some(name) => capitalize_first(name),
        None => greeting.to_string(),
    }
}

/// Format a money amount with exactly two decimal places.
pub fn format_amount(amount: Option<Decimal>) -> String {
    match amount {
        Some(amount) => {
            let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            format!("{rounded:.2}")
        }
        None => PLACEHOLDER.to_string(),
    }
}

/// Value of the first metadata entry whose key equals `key`.
pub fn metadata_value<'a>(items: Option<&'a [MetadataItem]>, key: &str) -> Option<&'a str> {
    items?
        .iter()
        .find(|item| item.key.as_deref() == Some(key))
        .and_then(|item| item.value.as_deref())
}

/// The first fulfillment, in list order, with a tracking number that is not
/// blank once trimmed.
///
/// Returns the fulfillment together with its tracking number as received,
/// surrounding whitespace included.
pub fn select_tracking(fulfillments: &[Fulfillment]) -> Option<(&Fulfillment, &str)> {
    fulfillments.iter().find_map(|fulfillment| {
        let tracking = fulfillment.tracking_number.as_deref()?;
        (!tracking.trim().is_empty()).then_some((fulfillment, tracking))
    })
}
