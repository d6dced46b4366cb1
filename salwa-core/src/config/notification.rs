//! Per-event template settings.

/// How one event type is turned into a template message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationConfig {
    /// Name of the approved message template.
    pub template: String,
    /// Template language code, e.g. `en_US`.
    pub language: String,
    /// Display name used when the customer has no first name.
    pub greeting: String,
    /// Send to `fallback_phone` when the shipping address has no phone.
    pub fallback_phone_enabled: bool,
    /// Destination used when `fallback_phone_enabled` is set.
    pub fallback_phone: Option<String>,
}

impl NotificationConfig {
    /// Defaults for `CHECKOUT_FULLY_PAID`.
    pub fn checkout_paid() -> Self {
        Self {
            template: "payment_confirmation".to_string(),
            language: "en_US".to_string(),
            greeting: "Customer".to_string(),
            fallback_phone_enabled: false,
            fallback_phone: None,
        }
    }

    /// Defaults for `ORDER_FULFILLED`.
    pub fn order_fulfilled() -> Self {
        Self {
            template: "shipment_notification".to_string(),
            language: "en_US".to_string(),
            greeting: "Dear customer".to_string(),
            fallback_phone_enabled: false,
            fallback_phone: None,
        }
    }

    /// The fallback destination, if enabled and configured.
    pub fn fallback_phone(&self) -> Option<&str> {
        if !self.fallback_phone_enabled {
            return None;
        }
        self.fallback_phone.as_deref().filter(|p| !p.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_phone_requires_flag() {
        let mut config = NotificationConfig {
            fallback_phone: Some("+15550100".to_string()),
            ..NotificationConfig::checkout_paid()
        };
        assert_eq!(config.fallback_phone(), None);

        config.fallback_phone_enabled = true;
        assert_eq!(config.fallback_phone(), Some("+15550100"));

        config.fallback_phone = Some(String::new());
        assert_eq!(config.fallback_phone(), None);
    }

    #[test]
    fn test_event_defaults_differ() {
        let checkout = NotificationConfig::checkout_paid();
        let fulfilled = NotificationConfig::order_fulfilled();
        assert_ne!(checkout.template, fulfilled.template);
        assert_ne!(checkout.greeting, fulfilled.greeting);
        assert!(!fulfilled.fallback_phone_enabled);
    }
}
