//! Saleor webhook verification settings.

use url::Url;

/// Settings used to authenticate incoming Saleor deliveries.
#[derive(Debug, Clone)]
pub struct SaleorConfig {
    /// Secret key shared with Saleor for `Saleor-Signature`.
    pub webhook_secret: Box<[u8]>,
    /// When set, only deliveries whose `Saleor-Api-Url` has the same origin
    /// are accepted.
    pub api_url: Option<Url>,
}

impl SaleorConfig {
    pub fn new(webhook_secret: impl Into<Box<[u8]>>, api_url: Option<Url>) -> Self {
        Self {
            webhook_secret: webhook_secret.into(),
            api_url,
        }
    }

    pub fn secret_bytes(&self) -> &[u8] {
        &self.webhook_secret
    }

    /// Whether `header_value` points at the configured Saleor instance.
    ///
    /// Always `true` when no API URL is configured.
    pub fn accepts_api_url(&self, header_value: &str) -> bool {
        let Some(expected) = &self.api_url else {
            return true;
        };
        match Url::parse(header_value.trim()) {
            Ok(received) => received.origin() == expected.origin(),
            Err(_) => false,
        }
    }
}
