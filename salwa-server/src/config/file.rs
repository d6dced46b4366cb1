//! TOML file configuration structures.
//!
//! These structs directly map to the `salwa-config.toml` file format.

use salwa_core::config::{
    DEFAULT_API_BASE, DEFAULT_API_VERSION, DEFAULT_REQUEST_TIMEOUT, NotificationConfig,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use url::Url;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub saleor: SaleorConfig,
    #[serde(default)]
    pub whatsapp: WhatsAppConfig,
    #[serde(default)]
    pub checkout_paid: TemplateConfig,
    #[serde(default)]
    pub order_fulfilled: TemplateConfig,
}

/// Server configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The address and port to listen on (e.g., "0.0.0.0:8080").
    #[serde(default = "default_listen_addr")]
    pub listen: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen_addr(),
        }
    }
}

fn default_listen_addr() -> SocketAddr {
    "0.0.0.0:8080".parse().expect("valid default address")
}

/// Saleor app section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleorConfig {
    /// Secret key Saleor uses to sign webhook bodies.
    pub webhook_secret: String,
    /// GraphQL API URL of the Saleor instance allowed to call this app.
    #[serde(default)]
    pub api_url: Option<Url>,
}

/// WhatsApp Cloud API section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhatsAppConfig {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub phone_number_id: Option<String>,
    #[serde(default = "default_api_base")]
    pub api_base: Url,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            phone_number_id: None,
            api_base: default_api_base(),
            api_version: default_api_version(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_api_base() -> Url {
    Url::parse(DEFAULT_API_BASE).expect("valid default API base")
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT.as_secs()
}

/// Per-event template section. Missing keys take the event's defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateConfig {
    pub template: Option<String>,
    pub language: Option<String>,
    pub greeting: Option<String>,
    #[serde(default)]
    pub fallback_phone_enabled: bool,
    #[serde(default)]
    pub fallback_phone: Option<String>,
}

impl TemplateConfig {
    /// Merge this section over the event defaults.
    pub fn resolve(self, defaults: NotificationConfig) -> NotificationConfig {
        NotificationConfig {
            template: self.template.unwrap_or(defaults.template),
            language: self.language.unwrap_or(defaults.language),
            greeting: self.greeting.unwrap_or(defaults.greeting),
            fallback_phone_enabled: self.fallback_phone_enabled,
            fallback_phone: self.fallback_phone,
        }
    }
}
