//! Runtime configuration types for salwa.
//!
//! These are the validated values the processors and the dispatcher work
//! with. Loading and parsing the TOML file is handled by the server crate.

mod notification;
mod saleor;
mod server;
mod whatsapp;

pub use notification::NotificationConfig;
pub use saleor::SaleorConfig;
pub use server::ServerConfig;
pub use whatsapp::{
    Credentials, DEFAULT_API_BASE, DEFAULT_API_VERSION, DEFAULT_REQUEST_TIMEOUT, WhatsAppConfig,
};

use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared configuration state with separate locks for each section.
///
/// Handlers take a read lock only long enough to clone the section they need,
/// so a SIGHUP reload never waits on an outbound call.
#[derive(Clone)]
pub struct SharedConfig {
    /// Server configuration (listen address).
    pub server: Arc<RwLock<ServerConfig>>,
    /// Webhook verification settings.
    pub saleor: Arc<RwLock<SaleorConfig>>,
    /// Cloud API credentials and endpoint.
    pub whatsapp: Arc<RwLock<WhatsAppConfig>>,
    /// Template settings for `CHECKOUT_FULLY_PAID`.
    pub checkout_paid: Arc<RwLock<NotificationConfig>>,
    /// Template settings for `ORDER_FULFILLED`.
    pub order_fulfilled: Arc<RwLock<NotificationConfig>>,
}

impl SharedConfig {
    pub fn new(
        server: ServerConfig,
        saleor: SaleorConfig,
        whatsapp: WhatsAppConfig,
        checkout_paid: NotificationConfig,
        order_fulfilled: NotificationConfig,
    ) -> Self {
        Self {
            server: Arc::new(RwLock::new(server)),
            saleor: Arc::new(RwLock::new(saleor)),
            whatsapp: Arc::new(RwLock::new(whatsapp)),
            checkout_paid: Arc::new(RwLock::new(checkout_paid)),
            order_fulfilled: Arc::new(RwLock::new(order_fulfilled)),
        }
    }

    /// Replace every section. Sections are written one after another, never
    /// holding two write locks at once.
    pub async fn update_all(
        &self,
        server: ServerConfig,
        saleor: SaleorConfig,
        whatsapp: WhatsAppConfig,
        checkout_paid: NotificationConfig,
        order_fulfilled: NotificationConfig,
    ) {
        *self.server.write().await = server;
        *self.saleor.write().await = saleor;
        *self.whatsapp.write().await = whatsapp;
        *self.checkout_paid.write().await = checkout_paid;
        *self.order_fulfilled.write().await = order_fulfilled;
    }
}
