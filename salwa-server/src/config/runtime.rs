//! Runtime configuration re-exports.
//!
//! The actual config types are defined in `salwa-core::config`.

pub use salwa_core::config::{
    NotificationConfig, SaleorConfig, ServerConfig, SharedConfig, WhatsAppConfig,
};
