//! HTTP API of salwa-server.
//!
//! - `webhooks` – Saleor event endpoints, authenticated by `Saleor-Signature`

pub mod extractors;
pub mod webhooks;
