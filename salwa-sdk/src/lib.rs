//! Shared wire types for salwa.
//!
//! * [`objects`] – Saleor webhook payloads, WhatsApp Cloud API request bodies
//!   and the JSON body returned to Saleor.
//! * [`signature`] – the `Saleor-Signature` algorithm.

pub mod objects;
pub mod signature;
