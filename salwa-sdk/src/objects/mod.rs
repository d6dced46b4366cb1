pub mod events;
pub mod whatsapp;

use serde::{Deserialize, Serialize};

/// JSON body returned to Saleor by the webhook endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventResponse {
    pub message: String,
}

impl EventResponse {
    /// The acknowledgement sent for every event that did not fail.
    pub fn handled() -> Self {
        Self {
            message: "event handled".to_string(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
