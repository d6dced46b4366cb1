//! WhatsApp Cloud API request bodies.
//!
//! Only the template-message shape is modelled: a body component with named
//! text parameters.

use serde::{Deserialize, Serialize};

/// `POST /{phone_number_id}/messages` body for a template message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateMessage {
    /// Always `"whatsapp"`.
    pub messaging_product: String,
    /// Destination phone number.
    pub to: String,
    /// Always `"template"`.
    #[serde(rename = "type")]
    pub kind: String,
    pub template: Template,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    pub language: Language,
    pub components: Vec<Component>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    /// Always `"body"` for the messages sent by this app.
    #[serde(rename = "type")]
    pub kind: String,
    pub parameters: Vec<TextParameter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextParameter {
    /// Always `"text"`.
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
    pub parameter_name: String,
}

impl TextParameter {
    pub fn new(parameter_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            text: text.into(),
            parameter_name: parameter_name.into(),
        }
    }
}

impl TemplateMessage {
    /// Build a template message with a single body component carrying
    /// `parameters` in the given order.
    pub fn new(
        to: impl Into<String>,
        template_name: impl Into<String>,
        language_code: impl Into<String>,
        parameters: Vec<TextParameter>,
    ) -> Self {
        Self {
            messaging_product: "whatsapp".to_string(),
            to: to.into(),
            kind: "template".to_string(),
            template: Template {
                name: template_name.into(),
                language: Language {
                    code: language_code.into(),
                },
                components: vec![Component {
                    kind: "body".to_string(),
                    parameters,
                }],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_template_message_wire_shape() {
        let message = TemplateMessage::new(
            "+15551234567",
            "payment_confirmation",
            "en_US",
            vec![
                TextParameter::new("customer_name", "Maria"),
                TextParameter::new("amount", "12.50"),
            ],
        );

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(
            value,
            json!({
                "messaging_product": "whatsapp",
                "to": "+15551234567",
                "type": "template",
                "template": {
                    "name": "payment_confirmation",
                    "language": { "code": "en_US" },
                    "components": [{
                        "type": "body",
                        "parameters": [
                            { "type": "text", "text": "Maria", "parameter_name": "customer_name" },
                            { "type": "text", "text": "12.50", "parameter_name": "amount" }
                        ]
                    }]
                }
            })
        );
    }
}
