//! WhatsApp Cloud API settings.

use std::time::Duration;
use url::Url;

pub const DEFAULT_API_BASE: &str = "https://graph.facebook.com";
pub const DEFAULT_API_VERSION: &str = "v24.0";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Credentials and endpoint for the Cloud API.
///
/// The token and phone number id are optional so that a half-configured
/// deployment still acknowledges events; the dispatcher refuses to send
/// without them.
#[derive(Debug, Clone)]
pub struct WhatsAppConfig {
    /// Bearer token for the Graph API.
    pub access_token: Option<String>,
    /// Numeric id of the sending WhatsApp business phone number.
    pub phone_number_id: Option<String>,
    /// Graph API base URL, e.g. `https://graph.facebook.com`.
    pub api_base: Url,
    /// Graph API version path segment, e.g. `v24.0`.
    pub api_version: String,
    /// Timeout applied to every Cloud API request.
    pub request_timeout: Duration,
}

/// Credentials borrowed from a complete [`WhatsAppConfig`].
#[derive(Debug, Clone, Copy)]
pub struct Credentials<'a> {
    pub access_token: &'a str,
    pub phone_number_id: &'a str,
}

impl WhatsAppConfig {
    /// A config without credentials pointing at `api_base`, using the default
    /// API version and timeout.
    pub fn new(api_base: Url) -> Self {
        Self {
            access_token: None,
            phone_number_id: None,
            api_base,
            api_version: DEFAULT_API_VERSION.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Both credentials, or `None` when either is missing or empty.
    pub fn credentials(&self) -> Option<Credentials<'_>> {
        let access_token = self.access_token.as_deref().filter(|s| !s.is_empty())?;
        let phone_number_id = self.phone_number_id.as_deref().filter(|s| !s.is_empty())?;
        Some(Credentials {
            access_token,
            phone_number_id,
        })
    }

    /// `{api_base}/{api_version}/{phone_number_id}/messages`
    pub fn messages_url(&self, phone_number_id: &str) -> String {
        format!(
            "{}/{}/{}/messages",
            self.api_base.as_str().trim_end_matches('/'),
            self.api_version.trim_matches('/'),
            phone_number_id
        )
    }
}
