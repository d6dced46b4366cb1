//! Configuration module for salwa-server.
//!
//! Handles loading configuration from the TOML file and applying CLI
//! arguments and environment variables on top of it.

pub mod file;
pub mod runtime;

use crate::config::file::{FileConfig, TemplateConfig};
use crate::config::runtime::{
    NotificationConfig, SaleorConfig, ServerConfig, SharedConfig, WhatsAppConfig,
};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    ValidationError(String),
}

/// Values from the command line or environment that take precedence over the
/// config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub listen: Option<SocketAddr>,
    pub whatsapp_token: Option<String>,
    pub whatsapp_phone_number_id: Option<String>,
    pub saleor_api_url: Option<Url>,
}

/// Loaded configuration result containing all parts.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub server: ServerConfig,
    pub saleor: SaleorConfig,
    pub whatsapp: WhatsAppConfig,
    pub checkout_paid: NotificationConfig,
    pub order_fulfilled: NotificationConfig,
}

impl LoadedConfig {
    /// Convert into a SharedConfig with Arc<RwLock<T>> wrappers.
    pub fn into_shared(self) -> SharedConfig {
        SharedConfig::new(
            self.server,
            self.saleor,
            self.whatsapp,
            self.checkout_paid,
            self.order_fulfilled,
        )
    }

    /// Settings that load fine but leave some events unable to reach anyone.
    pub fn startup_warnings(&self) -> Vec<&'static str> {
        let mut warnings = Vec::new();
        if self.whatsapp.credentials().is_none() {
            warnings.push(
                "WhatsApp credentials missing, events will be acknowledged without sending",
            );
        }
        if self.saleor.api_url.is_none() {
            warnings.push(
                "No Saleor API URL configured, deliveries from any instance are accepted",
            );
        }
        if self.checkout_paid.fallback_phone().is_none() {
            warnings.push(
                "Checkout fallback phone disabled, paid checkouts without a phone are skipped",
            );
        }
        warnings
    }

    /// Write every section into an existing SharedConfig.
    pub async fn apply_to(self, shared: &SharedConfig) {
        shared
            .update_all(
                self.server,
                self.saleor,
                self.whatsapp,
                self.checkout_paid,
                self.order_fulfilled,
            )
            .await;
    }
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: std::path::PathBuf,
    overrides: ConfigOverrides,
}

impl ConfigLoader {
    /// Create a new config loader.
    pub fn new(config_path: impl AsRef<Path>, overrides: ConfigOverrides) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            overrides,
        }
    }

    /// Load and process the configuration.
    ///
    /// This will:
    /// 1. Read the TOML file
    /// 2. Apply CLI/environment overrides
    /// 3. Validate the configuration
    /// 4. Build the runtime configuration
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let config_content = std::fs::read_to_string(&self.config_path)?;
        self.load_str(&config_content)
    }

    /// Reload the configuration (used during SIGHUP).
    ///
    /// Overrides given at startup are applied again.
    pub fn reload(&self) -> Result<LoadedConfig, ConfigError> {
        self.load()
    }

    fn load_str(&self, config_content: &str) -> Result<LoadedConfig, ConfigError> {
        let mut file_config: FileConfig = toml::from_str(config_content)?;
        self.apply_overrides(&mut file_config);
        validate(&file_config)?;
        Ok(build_loaded_config(file_config))
    }

    fn apply_overrides(&self, config: &mut FileConfig) {
        let overrides = &self.overrides;
        if let Some(listen) = overrides.listen {
            config.server.listen = listen;
        }
        if let Some(token) = &overrides.whatsapp_token {
            config.whatsapp.access_token = Some(token.clone());
        }
        if let Some(id) = &overrides.whatsapp_phone_number_id {
            config.whatsapp.phone_number_id = Some(id.clone());
        }
        if let Some(api_url) = &overrides.saleor_api_url {
            config.saleor.api_url = Some(api_url.clone());
        }
    }
}

fn validate(config: &FileConfig) -> Result<(), ConfigError> {
    if config.saleor.webhook_secret.is_empty() {
        return Err(ConfigError::ValidationError(
            "saleor.webhook_secret must not be empty".to_string(),
        ));
    }

    if let Some(id) = config.whatsapp.phone_number_id.as_deref() {
        if !id.is_empty() && !id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ConfigError::ValidationError(format!(
                "whatsapp.phone_number_id must be numeric, got {id:?}"
            )));
        }
    }

    if config.whatsapp.api_version.trim_matches('/').is_empty() {
        return Err(ConfigError::ValidationError(
            "whatsapp.api_version must not be empty".to_string(),
        ));
    }

    if config.whatsapp.request_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "whatsapp.request_timeout_secs must be greater than zero".to_string(),
        ));
    }

    validate_template("checkout_paid", &config.checkout_paid)?;
    validate_template("order_fulfilled", &config.order_fulfilled)?;
    Ok(())
}

fn validate_template(section: &str, template: &TemplateConfig) -> Result<(), ConfigError> {
    if template.template.as_deref().is_some_and(str::is_empty) {
        return Err(ConfigError::ValidationError(format!(
            "{section}.template must not be empty"
        )));
    }
    if template.language.as_deref().is_some_and(str::is_empty) {
        return Err(ConfigError::ValidationError(format!(
            "{section}.language must not be empty"
        )));
    }
    let has_fallback = template
        .fallback_phone
        .as_deref()
        .is_some_and(|p| !p.trim().is_empty());
    if template.fallback_phone_enabled && !has_fallback {
        return Err(ConfigError::ValidationError(format!(
            "{section}.fallback_phone_enabled requires {section}.fallback_phone"
        )));
    }
    Ok(())
}

fn build_loaded_config(file_config: FileConfig) -> LoadedConfig {
    let whatsapp = file_config.whatsapp;
    LoadedConfig {
        server: ServerConfig {
            listen: file_config.server.listen,
        },
        saleor: SaleorConfig::new(
            file_config.saleor.webhook_secret.into_bytes(),
            file_config.saleor.api_url,
        ),
        whatsapp: WhatsAppConfig {
            access_token: whatsapp.access_token,
            phone_number_id: whatsapp.phone_number_id,
            api_base: whatsapp.api_base,
            api_version: whatsapp.api_version,
            request_timeout: Duration::from_secs(whatsapp.request_timeout_secs),
        },
        checkout_paid: file_config
            .checkout_paid
            .resolve(NotificationConfig::checkout_paid()),
        order_fulfilled: file_config
            .order_fulfilled
            .resolve(NotificationConfig::order_fulfilled()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = r#"
[saleor]
webhook_secret = "app-secret"

[whatsapp]
access_token = "file-token"
phone_number_id = "111"
"#;

    fn loader(overrides: ConfigOverrides) -> ConfigLoader {
        ConfigLoader::new("unused.toml", overrides)
    }

    #[test]
    fn test_overrides_take_precedence() {
        let overrides = ConfigOverrides {
            listen: Some("127.0.0.1:9999".parse().unwrap()),
            whatsapp_token: Some("env-token".to_string()),
            whatsapp_phone_number_id: Some("222".to_string()),
            saleor_api_url: Some(Url::parse("https://shop.example.com/graphql/").unwrap()),
        };
        let loaded = loader(overrides).load_str(BASE).unwrap();
        assert_eq!(loaded.server.listen.port(), 9999);
        assert_eq!(loaded.whatsapp.access_token.as_deref(), Some("env-token"));
        assert_eq!(loaded.whatsapp.phone_number_id.as_deref(), Some("222"));
        assert!(loaded.saleor.accepts_api_url("https://shop.example.com/graphql/"));
        assert_eq!(loaded.saleor.secret_bytes(), b"app-secret");
    }

    #[test]
    fn test_file_values_without_overrides() {
        let loaded = loader(ConfigOverrides::default()).load_str(BASE).unwrap();
        assert_eq!(loaded.whatsapp.access_token.as_deref(), Some("file-token"));
        assert_eq!(loaded.whatsapp.request_timeout, Duration::from_secs(30));
        assert_eq!(loaded.checkout_paid, NotificationConfig::checkout_paid());
        assert_eq!(loaded.order_fulfilled, NotificationConfig::order_fulfilled());
    }

    #[test]
    fn test_fallback_flag_requires_phone() {
        let content = format!("{BASE}\n[checkout_paid]\nfallback_phone_enabled = true\n");
        let result = loader(ConfigOverrides::default()).load_str(&content);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));

        let content = format!(
            "{BASE}\n[checkout_paid]\nfallback_phone_enabled = true\nfallback_phone = \"+15550100\"\n"
        );
        let loaded = loader(ConfigOverrides::default()).load_str(&content).unwrap();
        assert_eq!(loaded.checkout_paid.fallback_phone(), Some("+15550100"));
        assert_eq!(loaded.order_fulfilled.fallback_phone(), None);
    }

    #[test]
    fn test_non_numeric_phone_number_id_is_rejected() {
        let overrides = ConfigOverrides {
            whatsapp_phone_number_id: Some("abc".to_string()),
            ..ConfigOverrides::default()
        };
        let result = loader(overrides).load_str(BASE);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_empty_webhook_secret_is_rejected() {
        let result = loader(ConfigOverrides::default())
            .load_str("[saleor]\nwebhook_secret = \"\"\n");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_startup_warnings() {
        let loaded = loader(ConfigOverrides::default()).load_str(BASE).unwrap();
        let warnings = loaded.startup_warnings();
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().any(|w| w.starts_with("No Saleor API URL")));
        assert!(warnings.iter().any(|w| w.starts_with("Checkout fallback phone disabled")));

        let content = format!(
            "{BASE}\n[checkout_paid]\nfallback_phone_enabled = true\nfallback_phone = \"+15550100\"\n"
        );
        let overrides = ConfigOverrides {
            saleor_api_url: Some(Url::parse("https://shop.example.com/graphql/").unwrap()),
            ..ConfigOverrides::default()
        };
        let loaded = loader(overrides).load_str(&content).unwrap();
        assert!(loaded.startup_warnings().is_empty());
    }

    #[test]
    fn test_zero_request_timeout_is_rejected() {
        let content = format!("{BASE}request_timeout_secs = 0\n");
        let result = loader(ConfigOverrides::default()).load_str(&content);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = ConfigLoader::new("/nonexistent/salwa-config.toml", ConfigOverrides::default())
            .load();
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }

    #[test]
    fn test_example_config_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../salwa-config.example.toml");
        let loaded = ConfigLoader::new(path, ConfigOverrides::default())
            .load()
            .unwrap();
        assert_eq!(loaded.checkout_paid.fallback_phone(), Some("+15550100"));
        assert_eq!(loaded.order_fulfilled.fallback_phone(), None);
        assert!(loaded.whatsapp.access_token.is_none());
    }
}
