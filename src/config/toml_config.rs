use crate::adapters::webhook::DEFAULT_TIMEOUT_SECONDS;
use crate::config::{validate_settings, DEFAULT_WEBHOOK_URL};
use crate::core::plans::DEFAULT_CONFIRMATION_PHONE;
use crate::core::QuoteSettings;
use crate::domain::model::{
    Catalog, PricingSettings, ServiceDefinition, ServiceKey, DEFAULT_DISCOUNT_RATE,
    DEFAULT_EXCHANGE_RATE,
};
use crate::utils::error::{QuoteError, Result};
use crate::utils::validation::{validate_amount, validate_non_empty_string, validate_phone, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub pricing: PricingSection,
    #[serde(default)]
    pub webhook: WebhookSection,
    #[serde(default)]
    pub checkout: CheckoutSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricingSection {
    pub discount_rate: Option<f64>,
    pub exchange_rate: Option<f64>,
    /// Base service key; defaults to whatsapp.
    pub base: Option<ServiceKey>,
    /// Replaces the standard service table when present.
    pub services: Option<Vec<ServiceDefinition>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookSection {
    pub url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckoutSection {
    pub whatsapp_phone: Option<String>,
}

impl TomlConfig {
    /// Loads and parses a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(QuoteError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| QuoteError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn whatsapp_phone(&self) -> &str {
        self.checkout
            .whatsapp_phone
            .as_deref()
            .unwrap_or(DEFAULT_CONFIRMATION_PHONE)
    }

    /// Command line values win over the file.
    pub fn apply_overrides(
        &mut self,
        webhook_url: Option<&str>,
        timeout_seconds: Option<u64>,
        discount_rate: Option<f64>,
        exchange_rate: Option<f64>,
    ) {
        if let Some(url) = webhook_url {
            tracing::info!("🔧 Webhook URL overridden to: {}", url);
            self.webhook.url = Some(url.to_string());
        }
        if timeout_seconds.is_some() {
            self.webhook.timeout_seconds = timeout_seconds;
        }
        if discount_rate.is_some() {
            self.pricing.discount_rate = discount_rate;
        }
        if exchange_rate.is_some() {
            self.pricing.exchange_rate = exchange_rate;
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_settings(self)?;
        validate_phone("checkout.whatsapp_phone", self.whatsapp_phone())?;

        if let Some(services) = &self.pricing.services {
            let base = self.pricing.base.unwrap_or(ServiceKey::Whatsapp);
            if !services.iter().any(|service| service.key == base) {
                return Err(QuoteError::InvalidConfigValueError {
                    field: "pricing.services".to_string(),
                    value: format!("{} services", services.len()),
                    reason: format!("Base service '{}' is not in the table", base),
                });
            }
            let mut seen = BTreeSet::new();
            for service in services {
                if !seen.insert(service.key) {
                    return Err(QuoteError::InvalidConfigValueError {
                        field: "pricing.services".to_string(),
                        value: service.key.to_string(),
                        reason: format!("Service '{}' is listed more than once", service.key),
                    });
                }
                validate_non_empty_string("pricing.services.display_name", &service.display_name)?;
                validate_amount("pricing.services.unit_price", service.unit_price)?;
                validate_amount("pricing.services.unit_setup_fee", service.unit_setup_fee)?;
            }
        }

        Ok(())
    }
}

impl QuoteSettings for TomlConfig {
    fn pricing(&self) -> PricingSettings {
        PricingSettings {
            discount_rate: self.pricing.discount_rate.unwrap_or(DEFAULT_DISCOUNT_RATE),
            exchange_rate: self.pricing.exchange_rate.unwrap_or(DEFAULT_EXCHANGE_RATE),
        }
    }

    fn webhook_url(&self) -> &str {
        self.webhook.url.as_deref().unwrap_or(DEFAULT_WEBHOOK_URL)
    }

    fn timeout_seconds(&self) -> u64 {
        self.webhook.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn catalog(&self) -> Catalog {
        match &self.pricing.services {
            Some(services) => Catalog::new(
                self.pricing.base.unwrap_or(ServiceKey::Whatsapp),
                services.clone(),
            ),
            None => Catalog::standard(),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
