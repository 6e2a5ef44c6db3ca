pub mod lambda;
pub mod toml_config;

use crate::adapters::webhook::DEFAULT_TIMEOUT_SECONDS;
use crate::core::QuoteSettings;
use crate::domain::model::{
    OrderRequest, PricingSettings, ServiceKey, DEFAULT_DISCOUNT_RATE, DEFAULT_EXCHANGE_RATE,
};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_path, validate_positive_number, validate_range, validate_url, Validate,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_WEBHOOK_URL: &str = "http://localhost:5678/webhook/agent-quote";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, clap::Parser)]
#[command(name = "agent-quote")]
#[command(about = "Quote and order intelligent agent service bundles")]
pub struct CliConfig {
    /// WhatsApp Auto 24/7 units (base service)
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub whatsapp: String,

    /// Voz IA units, capped at the WhatsApp units
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub voice: String,

    /// Análisis de Datos units, capped at the WhatsApp units
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub data: String,

    /// Fábrica de Contenido IA units, capped at the WhatsApp units
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub content: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub company: Option<String>,

    /// Send the order to the webhook
    #[arg(long)]
    pub submit: bool,

    #[arg(long)]
    pub webhook_url: Option<String>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(long)]
    pub discount_rate: Option<f64>,

    #[arg(long)]
    pub exchange_rate: Option<f64>,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Also write the breakdown as CSV to this path
    #[arg(long)]
    pub export: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn order_request(&self) -> OrderRequest {
        OrderRequest::from_text([
            (ServiceKey::Whatsapp, self.whatsapp.as_str()),
            (ServiceKey::Voice, self.voice.as_str()),
            (ServiceKey::Data, self.data.as_str()),
            (ServiceKey::Content, self.content.as_str()),
        ])
    }

    pub fn lead(&self) -> crate::domain::model::CustomerLead {
        crate::domain::model::CustomerLead {
            name: self.name.clone().unwrap_or_default(),
            email: self.email.clone().unwrap_or_default(),
            company: self.company.clone(),
        }
    }
}

#[cfg(feature = "cli")]
impl QuoteSettings for CliConfig {
    fn pricing(&self) -> PricingSettings {
        PricingSettings {
            discount_rate: self.discount_rate.unwrap_or(DEFAULT_DISCOUNT_RATE),
            exchange_rate: self.exchange_rate.unwrap_or(DEFAULT_EXCHANGE_RATE),
        }
    }

    fn webhook_url(&self) -> &str {
        self.webhook_url.as_deref().unwrap_or(DEFAULT_WEBHOOK_URL)
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }
}

/// Checks shared by every settings source.
pub fn validate_settings<C: QuoteSettings + ?Sized>(settings: &C) -> Result<()> {
    let pricing = settings.pricing();
    validate_range("pricing.discount_rate", pricing.discount_rate, 0.0, 1.0)?;
    validate_range("pricing.exchange_rate", pricing.exchange_rate, f64::MIN_POSITIVE, f64::MAX)?;
    validate_url("webhook.url", settings.webhook_url())?;
    validate_positive_number("webhook.timeout_seconds", settings.timeout_seconds() as usize, 1)?;
    Ok(())
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_settings(self)?;
        if let Some(path) = &self.export {
            validate_path("export", path)?;
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parses_free_text_quantities() {
        let config = CliConfig::parse_from([
            "agent-quote",
            "--whatsapp",
            "3",
            "--voice",
            "5",
            "--data",
            "x",
        ]);
        let request = config.order_request();
        assert_eq!(request.units(ServiceKey::Whatsapp), 3);
        assert_eq!(request.units(ServiceKey::Voice), 5);
        assert_eq!(request.units(ServiceKey::Data), 0);
        assert_eq!(request.units(ServiceKey::Content), 0);
        assert_eq!(config.webhook_url(), DEFAULT_WEBHOOK_URL);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_rejects_discount_above_one() {
        let config = CliConfig::parse_from(["agent-quote", "--discount-rate", "1.5"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cli_lead_defaults_to_empty() {
        let config = CliConfig::parse_from(["agent-quote", "--email", "ana@co.com"]);
        let lead = config.lead();
        assert_eq!(lead.name, "");
        assert!(!lead.is_valid());
    }
}
