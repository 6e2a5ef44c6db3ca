use crate::adapters::webhook::DEFAULT_TIMEOUT_SECONDS;
use crate::config::validate_settings;
use crate::core::QuoteSettings;
use crate::domain::model::{PricingSettings, DEFAULT_DISCOUNT_RATE, DEFAULT_EXCHANGE_RATE};
use crate::utils::error::Result;
use crate::utils::validation::{validate_required_field, Validate};
use std::env;

/// Settings for the serverless handler, read from the environment.
#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub webhook_url: String,
    pub timeout_seconds: u64,
    pub discount_rate: f64,
    pub exchange_rate: f64,
}

fn env_number<T: std::str::FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring unparseable {}={:?}", name, raw);
            default
        }),
        Err(_) => default,
    }
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        let webhook_url = env::var("QUOTE_WEBHOOK_URL").ok();
        let webhook_url = validate_required_field("QUOTE_WEBHOOK_URL", &webhook_url)?.clone();

        Ok(Self {
            webhook_url,
            timeout_seconds: env_number("QUOTE_TIMEOUT_SECONDS", DEFAULT_TIMEOUT_SECONDS),
            discount_rate: env_number("QUOTE_DISCOUNT_RATE", DEFAULT_DISCOUNT_RATE),
            exchange_rate: env_number("QUOTE_EXCHANGE_RATE", DEFAULT_EXCHANGE_RATE),
        })
    }
}

impl QuoteSettings for LambdaConfig {
    fn pricing(&self) -> PricingSettings {
        PricingSettings {
            discount_rate: self.discount_rate,
            exchange_rate: self.exchange_rate,
        }
    }

    fn webhook_url(&self) -> &str {
        &self.webhook_url
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }
}

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        validate_settings(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test touches the process environment so nothing races on these variables.
    #[test]
    fn test_from_env() {
        env::remove_var("QUOTE_WEBHOOK_URL");
        assert!(LambdaConfig::from_env().is_err());

        env::set_var("QUOTE_WEBHOOK_URL", "https://hooks.example.com/lead");
        env::set_var("QUOTE_TIMEOUT_SECONDS", "not-a-number");
        env::set_var("QUOTE_DISCOUNT_RATE", "0.1");

        let config = LambdaConfig::from_env().unwrap();
        assert_eq!(config.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
        assert_eq!(config.pricing().discount_rate, 0.1);
        assert_eq!(config.pricing().exchange_rate, DEFAULT_EXCHANGE_RATE);
        assert!(config.validate().is_ok());

        env::set_var("QUOTE_EXCHANGE_RATE", "NaN");
        let config = LambdaConfig::from_env().unwrap();
        assert!(config.validate().is_err());

        env::remove_var("QUOTE_WEBHOOK_URL");
        env::remove_var("QUOTE_TIMEOUT_SECONDS");
        env::remove_var("QUOTE_DISCOUNT_RATE");
        env::remove_var("QUOTE_EXCHANGE_RATE");
    }
}
