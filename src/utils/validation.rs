use crate::utils::error::{QuoteError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(QuoteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => {
            match url.scheme() {
                "http" | "https" => Ok(()),
                scheme => Err(QuoteError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: url_str.to_string(),
                    reason: format!("Unsupported URL scheme: {}", scheme),
                }),
            }
        }
        Err(e) => Err(QuoteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(QuoteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(QuoteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(QuoteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| QuoteError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(QuoteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Phone numbers for deep links: digits only once `+`, spaces and dashes are dropped.
pub fn validate_phone(field_name: &str, phone: &str) -> Result<String> {
    let digits: String = phone
        .chars()
        .filter(|c| !matches!(c, '+' | ' ' | '-'))
        .collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(QuoteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: phone.to_string(),
            reason: "Phone must contain only digits".to_string(),
        });
    }
    Ok(digits)
}

/// Inclusive bounds. Values that compare unordered (NaN) are out of range.
pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    let in_range = value >= min && value <= max;
    if !in_range {
        return Err(QuoteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Money amounts from configuration: finite and not negative.
pub fn validate_amount(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(QuoteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Amount must be a finite number".to_string(),
        });
    }
    validate_range(field_name, value, 0.0, f64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("webhook.url", "https://example.com").is_ok());
        assert!(validate_url("webhook.url", "http://example.com").is_ok());
        assert!(validate_url("webhook.url", "").is_err());
        assert!(validate_url("webhook.url", "invalid-url").is_err());
        assert!(validate_url("webhook.url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("webhook.timeout_seconds", 5, 1).is_ok());
        assert!(validate_positive_number("webhook.timeout_seconds", 0, 1).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("pricing.discount_rate", 0.2, 0.0, 1.0).is_ok());
        assert!(validate_range("pricing.discount_rate", 1.5, 0.0, 1.0).is_err());
        assert!(validate_range("pricing.discount_rate", -0.1, 0.0, 1.0).is_err());
        assert!(validate_range("pricing.discount_rate", f64::NAN, 0.0, 1.0).is_err());
        assert!(validate_range("pricing.exchange_rate", f64::INFINITY, f64::MIN_POSITIVE, f64::MAX).is_err());
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount("pricing.services.unit_price", 2400.0).is_ok());
        assert!(validate_amount("pricing.services.unit_price", 0.0).is_ok());
        assert!(validate_amount("pricing.services.unit_price", -1.0).is_err());
        assert!(validate_amount("pricing.services.unit_price", f64::NAN).is_err());
        assert!(validate_amount("pricing.services.unit_setup_fee", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert_eq!(
            validate_phone("checkout.whatsapp_phone", "+57 310-252-3739").unwrap(),
            "573102523739"
        );
        assert!(validate_phone("checkout.whatsapp_phone", "").is_err());
        assert!(validate_phone("checkout.whatsapp_phone", "57x310").is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("checkout.phone", "573102523739").is_ok());
        assert!(validate_non_empty_string("checkout.phone", "   ").is_err());
    }
}
