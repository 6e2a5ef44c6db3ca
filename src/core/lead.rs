use crate::domain::model::CustomerLead;
use crate::utils::error::{QuoteError, Result};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Name must be non-blank; email must look like `local@domain.tld`. Company is never checked.
pub fn is_lead_valid(name: &str, email: &str) -> bool {
    !name.trim().is_empty() && is_valid_email(email)
}

impl CustomerLead {
    pub fn is_valid(&self) -> bool {
        is_lead_valid(&self.name, &self.email)
    }

    /// Same check as [`is_valid`](Self::is_valid), reporting which field failed.
    pub fn check(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(QuoteError::InvalidLead {
                reason: "El nombre es obligatorio".to_string(),
            });
        }
        if !is_valid_email(&self.email) {
            return Err(QuoteError::InvalidLead {
                reason: format!("El email '{}' no es válido", self.email),
            });
        }
        Ok(())
    }

    /// Company with blank input treated as absent.
    pub fn company_name(&self) -> Option<&str> {
        self.company
            .as_deref()
            .map(str::trim)
            .filter(|company| !company.is_empty())
    }
}
