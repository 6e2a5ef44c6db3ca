use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Order cannot be submitted: {reason}")]
    NotSubmittable { reason: String },

    #[error("Invalid customer details: {reason}")]
    InvalidLead { reason: String },

    #[error("Order submission failed (status {status:?}): {message}")]
    SubmissionFailed {
        status: Option<u16>,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    UserInput,
    Network,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl QuoteError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            QuoteError::ConfigError { .. }
            | QuoteError::MissingConfigError { .. }
            | QuoteError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            QuoteError::NotSubmittable { .. } | QuoteError::InvalidLead { .. } => {
                ErrorCategory::UserInput
            }
            QuoteError::Http(_) | QuoteError::SubmissionFailed { .. } => ErrorCategory::Network,
            QuoteError::CsvError(_) | QuoteError::SerializationError(_) => ErrorCategory::Data,
            QuoteError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::UserInput => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Whether the user can simply try the same action again.
    pub fn is_retryable(&self) -> bool {
        matches!(self.category(), ErrorCategory::Network)
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            QuoteError::NotSubmittable { .. } => {
                "Add at least one WhatsApp unit before placing the order"
            }
            QuoteError::InvalidLead { .. } => "Enter a name and a valid email address",
            QuoteError::Http(_) | QuoteError::SubmissionFailed { .. } => {
                "Check your connection and submit the order again"
            }
            QuoteError::ConfigError { .. }
            | QuoteError::MissingConfigError { .. }
            | QuoteError::InvalidConfigValueError { .. } => {
                "Review the configuration file and command line flags"
            }
            QuoteError::CsvError(_) | QuoteError::SerializationError(_) => {
                "Report this quote so the export can be fixed"
            }
            QuoteError::IoError(_) => "Check file permissions and available disk space",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            QuoteError::Http(_) | QuoteError::SubmissionFailed { .. } => {
                "Hubo un error al enviar tu pedido. Por favor, intenta nuevamente.".to_string()
            }
            QuoteError::NotSubmittable { reason } | QuoteError::InvalidLead { reason } => {
                reason.clone()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, QuoteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_failure_is_generic_and_retryable() {
        let err = QuoteError::SubmissionFailed {
            status: Some(502),
            message: "bad gateway".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Network);
        assert!(err.is_retryable());
        assert!(!err.user_friendly_message().contains("bad gateway"));
    }

    #[test]
    fn test_user_input_errors_are_low_severity() {
        let err = QuoteError::InvalidLead {
            reason: "email is malformed".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert!(!err.is_retryable());
        assert_eq!(err.user_friendly_message(), "email is malformed");
    }
}
