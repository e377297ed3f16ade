use thiserror::Error;

#[derive(Error, Debug)]
pub enum BinluhnError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid argument '{field}' = '{value}': {reason}")]
    InvalidArgument {
        field: String,
        value: String,
        reason: String,
    },

    #[error("BIN lookup for {bin} failed with HTTP {status}")]
    LookupFailed { bin: String, status: u16 },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Network,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BinluhnError {
    pub fn invalid_argument(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidArgument { .. } => ErrorCategory::Input,
            Self::ApiError(_) | Self::LookupFailed { .. } => ErrorCategory::Network,
            Self::CsvError(_) | Self::IoError(_) | Self::SerializationError(_) => {
                ErrorCategory::Storage
            }
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 查無此 BIN 不算致命
            Self::LookupFailed { status: 404, .. } => ErrorSeverity::Low,
            Self::ApiError(_) | Self::LookupFailed { .. } => ErrorSeverity::Medium,
            Self::InvalidArgument { .. }
            | Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::MissingConfigError { .. } => ErrorSeverity::High,
            Self::CsvError(_) | Self::IoError(_) | Self::SerializationError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => {
                "Check that the input contains only digits and that the length leaves room for a check digit"
            }
            Self::ApiError(_) => "Check your network connection or the lookup endpoint, then try again",
            Self::LookupFailed { status: 404, .. } => "The BIN is unknown to the lookup service; try another BIN",
            Self::LookupFailed { .. } => "The lookup service rejected the request; try again later",
            Self::CsvError(_) | Self::SerializationError(_) => {
                "Check the requested output format"
            }
            Self::IoError(_) => "Check that the output path exists and is writable",
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::MissingConfigError { .. } => "Review the configuration file and command-line flags",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidArgument { field, reason, .. } => {
                format!("Invalid {}: {}", field, reason)
            }
            Self::LookupFailed { bin, status: 404 } => format!("No issuer data found for BIN {}", bin),
            Self::LookupFailed { bin, status } => {
                format!("Failed to fetch BIN data for {} (HTTP {})", bin, status)
            }
            Self::ApiError(_) => "Could not reach the BIN lookup service".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BinluhnError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_is_high_severity_input_error() {
        let err = BinluhnError::invalid_argument("prefix", "4a", "must contain only digits");
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.to_string().contains("prefix"));
        assert!(err.user_friendly_message().contains("only digits"));
    }

    #[test]
    fn test_unknown_bin_is_low_severity() {
        let err = BinluhnError::LookupFailed {
            bin: "000000".to_string(),
            status: 404,
        };
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert_eq!(err.category(), ErrorCategory::Network);

        let err = BinluhnError::LookupFailed {
            bin: "000000".to_string(),
            status: 503,
        };
        assert_eq!(err.severity(), ErrorSeverity::Medium);
    }
}
