use thiserror::Error;

#[derive(Error, Debug)]
pub enum RentalError {
    #[error("Invalid date '{value}': {reason}")]
    InvalidDate { value: String, reason: String },

    #[error("Invalid lease duration: {years} (must be a positive number of years)")]
    InvalidDuration { years: i64 },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    NotFound,
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

impl RentalError {
    pub fn invalid_date(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDate {
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidDate { .. } | Self::InvalidDuration { .. } | Self::ValidationError { .. } => {
                ErrorCategory::Input
            }
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::CsvError(_) | Self::IoError(_) | Self::SerializationError(_) => {
                ErrorCategory::Storage
            }
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::NotFound => ErrorSeverity::Low,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidDate { value, .. } => {
                format!("'{}' is not a valid date (expected YYYY-MM-DD)", value)
            }
            Self::InvalidDuration { years } => {
                format!("A lease must last at least one year, got {}", years)
            }
            Self::NotFound { entity, .. } => format!("{} not found", entity),
            Self::CsvError(_) | Self::IoError(_) => {
                "Failed to read or write the spreadsheet data files".to_string()
            }
            Self::SerializationError(_) => "Failed to encode or decode data".to_string(),
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            Self::ValidationError { message } => message.clone(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::InvalidDate { .. } => "Use the ISO format YYYY-MM-DD, e.g. 2025-01-31",
            Self::InvalidDuration { .. } => "Set contractYears to a whole number of 1 or more",
            Self::NotFound { .. } => "Check the id and list the collection to find valid ids",
            Self::CsvError(_) => "Inspect the table file for broken rows or a changed header",
            Self::IoError(_) => "Check that the data directory exists and is writable",
            Self::SerializationError(_) => "Check the JSON payload or the sections cell contents",
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Review the TOML config file and CLI flags"
            }
            Self::ValidationError { .. } => "Fix the highlighted field and submit again",
        }
    }

    /// 檔案不存在（表格尚未建立）
    pub fn is_missing_file(&self) -> bool {
        matches!(self, Self::IoError(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

pub type Result<T> = std::result::Result<T, RentalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_are_low_severity() {
        let err = RentalError::InvalidDuration { years: 0 };
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::Low);

        let err = RentalError::invalid_date("2025-13-01", "month out of range");
        assert!(err.user_friendly_message().contains("2025-13-01"));
    }

    #[test]
    fn test_missing_file_detection() {
        let err = RentalError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "tenants.csv",
        ));
        assert!(err.is_missing_file());
        assert_eq!(err.severity(), ErrorSeverity::Critical);

        let err = RentalError::validation("name is required");
        assert!(!err.is_missing_file());
    }
}
