use thiserror::Error;

#[derive(Error, Debug)]
pub enum LeadError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("{message}")]
    ValidationError { message: String },

    #[error("{service} responded with status {status}: {body}")]
    UpstreamError {
        service: String,
        status: u16,
        body: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Input,
    Upstream,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl LeadError {
    pub fn validation(message: impl Into<String>) -> Self {
        LeadError::ValidationError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            LeadError::HttpError(_) => ErrorCategory::Network,
            LeadError::ConfigError { .. }
            | LeadError::MissingConfigError { .. }
            | LeadError::InvalidConfigValueError { .. }
            | LeadError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            LeadError::ValidationError { .. } => ErrorCategory::Input,
            LeadError::UpstreamError { .. } => ErrorCategory::Upstream,
            LeadError::IoError(_) | LeadError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Network | ErrorCategory::Upstream => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check network connectivity and the service URLs, then retry",
            ErrorCategory::Configuration => {
                "Review lead-intake.toml and the environment variables it references"
            }
            ErrorCategory::Input => "Correct the highlighted field and submit again",
            ErrorCategory::Upstream => "The remote service rejected the request; check its credentials",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            // 驗證訊息本身就是給使用者看的
            LeadError::ValidationError { message } => message.clone(),
            LeadError::MissingConfigError { field } => {
                format!("Required setting '{}' is not configured", field)
            }
            LeadError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            LeadError::ConfigValidationError { field, message } => {
                format!("Setting '{}' could not be loaded: {}", field, message)
            }
            LeadError::ConfigError { message } => message.clone(),
            LeadError::HttpError(_) | LeadError::UpstreamError { .. } => {
                "A remote service could not be reached".to_string()
            }
            LeadError::IoError(e) => format!("File access failed: {}", e),
            LeadError::SerializationError(e) => format!("Data could not be encoded: {}", e),
        }
    }
}

pub type Result<T> = std::result::Result<T, LeadError>;
