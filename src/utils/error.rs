use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Metadata source returned {status}: {message}")]
    SourceError { status: u16, message: String },

    #[error("Unknown object: {object}")]
    UnknownObject { object: String },

    #[error("No object selected")]
    NoObjectSelected,

    #[error("Export is disabled for {object}: no rows match the current filters")]
    ExportDisabled { object: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    System,
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ViewerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ViewerError::ApiError(_) | ViewerError::SourceError { .. } => ErrorCategory::Network,
            ViewerError::CsvError(_) | ViewerError::SerializationError(_) => ErrorCategory::Data,
            ViewerError::ConfigValidationError { .. }
            | ViewerError::InvalidConfigValueError { .. }
            | ViewerError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ViewerError::IoError(_) => ErrorCategory::System,
            ViewerError::UnknownObject { .. }
            | ViewerError::NoObjectSelected
            | ViewerError::ExportDisabled { .. } => ErrorCategory::User,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ViewerError::ExportDisabled { .. } => ErrorSeverity::Low,
            ViewerError::ApiError(_) | ViewerError::SourceError { .. } => ErrorSeverity::Medium,
            ViewerError::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ViewerError::ApiError(_) => "Could not reach the metadata service".to_string(),
            ViewerError::SourceError { status, .. } => {
                format!("The metadata service rejected the request (HTTP {})", status)
            }
            ViewerError::CsvError(_) => "Failed to build the CSV export".to_string(),
            ViewerError::SerializationError(_) => {
                "The metadata service returned data in an unexpected shape".to_string()
            }
            ViewerError::IoError(e) => format!("File system error: {}", e),
            ViewerError::ConfigValidationError { field, .. }
            | ViewerError::InvalidConfigValueError { field, .. }
            | ViewerError::MissingConfigError { field } => {
                format!("Configuration problem with '{}'", field)
            }
            ViewerError::UnknownObject { object } => format!("Object '{}' was not found", object),
            ViewerError::NoObjectSelected => "Select an object first".to_string(),
            ViewerError::ExportDisabled { .. } => {
                "Nothing to download: no fields match the current filters".to_string()
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check the endpoint URL and that the service is reachable",
            ErrorCategory::Data => "Check that the service returns the documented JSON shape",
            ErrorCategory::Configuration => "Fix the configuration value and run again",
            ErrorCategory::System => "Check file permissions and free disk space",
            ErrorCategory::User => match self {
                ViewerError::ExportDisabled { .. } => "Relax the name or datatype filter",
                _ => "Run without --object to list available objects",
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, ViewerError>;
