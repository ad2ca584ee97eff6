use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuakeMapError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Malformed feature at index {index}: {reason}")]
    MalformedFeature { index: usize, reason: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
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

impl QuakeMapError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            QuakeMapError::ApiError(_) | QuakeMapError::HttpStatus { .. } => ErrorCategory::Network,
            QuakeMapError::ConfigError { .. }
            | QuakeMapError::ConfigValidationError { .. }
            | QuakeMapError::InvalidConfigValueError { .. }
            | QuakeMapError::MissingConfigError { .. } => ErrorCategory::Configuration,
            QuakeMapError::SerializationError(_)
            | QuakeMapError::MalformedFeature { .. }
            | QuakeMapError::ProcessingError { .. } => ErrorCategory::Data,
            QuakeMapError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            QuakeMapError::ApiError(_) => "Check network connectivity and the feed URL, then retry",
            QuakeMapError::HttpStatus { .. } => "The feed server rejected the request; verify the URL or try again later",
            QuakeMapError::IoError(_) => "Check that the output directory is writable",
            QuakeMapError::SerializationError(_) => "The feed did not return valid GeoJSON",
            QuakeMapError::MalformedFeature { .. } => "The feed contains a feature without usable coordinates or magnitude",
            QuakeMapError::ConfigError { .. }
            | QuakeMapError::ConfigValidationError { .. }
            | QuakeMapError::InvalidConfigValueError { .. } => "Fix the configuration value and run again",
            QuakeMapError::MissingConfigError { .. } => "Add the missing setting to the config file or command line",
            QuakeMapError::ProcessingError { .. } => "Re-run with --verbose for details",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            QuakeMapError::ApiError(_) | QuakeMapError::HttpStatus { .. } => {
                format!("Could not download map data: {}", self)
            }
            QuakeMapError::IoError(e) => format!("Could not write the map: {}", e),
            QuakeMapError::ConfigError { .. }
            | QuakeMapError::ConfigValidationError { .. }
            | QuakeMapError::InvalidConfigValueError { .. }
            | QuakeMapError::MissingConfigError { .. } => format!("Invalid configuration: {}", self),
            _ => format!("Map generation failed: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, QuakeMapError>;
