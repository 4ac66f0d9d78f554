use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Extraction error: {message}")]
    ExtractionError { message: String },

    #[error("Parse error on '{line}': {message}")]
    ParseError { line: String, message: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn extraction(message: impl Into<String>) -> Self {
        Self::ExtractionError {
            message: message.into(),
        }
    }

    pub fn parse(line: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ParseError {
            line: line.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ExtractionError { .. } => ErrorCategory::Input,
            Self::ParseError { .. } | Self::CsvError(_) | Self::SerializationError(_) => {
                ErrorCategory::Data
            }
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. }
            | Self::ValidationError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ExtractionError { .. } => {
                "Check that this is a valid ECCE Service Calendar export (PDF)"
            }
            Self::ParseError { .. } => {
                "Check the closure dates in the calendar, or adjust input_date_formats in the layout config"
            }
            Self::CsvError(_) => "Check that the output CSV is not open in another program",
            Self::IoError(_) => "Check that the input exists and the output directory is writable",
            Self::SerializationError(_) => "Re-run with --verbose for details",
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => "Fix the layout configuration file or CLI flags",
            Self::ValidationError { .. } => "Check the command line arguments",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ExtractionError { .. } => format!("No closures detected. {}", self),
            Self::ParseError { line, .. } => {
                format!("Could not read the closure dates in \"{}\"", line)
            }
            Self::IoError(e) => format!("File access failed: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
