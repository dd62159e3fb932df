use thiserror::Error;

#[derive(Error, Debug)]
pub enum JoinError {
    #[error("Input file not found: {path}")]
    FileNotFound { path: String },

    #[error("Malformed JSON in {path}: {source}")]
    MalformedJson {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Record '{record}' is missing field '{field}'")]
    MissingField { record: String, field: String },

    #[error("Record '{record}' has invalid field '{field}': expected {expected}")]
    InvalidField {
        record: String,
        field: String,
        expected: &'static str,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Data,
    System,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl JoinError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            JoinError::FileNotFound { .. } | JoinError::MalformedJson { .. } => {
                ErrorCategory::Input
            }
            JoinError::MissingField { .. } | JoinError::InvalidField { .. } => ErrorCategory::Data,
            JoinError::IoError(_) | JoinError::SerializationError(_) => ErrorCategory::System,
            JoinError::ConfigValidationError { .. } | JoinError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for this error. Never zero.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low | ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            JoinError::FileNotFound { path } => format!("Cannot find input file '{}'", path),
            JoinError::MalformedJson { path, .. } => {
                format!("Input file '{}' is not valid JSON", path)
            }
            JoinError::MissingField { record, field } => {
                format!("Hotel '{}' has no '{}' field", record, field)
            }
            JoinError::InvalidField {
                record,
                field,
                expected,
            } => format!("Hotel '{}' field '{}' should be {}", record, field, expected),
            JoinError::IoError(e) => format!("File operation failed: {}", e),
            JoinError::SerializationError(e) => format!("Could not render output: {}", e),
            JoinError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            JoinError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            JoinError::FileNotFound { .. } => {
                "Check that the input files exist in the working directory or pass --base-dir"
            }
            JoinError::MalformedJson { .. } => "Validate the input file with a JSON linter",
            JoinError::MissingField { .. } | JoinError::InvalidField { .. } => {
                "Fix the hotel detail record named above; one bad matched record aborts the batch"
            }
            JoinError::IoError(_) => "Check file permissions and free disk space",
            JoinError::SerializationError(_) => "Re-run with --verbose and report the failing record",
            JoinError::ConfigValidationError { .. } | JoinError::InvalidConfigValueError { .. } => {
                "Review the command line flags or the TOML configuration file"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, JoinError>;
