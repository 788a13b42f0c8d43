use thiserror::Error;

#[derive(Error, Debug)]
pub enum ElexError {
    #[error("unknown command: {command}")]
    UnknownCommand { command: String },

    #[error("missing required argument: {argument}")]
    MissingArgument { argument: String },

    #[error("invalid {argument} '{value}': {reason}")]
    InvalidArgument {
        argument: String,
        value: String,
        reason: String,
    },

    #[error("cannot read {location}: {message}")]
    DataAccess { location: String, message: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("malformed record at {path}: {message}")]
    MalformedRecord { path: String, message: String },

    #[error("cannot render {format}: {message}")]
    Render { format: String, message: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("missing configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Usage,
    DataAccess,
    MalformedRecord,
    Render,
    Config,
}

impl ElexError {
    pub fn data_access(location: impl Into<String>, message: impl ToString) -> Self {
        ElexError::DataAccess {
            location: location.into(),
            message: message.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ElexError::UnknownCommand { .. }
            | ElexError::MissingArgument { .. }
            | ElexError::InvalidArgument { .. } => ErrorCategory::Usage,
            ElexError::DataAccess { .. } | ElexError::ApiError(_) | ElexError::IoError(_) => {
                ErrorCategory::DataAccess
            }
            ElexError::MalformedRecord { .. } => ErrorCategory::MalformedRecord,
            ElexError::Render { .. }
            | ElexError::CsvError(_)
            | ElexError::SerializationError(_) => ErrorCategory::Render,
            ElexError::ConfigError { .. }
            | ElexError::InvalidConfigValueError { .. }
            | ElexError::MissingConfigError { .. } => ErrorCategory::Config,
        }
    }

    /// Process exit status for this error. Never zero.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Usage => 2,
            ErrorCategory::DataAccess => 3,
            ErrorCategory::MalformedRecord => 4,
            ErrorCategory::Render => 5,
            ErrorCategory::Config => 6,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ElexError::UnknownCommand { .. } => {
                "run `elex --help` to list the available commands"
            }
            ElexError::MissingArgument { .. } | ElexError::InvalidArgument { .. } => {
                "pass the election date as YYYY-MM-DD after the command"
            }
            ElexError::DataAccess { .. } | ElexError::IoError(_) => {
                "check that the data file exists and contains valid JSON"
            }
            ElexError::ApiError(_) => "check the API base URL, your API key and network access",
            ElexError::MalformedRecord { .. } => {
                "the source data does not match the expected format; re-download it"
            }
            ElexError::Render { .. } => {
                "the query returned no records; try `-o json` to get an empty array"
            }
            ElexError::CsvError(_) | ElexError::SerializationError(_) => {
                "re-run with --verbose and report the record that failed to render"
            }
            ElexError::ConfigError { .. }
            | ElexError::InvalidConfigValueError { .. }
            | ElexError::MissingConfigError { .. } => {
                "check the configuration file and the AP_API_KEY / AP_API_BASE_URL variables"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ElexError>;
