use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Schema error in {dataset} dataset: required column '{column}' not found")]
    Schema { dataset: String, column: String },

    #[error("Parse error in {dataset} dataset at line {line}, column '{column}': {reason} (value: '{value}')")]
    Parse {
        dataset: String,
        line: u64,
        column: String,
        value: String,
        reason: String,
    },

    #[error("Duplicate key in {dataset} dataset: {key}")]
    DuplicateKey { dataset: String, key: String },

    #[error("No rows observed for {field} = {category}")]
    MissingCategory { field: String, category: u8 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Async task error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl From<config::ConfigError> for ProcessingError {
    fn from(err: config::ConfigError) -> Self {
        ProcessingError::Config(err.to_string())
    }
}
