use thiserror::Error;

#[derive(Error, Debug)]
pub enum TodoError {
    #[error("Out of range: {0}")]
    OutOfRange(String),

    #[error("Invalid value '{value}', expected one of: {expected}")]
    InvalidEnum {
        value: String,
        expected: &'static str,
    },

    #[error("Could not parse {field}: '{value}'")]
    Parse { field: &'static str, value: String },

    #[error("No saved data at {0}")]
    NotFound(String),

    #[error("Corrupt record: {0}")]
    CorruptRecord(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, TodoError>;
