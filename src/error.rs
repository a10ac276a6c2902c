use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// An input violated a range or sum invariant. `field` is a factor name or `total_weight`.
    #[error("Validation Error [{field}]: {message}")]
    Validation { field: String, message: String },

    #[error("Unsupported Strategy: {0}")]
    UnsupportedStrategy(String),

    #[error("Evaluation Error: {0}")]
    Evaluation(String),

    #[error("Entity '{id}' could not be scored: {source}")]
    Entity {
        id: String,
        #[source]
        source: Box<EngineError>,
    },

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),
}

impl EngineError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The offending field for validation errors, looking through batch wrappers.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            Self::Entity { source, .. } => source.field(),
            _ => None,
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
