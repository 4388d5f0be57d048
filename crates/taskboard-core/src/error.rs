use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskboardError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TaskboardError {
    /// Bad user input. The command was rejected and nothing changed.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Reading, writing, or decoding the card file failed.
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Serialization(_))
    }
}
