use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Object not found: {0:?}")]
    ObjectNotFound(crate::core::types::ObjectId),

    #[error("Ship template not found: {0}")]
    TemplateNotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
