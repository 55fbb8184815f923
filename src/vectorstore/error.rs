use thiserror::Error;

use crate::embedding::EmbedderError;

#[derive(Error, Debug)]
pub enum VectorStoreError {
    #[error("This vector store does not support delete")]
    DeleteNotSupported,

    #[error("Embedder error: {0}")]
    EmbedderError(#[from] EmbedderError),

    #[error("Index IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Index serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Invalid index: {0}")]
    InvalidIndex(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<String> for VectorStoreError {
    fn from(s: String) -> Self {
        VectorStoreError::InternalError(s)
    }
}
