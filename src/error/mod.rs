//! Unified error type.
//!
//! Every module keeps its own error enum; [`ChattyError`] wraps them all so
//! an application can propagate any of them with `?`.

pub use crate::chain::ChainError;
pub use crate::config::ConfigError;
pub use crate::embedding::EmbedderError;
pub use crate::language_models::LLMError;
pub use crate::prompt::PromptError;
pub use crate::retrievers::RetrieverError;
pub use crate::vectorstore::VectorStoreError;

#[derive(thiserror::Error, Debug)]
pub enum ChattyError {
    #[error("LLM error: {0}")]
    LLMError(#[from] LLMError),

    #[error("Chain error: {0}")]
    ChainError(#[from] ChainError),

    #[error("Retriever error: {0}")]
    RetrieverError(#[from] RetrieverError),

    #[error("Vector store error: {0}")]
    VectorStoreError(#[from] VectorStoreError),

    #[error("Embedder error: {0}")]
    EmbedderError(#[from] EmbedderError),

    #[error("Prompt error: {0}")]
    PromptError(#[from] PromptError),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, ChattyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retriever_error_conversion() {
        let error: ChattyError = RetrieverError::QueryError("boom".to_string()).into();
        match error {
            ChattyError::RetrieverError(_) => {}
            _ => panic!("Expected RetrieverError variant"),
        }
    }

    #[test]
    fn test_nested_error_message() {
        let error: ChattyError =
            ChainError::from(RetrieverError::from(VectorStoreError::DeleteNotSupported)).into();
        assert_eq!(
            error.to_string(),
            "Chain error: Retriever error: Vector store error: This vector store does not support delete"
        );
    }
}
