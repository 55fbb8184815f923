use thiserror::Error;

use crate::{
    config::ConfigError, language_models::LLMError, prompt::PromptError,
    retrievers::RetrieverError, vectorstore::VectorStoreError,
};

#[derive(Error, Debug)]
pub enum ChainError {
    #[error("LLM error: {0}")]
    LLMError(#[from] LLMError),

    #[error("Retriever error: {0}")]
    RetrieverError(#[from] RetrieverError),

    #[error("Vector store error: {0}")]
    VectorStoreError(#[from] VectorStoreError),

    #[error("Prompt error: {0}")]
    PromptError(#[from] PromptError),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("Missing object: {0}")]
    MissingObject(String),
}
