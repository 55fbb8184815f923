use reqwest::Error as ReqwestError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;

use crate::llm::HuggingFaceError;

#[derive(Error, Debug)]
pub enum LLMError {
    #[error("HuggingFace error: {0}")]
    HuggingFaceError(#[from] HuggingFaceError),

    #[error("Network request failed: {0}")]
    RequestError(#[from] ReqwestError),

    #[error("JSON serialization/deserialization error: {0}")]
    SerdeError(#[from] SerdeJsonError),

    #[error("Content not found in response: Expected at {0}")]
    ContentNotFound(String),

    #[error("Error: {0}")]
    OtherError(String),
}
