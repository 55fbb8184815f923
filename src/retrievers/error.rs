use thiserror::Error;

use crate::vectorstore::VectorStoreError;

/// Errors raised while retrieving documents.
#[derive(Error, Debug)]
pub enum RetrieverError {
    #[error("Query failed: {0}")]
    QueryError(String),

    #[error("Vector store error: {0}")]
    VectorStoreError(#[from] VectorStoreError),
}
