use async_trait::async_trait;

use crate::schemas::Document;

use super::{VecStoreOptions, VectorStoreError};

/// A store of embedded documents that can be searched by similarity.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Embeds and stores `docs`, returning the ids assigned to them.
    async fn add_documents(
        &self,
        docs: &[Document],
        opt: &VecStoreOptions,
    ) -> Result<Vec<String>, VectorStoreError>;

    /// Returns at most `limit` documents, most similar to `query` first.
    async fn similarity_search(
        &self,
        query: &str,
        limit: usize,
        opt: &VecStoreOptions,
    ) -> Result<Vec<Document>, VectorStoreError>;

    async fn delete(&self, ids: &[String], opt: &VecStoreOptions) -> Result<(), VectorStoreError>;
}
