use async_trait::async_trait;

use super::Document;
use crate::retrievers::RetrieverError;

/// Anything that turns a query into a ranked list of documents, most
/// relevant first.
#[async_trait]
pub trait Retriever: Sync + Send {
    async fn get_relevant_documents(&self, query: &str) -> Result<Vec<Document>, RetrieverError>;
}
