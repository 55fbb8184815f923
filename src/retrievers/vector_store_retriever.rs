use std::sync::Arc;

use async_trait::async_trait;

use crate::retrievers::RetrieverError;
use crate::schemas::{Document, Retriever};
use crate::vectorstore::{VecStoreOptions, VectorStore};

/// How a [`VectorStoreRetriever`] searches its store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchType {
    /// Plain top-k similarity search.
    #[default]
    Similarity,
}

/// Exposes a vector store through the [`Retriever`] trait.
pub struct VectorStoreRetriever {
    store: Arc<dyn VectorStore>,
    k: usize,
    search_type: SearchType,
    options: VecStoreOptions,
}

impl VectorStoreRetriever {
    /// Retriever returning the `k` most similar documents from `store`.
    pub fn new(store: Arc<dyn VectorStore>, k: usize) -> Self {
        Self {
            store,
            k,
            search_type: SearchType::default(),
            options: VecStoreOptions::default(),
        }
    }

    pub fn with_search_type(mut self, search_type: SearchType) -> Self {
        self.search_type = search_type;
        self
    }

    pub fn with_options(mut self, options: VecStoreOptions) -> Self {
        self.options = options;
        self
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn search_type(&self) -> SearchType {
        self.search_type
    }
}

#[async_trait]
impl Retriever for VectorStoreRetriever {
    async fn get_relevant_documents(&self, query: &str) -> Result<Vec<Document>, RetrieverError> {
        match self.search_type {
            SearchType::Similarity => Ok(self
                .store
                .similarity_search(query, self.k, &self.options)
                .await?),
        }
    }
}
