use std::sync::Arc;

use serde_json::Value;

use crate::embedding::Embedder;

/// Per-call options for vector store operations.
#[derive(Clone, Default)]
pub struct VecStoreOptions {
    /// JSON object whose entries must all match the document metadata exactly.
    pub filters: Option<Value>,
    /// Documents scoring below this are dropped.
    pub score_threshold: Option<f32>,
    /// Overrides the store's embedder for this call.
    pub embedder: Option<Arc<dyn Embedder>>,
}

impl std::fmt::Debug for VecStoreOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VecStoreOptions")
            .field("filters", &self.filters)
            .field("score_threshold", &self.score_threshold)
            .field("embedder", &self.embedder.as_ref().map(|_| "<dyn Embedder>"))
            .finish()
    }
}

impl VecStoreOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filters(mut self, filters: Value) -> Self {
        self.filters = Some(filters);
        self
    }

    pub fn with_score_threshold(mut self, score_threshold: f32) -> Self {
        self.score_threshold = Some(score_threshold);
        self
    }

    pub fn with_embedder<E: Embedder + 'static>(mut self, embedder: E) -> Self {
        self.embedder = Some(Arc::new(embedder));
        self
    }
}
