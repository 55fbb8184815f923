use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use crate::retrievers::RetrieverError;
use crate::schemas::{Document, Retriever};

/// Retriever that concatenates the results of several retrievers and drops
/// documents whose content was already returned.
///
/// Retrievers are queried one after another in the order they were given.
/// The output keeps that order and, within one retriever, its ranking.
/// Two documents are duplicates when their `page_content` is byte-for-byte
/// identical; the first one seen is kept together with its metadata.
///
/// The first failing retriever aborts the call and its error is returned as
/// is; retrievers after it are not queried.
pub struct CombinedRetriever {
    retrievers: Vec<Arc<dyn Retriever>>,
}

impl CombinedRetriever {
    /// Create a combined retriever over `retrievers`, queried in this order.
    pub fn new(retrievers: Vec<Arc<dyn Retriever>>) -> Self {
        Self { retrievers }
    }

    /// The configured retrievers, in query order.
    pub fn retrievers(&self) -> &[Arc<dyn Retriever>] {
        &self.retrievers
    }
}

#[async_trait]
impl Retriever for CombinedRetriever {
    async fn get_relevant_documents(&self, query: &str) -> Result<Vec<Document>, RetrieverError> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut merged = Vec::new();

        for (idx, retriever) in self.retrievers.iter().enumerate() {
            let results = retriever.get_relevant_documents(query).await?;
            log::debug!("Retriever {} returned {} documents", idx, results.len());

            for doc in results {
                if seen.insert(doc.page_content.clone()) {
                    merged.push(doc);
                }
            }
        }

        log::debug!("Combined retrieval kept {} documents", merged.len());
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct FixedRetriever {
        docs: Vec<Document>,
        calls: AtomicUsize,
    }

    impl FixedRetriever {
        fn new(docs: Vec<Document>) -> Arc<Self> {
            Arc::new(Self {
                docs,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl Retriever for FixedRetriever {
        async fn get_relevant_documents(
            &self,
            _query: &str,
        ) -> Result<Vec<Document>, RetrieverError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.docs.clone())
        }
    }

    struct FailingRetriever;

    #[async_trait]
    impl Retriever for FailingRetriever {
        async fn get_relevant_documents(
            &self,
            query: &str,
        ) -> Result<Vec<Document>, RetrieverError> {
            Err(RetrieverError::QueryError(format!("index offline for {}", query)))
        }
    }

    fn contents(docs: &[Document]) -> Vec<&str> {
        docs.iter().map(|d| d.page_content.as_str()).collect()
    }

    #[tokio::test]
    async fn test_duplicates_within_one_retriever_are_dropped() {
        let only: Arc<dyn Retriever> = FixedRetriever::new(vec![
            Document::new("a"),
            Document::new("b"),
            Document::new("a"),
        ]);
        let retriever = CombinedRetriever::new(vec![only]);

        let docs = retriever.get_relevant_documents("q").await.unwrap();
        assert_eq!(contents(&docs), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_dedup_is_exact_match_only() {
        let retrievers: Vec<Arc<dyn Retriever>> = vec![
            FixedRetriever::new(vec![Document::new("for loop")]),
            FixedRetriever::new(vec![Document::new("For loop"), Document::new("for loop ")]),
        ];
        let retriever = CombinedRetriever::new(retrievers);

        let docs = retriever.get_relevant_documents("q").await.unwrap();
        assert_eq!(contents(&docs), vec!["for loop", "For loop", "for loop "]);
    }

    #[tokio::test]
    async fn test_each_retriever_called_once_per_query() {
        let first = FixedRetriever::new(vec![Document::new("a")]);
        let second = FixedRetriever::new(vec![Document::new("a")]);
        let retrievers: Vec<Arc<dyn Retriever>> = vec![first.clone(), second.clone()];
        let retriever = CombinedRetriever::new(retrievers);

        retriever.get_relevant_documents("q").await.unwrap();
        assert_eq!(first.calls.load(Ordering::SeqCst), 1);
        assert_eq!(second.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_error_stops_later_retrievers() {
        let later = FixedRetriever::new(vec![Document::new("never")]);
        let retrievers: Vec<Arc<dyn Retriever>> = vec![
            FixedRetriever::new(vec![Document::new("a")]),
            Arc::new(FailingRetriever),
            later.clone(),
        ];
        let retriever = CombinedRetriever::new(retrievers);

        let err = retriever.get_relevant_documents("q").await.unwrap_err();
        assert!(matches!(err, RetrieverError::QueryError(ref m) if m.contains("offline")));
        assert_eq!(later.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_no_retrievers_yields_nothing() {
        let retriever = CombinedRetriever::new(Vec::new());
        assert!(retriever.get_relevant_documents("q").await.unwrap().is_empty());
        assert!(retriever.retrievers().is_empty());
    }
}
