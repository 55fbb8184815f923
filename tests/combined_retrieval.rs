//! Behaviour of the combined retriever and the context block built from its
//! output.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chatty_python::{
    chain::build_context,
    embedding::{Embedder, EmbedderError},
    retrievers::{CombinedRetriever, RetrieverError, VectorStoreRetriever},
    schemas::{Document, Retriever},
    vectorstore::{in_memory::Store, in_memory::StoreBuilder, VecStoreOptions, VectorStore},
};

struct StaticRetriever(Vec<Document>);

#[async_trait]
impl Retriever for StaticRetriever {
    async fn get_relevant_documents(&self, _query: &str) -> Result<Vec<Document>, RetrieverError> {
        Ok(self.0.clone())
    }
}

fn retriever(docs: Vec<Document>) -> Arc<dyn Retriever> {
    Arc::new(StaticRetriever(docs))
}

/// Records every query it receives in a log shared across retrievers.
struct RecordingRetriever {
    name: &'static str,
    log: Arc<Mutex<Vec<(&'static str, String)>>>,
}

#[async_trait]
impl Retriever for RecordingRetriever {
    async fn get_relevant_documents(&self, query: &str) -> Result<Vec<Document>, RetrieverError> {
        self.log.lock().unwrap().push((self.name, query.to_string()));
        Ok(vec![Document::new(self.name)])
    }
}

fn contents(docs: &[Document]) -> Vec<&str> {
    docs.iter().map(|d| d.page_content.as_str()).collect()
}

#[tokio::test]
async fn test_order_preservation() {
    let combined = CombinedRetriever::new(vec![
        retriever(vec![Document::new("A"), Document::new("B")]),
        retriever(vec![Document::new("C"), Document::new("D")]),
    ]);

    let docs = combined.get_relevant_documents("query").await.unwrap();
    assert_eq!(contents(&docs), vec!["A", "B", "C", "D"]);
}

#[tokio::test]
async fn test_dedup_keeps_first_occurrence() {
    let combined = CombinedRetriever::new(vec![
        retriever(vec![Document::new("x").with_metadata_entry("example", "1")]),
        retriever(vec![Document::new("x").with_metadata_entry("example", "2")]),
    ]);

    let docs = combined.get_relevant_documents("query").await.unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].metadata["example"], "1");
}

#[tokio::test]
async fn test_all_empty_gives_empty() {
    let combined = CombinedRetriever::new(vec![retriever(vec![]), retriever(vec![])]);

    let docs = combined.get_relevant_documents("query").await.unwrap();
    assert!(docs.is_empty());
    assert_eq!(build_context(&docs), "");
}

#[tokio::test]
async fn test_repeated_calls_are_identical() {
    let combined = CombinedRetriever::new(vec![
        retriever(vec![Document::new("A"), Document::new("B")]),
        retriever(vec![Document::new("B"), Document::new("C")]),
    ]);

    let first = combined.get_relevant_documents("query").await.unwrap();
    let second = combined.get_relevant_documents("query").await.unwrap();
    assert_eq!(first, second);
    assert_eq!(contents(&first), vec!["A", "B", "C"]);
}

#[tokio::test]
async fn test_single_retriever_passthrough() {
    let docs = vec![
        Document::new("A").with_score(0.9),
        Document::new("B").with_score(0.4),
    ];
    let combined = CombinedRetriever::new(vec![retriever(docs.clone())]);

    assert_eq!(combined.get_relevant_documents("").await.unwrap(), docs);
}

#[tokio::test]
async fn test_empty_query_reaches_every_retriever_in_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let retrievers: Vec<Arc<dyn Retriever>> = vec![
        Arc::new(RecordingRetriever {
            name: "examples",
            log: log.clone(),
        }),
        Arc::new(RecordingRetriever {
            name: "questions",
            log: log.clone(),
        }),
    ];
    let combined = CombinedRetriever::new(retrievers);

    let docs = combined.get_relevant_documents("").await.unwrap();
    assert_eq!(contents(&docs), vec!["examples", "questions"]);
    assert_eq!(
        *log.lock().unwrap(),
        vec![("examples", String::new()), ("questions", String::new())]
    );
}

#[test]
fn test_context_formatting() {
    let docs = vec![
        Document::new("1").with_metadata_entry("example", "foo"),
        Document::new("2").with_metadata_entry("answer", "bar"),
        Document::new("3"),
    ];
    assert_eq!(build_context(&docs), "foo\n\nbar\n\n");
}

/// One-hot embedding over a tiny vocabulary.
struct VocabularyEmbedder;

fn embed(text: &str) -> Vec<f64> {
    ["decorator", "generator", "class"]
        .iter()
        .map(|w| if text.contains(w) { 1.0 } else { 0.0 })
        .collect()
}

#[async_trait]
impl Embedder for VocabularyEmbedder {
    async fn embed_documents(&self, documents: &[String]) -> Result<Vec<Vec<f64>>, EmbedderError> {
        Ok(documents.iter().map(|d| embed(d)).collect())
    }

    async fn embed_query(&self, text: &str) -> Result<Vec<f64>, EmbedderError> {
        Ok(embed(text))
    }
}

#[tokio::test]
async fn test_two_local_indexes_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let e_dir = dir.path().join("e_faiss_index");
    let q_dir = dir.path().join("q_faiss_index");

    let examples = StoreBuilder::new().embedder(VocabularyEmbedder).build().unwrap();
    examples
        .add_documents(
            &[
                Document::new("decorator example").with_metadata_entry("example", "@cache"),
                Document::new("class example").with_metadata_entry("example", "class A: pass"),
            ],
            &VecStoreOptions::default(),
        )
        .await
        .unwrap();
    examples.save_local(&e_dir).unwrap();

    let questions = StoreBuilder::new().embedder(VocabularyEmbedder).build().unwrap();
    questions
        .add_documents(
            &[
                Document::new("decorator example").with_metadata_entry("answer", "duplicate"),
                Document::new("what is a decorator generator").with_metadata_entry("answer", "wraps"),
                Document::new("class question").with_metadata_entry("answer", "blueprint"),
            ],
            &VecStoreOptions::default(),
        )
        .await
        .unwrap();
    questions.save_local(&q_dir).unwrap();

    let embedder: Arc<dyn Embedder> = Arc::new(VocabularyEmbedder);
    let retrievers: Vec<Arc<dyn Retriever>> = vec![
        Arc::new(VectorStoreRetriever::new(
            Arc::new(Store::load_local(&e_dir, embedder.clone()).unwrap()),
            1,
        )),
        Arc::new(VectorStoreRetriever::new(
            Arc::new(Store::load_local(&q_dir, embedder).unwrap()),
            2,
        )),
    ];
    let combined = CombinedRetriever::new(retrievers);

    let docs = combined.get_relevant_documents("decorator").await.unwrap();
    assert_eq!(
        contents(&docs),
        vec!["decorator example", "what is a decorator generator"]
    );
    assert_eq!(build_context(&docs), "@cache\n\nwraps");
}
