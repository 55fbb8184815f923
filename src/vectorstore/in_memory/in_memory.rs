use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    embedding::Embedder,
    schemas::Document,
    vectorstore::{VecStoreOptions, VectorStore, VectorStoreError},
};

/// File name of the serialized index inside an index directory.
pub const INDEX_FILE_NAME: &str = "index.json";

fn next_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Entry {
    id: String,
    page_content: String,
    #[serde(default)]
    metadata: HashMap<String, Value>,
    embedding: Vec<f64>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct IndexFile {
    entries: Vec<Entry>,
}

/// Vector store that keeps every embedding in memory and ranks by cosine
/// similarity.
///
/// A store can be persisted to, and loaded from, an index directory holding
/// a single `index.json` file.
pub struct Store {
    data: RwLock<Vec<Entry>>,
    embedder: Arc<dyn Embedder>,
}

pub struct StoreBuilder {
    embedder: Option<Arc<dyn Embedder>>,
}

impl StoreBuilder {
    pub fn new() -> Self {
        StoreBuilder { embedder: None }
    }

    pub fn embedder<E: Embedder + 'static>(mut self, embedder: E) -> Self {
        self.embedder = Some(Arc::new(embedder));
        self
    }

    pub fn shared_embedder(mut self, embedder: Arc<dyn Embedder>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    pub fn build(self) -> Result<Store, VectorStoreError> {
        let embedder = self.embedder.ok_or("embedder is required".to_string())?;
        Ok(Store {
            data: RwLock::new(Vec::new()),
            embedder,
        })
    }
}

impl Default for StoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Loads an index directory written by [`Store::save_local`].
    ///
    /// Every entry must carry a non-empty embedding and all embeddings must
    /// share one dimension.
    pub fn load_local<P: AsRef<Path>>(
        dir: P,
        embedder: Arc<dyn Embedder>,
    ) -> Result<Self, VectorStoreError> {
        let path = dir.as_ref().join(INDEX_FILE_NAME);
        let raw = fs::read_to_string(&path)?;
        let index: IndexFile = serde_json::from_str(&raw)?;

        let mut dim = None;
        for entry in &index.entries {
            if entry.embedding.is_empty() {
                return Err(VectorStoreError::InvalidIndex(format!(
                    "entry {} has an empty embedding",
                    entry.id
                )));
            }
            match dim {
                None => dim = Some(entry.embedding.len()),
                Some(d) if d != entry.embedding.len() => {
                    return Err(VectorStoreError::InvalidIndex(format!(
                        "entry {} has dimension {}, expected {}",
                        entry.id,
                        entry.embedding.len(),
                        d
                    )));
                }
                Some(_) => {}
            }
        }

        log::info!(
            "Loaded {} entries from {}",
            index.entries.len(),
            path.display()
        );
        Ok(Store {
            data: RwLock::new(index.entries),
            embedder,
        })
    }

    /// Writes the store to `dir/index.json`, creating `dir` if needed.
    pub fn save_local<P: AsRef<Path>>(&self, dir: P) -> Result<(), VectorStoreError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let data = self.data.read().map_err(|e| e.to_string())?;
        let index = IndexFile {
            entries: data.clone(),
        };
        let path = dir.join(INDEX_FILE_NAME);
        fs::write(&path, serde_json::to_string_pretty(&index)?)?;
        log::info!("Saved {} entries to {}", index.entries.len(), path.display());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.data.read().map(|d| d.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// Every entry shares the dimension of the first one.
fn check_dimension(data: &[Entry], vector: &[f64]) -> Result<(), VectorStoreError> {
    match data.first() {
        Some(first) if first.embedding.len() != vector.len() => {
            Err(VectorStoreError::InvalidIndex(format!(
                "embedding has dimension {}, index expects {}",
                vector.len(),
                first.embedding.len()
            )))
        }
        _ => Ok(()),
    }
}

fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

fn metadata_matches(
    doc_metadata: &HashMap<String, Value>,
    filter: &serde_json::Map<String, Value>,
) -> bool {
    for (k, v) in filter {
        match doc_metadata.get(k) {
            Some(dv) if dv == v => {}
            _ => return false,
        }
    }
    true
}

#[async_trait]
impl VectorStore for Store {
    async fn add_documents(
        &self,
        docs: &[Document],
        opt: &VecStoreOptions,
    ) -> Result<Vec<String>, VectorStoreError> {
        let texts: Vec<String> = docs.iter().map(|d| d.page_content.clone()).collect();
        let embedder = opt.embedder.as_ref().unwrap_or(&self.embedder);
        let vectors = embedder.embed_documents(&texts).await?;
        if vectors.len() != docs.len() {
            return Err("Number of vectors and documents do not match".to_string().into());
        }
        let mut data = self.data.write().map_err(|e| e.to_string())?;
        let expected = data
            .first()
            .map(|e| e.embedding.len())
            .or_else(|| vectors.first().map(Vec::len));
        if let Some(expected) = expected {
            if let Some(bad) = vectors.iter().find(|v| v.len() != expected) {
                return Err(VectorStoreError::InvalidIndex(format!(
                    "embedding has dimension {}, index expects {}",
                    bad.len(),
                    expected
                )));
            }
        }
        let mut ids = Vec::with_capacity(docs.len());
        for (doc, vector) in docs.iter().zip(vectors.into_iter()) {
            let id = next_id();
            ids.push(id.clone());
            data.push(Entry {
                id,
                page_content: doc.page_content.clone(),
                metadata: doc.metadata.clone(),
                embedding: vector,
            });
        }
        Ok(ids)
    }

    async fn similarity_search(
        &self,
        query: &str,
        limit: usize,
        opt: &VecStoreOptions,
    ) -> Result<Vec<Document>, VectorStoreError> {
        let embedder = opt.embedder.as_ref().unwrap_or(&self.embedder);
        let query_vector = embedder.embed_query(query).await?;
        let data = self.data.read().map_err(|e| e.to_string())?;
        check_dimension(&data, &query_vector)?;
        let score_threshold = opt
            .score_threshold
            .map(f64::from)
            .unwrap_or(f64::NEG_INFINITY);
        let filter_map = opt.filters.as_ref().and_then(|v| v.as_object());

        let mut scored: Vec<(f64, &Entry)> = data
            .iter()
            .filter(|entry| filter_map.map_or(true, |m| metadata_matches(&entry.metadata, m)))
            .map(|entry| (cosine_similarity(&query_vector, &entry.embedding), entry))
            .filter(|(s, _)| *s >= score_threshold)
            .collect();

        // Stable sort: equal scores keep insertion order.
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        let result: Vec<Document> = scored
            .into_iter()
            .take(limit)
            .map(|(score, entry)| Document {
                page_content: entry.page_content.clone(),
                metadata: entry.metadata.clone(),
                score,
            })
            .collect();
        Ok(result)
    }

    async fn delete(&self, ids: &[String], _opt: &VecStoreOptions) -> Result<(), VectorStoreError> {
        if ids.is_empty() {
            return Ok(());
        }
        let ids_set: HashSet<&String> = ids.iter().collect();
        let mut data = self.data.write().map_err(|e| e.to_string())?;
        data.retain(|entry| !ids_set.contains(&entry.id));
        Ok(())
    }
}
