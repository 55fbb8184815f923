use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::{Embedder, EmbedderError};

pub const DEFAULT_EMBEDDING_MODEL: &str = "sentence-transformers/all-MiniLM-l6-v2";
pub const DEFAULT_EMBEDDING_BASE_URL: &str =
    "https://api-inference.huggingface.co/pipeline/feature-extraction";

#[derive(Serialize)]
struct FeatureExtractionPayload<'a> {
    inputs: &'a [String],
}

/// Embedder backed by the HuggingFace feature-extraction pipeline.
#[derive(Clone)]
pub struct HuggingFaceEmbedder {
    model: String,
    api_key: Option<String>,
    base_url: String,
}

impl Default for HuggingFaceEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

impl HuggingFaceEmbedder {
    pub fn new() -> Self {
        Self {
            model: DEFAULT_EMBEDDING_MODEL.to_string(),
            api_key: std::env::var("HUGGINGFACEHUB_API_TOKEN").ok(),
            base_url: DEFAULT_EMBEDDING_BASE_URL.to_string(),
        }
    }

    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_api_key<S: Into<String>>(mut self, api_key: S) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn url(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), self.model)
    }
}

#[async_trait]
impl Embedder for HuggingFaceEmbedder {
    async fn embed_documents(&self, documents: &[String]) -> Result<Vec<Vec<f64>>, EmbedderError> {
        if documents.is_empty() {
            return Ok(Vec::new());
        }

        let url = self.url();
        log::debug!("Embedding {} texts with {}", documents.len(), url);
        let mut request = Client::new()
            .post(&url)
            .json(&FeatureExtractionPayload { inputs: documents });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let res = request.send().await?;
        let status = res.status().as_u16();
        if status != 200 {
            let message = res
                .text()
                .await
                .unwrap_or_else(|_| format!("HTTP {}", status));
            return Err(EmbedderError::HttpStatus { status, message });
        }

        let vectors: Vec<Vec<f64>> = res.json().await?;
        if vectors.len() != documents.len() {
            return Err(EmbedderError::CountMismatch {
                expected: documents.len(),
                got: vectors.len(),
            });
        }
        Ok(vectors)
    }

    async fn embed_query(&self, text: &str) -> Result<Vec<f64>, EmbedderError> {
        let mut vectors = self.embed_documents(&[text.to_string()]).await?;
        Ok(vectors.pop().unwrap_or_default())
    }
}
