use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;

use crate::{
    chain::DEFAULT_TEMPERATURE,
    embedding::{DEFAULT_EMBEDDING_BASE_URL, DEFAULT_EMBEDDING_MODEL},
    llm::huggingface::client::{DEFAULT_BASE_URL, DEFAULT_MODEL},
};

use super::ConfigError;

/// Environment variable holding the HuggingFace token.
pub const TOKEN_ENV: &str = "HUGGING_TOKEN";
/// Fallback token variable used by the HuggingFace tooling.
pub const FALLBACK_TOKEN_ENV: &str = "HUGGINGFACEHUB_API_TOKEN";
pub const EXAMPLE_INDEX_ENV: &str = "CHATTY_PYTHON_EXAMPLE_INDEX";
pub const QUESTION_INDEX_ENV: &str = "CHATTY_PYTHON_QUESTION_INDEX";

/// Everything needed to assemble the assistant.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub llm_model: String,
    pub embedding_model: String,
    pub inference_base_url: String,
    pub embedding_base_url: String,
    pub example_index_path: PathBuf,
    pub question_index_path: PathBuf,
    pub example_top_k: usize,
    pub question_top_k: usize,
    pub temperature: f32,
    pub top_p: f32,
    pub repetition_penalty: f32,
    pub max_new_tokens: Option<u32>,
    #[serde(skip)]
    pub huggingface_token: Option<SecretString>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            llm_model: DEFAULT_MODEL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            inference_base_url: DEFAULT_BASE_URL.to_string(),
            embedding_base_url: DEFAULT_EMBEDDING_BASE_URL.to_string(),
            example_index_path: PathBuf::from("content/e_faiss_index"),
            question_index_path: PathBuf::from("content/q_faiss_index"),
            example_top_k: 1,
            question_top_k: 2,
            temperature: DEFAULT_TEMPERATURE,
            top_p: 0.95,
            repetition_penalty: 1.03,
            max_new_tokens: None,
            huggingface_token: None,
        }
    }
}

impl Settings {
    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Self {
        Self::default().with_env(|key| std::env::var(key).ok())
    }

    /// Overlays values looked up through `lookup`, an environment accessor.
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(TOKEN_ENV)
            .or_else(|| lookup(FALLBACK_TOKEN_ENV))
            .filter(|t| !t.trim().is_empty());
        if let Some(token) = token {
            self.huggingface_token = Some(SecretString::from(token));
        }
        if let Some(path) = lookup(EXAMPLE_INDEX_ENV) {
            self.example_index_path = PathBuf::from(path);
        }
        if let Some(path) = lookup(QUESTION_INDEX_ENV) {
            self.question_index_path = PathBuf::from(path);
        }
        self
    }

    #[cfg(feature = "toml")]
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Reads a TOML file and overlays the process environment on top.
    #[cfg(feature = "toml")]
    pub fn from_toml_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&raw)?.with_env(|key| std::env::var(key).ok()))
    }

    pub fn token(&self) -> Option<&str> {
        self.huggingface_token
            .as_ref()
            .map(|t| t.expose_secret())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(ConfigError::Invalid(format!(
                "temperature must be within [0, 1], got {}",
                self.temperature
            )));
        }
        if !(self.top_p > 0.0 && self.top_p <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "top_p must be within (0, 1], got {}",
                self.top_p
            )));
        }
        if self.example_top_k == 0 || self.question_top_k == 0 {
            return Err(ConfigError::Invalid("top-k values must be positive".into()));
        }
        for (name, value) in [
            ("inference_base_url", &self.inference_base_url),
            ("embedding_base_url", &self.embedding_base_url),
        ] {
            Url::parse(value)
                .map_err(|e| ConfigError::Invalid(format!("{} {:?}: {}", name, value, e)))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert_eq!(settings.example_top_k, 1);
        assert_eq!(settings.question_top_k, 2);
        assert_eq!(settings.llm_model, "mistralai/Mistral-7B-Instruct-v0.3");
        assert!(settings.token().is_none());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_env_overlay() {
        let settings = Settings::default().with_env(env(&[
            (FALLBACK_TOKEN_ENV, "hf_fallback"),
            (QUESTION_INDEX_ENV, "/data/q"),
        ]));
        assert_eq!(settings.token(), Some("hf_fallback"));
        assert_eq!(settings.question_index_path, PathBuf::from("/data/q"));
        assert_eq!(settings.example_index_path, PathBuf::from("content/e_faiss_index"));

        let settings = Settings::default().with_env(env(&[
            (TOKEN_ENV, "hf_primary"),
            (FALLBACK_TOKEN_ENV, "hf_fallback"),
        ]));
        assert_eq!(settings.token(), Some("hf_primary"));
    }

    #[test]
    fn test_token_is_redacted_in_debug() {
        let settings = Settings::default().with_env(env(&[(TOKEN_ENV, "hf_secret")]));
        assert!(!format!("{:?}", settings).contains("hf_secret"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let settings = Settings {
            temperature: 1.5,
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(ConfigError::Invalid(_))));

        let settings = Settings {
            question_top_k: 0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());

        let settings = Settings {
            inference_base_url: "not a url".to_string(),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_from_toml_str_fills_defaults() {
        let settings = Settings::from_toml_str(
            r#"
            temperature = 0.4
            example_index_path = "indexes/examples"
            "#,
        )
        .unwrap();
        assert_eq!(settings.temperature, 0.4);
        assert_eq!(settings.example_index_path, PathBuf::from("indexes/examples"));
        assert_eq!(settings.question_top_k, 2);
    }
}
