use async_trait::async_trait;
use reqwest::Client;

use crate::{
    language_models::{llm::LLM, options::CallOptions, GenerateResult, LLMError},
    llm::HuggingFaceError,
    schemas::{Message, MessageType},
};

use super::models::{ApiResponse, GenerationParameters, Payload};

pub const DEFAULT_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.3";
pub const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co/models";

/// Parse error from response and return appropriate HuggingFaceError
fn parse_error_response(status: u16, message: &str) -> LLMError {
    match status {
        400 => {
            LLMError::HuggingFaceError(HuggingFaceError::InvalidParameterError(message.to_string()))
        }
        401 => {
            LLMError::HuggingFaceError(HuggingFaceError::InvalidApiKeyError(message.to_string()))
        }
        404 => {
            LLMError::HuggingFaceError(HuggingFaceError::ModelNotFoundError(message.to_string()))
        }
        429 => LLMError::HuggingFaceError(HuggingFaceError::RateLimitError(message.to_string())),
        500 => LLMError::HuggingFaceError(HuggingFaceError::InternalError(message.to_string())),
        503 => {
            LLMError::HuggingFaceError(HuggingFaceError::ModelUnavailableError(message.to_string()))
        }
        _ => LLMError::HuggingFaceError(HuggingFaceError::SystemError(message.to_string())),
    }
}

/// Client for the HuggingFace text-generation inference endpoint.
#[derive(Clone)]
pub struct HuggingFace {
    model: String,
    options: CallOptions,
    api_key: Option<String>,
    base_url: String,
}

impl std::fmt::Debug for HuggingFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HuggingFace")
            .field("model", &self.model)
            .field("options", &self.options)
            .field("api_key", &self.api_key.as_ref().map(|_| "..."))
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Default for HuggingFace {
    fn default() -> Self {
        Self::new()
    }
}

impl HuggingFace {
    /// Create a new client with the default model, `top_p = 0.95` and
    /// `repetition_penalty = 1.03`.
    pub fn new() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            options: CallOptions::new()
                .with_top_p(0.95)
                .with_repetition_penalty(1.03),
            api_key: std::env::var("HUGGINGFACEHUB_API_TOKEN").ok(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Set the model
    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = model.into();
        self
    }

    /// Merge call options into the current ones
    pub fn with_options(mut self, options: CallOptions) -> Self {
        self.options.merge_options(options);
        self
    }

    /// Set API key
    pub fn with_api_key<S: Into<String>>(mut self, api_key: S) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the base URL
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn options(&self) -> &CallOptions {
        &self.options
    }

    /// Builds the API payload from messages
    fn build_payload(&self, messages: &[Message]) -> Payload {
        let mut input = messages
            .iter()
            .map(|m| {
                let prefix = match &m.message_type {
                    MessageType::SystemMessage => "System: ",
                    MessageType::AIMessage => "Assistant: ",
                    MessageType::HumanMessage => "User: ",
                };
                format!("{}{}", prefix, m.content)
            })
            .collect::<Vec<_>>()
            .join("\n");
        input.push_str("\nAssistant:");

        let parameters = GenerationParameters {
            max_new_tokens: self.options.max_tokens,
            temperature: self.options.temperature,
            top_p: self.options.top_p,
            top_k: self.options.top_k.map(|k| k as u32),
            repetition_penalty: self.options.repetition_penalty,
            do_sample: self.options.temperature.map(|_| true),
            stop: self.options.stop_words.clone(),
            return_full_text: false,
        };

        Payload {
            inputs: input,
            parameters,
        }
    }
}

#[async_trait]
impl LLM for HuggingFace {
    async fn generate(&self, messages: &[Message]) -> Result<GenerateResult, LLMError> {
        let payload = self.build_payload(messages);

        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), self.model);
        log::debug!("Sending {} messages to {}", messages.len(), url);
        let mut request = Client::new().post(&url).json(&payload);

        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {}", key));
        }

        let res = request.send().await?;

        match res.status().as_u16() {
            200 => {
                let api_response: Vec<ApiResponse> = res.json().await?;
                let generation = api_response
                    .into_iter()
                    .next()
                    .map(|r| r.generated_text.trim().to_string())
                    .ok_or_else(|| LLMError::ContentNotFound("[0].generated_text".to_string()))?;

                Ok(GenerateResult {
                    tokens: None,
                    generation,
                })
            }
            status => {
                let error_message = res
                    .text()
                    .await
                    .unwrap_or_else(|_| format!("HTTP {}", status));
                Err(parse_error_response(status, &error_message))
            }
        }
    }

    fn add_options(&mut self, options: CallOptions) {
        self.options.merge_options(options)
    }
}
