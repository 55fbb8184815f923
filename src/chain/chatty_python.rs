use std::sync::Arc;

use crate::{
    config::Settings,
    embedding::{Embedder, HuggingFaceEmbedder},
    language_models::{llm::LLM, options::CallOptions, LLMError},
    llm::HuggingFace,
    prompt::build_messages,
    retrievers::{CombinedRetriever, VectorStoreRetriever},
    schemas::{Document, Message, Retriever},
    vectorstore::in_memory::Store,
};

use super::{build_context, ChainError, ChatSession, DEFAULT_TEMPERATURE};

/// Fixed reply while hiss mode is on.
pub const HISS_RESPONSE: &str = "Hisssssss...";

const CONDENSE_QUESTION_PROMPT: &str = "Given a chat history and the latest user question \
which might reference context in the chat history, formulate a standalone question which \
can be understood without the chat history. Do NOT answer the question, just reformulate \
it if needed and otherwise return it as is.";

/// Result of one exchange with the assistant.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    /// The session with the question and the answer appended.
    pub session: ChatSession,
    pub answer: String,
    /// Documents the answer was grounded on; empty in hiss mode or when the
    /// model failed before retrieval.
    pub source_documents: Vec<Document>,
}

/// Retrieval-augmented Python assistant.
///
/// Each question is optionally rewritten into a standalone question using
/// the chat history, sent to the retriever, and answered by the model with
/// the retrieved metadata as context.
pub struct ChattyPython {
    llm: Box<dyn LLM>,
    retriever: Arc<dyn Retriever>,
    rephrase_question: bool,
    temperature: f32,
}

impl ChattyPython {
    /// Assembles the assistant described by `settings`: the examples and
    /// questions indexes behind a [`CombinedRetriever`], answered by the
    /// HuggingFace inference endpoint.
    pub async fn from_settings(settings: &Settings) -> Result<Self, ChainError> {
        settings.validate()?;

        let mut embedder = HuggingFaceEmbedder::new()
            .with_model(settings.embedding_model.clone())
            .with_base_url(settings.embedding_base_url.clone());
        let mut llm = HuggingFace::new()
            .with_model(settings.llm_model.clone())
            .with_base_url(settings.inference_base_url.clone());
        if let Some(token) = settings.token() {
            embedder = embedder.with_api_key(token);
            llm = llm.with_api_key(token);
        }
        let mut options = CallOptions::new()
            .with_temperature(settings.temperature)
            .with_top_p(settings.top_p)
            .with_repetition_penalty(settings.repetition_penalty);
        if let Some(max_tokens) = settings.max_new_tokens {
            options = options.with_max_tokens(max_tokens);
        }
        let llm = llm.with_options(options);

        let embedder: Arc<dyn Embedder> = Arc::new(embedder);
        let examples = Store::load_local(&settings.example_index_path, embedder.clone())?;
        let questions = Store::load_local(&settings.question_index_path, embedder)?;

        let retrievers: Vec<Arc<dyn Retriever>> = vec![
            Arc::new(VectorStoreRetriever::new(
                Arc::new(examples),
                settings.example_top_k,
            )),
            Arc::new(VectorStoreRetriever::new(
                Arc::new(questions),
                settings.question_top_k,
            )),
        ];

        ChattyPythonBuilder::new()
            .llm(llm)
            .retriever(Arc::new(CombinedRetriever::new(retrievers)))
            .temperature(settings.temperature)
            .build()
    }

    /// Starts an empty session at the configured temperature.
    pub fn new_session(&self) -> ChatSession {
        ChatSession::new().with_temperature(self.temperature)
    }

    /// Answers `input` within `session` and returns the updated session.
    ///
    /// The session's temperature overrides the model's for this turn; use
    /// [`ChattyPython::new_session`] to start from the configured one.
    ///
    /// Retriever failures abort the turn. Model failures are reported to the
    /// user as the answer text, like any other reply.
    pub async fn respond(
        &self,
        mut session: ChatSession,
        input: &str,
    ) -> Result<ChatTurn, ChainError> {
        let history = session.messages.clone();
        session.messages.push(Message::new_human_message(input));

        let (answer, source_documents) = if session.hiss_mode {
            (HISS_RESPONSE.to_string(), Vec::new())
        } else {
            let mut llm = self.llm.clone_box();
            llm.add_options(CallOptions::new().with_temperature(session.temperature));
            self.answer(llm.as_ref(), &session, &history, input).await?
        };

        session.messages.push(Message::new_ai_message(&answer));
        Ok(ChatTurn {
            session,
            answer,
            source_documents,
        })
    }

    async fn answer(
        &self,
        llm: &dyn LLM,
        session: &ChatSession,
        history: &[Message],
        input: &str,
    ) -> Result<(String, Vec<Document>), ChainError> {
        let query = match self.search_query(llm, history, input).await {
            Ok(query) => query,
            Err(e) => return Ok((error_reply(&e), Vec::new())),
        };

        let docs = self.retriever.get_relevant_documents(&query).await?;
        let context = build_context(&docs);
        let messages = build_messages(session.response_style, &context, input, history)?;

        match llm.generate(&messages).await {
            Ok(result) => Ok((result.generation, docs)),
            Err(e) => Ok((error_reply(&e), docs)),
        }
    }

    async fn search_query(
        &self,
        llm: &dyn LLM,
        history: &[Message],
        input: &str,
    ) -> Result<String, LLMError> {
        if !self.rephrase_question || history.is_empty() {
            return Ok(input.to_string());
        }

        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(Message::new_system_message(CONDENSE_QUESTION_PROMPT));
        messages.extend(history.iter().cloned());
        messages.push(Message::new_human_message(input));

        let standalone = llm.generate(&messages).await?.generation;
        let standalone = standalone.trim();
        log::debug!("Condensed question: {}", standalone);
        if standalone.is_empty() {
            Ok(input.to_string())
        } else {
            Ok(standalone.to_string())
        }
    }
}

fn error_reply(e: &LLMError) -> String {
    log::warn!("LLM call failed: {}", e);
    format!("An error occurred: {}", e)
}

pub struct ChattyPythonBuilder {
    llm: Option<Box<dyn LLM>>,
    retriever: Option<Arc<dyn Retriever>>,
    rephrase_question: bool,
    temperature: f32,
}

impl ChattyPythonBuilder {
    pub fn new() -> Self {
        Self {
            llm: None,
            retriever: None,
            rephrase_question: true,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn llm<L: Into<Box<dyn LLM>>>(mut self, llm: L) -> Self {
        self.llm = Some(llm.into());
        self
    }

    pub fn retriever(mut self, retriever: Arc<dyn Retriever>) -> Self {
        self.retriever = Some(retriever);
        self
    }

    /// Whether follow-up questions are rewritten into standalone questions
    /// before retrieval. Defaults to `true`.
    pub fn rephrase_question(mut self, rephrase_question: bool) -> Self {
        self.rephrase_question = rephrase_question;
        self
    }

    /// Temperature of sessions made by [`ChattyPython::new_session`].
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn build(self) -> Result<ChattyPython, ChainError> {
        let llm = self
            .llm
            .ok_or_else(|| ChainError::MissingObject("LLM must be set".into()))?;
        let retriever = self
            .retriever
            .ok_or_else(|| ChainError::MissingObject("Retriever must be set".into()))?;

        Ok(ChattyPython {
            llm,
            retriever,
            rephrase_question: self.rephrase_question,
            temperature: self.temperature,
        })
    }
}

impl Default for ChattyPythonBuilder {
    fn default() -> Self {
        Self::new()
    }
}
