//! # chatty-python
//!
//! A retrieval-augmented assistant for Python programming questions.
//!
//! Two local similarity indexes (worked examples and answered questions) are
//! queried through a [`retrievers::CombinedRetriever`], which concatenates
//! their rankings and drops duplicate content. The `example`/`answer`
//! metadata of the retrieved documents becomes the context block of a
//! prompt sent to a hosted HuggingFace text-generation model.
//!
//! ## Example
//!
//! ```ignore
//! use chatty_python::{chain::{ChatSession, ChattyPython}, config::Settings};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let bot = ChattyPython::from_settings(&Settings::from_env()).await?;
//! let turn = bot.respond(ChatSession::new(), "How do I reverse a list?").await?;
//! println!("{}", turn.answer);
//! # Ok(()) }
//! ```

/// The answer pipeline, chat sessions and context-block construction.
pub mod chain;
/// Settings from defaults, the environment and TOML.
pub mod config;
/// Embedding models.
pub mod embedding;
/// Unified error types.
pub mod error;
/// Common LLM traits and options.
pub mod language_models;
/// LLM implementations.
pub mod llm;
/// Prompt templates and response styles.
pub mod prompt;
/// Retrievers, including the combined retriever.
pub mod retrievers;
/// Documents, messages and the retriever trait.
pub mod schemas;
/// Vector stores.
pub mod vectorstore;

/// Type alias for document list
pub type Documents = Vec<crate::schemas::Document>;

/// Type alias for message list
pub type Messages = Vec<crate::schemas::Message>;
