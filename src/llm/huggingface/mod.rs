pub mod client;
pub mod error;
pub mod models;

pub use client::HuggingFace;
pub use error::HuggingFaceError;
