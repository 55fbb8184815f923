//! Retrievers module
//!
//! All retrievers implement the `Retriever` trait from `crate::schemas::Retriever`.

mod error;
pub use error::*;

mod hybrid;
pub use hybrid::*;

mod vector_store_retriever;
pub use vector_store_retriever::*;
