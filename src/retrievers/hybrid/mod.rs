//! Hybrid retrievers
//!
//! These retrievers combine results from multiple retrievers.

mod combined_retriever;
pub use combined_retriever::*;
