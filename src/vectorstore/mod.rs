mod error;
mod options;

pub mod in_memory;

mod vectorstore;

pub use error::*;
pub use options::*;
pub use vectorstore::*;
