//! Prompt templates and message assembly.

mod error;
pub use error::*;

mod prompt_template;
pub use prompt_template::*;

mod response_style;
pub use response_style::*;
