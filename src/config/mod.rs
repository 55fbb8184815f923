//! Runtime settings: defaults, environment overrides and an optional TOML
//! file (behind the `toml` feature).

mod error;
pub use error::*;

mod settings;
pub use settings::*;
