use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum PromptError {
    #[error("Variable {0} is missing from input variables")]
    MissingVariable(String),

    #[error("Unknown response style: {0}")]
    UnknownStyle(String),
}
