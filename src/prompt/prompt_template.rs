use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::Value;

use crate::schemas::Message;

use super::{PromptError, ResponseStyle};

pub type PromptArgs = HashMap<String, Value>;

// A placeholder is `{` followed by an identifier and `}`.
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("placeholder pattern is valid"));

/// Builds a [`PromptArgs`] map from `"key" => value` pairs.
#[macro_export]
macro_rules! prompt_args {
    ( $($key:expr => $value:expr),* $(,)? ) => {
        {
            #[allow(unused_mut)]
            let mut args = $crate::prompt::PromptArgs::new();
            $(
                args.insert($key.to_string(), serde_json::json!($value));
            )*
            args
        }
    };
}

/// A text template with `{name}` placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptTemplate {
    template: String,
    variables: Vec<String>,
}

impl PromptTemplate {
    pub fn new<S: Into<String>>(template: S) -> Self {
        let template = template.into();
        let variables = extract_variables(&template);
        Self {
            template,
            variables,
        }
    }

    /// Placeholder names in order of first appearance.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Replaces every placeholder with its value from `args`. String values
    /// are inserted verbatim, anything else as JSON text.
    ///
    /// Substitution is a single pass over the template, so braces inside the
    /// inserted values are left alone.
    pub fn format(&self, args: &PromptArgs) -> Result<String, PromptError> {
        if let Some(missing) = self.variables.iter().find(|v| !args.contains_key(*v)) {
            return Err(PromptError::MissingVariable(missing.clone()));
        }
        let out = PLACEHOLDER.replace_all(&self.template, |caps: &Captures| {
            match args.get(&caps[1]) {
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => String::new(),
            }
        });
        Ok(out.into_owned())
    }
}

fn extract_variables(template: &str) -> Vec<String> {
    let mut variables: Vec<String> = Vec::new();
    for caps in PLACEHOLDER.captures_iter(template) {
        let name = &caps[1];
        if !variables.iter().any(|v| v == name) {
            variables.push(name.to_string());
        }
    }
    variables
}

/// Assembles the conversation sent to the model: the style's system prompt
/// filled with `context` and `input`, the prior `history`, then `input` as a
/// human message.
pub fn build_messages(
    style: ResponseStyle,
    context: &str,
    input: &str,
    history: &[Message],
) -> Result<Vec<Message>, PromptError> {
    let system = style.template().format(&crate::prompt_args! {
        "context" => context,
        "input" => input,
    })?;

    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(Message::new_system_message(system));
    messages.extend(history.iter().cloned());
    messages.push(Message::new_human_message(input));
    Ok(messages)
}
