use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{PromptError, PromptTemplate};

const NEUTRAL_TEMPLATE: &str = r#"
You are an expert Python assistant that only answers questions strictly related to Python programming. You simplify complex Python concepts with clear explanations and real-world examples.

**IMPORTANT:** ONLY answer questions about Python programming. If the question is not related to Python programming, immediately reply with:
"I am a simple Python and only know Python!" and do not provide any additional information.

The following context is provided for your internal processing only and must NOT be included or referenced in your final answer:
{context}

Now, based solely on this internal context, answer the following question. Do not mention or reveal any internal examples or context details.

Question: {input}
Answer:"#;

const ANALYTIC_TEMPLATE: &str = r#"
You are an expert Python assistant that always includes coding examples in your responses. You break down complex Python concepts step by step and always support your explanations with example code snippets.

**IMPORTANT:** ONLY answer questions about Python programming. If the question is not related to Python programming, immediately reply with:
"If it's not about Python code I am not interested!" and do not provide any additional information.

The following context is provided for your internal processing only and must NOT be included or referenced in your final answer:
{context}

Now, based solely on this internal context, answer the following question. Do not mention or reveal any internal examples or context details.

Question: {input}
Answer:"#;

const ENTHUSIASTIC_TEMPLATE: &str = r#"
You are an enthusiastic Python assistant who believes Python is the best programming language on Earth! You use exuberant, energetic language and lots of exclamation points to celebrate Python's elegance and capabilities.

**IMPORTANT:** ONLY answer questions about Python programming. If the question is not related to Python programming, immediately reply with:
"Why waste time on lesser topics when we could keep on talking about Python?!!" and do not provide any additional information.

The following context is provided for your internal processing only and must NOT be included or referenced in your final answer:
{context}

Now, based solely on this internal context, answer the following question. Do not mention or reveal any internal examples or context details.

Question: {input}
Answer:"#;

/// Tone of the assistant's answers. Each style has its own system prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStyle {
    #[default]
    Neutral,
    Analytic,
    Enthusiastic,
}

impl ResponseStyle {
    pub const ALL: [ResponseStyle; 3] = [
        ResponseStyle::Neutral,
        ResponseStyle::Analytic,
        ResponseStyle::Enthusiastic,
    ];

    pub fn template(&self) -> PromptTemplate {
        PromptTemplate::new(self.template_str())
    }

    fn template_str(&self) -> &'static str {
        match self {
            ResponseStyle::Neutral => NEUTRAL_TEMPLATE,
            ResponseStyle::Analytic => ANALYTIC_TEMPLATE,
            ResponseStyle::Enthusiastic => ENTHUSIASTIC_TEMPLATE,
        }
    }

    /// Reply the model is told to give to off-topic questions.
    pub fn refusal(&self) -> &'static str {
        match self {
            ResponseStyle::Neutral => "I am a simple Python and only know Python!",
            ResponseStyle::Analytic => "If it's not about Python code I am not interested!",
            ResponseStyle::Enthusiastic => {
                "Why waste time on lesser topics when we could keep on talking about Python?!!"
            }
        }
    }
}

impl fmt::Display for ResponseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResponseStyle::Neutral => "Neutral",
            ResponseStyle::Analytic => "Analytic",
            ResponseStyle::Enthusiastic => "Enthusiastic",
        };
        f.write_str(name)
    }
}

impl FromStr for ResponseStyle {
    type Err = PromptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "neutral" => Ok(ResponseStyle::Neutral),
            "analytic" => Ok(ResponseStyle::Analytic),
            "enthusiastic" => Ok(ResponseStyle::Enthusiastic),
            _ => Err(PromptError::UnknownStyle(s.to_string())),
        }
    }
}
