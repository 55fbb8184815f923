use serde::{Deserialize, Serialize};

use crate::{prompt::ResponseStyle, schemas::Message};

/// Default sampling temperature for a new session.
pub const DEFAULT_TEMPERATURE: f32 = 0.01;

/// One user's conversation with the assistant.
///
/// The application owns the session. It is handed to
/// [`ChattyPython::respond`](super::ChattyPython::respond) by value and
/// returned with the new turn appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    pub messages: Vec<Message>,
    pub temperature: f32,
    /// Answer every question with a hiss instead of calling the model.
    pub hiss_mode: bool,
    pub response_style: ResponseStyle,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            temperature: DEFAULT_TEMPERATURE,
            hiss_mode: false,
            response_style: ResponseStyle::default(),
        }
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_hiss_mode(mut self, hiss_mode: bool) -> Self {
        self.hiss_mode = hiss_mode;
        self
    }

    pub fn with_response_style(mut self, response_style: ResponseStyle) -> Self {
        self.response_style = response_style;
        self
    }

    /// Forgets the conversation; options are kept.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
