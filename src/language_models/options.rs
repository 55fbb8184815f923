/// Sampling options passed to a language model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallOptions {
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub stop_words: Option<Vec<String>>,
    pub top_k: Option<usize>,
    pub top_p: Option<f32>,
    pub repetition_penalty: Option<f32>,
}

impl CallOptions {
    pub fn new() -> Self {
        CallOptions::default()
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_stop_words(mut self, stop_words: Vec<String>) -> Self {
        self.stop_words = Some(stop_words);
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = Some(top_k);
        self
    }

    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn with_repetition_penalty(mut self, repetition_penalty: f32) -> Self {
        self.repetition_penalty = Some(repetition_penalty);
        self
    }

    /// Overwrites the fields that are set in `incoming_options`; unset
    /// fields keep their current value.
    pub fn merge_options(&mut self, incoming_options: CallOptions) {
        self.max_tokens = incoming_options.max_tokens.or(self.max_tokens);
        self.temperature = incoming_options.temperature.or(self.temperature);
        self.stop_words = incoming_options.stop_words.or(self.stop_words.take());
        self.top_k = incoming_options.top_k.or(self.top_k);
        self.top_p = incoming_options.top_p.or(self.top_p);
        self.repetition_penalty = incoming_options
            .repetition_penalty
            .or(self.repetition_penalty);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_options_keeps_unset_fields() {
        let mut options = CallOptions::new()
            .with_top_p(0.95)
            .with_repetition_penalty(1.03)
            .with_temperature(0.5);

        options.merge_options(CallOptions::new().with_temperature(0.1).with_max_tokens(64));

        assert_eq!(options.temperature, Some(0.1));
        assert_eq!(options.max_tokens, Some(64));
        assert_eq!(options.top_p, Some(0.95));
        assert_eq!(options.repetition_penalty, Some(1.03));
    }
}
