//! Classification requests and their chat-message rendering.

/// System instruction sent with every classification request.
pub const SYSTEM_PROMPT: &str = "You are monitoring a system log for security risks.";

/// A request to classify one tail excerpt. Built fresh per growth event.
#[derive(Debug, Clone)]
pub struct ClassificationRequest {
    /// System-level context for the provider.
    pub prompt_context: String,
    /// The tail excerpt to judge.
    pub sample_text: String,
}

impl ClassificationRequest {
    /// Create a request for the given excerpt with the default context.
    pub fn new(sample_text: impl Into<String>) -> Self {
        Self {
            prompt_context: SYSTEM_PROMPT.to_string(),
            sample_text: sample_text.into(),
        }
    }

    /// Render the user message: excerpt plus the Yes/No instruction with a
    /// bounded explanation when risk is found.
    pub fn user_message(&self) -> String {
        format!(
            "{} Only respond with 'Yes' or 'No'. If the text contains any \
             information useful to an attacker, answer Yes and explain in \
             20 to 100 words; otherwise answer No only.",
            self.sample_text
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_embeds_sample() {
        let request = ClassificationRequest::new("admin:password123");
        assert_eq!(request.prompt_context, SYSTEM_PROMPT);

        let message = request.user_message();
        assert!(message.starts_with("admin:password123"));
        assert!(message.contains("'Yes' or 'No'"));
    }
}
