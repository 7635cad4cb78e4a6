//! Response generators.
//!
//! A generator is the pluggable strategy that turns a prompt into response
//! text for one backend. The reference generator matches the prompt against
//! an ordered table of canned topic responses; the others use fixed
//! templates. Behavioral parity with these tables is a contract, so the
//! texts are reproduced verbatim.

/// Produces response text for a prompt. Pure and synchronous; latency is the
/// registry's concern.
pub trait ResponseGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> String;
}

/// Placeholder substituted into fallback and fixed templates.
const PROMPT_SLOT: &str = "{prompt}";

/// Ordered table of canned topic responses with a templated fallback.
///
/// The prompt is lowercased and each entry's needle is matched by substring,
/// first match in table order wins. When nothing matches, the fallback
/// template is returned with `{prompt}` replaced by the original prompt.
pub struct CannedResponseGenerator {
    entries: Vec<(String, String)>,
    fallback: String,
}

impl CannedResponseGenerator {
    /// Builds a generator from `(needle, response)` pairs evaluated in order.
    ///
    /// Needles are lowercased once here so matching stays case-insensitive.
    pub fn new(
        entries: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
        fallback: impl Into<String>,
    ) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(needle, response)| (needle.into().to_lowercase(), response.into()))
                .collect(),
            fallback: fallback.into(),
        }
    }

    /// The reference table used by the default simulated backend.
    pub fn claude_sonnet() -> Self {
        Self::new(
            [
                (
                    "what is the capital of the uk",
                    "The capital of the United Kingdom is London. London is not only the political capital but also the largest city in the UK, serving as the center of government, finance, and culture. It's home to important institutions like the Houses of Parliament, Buckingham Palace, and the Bank of England.",
                ),
                (
                    "explain machine learning",
                    "Machine learning is a subset of artificial intelligence (AI) that enables computers to learn and make decisions from data without being explicitly programmed for every scenario. Think of it like teaching a computer to recognize patterns - just as you might learn to recognize spam emails by seeing many examples, machine learning algorithms can identify patterns in data and make predictions or decisions based on those patterns. Common applications include recommendation systems, image recognition, and natural language processing.",
                ),
                (
                    "python fibonacci",
                    "Here's a Python function to calculate Fibonacci numbers:\n\n```python\ndef fibonacci(n):\n    \"\"\"Calculate the nth Fibonacci number.\"\"\"\n    if n <= 0:\n        return 0\n    elif n == 1:\n        return 1\n    else:\n        a, b = 0, 1\n        for _ in range(2, n + 1):\n            a, b = b, a + b\n        return b\n\n# Example usage:\nprint(fibonacci(10))  # Output: 55\n```\n\nThis function uses an iterative approach which is efficient for larger numbers. The Fibonacci sequence starts with 0, 1, and each subsequent number is the sum of the two preceding ones.",
                ),
                (
                    "cloud computing benefits",
                    "Cloud computing offers several key benefits:\n\n1. **Cost Efficiency**: Reduces capital expenditure on hardware and infrastructure\n2. **Scalability**: Easily scale resources up or down based on demand\n3. **Accessibility**: Access applications and data from anywhere with internet\n4. **Reliability**: Built-in redundancy and backup systems\n5. **Security**: Enterprise-grade security measures and compliance\n6. **Automatic Updates**: Software and security updates handled automatically\n7. **Collaboration**: Enhanced team collaboration with shared resources\n8. **Disaster Recovery**: Built-in backup and recovery capabilities\n\nThese advantages make cloud computing an attractive option for businesses of all sizes.",
                ),
            ],
            "I understand you're asking about: \"{prompt}\"\n\nAs Claude 3 Sonnet, I'm designed to provide helpful, accurate, and thoughtful responses. While I don't have access to real-time information, I can help you with a wide range of topics including analysis, writing, coding, math, and creative tasks. Could you provide more specific details about what you'd like to know or accomplish?",
        )
    }
}

impl ResponseGenerator for CannedResponseGenerator {
    fn generate(&self, prompt: &str) -> String {
        let key = prompt.to_lowercase();
        for (needle, response) in &self.entries {
            if key.contains(needle) {
                return response.clone();
            }
        }
        self.fallback.replace(PROMPT_SLOT, prompt)
    }
}

/// A fixed template with `{prompt}` substitution, for simpler backends.
pub struct TemplateGenerator {
    template: String,
}

impl TemplateGenerator {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Fixed template used by the simulated Haiku backend.
    pub fn claude_haiku() -> Self {
        Self::new(
            "As Claude 3 Haiku, I provide quick and efficient responses. For your query: \"{prompt}\"\n\nI'm optimized for speed while maintaining quality. I can help with various tasks including summarization, basic analysis, and straightforward questions. What specific assistance do you need?",
        )
    }

    /// Fixed template used by the simulated Titan backend.
    pub fn titan_express() -> Self {
        Self::new(
            "Amazon Titan Text Express responding to: \"{prompt}\"\n\nI'm designed to provide reliable text generation and analysis. I can assist with content creation, summarization, and text processing tasks. How can I help you today?",
        )
    }
}

impl ResponseGenerator for TemplateGenerator {
    fn generate(&self, prompt: &str) -> String {
        self.template.replace(PROMPT_SLOT, prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canned_match_is_case_insensitive() {
        let generator = CannedResponseGenerator::claude_sonnet();
        let response = generator.generate("What is the capital of the UK?");
        assert!(response.starts_with("The capital of the United Kingdom is London."));
        assert_eq!(response, generator.generate("WHAT IS THE CAPITAL OF THE UK"));
    }

    #[test]
    fn test_first_match_in_table_order_wins() {
        let generator = CannedResponseGenerator::new(
            [("hello", "first"), ("hello world", "second")],
            "fallback: {prompt}",
        );
        assert_eq!(generator.generate("hello world"), "first");
    }

    #[test]
    fn test_fallback_echoes_the_prompt() {
        let generator = CannedResponseGenerator::claude_sonnet();
        let response = generator.generate("asdkjalksd");
        assert!(response.contains("asdkjalksd"));
        assert!(response.contains("Claude 3 Sonnet"));
    }

    #[test]
    fn test_template_substitutes_prompt() {
        let generator = TemplateGenerator::titan_express();
        let response = generator.generate("summarize this");
        assert!(response.contains("\"summarize this\""));
        assert!(response.starts_with("Amazon Titan Text Express"));
    }
}
