//! Ephemeral invocation value objects.
//!
//! A request goes in, a result comes out; neither outlives the message it
//! produces.

use serde::{Deserialize, Serialize};

use crate::session::InvocationSettings;

/// One request to a text-generation backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationRequest {
    pub model_id: String,
    pub prompt: String,
    pub settings: InvocationSettings,
}

/// The outcome of a successful invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationResult {
    pub content: String,
    /// Human-readable label of the model that actually answered.
    pub model: String,
    /// Identifier of the model that actually answered (after any fallback).
    pub model_id: String,
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Approximate, deterministic token accounting: one token per four characters.
pub fn approx_token_count(text: &str) -> u32 {
    (text.chars().count() / 4) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_count_rounds_down() {
        assert_eq!(approx_token_count(""), 0);
        assert_eq!(approx_token_count("abc"), 0);
        assert_eq!(approx_token_count("abcd"), 1);
        assert_eq!(approx_token_count("What is the capital of the UK?"), 7);
    }

    #[test]
    fn test_token_count_uses_characters_not_bytes() {
        // Four two-byte characters still make exactly one token.
        assert_eq!(approx_token_count("éééé"), 1);
    }
}
