//! Model invocation registry.
//!
//! Maps model identifiers to response generators and performs the call.
//! Unknown identifiers fall back to the configured default model; that is a
//! deliberate policy, not an error. The registry only ever returns values,
//! it never touches session or conversation state.

use portico_core::error::Result;
use portico_core::invocation::{InvocationRequest, InvocationResult, approx_token_count};
use portico_core::PorticoError;

use crate::generate::{CannedResponseGenerator, ResponseGenerator, TemplateGenerator};
use crate::latency::LatencyProfile;

/// Default model identifier for the simulated Bedrock backends.
pub const DEFAULT_MODEL: &str = "anthropic.claude-3-sonnet-20240620-v1:0";
pub const MODEL_CLAUDE_HAIKU: &str = "anthropic.claude-3-haiku-20240620-v1:0";
pub const MODEL_TITAN_EXPRESS: &str = "amazon.titan-text-express-v1";

struct ModelEntry {
    id: String,
    label: String,
    generator: Box<dyn ResponseGenerator>,
}

/// Registry of invocable model backends.
pub struct ModelInvocationRegistry {
    models: Vec<ModelEntry>,
    default_model: String,
    latency: LatencyProfile,
}

impl ModelInvocationRegistry {
    /// Creates an empty registry whose fallback is `default_model`.
    pub fn new(default_model: impl Into<String>) -> Self {
        Self {
            models: Vec::new(),
            default_model: default_model.into(),
            latency: LatencyProfile::Off,
        }
    }

    /// The three simulated Bedrock backends, with realistic random latency.
    pub fn bedrock_simulation() -> Self {
        Self::new(DEFAULT_MODEL)
            .with_latency(LatencyProfile::UniformMs {
                min: 1000,
                max: 4000,
            })
            .register(
                DEFAULT_MODEL,
                "Claude 3 Sonnet",
                CannedResponseGenerator::claude_sonnet(),
            )
            .register(
                MODEL_CLAUDE_HAIKU,
                "Claude 3 Haiku",
                TemplateGenerator::claude_haiku(),
            )
            .register(
                MODEL_TITAN_EXPRESS,
                "Titan Text Express",
                TemplateGenerator::titan_express(),
            )
    }

    /// Registers a backend under `id`.
    pub fn register(
        mut self,
        id: impl Into<String>,
        label: impl Into<String>,
        generator: impl ResponseGenerator + 'static,
    ) -> Self {
        self.models.push(ModelEntry {
            id: id.into(),
            label: label.into(),
            generator: Box::new(generator),
        });
        self
    }

    /// Sets the simulated latency for every invocation.
    pub fn with_latency(mut self, latency: LatencyProfile) -> Self {
        self.latency = latency;
        self
    }

    /// Disables simulated latency; intended for tests.
    pub fn without_latency(self) -> Self {
        self.with_latency(LatencyProfile::Off)
    }

    /// The fallback model identifier.
    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Whether `id` names a registered backend.
    pub fn contains(&self, id: &str) -> bool {
        self.models.iter().any(|entry| entry.id == id)
    }

    /// Registered `(id, label)` pairs, in registration order.
    pub fn models(&self) -> impl Iterator<Item = (&str, &str)> {
        self.models
            .iter()
            .map(|entry| (entry.id.as_str(), entry.label.as_str()))
    }

    /// Invokes the backend for `request.model_id`.
    ///
    /// Unknown identifiers are routed to the default model's generator; the
    /// result then carries the default model's id and label. Token counts
    /// are `floor(chars/4)` on the prompt and the response text.
    ///
    /// # Errors
    ///
    /// `Invocation` when the registry is misconfigured and the fallback
    /// model itself is not registered.
    pub async fn invoke(&self, request: InvocationRequest) -> Result<InvocationResult> {
        let entry = match self.models.iter().find(|entry| entry.id == request.model_id) {
            Some(entry) => entry,
            None => {
                tracing::debug!(
                    model_id = %request.model_id,
                    default = %self.default_model,
                    "unknown model id, falling back to default"
                );
                self.models
                    .iter()
                    .find(|entry| entry.id == self.default_model)
                    .ok_or_else(|| {
                        PorticoError::invocation(format!(
                            "default model '{}' is not registered",
                            self.default_model
                        ))
                    })?
            }
        };

        self.latency.wait().await;

        let content = entry.generator.generate(&request.prompt);
        Ok(InvocationResult {
            input_tokens: approx_token_count(&request.prompt),
            output_tokens: approx_token_count(&content),
            model: entry.label.clone(),
            model_id: entry.id.clone(),
            content,
        })
    }
}
