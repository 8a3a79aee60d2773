//! Model client adapter for the external completion provider
//!
//! All interaction with the provider lives behind the [`ReviewModel`] trait
//! so the orchestrator can be driven by a test double with no environment
//! coupling. [`ModelClient`] is the real implementation: one chat-completion
//! request per review against an OpenAI-compatible endpoint, constructed
//! deterministically from an injected [`ModelConfig`].

pub mod prompt;
pub mod wire;

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::config::ModelConfig;
use crate::review::ReviewOutput;
use crate::{Error, Result};

use wire::{ChatMessage, ChatRequest, ChatResponse, ResponseFormat};

/// Known-deprecated model identifiers
///
/// A configured identifier in this list is substituted with the fallback
/// model instead of failing the review.
const DEPRECATED_MODELS: &[&str] = &["llama3-8b-8192"];

/// Capability interface for generating one review
#[async_trait]
pub trait ReviewModel: Send + Sync {
    /// Generate a fully-populated review output for the given submission
    async fn generate_review(&self, code: &str, language: &str) -> Result<ReviewOutput>;
}

/// HTTP client for the completion provider
///
/// Immutable after construction; share one instance across concurrent
/// requests via `Arc`.
pub struct ModelClient {
    http: reqwest::Client,
    config: ModelConfig,
}

impl ModelClient {
    /// Create a client from explicit configuration
    ///
    /// Construction is deterministic from the configuration alone and makes
    /// no network calls. The request timeout is applied only when configured.
    pub fn new(config: ModelConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();

        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let http = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        info!(
            base_url = %config.base_url,
            model = config.model.as_deref().unwrap_or("(fallback)"),
            "Created model client"
        );

        Ok(Self { http, config })
    }

    /// The model identifier that will be requested
    pub fn resolved_model(&self) -> &str {
        resolve_model(self.config.model.as_deref(), &self.config.fallback_model)
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

impl std::fmt::Debug for ModelClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelClient")
            .field("base_url", &self.config.base_url)
            .field("model", &self.config.model)
            .finish_non_exhaustive()
    }
}

/// Resolve the model identifier to request
///
/// Order: explicit override, else the fallback; a known-deprecated override
/// is substituted with the fallback rather than failing.
fn resolve_model<'a>(configured: Option<&'a str>, fallback: &'a str) -> &'a str {
    match configured {
        Some(model) if DEPRECATED_MODELS.contains(&model) => {
            warn!(
                model,
                fallback, "Configured model is deprecated, substituting fallback"
            );
            fallback
        }
        Some(model) => model,
        None => fallback,
    }
}

#[async_trait]
impl ReviewModel for ModelClient {
    async fn generate_review(&self, code: &str, language: &str) -> Result<ReviewOutput> {
        // Fail fast before any network I/O
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            Error::Config(
                "Model API key is not configured. Set CODEREV_API_KEY \
                 or add it to ~/.config/coderev/secrets.toml"
                    .to_string(),
            )
        })?;

        let model = self.resolved_model();
        let user_message = prompt::user_content(code, language);

        let request = ChatRequest {
            model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: prompt::SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &user_message,
                },
            ],
            temperature: 0.2,
            response_format: ResponseFormat::json_object(),
            stream: false,
        };

        debug!(model, language, code_bytes = code.len(), "Requesting review");

        // Exactly one request per review: no retry, no streaming
        let response = self
            .http
            .post(self.completions_url())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!(
                "completion request returned {}: {}",
                status, body
            )));
        }

        let content = response
            .json::<ChatResponse>()
            .await?
            .into_content()
            .filter(|content| !content.trim().is_empty())
            .ok_or(Error::EmptyModelResponse)?;

        ReviewOutput::from_model_response(&content)
    }
}
