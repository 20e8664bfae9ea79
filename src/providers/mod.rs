//! Text-generation provider clients used by the drafting path.
//!
//! Defines the [`LlmProvider`] trait and the request/response types shared by
//! the two implementations:
//! - [`anthropic::AnthropicProvider`]: Anthropic `/v1/messages` API
//! - [`ollama::OllamaProvider`]: Ollama `/api/chat` API
//!
//! [`provider_from_spec`] resolves a `provider/model` string into a client.

use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::credentials::Credentials;

pub mod anthropic;
pub mod ollama;

// ---------------------------------------------------------------------------
// Core types
// ---------------------------------------------------------------------------

/// Conversation participant role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Human user message.
    User,
}

impl Role {
    /// Wire name shared by both providers.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
        }
    }
}

/// A plain-text message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// The role of the message author.
    pub role: Role,
    /// Message text.
    pub content: String,
}

impl Message {
    /// A user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Request / Response
// ---------------------------------------------------------------------------

/// A request to a provider for one completion.
#[derive(Debug, Clone, Default)]
pub struct CompletionRequest {
    /// Conversation so far, ending with the latest user message.
    pub messages: Vec<Message>,
    /// System prompt (sent before the messages).
    pub system: Option<String>,
    /// Maximum tokens in the response.
    pub max_tokens: Option<u32>,
}

/// The reason a completion stopped generating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// Normal end of turn.
    EndTurn,
    /// Max token limit reached.
    MaxTokens,
    /// A stop sequence was hit.
    StopSequence,
    /// Provider-specific other reason.
    Other(String),
}

/// Token usage for one completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UsageStats {
    /// Tokens used in the prompt.
    pub input_tokens: u32,
    /// Tokens generated in the response.
    pub output_tokens: u32,
}

/// A provider response.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Generated text, all text blocks joined.
    pub text: String,
    /// Why the model stopped.
    pub stop_reason: StopReason,
    /// Token usage.
    pub usage: UsageStats,
    /// The model identifier that served this response.
    pub model: String,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors returned by providers.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// HTTP transport failure.
    #[error("provider request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// Response did not match the expected schema.
    #[error("provider response parse error: {0}")]
    Parse(String),
    /// Upstream provider responded with an error status.
    #[error("provider returned non-success status {status}: {body}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Sanitized response body.
        body: String,
    },
    /// Model spec is not `provider/model`.
    #[error("invalid model spec '{spec}', expected 'provider/model'")]
    InvalidModelSpec {
        /// The rejected spec.
        spec: String,
    },
    /// Provider name is not supported.
    #[error("unsupported provider '{provider}'")]
    UnsupportedProvider {
        /// The rejected provider name.
        provider: String,
    },
    /// A credential the provider needs is not configured.
    #[error("missing credential {key} for provider '{provider}'")]
    MissingCredential {
        /// Provider name.
        provider: String,
        /// Credential key.
        key: String,
    },
}

// ---------------------------------------------------------------------------
// HTTP helpers
// ---------------------------------------------------------------------------

/// Check HTTP response status and return body text or a structured error.
///
/// # Errors
///
/// Returns `ProviderError::Request` on transport failure, `ProviderError::HttpStatus` on non-2xx.
pub async fn check_http_response(response: reqwest::Response) -> Result<String, ProviderError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ProviderError::HttpStatus {
            status: status.as_u16(),
            body: sanitize_http_error_body(&body),
        });
    }
    Ok(body)
}

static SECRET_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"sk-ant-[A-Za-z0-9_\-]{10,}",
        r"sk-[A-Za-z0-9]{32,}",
        r"(?i)bearer\s+[A-Za-z0-9._\-]{16,}",
    ]
    .iter()
    .filter_map(|pattern| Regex::new(pattern).ok())
    .collect()
});

/// Collapse whitespace, redact key-shaped strings and cap the length.
pub fn sanitize_http_error_body(raw: &str) -> String {
    let mut sanitized = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    for regex in SECRET_PATTERNS.iter() {
        sanitized = regex.replace_all(&sanitized, "[REDACTED]").into_owned();
    }

    const MAX_ERROR_BODY_CHARS: usize = 256;
    if sanitized.chars().count() > MAX_ERROR_BODY_CHARS {
        let shortened = sanitized
            .chars()
            .take(MAX_ERROR_BODY_CHARS)
            .collect::<String>();
        return format!("{shortened}...[truncated]");
    }
    sanitized
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Text-generation client.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Request one completion.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] on API, network, or parse failure.
    async fn complete(&self, request: CompletionRequest)
        -> Result<CompletionResponse, ProviderError>;

    /// The `provider/model` spec this client serves.
    fn model_id(&self) -> &str;
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Split a `provider/model` spec.
///
/// # Errors
///
/// Returns [`ProviderError::InvalidModelSpec`] when either half is empty.
pub fn parse_model_spec(spec: &str) -> Result<(&str, &str), ProviderError> {
    match spec.split_once('/') {
        Some((provider, model)) if !provider.is_empty() && !model.is_empty() => {
            Ok((provider, model))
        }
        _ => Err(ProviderError::InvalidModelSpec {
            spec: spec.to_owned(),
        }),
    }
}

/// Build a provider client for a `provider/model` spec.
///
/// # Errors
///
/// Returns [`ProviderError`] for a malformed spec, an unknown provider, or a
/// missing API key.
pub fn provider_from_spec(
    spec: &str,
    credentials: &Credentials,
) -> Result<Arc<dyn LlmProvider>, ProviderError> {
    let (provider, model) = parse_model_spec(spec)?;
    match provider {
        "anthropic" => {
            let key = credentials
                .get(crate::credentials::ANTHROPIC_API_KEY)
                .filter(|key| !key.trim().is_empty())
                .ok_or_else(|| ProviderError::MissingCredential {
                    provider: provider.to_owned(),
                    key: crate::credentials::ANTHROPIC_API_KEY.to_owned(),
                })?;
            Ok(Arc::new(anthropic::AnthropicProvider::new(
                spec.to_owned(),
                model.to_owned(),
                key.to_owned(),
            )))
        }
        "ollama" => {
            let mut client = ollama::OllamaProvider::new(spec.to_owned(), model.to_owned());
            if let Some(url) = credentials.get(crate::credentials::OLLAMA_URL) {
                client.base_url = url.trim_end_matches('/').to_owned();
            }
            Ok(Arc::new(client))
        }
        _ => Err(ProviderError::UnsupportedProvider {
            provider: provider.to_owned(),
        }),
    }
}
