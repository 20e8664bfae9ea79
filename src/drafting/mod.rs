//! Drafted sections: section prose requested from a text-generation provider.
//!
//! A drafted fragment replaces the deterministic one for its section and goes
//! through [`sanitize_fragment`] first, so it obeys the same markup and asset
//! constraints. Sections are drafted one at a time in document order, each
//! call bounded by the configured timeout. When a section cannot be drafted,
//! [`FailurePolicy`] decides between the deterministic fragment and failing
//! the run.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::DraftingSettings;
use crate::error::ProposalError;
use crate::metadata::ClientMetadata;
use crate::providers::{CompletionRequest, LlmProvider, Message, StopReason};
use crate::render::{render_section, Fragment, Markup, SectionId};

pub mod prompts;
pub mod sanitize;

pub use sanitize::{sanitize_fragment, Rejection};

/// What to do when a section cannot be drafted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Use the deterministic fragment for that section and log a warning.
    #[default]
    Fallback,
    /// Fail the whole run with the drafting error.
    Abort,
}

/// Runtime settings for a [`Drafter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftingConfig {
    /// Upper bound on each provider call.
    pub timeout: Duration,
    /// Failure handling.
    pub on_failure: FailurePolicy,
    /// Overrides every section's default token budget.
    pub max_tokens: Option<u32>,
}

impl Default for DraftingConfig {
    fn default() -> Self {
        Self::from(&DraftingSettings::default())
    }
}

impl From<&DraftingSettings> for DraftingConfig {
    fn from(settings: &DraftingSettings) -> Self {
        Self {
            timeout: Duration::from_secs(settings.timeout_secs),
            on_failure: settings.on_failure,
            max_tokens: settings.max_tokens,
        }
    }
}

/// Result of drafting every section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftOutcome {
    /// Eight fragments in document order.
    pub fragments: Vec<Fragment>,
    /// Sections that fell back to the deterministic fragment.
    pub fallbacks: Vec<SectionId>,
}

/// Drafts section fragments through a provider.
pub struct Drafter {
    provider: Arc<dyn LlmProvider>,
    config: DraftingConfig,
    system_prompt: String,
}

impl Drafter {
    /// Create a drafter.
    pub fn new(provider: Arc<dyn LlmProvider>, config: DraftingConfig) -> Self {
        Self {
            provider,
            config,
            system_prompt: prompts::system_prompt(),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &DraftingConfig {
        &self.config
    }

    /// Draft one section.
    ///
    /// # Errors
    ///
    /// - [`ProposalError::MissingRequiredField`] without a client name.
    /// - [`ProposalError::GenerationTimeout`] when the provider exceeds the timeout.
    /// - [`ProposalError::GenerationFailed`] on a provider error, output cut off
    ///   at the token limit, or output the sanitizer rejects.
    pub async fn draft_section(
        &self,
        section: SectionId,
        metadata: &ClientMetadata,
    ) -> Result<Fragment, ProposalError> {
        let client = metadata.client_name()?;
        let request = CompletionRequest {
            messages: vec![Message::user(prompts::section_prompt(
                section, metadata, client,
            ))],
            system: Some(self.system_prompt.clone()),
            max_tokens: Some(
                self.config
                    .max_tokens
                    .unwrap_or_else(|| prompts::max_tokens(section)),
            ),
        };

        let response = tokio::time::timeout(self.config.timeout, self.provider.complete(request))
            .await
            .map_err(|_| ProposalError::GenerationTimeout {
                section,
                timeout_secs: self.config.timeout.as_secs(),
            })?
            .map_err(|e| ProposalError::GenerationFailed {
                section,
                reason: e.to_string(),
            })?;

        if response.stop_reason == StopReason::MaxTokens {
            return Err(ProposalError::GenerationFailed {
                section,
                reason: "output truncated at token limit".to_owned(),
            });
        }

        let html =
            sanitize_fragment(&response.text).map_err(|e| ProposalError::GenerationFailed {
                section,
                reason: e.to_string(),
            })?;

        info!(
            section = %section,
            model = %response.model,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "section drafted"
        );
        Ok(Fragment {
            section,
            html: Markup::trusted(html),
        })
    }

    /// Draft all eight sections sequentially, applying the failure policy.
    ///
    /// # Errors
    ///
    /// Returns [`ProposalError::MissingRequiredField`] without a client name,
    /// and the first drafting error when the policy is [`FailurePolicy::Abort`].
    pub async fn draft_all(&self, metadata: &ClientMetadata) -> Result<DraftOutcome, ProposalError> {
        metadata.validate()?;
        let mut fragments = Vec::with_capacity(SectionId::ALL.len());
        let mut fallbacks = Vec::new();

        for section in SectionId::ALL {
            match self.draft_section(section, metadata).await {
                Ok(fragment) => fragments.push(fragment),
                Err(err) if err.is_recoverable() => match self.config.on_failure {
                    FailurePolicy::Fallback => {
                        warn!(section = %section, error = %err, "drafting failed, using template text");
                        fragments.push(render_section(section, metadata)?);
                        fallbacks.push(section);
                    }
                    FailurePolicy::Abort => return Err(err),
                },
                Err(err) => return Err(err),
            }
        }

        Ok(DraftOutcome {
            fragments,
            fallbacks,
        })
    }
}

impl std::fmt::Debug for Drafter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Drafter")
            .field("model", &self.provider.model_id())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
