//! Drafter behaviour against scripted providers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use proposal_generator::drafting::{prompts, Drafter, DraftingConfig, FailurePolicy};
use proposal_generator::metadata::{parse_metadata, ClientMetadata};
use proposal_generator::providers::{
    CompletionRequest, CompletionResponse, LlmProvider, ProviderError, StopReason, UsageStats,
};
use proposal_generator::render::{render_section, SectionId};
use proposal_generator::ProposalError;

fn response(text: &str) -> CompletionResponse {
    CompletionResponse {
        text: text.to_owned(),
        stop_reason: StopReason::EndTurn,
        usage: UsageStats {
            input_tokens: 100,
            output_tokens: 50,
        },
        model: "mock".to_owned(),
    }
}

/// Answers every request with the same text and records the requests.
struct ScriptedProvider {
    text: String,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedProvider {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_owned(),
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
        Ok(response(&self.text))
    }

    fn model_id(&self) -> &str {
        "mock/scripted"
    }
}

/// Fails the call with the given zero-based index; answers the rest.
struct FailsOnCall {
    fail_at: usize,
    calls: AtomicUsize,
}

#[async_trait]
impl LlmProvider for FailsOnCall {
    async fn complete(
        &self,
        _request: CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call == self.fail_at {
            return Err(ProviderError::HttpStatus {
                status: 529,
                body: "overloaded".to_owned(),
            });
        }
        Ok(response("<p>Drafted copy.</p>"))
    }

    fn model_id(&self) -> &str {
        "mock/flaky"
    }
}

/// Never answers within any sensible timeout.
struct SlowProvider;

#[async_trait]
impl LlmProvider for SlowProvider {
    async fn complete(
        &self,
        _request: CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(response("<p>Too late.</p>"))
    }

    fn model_id(&self) -> &str {
        "mock/slow"
    }
}

/// Stops at the token limit on the first call; answers the rest.
struct TruncatesFirst {
    calls: AtomicUsize,
}

#[async_trait]
impl LlmProvider for TruncatesFirst {
    async fn complete(
        &self,
        _request: CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            return Ok(CompletionResponse {
                stop_reason: StopReason::MaxTokens,
                ..response(r#"<div class="info-box"><ul><li>Cut off mid"#)
            });
        }
        Ok(response("<p>Drafted copy.</p>"))
    }

    fn model_id(&self) -> &str {
        "mock/truncating"
    }
}

fn metadata() -> ClientMetadata {
    parse_metadata(include_str!("../../templates/metadata_template.json")).expect("template")
}

fn config(on_failure: FailurePolicy) -> DraftingConfig {
    DraftingConfig {
        timeout: Duration::from_secs(5),
        on_failure,
        max_tokens: None,
    }
}

#[tokio::test]
async fn drafts_every_section_in_order() {
    let provider = Arc::new(ScriptedProvider::new("<p>Drafted copy.</p>"));
    let drafter = Drafter::new(provider.clone(), config(FailurePolicy::Abort));

    let outcome = drafter.draft_all(&metadata()).await.expect("drafted");
    let sections: Vec<SectionId> = outcome.fragments.iter().map(|f| f.section).collect();
    assert_eq!(sections, SectionId::ALL.to_vec());
    assert!(outcome.fallbacks.is_empty());
    assert!(outcome
        .fragments
        .iter()
        .all(|f| f.html.as_str() == "<p>Drafted copy.</p>"));

    let requests = provider.requests.lock().expect("requests");
    assert_eq!(requests.len(), SectionId::ALL.len());
    for (request, section) in requests.iter().zip(SectionId::ALL) {
        assert_eq!(request.max_tokens, Some(prompts::max_tokens(section)));
        assert!(request.system.is_some());
        assert_eq!(request.messages.len(), 1);
    }
    assert!(requests[0].messages[0].content.contains("Client: Client Name"));
}

#[tokio::test]
async fn token_override_applies_to_every_section() {
    let provider = Arc::new(ScriptedProvider::new("<p>x</p>"));
    let drafter = Drafter::new(
        provider.clone(),
        DraftingConfig {
            max_tokens: Some(64),
            ..config(FailurePolicy::Abort)
        },
    );
    drafter.draft_all(&metadata()).await.expect("drafted");
    let requests = provider.requests.lock().expect("requests");
    assert!(requests.iter().all(|r| r.max_tokens == Some(64)));
}

#[tokio::test]
async fn drafted_markup_is_sanitized() {
    let provider = Arc::new(ScriptedProvider::new(
        "```html\n<p onclick=\"steal()\">Drafted</p><script>alert(1)</script>\n```",
    ));
    let drafter = Drafter::new(provider, config(FailurePolicy::Abort));
    let fragment = drafter
        .draft_section(SectionId::Timeline, &metadata())
        .await
        .expect("drafted");
    assert_eq!(fragment.html.as_str(), "<p>Drafted</p>");
}

#[tokio::test]
async fn empty_output_is_a_generation_failure() {
    let drafter = Drafter::new(
        Arc::new(ScriptedProvider::new("   ")),
        config(FailurePolicy::Abort),
    );
    let err = drafter
        .draft_section(SectionId::NextSteps, &metadata())
        .await
        .expect_err("empty output");
    assert!(matches!(
        err,
        ProposalError::GenerationFailed { section: SectionId::NextSteps, .. }
    ));
}

#[tokio::test]
async fn truncated_output_falls_back() {
    let metadata = metadata();
    let provider = Arc::new(TruncatesFirst {
        calls: AtomicUsize::new(0),
    });
    let drafter = Drafter::new(provider, DraftingConfig::default());

    let outcome = drafter.draft_all(&metadata).await.expect("fallback keeps going");
    assert_eq!(outcome.fallbacks, vec![SectionId::ExecutiveSummary]);
    let expected = render_section(SectionId::ExecutiveSummary, &metadata).expect("template text");
    assert_eq!(outcome.fragments[0], expected);
    assert!(!outcome.fragments[0].html.as_str().contains("Cut off mid"));
}

#[tokio::test]
async fn truncated_output_is_a_generation_failure() {
    let drafter = Drafter::new(
        Arc::new(TruncatesFirst {
            calls: AtomicUsize::new(0),
        }),
        config(FailurePolicy::Abort),
    );
    let err = drafter
        .draft_section(SectionId::ExecutiveSummary, &metadata())
        .await
        .expect_err("truncated");
    match err {
        ProposalError::GenerationFailed { reason, .. } => {
            assert_eq!(reason, "output truncated at token limit");
        }
        other => panic!("expected generation failure, got {other}"),
    }
}

#[tokio::test]
async fn embedded_frames_never_reach_the_fragment() {
    let provider = Arc::new(ScriptedProvider::new(
        r#"<p>Results</p><iframe src="https://evil.example/t.html"></iframe>"#,
    ));
    let drafter = Drafter::new(provider, config(FailurePolicy::Abort));
    let fragment = drafter
        .draft_section(SectionId::SuccessMetrics, &metadata())
        .await
        .expect("drafted");
    assert_eq!(fragment.html.as_str(), "<p>Results</p>");
}

#[tokio::test]
async fn lingering_external_reference_is_a_generation_failure() {
    let drafter = Drafter::new(
        Arc::new(ScriptedProvider::new(
            r#"<p>Paste src="https://evil.example/pixel.js" into your site.</p>"#,
        )),
        config(FailurePolicy::Abort),
    );
    let err = drafter
        .draft_section(SectionId::NextSteps, &metadata())
        .await
        .expect_err("rejected");
    match err {
        ProposalError::GenerationFailed { reason, .. } => {
            assert!(reason.contains("https://evil.example/pixel.js"));
        }
        other => panic!("expected generation failure, got {other}"),
    }
}

#[tokio::test]
async fn fallback_uses_deterministic_fragment() {
    let metadata = metadata();
    let provider = Arc::new(FailsOnCall {
        fail_at: 6,
        calls: AtomicUsize::new(0),
    });
    let drafter = Drafter::new(provider, config(FailurePolicy::Fallback));

    let outcome = drafter.draft_all(&metadata).await.expect("fallback keeps going");
    assert_eq!(outcome.fallbacks, vec![SectionId::Investment]);
    assert_eq!(outcome.fragments.len(), SectionId::ALL.len());

    let expected = render_section(SectionId::Investment, &metadata).expect("template text");
    assert_eq!(outcome.fragments[6], expected);
    assert_eq!(outcome.fragments[7].html.as_str(), "<p>Drafted copy.</p>");
}

#[tokio::test]
async fn abort_stops_at_first_failure() {
    let provider = Arc::new(FailsOnCall {
        fail_at: 1,
        calls: AtomicUsize::new(0),
    });
    let drafter = Drafter::new(provider.clone(), config(FailurePolicy::Abort));

    let err = drafter.draft_all(&metadata()).await.expect_err("aborted");
    match err {
        ProposalError::GenerationFailed { section, reason } => {
            assert_eq!(section, SectionId::Understanding);
            assert!(reason.contains("529"));
        }
        other => panic!("expected generation failure, got {other}"),
    }
    assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn slow_provider_times_out() {
    let drafter = Drafter::new(Arc::new(SlowProvider), config(FailurePolicy::Abort));
    let err = drafter
        .draft_section(SectionId::ExecutiveSummary, &metadata())
        .await
        .expect_err("timed out");
    match err {
        ProposalError::GenerationTimeout {
            section,
            timeout_secs,
        } => {
            assert_eq!(section, SectionId::ExecutiveSummary);
            assert_eq!(timeout_secs, 5);
        }
        other => panic!("expected timeout, got {other}"),
    }
}

#[tokio::test(start_paused = true)]
async fn timeouts_fall_back_under_default_policy() {
    let drafter = Drafter::new(Arc::new(SlowProvider), DraftingConfig::default());
    assert_eq!(drafter.config().on_failure, FailurePolicy::Fallback);

    let outcome = drafter.draft_all(&metadata()).await.expect("fallback");
    assert_eq!(outcome.fallbacks, SectionId::ALL.to_vec());
}

#[tokio::test]
async fn missing_client_is_never_recovered() {
    let drafter = Drafter::new(
        Arc::new(ScriptedProvider::new("<p>x</p>")),
        config(FailurePolicy::Fallback),
    );
    let err = drafter
        .draft_all(&ClientMetadata::default())
        .await
        .expect_err("missing client");
    assert!(matches!(err, ProposalError::MissingRequiredField { .. }));
}
