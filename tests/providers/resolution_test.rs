//! Resolving `provider/model` specs into clients.

use std::collections::BTreeMap;

use proposal_generator::credentials::{Credentials, ANTHROPIC_API_KEY, OLLAMA_URL};
use proposal_generator::providers::{provider_from_spec, sanitize_http_error_body, ProviderError};

fn credentials(pairs: &[(&str, &str)]) -> Credentials {
    Credentials::from_map(
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect::<BTreeMap<_, _>>(),
    )
}

#[test]
fn anthropic_needs_api_key() {
    let err = provider_from_spec("anthropic/claude-sonnet-4-5", &Credentials::default()).err();
    assert!(matches!(
        err,
        Some(ProviderError::MissingCredential { ref key, .. }) if key == ANTHROPIC_API_KEY
    ));

    let blank = provider_from_spec(
        "anthropic/claude-sonnet-4-5",
        &credentials(&[(ANTHROPIC_API_KEY, "  ")]),
    )
    .err();
    assert!(matches!(blank, Some(ProviderError::MissingCredential { .. })));
}

#[test]
fn ollama_needs_no_credentials() {
    let provider = provider_from_spec(
        "ollama/llama3",
        &credentials(&[(OLLAMA_URL, "http://gpu-box:11434/")]),
    );
    assert!(matches!(provider.as_ref().map(|p| p.model_id()), Ok("ollama/llama3")));
}

#[test]
fn malformed_specs_are_rejected() {
    for spec in ["claude", "anthropic/", "/model", ""] {
        assert!(matches!(
            provider_from_spec(spec, &Credentials::default()).err(),
            Some(ProviderError::InvalidModelSpec { .. })
        ));
    }
}

#[test]
fn api_keys_never_reach_error_messages() {
    let body = r#"{"error": {"message": "invalid x-api-key sk-ant-REDACTED"}}"#;
    let sanitized = sanitize_http_error_body(body);
    assert!(!sanitized.contains("ABCDEFGHIJKLMNOPQRST"));
    assert!(sanitized.contains("[REDACTED]"));
}
