//! Ollama provider wire format tests.

use serde_json::json;

use proposal_generator::providers::ollama::{build_request, parse_response};
use proposal_generator::providers::{CompletionRequest, Message, StopReason};

#[test]
fn system_prompt_becomes_first_message() {
    let request = CompletionRequest {
        messages: vec![Message::user("Draft the summary.")],
        system: Some("Rules".to_owned()),
        max_tokens: Some(800),
    };
    let req = build_request("llama3", &request);
    assert_eq!(req.model, "llama3");
    assert!(!req.stream);
    assert_eq!(req.messages.len(), 2);
    assert_eq!(req.messages[0].role, "system");
    assert_eq!(req.messages[1].role, "user");
    assert_eq!(
        req.options.as_ref().and_then(|o| o.num_predict),
        Some(800)
    );
}

#[test]
fn options_omitted_without_token_limit() {
    let request = CompletionRequest {
        messages: vec![Message::user("hi")],
        ..CompletionRequest::default()
    };
    let body = serde_json::to_value(build_request("llama3", &request)).expect("serialize");
    assert!(body.get("options").is_none());
    assert_eq!(body["stream"], false);
}

#[test]
fn parse_response_reads_counts_and_reason() {
    let body = json!({
        "model": "llama3",
        "message": {"role": "assistant", "content": "<p>Hi</p>"},
        "done": true,
        "done_reason": "length",
        "prompt_eval_count": 30,
        "eval_count": 12
    });
    let resp = parse_response(&body.to_string()).expect("parse");
    assert_eq!(resp.text, "<p>Hi</p>");
    assert_eq!(resp.stop_reason, StopReason::MaxTokens);
    assert_eq!(resp.usage.input_tokens, 30);
    assert_eq!(resp.usage.output_tokens, 12);
}

#[test]
fn missing_counts_default_to_zero() {
    let body = json!({
        "model": "llama3",
        "message": {"role": "assistant", "content": "ok"}
    });
    let resp = parse_response(&body.to_string()).expect("parse");
    assert_eq!(resp.stop_reason, StopReason::EndTurn);
    assert_eq!(resp.usage.input_tokens, 0);
}
