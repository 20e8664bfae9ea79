//! Anthropic provider wire format tests.

use serde_json::json;

use proposal_generator::providers::anthropic::{build_request, parse_response};
use proposal_generator::providers::{CompletionRequest, Message, Role, StopReason};

fn simple_request() -> CompletionRequest {
    CompletionRequest {
        messages: vec![Message::user("Draft the timeline.")],
        system: Some("You write proposals.".to_owned()),
        max_tokens: Some(1500),
    }
}

#[test]
fn build_request_sets_model_and_system() {
    let req = build_request("claude-sonnet-4-5", &simple_request());
    assert_eq!(req.model, "claude-sonnet-4-5");
    assert_eq!(req.system.as_deref(), Some("You write proposals."));
    assert_eq!(req.max_tokens, 1500);
    assert_eq!(req.messages.len(), 1);
    assert_eq!(req.messages[0].role, "user");
}

#[test]
fn build_request_defaults_token_budget() {
    let request = CompletionRequest {
        messages: vec![Message::user("hi"), Message::user("and again")],
        ..CompletionRequest::default()
    };
    let req = build_request("model", &request);
    assert_eq!(req.messages.len(), 2);
    assert!(req.messages.iter().all(|m| m.role == Role::User.as_str()));
    assert_eq!(req.max_tokens, 4096);
}

#[test]
fn system_is_omitted_when_absent() {
    let request = CompletionRequest {
        messages: vec![Message::user("hi")],
        ..CompletionRequest::default()
    };
    let body = serde_json::to_value(build_request("model", &request)).expect("serialize");
    assert!(body.get("system").is_none());
}

#[test]
fn parse_response_joins_text_blocks() {
    let body = json!({
        "id": "msg_1",
        "type": "message",
        "role": "assistant",
        "model": "claude-sonnet-4-5",
        "content": [
            {"type": "text", "text": "<p>First</p>"},
            {"type": "thinking", "thinking": "ignored"},
            {"type": "text", "text": "<p>Second</p>"}
        ],
        "stop_reason": "end_turn",
        "usage": {"input_tokens": 120, "output_tokens": 40}
    });
    let resp = parse_response(&body.to_string()).expect("parse");
    assert_eq!(resp.text, "<p>First</p><p>Second</p>");
    assert_eq!(resp.stop_reason, StopReason::EndTurn);
    assert_eq!(resp.usage.input_tokens, 120);
    assert_eq!(resp.usage.output_tokens, 40);
    assert_eq!(resp.model, "claude-sonnet-4-5");
}

#[test]
fn parse_response_maps_max_tokens() {
    let body = json!({
        "model": "m",
        "content": [{"type": "text", "text": "cut"}],
        "stop_reason": "max_tokens",
        "usage": {"input_tokens": 1, "output_tokens": 1}
    });
    let resp = parse_response(&body.to_string()).expect("parse");
    assert_eq!(resp.stop_reason, StopReason::MaxTokens);
}

#[test]
fn parse_response_rejects_garbage() {
    assert!(parse_response("not json").is_err());
}
