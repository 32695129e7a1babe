use super::*;
use crate::llm::types::{Content, MediaSource};

fn make_response(content: serde_json::Value) -> String {
    serde_json::json!({
        "id": "msg_123",
        "type": "message",
        "role": "assistant",
        "content": content,
        "model": "claude-sonnet-4-5-20250929",
        "stop_reason": "end_turn",
        "usage": { "input_tokens": 100, "output_tokens": 50 }
    })
    .to_string()
}

#[test]
fn parse_text_response() {
    let json = make_response(serde_json::json!([
        { "type": "text", "text": "Mitochondria produce ATP." }
    ]));
    let resp = parse_response(&json).unwrap();
    assert_eq!(resp.content.len(), 1);
    assert!(matches!(&resp.content[0], ContentBlock::Text { text } if text == "Mitochondria produce ATP."));
    assert_eq!(resp.model, "claude-sonnet-4-5-20250929");
    assert_eq!(resp.stop_reason, "end_turn");
    assert_eq!(resp.input_tokens, 100);
    assert_eq!(resp.output_tokens, 50);
}

#[test]
fn parse_unknown_content_filtered() {
    let json = make_response(serde_json::json!([
        { "type": "text", "text": "hi" },
        { "type": "some_future_type", "data": {} }
    ]));
    let resp = parse_response(&json).unwrap();
    assert_eq!(resp.content.len(), 1);
}

#[test]
fn parse_thinking_blocks_are_filtered() {
    let json = make_response(serde_json::json!([
        { "type": "thinking", "thinking": "Let me think..." },
        { "type": "text", "text": "Here is my answer" }
    ]));
    let resp = parse_response(&json).unwrap();
    assert_eq!(resp.content.len(), 1);
    assert_eq!(resp.text(), "Here is my answer");
}

#[test]
fn parse_invalid_json() {
    let err = parse_response("not json").unwrap_err();
    assert!(matches!(err, LlmError::ApiParse(_)));
}

#[test]
fn request_serializes_image_blocks() {
    let messages = vec![Message {
        role: "user".into(),
        content: Content::Blocks(vec![
            ContentBlock::Image { source: MediaSource::base64("image/png", "AAAA") },
            ContentBlock::Text { text: "What is this?".into() },
        ]),
    }];
    let body = ApiRequest { model: "m", max_tokens: 10, system: "s", messages: &messages };
    let value = serde_json::to_value(&body).unwrap();
    assert_eq!(value["messages"][0]["content"][0]["type"], "image");
    assert_eq!(value["messages"][0]["content"][0]["source"]["media_type"], "image/png");
    assert_eq!(value["messages"][0]["content"][1]["text"], "What is this?");
}

#[test]
fn accepts_only_still_images() {
    assert!(accepts_media("image/png"));
    assert!(accepts_media("image/webp"));
    assert!(!accepts_media("image/tiff"));
    assert!(!accepts_media("video/mp4"));
}

#[test]
fn error_envelope_is_condensed() {
    let body = r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#;
    assert_eq!(error_message(body), "overloaded_error: Overloaded");
    assert_eq!(error_message("upstream timeout"), "upstream timeout");
}

#[test]
fn messages_url_joins_base() {
    let client = AnthropicClient::new("k".into(), "https://proxy.knix.lk/v1", LlmTimeouts::default()).unwrap();
    assert_eq!(client.messages_url, "https://proxy.knix.lk/v1/messages");
}
