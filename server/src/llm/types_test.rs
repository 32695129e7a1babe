use super::*;

// =============================================================================
// LlmError::retryable
// =============================================================================

#[test]
fn retryable_api_request() {
    assert!(LlmError::ApiRequest("conn refused".into()).retryable());
}

#[test]
fn retryable_api_response_429_and_5xx() {
    for status in [429, 500, 503] {
        let err = LlmError::ApiResponse { status, body: String::new() };
        assert!(err.retryable(), "status {status} should be retryable");
    }
}

#[test]
fn not_retryable_client_errors_and_config() {
    assert!(!LlmError::ApiResponse { status: 400, body: "bad request".into() }.retryable());
    assert!(!LlmError::ApiResponse { status: 401, body: "unauthorized".into() }.retryable());
    assert!(!LlmError::ConfigParse("bad".into()).retryable());
    assert!(!LlmError::MissingApiKey { var: "K".into() }.retryable());
    assert!(!LlmError::ApiParse("json".into()).retryable());
    assert!(!LlmError::Unsupported("video".into()).retryable());
}

#[test]
fn display_includes_detail() {
    assert!(LlmError::ConfigParse("bad config".into()).to_string().contains("bad config"));
    assert!(LlmError::MissingApiKey { var: "MY_KEY".into() }.to_string().contains("MY_KEY"));
    assert!(LlmError::ApiResponse { status: 502, body: String::new() }.to_string().contains("502"));
    assert!(LlmError::Unsupported("image generation".into()).to_string().contains("image generation"));
}

// =============================================================================
// Content blocks
// =============================================================================

#[test]
fn image_block_serializes_anthropic_shape() {
    let block = ContentBlock::Image { source: MediaSource::base64("image/png", "AAAA") };
    let value = serde_json::to_value(&block).unwrap();
    assert_eq!(value["type"], "image");
    assert_eq!(value["source"]["type"], "base64");
    assert_eq!(value["source"]["media_type"], "image/png");
    assert_eq!(value["source"]["data"], "AAAA");
}

#[test]
fn media_source_data_url() {
    let source = MediaSource::base64("image/jpeg", "QUJD");
    assert_eq!(source.data_url(), "data:image/jpeg;base64,QUJD");
}

#[test]
fn unknown_block_type_deserializes_as_unknown() {
    let block: ContentBlock = serde_json::from_str(r#"{"type":"server_tool_use","id":"x"}"#).unwrap();
    assert!(matches!(block, ContentBlock::Unknown));
}

#[test]
fn text_content_serializes_as_plain_string() {
    let msg = Message::user("hello");
    let value = serde_json::to_value(&msg).unwrap();
    assert_eq!(value["role"], "user");
    assert_eq!(value["content"], "hello");
}

#[test]
fn chat_response_text_joins_text_blocks() {
    let resp = ChatResponse {
        content: vec![
            ContentBlock::Text { text: "one".into() },
            ContentBlock::Thinking { thinking: "hidden".into() },
            ContentBlock::Text { text: "two".into() },
        ],
        model: "m".into(),
        stop_reason: "end_turn".into(),
        input_tokens: 3,
        output_tokens: 4,
    };
    assert_eq!(resp.text(), "one\ntwo");
    assert_eq!(resp.total_tokens(), 7);
}
