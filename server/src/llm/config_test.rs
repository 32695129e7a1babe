use std::collections::HashMap;

use super::*;

fn config_from(vars: &[(&str, &str)]) -> Result<LlmConfig, LlmError> {
    let vars: HashMap<String, String> = vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    LlmConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn provider_parses_case_insensitively() {
    assert_eq!("anthropic".parse::<LlmProviderKind>().unwrap(), LlmProviderKind::Anthropic);
    assert_eq!(" OpenAI ".parse::<LlmProviderKind>().unwrap(), LlmProviderKind::OpenAi);
    let err = "gemini".parse::<LlmProviderKind>().unwrap_err().to_string();
    assert!(err.contains("unknown LLM_PROVIDER"));
}

#[test]
fn openai_mode_variants() {
    assert_eq!("chat_completions".parse::<OpenAiApiMode>().unwrap(), OpenAiApiMode::ChatCompletions);
    assert_eq!("responses".parse::<OpenAiApiMode>().unwrap(), OpenAiApiMode::Responses);
    assert!("bad_mode".parse::<OpenAiApiMode>().is_err());
}

#[test]
fn defaults_to_anthropic_with_conventional_key() {
    let cfg = config_from(&[("ANTHROPIC_API_KEY", "secret")]).unwrap();
    assert_eq!(cfg.provider, LlmProviderKind::Anthropic);
    assert_eq!(cfg.api_key, "secret");
    assert_eq!(cfg.model, "claude-sonnet-4-5-20250929");
    assert_eq!(cfg.base_url, DEFAULT_ANTHROPIC_BASE_URL);
    assert_eq!(cfg.openai_mode, OpenAiApiMode::Responses);
    assert_eq!(cfg.image_model, DEFAULT_OPENAI_IMAGE_MODEL);
    assert_eq!(cfg.timeouts, LlmTimeouts::default());
}

#[test]
fn key_indirection_wins_over_conventional_var() {
    let cfg = config_from(&[
        ("LLM_API_KEY_ENV", "KNIX_TUTOR_KEY"),
        ("KNIX_TUTOR_KEY", "indirect"),
        ("ANTHROPIC_API_KEY", "direct"),
    ])
    .unwrap();
    assert_eq!(cfg.api_key, "indirect");
}

#[test]
fn missing_key_names_the_variable() {
    let err = config_from(&[("LLM_PROVIDER", "openai")]).unwrap_err();
    assert!(matches!(err, LlmError::MissingApiKey { ref var } if var == "OPENAI_API_KEY"));

    let err = config_from(&[("LLM_API_KEY_ENV", "NOPE"), ("ANTHROPIC_API_KEY", "")]).unwrap_err();
    assert!(matches!(err, LlmError::MissingApiKey { ref var } if var == "NOPE"));
}

#[test]
fn openai_settings_are_read() {
    let cfg = config_from(&[
        ("LLM_PROVIDER", "openai"),
        ("OPENAI_API_KEY", "k"),
        ("LLM_OPENAI_MODE", "chat_completions"),
        ("LLM_OPENAI_BASE_URL", "http://localhost:8080/v1/"),
        ("LLM_REQUEST_TIMEOUT_SECS", "30"),
        ("LLM_CONNECT_TIMEOUT_SECS", "nope"),
    ])
    .unwrap();
    assert_eq!(cfg.model, "gpt-4o");
    assert_eq!(cfg.openai_mode, OpenAiApiMode::ChatCompletions);
    assert_eq!(cfg.base_url, "http://localhost:8080/v1");
    assert_eq!(cfg.timeouts.request_secs, 30);
    assert_eq!(cfg.timeouts.connect_secs, DEFAULT_LLM_CONNECT_TIMEOUT_SECS);
}

#[test]
fn generic_base_url_applies_to_anthropic() {
    let cfg = config_from(&[("ANTHROPIC_API_KEY", "k"), ("LLM_BASE_URL", "https://proxy.knix.lk/anthropic/v1")]).unwrap();
    assert_eq!(cfg.base_url, "https://proxy.knix.lk/anthropic/v1");
}
