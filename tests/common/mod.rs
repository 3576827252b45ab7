#![allow(dead_code)]

pub mod mocks;

use serenibot::{
    chat::{ChatService, ReplySettings},
    llm::LlmClient,
    sentiment::{LabelMap, SentimentClassifier},
};
use serde_json::json;
use std::sync::Arc;

pub const FALLBACK_REPLY: &str = "Sorry, I'm having trouble responding right now.";

/// Build a chat service with the default label table and reply settings
pub fn create_service(
    classifier: Arc<dyn SentimentClassifier>,
    llm: Arc<dyn LlmClient>,
) -> ChatService {
    ChatService::new(
        classifier,
        llm,
        LabelMap::default(),
        ReplySettings::default(),
    )
}

/// OpenAI chat-completion response body
pub fn openai_completion_body(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-abc123",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "gpt-3.5-turbo",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": {
            "prompt_tokens": 50,
            "completion_tokens": 20,
            "total_tokens": 70
        }
    })
}

/// OpenAI API error body
pub fn openai_error_body(message: &str) -> serde_json::Value {
    json!({
        "error": {
            "message": message,
            "type": "invalid_request_error",
            "param": null,
            "code": "invalid_api_key"
        }
    })
}
