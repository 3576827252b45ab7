use async_trait::async_trait;
use serenibot::{
    Error, Result,
    llm::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Choice, LlmClient, Usage},
    sentiment::{RawLabel, SentimentClassifier},
};
use std::sync::{Arc, Mutex};

/// Mock sentiment classifier returning a fixed label or error
#[derive(Debug)]
pub struct MockClassifier {
    pub label: String,
    pub error: Option<String>,
    pub inputs: Arc<Mutex<Vec<String>>>,
}

impl MockClassifier {
    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            error: None,
            inputs: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(error: impl Into<String>) -> Self {
        Self {
            label: String::new(),
            error: Some(error.into()),
            inputs: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_inputs(&self) -> Vec<String> {
        self.inputs.lock().unwrap().clone()
    }
}

#[async_trait]
impl SentimentClassifier for MockClassifier {
    async fn classify(&self, text: &str) -> Result<RawLabel> {
        self.inputs.lock().unwrap().push(text.to_string());

        if let Some(ref error) = self.error {
            return Err(Error::classifier(error.clone()));
        }

        Ok(RawLabel {
            label: self.label.clone(),
            score: 0.93,
        })
    }
}

/// Mock LLM client for testing
#[derive(Debug)]
pub struct MockLlmClient {
    pub responses: Arc<Mutex<Vec<ChatCompletionResponse>>>,
    pub requests: Arc<Mutex<Vec<ChatCompletionRequest>>>,
    pub error: Option<String>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            error: None,
        }
    }

    pub fn replying(content: &str) -> Self {
        let client = Self::new();
        client.add_response(create_response(content));
        client
    }

    pub fn with_error(mut self, error: String) -> Self {
        self.error = Some(error);
        self
    }

    pub fn add_response(&self, response: ChatCompletionResponse) {
        self.responses.lock().unwrap().push(response);
    }

    pub fn get_requests(&self) -> Vec<ChatCompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn create_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        self.requests.lock().unwrap().push(request);

        if let Some(ref error) = self.error {
            return Err(Error::llm(error.clone()));
        }

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(Error::llm("No more mock responses available"));
        }

        Ok(responses.remove(0))
    }
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a single-choice assistant response
pub fn create_response(content: &str) -> ChatCompletionResponse {
    ChatCompletionResponse {
        id: "chatcmpl-test".to_string(),
        model: "gpt-3.5-turbo".to_string(),
        choices: vec![Choice {
            index: 0,
            message: ChatMessage {
                role: "assistant".to_string(),
                content: content.to_string(),
            },
            finish_reason: Some("Stop".to_string()),
        }],
        usage: Some(Usage {
            prompt_tokens: 42,
            completion_tokens: 12,
            total_tokens: 54,
        }),
    }
}
