use super::prompt;
use crate::{
    Error, Result,
    config::LlmConfig,
    llm::{ChatCompletionRequest, ChatMessage, LlmClient},
    sentiment::{LabelMap, Sentiment, SentimentClassifier},
};
use std::sync::Arc;
use tracing::{debug, error, info};

#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub sentiment: Sentiment,
    pub response: String,
}

/// Prompt and completion settings for reply generation.
#[derive(Debug, Clone)]
pub struct ReplySettings {
    pub system_prompt: String,
    pub persona: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub fallback_reply: String,
}

impl From<&LlmConfig> for ReplySettings {
    fn from(config: &LlmConfig) -> Self {
        Self {
            system_prompt: config.system_prompt.clone(),
            persona: config.persona.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            fallback_reply: config.fallback_reply.clone(),
        }
    }
}

impl Default for ReplySettings {
    fn default() -> Self {
        Self::from(&LlmConfig::default())
    }
}

/// Classifies the user's text, then asks the LLM for a reply conditioned on
/// the detected sentiment.
pub struct ChatService {
    classifier: Arc<dyn SentimentClassifier>,
    llm: Arc<dyn LlmClient>,
    labels: LabelMap,
    settings: ReplySettings,
}

impl ChatService {
    pub fn new(
        classifier: Arc<dyn SentimentClassifier>,
        llm: Arc<dyn LlmClient>,
        labels: LabelMap,
        settings: ReplySettings,
    ) -> Self {
        Self {
            classifier,
            llm,
            labels,
            settings,
        }
    }

    /// Fails with [`Error::EmptyInput`] for empty text and with
    /// [`Error::Classifier`] when sentiment analysis fails. LLM failures never
    /// fail the call; the fallback reply is returned instead.
    pub async fn respond(&self, text: &str) -> Result<ChatReply> {
        if text.is_empty() {
            return Err(Error::EmptyInput);
        }

        let raw = self.classifier.classify(text).await.map_err(|e| {
            error!("Error in sentiment analysis: {}", e);
            match e {
                Error::Classifier(_) => e,
                other => Error::classifier(other.to_string()),
            }
        })?;

        let sentiment = self.labels.resolve(&raw.label);
        debug!(
            raw_label = %raw.label,
            score = raw.score,
            sentiment = %sentiment,
            "Resolved sentiment"
        );

        let response = match self.generate(sentiment, text).await {
            Ok(reply) => reply,
            Err(e) => {
                error!("Error in LLM completion call: {}", e);
                self.settings.fallback_reply.clone()
            }
        };

        Ok(ChatReply {
            sentiment,
            response,
        })
    }

    async fn generate(&self, sentiment: Sentiment, text: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            messages: vec![
                ChatMessage::system(&self.settings.system_prompt),
                ChatMessage::user(prompt::build(&self.settings.persona, sentiment, text)),
            ],
            max_tokens: Some(self.settings.max_tokens),
            temperature: Some(self.settings.temperature),
        };

        let response = self.llm.create_chat_completion(request).await?;
        if let Some(ref usage) = response.usage {
            info!(
                model = %response.model,
                total_tokens = usage.total_tokens,
                "Generated reply"
            );
        }

        response
            .first_content()
            .map(str::to_string)
            .ok_or_else(|| Error::llm("completion contained no reply text"))
    }
}
