use crate::sentiment::Sentiment;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub sentiment: SentimentConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub logs: LogsConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Allowed CORS origins. An empty list allows any origin.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Empty means the provider's default endpoint.
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
    #[serde(default = "default_persona")]
    pub persona: String,
    #[serde(default = "default_fallback_reply")]
    pub fallback_reply: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentConfig {
    #[serde(default)]
    pub backend: ClassifierBackend,
    #[serde(default = "default_model_dir")]
    pub model_dir: String,
    /// Text-classification endpoint used by the `http` backend.
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default = "default_labels")]
    pub labels: HashMap<String, Sentiment>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierBackend {
    #[default]
    Onnx,
    Http,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            logs: LogsConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            system_prompt: default_system_prompt(),
            persona: default_persona(),
            fallback_reply: default_fallback_reply(),
        }
    }
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            backend: ClassifierBackend::default(),
            model_dir: default_model_dir(),
            endpoint: None,
            api_token: None,
            labels: default_labels(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_temperature() -> f32 {
    0.8
}

fn default_max_tokens() -> u32 {
    200
}

fn default_system_prompt() -> String {
    "You are a supportive mental health chatbot.".to_string()
}

fn default_persona() -> String {
    "SereniBot".to_string()
}

fn default_fallback_reply() -> String {
    "Sorry, I'm having trouble responding right now.".to_string()
}

fn default_model_dir() -> String {
    "finalmodel/distilbert_sentiment_best".to_string()
}

pub fn default_labels() -> HashMap<String, Sentiment> {
    HashMap::from([
        ("LABEL_0".to_string(), Sentiment::Positive),
        ("LABEL_1".to_string(), Sentiment::Neutral),
        ("LABEL_2".to_string(), Sentiment::Negative),
    ])
}
