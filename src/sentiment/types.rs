use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classifier's own output category, before remapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLabel {
    pub label: String,
    pub score: f32,
}

/// Remaps model-specific labels onto [`Sentiment`]. Unknown labels are neutral.
#[derive(Debug, Clone)]
pub struct LabelMap {
    labels: HashMap<String, Sentiment>,
}

impl LabelMap {
    pub fn new(labels: HashMap<String, Sentiment>) -> Self {
        Self { labels }
    }

    pub fn resolve(&self, raw: &str) -> Sentiment {
        self.labels.get(raw).copied().unwrap_or(Sentiment::Neutral)
    }
}

impl Default for LabelMap {
    fn default() -> Self {
        Self::new(crate::config::default_labels())
    }
}
