use serde::{Deserialize, Serialize};

// One unit of work for the orchestrator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSpec {
    pub key: String,
    pub text: String,
    pub wants_image: bool,
}

impl PromptSpec {
    pub fn new(key: impl Into<String>, text: impl Into<String>, wants_image: bool) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
            wants_image,
        }
    }
}

// One item of the /updates response, index-aligned with its PromptSpec
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptResult {
    pub key: String,
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl PromptResult {
    // Slot with nothing generated yet
    pub fn empty(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            response: String::new(),
            image_url: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub temperature: f64,
    pub condition: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start: String,
    pub end: String,
}
