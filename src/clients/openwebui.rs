use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::error::ClientError;
use super::{TextGenerator, normalize_base_url, read_json};

// Chat completion request body
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

// Open WebUI answers in OpenAI shape; Ollama-backed deployments may
// answer with a flat `response` field instead
#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    response: Option<String>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: String,
}

pub struct OpenWebUiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenWebUiClient {
    pub fn new(http: reqwest::Client, base_url: &str, api_key: String, model: String) -> Self {
        Self {
            http,
            base_url: normalize_base_url(base_url),
            api_key,
            model,
        }
    }
}

#[async_trait]
impl TextGenerator for OpenWebUiClient {
    async fn generate(&self, prompt: &str) -> Result<String, ClientError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .http
            .post(format!("{}/api/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let reply: ChatResponse = read_json(response).await?;
        reply
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .or(reply.response)
            .ok_or(ClientError::Missing("completion"))
    }
}
