use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::error::ClientError;
use super::{ImageGenerator, normalize_base_url, read_json};

// txt2img request body; generation settings are fixed
#[derive(Serialize)]
struct Txt2ImgRequest<'a> {
    prompt: &'a str,
    negative_prompt: &'a str,
    width: u32,
    height: u32,
    steps: u32,
    enable_hr: bool,
    hr_scale: u32,
    hr_upscaler: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    override_settings: Option<OverrideSettings<'a>>,
}

#[derive(Serialize)]
struct OverrideSettings<'a> {
    sd_model_checkpoint: &'a str,
}

#[derive(Deserialize)]
struct Txt2ImgResponse {
    #[serde(default)]
    images: Vec<String>,
}

pub struct AutomaticSdClient {
    http: reqwest::Client,
    base_url: String,
    model: Option<String>, // checkpoint override, server default when None
}

impl AutomaticSdClient {
    pub fn new(http: reqwest::Client, base_url: &str, model: Option<String>) -> Self {
        Self {
            http,
            base_url: normalize_base_url(base_url),
            model: model.filter(|m| !m.is_empty()),
        }
    }
}

#[async_trait]
impl ImageGenerator for AutomaticSdClient {
    async fn generate_image(&self, prompt: &str) -> Result<String, ClientError> {
        let body = Txt2ImgRequest {
            prompt,
            negative_prompt: "",
            width: 512,
            height: 512,
            steps: 20,
            enable_hr: true,
            hr_scale: 2,
            hr_upscaler: "RealESRGAN_x4plus",
            override_settings: self.model.as_deref().map(|model| OverrideSettings {
                sd_model_checkpoint: model,
            }),
        };

        let response = self
            .http
            .post(format!("{}/sdapi/v1/txt2img", self.base_url))
            .json(&body)
            .send()
            .await?;

        let reply: Txt2ImgResponse = read_json(response).await?;
        reply
            .images
            .into_iter()
            .next()
            .ok_or(ClientError::Missing("images"))
    }
}
