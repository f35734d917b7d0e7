use async_trait::async_trait;
use crate::error::ClientError;
use crate::models::NewsItem;
use super::{NewsSource, normalize_base_url, read_json};

pub struct NewsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl NewsClient {
    pub fn new(http: reqwest::Client, base_url: &str, api_key: String) -> Self {
        Self {
            http,
            base_url: normalize_base_url(base_url),
            api_key,
        }
    }
}

#[async_trait]
impl NewsSource for NewsClient {
    async fn headlines(&self) -> Result<Vec<NewsItem>, ClientError> {
        let url = reqwest::Url::parse_with_params(
            &format!("{}/news", self.base_url),
            &[("apiKey", self.api_key.as_str())],
        )
        .map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        let response = self.http.get(url).send().await?;
        read_json(response).await
    }
}
