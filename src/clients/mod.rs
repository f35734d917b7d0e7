//! Upstream adapters and the capability traits the rest of the service
//! depends on. Handlers and the orchestrator only ever see `Arc<dyn ...>`.

mod automatic_sd;
mod calendar;
mod news;
mod openwebui;
mod weather;

pub use automatic_sd::AutomaticSdClient;
pub use calendar::CalendarClient;
pub use news::NewsClient;
pub use openwebui::OpenWebUiClient;
pub use weather::OpenWeatherClient;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use crate::error::ClientError;
use crate::models::{CalendarEvent, NewsItem, WeatherReport};

#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn current(&self) -> Result<WeatherReport, ClientError>;
}

#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn headlines(&self) -> Result<Vec<NewsItem>, ClientError>;
}

#[async_trait]
pub trait CalendarSource: Send + Sync {
    async fn events(&self) -> Result<Vec<CalendarEvent>, ClientError>;
}

/// Produces commentary text for a prompt.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ClientError>;
}

/// Turns a piece of text into an image, returning its URL.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate_image(&self, prompt: &str) -> Result<String, ClientError>;
}

// Check status, then decode the body ourselves so malformed payloads
// surface as Decode rather than a transport error
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ClientError::Status(status));
    }
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

// "localhost:3000/" -> "http://localhost:3000"
fn normalize_base_url(url: &str) -> String {
    let url = url.trim().trim_end_matches('/');
    if url.starts_with("http") {
        url.to_string()
    } else {
        format!("http://{}", url)
    }
}
