use async_trait::async_trait;
use tracing::debug;
use crate::error::ClientError;
use crate::models::CalendarEvent;
use super::{CalendarSource, normalize_base_url, read_json};

pub struct CalendarClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    limit: usize, // max events turned into prompts
}

impl CalendarClient {
    pub fn new(http: reqwest::Client, base_url: &str, api_key: String, limit: usize) -> Self {
        Self {
            http,
            base_url: normalize_base_url(base_url),
            api_key,
            limit,
        }
    }
}

#[async_trait]
impl CalendarSource for CalendarClient {
    async fn events(&self) -> Result<Vec<CalendarEvent>, ClientError> {
        let url = reqwest::Url::parse_with_params(
            &format!("{}/events", self.base_url),
            &[("apiKey", self.api_key.as_str())],
        )
        .map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        let response = self.http.get(url).send().await?;
        let mut events: Vec<CalendarEvent> = read_json(response).await?;

        if events.len() > self.limit {
            debug!(total = events.len(), limit = self.limit, "truncating calendar events");
            events.truncate(self.limit);
        }
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn event(title: &str) -> serde_json::Value {
        serde_json::json!({
            "title": title,
            "description": "desc",
            "start": "2024-01-01T09:00:00Z",
            "end": "2024-01-01T10:00:00Z"
        })
    }

    #[tokio::test]
    async fn keeps_first_events_up_to_limit() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/events").query_param("apiKey", "cal-key");
                then.status(200)
                    .json_body(serde_json::json!([event("a"), event("b"), event("c"), event("d")]));
            })
            .await;

        let calendar =
            CalendarClient::new(reqwest::Client::new(), &server.base_url(), "cal-key".into(), 3);
        let events = calendar.events().await.unwrap();

        let titles: Vec<_> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn unexpected_shape_is_a_decode_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/events");
                then.status(200).json_body(serde_json::json!({"events": []}));
            })
            .await;

        let calendar =
            CalendarClient::new(reqwest::Client::new(), &server.base_url(), "cal-key".into(), 3);
        let err = calendar.events().await.unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }
}
