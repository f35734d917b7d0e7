use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

// Failure of a single upstream call (data source or generator)
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("cannot send request: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid request url: {0}")]
    InvalidUrl(String),

    #[error("unexpected response code: {}", .0.as_u16())]
    Status(reqwest::StatusCode),

    #[error("cannot decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response contained no {0}")]
    Missing(&'static str),
}

// Request-level failure of /updates. Only upstream data fetches end up here,
// generation failures degrade single slots instead.
#[derive(Debug, Error)]
pub enum UpdatesError {
    #[error("cannot get weather: {0}")]
    Weather(#[source] ClientError),

    #[error("cannot get news: {0}")]
    News(#[source] ClientError),

    #[error("cannot get calendar events: {0}")]
    Calendar(#[source] ClientError),
}

impl IntoResponse for UpdatesError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}
