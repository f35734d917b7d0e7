use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::info;
use crate::cache::TtlCache;
use crate::error::ClientError;
use crate::models::WeatherReport;
use super::{WeatherSource, normalize_base_url, read_json};

// `/data/2.5/weather` payload, only the fields we render
#[derive(Deserialize)]
struct WeatherPayload {
    main: MainReadings,
    #[serde(default)]
    weather: Vec<Condition>,
}

#[derive(Deserialize)]
struct MainReadings {
    temp: f64,
}

#[derive(Deserialize)]
struct Condition {
    main: String,
}

/// Weather for one fixed location, cached for `ttl`.
pub struct OpenWeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    latitude: String,
    longitude: String,
    cache: TtlCache<WeatherReport>,
}

impl OpenWeatherClient {
    pub fn new(
        http: reqwest::Client,
        base_url: &str,
        api_key: String,
        latitude: String,
        longitude: String,
        ttl: Duration,
    ) -> Self {
        Self {
            http,
            base_url: normalize_base_url(base_url),
            api_key,
            latitude,
            longitude,
            cache: TtlCache::new("weather", ttl),
        }
    }

    async fn fetch(&self) -> Result<WeatherReport, ClientError> {
        let url = reqwest::Url::parse_with_params(
            &format!("{}/data/2.5/weather", self.base_url),
            &[
                ("lat", self.latitude.as_str()),
                ("lon", self.longitude.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ],
        )
        .map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        let response = self.http.get(url).send().await?;
        let payload: WeatherPayload = read_json(response).await?;

        let condition = payload
            .weather
            .into_iter()
            .next()
            .ok_or(ClientError::Missing("weather condition"))?;

        info!(temp = payload.main.temp, condition = %condition.main, "weather refreshed");
        Ok(WeatherReport {
            temperature: payload.main.temp,
            condition: condition.main,
        })
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    async fn current(&self) -> Result<WeatherReport, ClientError> {
        self.cache.get_or_refresh(|| self.fetch()).await
    }
}
