mod abort_guard;
mod cache;
mod clients;
mod config;
mod error;
mod handlers;
mod metrics;
mod models;
mod orchestrator;
mod prompts;
mod state;

use clap::Parser;
use std::sync::Arc;
use tracing::info;
use crate::clients::{AutomaticSdClient, CalendarClient, NewsClient, OpenWeatherClient, OpenWebUiClient};
use crate::config::Args;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // parse cli arguments / env
    let args = Args::parse();

    // one http client shared by every upstream adapter
    let http = reqwest::Client::new();

    let state = Arc::new(AppState {
        weather: Arc::new(OpenWeatherClient::new(
            http.clone(),
            &args.openweather_base_url,
            args.openweather_api_key.clone(),
            args.openweather_latitude.clone(),
            args.openweather_longitude.clone(),
            args.weather_cache_ttl(),
        )),
        news: Arc::new(NewsClient::new(
            http.clone(),
            &args.news_base_url,
            args.news_api_key.clone(),
        )),
        calendar: Arc::new(CalendarClient::new(
            http.clone(),
            &args.calendar_base_url,
            args.calendar_api_key.clone(),
            args.calendar_limit,
        )),
        text: Arc::new(OpenWebUiClient::new(
            http.clone(),
            &args.openwebui_base_url,
            args.openwebui_api_key.clone(),
            args.openwebui_model_name.clone(),
        )),
        image: Arc::new(AutomaticSdClient::new(
            http,
            &args.automatic1111_base_url,
            args.automatic1111_model_name.clone(),
        )),
    });

    let app = handlers::router(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Updates service running on http://localhost:{}", args.port);
    info!("Text generation: {} ({})", args.openwebui_base_url, args.openwebui_model_name);
    info!("Image generation: {}", args.automatic1111_base_url);
    info!("Weather cache TTL: {} seconds", args.weather_cache_ttl);
    axum::serve(listener, app).await?;
    Ok(())
}
