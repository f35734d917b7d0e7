use clap::Parser;
use std::time::Duration;

// CLI argument structure, every flag can also come from the environment
#[derive(Parser, Debug, Clone)]
#[command(name = "daily-updates")]
#[command(about = "Generates today's weather, news and calendar commentary")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    // Text generation (Open WebUI)
    #[arg(long, env = "OPENWEBUI_BASE_URL")]
    pub openwebui_base_url: String,

    #[arg(long, env = "OPENWEBUI_API_KEY", hide_env_values = true)]
    pub openwebui_api_key: String,

    #[arg(long, env = "OPENWEBUI_MODEL_NAME")]
    pub openwebui_model_name: String,

    // Image generation (AUTOMATIC1111)
    #[arg(long, env = "AUTOMATIC1111_BASE_URL")]
    pub automatic1111_base_url: String,

    // Checkpoint override, server default if unset
    #[arg(long, env = "AUTOMATIC1111_MODEL_NAME")]
    pub automatic1111_model_name: Option<String>,

    // Weather (OpenWeather)
    #[arg(long, env = "OPENWEATHER_BASE_URL", default_value = "https://api.openweathermap.org")]
    pub openweather_base_url: String,

    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub openweather_api_key: String,

    #[arg(long, env = "OPENWEATHER_LATITUDE", allow_hyphen_values = true)]
    pub openweather_latitude: String,

    #[arg(long, env = "OPENWEATHER_LONGITUDE", allow_hyphen_values = true)]
    pub openweather_longitude: String,

    // Weather cache TTL in seconds
    #[arg(long, env = "WEATHER_CACHE_TTL", default_value_t = 600)]
    pub weather_cache_ttl: u64,

    // News
    #[arg(long, env = "NEWS_BASE_URL")]
    pub news_base_url: String,

    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    pub news_api_key: String,

    // Calendar
    #[arg(long, env = "CALENDAR_BASE_URL")]
    pub calendar_base_url: String,

    #[arg(long, env = "CALENDAR_API_KEY", hide_env_values = true)]
    pub calendar_api_key: String,

    // Max calendar events turned into prompts
    #[arg(long, env = "CALENDAR_LIMIT", default_value_t = 3)]
    pub calendar_limit: usize,
}

impl Args {
    pub fn weather_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.weather_cache_ttl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: [&str; 19] = [
        "daily-updates",
        "--openwebui-base-url", "http://webui:3000",
        "--openwebui-api-key", "key",
        "--openwebui-model-name", "llama3",
        "--automatic1111-base-url", "http://sd:7860",
        "--openweather-api-key", "weather-key",
        "--openweather-latitude", "40.7128",
        "--openweather-longitude", "-74.0060",
        "--news-base-url", "http://news",
        "--news-api-key", "news-key",
    ];

    fn with_calendar(extra: &[&'static str]) -> Vec<&'static str> {
        let mut args = REQUIRED.to_vec();
        args.extend(["--calendar-base-url", "http://cal", "--calendar-api-key", "cal-key"]);
        args.extend(extra);
        args
    }

    #[test]
    fn defaults_apply() {
        let args = Args::try_parse_from(with_calendar(&[])).unwrap();
        assert_eq!(args.weather_cache_ttl(), Duration::from_secs(600));
        assert_eq!(args.calendar_limit, 3);
        assert_eq!(args.openweather_base_url, "https://api.openweathermap.org");
        assert_eq!(args.openweather_longitude, "-74.0060");
        assert!(args.automatic1111_model_name.is_none());
    }

    #[test]
    fn overrides_are_parsed() {
        let args =
            Args::try_parse_from(with_calendar(&["--port", "9000", "--calendar-limit", "5"])).unwrap();
        assert_eq!(args.port, 9000);
        assert_eq!(args.calendar_limit, 5);
    }

    #[test]
    fn missing_required_value_is_rejected() {
        // calendar settings left out
        assert!(Args::try_parse_from(REQUIRED).is_err());
    }
}
