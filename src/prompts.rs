use crate::models::{CalendarEvent, NewsItem, PromptSpec, WeatherReport};

/// Build the ordered prompt list for one /updates request: weather, news,
/// then one prompt per calendar event in source order. Only the news
/// commentary is turned into an image.
pub fn build_updates(
    weather: &WeatherReport,
    news: &[NewsItem],
    events: &[CalendarEvent],
) -> Vec<PromptSpec> {
    let mut prompts = Vec::with_capacity(2 + events.len());

    prompts.push(PromptSpec::new("weather", weather_prompt(weather), false));
    prompts.push(PromptSpec::new("news", news_prompt(news), true));

    for (i, event) in events.iter().enumerate() {
        prompts.push(PromptSpec::new(
            format!("calendar-{}", i + 1),
            calendar_prompt(event),
            false,
        ));
    }
    prompts
}

fn weather_prompt(weather: &WeatherReport) -> String {
    format!(
        "You are a weather assistant. The current temperature is {:.1}°C and the weather is {}. \
         Write a very short comment on the weather.",
        weather.temperature, weather.condition
    )
}

fn news_prompt(news: &[NewsItem]) -> String {
    let headlines: String = news
        .iter()
        .map(|item| {
            if item.description.is_empty() {
                format!("- {}\n", item.title)
            } else {
                format!("- {}: {}\n", item.title, item.description)
            }
        })
        .collect();
    format!(
        "You are a news assistant. The latest news are below:\n{}\nWrite a very short comment on the news.",
        headlines
    )
}

fn calendar_prompt(event: &CalendarEvent) -> String {
    format!(
        "You are a calendar assistant. The calendar event is below:\n{} ({} to {}): {}\n\n\
         Write a very short comment on the calendar event.",
        event.title, event.start, event.end, event.description
    )
}
