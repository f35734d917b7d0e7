use std::sync::Arc;
use crate::clients::{CalendarSource, ImageGenerator, NewsSource, TextGenerator, WeatherSource};
// app's shared state: one instance of every upstream client

pub struct AppState {
    pub weather: Arc<dyn WeatherSource>, // cached, one fixed location
    pub news: Arc<dyn NewsSource>,
    pub calendar: Arc<dyn CalendarSource>,
    pub text: Arc<dyn TextGenerator>,
    pub image: Arc<dyn ImageGenerator>,
}
