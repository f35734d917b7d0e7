mod health;
mod metrics;
mod updates;

pub use health::health_handler;
pub use metrics::metrics_handler;
pub use updates::updates_handler;

use axum::{Router, routing::get};
use std::sync::Arc;
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/updates", get(updates_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}
