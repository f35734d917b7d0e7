use axum::{Json, extract::State};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};
use crate::error::UpdatesError;
use crate::metrics::{GENERATION_FAILURES, REQUEST_LATENCY, REQUEST_TOTAL};
use crate::models::{PromptResult, PromptSpec};
use crate::orchestrator::run_orchestration;
use crate::prompts::build_updates;
use crate::state::AppState;

// GET /updates
//
// Upstream data fetch failures fail the whole request. Generation failures
// only degrade their own slot and still answer 200 with the full array.
pub async fn updates_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PromptResult>>, UpdatesError> {
    REQUEST_TOTAL.inc();
    let start_time = Instant::now();

    let prompts = gather_prompts(&state).await.inspect_err(|e| {
        error!("cannot get updates: {}", e);
    })?;

    let orchestration =
        run_orchestration(prompts, Arc::clone(&state.text), Arc::clone(&state.image)).await;

    for failure in &orchestration.failures {
        GENERATION_FAILURES.with_label_values(&[failure.stage.as_str()]).inc();
        warn!(
            index = failure.index,
            key = %failure.key,
            stage = %failure.stage,
            "generation failed, slot degraded: {}",
            failure.message
        );
    }

    REQUEST_LATENCY.observe(start_time.elapsed().as_secs_f64());
    info!(
        items = orchestration.results.len(),
        failures = orchestration.failures.len(),
        degraded = orchestration.is_degraded(),
        "updates generated"
    );
    Ok(Json(orchestration.results))
}

// Sources are fetched one after another and the first failure stops the
// request before any prompt is built
async fn gather_prompts(state: &AppState) -> Result<Vec<PromptSpec>, UpdatesError> {
    let weather = state.weather.current().await.map_err(UpdatesError::Weather)?;
    let news = state.news.headlines().await.map_err(UpdatesError::News)?;
    let events = state.calendar.events().await.map_err(UpdatesError::Calendar)?;

    Ok(build_updates(&weather, &news, &events))
}
