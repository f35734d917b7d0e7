//! Fans a list of prompts out to the generators and joins the results.
//!
//! Every prompt runs in its own tokio task. A task owns exactly one result
//! slot and hands it back through its `JoinHandle`; the output vector is
//! assembled in prompt order only after every handle has resolved, so no
//! two tasks ever write to the same storage and completion order never
//! leaks into the response. Handles are held in `AbortGuard`s: dropping the
//! orchestration future (client went away) aborts every unit still running.

use futures::future::join_all;
use std::fmt;
use std::sync::Arc;
use tracing::debug;
use crate::abort_guard::AbortGuard;
use crate::clients::{ImageGenerator, TextGenerator};
use crate::models::{PromptResult, PromptSpec};

/// Which call degraded a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Text,
    Image,
    // the unit's task died before producing its slot
    Task,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Text => "text",
            Stage::Image => "image",
            Stage::Task => "task",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationFailure {
    pub index: usize,
    pub key: String,
    pub stage: Stage,
    pub message: String,
}

/// Outcome of one orchestration run. `results[i]` always belongs to the
/// i-th input prompt; `failures` lists every degraded slot.
#[derive(Debug, Default)]
pub struct Orchestration {
    pub results: Vec<PromptResult>,
    pub failures: Vec<GenerationFailure>,
}

impl Orchestration {
    pub fn is_degraded(&self) -> bool {
        !self.failures.is_empty()
    }
}

// What a single task hands back: its own slot plus anything that failed
struct UnitOutcome {
    result: PromptResult,
    failures: Vec<GenerationFailure>,
}

pub async fn run_orchestration(
    specs: Vec<PromptSpec>,
    text: Arc<dyn TextGenerator>,
    image: Arc<dyn ImageGenerator>,
) -> Orchestration {
    let keys: Vec<String> = specs.iter().map(|spec| spec.key.clone()).collect();

    let handles: Vec<_> = specs
        .into_iter()
        .enumerate()
        .map(|(index, spec)| {
            let text = Arc::clone(&text);
            let image = Arc::clone(&image);
            AbortGuard::new(tokio::spawn(run_unit(index, spec, text, image)))
        })
        .collect();

    // barrier: nothing is assembled until every unit is terminal
    let joined = join_all(handles).await;

    let mut orchestration = Orchestration {
        results: Vec::with_capacity(keys.len()),
        failures: Vec::new(),
    };
    for (index, (key, outcome)) in keys.into_iter().zip(joined).enumerate() {
        match outcome {
            Ok(unit) => {
                orchestration.results.push(unit.result);
                orchestration.failures.extend(unit.failures);
            }
            Err(join_err) => {
                orchestration.failures.push(GenerationFailure {
                    index,
                    key: key.clone(),
                    stage: Stage::Task,
                    message: join_err.to_string(),
                });
                orchestration.results.push(PromptResult::empty(key));
            }
        }
    }
    orchestration
}

async fn run_unit(
    index: usize,
    spec: PromptSpec,
    text: Arc<dyn TextGenerator>,
    image: Arc<dyn ImageGenerator>,
) -> UnitOutcome {
    let mut result = PromptResult::empty(spec.key.clone());
    let mut failures = Vec::new();
    let mut fail = |stage: Stage, message: String| {
        failures.push(GenerationFailure {
            index,
            key: spec.key.clone(),
            stage,
            message,
        })
    };

    match text.generate(&spec.text).await {
        Ok(response) => {
            if spec.wants_image {
                match image.generate_image(&response).await {
                    Ok(url) => result.image_url = Some(url),
                    Err(e) => fail(Stage::Image, e.to_string()),
                }
            }
            result.response = response;
        }
        Err(e) => fail(Stage::Text, e.to_string()),
    }

    debug!(key = %spec.key, failed = failures.len(), "prompt unit finished");
    UnitOutcome { result, failures }
}
