// User-facing wrappers around the generation flows. Generation failures never
// escape this module as errors: callers get an in-band outcome carrying the
// message the UI shows, and the user decides whether to retry.

use serde::Serialize;
use tracing::error;

use crate::generation::advice::{generate_advice, GenerateAdviceInput, GenerateAdviceOutput};
use crate::generation::roadmap::{generate_roadmap, GenerateRoadmapInput, GenerateRoadmapOutput};
use crate::llm_client::LlmClient;

/// Advice failures show a fixed message; the underlying error only goes to the logs.
pub const ADVICE_ERROR_MESSAGE: &str = "Failed to generate AI advice. Please try again later.";
/// Roadmap failures keep the underlying error visible after this prefix.
pub const ROADMAP_ERROR_PREFIX: &str = "Failed to generate the roadmap. ";

/// Result envelope for the generation actions. Exactly one of `data` and
/// `error` is set, according to `success`.
#[derive(Debug, Serialize)]
pub struct ActionOutcome<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ActionOutcome<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

pub async fn generate_roadmap_action(
    llm: &LlmClient,
    input: &GenerateRoadmapInput,
) -> ActionOutcome<GenerateRoadmapOutput> {
    match generate_roadmap(llm, input).await {
        Ok(output) => ActionOutcome::ok(output),
        Err(e) => {
            error!("Roadmap generation failed: {e}");
            ActionOutcome::err(format!("{ROADMAP_ERROR_PREFIX}{e}"))
        }
    }
}

pub async fn generate_advice_action(
    llm: &LlmClient,
    input: &GenerateAdviceInput,
) -> ActionOutcome<GenerateAdviceOutput> {
    match generate_advice(llm, input).await {
        Ok(output) => ActionOutcome::ok(output),
        Err(e) => {
            error!("Advice generation failed: {e}");
            ActionOutcome::err(ADVICE_ERROR_MESSAGE)
        }
    }
}
