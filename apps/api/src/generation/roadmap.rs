// Roadmap generation — turns a goal plus a freeform skills description into
// a structured, checkable learning roadmap.

use serde::{Deserialize, Serialize};

use crate::generation::prompts::{ROADMAP_PROMPT_TEMPLATE, ROADMAP_SYSTEM};
use crate::llm_client::{LlmClient, LlmError};
use crate::models::roadmap::Roadmap;

/// What the user tells us: where they are and where they want to go.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRoadmapInput {
    pub current_skills: String,
    pub goal: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRoadmapOutput {
    pub roadmap: Roadmap,
}

/// Generates a personalized roadmap via the LLM.
pub async fn generate_roadmap(
    llm: &LlmClient,
    input: &GenerateRoadmapInput,
) -> Result<GenerateRoadmapOutput, LlmError> {
    let prompt = ROADMAP_PROMPT_TEMPLATE
        .replace("{goal}", &input.goal)
        .replace("{current_skills}", &input.current_skills);

    llm.call_json::<GenerateRoadmapOutput>(&prompt, ROADMAP_SYSTEM)
        .await
}
