// Generation flows for the two model-backed operations (roadmap, advice).
// All LLM calls go through llm_client — no direct Anthropic SDK calls here.

pub mod actions;
pub mod advice;
pub mod handlers;
pub mod prompts;
pub mod roadmap;
