// Interview question and answer generation.
// All Gemini calls go through llm_client via the Gateway; handlers never call it directly.

pub mod classify;
pub mod gateway;
pub mod handlers;
pub mod models;
pub mod prompts;
