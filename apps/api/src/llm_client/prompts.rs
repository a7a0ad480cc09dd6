// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting fragments only.

/// Instruction appended to prompts that must come back as bare JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "You MUST respond with a single valid JSON object only. \
    Do NOT include any text before or after the JSON object. \
    Do NOT wrap the JSON in markdown code fences (no \"```json\" or \"```\"). \
    Do NOT include explanations or apologies.";
