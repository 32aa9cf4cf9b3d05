// Shared prompt fragments. Each service that needs LLM calls defines its
// own prompts.rs alongside it; this file holds cross-cutting pieces only.

/// Instruction that precedes the expected JSON reply shape in prompts whose
/// replies are decoded as embedded JSON.
pub const JSON_REPLY_INSTRUCTION: &str = "Return the result as a JSON object in exactly this shape:";
