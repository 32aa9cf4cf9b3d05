//! Prompt constants and builder for the Optimization module.
//! Reuses the cross-cutting JSON fragment from llm_client::prompts.

use crate::llm_client::prompts::JSON_REPLY_INSTRUCTION;

/// System prompt for résumé optimization.
pub const OPTIMIZE_SYSTEM: &str = "You are a professional resume optimization expert, \
    skilled at tailoring resume content to job requirements \
    to improve its match quality and professionalism.";

/// Reply shape the model is asked to produce. Decoded by
/// `optimizer::decode_reply`, which tolerates surrounding prose.
const REPLY_SHAPE: &str = r#"{
  "optimizedResume": "the complete optimized resume content",
  "suggestions": ["suggestion 1", "suggestion 2", "suggestion 3"],
  "keywords": ["keyword 1", "keyword 2", "keyword 3"]
}"#;

/// Builds the user prompt. With a target job the guidance is match-driven;
/// without one it is generic polish. Both variants end with the JSON shape.
pub fn build_optimize_prompt(personal_info: &str, target_job: Option<&str>) -> String {
    let mut prompt = String::from("Please help me optimize the following resume content:\n\n");

    prompt.push_str(&format!("[Personal Information]\n{personal_info}\n\n"));

    match target_job {
        Some(job) => {
            prompt.push_str(&format!("[Target Job Requirements]\n{job}\n\n"));
            prompt.push_str(
                "Optimize the resume against the target job requirements, including:\n\
                 1. Align keyword matching\n\
                 2. Improve the work-experience descriptions\n\
                 3. Highlight relevant skills and experience\n\
                 4. Provide improvement suggestions\n\n",
            );
        }
        None => {
            prompt.push_str(
                "Optimize the resume to make it more professional and compelling, including:\n\
                 1. Improve the wording\n\
                 2. Improve the structure and layout\n\
                 3. Highlight personal strengths\n\
                 4. Provide improvement suggestions\n\n",
            );
        }
    }

    prompt.push_str(JSON_REPLY_INSTRUCTION);
    prompt.push('\n');
    prompt.push_str(REPLY_SHAPE);

    prompt
}
