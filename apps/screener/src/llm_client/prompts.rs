// Shared prompt fragments. Each caller that talks to the model keeps its own
// prompts.rs alongside it; this file only holds cross-cutting pieces.

/// Persona shared by every interviewer prompt. Replace `{company}` before sending.
pub const INTERVIEWER_PERSONA: &str = "You are a friendly, professional technical \
    interviewer screening candidates on behalf of {company}.";

/// Keeps responses free of markdown decoration and meta-commentary.
pub const PLAIN_TEXT_INSTRUCTION: &str = "Respond in plain text only. \
    Do NOT use markdown headings, bold text or code fences. \
    Do NOT include explanations of what you are doing or apologies.";
