// Prompt templates for question generation and follow-up remarks.
// Placeholders are replaced with `str::replace` before sending.

/// Question generation prompt.
/// Replace: {count}, {technology}, {level}, {years}, {history}
pub const QUESTIONS_PROMPT_TEMPLATE: &str = r#"Generate {count} practical technical interview questions about {technology}.

CANDIDATE:
- Self-rated {technology} level: {level}
- Professional experience: {years} years

QUESTIONS AND ANSWERS SO FAR (do not repeat these topics):
{history}

Questions must be:
- Appropriate for the candidate's level and experience
- Focused on real-world application, not trivia
- Clear, specific and answerable in a few sentences
- Progressively more challenging

Return ONLY the questions as a numbered list from 1 to {count}, one per line, with no introduction or closing remarks."#;

/// Follow-up remark prompt.
/// Replace: {technology}, {question}, {answer}
pub const FOLLOWUP_PROMPT_TEMPLATE: &str = r#"A candidate just answered a {technology} interview question.

Question: {question}
Candidate's answer: {answer}

Write a brief, encouraging follow-up remark of 2-3 sentences that:
- Acknowledges the answer professionally
- Shows you understood what they said
- Keeps a positive, supportive tone
- Does NOT reveal whether the answer is correct or incorrect
- Does NOT ask a new question

Return only the remark."#;

/// Rendered into {history} when nothing has been answered yet.
pub const EMPTY_HISTORY: &str = "None yet.";
