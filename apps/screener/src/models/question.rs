use serde::Serialize;

use crate::validation::SkillLevel;

/// Difficulty tier of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl From<SkillLevel> for Difficulty {
    fn from(level: SkillLevel) -> Self {
        match level {
            SkillLevel::Beginner => Difficulty::Beginner,
            SkillLevel::Intermediate => Difficulty::Intermediate,
            SkillLevel::Advanced => Difficulty::Advanced,
        }
    }
}

/// A single interview question. Immutable once generated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionRecord {
    pub technology: String,
    pub difficulty: Difficulty,
    pub text: String,
    /// True when the model wrote the question, false when it came from the bank.
    pub ai_generated: bool,
}
