use serde::Serialize;

/// Public name of a conversation stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageName {
    Consent,
    Identity,
    ExperienceLevel,
    TechStackSelection,
    TechnicalAssessment,
    Closing,
    Terminated,
}

/// What kind of input the UI should collect next.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputShape {
    FreeText,
    Confirmation,
    /// Suggested values; free text is still accepted.
    ChoiceList { options: Vec<String> },
}

/// Everything the UI needs to render the next prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSpec {
    pub stage: StageName,
    pub message: String,
    pub input: InputShape,
    /// Validation reason or follow-up remark to show above the prompt.
    pub notice: Option<String>,
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Completed,
    ConsentDeclined,
    ValidationFailed,
    TimedOut,
    Withdrawn,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ending {
    pub outcome: Outcome,
    pub message: String,
    pub notice: Option<String>,
}

/// Result of one conversation turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Turn {
    Prompt(RenderSpec),
    Ended(Ending),
}

impl Turn {
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            Turn::Prompt(_) => None,
            Turn::Ended(ending) => Some(ending.outcome),
        }
    }

    pub fn stage(&self) -> StageName {
        match self {
            Turn::Prompt(render) => render.stage,
            Turn::Ended(Ending {
                outcome: Outcome::Completed,
                ..
            }) => StageName::Closing,
            Turn::Ended(_) => StageName::Terminated,
        }
    }

    pub fn notice(&self) -> Option<&str> {
        match self {
            Turn::Prompt(render) => render.notice.as_deref(),
            Turn::Ended(ending) => ending.notice.as_deref(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Turn::Prompt(render) => &render.message,
            Turn::Ended(ending) => &ending.message,
        }
    }
}
