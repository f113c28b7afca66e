//! LLM Gateway: question generation and follow-up remarks.
//!
//! Two backends implement `InterviewerBackend`: `LlmGateway` (remote model) and
//! `StaticInterviewer` (question bank and canned remarks). `Interviewer` composes
//! them as try-then-fallback, so callers always get a usable value and never see a
//! gateway error.

pub mod parse;
pub mod prompts;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::seq::SliceRandom;
use thiserror::Error;
use tracing::{debug, warn};

use crate::llm_client::prompts::{INTERVIEWER_PERSONA, PLAIN_TEXT_INSTRUCTION};
use crate::llm_client::{CompletionProvider, LlmError};
use crate::models::profile::Exchange;
use crate::models::question::{Difficulty, QuestionRecord};
use crate::question_bank::QuestionBank;
use crate::validation::SkillLevel;
use parse::{parse_followup, parse_question_list};
use prompts::{EMPTY_HISTORY, FOLLOWUP_PROMPT_TEMPLATE, QUESTIONS_PROMPT_TEMPLATE};

/// Prior exchanges included in a question prompt.
const HISTORY_WINDOW: usize = 5;
/// Answer characters kept per exchange in prompts.
const PROMPT_ANSWER_CHARS: usize = 300;

/// Remarks used when the model cannot produce one.
const FALLBACK_REMARKS: &[&str] = &[
    "Thank you for that detailed explanation. Your experience shows good technical understanding.",
    "I appreciate your thorough response. That demonstrates solid problem-solving skills.",
    "Thanks for walking me through your approach. It's clear you've thought about this in practice.",
];

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("model call timed out after {0:?}")]
    Timeout(Duration),

    #[error("model call failed: {0}")]
    Provider(#[from] LlmError),

    #[error("unparseable model output: {0}")]
    Unparseable(String),
}

/// Context for a question-generation request.
#[derive(Debug, Clone, Copy)]
pub struct QuestionRequest<'a> {
    /// Technology name as the candidate typed it.
    pub technology: &'a str,
    pub level: SkillLevel,
    pub years_experience: f64,
    pub history: &'a [Exchange],
    pub count: usize,
}

#[async_trait]
pub trait InterviewerBackend: Send + Sync {
    async fn generate_questions(
        &self,
        request: &QuestionRequest<'_>,
    ) -> Result<Vec<String>, GatewayError>;

    async fn generate_followup(
        &self,
        question: &QuestionRecord,
        answer: &str,
    ) -> Result<String, GatewayError>;
}

// ────────────────────────────────────────────────────────────────────────────
// LlmGateway: remote model backend
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmGateway {
    provider: Arc<dyn CompletionProvider>,
    timeout: Duration,
    system: String,
}

impl LlmGateway {
    pub fn new(provider: Arc<dyn CompletionProvider>, timeout: Duration, company: &str) -> Self {
        let system = format!(
            "{}\n\n{}",
            INTERVIEWER_PERSONA.replace("{company}", company),
            PLAIN_TEXT_INSTRUCTION
        );
        Self {
            provider,
            timeout,
            system,
        }
    }

    /// One bounded call. Dropping the future on timeout abandons the request.
    async fn complete(&self, prompt: &str) -> Result<String, GatewayError> {
        match tokio::time::timeout(self.timeout, self.provider.complete(&self.system, prompt)).await
        {
            Ok(result) => Ok(result?),
            Err(_) => Err(GatewayError::Timeout(self.timeout)),
        }
    }
}

#[async_trait]
impl InterviewerBackend for LlmGateway {
    async fn generate_questions(
        &self,
        request: &QuestionRequest<'_>,
    ) -> Result<Vec<String>, GatewayError> {
        let prompt = build_questions_prompt(request);
        let text = self.complete(&prompt).await?;
        let mut questions = parse_question_list(&text)?;
        questions.truncate(request.count);
        debug!(
            "Model produced {} questions for {}",
            questions.len(),
            request.technology
        );
        Ok(questions)
    }

    async fn generate_followup(
        &self,
        question: &QuestionRecord,
        answer: &str,
    ) -> Result<String, GatewayError> {
        let prompt = FOLLOWUP_PROMPT_TEMPLATE
            .replace("{technology}", &question.technology)
            .replace("{question}", &question.text)
            .replace("{answer}", &clip(answer, PROMPT_ANSWER_CHARS * 4));
        let text = self.complete(&prompt).await?;
        parse_followup(&text)
    }
}

fn build_questions_prompt(request: &QuestionRequest<'_>) -> String {
    QUESTIONS_PROMPT_TEMPLATE
        .replace("{count}", &request.count.to_string())
        .replace("{technology}", request.technology)
        .replace("{level}", request.level.as_str())
        .replace("{years}", &format!("{}", request.years_experience))
        .replace("{history}", &render_history(request.history))
}

fn render_history(history: &[Exchange]) -> String {
    if history.is_empty() {
        return EMPTY_HISTORY.to_string();
    }
    let start = history.len().saturating_sub(HISTORY_WINDOW);
    history[start..]
        .iter()
        .map(|ex| {
            format!(
                "Q ({}): {}\nA: {}",
                ex.question.technology,
                ex.question.text,
                clip(&ex.answer, PROMPT_ANSWER_CHARS)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn clip(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let mut clipped: String = text.chars().take(max_chars).collect();
        clipped.push('…');
        clipped
    }
}

// ────────────────────────────────────────────────────────────────────────────
// StaticInterviewer: question bank backend
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default)]
pub struct StaticInterviewer {
    bank: QuestionBank,
}

impl StaticInterviewer {
    pub fn new(bank: QuestionBank) -> Self {
        Self { bank }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    fn questions(&self, request: &QuestionRequest<'_>) -> Vec<QuestionRecord> {
        self.bank.questions_for(
            request.technology,
            Difficulty::from(request.level),
            request.count,
        )
    }

    fn remark(&self) -> String {
        FALLBACK_REMARKS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(FALLBACK_REMARKS[0])
            .to_string()
    }
}

#[async_trait]
impl InterviewerBackend for StaticInterviewer {
    async fn generate_questions(
        &self,
        request: &QuestionRequest<'_>,
    ) -> Result<Vec<String>, GatewayError> {
        Ok(self.questions(request).into_iter().map(|q| q.text).collect())
    }

    async fn generate_followup(
        &self,
        _question: &QuestionRecord,
        _answer: &str,
    ) -> Result<String, GatewayError> {
        Ok(self.remark())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Interviewer: try-then-fallback composition
// ────────────────────────────────────────────────────────────────────────────

/// Tries the primary backend first and substitutes the static one on any failure.
#[derive(Clone)]
pub struct Interviewer {
    primary: Arc<dyn InterviewerBackend>,
    fallback: StaticInterviewer,
}

impl Interviewer {
    pub fn new(primary: Arc<dyn InterviewerBackend>, fallback: StaticInterviewer) -> Self {
        Self { primary, fallback }
    }

    pub fn bank(&self) -> &QuestionBank {
        self.fallback.bank()
    }

    /// Returns up to `request.count` questions; model questions are topped up from
    /// the bank when the model returns too few.
    pub async fn questions(&self, request: &QuestionRequest<'_>) -> Vec<QuestionRecord> {
        let difficulty = Difficulty::from(request.level);
        let technology = self
            .bank()
            .resolve(request.technology)
            .map(str::to_string)
            .unwrap_or_else(|| request.technology.trim().to_string());

        match self.primary.generate_questions(request).await {
            Ok(texts) if !texts.is_empty() => {
                let mut records: Vec<QuestionRecord> = texts
                    .into_iter()
                    .take(request.count)
                    .map(|text| QuestionRecord {
                        technology: technology.clone(),
                        difficulty,
                        text,
                        ai_generated: true,
                    })
                    .collect();

                if records.len() < request.count {
                    let missing = request.count - records.len();
                    let extra: Vec<QuestionRecord> = self
                        .fallback
                        .questions(request)
                        .into_iter()
                        .filter(|q| !records.iter().any(|r| r.text == q.text))
                        .take(missing)
                        .collect();
                    records.extend(extra);
                }
                records
            }
            Ok(_) => {
                warn!(
                    "Model returned no questions for {}, using question bank",
                    request.technology
                );
                self.fallback.questions(request)
            }
            Err(e) => {
                warn!(
                    "Question generation failed for {}, using question bank: {e}",
                    request.technology
                );
                self.fallback.questions(request)
            }
        }
    }

    /// Returns a non-empty remark for the answered question.
    pub async fn followup(&self, question: &QuestionRecord, answer: &str) -> String {
        match self.primary.generate_followup(question, answer).await {
            Ok(remark) if !remark.trim().is_empty() => remark,
            Ok(_) => self.fallback.remark(),
            Err(e) => {
                warn!("Follow-up generation failed, using static remark: {e}");
                self.fallback.remark()
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use chrono::Utc;

    fn request(history: &[Exchange]) -> QuestionRequest<'_> {
        QuestionRequest {
            technology: "Python",
            level: SkillLevel::Intermediate,
            years_experience: 3.0,
            history,
            count: 3,
        }
    }

    #[tokio::test]
    async fn test_gateway_parses_numbered_questions() {
        let provider = Arc::new(ScriptedProvider::new(vec![Ok(
            "1. What is a decorator?\n2. What is a generator?\n3. What is the GIL?\n4. Extra?",
        )]));
        let questions = gateway(provider)
            .generate_questions(&request(&[]))
            .await
            .unwrap();
        assert_eq!(questions.len(), 3);
        assert_eq!(questions[0], "What is a decorator?");
    }

    #[tokio::test]
    async fn test_gateway_unparseable_output_is_error() {
        let provider = Arc::new(ScriptedProvider::new(vec![Ok("Sorry, I can't do that.")]));
        let err = gateway(provider)
            .generate_questions(&request(&[]))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Unparseable(_)));
    }

    #[tokio::test]
    async fn test_gateway_transport_error_is_error() {
        let provider = Arc::new(ScriptedProvider::new(vec![Err(401)]));
        let err = gateway(provider)
            .generate_followup(
                &QuestionRecord {
                    technology: "python".into(),
                    difficulty: Difficulty::Beginner,
                    text: "What is a list?".into(),
                    ai_generated: false,
                },
                "A sequence",
            )
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Provider(LlmError::Api { status: 401, .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_gateway_times_out() {
        let err = gateway(Arc::new(StalledProvider))
            .generate_questions(&request(&[]))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Timeout(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_interviewer_falls_back_on_timeout() {
        let interviewer = interviewer(Arc::new(StalledProvider));
        let questions = interviewer.questions(&request(&[])).await;
        assert_eq!(questions.len(), 3);
        assert!(questions.iter().all(|q| !q.ai_generated));
        assert!(questions.iter().all(|q| q.technology == "python"));
        assert!(questions
            .iter()
            .all(|q| q.difficulty == Difficulty::Intermediate));

        let remark = interviewer.followup(&questions[0], "answer").await;
        assert!(FALLBACK_REMARKS.contains(&remark.as_str()));
    }

    #[tokio::test]
    async fn test_interviewer_falls_back_on_unparseable_text() {
        let interviewer = interviewer(Arc::new(ScriptedProvider::new(vec![Ok("no list here")])));
        let questions = interviewer.questions(&request(&[])).await;
        assert_eq!(questions.len(), 3);
        assert!(questions.iter().all(|q| !q.ai_generated));
    }

    #[tokio::test]
    async fn test_interviewer_tops_up_short_model_list() {
        let interviewer =
            interviewer(Arc::new(ScriptedProvider::new(vec![Ok("1. Only one question?")])));
        let questions = interviewer.questions(&request(&[])).await;
        assert_eq!(questions.len(), 3);
        assert!(questions[0].ai_generated);
        assert_eq!(questions[0].text, "Only one question?");
        assert!(!questions[1].ai_generated);
        assert!(!questions[2].ai_generated);
    }

    #[tokio::test]
    async fn test_interviewer_uses_model_followup() {
        let provider = Arc::new(ScriptedProvider::new(vec![Ok(
            "Thanks, that is a clear explanation of list semantics.",
        )]));
        let interviewer = interviewer(provider.clone());
        let question = QuestionRecord {
            technology: "python".into(),
            difficulty: Difficulty::Beginner,
            text: "What is a list?".into(),
            ai_generated: false,
        };
        let remark = interviewer.followup(&question, "A sequence").await;
        assert_eq!(remark, "Thanks, that is a clear explanation of list semantics.");
        assert_eq!(provider.calls(), 1);
    }

    #[test]
    fn test_prompt_includes_recent_history_only() {
        let history: Vec<Exchange> = (0..7)
            .map(|i| Exchange {
                question: QuestionRecord {
                    technology: "python".into(),
                    difficulty: Difficulty::Beginner,
                    text: format!("Question {i}?"),
                    ai_generated: true,
                },
                answer: format!("Answer {i}"),
                follow_up: "Thanks".into(),
                answered_at: Utc::now(),
            })
            .collect();
        let prompt = build_questions_prompt(&request(&history));
        assert!(prompt.contains("Generate 3 practical"));
        assert!(prompt.contains("Self-rated Python level: intermediate"));
        assert!(prompt.contains("3 years"));
        assert!(!prompt.contains("Question 1?"));
        assert!(prompt.contains("Question 2?"));
        assert!(prompt.contains("Answer 6"));
    }

    #[test]
    fn test_prompt_without_history() {
        let prompt = build_questions_prompt(&request(&[]));
        assert!(prompt.contains(EMPTY_HISTORY));
    }
}
