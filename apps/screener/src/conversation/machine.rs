//! Conversation Manager: the interview state machine.
//!
//! Flow: Consent → Identity(name, email, phone) → ExperienceLevel →
//!       TechStackSelection → TechnicalAssessment(one per technology) → Closing.
//!
//! Stages only move forward. A validation failure keeps the current stage and
//! re-prompts with the validator's reason. Gateway failures never surface here:
//! `Interviewer` always hands back questions and a remark. Sessions end early only
//! on consent refusal or withdrawal, identity retry exhaustion, or inactivity.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tracing::info;
use uuid::Uuid;

use crate::config::InterviewConfig;
use crate::conversation::messages;
use crate::conversation::turn::{Ending, InputShape, Outcome, RenderSpec, StageName, Turn};
use crate::gateway::{Interviewer, QuestionRequest};
use crate::models::profile::{CandidateProfile, Exchange, TechnologyChoice};
use crate::models::question::QuestionRecord;
use crate::privacy::{log_interaction, request_immediate_deletion, schedule_deletion};
use crate::validation::{
    validate_answer, validate_email, validate_experience, validate_name, validate_phone,
    validate_technology_entries, SkillLevel, ValidationError,
};

const AFFIRMATIVE: &[&str] = &[
    "yes", "y", "i consent", "consent", "agree", "i agree", "continue", "proceed", "ok",
];
const NEGATIVE: &[&str] = &["no", "n", "decline", "i decline", "i do not consent", "disagree"];
const EXIT_WORDS: &[&str] = &[
    "exit",
    "quit",
    "bye",
    "goodbye",
    "stop",
    "cancel",
    "no thanks",
    "not interested",
];
const DELETION_PHRASES: &[&str] = &["delete my data", "delete data"];
const DONE_WORDS: &[&str] = &["done", "finished", "that's all", "thats all", "no more", "next"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentityField {
    Name,
    Email,
    Phone,
}

/// Progress through one technology's questions.
#[derive(Debug, Clone)]
pub struct Assessment {
    pub technology_index: usize,
    pub questions: Vec<QuestionRecord>,
    pub question_index: usize,
}

#[derive(Debug, Clone)]
pub enum Stage {
    Consent,
    Identity(IdentityField),
    ExperienceLevel,
    TechStackSelection,
    TechnicalAssessment(Assessment),
    Closing(Ending),
    Terminated(Ending),
}

impl Stage {
    pub fn name(&self) -> StageName {
        match self {
            Stage::Consent => StageName::Consent,
            Stage::Identity(_) => StageName::Identity,
            Stage::ExperienceLevel => StageName::ExperienceLevel,
            Stage::TechStackSelection => StageName::TechStackSelection,
            Stage::TechnicalAssessment(_) => StageName::TechnicalAssessment,
            Stage::Closing(_) => StageName::Closing,
            Stage::Terminated(_) => StageName::Terminated,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.ending().is_some()
    }

    /// The stored ending once the session reached a terminal stage.
    pub fn ending(&self) -> Option<&Ending> {
        match self {
            Stage::Closing(ending) | Stage::Terminated(ending) => Some(ending),
            _ => None,
        }
    }

    fn step(&self) -> Step {
        match self {
            Stage::Consent => Step::Consent,
            Stage::Identity(field) => Step::Identity(*field),
            Stage::ExperienceLevel => Step::Experience,
            Stage::TechStackSelection => Step::TechStack,
            Stage::TechnicalAssessment(_) | Stage::Closing(_) | Stage::Terminated(_) => Step::Answer,
        }
    }
}

/// Key for per-step attempt counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Step {
    Consent,
    Identity(IdentityField),
    Experience,
    TechStack,
    Answer,
}

/// Control state of a session.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub stage: Stage,
    failed_attempts: HashMap<Step, u32>,
    pub started_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub deadline: DateTime<Utc>,
}

impl SessionState {
    pub fn failed_attempts(&self) -> u32 {
        self.failed_attempts
            .get(&self.stage.step())
            .copied()
            .unwrap_or(0)
    }
}

/// One candidate interaction, from consent to a terminal outcome.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub state: SessionState,
    pub profile: CandidateProfile,
}

impl Session {
    pub fn ending(&self) -> Option<&Ending> {
        self.state.stage.ending()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.ending().map(|e| e.outcome)
    }
}

pub struct ConversationManager {
    config: InterviewConfig,
    interviewer: Interviewer,
}

impl ConversationManager {
    pub fn new(config: InterviewConfig, interviewer: Interviewer) -> Self {
        Self {
            config,
            interviewer,
        }
    }

    pub fn config(&self) -> &InterviewConfig {
        &self.config
    }

    /// Creates a session and returns its opening prompt.
    pub fn start_session(&self, id: Uuid, now: DateTime<Utc>) -> (Session, Turn) {
        let session = Session {
            id,
            state: SessionState {
                stage: Stage::Consent,
                failed_attempts: HashMap::new(),
                started_at: now,
                last_activity: now,
                deadline: now + self.timeout(),
            },
            profile: CandidateProfile::new(now),
        };
        let started_at = now.to_rfc3339();
        log_interaction(id, "session_start", &[("started_at", started_at.as_str())]);

        let turn = Turn::Prompt(RenderSpec {
            stage: StageName::Consent,
            message: messages::opening(&self.config.company_name, self.config.retention_days),
            input: InputShape::Confirmation,
            notice: None,
        });
        (session, turn)
    }

    /// Processes one raw input to completion and returns the next prompt or ending.
    pub async fn handle_input(&self, session: &mut Session, input: &str, now: DateTime<Utc>) -> Turn {
        let normalized = input.trim().to_lowercase();

        let turn = match session.state.stage.clone() {
            Stage::Closing(ending) | Stage::Terminated(ending) => return Turn::Ended(ending),
            _ if now >= session.state.deadline => {
                return self.finish(session, Outcome::TimedOut, None, now)
            }
            _ if DELETION_PHRASES.contains(&normalized.as_str()) => {
                return self.request_deletion(session, now)
            }
            Stage::Consent => self.on_consent(session, &normalized, now),
            _ if EXIT_WORDS.contains(&normalized.as_str()) => {
                self.finish(session, Outcome::Withdrawn, None, now)
            }
            Stage::Identity(field) => self.on_identity(session, field, input, now),
            Stage::ExperienceLevel => self.on_experience(session, input),
            Stage::TechStackSelection => self.on_tech_stack(session, input, &normalized, now).await,
            Stage::TechnicalAssessment(assessment) => {
                self.on_answer(session, assessment, input, now).await
            }
        };

        session.state.last_activity = now;
        session.state.deadline = now + self.timeout();

        if let Turn::Prompt(render) = &turn {
            info!(session_id = %session.id, stage = ?render.stage, "Turn processed");
        }
        turn
    }

    /// Moves an idle session to the timed-out outcome. True only on the transition.
    pub fn expire_if_idle(&self, session: &mut Session, now: DateTime<Utc>) -> bool {
        if session.state.stage.is_terminal() || now < session.state.deadline {
            return false;
        }
        self.finish(session, Outcome::TimedOut, None, now);
        true
    }

    /// Marks the profile for priority purge and ends the session if it is still open.
    pub fn request_deletion(&self, session: &mut Session, now: DateTime<Utc>) -> Turn {
        request_immediate_deletion(&mut session.profile, now);
        log_interaction(session.id, "data_deletion_request", &[]);

        match session.ending() {
            Some(ending) => Turn::Ended(ending.clone()),
            None => self.finish(session, Outcome::Withdrawn, None, now),
        }
    }

    // ────────────────────────────────────────────────────────────────────────
    // Stage handlers
    // ────────────────────────────────────────────────────────────────────────

    fn on_consent(&self, session: &mut Session, normalized: &str, now: DateTime<Utc>) -> Turn {
        if AFFIRMATIVE.contains(&normalized) {
            session.profile.grant_consent();
            let at = now.to_rfc3339();
            log_interaction(session.id, "consent_given", &[("at", at.as_str())]);
            return self.advance(
                session,
                Stage::Identity(IdentityField::Name),
                messages::ask_name(),
                None,
            );
        }

        if NEGATIVE.contains(&normalized) || EXIT_WORDS.contains(&normalized) {
            return self.finish(session, Outcome::ConsentDeclined, None, now);
        }

        self.bump_failures(session);
        self.prompt(
            session,
            messages::consent_reprompt(),
            InputShape::Confirmation,
            None,
        )
    }

    fn on_identity(
        &self,
        session: &mut Session,
        field: IdentityField,
        input: &str,
        now: DateTime<Utc>,
    ) -> Turn {
        let result = match field {
            IdentityField::Name => validate_name(input),
            IdentityField::Email => validate_email(input),
            IdentityField::Phone => validate_phone(input),
        };

        let value = match result {
            Ok(value) => value,
            Err(err) => return self.on_identity_invalid(session, field, err, now),
        };

        match field {
            IdentityField::Name => {
                let message = messages::ask_email(&value);
                session.profile.name = Some(value);
                self.advance(session, Stage::Identity(IdentityField::Email), message, None)
            }
            IdentityField::Email => {
                session.profile.email = Some(value);
                self.advance(
                    session,
                    Stage::Identity(IdentityField::Phone),
                    messages::ask_phone(),
                    None,
                )
            }
            IdentityField::Phone => {
                session.profile.phone = Some(value);
                let profile = &session.profile;
                log_interaction(
                    session.id,
                    "identity_collected",
                    &[
                        ("name", profile.name.as_deref().unwrap_or_default()),
                        ("email", profile.email.as_deref().unwrap_or_default()),
                        ("phone", profile.phone.as_deref().unwrap_or_default()),
                    ],
                );
                self.advance(session, Stage::ExperienceLevel, messages::ask_experience(), None)
            }
        }
    }

    fn on_identity_invalid(
        &self,
        session: &mut Session,
        field: IdentityField,
        err: ValidationError,
        now: DateTime<Utc>,
    ) -> Turn {
        let failures = self.bump_failures(session);
        if failures > self.config.max_validation_retries {
            info!(
                session_id = %session.id,
                ?field,
                failures,
                "Validation retries exhausted"
            );
            return self.finish(
                session,
                Outcome::ValidationFailed,
                Some(err.reason.clone()),
                now,
            );
        }

        let message = match field {
            IdentityField::Name => "Please provide your full name:".to_string(),
            IdentityField::Email => "Please provide your email address:".to_string(),
            IdentityField::Phone => "Please provide your phone number:".to_string(),
        };
        self.prompt(session, message, InputShape::FreeText, Some(err.reason))
    }

    fn on_experience(&self, session: &mut Session, input: &str) -> Turn {
        match validate_experience(input) {
            Ok(years) => {
                session.profile.years_experience = Some(years);
                let options = self.tech_options();
                self.advance_with(
                    session,
                    Stage::TechStackSelection,
                    messages::ask_tech_stack(self.config.max_technologies),
                    InputShape::ChoiceList { options },
                    None,
                )
            }
            Err(err) => {
                self.bump_failures(session);
                self.prompt(
                    session,
                    "Please enter your years of professional experience as a number between 0 and 50:"
                        .to_string(),
                    InputShape::FreeText,
                    Some(err.reason),
                )
            }
        }
    }

    async fn on_tech_stack(
        &self,
        session: &mut Session,
        input: &str,
        normalized: &str,
        now: DateTime<Utc>,
    ) -> Turn {
        if DONE_WORDS.contains(&normalized) {
            if session.profile.technologies.is_empty() {
                self.bump_failures(session);
                return self.tech_prompt(session, messages::tech_needed());
            }
            return self.begin_assessment(session, 0, None, now).await;
        }

        let choices = match self.parse_choices(&session.profile, input) {
            Ok(choices) => choices,
            Err(reason) => {
                self.bump_failures(session);
                return self.tech_prompt(session, reason);
            }
        };

        let added: Vec<String> = choices.iter().map(|c| c.name.clone()).collect();
        session.profile.technologies.extend(choices);

        let remaining = self
            .config
            .max_technologies
            .saturating_sub(session.profile.technologies.len());
        if remaining == 0 {
            let notice = format!("Added: {}.", added.join(", "));
            return self.begin_assessment(session, 0, Some(notice), now).await;
        }

        self.tech_prompt(session, messages::tech_added(&added, remaining))
    }

    async fn on_answer(
        &self,
        session: &mut Session,
        mut assessment: Assessment,
        input: &str,
        now: DateTime<Utc>,
    ) -> Turn {
        let question = assessment.questions[assessment.question_index].clone();

        let answer = match validate_answer(input) {
            Ok(answer) => answer,
            Err(err) => {
                self.bump_failures(session);
                return self.question_prompt(session, &assessment, Some(err.reason));
            }
        };

        let follow_up = self.interviewer.followup(&question, &answer).await;
        session.profile.record_exchange(Exchange {
            question,
            answer,
            follow_up: follow_up.clone(),
            answered_at: now,
        });

        assessment.question_index += 1;
        if assessment.question_index < assessment.questions.len() {
            session.state.stage = Stage::TechnicalAssessment(assessment.clone());
            return self.question_prompt(session, &assessment, Some(follow_up));
        }

        self.begin_assessment(session, assessment.technology_index + 1, Some(follow_up), now)
            .await
    }

    // ────────────────────────────────────────────────────────────────────────
    // Transitions
    // ────────────────────────────────────────────────────────────────────────

    /// Requests questions for the technology at `index`, skipping any that yield
    /// none. Past the last technology the session closes.
    async fn begin_assessment(
        &self,
        session: &mut Session,
        mut index: usize,
        notice: Option<String>,
        now: DateTime<Utc>,
    ) -> Turn {
        while index < session.profile.technologies.len() {
            let technology = &session.profile.technologies[index];
            let request = QuestionRequest {
                technology: &technology.name,
                level: technology.level,
                years_experience: session.profile.years_experience.unwrap_or(0.0),
                history: &session.profile.exchanges,
                count: self.config.questions_per_technology,
            };
            let questions = self.interviewer.questions(&request).await;

            if !questions.is_empty() {
                let assessment = Assessment {
                    technology_index: index,
                    questions,
                    question_index: 0,
                };
                self.reset_failures(session);
                session.state.stage = Stage::TechnicalAssessment(assessment.clone());
                return self.question_prompt(session, &assessment, notice);
            }
            index += 1;
        }

        self.finish(session, Outcome::Completed, notice, now)
    }

    /// Moves the session to its terminal stage and schedules retention deletion.
    fn finish(
        &self,
        session: &mut Session,
        outcome: Outcome,
        notice: Option<String>,
        now: DateTime<Utc>,
    ) -> Turn {
        if outcome == Outcome::Completed {
            session.profile.completed = true;
        }
        schedule_deletion(&mut session.profile, self.config.retention_days, now);

        let company = &self.config.company_name;
        let message = match outcome {
            Outcome::Completed => messages::summary(&session.profile, company),
            Outcome::ConsentDeclined => messages::consent_declined(company),
            Outcome::ValidationFailed => {
                messages::validation_failed(notice.as_deref().unwrap_or("too many invalid attempts"))
            }
            Outcome::TimedOut => messages::timed_out(),
            Outcome::Withdrawn => {
                messages::withdrawn(session.profile.retention.purge_requested_at.is_some())
            }
        };

        if outcome == Outcome::Completed {
            let answered = session.profile.exchanges.len().to_string();
            let technologies = session
                .profile
                .technologies
                .iter()
                .map(|t| t.key())
                .collect::<Vec<_>>()
                .join(",");
            log_interaction(
                session.id,
                "assessment_complete",
                &[
                    ("questions_answered", answered.as_str()),
                    ("technologies", technologies.as_str()),
                ],
            );
        }

        let outcome_label = format!("{outcome:?}");
        log_interaction(
            session.id,
            "session_ended",
            &[("outcome", outcome_label.as_str())],
        );
        info!(session_id = %session.id, ?outcome, "Session finished");

        let ending = Ending {
            outcome,
            message,
            notice,
        };
        session.state.stage = match outcome {
            Outcome::Completed => Stage::Closing(ending.clone()),
            _ => Stage::Terminated(ending.clone()),
        };
        Turn::Ended(ending)
    }

    fn advance(
        &self,
        session: &mut Session,
        stage: Stage,
        message: String,
        notice: Option<String>,
    ) -> Turn {
        self.advance_with(session, stage, message, InputShape::FreeText, notice)
    }

    fn advance_with(
        &self,
        session: &mut Session,
        stage: Stage,
        message: String,
        input: InputShape,
        notice: Option<String>,
    ) -> Turn {
        self.reset_failures(session);
        session.state.stage = stage;
        self.prompt(session, message, input, notice)
    }

    // ────────────────────────────────────────────────────────────────────────
    // Helpers
    // ────────────────────────────────────────────────────────────────────────

    fn prompt(
        &self,
        session: &Session,
        message: String,
        input: InputShape,
        notice: Option<String>,
    ) -> Turn {
        Turn::Prompt(RenderSpec {
            stage: session.state.stage.name(),
            message,
            input,
            notice,
        })
    }

    fn tech_prompt(&self, session: &Session, notice: String) -> Turn {
        self.prompt(
            session,
            messages::ask_tech_stack(self.config.max_technologies),
            InputShape::ChoiceList {
                options: self.tech_options(),
            },
            Some(notice),
        )
    }

    fn question_prompt(
        &self,
        session: &Session,
        assessment: &Assessment,
        notice: Option<String>,
    ) -> Turn {
        let record = &assessment.questions[assessment.question_index];
        let display = session
            .profile
            .technologies
            .get(assessment.technology_index)
            .map(|t| t.name.as_str())
            .unwrap_or(record.technology.as_str());
        let message = messages::question(
            record,
            display,
            assessment.question_index,
            assessment.questions.len(),
            assessment.technology_index,
            session.profile.technologies.len(),
        );
        self.prompt(session, message, InputShape::FreeText, notice)
    }

    fn tech_options(&self) -> Vec<String> {
        let mut options: Vec<String> = self
            .interviewer
            .bank()
            .supported_technologies()
            .into_iter()
            .map(str::to_string)
            .collect();
        options.push("done".to_string());
        options
    }

    /// Validates a technology input against the current selection. All or nothing.
    fn parse_choices(
        &self,
        profile: &CandidateProfile,
        input: &str,
    ) -> Result<Vec<TechnologyChoice>, String> {
        let entries = validate_technology_entries(input).map_err(|e| e.reason)?;
        let default_level = SkillLevel::from_years(profile.years_experience.unwrap_or(0.0));
        let bank = self.interviewer.bank();

        let mut choices: Vec<TechnologyChoice> = Vec::with_capacity(entries.len());
        for entry in entries {
            let choice = TechnologyChoice {
                canonical: bank.resolve(&entry.name).map(str::to_string),
                level: entry.level.unwrap_or(default_level),
                name: entry.name,
            };
            let key = choice.key();
            if profile.technologies.iter().chain(&choices).any(|c| c.key() == key) {
                return Err(format!("{} is already in your list", choice.name));
            }
            choices.push(choice);
        }

        if profile.technologies.len() + choices.len() > self.config.max_technologies {
            return Err(format!(
                "Please limit your list to {} technologies",
                self.config.max_technologies
            ));
        }
        Ok(choices)
    }

    fn bump_failures(&self, session: &mut Session) -> u32 {
        let counter = session
            .state
            .failed_attempts
            .entry(session.state.stage.step())
            .or_insert(0);
        *counter += 1;
        *counter
    }

    fn reset_failures(&self, session: &mut Session) {
        let step = session.state.stage.step();
        session.state.failed_attempts.remove(&step);
    }

    fn timeout(&self) -> Duration {
        Duration::from_std(self.config.session_timeout).unwrap_or_else(|_| Duration::hours(1))
    }
}
