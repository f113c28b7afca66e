use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use crate::models::question::QuestionRecord;
use crate::privacy::{Retainable, Retention};
use crate::validation::SkillLevel;

/// A technology the candidate selected, with their self-rated level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechnologyChoice {
    /// Name as typed by the candidate.
    pub name: String,
    /// Question bank key, or `None` for technologies outside the bank ("other").
    pub canonical: Option<String>,
    pub level: SkillLevel,
}

impl TechnologyChoice {
    pub fn is_other(&self) -> bool {
        self.canonical.is_none()
    }

    /// Identity used for duplicate detection.
    pub fn key(&self) -> String {
        self.canonical
            .clone()
            .unwrap_or_else(|| self.name.to_lowercase())
    }
}

/// One answered question plus the remark shown after it.
#[derive(Debug, Clone)]
pub struct Exchange {
    pub question: QuestionRecord,
    pub answer: String,
    pub follow_up: String,
    pub answered_at: DateTime<Utc>,
}

/// Everything collected from one candidate during a session.
/// Owned by exactly one session and only mutated by the conversation manager.
#[derive(Debug, Clone)]
pub struct CandidateProfile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub years_experience: Option<f64>,
    pub technologies: Vec<TechnologyChoice>,
    pub exchanges: Vec<Exchange>,
    pub consent: bool,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub retention: Retention,
}

impl CandidateProfile {
    pub fn new(created_at: DateTime<Utc>) -> Self {
        Self {
            name: None,
            email: None,
            phone: None,
            years_experience: None,
            technologies: Vec::new(),
            exchanges: Vec::new(),
            consent: false,
            completed: false,
            created_at,
            retention: Retention::default(),
        }
    }

    pub fn grant_consent(&mut self) {
        self.consent = true;
    }

    /// Records an answered question. Refused (returns false) without consent.
    pub fn record_exchange(&mut self, exchange: Exchange) -> bool {
        if !self.consent {
            warn!("Refusing to record an answer before consent was granted");
            return false;
        }
        self.exchanges.push(exchange);
        true
    }

    /// Whether identity fields are all present.
    pub fn has_identity(&self) -> bool {
        self.name.is_some() && self.email.is_some() && self.phone.is_some()
    }
}

impl Retainable for CandidateProfile {
    fn retention(&self) -> &Retention {
        &self.retention
    }

    fn retention_mut(&mut self) -> &mut Retention {
        &mut self.retention
    }
}
