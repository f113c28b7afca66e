use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::conversation::Session;
use crate::conversation::turn::{Outcome, StageName, Turn};
use crate::errors::AppError;
use crate::state::AppState;

/// Upper bound on one raw input before it reaches the state machine.
const MAX_INPUT_CHARS: usize = 10_000;

#[derive(Deserialize)]
pub struct MessageRequest {
    pub input: String,
}

#[derive(Serialize)]
pub struct SessionCreated {
    pub session_id: Uuid,
    pub turn: Turn,
}

/// Session summary without raw identity fields.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub stage: StageName,
    pub outcome: Option<Outcome>,
    pub active: bool,
    pub consent: bool,
    pub identity_collected: bool,
    pub technologies: Vec<String>,
    pub questions_answered: usize,
    pub started_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub delete_after: Option<DateTime<Utc>>,
    pub purge_requested: bool,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        let profile = &session.profile;
        Self {
            session_id: session.id,
            stage: session.state.stage.name(),
            outcome: session.outcome(),
            active: !session.state.stage.is_terminal(),
            consent: profile.consent,
            identity_collected: profile.has_identity(),
            technologies: profile.technologies.iter().map(|t| t.key()).collect(),
            questions_answered: profile.exchanges.len(),
            started_at: session.state.started_at,
            last_activity: session.state.last_activity,
            delete_after: profile.retention.delete_after,
            purge_requested: profile.retention.purge_requested_at.is_some(),
        }
    }
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionCreated>) {
    let (session, turn) = state.manager.start_session(Uuid::new_v4(), Utc::now());
    let session_id = session.id;
    state.sessions.insert(session).await;
    (StatusCode::CREATED, Json(SessionCreated { session_id, turn }))
}

/// POST /api/v1/sessions/:id/messages
pub async fn handle_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<MessageRequest>,
) -> Result<Json<Turn>, AppError> {
    if req.input.chars().count() > MAX_INPUT_CHARS {
        return Err(AppError::Validation(format!(
            "Input exceeds {MAX_INPUT_CHARS} characters"
        )));
    }

    let handle = find(&state, id).await?;
    let mut session = handle.lock().await;
    let turn = state
        .manager
        .handle_input(&mut session, &req.input, Utc::now())
        .await;
    Ok(Json(turn))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let handle = find(&state, id).await?;
    let session = handle.lock().await;
    Ok(Json(SessionView::from(&*session)))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Turn>, AppError> {
    let handle = find(&state, id).await?;
    let mut session = handle.lock().await;
    Ok(Json(state.manager.request_deletion(&mut session, Utc::now())))
}

async fn find(
    state: &AppState,
    id: Uuid,
) -> Result<std::sync::Arc<tokio::sync::Mutex<Session>>, AppError> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
}
