use std::sync::Arc;

use crate::config::Config;
use crate::conversation::{ConversationManager, SessionStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub manager: Arc<ConversationManager>,
    /// Live sessions; the background sweeper holds another handle to the same store.
    pub sessions: Arc<SessionStore>,
}
