use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

use crate::conversation::machine::{ConversationManager, Session};
use crate::privacy::is_purge_due;

/// In-memory sessions keyed by id. Each session sits behind its own lock so one
/// turn runs to completion before the next input for that session is accepted.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Arc<Mutex<Session>>>>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    pub expired: usize,
    pub purged: usize,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, session: Session) -> Arc<Mutex<Session>> {
        let id = session.id;
        let handle = Arc::new(Mutex::new(session));
        self.sessions.write().await.insert(id, handle.clone());
        handle
    }

    pub async fn get(&self, id: Uuid) -> Option<Arc<Mutex<Session>>> {
        self.sessions.read().await.get(&id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Times out idle sessions and drops those due for purge. Sessions locked by an
    /// in-flight turn are left for the next sweep.
    pub async fn sweep(&self, manager: &ConversationManager, now: DateTime<Utc>) -> SweepReport {
        let mut report = SweepReport::default();
        let mut sessions = self.sessions.write().await;

        sessions.retain(|_, handle| {
            let Ok(mut session) = handle.try_lock() else {
                return true;
            };
            if manager.expire_if_idle(&mut session, now) {
                report.expired += 1;
            }
            if is_purge_due(&session.profile, now) {
                report.purged += 1;
                return false;
            }
            true
        });

        report
    }
}

/// Runs `sweep` every `interval` until the runtime shuts down.
pub fn spawn_sweeper(
    store: Arc<SessionStore>,
    manager: Arc<ConversationManager>,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.tick().await; // first tick fires immediately

        loop {
            ticker.tick().await;
            let report = store.sweep(&manager, Utc::now()).await;
            if report.expired > 0 || report.purged > 0 {
                info!(
                    expired = report.expired,
                    purged = report.purged,
                    "Session sweep finished"
                );
            } else {
                debug!("Session sweep found nothing to do");
            }
        }
    })
}
