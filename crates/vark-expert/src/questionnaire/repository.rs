use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use super::session::{QuestionnaireSession, SessionId};

/// Sessions untouched for this long are dropped from the in-memory store.
pub const DEFAULT_IDLE_TIMEOUT_SECS: i64 = 60 * 60;

/// Storage abstraction so each respondent keeps an independent session.
pub trait SessionRepository: Send + Sync {
    fn insert(&self, session: QuestionnaireSession) -> Result<QuestionnaireSession, RepositoryError>;
    fn fetch(&self, id: &SessionId) -> Result<Option<QuestionnaireSession>, RepositoryError>;
    /// Applies `change` to the stored session while no other writer can touch it.
    fn modify<T, F>(&self, id: &SessionId, change: F) -> Result<T, RepositoryError>
    where
        F: FnOnce(&mut QuestionnaireSession) -> T;
    fn remove(&self, id: &SessionId) -> Result<(), RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("session already exists")]
    Conflict,
    #[error("session not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Process-local session store; sessions do not survive a restart and expire
/// after sitting idle for the configured timeout.
#[derive(Clone)]
pub struct InMemorySessionRepository {
    sessions: Arc<Mutex<HashMap<SessionId, QuestionnaireSession>>>,
    idle_timeout: Duration,
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::with_idle_timeout(Duration::seconds(DEFAULT_IDLE_TIMEOUT_SECS))
    }
}

impl InMemorySessionRepository {
    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            idle_timeout,
        }
    }

    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every session idle since before `now - idle_timeout`; returns how many.
    pub fn evict_idle(&self, now: DateTime<Utc>) -> Result<usize, RepositoryError> {
        let mut guard = self.lock()?;
        Ok(self.evict_locked(&mut guard, now))
    }

    fn evict_locked(
        &self,
        sessions: &mut HashMap<SessionId, QuestionnaireSession>,
        now: DateTime<Utc>,
    ) -> usize {
        let before = sessions.len();
        sessions.retain(|_, session| !self.is_expired(session, now));
        let evicted = before - sessions.len();
        if evicted > 0 {
            debug!(evicted, remaining = sessions.len(), "expired idle sessions");
        }
        evicted
    }

    fn is_expired(&self, session: &QuestionnaireSession, now: DateTime<Utc>) -> bool {
        now - session.last_active() > self.idle_timeout
    }

    /// Looks up a live session, discarding it instead if it has expired.
    fn live_entry<'a>(
        &self,
        sessions: &'a mut HashMap<SessionId, QuestionnaireSession>,
        id: &SessionId,
    ) -> Option<&'a mut QuestionnaireSession> {
        let expired = sessions
            .get(id)
            .map(|session| self.is_expired(session, Utc::now()))?;
        if expired {
            sessions.remove(id);
            return None;
        }
        sessions.get_mut(id)
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<SessionId, QuestionnaireSession>>, RepositoryError> {
        self.sessions
            .lock()
            .map_err(|_| RepositoryError::Unavailable("session store poisoned".to_string()))
    }
}

impl SessionRepository for InMemorySessionRepository {
    fn insert(&self, session: QuestionnaireSession) -> Result<QuestionnaireSession, RepositoryError> {
        let mut guard = self.lock()?;
        self.evict_locked(&mut guard, Utc::now());
        if guard.contains_key(session.id()) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(session.id().clone(), session.clone());
        Ok(session)
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<QuestionnaireSession>, RepositoryError> {
        let mut guard = self.lock()?;
        Ok(self.live_entry(&mut guard, id).cloned())
    }

    fn modify<T, F>(&self, id: &SessionId, change: F) -> Result<T, RepositoryError>
    where
        F: FnOnce(&mut QuestionnaireSession) -> T,
    {
        let mut guard = self.lock()?;
        let session = self
            .live_entry(&mut guard, id)
            .ok_or(RepositoryError::NotFound)?;
        Ok(change(session))
    }

    fn remove(&self, id: &SessionId) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questionnaire::domain::{Question, StrategyBook, VarkStyle};
    use crate::questionnaire::knowledge::KnowledgeBase;

    fn session(id: &str) -> QuestionnaireSession {
        let knowledge = KnowledgeBase::new(
            vec![Question {
                code: "Q1".to_string(),
                text: "Prompt".to_string(),
                category: VarkStyle::Visual,
                weight: 1,
            }],
            Vec::new(),
            StrategyBook::default(),
        )
        .expect("valid knowledge base");
        QuestionnaireSession::new(SessionId(id.to_string()), Arc::new(knowledge))
    }

    #[test]
    fn idle_sessions_are_evicted() {
        let repository = InMemorySessionRepository::default();
        repository.insert(session("a")).expect("insert");
        repository.insert(session("b")).expect("insert");

        assert_eq!(repository.evict_idle(Utc::now()).expect("evict"), 0);

        let later = Utc::now() + repository.idle_timeout() + Duration::seconds(1);
        assert_eq!(repository.evict_idle(later).expect("evict"), 2);
        assert!(repository.is_empty());
    }

    #[test]
    fn insert_sweeps_expired_sessions() {
        let repository = InMemorySessionRepository::with_idle_timeout(Duration::zero());
        repository.insert(session("stale")).expect("insert");
        std::thread::sleep(std::time::Duration::from_millis(5));

        repository.insert(session("fresh")).expect("insert");

        assert_eq!(repository.len(), 1);
        assert!(repository
            .fetch(&SessionId("stale".to_string()))
            .expect("fetch")
            .is_none());
    }

    #[test]
    fn expired_session_cannot_be_modified() {
        let repository = InMemorySessionRepository::with_idle_timeout(Duration::zero());
        repository.insert(session("stale")).expect("insert");
        std::thread::sleep(std::time::Duration::from_millis(5));

        let result = repository.modify(&SessionId("stale".to_string()), |session| {
            session.answer(true)
        });

        assert!(matches!(result, Err(RepositoryError::NotFound)));
        assert!(repository.is_empty());
    }
}
