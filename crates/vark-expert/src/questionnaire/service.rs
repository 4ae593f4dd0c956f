use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use super::domain::Answers;
use super::inference::InferenceEngine;
use super::knowledge::KnowledgeBase;
use super::report::{build_view, DiagnosisView};
use super::repository::{RepositoryError, SessionRepository};
use super::session::{QuestionnaireSession, SessionError, SessionId, SessionPhase, SessionView};

/// Service composing the knowledge base, session store and inference engine.
pub struct QuestionnaireService<R> {
    repository: Arc<R>,
    engine: InferenceEngine,
    knowledge: Arc<KnowledgeBase>,
}

/// Random so one respondent cannot reach another's session by guessing.
fn next_session_id() -> SessionId {
    SessionId(format!("session-{}", Uuid::new_v4().simple()))
}

impl<R> QuestionnaireService<R>
where
    R: SessionRepository + 'static,
{
    pub fn new(repository: Arc<R>, knowledge: Arc<KnowledgeBase>) -> Self {
        let engine = InferenceEngine::new(knowledge.clone());
        Self {
            repository,
            engine,
            knowledge,
        }
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Open a fresh session positioned on the first question.
    pub fn start(&self) -> Result<SessionView, QuestionnaireServiceError> {
        let session = QuestionnaireSession::new(next_session_id(), self.knowledge.clone());
        let stored = self.repository.insert(session)?;
        info!(session = %stored.id(), "questionnaire session started");
        Ok(stored.view())
    }

    pub fn get(&self, id: &SessionId) -> Result<SessionView, QuestionnaireServiceError> {
        Ok(self.load(id)?.view())
    }

    pub fn answer(
        &self,
        id: &SessionId,
        yes: bool,
    ) -> Result<SessionView, QuestionnaireServiceError> {
        let (phase, view) = self.repository.modify(id, |session| {
            session.answer(yes).map(|phase| (phase, session.view()))
        })??;

        if phase == SessionPhase::Scored {
            info!(session = %id, "questionnaire completed");
        } else {
            debug!(session = %id, answered = view.answered, "answer recorded");
        }
        Ok(view)
    }

    pub fn back(&self, id: &SessionId) -> Result<SessionView, QuestionnaireServiceError> {
        let view = self
            .repository
            .modify(id, |session| session.back().map(|()| session.view()))??;
        Ok(view)
    }

    pub fn reset(&self, id: &SessionId) -> Result<SessionView, QuestionnaireServiceError> {
        let view = self.repository.modify(id, |session| {
            session.reset();
            session.view()
        })?;
        info!(session = %id, "questionnaire reset");
        Ok(view)
    }

    pub fn result(&self, id: &SessionId) -> Result<DiagnosisView, QuestionnaireServiceError> {
        let session = self.load(id)?;
        let diagnosis = session.diagnosis()?;
        Ok(build_view(&diagnosis, &self.knowledge))
    }

    /// Discard a session once the respondent is done with it.
    pub fn end(&self, id: &SessionId) -> Result<(), QuestionnaireServiceError> {
        self.repository.remove(id)?;
        info!(session = %id, "questionnaire session ended");
        Ok(())
    }

    /// Diagnose a complete answer set without opening a session.
    pub fn diagnose(&self, answers: &Answers) -> Result<DiagnosisView, QuestionnaireServiceError> {
        if let Some(unknown) = answers
            .codes()
            .find(|code| !self.knowledge.contains_question(code))
        {
            return Err(QuestionnaireServiceError::UnknownQuestion(unknown.to_string()));
        }

        let diagnosis = self.engine.diagnose(answers);
        Ok(build_view(&diagnosis, &self.knowledge))
    }

    fn load(&self, id: &SessionId) -> Result<QuestionnaireSession, QuestionnaireServiceError> {
        let session = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(session)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum QuestionnaireServiceError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("unknown question code '{0}'")]
    UnknownQuestion(String),
}
