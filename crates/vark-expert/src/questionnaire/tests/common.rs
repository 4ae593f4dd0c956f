use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::questionnaire::domain::{Question, Rule, StrategyBook, VarkStyle};
use crate::questionnaire::knowledge::KnowledgeBase;
use crate::questionnaire::repository::{
    InMemorySessionRepository, RepositoryError, SessionRepository,
};
use crate::questionnaire::service::QuestionnaireService;
use crate::questionnaire::session::{QuestionnaireSession, SessionId};

pub(super) fn question(code: &str, category: VarkStyle, weight: u32) -> Question {
    Question {
        code: code.to_string(),
        text: format!("Prompt for {code}"),
        category,
        weight,
    }
}

/// Q1:(V,2), Q2:(A,1), Q3:(V,1) with R1 = V requires {Q1, Q3}.
pub(super) fn sample_knowledge() -> Arc<KnowledgeBase> {
    let questions = vec![
        question("Q1", VarkStyle::Visual, 2),
        question("Q2", VarkStyle::Auditory, 1),
        question("Q3", VarkStyle::Visual, 1),
    ];
    let rules = vec![Rule {
        id: "R1".to_string(),
        category: VarkStyle::Visual,
        conditions: vec!["Q1".to_string(), "Q3".to_string()],
    }];
    let mut strategies = StrategyBook::default();
    strategies.insert(VarkStyle::Visual, "Sketch diagrams of every topic");
    strategies.insert(VarkStyle::Auditory, "Discuss the material aloud");

    Arc::new(KnowledgeBase::new(questions, rules, strategies).expect("valid knowledge base"))
}

pub(super) fn session() -> QuestionnaireSession {
    QuestionnaireSession::new(SessionId("session-test".to_string()), sample_knowledge())
}

pub(super) fn build_service() -> (
    Arc<QuestionnaireService<InMemorySessionRepository>>,
    Arc<InMemorySessionRepository>,
) {
    let repository = Arc::new(InMemorySessionRepository::default());
    let service = Arc::new(QuestionnaireService::new(
        repository.clone(),
        sample_knowledge(),
    ));
    (service, repository)
}

pub(super) struct UnavailableRepository;

impl SessionRepository for UnavailableRepository {
    fn insert(
        &self,
        _session: QuestionnaireSession,
    ) -> Result<QuestionnaireSession, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn fetch(&self, _id: &SessionId) -> Result<Option<QuestionnaireSession>, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn modify<T, F>(&self, _id: &SessionId, _change: F) -> Result<T, RepositoryError>
    where
        F: FnOnce(&mut QuestionnaireSession) -> T,
    {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn remove(&self, _id: &SessionId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("valid json body")
}
