//! VARK learning-style questionnaire: dataset ingestion, scoring, rule
//! evaluation, per-respondent sessions and their HTTP surface.

pub mod dataset;
pub mod domain;
pub mod inference;
pub mod knowledge;
pub mod report;
pub mod repository;
pub mod router;
pub mod service;
pub mod session;

#[cfg(test)]
mod tests;

pub use dataset::{DatasetError, DatasetLoader, RecordError};
pub use domain::{
    Answers, MatchedRules, Question, Rule, ScoreVector, StrategyBook, VarkStyle,
    MISSING_STRATEGY_PLACEHOLDER,
};
pub use inference::{
    diagnose, evaluate, score, select_dominant, Diagnosis, DominantProfile, InferenceEngine,
    Recommendation,
};
pub use knowledge::KnowledgeBase;
pub use report::{build_view, DiagnosisView, NO_RULE_MATCHED_NOTE};
pub use repository::{InMemorySessionRepository, RepositoryError, SessionRepository};
pub use router::questionnaire_router;
pub use service::{QuestionnaireService, QuestionnaireServiceError};
pub use session::{
    QuestionView, QuestionnaireSession, SessionError, SessionEvent, SessionId, SessionPhase,
    SessionView,
};
