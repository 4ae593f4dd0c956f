mod phase;

pub use phase::{SessionEvent, SessionPhase};

use super::domain::{Answers, Question, ScoreVector, VarkStyle};
use super::inference::{diagnose, score, Diagnosis};
use super::knowledge::KnowledgeBase;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("cannot {event} while the questionnaire is {phase}")]
    InvalidTransition {
        phase: SessionPhase,
        event: SessionEvent,
    },
    #[error("already at the first question")]
    AtFirstQuestion,
    #[error("questionnaire is not finished yet")]
    NotScored,
}

/// Per-respondent questionnaire context.
///
/// Holds the answer set, the current position and the running scores. Scores
/// are recomputed from the full answer set after every change, so revisiting a
/// question never double counts it.
#[derive(Debug, Clone)]
pub struct QuestionnaireSession {
    id: SessionId,
    knowledge: Arc<KnowledgeBase>,
    phase: SessionPhase,
    current: usize,
    answers: Answers,
    scores: ScoreVector,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    last_active: DateTime<Utc>,
}

impl QuestionnaireSession {
    pub fn new(id: SessionId, knowledge: Arc<KnowledgeBase>) -> Self {
        let now = Utc::now();
        Self {
            id,
            knowledge,
            phase: SessionPhase::Collecting,
            current: 0,
            answers: Answers::new(),
            scores: ScoreVector::zeroed(),
            started_at: now,
            completed_at: None,
            last_active: now,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn scores(&self) -> &ScoreVector {
        &self.scores
    }

    pub fn total_questions(&self) -> usize {
        self.knowledge.questions().len()
    }

    /// Zero-based position of the question on screen.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The question awaiting an answer, `None` once scored.
    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            SessionPhase::Collecting => self.knowledge.questions().get(self.current),
            SessionPhase::Scored => None,
        }
    }

    pub fn progress_percent(&self) -> u8 {
        let total = self.total_questions();
        if total == 0 || self.phase == SessionPhase::Scored {
            return 100;
        }
        ((self.current * 100) / total) as u8
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Time of the last answer, back or reset; used to expire idle sessions.
    pub fn last_active(&self) -> DateTime<Utc> {
        self.last_active
    }

    /// Records the answer to the current question and advances, moving to
    /// [`SessionPhase::Scored`] after the last one.
    pub fn answer(&mut self, yes: bool) -> Result<SessionPhase, SessionError> {
        self.ensure(SessionEvent::Answer)?;

        let Some(question) = self.knowledge.questions().get(self.current) else {
            return Err(SessionError::InvalidTransition {
                phase: self.phase,
                event: SessionEvent::Answer,
            });
        };
        let code = question.code.clone();

        self.answers.record(code, yes);
        self.scores = score(self.knowledge.questions(), &self.answers);
        self.last_active = Utc::now();

        if self.current + 1 < self.total_questions() {
            self.current += 1;
        } else {
            self.phase = self.ensure(SessionEvent::Complete)?;
            self.completed_at = Some(self.last_active);
        }

        Ok(self.phase)
    }

    pub fn back(&mut self) -> Result<(), SessionError> {
        self.ensure(SessionEvent::Back)?;
        if self.current == 0 {
            return Err(SessionError::AtFirstQuestion);
        }
        self.current -= 1;
        self.last_active = Utc::now();
        Ok(())
    }

    /// Clears every answer and returns to the first question. The restarted
    /// questionnaire is timed from this call.
    pub fn reset(&mut self) {
        let now = Utc::now();
        self.phase = self
            .phase
            .transition(SessionEvent::Reset)
            .unwrap_or(SessionPhase::Collecting);
        self.current = 0;
        self.answers.clear();
        self.scores = ScoreVector::zeroed();
        self.started_at = now;
        self.completed_at = None;
        self.last_active = now;
    }

    pub fn diagnosis(&self) -> Result<Diagnosis, SessionError> {
        match self.phase {
            SessionPhase::Scored => Ok(diagnose(&self.knowledge, &self.answers)),
            SessionPhase::Collecting => Err(SessionError::NotScored),
        }
    }

    pub fn view(&self) -> SessionView {
        let current = self.current_question().map(|question| QuestionView {
            number: self.current + 1,
            code: question.code.clone(),
            text: question.text.clone(),
            category: question.category,
            category_label: question.category.label(),
            previous_answer: self.answers.get(&question.code),
        });

        SessionView {
            session_id: self.id.clone(),
            phase: self.phase,
            current,
            answered: self.answers.len(),
            total_questions: self.total_questions(),
            progress_percent: self.progress_percent(),
            scores: self.scores.clone(),
            started_at: self.started_at,
            completed_at: self.completed_at,
        }
    }

    fn ensure(&self, event: SessionEvent) -> Result<SessionPhase, SessionError> {
        self.phase
            .transition(event)
            .ok_or(SessionError::InvalidTransition {
                phase: self.phase,
                event,
            })
    }
}

/// Serializable snapshot of a session for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub phase: SessionPhase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<QuestionView>,
    pub answered: usize,
    pub total_questions: usize,
    pub progress_percent: u8,
    pub scores: ScoreVector,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub number: usize,
    pub code: String,
    pub text: String,
    pub category: VarkStyle,
    pub category_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_answer: Option<bool>,
}
