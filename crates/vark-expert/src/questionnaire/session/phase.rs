use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a respondent is in the questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Collecting,
    Scored,
}

/// Interactions that may move a session between phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionEvent {
    Answer,
    Back,
    Complete,
    Reset,
}

const TRANSITIONS: &[(SessionPhase, SessionEvent, SessionPhase)] = &[
    (SessionPhase::Collecting, SessionEvent::Answer, SessionPhase::Collecting),
    (SessionPhase::Collecting, SessionEvent::Back, SessionPhase::Collecting),
    (SessionPhase::Collecting, SessionEvent::Complete, SessionPhase::Scored),
    (SessionPhase::Collecting, SessionEvent::Reset, SessionPhase::Collecting),
    (SessionPhase::Scored, SessionEvent::Reset, SessionPhase::Collecting),
];

impl SessionPhase {
    /// Next phase for `event`, or `None` when the event is not allowed here.
    pub fn transition(self, event: SessionEvent) -> Option<SessionPhase> {
        TRANSITIONS
            .iter()
            .find(|(from, on, _)| *from == self && *on == event)
            .map(|(_, _, to)| *to)
    }

    pub fn label(self) -> &'static str {
        match self {
            SessionPhase::Collecting => "collecting",
            SessionPhase::Scored => "scored",
        }
    }
}

impl SessionEvent {
    pub fn label(self) -> &'static str {
        match self {
            SessionEvent::Answer => "answer",
            SessionEvent::Back => "go back",
            SessionEvent::Complete => "complete",
            SessionEvent::Reset => "reset",
        }
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
