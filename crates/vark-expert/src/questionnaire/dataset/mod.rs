mod normalizer;
mod parser;

pub use parser::RecordError;

use super::domain::{StrategyBook, VarkStyle};
use super::knowledge::KnowledgeBase;
use parser::{DatasetRecord, ParseError};
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug)]
pub enum DatasetError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidRecord { line: u64, reason: RecordError },
    DuplicateQuestion(String),
    NoQuestions,
}

impl std::fmt::Display for DatasetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetError::Io(err) => write!(f, "failed to read VARK dataset: {}", err),
            DatasetError::Csv(err) => write!(f, "invalid VARK dataset CSV: {}", err),
            DatasetError::InvalidRecord { line, reason } => {
                write!(f, "invalid dataset row on line {}: {}", line, reason)
            }
            DatasetError::DuplicateQuestion(code) => {
                write!(f, "question code '{}' appears more than once", code)
            }
            DatasetError::NoQuestions => write!(f, "dataset does not contain any questions"),
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetError::Io(err) => Some(err),
            DatasetError::Csv(err) => Some(err),
            DatasetError::InvalidRecord { reason, .. } => Some(reason),
            DatasetError::DuplicateQuestion(_) | DatasetError::NoQuestions => None,
        }
    }
}

impl From<std::io::Error> for DatasetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for DatasetError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<ParseError> for DatasetError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::Csv(err) => Self::Csv(err),
            ParseError::Record { line, reason } => Self::InvalidRecord { line, reason },
        }
    }
}

/// Builds a [`KnowledgeBase`] from the single-table VARK dataset CSV.
pub struct DatasetLoader;

impl DatasetLoader {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<KnowledgeBase, DatasetError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading VARK dataset");
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<KnowledgeBase, DatasetError> {
        let mut questions = Vec::new();
        let mut rules = Vec::new();
        let mut strategies = StrategyBook::default();

        for parsed in parser::parse_records(reader)? {
            match parsed.record {
                DatasetRecord::Question(question) => questions.push(question),
                DatasetRecord::Rule(rule) => rules.push(rule),
                DatasetRecord::Strategy { category, text } => {
                    apply_strategy(&mut strategies, category, text, parsed.line);
                }
                DatasetRecord::Unknown(kind) => {
                    warn!(line = parsed.line, kind = %kind, "skipping row with unknown type");
                }
            }
        }

        let knowledge = KnowledgeBase::new(questions, rules, strategies)?;
        debug!(
            questions = knowledge.questions().len(),
            rules = knowledge.rules().len(),
            strategies = knowledge.strategies().len(),
            "VARK dataset loaded"
        );
        Ok(knowledge)
    }
}

fn apply_strategy(strategies: &mut StrategyBook, category: VarkStyle, text: String, line: u64) {
    if strategies.insert(category, text).is_some() {
        warn!(
            line,
            category = category.code(),
            "duplicate strategy row replaces the earlier one"
        );
    }
}
