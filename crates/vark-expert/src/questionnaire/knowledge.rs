use super::dataset::{DatasetError, DatasetLoader};
use super::domain::{Question, Rule, StrategyBook, VarkStyle};
use std::collections::HashSet;

const BUNDLED_DATASET: &str = include_str!("../../data/vark_dataset.csv");

/// Immutable questions, rules and strategies a questionnaire runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeBase {
    questions: Vec<Question>,
    rules: Vec<Rule>,
    strategies: StrategyBook,
}

impl KnowledgeBase {
    pub fn new(
        questions: Vec<Question>,
        rules: Vec<Rule>,
        strategies: StrategyBook,
    ) -> Result<Self, DatasetError> {
        if questions.is_empty() {
            return Err(DatasetError::NoQuestions);
        }

        let mut seen = HashSet::new();
        for question in &questions {
            if !seen.insert(question.code.as_str()) {
                return Err(DatasetError::DuplicateQuestion(question.code.clone()));
            }
        }

        for rule in &rules {
            for code in rule.required_codes() {
                if !seen.contains(code) {
                    tracing::warn!(
                        rule = %rule.id,
                        condition = code,
                        "rule references an unknown question and can never match"
                    );
                }
            }
        }

        Ok(Self {
            questions,
            rules,
            strategies,
        })
    }

    /// The dataset shipped with the crate.
    pub fn bundled() -> Result<Self, DatasetError> {
        DatasetLoader::from_reader(BUNDLED_DATASET.as_bytes())
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn strategies(&self) -> &StrategyBook {
        &self.strategies
    }

    pub fn question(&self, code: &str) -> Option<&Question> {
        self.questions.iter().find(|question| question.code == code)
    }

    pub fn contains_question(&self, code: &str) -> bool {
        self.question(code).is_some()
    }

    /// Highest score each category can reach.
    pub fn max_score(&self, category: VarkStyle) -> u32 {
        self.questions
            .iter()
            .filter(|question| question.category == category)
            .map(|question| question.weight)
            .sum()
    }

    pub fn question_count(&self, category: VarkStyle) -> usize {
        self.questions
            .iter()
            .filter(|question| question.category == category)
            .count()
    }
}
