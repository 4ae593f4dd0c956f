use super::super::domain::{Answers, Question, ScoreVector};

/// Sums the weight of every affirmed question into its category.
///
/// Unanswered questions count as "no". All four categories are present in the
/// result even when nothing was affirmed.
pub fn score(questions: &[Question], answers: &Answers) -> ScoreVector {
    let mut scores = ScoreVector::zeroed();

    for question in questions {
        if answers.is_yes(&question.code) {
            scores.add(question.category, question.weight);
        }
    }

    scores
}
